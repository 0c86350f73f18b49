use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Selector parse error for '{field}': {msg}")]
    Selector { field: String, msg: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("XLSX error: {0}")]
    Xlsx(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Two fragment sequences that must line up 1:1 did not. This means the
    /// extraction assumptions no longer hold for the page markup.
    #[error("Fragment count mismatch on {page}: {left_name}={left} vs {right_name}={right}")]
    FragmentCountMismatch {
        page: String,
        left_name: &'static str,
        left: usize,
        right_name: &'static str,
        right: usize,
    },
}
