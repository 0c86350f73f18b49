// scraper.rs
use crate::scraper::ScraperError;
use reqwest::blocking::Client;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use url::Url;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

pub const DEFAULT_BASE_URL: &str = "https://www.daft.ie/property-for-sale/ireland";
const ZENROWS_URL: &str = "https://api.zenrows.com/v1/";

#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Route requests through ZenRows when set.
    pub zenrows_api_key: Option<String>,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(60),
            zenrows_api_key: None,
        }
    }
}

impl ScrapeSettings {
    /// Defaults plus `ZENROWS_API_KEY` from the environment.
    pub fn from_env() -> Self {
        Self {
            zenrows_api_key: std::env::var("ZENROWS_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            ..Self::default()
        }
    }
}

/// Offsets `start, start + page_size, ...` strictly below `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: usize,
    pub page_size: usize,
    pub end: usize,
}

impl PageRange {
    pub fn new(start: usize, page_size: usize, end: usize) -> Result<Self, ScraperError> {
        if page_size == 0 {
            return Err(ScraperError::Config("page size must be at least 1".into()));
        }
        Ok(Self {
            start,
            page_size,
            end,
        })
    }

    pub fn offsets(&self) -> impl Iterator<Item = usize> {
        (self.start..self.end).step_by(self.page_size)
    }
}

#[derive(Debug, Default)]
pub struct FetchSummary {
    pub pages_fetched: usize,
    pub failures: Vec<(usize, String)>,
}

pub struct DaftScraper {
    client: Client,
    settings: ScrapeSettings,
}

impl DaftScraper {
    pub fn new(settings: ScrapeSettings) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self { client, settings })
    }

    pub fn page_url(&self, offset: usize, page_size: usize) -> Result<Url, ScraperError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|e| ScraperError::Config(format!("bad base url: {e}")))?;
        url.query_pairs_mut()
            .append_pair("pageSize", &page_size.to_string())
            .append_pair("from", &offset.to_string());
        Ok(url)
    }

    /// Walks the page range one page at a time. A page that fails to download
    /// is logged and skipped; `on_page` returns `false` to stop early.
    pub fn fetch_all_pages<F>(
        &self,
        range: PageRange,
        mut on_page: F,
    ) -> Result<FetchSummary, ScraperError>
    where
        F: FnMut(usize, &str) -> Result<bool, ScraperError>,
    {
        let mut summary = FetchSummary::default();

        for offset in range.offsets() {
            let url = self.page_url(offset, range.page_size)?;
            info!("📄 Scraping offset {offset}: {url}");

            match self.fetch_html(url.as_str()) {
                Ok(html) => {
                    summary.pages_fetched += 1;
                    if !on_page(offset, &html)? {
                        info!("🏁 No listings at offset {offset}, stopping");
                        break;
                    }
                }
                Err(e) => {
                    warn!("⚠️ Offset {offset} failed: {e}");
                    summary.failures.push((offset, e.to_string()));
                }
            }
        }

        Ok(summary)
    }

    pub fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        let start = Instant::now();
        let html = match &self.settings.zenrows_api_key {
            Some(key) => self.fetch_html_via_zenrows(url, key)?,
            None => self.fetch_html_direct(url)?,
        };
        info!("✅ Fetched {} bytes in {:?}", html.len(), start.elapsed());
        Ok(html)
    }

    fn fetch_html_direct(&self, url: &str) -> Result<String, ScraperError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ScraperError::Network(format!("HTTP {status} for {url}")));
        }
        Ok(text)
    }

    fn fetch_html_via_zenrows(&self, url: &str, api_key: &str) -> Result<String, ScraperError> {
        use reqwest::header::{HeaderMap, HeaderValue, REFERER};

        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("https://www.google.com/"));

        let mut params = HashMap::new();
        params.insert("url", url.to_string());
        params.insert("apikey", api_key.to_string());
        params.insert("original_status", "true".to_string());
        params.insert("mode", "auto".to_string());

        let resp = self
            .client
            .get(ZENROWS_URL)
            .headers(headers)
            .query(&params)
            .send()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        let status = resp.status();

        let original_status = resp
            .headers()
            .iter()
            .find(|(k, _)| k.as_str().to_ascii_lowercase().contains("original"))
            .map(|(_, v)| v.to_str().unwrap_or("?").to_string())
            .unwrap_or_else(|| "<none>".to_string());

        let text = resp
            .text()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ScraperError::Network(format!(
                "ZenRows HTTP {status} ({original_status}) : {text}"
            )));
        }

        // ZenRows reports its own failures as a JSON body with a "code" field.
        if text.starts_with('{') {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(&text) {
                if json.get("code").is_some() {
                    return Err(ScraperError::Network(format!(
                        "ZenRows API error ({original_status}) : {text}"
                    )));
                }
            }
        }

        Ok(text)
    }
}
