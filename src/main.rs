mod analytics;
mod config;
mod domain;
mod extract;
mod scraper;
mod spreadsheets;


use crate::analytics::PriceByCountyAndBeds;
use crate::config::SelectorConfig;
use crate::domain::{Issue, ListingRecord};
use crate::extract::county::CountyStrategy;
use crate::extract::pipeline::{Pipeline, PipelineOutput};
use crate::scraper::{DaftScraper, PageRange, ScrapeSettings};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "daft_scraper", about = "Daft.ie for-sale listings to CSV")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ExtractArgs {
    /// Output CSV (default: daft_listings_<date>.csv)
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Selector configuration JSON (default: built-in)
    #[arg(long)]
    selectors: Option<PathBuf>,
    /// How the county is taken from the address
    #[arg(long, value_enum, default_value_t = CountyStrategy::Lookup)]
    county_strategy: CountyStrategy,
    /// Also write an .xlsx workbook with the listings and the price pivot
    #[arg(long)]
    xlsx: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch listing pages and write the unified table
    Scrape {
        /// First result offset
        #[arg(long, default_value_t = 0)]
        start: usize,
        /// Results per page
        #[arg(long, default_value_t = 20)]
        page_size: usize,
        /// Stop before this offset
        #[arg(long, default_value_t = 15000)]
        end: usize,
        /// Keep the raw pages in this directory
        #[arg(long)]
        save_html: Option<PathBuf>,
        #[command(flatten)]
        extract: ExtractArgs,
    },
    /// Process previously saved pages instead of fetching
    Parse {
        /// HTML files, one listing page each
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        extract: ExtractArgs,
    },
    /// Average price by county and bedrooms from an existing CSV
    Pivot {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long)]
        xlsx: Option<PathBuf>,
    },
    /// Print the built-in selector configuration as JSON
    Selectors,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            start,
            page_size,
            end,
            save_html,
            extract,
        } => {
            let pipeline = build_pipeline(&extract)?;
            let range = PageRange::new(start, page_size, end)?;
            let scraper = DaftScraper::new(ScrapeSettings::from_env())?;

            if let Some(dir) = &save_html {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating {}", dir.display()))?;
            }

            let mut pages = Vec::new();
            let summary = scraper.fetch_all_pages(range, |offset, html| {
                if let Some(dir) = &save_html {
                    fs::write(dir.join(format!("page_{offset:05}.html")), html)?;
                }
                let page = pipeline.process_page(&format!("offset {offset}"), html)?;
                let keep_going = page.had_fragments;
                pages.push(page);
                Ok(keep_going)
            })?;
            info!(
                "Fetched {} pages, {} failed",
                summary.pages_fetched,
                summary.failures.len()
            );

            let mut output = Pipeline::finish(pages);
            for (offset, err) in summary.failures {
                output
                    .diagnostics
                    .record(Issue::FetchFailure(format!("offset {offset}: {err}")));
            }
            write_outputs(&output, &extract)?;
        }
        Commands::Parse { files, extract } => {
            let pipeline = build_pipeline(&extract)?;
            let mut pages = Vec::with_capacity(files.len());
            for file in &files {
                let html = fs::read_to_string(file)
                    .with_context(|| format!("reading {}", file.display()))?;
                pages.push((file.display().to_string(), html));
            }
            let output = pipeline.process_documents(&pages)?;
            write_outputs(&output, &extract)?;
        }
        Commands::Pivot { input, xlsx } => {
            let listings = spreadsheets::load_listings_csv(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            report_pivot(&listings, xlsx.as_deref())?;
        }
        Commands::Selectors => {
            println!("{}", SelectorConfig::default().to_json()?);
        }
    }

    info!("Done in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(())
}

fn build_pipeline(args: &ExtractArgs) -> anyhow::Result<Pipeline> {
    let config = match &args.selectors {
        Some(path) => SelectorConfig::load(path)
            .with_context(|| format!("loading selectors from {}", path.display()))?,
        None => SelectorConfig::default(),
    };
    let pipeline = Pipeline::new(config, args.county_strategy)?;
    info!(
        "Selector config {} / county strategy {:?}",
        pipeline.config().version,
        args.county_strategy
    );
    Ok(pipeline)
}

fn default_output_path() -> PathBuf {
    PathBuf::from(format!(
        "daft_listings_{}.csv",
        chrono::Local::now().format("%Y%m%d")
    ))
}

fn write_outputs(output: &PipelineOutput, args: &ExtractArgs) -> anyhow::Result<()> {
    let out = args.out.clone().unwrap_or_else(default_output_path);
    spreadsheets::save_listings_csv(&out, &output.records)
        .with_context(|| format!("writing {}", out.display()))?;
    info!("Wrote {} listings to {}", output.records.len(), out.display());

    output.diagnostics.log_summary();
    report_pivot(&output.records, args.xlsx.as_deref())
}

fn report_pivot(listings: &[ListingRecord], xlsx: Option<&Path>) -> anyhow::Result<()> {
    let pivot = PriceByCountyAndBeds::build(listings);
    if pivot.is_empty() {
        println!("No listings with a known price.");
    } else {
        println!("{}", pivot.render());
    }

    if let Some(path) = xlsx {
        spreadsheets::save_listings_xlsx(path, listings, &pivot)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Wrote workbook {}", path.display());
    }
    Ok(())
}
