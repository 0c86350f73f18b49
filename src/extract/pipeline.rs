// src/extract/pipeline.rs

use crate::config::{CompiledSelectors, SelectorConfig};
use crate::domain::{Diagnostics, Issue, ListingRecord};
use crate::extract::assemble_record;
use crate::extract::county::CountyStrategy;
use crate::extract::fragments::{extract_grouped, extract_normal};
use crate::extract::linker::link_grouped;
use crate::extract::merge::merge_records;
use crate::extract::price::is_listing_href;
use crate::scraper::{NormalFragments, ScraperError};
use rayon::prelude::*;
use scraper::Html;
use tracing::{debug, info};

/// Records pulled from a single page, still split by ad style.
#[derive(Debug, Default)]
pub struct PageRecords {
    pub normal: Vec<ListingRecord>,
    pub grouped: Vec<ListingRecord>,
    pub diagnostics: Diagnostics,
    /// False when neither ad style matched anything, i.e. past the last page
    /// or the markup changed under us.
    pub had_fragments: bool,
}

#[derive(Debug, Default)]
pub struct PipelineOutput {
    pub records: Vec<ListingRecord>,
    pub diagnostics: Diagnostics,
}

/// Markup in, listing records out. Holds the compiled selectors for a run;
/// pages are processed independently and only combined in [`Pipeline::finish`].
pub struct Pipeline {
    config: SelectorConfig,
    selectors: CompiledSelectors,
    strategy: CountyStrategy,
}

impl Pipeline {
    pub fn new(config: SelectorConfig, strategy: CountyStrategy) -> Result<Self, ScraperError> {
        let selectors = CompiledSelectors::compile(&config)?;
        Ok(Self {
            config,
            selectors,
            strategy,
        })
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Extracts and resolves both ad styles on one page. `label` only shows
    /// up in logs and errors.
    pub fn process_page(&self, label: &str, html: &str) -> Result<PageRecords, ScraperError> {
        let document = Html::parse_document(html);
        let mut diagnostics = Diagnostics::default();

        let normal_fragments = extract_normal(&document, &self.selectors, &mut diagnostics);
        let grouped_fragments = extract_grouped(
            &document,
            &self.selectors,
            &self.config.join_key,
            &mut diagnostics,
        );
        let had_fragments = !(normal_fragments.is_empty() && grouped_fragments.is_empty());

        let normal = self.resolve_normal(label, &normal_fragments, &mut diagnostics)?;
        let grouped = link_grouped(&grouped_fragments, self.strategy, &mut diagnostics);

        debug!(
            "{label}: {} normal, {} grouped records",
            normal.len(),
            grouped.len()
        );

        Ok(PageRecords {
            normal,
            grouped,
            diagnostics,
            had_fragments,
        })
    }

    /// Pairs each price with the compound line at the same position, drops
    /// the promotional cards, then lines the survivors up with the addresses.
    /// Either pairing being uneven means the markup no longer matches what
    /// the selectors assume, and that is fatal.
    fn resolve_normal(
        &self,
        label: &str,
        fragments: &NormalFragments,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<ListingRecord>, ScraperError> {
        if fragments.prices.len() != fragments.compound_infos.len() {
            return Err(ScraperError::FragmentCountMismatch {
                page: label.to_string(),
                left_name: "prices",
                left: fragments.prices.len(),
                right_name: "compound infos",
                right: fragments.compound_infos.len(),
            });
        }

        let prefix = &self.config.listing_href_prefix;
        let mut listings = Vec::with_capacity(fragments.prices.len());
        for (price, compound) in fragments.prices.iter().zip(&fragments.compound_infos) {
            if is_listing_href(price.href.as_deref(), prefix) {
                listings.push((price, compound));
            } else {
                diagnostics.record(Issue::NotAListing {
                    href: price.href.clone(),
                });
            }
        }

        if listings.len() != fragments.addresses.len() {
            return Err(ScraperError::FragmentCountMismatch {
                page: label.to_string(),
                left_name: "listing prices",
                left: listings.len(),
                right_name: "addresses",
                right: fragments.addresses.len(),
            });
        }

        let records = fragments
            .addresses
            .iter()
            .zip(listings)
            .filter_map(|(address, (price, compound))| {
                assemble_record(address, compound, &price.text, self.strategy, diagnostics)
            })
            .collect();
        Ok(records)
    }

    /// Processes pages that are already in memory, in parallel. Results are
    /// combined in the order the pages were given.
    pub fn process_documents(
        &self,
        pages: &[(String, String)],
    ) -> Result<PipelineOutput, ScraperError> {
        let results: Vec<PageRecords> = pages
            .par_iter()
            .map(|(label, html)| self.process_page(label, html))
            .collect::<Result<_, _>>()?;
        Ok(Self::finish(results))
    }

    /// Unions the per-page results: every normal record before every grouped
    /// record, then deduplicates.
    pub fn finish(pages: Vec<PageRecords>) -> PipelineOutput {
        let mut diagnostics = Diagnostics::default();
        let mut normal = Vec::new();
        let mut grouped = Vec::new();

        for page in pages {
            normal.extend(page.normal);
            grouped.extend(page.grouped);
            diagnostics.merge(page.diagnostics);
        }

        let records = merge_records(normal, grouped, &mut diagnostics);
        info!("✅ {} unique listings", records.len());

        PipelineOutput {
            records,
            diagnostics,
        }
    }
}
