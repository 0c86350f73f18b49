// src/domain/diagnostics.rs

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Recoverable data problems. None of these stop a run; each is logged and
/// counted so markup drift shows up in the summary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Issue {
    #[error("selector '{field}' matched nothing")]
    SelectorMiss { field: &'static str },
    #[error("unparseable price '{text}', using 0")]
    PriceFormat { text: String },
    #[error("grouped {kind} fragment with key {key:?} has no partner")]
    JoinKeyMismatch { kind: &'static str, key: Option<String> },
    #[error("skipped promotional card with link {href:?}")]
    NotAListing { href: Option<String> },
    #[error("dropped a listing with an empty address")]
    MissingAddress,
    #[error("page fetch failed: {0}")]
    FetchFailure(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssueKind {
    SelectorMiss,
    PriceFormat,
    JoinKeyMismatch,
    NotAListing,
    MissingAddress,
    FetchFailure,
}

impl Issue {
    pub fn kind(&self) -> IssueKind {
        match self {
            Issue::SelectorMiss { .. } => IssueKind::SelectorMiss,
            Issue::PriceFormat { .. } => IssueKind::PriceFormat,
            Issue::JoinKeyMismatch { .. } => IssueKind::JoinKeyMismatch,
            Issue::NotAListing { .. } => IssueKind::NotAListing,
            Issue::MissingAddress => IssueKind::MissingAddress,
            Issue::FetchFailure(_) => IssueKind::FetchFailure,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueKind::SelectorMiss => "selector misses",
            IssueKind::PriceFormat => "price format errors",
            IssueKind::JoinKeyMismatch => "join key mismatches",
            IssueKind::NotAListing => "promotional cards skipped",
            IssueKind::MissingAddress => "listings without an address",
            IssueKind::FetchFailure => "failed page fetches",
        };
        f.write_str(name)
    }
}

/// Counters collected while processing pages. Each page gets its own and
/// they are merged at the end, so nothing is shared between pages.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Diagnostics {
    counts: BTreeMap<IssueKind, usize>,
    pub duplicates_removed: usize,
}

impl Diagnostics {
    pub fn record(&mut self, issue: Issue) {
        match &issue {
            // Expected on pages without grouped ads, so keep it quiet.
            Issue::SelectorMiss { .. } | Issue::NotAListing { .. } => debug!("{issue}"),
            // The fetch loop already warned.
            Issue::FetchFailure(_) => debug!("{issue}"),
            _ => warn!("{issue}"),
        }
        *self.counts.entry(issue.kind()).or_insert(0) += 1;
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn merge(&mut self, other: Diagnostics) {
        for (kind, n) in other.counts {
            *self.counts.entry(kind).or_insert(0) += n;
        }
        self.duplicates_removed += other.duplicates_removed;
    }

    pub fn log_summary(&self) {
        if self.counts.is_empty() && self.duplicates_removed == 0 {
            info!("No data issues recorded");
            return;
        }
        for (kind, n) in &self.counts {
            info!("{n} {kind}");
        }
        info!("{} duplicate listings removed", self.duplicates_removed);
    }
}
