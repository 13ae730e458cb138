use std::time::{Duration, Instant};

use crate::core::types::{CheckMode, ExportMode, ResultFilter, ResultSet};
use crate::discovery::{dedup, extract_urls};
use crate::export::{ExportSource, render};
use crate::reporting::logging;
use crate::validation::client::{VerifyLinks, check_each};

/// Everything produced by the most recent check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub mode: CheckMode,
    /// The text the links were taken from, kept for `original` exports
    pub input: String,
    pub results: ResultSet,
    /// Links found before deduplication
    pub links_found: usize,
    pub duplicates_removed: usize,
    pub duration: Duration,
}

impl CheckReport {
    /// Render the current results as an export block.
    pub fn export(&self, mode: ExportMode, filter: ResultFilter) -> String {
        let selected = self.results.filtered(filter);
        let source = ExportSource {
            text: &self.input,
            mode: self.mode,
        };
        render(&selected, mode, filter, &source)
    }
}

/// Holds at most one result set; every check replaces it wholesale.
#[derive(Debug)]
pub struct CheckSession<V> {
    verifier: V,
    dedup: bool,
    concurrency: usize,
    current: Option<CheckReport>,
}

impl<V: VerifyLinks + Sync> CheckSession<V> {
    pub fn new(verifier: V) -> Self {
        Self {
            verifier,
            dedup: true,
            concurrency: 1,
            current: None,
        }
    }

    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Extract links from `text` and check them in one bulk request.
    pub async fn check_text(&mut self, text: &str) -> &CheckReport {
        self.current = None;
        let started = Instant::now();

        let found = extract_urls(text);
        let (links, duplicates_removed) = if self.dedup {
            let deduplicated = dedup(&found);
            (deduplicated.unique, deduplicated.duplicate_count)
        } else {
            (found.clone(), 0)
        };
        logging::log_link_discovery(links.len(), found.len());

        let results = if links.is_empty() {
            Vec::new()
        } else {
            logging::log_check_start(links.len(), CheckMode::Bulk);
            self.verifier.check_bulk(&links).await
        };

        self.finish(CheckReport {
            mode: CheckMode::Bulk,
            input: text.to_string(),
            results: ResultSet::new(results),
            links_found: found.len(),
            duplicates_removed,
            duration: started.elapsed(),
        })
    }

    /// Check explicitly given links one at a time.
    ///
    /// A single link keeps single-check semantics for `original` exports.
    /// Several links are treated as a newline-separated paste.
    pub async fn check_links(&mut self, links: &[String]) -> &CheckReport {
        self.current = None;
        let started = Instant::now();

        let trimmed: Vec<String> = links
            .iter()
            .map(|link| link.trim().to_string())
            .filter(|link| !link.is_empty())
            .collect();
        let (unique, duplicates_removed) = if self.dedup {
            let deduplicated = dedup(&trimmed);
            (deduplicated.unique, deduplicated.duplicate_count)
        } else {
            (trimmed.clone(), 0)
        };

        let mode = if unique.len() == 1 {
            CheckMode::Single
        } else {
            CheckMode::Bulk
        };

        logging::log_check_start(unique.len(), mode);
        let results = check_each(&self.verifier, &unique, self.concurrency).await;

        self.finish(CheckReport {
            mode,
            input: unique.join("\n"),
            results: ResultSet::new(results),
            links_found: trimmed.len(),
            duplicates_removed,
            duration: started.elapsed(),
        })
    }

    fn finish(&mut self, report: CheckReport) -> &CheckReport {
        logging::log_check_complete(
            report.results.len(),
            report.results.valid_count(),
            report.results.invalid_count(),
            report.duration.as_millis(),
        );
        self.current.insert(report)
    }

    pub fn report(&self) -> Option<&CheckReport> {
        self.current.as_ref()
    }

    /// Export of the current results; empty when nothing has been checked.
    pub fn export(&self, mode: ExportMode, filter: ResultFilter) -> String {
        self.current
            .as_ref()
            .map(|report| report.export(mode, filter))
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
