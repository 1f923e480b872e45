//! Check workflow coordination
//!
//! This module provides:
//! - Workflow coordination: scan -> dispatch -> resolve -> report
//! - Bounded-concurrency upstream lookups (to respect rate limits)
//! - Error handling with partial continuation: one URL's failure never
//!   prevents resolution of the others

use crate::cli::CliArgs;
use crate::error::{ScanError, SourceError};
use crate::progress::Progress;
use crate::scanner::{scan, ScannedUrl};
use crate::source::{HttpClient, ResolvedDependency, SourceRegistry};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Concurrent upstream lookups, kept modest for unauthenticated API quotas
const DEFAULT_CONCURRENCY: usize = 4;

/// Coordinates scanning and per-URL resolution
pub struct Checker {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Registry of known dependency sources
    registry: Arc<SourceRegistry>,
    /// Semaphore bounding concurrent lookups
    semaphore: Arc<Semaphore>,
}

/// Outcome of resolving a single URL
#[derive(Debug)]
pub enum Outcome {
    /// The URL was recognized and resolved against its upstream
    Resolved(ResolvedDependency),
    /// The URL could not be resolved; other URLs are unaffected
    Failed(SourceError),
}

/// Result for one scanned dependency URL
#[derive(Debug)]
pub struct CheckResult {
    /// Manifest the URL was declared in
    pub file: PathBuf,
    /// Raw URL as extracted from the manifest
    pub url: String,
    /// Resolution outcome
    pub outcome: Outcome,
}

/// All per-URL results of a run, in scan order
#[derive(Debug, Default)]
pub struct CheckReport {
    pub results: Vec<CheckResult>,
}

/// Aggregate counts over a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub total: usize,
    pub up_to_date: usize,
    pub outdated: usize,
    pub failed: usize,
}

impl CheckReport {
    /// Compute aggregate counts
    pub fn summary(&self) -> CheckSummary {
        let mut summary = CheckSummary {
            total: self.results.len(),
            up_to_date: 0,
            outdated: 0,
            failed: 0,
        };

        for result in &self.results {
            match &result.outcome {
                Outcome::Resolved(dep) if dep.is_up_to_date() => summary.up_to_date += 1,
                Outcome::Resolved(_) => summary.outdated += 1,
                Outcome::Failed(_) => summary.failed += 1,
            }
        }

        summary
    }
}

impl Checker {
    /// Create a new checker with the given CLI arguments
    pub fn new(args: CliArgs) -> Result<Self, SourceError> {
        let client = HttpClient::new()?;
        Ok(Self::with_client(args, client))
    }

    /// Create a checker with a custom HTTP client (for testing)
    pub fn with_client(args: CliArgs, client: HttpClient) -> Self {
        Self {
            args,
            registry: Arc::new(SourceRegistry::new(client)),
            semaphore: Arc::new(Semaphore::new(DEFAULT_CONCURRENCY)),
        }
    }

    /// Scan the project tree and check every declared dependency URL
    pub async fn run(&self) -> Result<CheckReport, ScanError> {
        let scanned = scan(&self.args.root, self.args.recursive)?;
        Ok(self.check_urls(scanned).await)
    }

    /// Resolve the given URLs, preserving input order in the report
    ///
    /// Lookups run concurrently up to [`DEFAULT_CONCURRENCY`] permits; each
    /// resolution is self-contained, sharing only the HTTP client.
    pub async fn check_urls(&self, scanned: Vec<ScannedUrl>) -> CheckReport {
        let show_progress = !self.args.quiet && !self.args.json;
        let mut progress = Progress::new(show_progress);
        progress.start(scanned.len() as u64, "Checking dependencies");

        let mut tasks: JoinSet<(usize, CheckResult)> = JoinSet::new();
        let total = scanned.len();
        let mut meta: Vec<(PathBuf, String)> = Vec::with_capacity(total);

        for (index, item) in scanned.into_iter().enumerate() {
            meta.push((item.file.clone(), item.url.clone()));
            let registry = Arc::clone(&self.registry);
            let semaphore = Arc::clone(&self.semaphore);

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.unwrap();
                let outcome = match registry.resolve(&item.url).await {
                    Ok(dep) => Outcome::Resolved(dep),
                    Err(e) => Outcome::Failed(e),
                };

                (
                    index,
                    CheckResult {
                        file: item.file,
                        url: item.url,
                        outcome,
                    },
                )
            });
        }

        let mut slots: Vec<Option<CheckResult>> = Vec::with_capacity(total);
        slots.resize_with(total, || None);

        while let Some(joined) = tasks.join_next().await {
            // A panicked task carries no index; its slot stays empty and is
            // backfilled below.
            if let Ok((index, result)) = joined {
                progress.set_message(&result.url);
                slots[index] = Some(result);
                progress.inc();
            }
        }
        progress.finish_and_clear();

        backfill_lost_slots(&mut slots, &meta);

        CheckReport {
            results: slots.into_iter().flatten().collect(),
        }
    }
}

/// Replace slots whose lookup task died before reporting
///
/// Keeps the report length equal to the scanned URL count, counting the lost
/// lookup as a failure instead of dropping it.
fn backfill_lost_slots(slots: &mut [Option<CheckResult>], meta: &[(PathBuf, String)]) {
    for (slot, (file, url)) in slots.iter_mut().zip(meta) {
        if slot.is_none() {
            *slot = Some(CheckResult {
                file: file.clone(),
                url: url.clone(),
                outcome: Outcome::Failed(SourceError::network_error(
                    url.clone(),
                    "dependency lookup task stopped unexpectedly",
                )),
            });
        }
    }
}
