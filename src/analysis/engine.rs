//! Scan orchestration: discovery, batching, the worker pool, the graph post-pass.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Instant;

use tracing::{error, info};

use crate::ast::{AstProvider, JavaParser};
use crate::cache::{MetadataCache, SummaryStore};
use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use crate::types::{ScanReport, ScanStats};
use crate::{discovery, graph, manifest};

use super::worker::{self, ClassOutcome, FileOutcome, ScanContext};

/// What a batch job sends back.
struct BatchOutcome {
    index: usize,
    size: usize,
    files: Vec<FileOutcome>,
    failure: Option<String>,
}

/// The scanning context. Built once and reused; the metadata cache lives as
/// long as the scanner, so a second scan of the same tree skips unchanged classes.
pub struct Scanner {
    config: ScanConfig,
    provider: Arc<dyn AstProvider>,
    cache: Arc<MetadataCache>,
    scans: AtomicU64,
}

impl Scanner {
    /// A scanner backed by the tree-sitter Java parser.
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        Self::with_provider(config, Arc::new(JavaParser::new()))
    }

    #[must_use]
    pub fn with_provider(config: ScanConfig, provider: Arc<dyn AstProvider>) -> Self {
        Self {
            config,
            provider,
            cache: Arc::new(MetadataCache::new()),
            scans: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    #[must_use]
    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    /// Scans every Java file below `project_dir`.
    ///
    /// # Errors
    /// Returns `ScanError::NoSourceFiles` if the tree holds no Java files,
    /// or an error if the configuration is invalid or the pool cannot start.
    /// Per-file, per-class and per-batch failures are logged and counted instead.
    pub fn scan(&self, project_dir: &Path) -> Result<ScanReport> {
        self.config.validate()?;

        let discovered = discovery::discover(project_dir);
        if discovered.is_empty() {
            return Err(ScanError::NoSourceFiles(project_dir.to_path_buf()));
        }
        let total = discovered.len();
        let files = discovery::apply_path_filters(discovered, &self.config.file_path_filters);
        info!("Found {total} Java files, {} after path filters", files.len());

        let deps = manifest::filter(manifest::collect(project_dir), &self.config.dependency_filters);
        let outdated = manifest::check_versions(&deps);

        let mut report = self.scan_files(&files)?;
        report.outdated_dependencies = outdated;
        Ok(report)
    }

    /// Scans an explicit file list: batches, workers, then the cycle post-pass.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the pool cannot start.
    pub fn scan_files(&self, files: &[PathBuf]) -> Result<ScanReport> {
        self.config.validate()?;
        let start = Instant::now();
        let scan_id = self.scans.fetch_add(1, Ordering::SeqCst) + 1;

        let ctx = Arc::new(ScanContext {
            config: self.config.clone(),
            provider: Arc::clone(&self.provider),
            cache: Arc::clone(&self.cache),
            summary: SummaryStore::new(),
            scan_id,
        });

        let mut stats = ScanStats {
            total_files: files.len(),
            ..ScanStats::default()
        };

        let (tx, rx) = mpsc::channel();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count())
            .build()?;

        for (index, batch) in files.chunks(self.config.batch_size).enumerate() {
            let batch = batch.to_vec();
            let ctx = Arc::clone(&ctx);
            let tx = tx.clone();
            pool.spawn(move || {
                let _ = tx.send(run_batch(&ctx, index, &batch));
            });
        }
        drop(tx);

        let mut processed = 0usize;
        for outcome in rx {
            processed += outcome.size;
            tally(&mut stats, outcome);
            log_progress(processed, files.len());
        }

        let reused = ctx.summary.reused_count();
        let mut summary = ctx.summary.drain_sorted();
        stats.settle(summary.len(), reused);
        let cycles = graph::apply_cycles(&mut summary);

        Ok(ScanReport {
            summary,
            cycles,
            outdated_dependencies: Vec::new(),
            stats,
            duration_ms: start.elapsed().as_millis(),
        })
    }
}

fn worker_count() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

fn run_batch(ctx: &ScanContext, index: usize, batch: &[PathBuf]) -> BatchOutcome {
    let mut files = Vec::with_capacity(batch.len());
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        worker::scan_batch(ctx, batch, &mut files);
    }));
    BatchOutcome {
        index,
        size: batch.len(),
        files,
        failure: result.err().map(|payload| panic_message(payload.as_ref())),
    }
}

pub(super) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn tally(stats: &mut ScanStats, outcome: BatchOutcome) {
    if let Some(reason) = outcome.failure {
        error!("{}", ScanError::Batch { index: outcome.index, reason });
        stats.batch_failures += 1;
        stats.lost_files += outcome.size - outcome.files.len();
    }
    for file in outcome.files {
        match file {
            FileOutcome::ParseFailed(_) => stats.parse_failures += 1,
            FileOutcome::Parsed { classes, .. } => {
                for class in classes {
                    match class {
                        ClassOutcome::Scanned(_) => stats.scanned_classes += 1,
                        ClassOutcome::Unchanged(_) => stats.unchanged_classes += 1,
                        ClassOutcome::Filtered(_) => stats.filtered_classes += 1,
                        ClassOutcome::Duplicate(_) => stats.duplicate_classes += 1,
                        ClassOutcome::Failed(_) => stats.class_failures += 1,
                    }
                }
            }
        }
    }
}

/// Estimated by whole batches, so it can overshoot; capped at 100%.
#[allow(clippy::cast_precision_loss)]
fn log_progress(processed: usize, total: usize) {
    if total == 0 {
        return;
    }
    let pct = (processed as f64 / total as f64 * 100.0).min(100.0);
    info!("Progress: {pct:.1}%");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_shapes() {
        let s: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(s.as_ref()), "boom");
        let s: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(s.as_ref()), "bang");
        let s: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(s.as_ref()), "unknown panic");
    }

    #[test]
    fn test_tally_counts_lost_files() {
        let mut stats = ScanStats::default();
        tally(
            &mut stats,
            BatchOutcome {
                index: 3,
                size: 5,
                files: vec![FileOutcome::Parsed {
                    path: PathBuf::from("A.java"),
                    classes: vec![ClassOutcome::Scanned("A".into())],
                }],
                failure: Some("boom".into()),
            },
        );
        assert_eq!(stats.batch_failures, 1);
        assert_eq!(stats.lost_files, 4);
        assert_eq!(stats.scanned_classes, 1);
    }
}
