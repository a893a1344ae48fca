//! Worker side of the scheduler: one batch, file by file, class by class.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, error, warn};

use crate::ast::{annotation, AstProvider, ClassDecl};
use crate::cache::{MetadataCache, SummaryStore};
use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use crate::types::ClassRecord;

/// State every worker of one scan shares.
pub struct ScanContext {
    pub config: ScanConfig,
    pub provider: Arc<dyn AstProvider>,
    pub cache: Arc<MetadataCache>,
    pub summary: SummaryStore,
    pub scan_id: u64,
}

/// What happened to one class declaration.
#[derive(Debug)]
pub enum ClassOutcome {
    Scanned(String),
    /// Cached record reused; no recomputation.
    Unchanged(String),
    /// Rejected by the annotation allow-list.
    Filtered(String),
    /// Built, but a record from a lower path already holds the name.
    Duplicate(String),
    Failed(ScanError),
}

/// What happened to one file.
#[derive(Debug)]
pub enum FileOutcome {
    Parsed {
        path: PathBuf,
        classes: Vec<ClassOutcome>,
    },
    ParseFailed(ScanError),
}

/// Scans `batch` sequentially, pushing one outcome per finished file.
///
/// Outcomes go into `done` as they complete, so a caller that catches a
/// panic still sees everything finished before it.
pub fn scan_batch(ctx: &ScanContext, batch: &[PathBuf], done: &mut Vec<FileOutcome>) {
    for path in batch {
        done.push(scan_file(ctx, path));
    }
}

#[must_use]
pub fn scan_file(ctx: &ScanContext, path: &Path) -> FileOutcome {
    match parse(ctx, path) {
        Ok((classes, modified)) => FileOutcome::Parsed {
            path: path.to_path_buf(),
            classes: classes
                .iter()
                .map(|class| scan_class(ctx, class, path, modified))
                .collect(),
        },
        Err(e) => {
            error!("{e}");
            FileOutcome::ParseFailed(e)
        }
    }
}

fn parse(ctx: &ScanContext, path: &Path) -> Result<(Vec<ClassDecl>, SystemTime)> {
    let source = std::fs::read_to_string(path).map_err(|e| ScanError::io(e, path))?;
    let modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| ScanError::io(e, path))?;
    let unit = ctx.provider.parse(path, &source)?;
    Ok((unit.classes, modified))
}

/// Cache check, annotation filter, then the full extraction pipeline.
#[must_use]
pub fn scan_class(
    ctx: &ScanContext,
    class: &ClassDecl,
    path: &Path,
    modified: SystemTime,
) -> ClassOutcome {
    scan_class_with(ctx, class, path, modified, super::build_record)
}

/// [`scan_class`] with the record builder passed in. A panicking build
/// fails only this class.
fn scan_class_with<F>(
    ctx: &ScanContext,
    class: &ClassDecl,
    path: &Path,
    modified: SystemTime,
    build: F,
) -> ClassOutcome
where
    F: Fn(&ClassDecl, &Path, SystemTime, &ScanConfig) -> ClassRecord,
{
    if class.name.is_empty() {
        return failed("<anonymous>", path, "class declaration has no name".into());
    }

    if let Some(cached) = ctx.cache.unchanged(&class.name, path, modified, ctx.scan_id) {
        debug!("Skipping unchanged class: {}", class.name);
        if !ctx.summary.insert_reused(cached) {
            return ClassOutcome::Duplicate(class.name.clone());
        }
        return ClassOutcome::Unchanged(class.name.clone());
    }

    if !ctx
        .config
        .admits_annotations(&annotation::names(&class.annotations))
    {
        debug!("Skipping class {} due to annotation filters", class.name);
        return ClassOutcome::Filtered(class.name.clone());
    }

    let built = panic::catch_unwind(AssertUnwindSafe(|| {
        build(class, path, modified, &ctx.config)
    }));
    let record = match built {
        Ok(record) => record,
        Err(payload) => {
            let reason = super::engine::panic_message(payload.as_ref());
            return failed(&class.name, path, reason);
        }
    };

    ctx.cache.store(&record, ctx.scan_id);
    if ctx.summary.insert(record) {
        ClassOutcome::Scanned(class.name.clone())
    } else {
        warn!(
            "Duplicate class name {} in {}; keeping the record from a lower path",
            class.name,
            path.display()
        );
        ClassOutcome::Duplicate(class.name.clone())
    }
}

fn failed(class_name: &str, path: &Path, reason: String) -> ClassOutcome {
    let e = ScanError::ClassScan {
        class_name: class_name.to_string(),
        path: path.to_path_buf(),
        reason,
    };
    error!("{e}");
    ClassOutcome::Failed(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AnnotationRef, CompilationUnit};

    struct Fixed(Vec<ClassDecl>);

    impl AstProvider for Fixed {
        fn parse(&self, _path: &Path, _source: &str) -> Result<CompilationUnit> {
            Ok(CompilationUnit {
                classes: self.0.clone(),
            })
        }
    }

    fn context(classes: Vec<ClassDecl>, config: ScanConfig) -> ScanContext {
        ScanContext {
            config,
            provider: Arc::new(Fixed(classes)),
            cache: Arc::new(MetadataCache::new()),
            summary: SummaryStore::new(),
            scan_id: 1,
        }
    }

    #[test]
    fn test_unnamed_class_fails_alone() {
        let ctx = context(Vec::new(), ScanConfig::default());
        let path = Path::new("A.java");
        let out = scan_class(&ctx, &ClassDecl::default(), path, SystemTime::UNIX_EPOCH);
        assert!(matches!(out, ClassOutcome::Failed(ScanError::ClassScan { .. })));
        let ok = scan_class(&ctx, &ClassDecl::new("Alpha"), path, SystemTime::UNIX_EPOCH);
        assert!(matches!(ok, ClassOutcome::Scanned(_)));
        assert_eq!(ctx.summary.len(), 1);
    }

    #[test]
    fn test_filtered_class_not_recorded() {
        let config = ScanConfig {
            annotation_filters: vec!["Service".into()],
            ..ScanConfig::default()
        };
        let ctx = context(Vec::new(), config);
        let mut class = ClassDecl::new("Widget");
        class.annotations.push(AnnotationRef::bare("Component"));
        let out = scan_class(&ctx, &class, Path::new("Widget.java"), SystemTime::UNIX_EPOCH);
        assert!(matches!(out, ClassOutcome::Filtered(_)));
        assert!(ctx.summary.is_empty());
        assert!(ctx.cache.is_empty());
    }

    #[test]
    fn test_panicking_build_fails_only_its_class() {
        let ctx = context(Vec::new(), ScanConfig::default());
        let path = Path::new("Pair.java");
        let build = |class: &ClassDecl, path: &Path, modified: SystemTime, config: &ScanConfig| {
            assert!(class.name != "Broken", "extractor fault");
            crate::analysis::build_record(class, path, modified, config)
        };

        let outcomes: Vec<ClassOutcome> = [ClassDecl::new("Broken"), ClassDecl::new("Sibling")]
            .iter()
            .map(|class| scan_class_with(&ctx, class, path, SystemTime::UNIX_EPOCH, build))
            .collect();

        match &outcomes[0] {
            ClassOutcome::Failed(ScanError::ClassScan { class_name, reason, .. }) => {
                assert_eq!(class_name, "Broken");
                assert_eq!(reason, "extractor fault");
            }
            other => panic!("expected class failure, got {other:?}"),
        }
        assert!(matches!(outcomes[1], ClassOutcome::Scanned(_)));
        assert_eq!(ctx.summary.len(), 1);
        assert!(ctx.cache.get("Broken").is_none());
    }

    #[test]
    fn test_duplicate_reported_separately() {
        let ctx = context(Vec::new(), ScanConfig::default());
        let class = ClassDecl::new("Order");
        let low = scan_class(&ctx, &class, Path::new("a/Order.java"), SystemTime::UNIX_EPOCH);
        let high = scan_class(&ctx, &class, Path::new("b/Order.java"), SystemTime::UNIX_EPOCH);
        assert!(matches!(low, ClassOutcome::Scanned(_)));
        assert!(matches!(high, ClassOutcome::Duplicate(_)));
        assert_eq!(ctx.summary.len(), 1);
    }

    #[test]
    fn test_missing_file_is_parse_failure() {
        let ctx = context(vec![ClassDecl::new("Ghost")], ScanConfig::default());
        let mut done = Vec::new();
        scan_batch(&ctx, &[PathBuf::from("/definitely/not/here/Ghost.java")], &mut done);
        assert_eq!(done.len(), 1);
        assert!(matches!(done[0], FileOutcome::ParseFailed(ScanError::Io { .. })));
    }
}
