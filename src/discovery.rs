// src/discovery.rs
use crate::config::FilterSet;
use crate::lang::Lang;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Tooling directories, skipped at any depth.
const TOOLING_DIRS: &[&str] = &[".git", "node_modules", ".idea"];
/// Build outputs, skipped only directly below the root. Deeper down these
/// names are ordinary packages (`com/acme/build`).
const OUTPUT_DIRS: &[&str] = &["target", "build", "out"];

fn should_prune(name: &str, depth: usize) -> bool {
    TOOLING_DIRS.contains(&name) || (depth == 1 && OUTPUT_DIRS.contains(&name))
}

/// Collects every Java source below `root`, sorted by path.
///
/// Unreadable entries are skipped and counted in a warning.
#[must_use]
pub fn discover(root: &Path) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !(e.file_type().is_dir() && should_prune(&e.file_name().to_string_lossy(), e.depth()))
        });

    let (mut paths, error_count) = accumulate_walker(walker);
    if error_count > 0 {
        tracing::warn!("Encountered {error_count} errors during file walk");
    }
    paths.sort();
    paths
}

fn accumulate_walker<I>(walker: I) -> (Vec<PathBuf>, usize)
where
    I: Iterator<Item = walkdir::Result<walkdir::DirEntry>>,
{
    let mut paths = Vec::new();
    let mut errors = 0;
    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() && Lang::from_path(entry.path()).is_some() {
                    paths.push(entry.into_path());
                }
            }
            Err(_) => errors += 1,
        }
    }
    (paths, errors)
}

/// Normalizes a path to use forward slashes (cross-platform pattern matching).
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Keeps files matching any include substring (when there are includes) and
/// drops files matching any exclude substring.
#[must_use]
pub fn apply_path_filters(mut paths: Vec<PathBuf>, filters: &FilterSet) -> Vec<PathBuf> {
    if filters.is_empty() {
        return paths;
    }
    paths.retain(|p| filters.admits(&normalize_path(p)));
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discovers_sorted_java_only() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let root = dir.path();
        fs::create_dir_all(root.join("src/b"))?;
        fs::create_dir_all(root.join("src/a"))?;
        fs::create_dir_all(root.join("target/classes"))?;
        fs::write(root.join("src/b/B.java"), "class B {}")?;
        fs::write(root.join("src/a/A.java"), "class A {}")?;
        fs::write(root.join("src/a/notes.txt"), "x")?;
        fs::write(root.join("target/classes/Gen.java"), "class Gen {}")?;

        let found = discover(root);
        assert_eq!(found, vec![root.join("src/a/A.java"), root.join("src/b/B.java")]);
        Ok(())
    }

    #[test]
    fn test_output_names_below_root_are_packages() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let root = dir.path();
        let pkg = root.join("src/main/java/com/acme");
        fs::create_dir_all(pkg.join("build"))?;
        fs::create_dir_all(pkg.join("out"))?;
        fs::create_dir_all(root.join("build/generated"))?;
        fs::create_dir_all(pkg.join(".idea"))?;
        fs::write(pkg.join("build/BuildService.java"), "class BuildService {}")?;
        fs::write(pkg.join("out/OutboundGateway.java"), "class OutboundGateway {}")?;
        fs::write(root.join("build/generated/Stub.java"), "class Stub {}")?;
        fs::write(pkg.join(".idea/Scratch.java"), "class Scratch {}")?;

        let found = discover(root);
        assert_eq!(
            found,
            vec![
                pkg.join("build/BuildService.java"),
                pkg.join("out/OutboundGateway.java"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_path_filters() {
        let paths = vec![
            PathBuf::from("src/main/java/Order.java"),
            PathBuf::from("src/test/java/OrderTest.java"),
            PathBuf::from("legacy/Old.java"),
        ];
        let filters = FilterSet {
            include: vec!["src/".into()],
            exclude: vec!["/test/".into()],
        };
        assert_eq!(
            apply_path_filters(paths, &filters),
            vec![PathBuf::from("src/main/java/Order.java")]
        );
    }
}
