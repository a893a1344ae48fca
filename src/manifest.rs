// src/manifest.rs
//! Build manifest parsing (`pom.xml`) and dependency version checks.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::config::FilterSet;
use crate::types::OutdatedDependency;

const MANIFEST_FILE: &str = "pom.xml";
const SNAPSHOT_MARKER: &str = "SNAPSHOT";

static DEPENDENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<dependency>.*?</dependency>").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static GROUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<groupId>(.*?)</groupId>").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static ARTIFACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<artifactId>(.*?)</artifactId>").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<version>(.*?)</version>").unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Coordinate (`groupId:artifactId`) to version.
pub type Dependencies = BTreeMap<String, String>;

fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Extracts every `<dependency>` that declares group, artifact and version.
#[must_use]
pub fn parse_pom(content: &str) -> Dependencies {
    DEPENDENCY_RE
        .find_iter(content)
        .filter_map(|m| {
            let block = m.as_str();
            let group = capture(&GROUP_RE, block)?;
            let artifact = capture(&ARTIFACT_RE, block)?;
            let version = capture(&VERSION_RE, block)?;
            Some((format!("{group}:{artifact}"), version.to_string()))
        })
        .collect()
}

/// Merges the dependencies of every `pom.xml` below `root`.
#[must_use]
pub fn collect(root: &Path) -> Dependencies {
    let mut deps = Dependencies::new();
    let manifests = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && e.file_name() == MANIFEST_FILE);

    for entry in manifests {
        match fs::read_to_string(entry.path()) {
            Ok(content) => deps.extend(parse_pom(&content)),
            Err(e) => tracing::warn!("Could not read {}: {e}", entry.path().display()),
        }
    }
    tracing::info!("Dependency files parsed.");
    deps
}

/// Applies include/exclude substring filters to the coordinates.
#[must_use]
pub fn filter(deps: Dependencies, filters: &FilterSet) -> Dependencies {
    deps.into_iter().filter(|(coord, _)| filters.admits(coord)).collect()
}

/// Flags snapshot versions.
#[must_use]
pub fn check_versions(deps: &Dependencies) -> Vec<OutdatedDependency> {
    deps.iter()
        .filter(|(_, version)| version.contains(SNAPSHOT_MARKER))
        .map(|(dependency, version)| OutdatedDependency {
            dependency: dependency.clone(),
            version: version.clone(),
            issue: "Snapshot version used".to_string(),
        })
        .collect()
}
