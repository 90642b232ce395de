//! Entry-point discovery for view mode.
//!
//! Entry points are the analysis roots: files under the target directory
//! matching the caller's glob patterns, collapsed per directory to the
//! `index.*` file when one exists.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use globset::GlobBuilder;
use walkdir::WalkDir;

/// Expand `patterns` against `base_dir` and apply the per-directory index
/// tie-break. Matches are deduplicated across overlapping patterns; the
/// result is sorted.
pub fn find_entry_points(base_dir: &Path, patterns: &[String]) -> Vec<PathBuf> {
    let candidates = gather_files(base_dir);

    let mut matched: Vec<PathBuf> = Vec::new();
    for pattern in patterns {
        let glob = match GlobBuilder::new(pattern).literal_separator(true).build() {
            Ok(glob) => glob,
            Err(err) => {
                eprintln!("[actiongraph][warn] invalid glob '{}': {}", pattern, err);
                continue;
            }
        };
        let matcher = glob.compile_matcher();
        for path in &candidates {
            let Ok(rel) = path.strip_prefix(base_dir) else {
                continue;
            };
            if matcher.is_match(rel) && !matched.contains(path) {
                matched.push(path.clone());
            }
        }
    }

    // Group by containing directory; an index file shadows its siblings.
    let mut by_dir: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for path in matched {
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        by_dir.entry(dir).or_default().push(path);
    }

    let mut entry_points: Vec<PathBuf> = Vec::new();
    for (_, files) in by_dir {
        let index = files.iter().find(|f| {
            f.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("index."))
        });
        match index {
            Some(index) => entry_points.push(index.clone()),
            None => entry_points.extend(files),
        }
    }
    entry_points.sort();
    entry_points
}

fn gather_files(base_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(base_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_ENTRY_POINT_PATTERN;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "export {};\n").unwrap();
        path
    }

    fn default_patterns() -> Vec<String> {
        vec![DEFAULT_ENTRY_POINT_PATTERN.to_string()]
    }

    #[test]
    fn test_default_pattern_matches_pages_tree() {
        let dir = TempDir::new().unwrap();
        let top = touch(dir.path(), "pages/Settings.tsx");
        let nested = touch(dir.path(), "pages/admin/Users.tsx");
        touch(dir.path(), "components/Button.tsx");

        let entries = find_entry_points(dir.path(), &default_patterns());
        assert_eq!(entries, vec![nested, top]);
    }

    #[test]
    fn test_index_file_shadows_siblings() {
        let dir = TempDir::new().unwrap();
        let index = touch(dir.path(), "pages/table/index.tsx");
        touch(dir.path(), "pages/table/columns.tsx");
        touch(dir.path(), "pages/table/row.tsx");

        let entries = find_entry_points(dir.path(), &default_patterns());
        assert_eq!(entries, vec![index]);
    }

    #[test]
    fn test_directory_without_index_keeps_all_matches() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "pages/reports/daily.tsx");
        let b = touch(dir.path(), "pages/reports/weekly.tsx");

        let entries = find_entry_points(dir.path(), &default_patterns());
        assert_eq!(entries, vec![a, b]);
    }

    #[test]
    fn test_overlapping_patterns_deduplicated() {
        let dir = TempDir::new().unwrap();
        let page = touch(dir.path(), "pages/home.tsx");

        let patterns = vec!["pages/*.tsx".to_string(), "pages/**/*.tsx".to_string()];
        let entries = find_entry_points(dir.path(), &patterns);
        assert_eq!(entries, vec![page]);
    }

    #[test]
    fn test_invalid_pattern_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let page = touch(dir.path(), "pages/home.tsx");

        let patterns = vec!["pages/[".to_string(), "pages/*.tsx".to_string()];
        let entries = find_entry_points(dir.path(), &patterns);
        assert_eq!(entries, vec![page]);
    }

    #[test]
    fn test_no_matches_yields_empty() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "components/Button.tsx");
        let entries = find_entry_points(dir.path(), &default_patterns());
        assert!(entries.is_empty());
    }
}
