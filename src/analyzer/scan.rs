//! Source file enumeration.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::types::TargetType;

/// Directories that never contain analyzable project sources.
const SKIPPED_DIRS: [&str; 2] = ["node_modules", "dist"];

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

/// Collect the source files to analyze under `dir`, sorted for deterministic
/// output. Action mode looks at handler sources only; view mode adds JSX
/// flavors. TypeScript declaration files carry no runtime code and are
/// skipped.
pub fn find_source_files(dir: &Path, target_type: TargetType) -> Vec<PathBuf> {
    let extensions: &[&str] = match target_type {
        TargetType::Action => &["js", "ts"],
        TargetType::View => &["jsx", "tsx", "js", "ts"],
    };

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("[actiongraph][warn] walk error under {}: {}", dir.display(), err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let name = entry.file_name().to_str().unwrap_or("");
        if name.ends_with(".d.ts") {
            continue;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if extensions.contains(&ext) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "export {};\n").unwrap();
    }

    #[test]
    fn test_action_mode_extensions() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "handler.js");
        touch(dir.path(), "helper.ts");
        touch(dir.path(), "widget.tsx");

        let files = find_source_files(dir.path(), TargetType::Action);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["handler.js", "helper.ts"]);
    }

    #[test]
    fn test_view_mode_includes_jsx_flavors() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "pages/home.tsx");
        touch(dir.path(), "components/list.jsx");
        touch(dir.path(), "util.ts");

        let files = find_source_files(dir.path(), TargetType::View);
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_skips_node_modules_dist_and_declarations() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "node_modules/react/index.js");
        touch(dir.path(), "dist/bundle.js");
        touch(dir.path(), "types/api.d.ts");
        touch(dir.path(), "src/main.ts");

        let files = find_source_files(dir.path(), TargetType::View);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/main.ts"));
    }
}
