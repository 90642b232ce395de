//! Import specifier resolution.
//!
//! Only relative specifiers are resolved. Bare specifiers are external
//! packages, and `@`-prefixed specifiers are project aliases that would need
//! path-mapping configuration this tool does not own; both map to no edge.

use std::path::{Component, Path, PathBuf};

use crate::types::SOURCE_EXTENSIONS;

/// Resolve `path` against `base`, folding `.` and `..` lexically.
///
/// Deliberately not `canonicalize`: resolution must also produce stable keys
/// for files that do not exist (best-effort unresolved edges).
pub fn normalize_path(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    let mut out = PathBuf::new();
    for comp in joined.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

pub fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Resolve one import specifier relative to the importing file's directory.
///
/// Relative specifiers: join, then if the result already carries a source
/// extension use it as-is; otherwise probe appended extensions and then
/// `index.{ext}` inside the path as a directory, first hit wins. When nothing
/// exists the joined path is returned unchanged so the caller still gets a
/// stable (if dangling) edge key.
pub fn resolve_import(spec: &str, importer_dir: &Path) -> Option<PathBuf> {
    if spec.starts_with('.') {
        return Some(resolve_relative(spec, importer_dir));
    }
    // '@' specifiers are internal but need project path-mapping config to
    // resolve; everything else is an external package.
    None
}

fn resolve_relative(spec: &str, importer_dir: &Path) -> PathBuf {
    let joined = normalize_path(importer_dir, Path::new(spec));
    if has_source_extension(&joined) {
        return joined;
    }

    for ext in SOURCE_EXTENSIONS {
        let with_ext = PathBuf::from(format!("{}.{}", joined.display(), ext));
        if with_ext.is_file() {
            return with_ext;
        }
    }

    for ext in SOURCE_EXTENSIONS {
        let index = joined.join(format!("index.{}", ext));
        if index.is_file() {
            return index;
        }
    }

    joined
}
