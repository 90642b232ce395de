use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Extension probe order for import resolution. `./foo` is tried as
/// `./foo.tsx`, `./foo.ts`, ... and finally `./foo/index.{ext}` in the
/// same order.
pub const SOURCE_EXTENSIONS: [&str; 4] = ["tsx", "ts", "jsx", "js"];

/// Default entry-point glob for view mode, relative to the target directory.
pub const DEFAULT_ENTRY_POINT_PATTERN: &str = "pages/**/*.{tsx,jsx,ts,js}";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TargetType {
    Action,
    View,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Action => "action",
            TargetType::View => "view",
        }
    }
}

impl std::str::FromStr for TargetType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "action" => Ok(TargetType::Action),
            "view" => Ok(TargetType::View),
            other => Err(format!(
                "invalid target type '{}': expected 'action' or 'view'",
                other
            )),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutputMode {
    Human,
    Json,
}

/// One analyzed file in the dependency graph, keyed externally by its
/// normalized absolute path.
#[derive(Clone, Debug, Default)]
pub struct FileNode {
    /// Action identifiers invoked in this file's own body, in call order,
    /// deduplicated.
    pub direct_actions: Vec<String>,
    /// Files this file depends on. Populated from import edges in view mode;
    /// materialized from the action stem index in action mode.
    pub edges: Vec<PathBuf>,
}

impl FileNode {
    pub fn new(direct_actions: Vec<String>, edges: Vec<PathBuf>) -> Self {
        Self {
            direct_actions,
            edges,
        }
    }
}

/// Result of one reachability query over the graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reachability {
    /// The root's own direct actions.
    pub direct: Vec<String>,
    /// Actions contributed by every other reachable file with a non-empty
    /// direct set, keyed by that file's normalized path.
    pub indirect: BTreeMap<PathBuf, Vec<String>>,
}

/// Boundary record for one entry point; all paths are relative to the
/// caller-supplied target directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryDependencies {
    pub entrypoint: String,
    pub dependencies: DependencySet,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencySet {
    pub direct: Vec<String>,
    pub indirect: BTreeMap<String, Vec<String>>,
}

impl DependencySet {
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.indirect.is_empty()
    }
}

/// Aggregate counters for a built graph, reported in verbose mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub total_files: usize,
    pub total_edges: usize,
    pub files_with_actions: usize,
    pub total_action_refs: usize,
}
