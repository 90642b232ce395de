//! Dependency graphs for the two analysis modes.
//!
//! `ViewGraph` follows import edges: adding a file recursively pulls in every
//! resolvable source file it imports, so the transitive closure of an entry
//! point is materialized even when the caller only ever adds the discovered
//! files. `ActionGraph` has no import edges; files are linked by matching
//! each called action identifier against the bare filename stems of the
//! ingested handler files.
//!
//! Both graphs are plain node maps; reachability is a pure function over that
//! map so queries cannot mutate analysis state.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{FileNode, GraphStats, Reachability, TargetType};

use super::ast::analyze_source;
use super::resolvers::{has_source_extension, normalize_path, resolve_import};

/// Depth-first reachability over the node map.
///
/// Cycle and diamond safe: each node is expanded at most once. Every edge
/// target other than the root contributes its direct actions to `indirect`,
/// even when an earlier branch already visited it (map insertion dedups).
pub fn reachable_from(nodes: &HashMap<PathBuf, FileNode>, root: &Path) -> Reachability {
    let mut visited: HashSet<&Path> = HashSet::new();
    let mut indirect: BTreeMap<PathBuf, Vec<String>> = BTreeMap::new();
    let mut stack: Vec<&Path> = vec![root];
    visited.insert(root);

    while let Some(current) = stack.pop() {
        let Some(node) = nodes.get(current) else {
            continue;
        };
        for edge in &node.edges {
            if edge.as_path() != root
                && let Some(target) = nodes.get(edge)
                && !target.direct_actions.is_empty()
            {
                indirect
                    .entry(edge.clone())
                    .or_insert_with(|| target.direct_actions.clone());
            }
            if visited.insert(edge) {
                stack.push(edge);
            }
        }
    }

    let direct = nodes
        .get(root)
        .map(|n| n.direct_actions.clone())
        .unwrap_or_default();
    Reachability { direct, indirect }
}

fn graph_stats(nodes: &HashMap<PathBuf, FileNode>) -> GraphStats {
    let mut stats = GraphStats {
        total_files: nodes.len(),
        ..GraphStats::default()
    };
    for node in nodes.values() {
        stats.total_edges += node.edges.len();
        if !node.direct_actions.is_empty() {
            stats.files_with_actions += 1;
            stats.total_action_refs += node.direct_actions.len();
        }
    }
    stats
}

/// Import-edge graph for view mode.
pub struct ViewGraph {
    base_dir: PathBuf,
    nodes: HashMap<PathBuf, FileNode>,
}

impl ViewGraph {
    pub fn new(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            nodes: HashMap::new(),
        }
    }

    /// Analyze a file and insert it, then recurse into every resolved import
    /// that looks like a source file. Idempotent per normalized path; the
    /// idempotency check is also what breaks import cycles.
    pub fn add_file(&mut self, path: &Path) {
        let normalized = normalize_path(&self.base_dir, path);
        if self.nodes.contains_key(&normalized) {
            return;
        }

        let content = match fs::read_to_string(&normalized) {
            Ok(content) => content,
            Err(err) => {
                eprintln!(
                    "[actiongraph][warn] failed to read {}: {}",
                    normalized.display(),
                    err
                );
                self.nodes.insert(normalized, FileNode::default());
                return;
            }
        };

        let analysis = analyze_source(&content, &normalized, TargetType::View);
        let dir = normalized
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.base_dir.clone());

        let mut edges: Vec<PathBuf> = Vec::new();
        for spec in &analysis.imports {
            if let Some(resolved) = resolve_import(spec, &dir) {
                let resolved = normalize_path(&self.base_dir, &resolved);
                if !edges.contains(&resolved) {
                    edges.push(resolved);
                }
            }
        }

        self.nodes
            .insert(normalized, FileNode::new(analysis.actions, edges.clone()));

        for edge in edges {
            if has_source_extension(&edge) {
                self.add_file(&edge);
            }
        }
    }

    pub fn reachable(&self, entry: &Path) -> Reachability {
        let root = normalize_path(&self.base_dir, entry);
        reachable_from(&self.nodes, &root)
    }

    pub fn node(&self, path: &Path) -> Option<&FileNode> {
        self.nodes.get(&normalize_path(&self.base_dir, path))
    }

    pub fn stats(&self) -> GraphStats {
        graph_stats(&self.nodes)
    }
}

/// Stem-index graph for action mode.
pub struct ActionGraph {
    base_dir: PathBuf,
    nodes: HashMap<PathBuf, FileNode>,
    action_files: HashMap<String, PathBuf>,
}

impl ActionGraph {
    pub fn new(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            nodes: HashMap::new(),
            action_files: HashMap::new(),
        }
    }

    /// Analyze a handler file and register it under its filename stem.
    /// Non-recursive; edges are materialized by [`build_dependency_graph`]
    /// once every file has been added.
    ///
    /// [`build_dependency_graph`]: ActionGraph::build_dependency_graph
    pub fn add_file(&mut self, path: &Path) {
        let normalized = normalize_path(&self.base_dir, path);
        if self.nodes.contains_key(&normalized) {
            return;
        }

        let content = match fs::read_to_string(&normalized) {
            Ok(content) => content,
            Err(err) => {
                eprintln!(
                    "[actiongraph][warn] failed to read {}: {}",
                    normalized.display(),
                    err
                );
                self.nodes.insert(normalized, FileNode::default());
                return;
            }
        };

        let analysis = analyze_source(&content, &normalized, TargetType::Action);

        if let Some(stem) = normalized.file_stem().and_then(|s| s.to_str()) {
            if let Some(existing) = self.action_files.get(stem) {
                eprintln!(
                    "[actiongraph][warn] duplicate action stem '{}': keeping {}, ignoring {}",
                    stem,
                    existing.display(),
                    normalized.display()
                );
            } else {
                self.action_files
                    .insert(stem.to_string(), normalized.clone());
            }
        }

        self.nodes
            .insert(normalized, FileNode::new(analysis.actions, Vec::new()));
    }

    /// Resolve every file's called identifiers against the stem index into
    /// edges. Identifiers with no matching handler file contribute no edge.
    pub fn build_dependency_graph(&mut self) {
        let updates: Vec<(PathBuf, Vec<PathBuf>)> = self
            .nodes
            .iter()
            .map(|(path, node)| {
                let mut edges: Vec<PathBuf> = Vec::new();
                for action in &node.direct_actions {
                    if let Some(target) = self.action_files.get(action)
                        && !edges.contains(target)
                    {
                        edges.push(target.clone());
                    }
                }
                (path.clone(), edges)
            })
            .collect();

        for (path, edges) in updates {
            if let Some(node) = self.nodes.get_mut(&path) {
                node.edges = edges;
            }
        }
    }

    pub fn reachable(&self, entry: &Path) -> Reachability {
        let root = normalize_path(&self.base_dir, entry);
        reachable_from(&self.nodes, &root)
    }

    /// The handler file registered for an action identifier, if any.
    pub fn action_file(&self, identifier: &str) -> Option<&Path> {
        self.action_files.get(identifier).map(PathBuf::as_path)
    }

    pub fn node(&self, path: &Path) -> Option<&FileNode> {
        self.nodes.get(&normalize_path(&self.base_dir, path))
    }

    pub fn stats(&self) -> GraphStats {
        graph_stats(&self.nodes)
    }
}
