//! Action dependency analysis pipeline.
//!
//! # Submodules
//!
//! - [`ast`] - call extraction and import collection over the OXC AST
//! - [`resolvers`] - relative import resolution with extension probing
//! - [`graph`] - view/action dependency graphs and reachability
//! - [`entrypoints`] - glob-based entry-point discovery with index tie-break
//! - [`filter`] - OR-semantics narrowing to a wanted action set
//! - [`scan`] - source file enumeration
//! - [`output`] - text/JSON rendering

pub mod ast;
pub mod entrypoints;
pub mod filter;
pub mod graph;
pub mod output;
pub mod resolvers;
pub mod scan;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::types::{
    DEFAULT_ENTRY_POINT_PATTERN, DependencySet, EntryDependencies, Reachability, TargetType,
};

use graph::{ActionGraph, ViewGraph};

/// Configuration for one analysis run.
#[derive(Clone, Debug)]
pub struct AnalysisOptions {
    pub target_type: TargetType,
    pub target_dir: PathBuf,
    /// View-mode entry-point globs, relative to the target directory.
    pub entry_point_patterns: Vec<String>,
    pub verbose: bool,
}

impl AnalysisOptions {
    pub fn new(target_type: TargetType, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_type,
            target_dir: target_dir.into(),
            entry_point_patterns: vec![DEFAULT_ENTRY_POINT_PATTERN.to_string()],
            verbose: false,
        }
    }
}

/// Run the full analysis: enumerate sources, build the dependency graph for
/// the requested mode, and compute per-root reachability records.
///
/// Action mode reports every handler file with at least one direct or
/// indirect action; view mode reports every discovered entry point, empty or
/// not. All paths in the returned records are relative to the target
/// directory.
pub fn analyze(opts: &AnalysisOptions) -> Result<Vec<EntryDependencies>> {
    let base_dir = validate_target_dir(&opts.target_dir)?;
    let files = scan::find_source_files(&base_dir, opts.target_type);
    if opts.verbose {
        eprintln!(
            "[actiongraph] {} {} source files under {}",
            files.len(),
            opts.target_type.as_str(),
            base_dir.display()
        );
    }

    match opts.target_type {
        TargetType::Action => analyze_actions(&base_dir, &files, opts.verbose),
        TargetType::View => analyze_views(
            &base_dir,
            &files,
            &opts.entry_point_patterns,
            opts.verbose,
        ),
    }
}

/// The flat action-mode shape: each file mapped to its own extracted action
/// identifiers, no graph resolution. Files without any call site are elided.
pub fn analyze_flat(opts: &AnalysisOptions) -> Result<BTreeMap<String, Vec<String>>> {
    let base_dir = validate_target_dir(&opts.target_dir)?;
    let files = scan::find_source_files(&base_dir, opts.target_type);

    let mut result: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for file in &files {
        let content = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(err) => {
                eprintln!("[actiongraph][warn] failed to read {}: {}", file.display(), err);
                continue;
            }
        };
        let analysis = ast::analyze_source(&content, file, opts.target_type);
        if !analysis.actions.is_empty() {
            result.insert(relative_to(&base_dir, file), analysis.actions);
        }
    }
    Ok(result)
}

fn validate_target_dir(target_dir: &Path) -> Result<PathBuf> {
    let base_dir = target_dir.canonicalize().with_context(|| {
        format!("target directory {} is not accessible", target_dir.display())
    })?;
    if !base_dir.is_dir() {
        bail!("target {} is not a directory", base_dir.display());
    }
    Ok(base_dir)
}

fn analyze_actions(
    base_dir: &Path,
    files: &[PathBuf],
    verbose: bool,
) -> Result<Vec<EntryDependencies>> {
    let mut graph = ActionGraph::new(base_dir);
    for file in files {
        graph.add_file(file);
    }
    graph.build_dependency_graph();
    if verbose {
        log_stats(graph.stats());
    }

    let mut records: Vec<EntryDependencies> = Vec::new();
    for file in files {
        let reached = graph.reachable(file);
        if reached.direct.is_empty() && reached.indirect.is_empty() {
            continue;
        }
        records.push(to_record(base_dir, file, reached));
    }
    Ok(records)
}

fn analyze_views(
    base_dir: &Path,
    files: &[PathBuf],
    patterns: &[String],
    verbose: bool,
) -> Result<Vec<EntryDependencies>> {
    let mut graph = ViewGraph::new(base_dir);
    for file in files {
        graph.add_file(file);
    }
    if verbose {
        log_stats(graph.stats());
    }

    let entry_points = entrypoints::find_entry_points(base_dir, patterns);
    Ok(entry_points
        .iter()
        .map(|entry| to_record(base_dir, entry, graph.reachable(entry)))
        .collect())
}

fn log_stats(stats: crate::types::GraphStats) {
    eprintln!(
        "[actiongraph] graph: {} files, {} edges, {} files with actions, {} action refs",
        stats.total_files, stats.total_edges, stats.files_with_actions, stats.total_action_refs
    );
}

fn to_record(base_dir: &Path, path: &Path, reached: Reachability) -> EntryDependencies {
    EntryDependencies {
        entrypoint: relative_to(base_dir, path),
        dependencies: DependencySet {
            direct: reached.direct,
            indirect: reached
                .indirect
                .into_iter()
                .map(|(file, actions)| (relative_to(base_dir, &file), actions))
                .collect(),
        },
    }
}

fn relative_to(base_dir: &Path, path: &Path) -> String {
    path.strip_prefix(base_dir)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
