//! # actiongraph
//!
//! **Action Dependency Analyzer** - Static analysis tool that maps which
//! backend action identifiers each source file invokes, directly or through
//! its import chain.
//!
//! actiongraph parses TypeScript/JavaScript sources with the OXC toolchain,
//! extracts `executeAction(...)` call sites (plus the `useExecuteAction` /
//! `useExecuteActionLazy` hooks in view mode), follows relative imports, and
//! reports per-entry-point action dependencies.
//!
//! ## Features
//!
//! - **Call Extraction** - String-literal and single-hop alias arguments
//! - **Import Resolution** - Relative specifiers with extension probing and
//!   `index.*` fallback
//! - **Dependency Graphs** - Recursive view graphs, stem-indexed action graphs
//! - **Reachability** - Cycle- and diamond-safe transitive closure per root
//! - **Entry Points** - Glob-based discovery with per-directory index tie-break
//! - **Filtering** - Narrow results to a wanted action set with OR semantics
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,no_run
//! use actiongraph::analyzer::{self, AnalysisOptions};
//! use actiongraph::types::TargetType;
//!
//! let opts = AnalysisOptions::new(TargetType::View, "./src");
//! let records = analyzer::analyze(&opts).unwrap();
//! for record in &records {
//!     println!("{}: {:?}", record.entrypoint, record.dependencies.direct);
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! actiongraph action ./actions            # Handler files and their actions
//! actiongraph view ./src --json           # Entry-point dependencies as JSON
//! actiongraph view ./src --actions get-user   # Only records touching get-user
//! ```

/// Analysis pipeline: AST extraction, import resolution, dependency graphs,
/// entry-point discovery, filtering, and output rendering.
pub mod analyzer;

/// Command-line argument parsing.
///
/// Contains [`ParsedArgs`](args::ParsedArgs) struct and [`parse_args`](args::parse_args) function.
pub mod args;

/// Common types used throughout the crate.
///
/// # Key Types
///
/// - [`TargetType`] - Analysis mode (Action, View)
/// - [`EntryDependencies`] - Per-entry-point result record
/// - [`FileNode`] - A graph node's direct actions and import edges
pub mod types;

pub use analyzer::{AnalysisOptions, analyze, analyze_flat};
pub use types::{DependencySet, EntryDependencies, FileNode, OutputMode, TargetType};
