//! Result rendering: human text and pretty JSON.

use std::collections::BTreeMap;

use colored::Colorize;

use crate::types::{EntryDependencies, OutputMode};

/// Render entry-point records in the requested output mode.
pub fn render_records(records: &[EntryDependencies], output: OutputMode) -> String {
    match output {
        OutputMode::Json => serde_json::to_string_pretty(records)
            .expect("Failed to serialize dependency records to JSON"),
        OutputMode::Human => render_text(records),
    }
}

fn render_text(records: &[EntryDependencies]) -> String {
    if records.is_empty() {
        return "No dependencies found.\n".to_string();
    }

    let mut out = String::new();
    for record in records {
        out.push_str(&format!(
            "## Entry point: {}\n",
            record.entrypoint.bold()
        ));

        out.push_str("\nDirect actions:\n");
        if record.dependencies.direct.is_empty() {
            out.push_str("  - none\n");
        } else {
            for action in &record.dependencies.direct {
                out.push_str(&format!("  - {}\n", action));
            }
        }

        out.push_str("\nIndirect actions:\n");
        // Invert file -> actions into action -> files so the reader sees at a
        // glance which action an entry point ultimately depends on.
        let mut by_action: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (file, actions) in &record.dependencies.indirect {
            for action in actions {
                by_action.entry(action).or_default().push(file);
            }
        }
        if by_action.is_empty() {
            out.push_str("  - none\n");
        } else {
            for (action, files) in by_action {
                out.push_str(&format!("  - {} (via {})\n", action, files.join(", ")));
            }
        }
        out.push('\n');
    }
    out
}

/// Render the flat action-mode shape: each file mapped to its own extracted
/// action identifiers.
pub fn render_flat(files: &BTreeMap<String, Vec<String>>, output: OutputMode) -> String {
    match output {
        OutputMode::Json => serde_json::to_string_pretty(files)
            .expect("Failed to serialize flat dependency map to JSON"),
        OutputMode::Human => {
            if files.is_empty() {
                return "No dependencies found.\n".to_string();
            }
            let mut out = String::new();
            for (file, actions) in files {
                out.push_str(&format!("{}: {}\n", file.bold(), actions.join(", ")));
            }
            out
        }
    }
}

/// Print filter warnings to stderr, prefixed and colorized when attached
/// to a tty.
pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("{} {}", "[actiongraph][warn]".yellow(), warning);
    }
}
