//! Post-hoc narrowing of analysis results to a wanted set of action
//! identifiers.
//!
//! Matching is OR across the wanted set. Retained records keep only the
//! intersecting identifiers; indirect buckets that become empty are dropped.
//! Identifiers never observed anywhere produce warnings, not failures: "no
//! dependency found" is a valid answer.

use std::collections::BTreeSet;
use std::path::Path;

use crate::types::{DependencySet, EntryDependencies};

#[derive(Clone, Debug, Default)]
pub struct FilterOutcome {
    pub filtered: Vec<EntryDependencies>,
    pub warnings: Vec<String>,
}

/// Filter view records: a record survives when any direct or indirect action
/// intersects the wanted set.
pub fn filter_view_dependencies(
    records: &[EntryDependencies],
    wanted: &[String],
) -> FilterOutcome {
    filter_records(records, wanted, false)
}

/// Filter action records. Same intersection rule, plus: a record whose
/// entrypoint filename stem is itself a wanted identifier is retained even
/// without any intersection — the handler *is* the thing being asked about.
pub fn filter_action_dependencies(
    records: &[EntryDependencies],
    wanted: &[String],
) -> FilterOutcome {
    filter_records(records, wanted, true)
}

fn entry_stem(entrypoint: &str) -> Option<&str> {
    Path::new(entrypoint).file_stem().and_then(|s| s.to_str())
}

fn filter_records(
    records: &[EntryDependencies],
    wanted: &[String],
    match_entry_stem: bool,
) -> FilterOutcome {
    let wanted_set: BTreeSet<&str> = wanted.iter().map(String::as_str).collect();
    let mut warnings: Vec<String> = Vec::new();

    // Identifiers observed anywhere in the unfiltered results; in the action
    // variant a wanted stem counts as observed too.
    let mut observed: BTreeSet<&str> = BTreeSet::new();
    for record in records {
        for action in &record.dependencies.direct {
            observed.insert(action);
        }
        for actions in record.dependencies.indirect.values() {
            for action in actions {
                observed.insert(action);
            }
        }
        if match_entry_stem
            && let Some(stem) = entry_stem(&record.entrypoint)
            && wanted_set.contains(stem)
        {
            observed.insert(stem);
        }
    }

    for identifier in &wanted_set {
        if !observed.contains(identifier) {
            warnings.push(format!(
                "action identifier '{}' not found in dependency graph",
                identifier
            ));
        }
    }

    let mut filtered: Vec<EntryDependencies> = Vec::new();
    for record in records {
        let is_target = match_entry_stem
            && entry_stem(&record.entrypoint).is_some_and(|stem| wanted_set.contains(stem));

        let direct: Vec<String> = record
            .dependencies
            .direct
            .iter()
            .filter(|a| wanted_set.contains(a.as_str()))
            .cloned()
            .collect();

        let mut indirect = std::collections::BTreeMap::new();
        for (file, actions) in &record.dependencies.indirect {
            let matching: Vec<String> = actions
                .iter()
                .filter(|a| wanted_set.contains(a.as_str()))
                .cloned()
                .collect();
            if !matching.is_empty() {
                indirect.insert(file.clone(), matching);
            }
        }

        if is_target || !direct.is_empty() || !indirect.is_empty() {
            filtered.push(EntryDependencies {
                entrypoint: record.entrypoint.clone(),
                dependencies: DependencySet { direct, indirect },
            });
        }
    }

    if filtered.is_empty() && !wanted_set.is_empty() {
        warnings.push("no dependencies found for the requested action identifier(s)".to_string());
    }

    FilterOutcome { filtered, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(entrypoint: &str, direct: &[&str], indirect: &[(&str, &[&str])]) -> EntryDependencies {
        let indirect: BTreeMap<String, Vec<String>> = indirect
            .iter()
            .map(|(file, actions)| {
                (
                    file.to_string(),
                    actions.iter().map(|a| a.to_string()).collect(),
                )
            })
            .collect();
        EntryDependencies {
            entrypoint: entrypoint.to_string(),
            dependencies: DependencySet {
                direct: direct.iter().map(|a| a.to_string()).collect(),
                indirect,
            },
        }
    }

    fn wanted(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_or_semantics_union_not_intersection() {
        let records = vec![
            record("pages/a.tsx", &["get-users"], &[]),
            record("pages/b.tsx", &["get-products"], &[]),
            record("pages/c.tsx", &["unrelated"], &[]),
        ];
        let outcome = filter_view_dependencies(&records, &wanted(&["get-users", "get-products"]));
        let entries: Vec<_> = outcome.filtered.iter().map(|r| r.entrypoint.as_str()).collect();
        assert_eq!(entries, vec!["pages/a.tsx", "pages/b.tsx"]);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_lists_narrowed_and_empty_buckets_dropped() {
        let records = vec![record(
            "pages/a.tsx",
            &["get-users", "update-user"],
            &[
                ("components/Table.tsx", &["get-users", "get-roles"]),
                ("components/Form.tsx", &["get-roles"]),
            ],
        )];
        let outcome = filter_view_dependencies(&records, &wanted(&["get-users"]));
        let deps = &outcome.filtered[0].dependencies;
        assert_eq!(deps.direct, vec!["get-users"]);
        assert_eq!(deps.indirect.len(), 1);
        assert_eq!(
            deps.indirect.get("components/Table.tsx").map(Vec::as_slice),
            Some(&["get-users".to_string()][..])
        );
    }

    #[test]
    fn test_one_warning_per_unmatched_identifier() {
        let records = vec![record("pages/a.tsx", &["get-users"], &[])];
        let outcome =
            filter_view_dependencies(&records, &wanted(&["get-users", "ghost-a", "ghost-b"]));
        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome.warnings[0].contains("'ghost-a'"));
        assert!(outcome.warnings[1].contains("'ghost-b'"));
    }

    #[test]
    fn test_empty_result_adds_summary_warning() {
        let records = vec![record("pages/a.tsx", &["get-users"], &[])];
        let outcome = filter_view_dependencies(&records, &wanted(&["ghost"]));
        assert!(outcome.filtered.is_empty());
        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome.warnings[1].contains("no dependencies found"));
    }

    #[test]
    fn test_action_variant_retains_target_handler_by_stem() {
        let records = vec![
            record("post-to-slack.js", &["post-slack-message"], &[]),
            record("onboard-user.js", &["post-to-slack"], &[]),
        ];
        let outcome = filter_action_dependencies(&records, &wanted(&["post-to-slack"]));
        let entries: Vec<_> = outcome.filtered.iter().map(|r| r.entrypoint.as_str()).collect();
        // The handler itself is kept (stem match) alongside its dependents.
        assert_eq!(entries, vec!["post-to-slack.js", "onboard-user.js"]);
        assert!(outcome.warnings.is_empty());

        // The stem-matched record's lists are still narrowed.
        assert!(outcome.filtered[0].dependencies.direct.is_empty());
        assert_eq!(outcome.filtered[1].dependencies.direct, vec!["post-to-slack"]);
    }

    #[test]
    fn test_view_variant_ignores_stem_matching() {
        let records = vec![record("pages/post-to-slack.tsx", &["other"], &[])];
        let outcome = filter_view_dependencies(&records, &wanted(&["post-to-slack"]));
        assert!(outcome.filtered.is_empty());
        assert!(
            outcome
                .warnings
                .iter()
                .any(|w| w.contains("'post-to-slack' not found"))
        );
    }

    #[test]
    fn test_empty_wanted_set_yields_empty_without_warnings() {
        let records = vec![record("pages/a.tsx", &["get-users"], &[])];
        let outcome = filter_view_dependencies(&records, &[]);
        assert!(outcome.filtered.is_empty());
        assert!(outcome.warnings.is_empty());
    }
}
