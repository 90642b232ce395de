use std::path::PathBuf;
use std::str::FromStr;

use crate::types::{DEFAULT_ENTRY_POINT_PATTERN, OutputMode, TargetType};

#[derive(Debug)]
pub struct ParsedArgs {
    pub target_type: Option<TargetType>,
    pub target_dir: Option<PathBuf>,
    pub entry_point_patterns: Vec<String>,
    pub actions: Vec<String>,
    pub flat: bool,
    pub output: OutputMode,
    pub verbose: bool,
    pub show_help: bool,
    pub show_version: bool,
}

impl Default for ParsedArgs {
    fn default() -> Self {
        Self {
            target_type: None,
            target_dir: None,
            entry_point_patterns: vec![DEFAULT_ENTRY_POINT_PATTERN.to_string()],
            actions: Vec::new(),
            flat: false,
            output: OutputMode::Human,
            verbose: false,
            show_help: false,
            show_version: false,
        }
    }
}

fn parse_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|segment| {
            let trimmed = segment.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

pub fn parse_args() -> Result<ParsedArgs, String> {
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|s| s.to_string_lossy().into_owned())
        .collect();
    parse_args_from(&args)
}

pub fn parse_args_from(args: &[String]) -> Result<ParsedArgs, String> {
    let mut parsed = ParsedArgs::default();
    let mut positionals: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "--help" | "-h" => {
                parsed.show_help = true;
                i += 1;
            }
            "--version" | "-V" => {
                parsed.show_version = true;
                i += 1;
            }
            "--verbose" | "-v" => {
                parsed.verbose = true;
                i += 1;
            }
            "--json" => {
                parsed.output = OutputMode::Json;
                i += 1;
            }
            "--flat" => {
                parsed.flat = true;
                i += 1;
            }
            "--entry-point-patterns" => {
                let next = args
                    .get(i + 1)
                    .ok_or_else(|| "--entry-point-patterns requires a comma-separated list of globs".to_string())?;
                parsed.entry_point_patterns = parse_comma_list(next);
                if parsed.entry_point_patterns.is_empty() {
                    return Err("--entry-point-patterns requires at least one glob".to_string());
                }
                i += 2;
            }
            _ if arg.starts_with("--entry-point-patterns=") => {
                let value = arg.trim_start_matches("--entry-point-patterns=");
                parsed.entry_point_patterns = parse_comma_list(value);
                if parsed.entry_point_patterns.is_empty() {
                    return Err("--entry-point-patterns requires at least one glob".to_string());
                }
                i += 1;
            }
            "--actions" => {
                let next = args
                    .get(i + 1)
                    .ok_or_else(|| "--actions requires a comma-separated list of identifiers".to_string())?;
                parsed.actions = parse_comma_list(next);
                i += 2;
            }
            _ if arg.starts_with("--actions=") => {
                let value = arg.trim_start_matches("--actions=");
                parsed.actions = parse_comma_list(value);
                i += 1;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("unknown flag: {}", arg));
            }
            _ => {
                positionals.push(arg.clone());
                i += 1;
            }
        }
    }

    if parsed.show_help || parsed.show_version {
        return Ok(parsed);
    }

    let mut positionals = positionals.into_iter();
    match positionals.next() {
        Some(raw) => parsed.target_type = Some(TargetType::from_str(&raw)?),
        None => return Err("missing target type: expected 'action' or 'view'".to_string()),
    }
    match positionals.next() {
        Some(raw) => parsed.target_dir = Some(PathBuf::from(raw)),
        None => return Err("missing target directory".to_string()),
    }
    if let Some(extra) = positionals.next() {
        return Err(format!("unexpected argument: {}", extra));
    }

    if parsed.flat && parsed.target_type == Some(TargetType::View) {
        return Err("--flat is only supported for the 'action' target type".to_string());
    }

    Ok(parsed)
}
