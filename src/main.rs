use actiongraph::analyzer::{self, AnalysisOptions, filter, output};
use actiongraph::args::parse_args;
use actiongraph::types::TargetType;

fn format_usage() -> &'static str {
    "actiongraph - Action Dependency Analyzer\n\n\
Usage: actiongraph <action|view> <directory> [options]\n\n\
Target types:\n  \
  action                    Analyze backend action handler files (.js/.ts)\n  \
  view                      Analyze UI sources and report per entry point\n\n\
Options:\n  \
  --entry-point-patterns <globs>  Comma-separated entry-point globs, relative to\n                                  the target directory (view mode; default:\n                                  pages/**/*.{tsx,jsx,ts,js})\n  \
  --actions <ids>           Only report records that reference one of these\n                            action identifiers (comma-separated)\n  \
  --flat                    Per-file direct actions without graph resolution\n                            (action mode only)\n  \
  --json                    JSON output instead of text\n  \
  --verbose                 Show scan and graph statistics on stderr\n  \
  --help, -h                Show this message\n  \
  --version, -V             Show version\n\n\
Examples:\n  \
  actiongraph action ./actions                   # Handler dependency report\n  \
  actiongraph view ./src --json                  # Entry-point report as JSON\n  \
  actiongraph view ./src --actions get-user      # Filter to one action\n  \
  actiongraph view ./src --entry-point-patterns 'screens/**/*.tsx'\n"
}

fn main() {
    let parsed = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("\n{}", format_usage());
            std::process::exit(1);
        }
    };

    if parsed.show_help {
        println!("{}", format_usage());
        return;
    }

    if parsed.show_version {
        println!("actiongraph {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    // parse_args guarantees both positionals when help/version are absent.
    let (Some(target_type), Some(target_dir)) = (parsed.target_type, parsed.target_dir) else {
        eprintln!("{}", format_usage());
        std::process::exit(1);
    };

    let mut opts = AnalysisOptions::new(target_type, target_dir);
    opts.entry_point_patterns = parsed.entry_point_patterns;
    opts.verbose = parsed.verbose;

    if parsed.flat {
        let flat = match analyzer::analyze_flat(&opts) {
            Ok(flat) => flat,
            Err(err) => {
                eprintln!("{:#}", err);
                std::process::exit(1);
            }
        };
        println!("{}", output::render_flat(&flat, parsed.output));
        return;
    }

    let records = match analyzer::analyze(&opts) {
        Ok(records) => records,
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(1);
        }
    };

    let records = if parsed.actions.is_empty() {
        records
    } else {
        let outcome = match target_type {
            TargetType::Action => filter::filter_action_dependencies(&records, &parsed.actions),
            TargetType::View => filter::filter_view_dependencies(&records, &parsed.actions),
        };
        output::print_warnings(&outcome.warnings);
        outcome.filtered
    };

    println!("{}", output::render_records(&records, parsed.output));
}
