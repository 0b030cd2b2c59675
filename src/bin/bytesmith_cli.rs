//! Bytesmith CLI - Asset Embedding Toolkit
//!
//! Commands: embed, rules
//! Outputs JSON manifests to stdout
//! Returns non-zero on fatal errors

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

use bytesmith_core::{
    embed::{export_image, ExportRequest},
    manifest::{EmbedManifest, EvaluationManifest},
    rules::{load_query_dates, RuleLog, RuleLogError},
};

#[derive(Parser)]
#[command(name = "bytesmith-cli")]
#[command(about = "Bytesmith CLI - Asset Embedding Toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level filter
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Subcommand)]
enum Commands {
    /// Export an image's decoded pixel bytes as an array literal
    Embed {
        /// Input image path (use forward slashes)
        #[arg(short, long)]
        input: PathBuf,

        /// Symbol name suffix; the emitted constant is g_<suffix>
        #[arg(short, long)]
        symbol: String,

        /// Directory for the .embed file (defaults to the working directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Replay a dated rule log for a list of query dates
    Rules {
        /// Rules file: one `dd-mm-yyyy:+tok -tok ...` entry per line,
        /// sorted ascending by date
        #[arg(short, long)]
        rules_file: PathBuf,

        /// Dates file: one `dd-mm-yyyy` query date per line
        #[arg(short, long)]
        dates_file: PathBuf,

        /// Emit a JSON evaluation manifest instead of plain sets
        #[arg(long)]
        json: bool,

        /// Fail on rules/dates read errors instead of continuing with
        /// empty inputs
        #[arg(long)]
        strict: bool,
    },
}

fn setup_logger(level: LevelFilter) {
    let mut log_builder = env_logger::Builder::new();
    log_builder.filter_level(level);
    log_builder.init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logger(cli.log_level);

    match cli.command {
        Commands::Embed {
            input,
            symbol,
            output_dir,
        } => {
            let request = ExportRequest {
                input: input.clone(),
                symbol_suffix: symbol,
                output_dir,
            };

            match export_image(&request) {
                Ok(artifact) => {
                    log::info!("Wrote {}", artifact.output.display());
                    let manifest = EmbedManifest::for_artifact(&input, &artifact);
                    println!("{}", serde_json::to_string_pretty(&manifest).unwrap());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!(r#"{{"error": "{}"}}"#, e);
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Rules {
            rules_file,
            dates_file,
            json,
            strict,
        } => {
            // Unreadable input files degrade to empty lists unless
            // --strict; malformed lines are always fatal.
            let dates = match load_query_dates(&dates_file) {
                Ok(dates) => dates,
                Err(e @ RuleLogError::Io { .. }) if !strict => {
                    log::error!("Error in opening the dates file: {}", e);
                    Vec::new()
                }
                Err(e) => {
                    eprintln!(r#"{{"error": "{}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };
            log::debug!("Parsed {} query date(s)", dates.len());

            let rule_log = match RuleLog::load(&rules_file) {
                Ok(log) => log,
                Err(e @ RuleLogError::Io { .. }) if !strict => {
                    log::error!("Error in opening the rules file: {}", e);
                    RuleLog::new(Vec::new())
                }
                Err(e) => {
                    eprintln!(r#"{{"error": "{}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };

            let results = rule_log.evaluate(&dates);

            if json {
                let manifest = EvaluationManifest::new(&rules_file, &dates_file, results);
                println!("{}", serde_json::to_string_pretty(&manifest).unwrap());
            } else {
                for activation in &results {
                    let items: Vec<&str> =
                        activation.active.iter().map(String::as_str).collect();
                    println!("{{{}}}", items.join(", "));
                }
            }

            ExitCode::SUCCESS
        }
    }
}
