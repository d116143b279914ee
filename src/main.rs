use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, warn};

use hyra::history::{HistoryRecord, HistoryStore, JsonHistoryStore};
use hyra::rent::Period;

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;
const EXIT_HISTORY: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate each roommate's rent from a period file
    Calc {
        /// Path to the period file (YAML with `config` and `roommates`)
        file: PathBuf,

        /// Record the result in the rent history
        #[arg(long)]
        save: bool,

        /// Print the household chat message instead of the breakdown
        #[arg(long, conflicts_with_all = ["tsv", "json"])]
        message: bool,

        /// Print tab-separated shares for scripting
        #[arg(long, conflicts_with = "json")]
        tsv: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List recorded months, or show one
    History {
        /// Period to show, as YYYY-MM
        #[arg(long)]
        period: Option<Period>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "hyra")]
#[command(about = "Split the household rent between roommates", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the rent history file (defaults to ~/.config/hyra/history.json)
    #[arg(long, global = true)]
    history_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn history_store(path: Option<PathBuf>) -> JsonHistoryStore {
    let path = match path {
        Some(p) => p,
        None => match hyra::history::get_history_path() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("History error: {:#}", e);
                std::process::exit(EXIT_HISTORY);
            }
        },
    };
    JsonHistoryStore::new(path)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Calc {
            file,
            save,
            message,
            tsv,
            json,
        } => {
            let (config, roommates) = match hyra::config::load_period(&file) {
                Ok(parts) => parts,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            debug!(
                period = %config.period(),
                roommates = roommates.len(),
                "Loaded period file"
            );

            // Report every problem at once before calculating
            let errors = hyra::rent::collect_errors(&config, &roommates);
            if !errors.is_empty() {
                eprintln!("Period file errors:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_CONFIG);
            }

            let record = match HistoryRecord::calculate(&config, roommates) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Config error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            let result = &record.result;

            for detail in result.details.iter().filter(|d| d.share < 0) {
                warn!(
                    roommate = %detail.name,
                    share = detail.share,
                    "Negative share: the household owes this roommate money"
                );
            }

            if message {
                println!("{}", hyra::output::friendly_message(result));
            } else if tsv {
                println!("{}", hyra::output::format_tsv(result));
            } else if json {
                match serde_json::to_string_pretty(result) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Failed to serialize result: {}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                }
            } else {
                let use_colors = hyra::output::should_use_colors();
                println!("{}", hyra::output::format_breakdown(result, use_colors));
            }

            if save {
                let mut store = history_store(cli.history_file);
                let period = record.period;
                if let Err(e) = store.put(record) {
                    eprintln!("History error: {:#}", e);
                    std::process::exit(EXIT_HISTORY);
                }
                eprintln!("Saved {} to {}", period, store.path().display());
            }
        }
        Commands::History { period } => {
            let store = history_store(cli.history_file);
            let use_colors = hyra::output::should_use_colors();

            match period {
                Some(period) => match store.get(period) {
                    Ok(Some(record)) => {
                        println!("{}", hyra::output::format_record_header(period, &record));
                        println!(
                            "{}",
                            hyra::output::format_breakdown(&record.result, use_colors)
                        );
                    }
                    Ok(None) => {
                        eprintln!("No rent recorded for {}", period);
                        std::process::exit(EXIT_HISTORY);
                    }
                    Err(e) => {
                        eprintln!("History error: {:#}", e);
                        std::process::exit(EXIT_HISTORY);
                    }
                },
                None => match store.list() {
                    Ok(records) => {
                        println!("{}", hyra::output::format_history(&records, use_colors));
                    }
                    Err(e) => {
                        eprintln!("History error: {:#}", e);
                        std::process::exit(EXIT_HISTORY);
                    }
                },
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
