use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use usau_results::scraper::TournamentScraper;
use usau_results::utils::ResultsStats;

#[derive(Parser)]
#[command(name = "usau-results")]
#[command(about = "A play.usaultimate.org tournament results scraper", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        global = true,
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch pool standings and per-round scored sections
    Pools {
        #[arg(help = "URL of the tournament schedule page")]
        url: String,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Fetch finalized elimination bracket games
    Bracket {
        #[arg(help = "URL of the tournament schedule page")]
        url: String,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Fetch pool play and bracket results in one pass
    Results {
        #[arg(help = "URL of the tournament schedule page")]
        url: String,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
}

fn serialize_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Error serializing to JSON: {}", e);
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let scraper = TournamentScraper::new().unwrap_or_else(|e| {
        log::error!("Error creating scraper: {}", e);
        process::exit(1);
    });

    match cli.command {
        Commands::Pools { url, format } => {
            log::info!("Fetching pool play results from {}...", url);

            let results = scraper.pool_play_results(&url).await.unwrap_or_else(|e| {
                log::error!("Error fetching pool play results: {}", e);
                process::exit(1);
            });

            match format {
                OutputFormat::Json => serialize_json(&results),
                OutputFormat::Text => {
                    if results.pools.is_empty() && results.rounds.is_empty() {
                        println!("No pool play results to display.");
                    } else {
                        print!("{}", results);
                    }
                }
            }
        }

        Commands::Bracket { url, format } => {
            log::info!("Fetching bracket results from {}...", url);

            let results = scraper.bracket_results(&url).await.unwrap_or_else(|e| {
                log::error!("Error fetching bracket results: {}", e);
                process::exit(1);
            });

            match format {
                OutputFormat::Json => serialize_json(&results),
                OutputFormat::Text => {
                    if results.divisions.is_empty() {
                        println!("No bracket results to display.");
                    } else {
                        print!("{}", results);
                    }
                }
            }
        }

        Commands::Results { url, format } => {
            log::info!("Fetching tournament results from {}...", url);

            let results = scraper.tournament_results(&url).await.unwrap_or_else(|e| {
                log::error!("Error fetching tournament results: {}", e);
                process::exit(1);
            });

            match format {
                OutputFormat::Json => serialize_json(&results),
                OutputFormat::Text => {
                    print!("{}", results);
                    print!("{}", ResultsStats::from_results(&results));
                }
            }
        }
    }
}
