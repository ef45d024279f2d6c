use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use kouho::output;
use kouho::types::Source;
use kouho::{asahi, senkyo};

#[derive(Parser)]
#[command(name = "kouho")]
#[command(about = "A saninsen 2025 candidate list scraper", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[arg(
        short = 's',
        long,
        value_parser = parse_source,
        help = "Source site to scrape ('asahi' or 'senkyo')"
    )]
    source: Source,

    #[arg(
        short = 'o',
        long = "out",
        default_value = output::DEFAULT_OUTPUT,
        help = "Output CSV path"
    )]
    out: PathBuf,

    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "csv",
        help = "Output format"
    )]
    format: OutputFormat,
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

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn parse_source(s: &str) -> Result<Source, String> {
    Source::from_str(s).map_err(|e| e.to_string())
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

    let records = match cli.source {
        Source::Asahi => {
            let scraper = asahi::WebScraper::new().unwrap_or_else(|e| {
                log::error!("Error creating scraper: {}", e);
                process::exit(1);
            });
            scraper.scrape_all().await
        }
        Source::Senkyo => {
            let scraper = senkyo::WebScraper::new().unwrap_or_else(|e| {
                log::error!("Error creating scraper: {}", e);
                process::exit(1);
            });
            scraper.scrape_all().await
        }
    };

    if records.is_empty() {
        log::error!("No data scraped. Aborting.");
        process::exit(1);
    }

    match cli.format {
        OutputFormat::Json => serialize_json(&records),
        OutputFormat::Csv => {
            if let Err(e) = output::write_csv(&cli.out, &records, cli.source) {
                log::error!("Error writing {}: {}", cli.out.display(), e);
                process::exit(1);
            }
            log::info!("Saved {} with {} records.", cli.out.display(), records.len());
        }
    }
}
