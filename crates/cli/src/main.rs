//! # salescast
//!
//! Command-line interface for salescast forecasts.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use data_facade::{
    Aggregation, CsvReaderSource, DocumentStreamSource, Granularity, InputConfig, JsonLinesStore,
    JsonReaderSource, MissingValuePolicy, SequenceSource, SeriesConfig,
};
use forecast_facade::{run_forecast, ForecastConfig, ForecastOutcome, LinearTrendForecaster};
use salescast_server::ServerConfig;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "salescast")]
#[command(about = "Linear-trend sales forecasting CLI", long_about = None)]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the next value of a sequence read from a file or stdin
    Predict {
        /// Input file (JSON or CSV); stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Input format; guessed from the file extension, JSON for stdin
        #[arg(short, long, value_enum)]
        format: Option<InputFormat>,

        /// Object key or CSV column (name or index) holding the values
        #[arg(long)]
        field: Option<String>,

        /// Missing-value policy (skip, zero, previous, interpolate)
        #[arg(short, long, default_value = "skip")]
        missing: MissingValuePolicy,

        /// Number of steps to forecast
        #[arg(long, default_value = "1")]
        horizon: usize,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Predict the next value of a JSON-lines document collection
    Collection {
        /// Directory holding `<collection>.jsonl` files
        #[arg(short, long, default_value = "./data")]
        data_dir: PathBuf,

        /// Collection name
        #[arg(short, long)]
        name: String,

        /// Field holding the values
        #[arg(long, default_value = "sales")]
        field: String,

        /// Field holding the timestamps; orders the sequence
        #[arg(short, long)]
        timestamp: Option<String>,

        /// Period resolution (document, daily, monthly)
        #[arg(short, long, default_value = "document")]
        granularity: Granularity,

        /// Combination of values within a period (sum, mean)
        #[arg(short, long, default_value = "sum")]
        aggregation: Aggregation,

        /// Missing-value policy (skip, zero, previous, interpolate)
        #[arg(short, long, default_value = "skip")]
        missing: MissingValuePolicy,

        /// Number of steps to forecast
        #[arg(long, default_value = "1")]
        horizon: usize,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Start the REST API server over a JSON-lines data directory
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Directory holding `<collection>.jsonl` files
        #[arg(short, long, default_value = "./data")]
        data_dir: PathBuf,

        /// Value field used when a request does not name one
        #[arg(long, default_value = "sales")]
        field: String,

        /// Timestamp field used when a request does not name one; empty disables ordering
        #[arg(short, long, default_value = "timestamp")]
        timestamp: String,
    },
}

/// Pick the format from the flag, then the file extension.
fn resolve_format(format: Option<InputFormat>, input: Option<&Path>) -> InputFormat {
    format.unwrap_or_else(|| {
        match input.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
            _ => InputFormat::Json,
        }
    })
}

fn reader_source<R: Read + 'static>(
    reader: R,
    format: InputFormat,
    name: &str,
    config: InputConfig,
) -> Box<dyn SequenceSource> {
    match format {
        InputFormat::Json => Box::new(JsonReaderSource::new(reader, config).with_name(name)),
        InputFormat::Csv => Box::new(CsvReaderSource::new(reader, config).with_name(name)),
    }
}

fn open_source(
    input: Option<&Path>,
    format: InputFormat,
    config: InputConfig,
) -> Result<Box<dyn SequenceSource>> {
    match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Ok(reader_source(
                BufReader::new(file),
                format,
                &path.display().to_string(),
                config,
            ))
        }
        None => Ok(reader_source(io::stdin(), format, "stdin", config)),
    }
}

/// Load a sequence and forecast `horizon` steps.
fn forecast_from(source: &mut dyn SequenceSource, horizon: usize) -> Result<ForecastOutcome> {
    let data = source
        .load_sequence()
        .with_context(|| format!("Failed to load data from {}", source.name()))?;
    tracing::info!(source = source.name(), observations = data.len(), "loaded sequence");

    let outcome = run_forecast(
        &LinearTrendForecaster::new(),
        &data,
        &ForecastConfig::with_horizon(horizon),
    )?;
    tracing::info!(
        slope = outcome.trend.slope,
        intercept = outcome.trend.intercept,
        "fitted trend"
    );
    Ok(outcome)
}

/// Plain-text rendering: the prediction, then any further steps.
fn render_text(outcome: &ForecastOutcome) -> String {
    let mut out = format!("{:.2}", outcome.prediction);
    if outcome.forecast.len() > 1 {
        for (i, val) in outcome.forecast.iter().enumerate() {
            out.push_str(&format!("\n  Step {}: {:.2}", i + 1, val));
        }
    }
    out
}

fn render_json(outcome: &ForecastOutcome, extra: Option<(&str, usize)>) -> serde_json::Value {
    let mut value = json!({ "prediction": outcome.prediction });
    if outcome.forecast.len() > 1 {
        value["forecast"] = json!(outcome.forecast);
    }
    if let Some((collection, observations)) = extra {
        value["collection"] = json!(collection);
        value["observations"] = json!(observations);
        value["slope"] = json!(outcome.trend.slope);
        value["intercept"] = json!(outcome.trend.intercept);
    }
    value
}

fn run_predict(
    input: Option<PathBuf>,
    format: Option<InputFormat>,
    field: Option<String>,
    missing: MissingValuePolicy,
    horizon: usize,
    as_json: bool,
) -> Result<()> {
    let format = resolve_format(format, input.as_deref());
    let config = InputConfig {
        value_field: field,
        missing,
    };
    let mut source = open_source(input.as_deref(), format, config)?;
    let outcome = forecast_from(source.as_mut(), horizon)?;

    if as_json {
        println!("{}", render_json(&outcome, None));
    } else {
        println!("{}", render_text(&outcome));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_collection(
    data_dir: PathBuf,
    name: String,
    field: String,
    timestamp: Option<String>,
    granularity: Granularity,
    aggregation: Aggregation,
    missing: MissingValuePolicy,
    horizon: usize,
    as_json: bool,
) -> Result<()> {
    let config = SeriesConfig {
        collection: name,
        value_field: field,
        timestamp_field: timestamp,
        granularity,
        aggregation,
        missing,
    };
    config.validate()?;

    let store = JsonLinesStore::new(data_dir);
    let collection = config.collection.clone();
    let mut source = DocumentStreamSource::new(&store, config);
    let outcome = forecast_from(&mut source, horizon)?;

    if as_json {
        let observations = outcome.trend.n_observations;
        println!("{}", render_json(&outcome, Some((&collection, observations))));
    } else {
        println!("{}", render_text(&outcome));
    }
    Ok(())
}

/// Server settings from `serve` flags.
fn serve_config(
    host: String,
    port: u16,
    data_dir: PathBuf,
    field: String,
    timestamp: String,
) -> ServerConfig {
    ServerConfig {
        host,
        port,
        data_dir,
        value_field: field,
        timestamp_field: (!timestamp.trim().is_empty()).then_some(timestamp),
    }
}

fn run_serve(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start the async runtime")?;
    runtime.block_on(salescast_server::serve(config))?;
    Ok(())
}

fn init_logging(verbose: bool, serving: bool) {
    let default = match (verbose, serving) {
        (true, _) => "info",
        (false, true) => "salescast_server=info,tower_http=info",
        (false, false) => "warn",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, matches!(cli.command, Commands::Serve { .. }));

    let result = match cli.command {
        Commands::Predict {
            input,
            format,
            field,
            missing,
            horizon,
            json,
        } => run_predict(input, format, field, missing, horizon, json),

        Commands::Collection {
            data_dir,
            name,
            field,
            timestamp,
            granularity,
            aggregation,
            missing,
            horizon,
            json,
        } => run_collection(
            data_dir,
            name,
            field,
            timestamp,
            granularity,
            aggregation,
            missing,
            horizon,
            json,
        ),

        Commands::Serve {
            port,
            host,
            data_dir,
            field,
            timestamp,
        } => run_serve(serve_config(host, port, data_dir, field, timestamp)),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SALES_JSON: &str = "[100,120,150,160,200,220,250,300,320,350,400,450]";

    #[test]
    fn test_parse_predict_args() {
        let cli = Cli::try_parse_from([
            "salescast", "predict", "--input", "sales.csv", "--field", "sales", "--missing",
            "interpolate", "--horizon", "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Predict {
                input,
                format,
                field,
                missing,
                horizon,
                json,
            } => {
                assert_eq!(input, Some(PathBuf::from("sales.csv")));
                assert_eq!(format, None);
                assert_eq!(field.as_deref(), Some("sales"));
                assert_eq!(missing, MissingValuePolicy::Interpolate);
                assert_eq!(horizon, 3);
                assert!(!json);
            }
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let result = Cli::try_parse_from(["salescast", "predict", "--missing", "guess"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_collection_args() {
        let cli = Cli::try_parse_from([
            "salescast",
            "collection",
            "--name",
            "inventory",
            "--timestamp",
            "createdAt",
            "--granularity",
            "monthly",
        ])
        .unwrap();
        match cli.command {
            Commands::Collection {
                data_dir,
                name,
                field,
                granularity,
                aggregation,
                ..
            } => {
                assert_eq!(data_dir, PathBuf::from("./data"));
                assert_eq!(name, "inventory");
                assert_eq!(field, "sales");
                assert_eq!(granularity, Granularity::Monthly);
                assert_eq!(aggregation, Aggregation::Sum);
            }
            _ => panic!("expected collection"),
        }
    }

    #[test]
    fn test_parse_serve_args() {
        let cli = Cli::try_parse_from([
            "salescast", "serve", "--port", "9090", "--host", "127.0.0.1", "--data-dir", "/srv/data",
            "--timestamp", "",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve {
                port,
                host,
                data_dir,
                field,
                timestamp,
            } => {
                let config = serve_config(host, port, data_dir, field, timestamp);
                assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:9090");
                assert_eq!(config.data_dir, PathBuf::from("/srv/data"));
                assert_eq!(config.value_field, "sales");
                assert_eq!(config.timestamp_field, None);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_serve_defaults_match_server_defaults() {
        let config = serve_config(
            "0.0.0.0".to_string(),
            8080,
            PathBuf::from("./data"),
            "sales".to_string(),
            "timestamp".to_string(),
        );
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_serve_reports_bad_address() {
        let config = serve_config(
            "not a host".to_string(),
            8080,
            PathBuf::from("./data"),
            "sales".to_string(),
            "timestamp".to_string(),
        );
        let err = run_serve(config).unwrap_err();
        assert!(err.to_string().contains("not a host"));
    }

    #[test]
    fn test_rejects_oversized_horizon() {
        let mut source =
            reader_source("[1, 2]".as_bytes(), InputFormat::Json, "test", InputConfig::default());
        let err = forecast_from(source.as_mut(), 100_000_000_000).unwrap_err();
        assert!(err.to_string().contains("horizon"));
    }

    #[test]
    fn test_resolve_format() {
        assert_eq!(resolve_format(None, None), InputFormat::Json);
        assert_eq!(
            resolve_format(None, Some(Path::new("sales.CSV"))),
            InputFormat::Csv
        );
        assert_eq!(
            resolve_format(None, Some(Path::new("sales.json"))),
            InputFormat::Json
        );
        assert_eq!(
            resolve_format(Some(InputFormat::Csv), Some(Path::new("sales.json"))),
            InputFormat::Csv
        );
    }

    #[test]
    fn test_forecast_from_json_reader() {
        let mut source = reader_source(
            SALES_JSON.as_bytes(),
            InputFormat::Json,
            "test",
            InputConfig::default(),
        );
        let outcome = forecast_from(source.as_mut(), 1).unwrap();
        assert_eq!(render_text(&outcome), "453.94");
    }

    #[test]
    fn test_forecast_from_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "month,sales").unwrap();
        writeln!(file, "1,10").unwrap();
        writeln!(file, "2,").unwrap();
        writeln!(file, "3,30").unwrap();
        drop(file);

        let config = InputConfig::field("sales").with_missing(MissingValuePolicy::Interpolate);
        let mut source = open_source(Some(&path), InputFormat::Csv, config).unwrap();
        let outcome = forecast_from(source.as_mut(), 2).unwrap();
        assert_eq!(render_text(&outcome), "40.00\n  Step 1: 40.00\n  Step 2: 50.00");
    }

    #[test]
    fn test_missing_file_error_names_the_path() {
        let err = open_source(
            Some(Path::new("/nonexistent/sales.json")),
            InputFormat::Json,
            InputConfig::default(),
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("/nonexistent/sales.json"));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let mut source =
            reader_source("[]".as_bytes(), InputFormat::Json, "test", InputConfig::default());
        assert!(forecast_from(source.as_mut(), 1).is_err());
    }

    #[test]
    fn test_render_json_for_collection() {
        let mut source =
            reader_source("[1, 2, 3]".as_bytes(), InputFormat::Json, "test", InputConfig::default());
        let outcome = forecast_from(source.as_mut(), 1).unwrap();
        let value = render_json(&outcome, Some(("inventory", 3)));

        assert_eq!(value["prediction"], json!(4.0));
        assert_eq!(value["collection"], "inventory");
        assert_eq!(value["observations"], 3);
        assert!(value.get("forecast").is_none());
    }
}
