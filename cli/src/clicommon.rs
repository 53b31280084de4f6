//! Pieces shared by the `coingecko` and `idena` binaries: global flags,
//! configuration loading, logging and result printing.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser};
use colored::Colorize;
use lib_apis::configs::{load_apis_config, ApisConfig};
use lib_apis::loggers::{setup_logging, LoggerOptions};
use lib_apis::retrieve::ApiError;
use lib_apis::QueryParams;
use serde_json::Value;
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// JSON5 configuration file (defaults to $APIS_CONFIG or ./apis.config.json5)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Retries for transient failures
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// Also write JSON logs to this directory
    #[arg(long, global = true, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

/// Loads `.env` (or `dotenv_path`) into the environment, then parses `args`.
///
/// Variables already set in the environment win over the file.
pub fn parse_args_from<T, I, A>(dotenv_path: Option<&Path>, args: I) -> T
where
    T: Parser,
    I: IntoIterator<Item = A>,
    A: Into<OsString> + Clone,
{
    let _ = match dotenv_path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
    T::parse_from(args)
}

impl GlobalArgs {
    /// Loads the config file and environment, then applies CLI flags.
    pub fn load_config(&self) -> Result<ApisConfig> {
        let mut config = load_apis_config(self.config.as_deref()).context("Failed to load configuration")?;
        if let Some(t) = self.timeout {
            config.http.timeout_secs = t;
        }
        if let Some(r) = self.retries {
            config.http.max_retries = r;
        }
        Ok(config)
    }

    pub fn init_logging(&self, app_name: &str) -> Result<Option<WorkerGuard>> {
        let options = LoggerOptions {
            default_level: "warn".to_string(),
            log_dir: self.log_dir.clone(),
            ..LoggerOptions::default()
        };
        Ok(setup_logging(app_name, &options)?)
    }
}

/// Parses repeated `key=value` arguments into query parameters.
pub fn parse_params(pairs: &[String]) -> Result<QueryParams> {
    let mut params = QueryParams::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Expected key=value, got {:?}", pair);
        };
        if key.is_empty() {
            bail!("Empty parameter name in {:?}", pair);
        }
        params.insert(key, value);
    }
    Ok(params)
}

/// Pretty JSON for a result: the value itself, or the `{message, code}` record.
pub fn render(result: &Result<Value, ApiError>) -> Result<String> {
    let text = match result {
        Ok(value) => serde_json::to_string_pretty(value)?,
        Err(e) => serde_json::to_string_pretty(&e.to_record())?,
    };
    Ok(text)
}

/// Prints the JSON result, or the error record in red with exit code 1.
pub fn finish(result: Result<Value, ApiError>) -> Result<()> {
    let text = render(&result)?;
    if result.is_ok() {
        println!("{text}");
        return Ok(());
    }
    eprintln!("{}", text.red());
    std::process::exit(1);
}
