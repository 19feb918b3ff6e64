//! geofix CLI - Command-line diagnostic for position resolution
//!
//! Runs one resolution race against the configured sources and prints the
//! winning position, or the reason each source failed.

mod error;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use geofix::config::{config_file_path, validate_ip_endpoint, ConfigFile, PlatformSetting};
use geofix::location::{
    ReqwestGeoClient, Resolution, ResolutionCoordinator, ResolutionError,
    UnavailableLocationService,
};
use geofix::logging::init_logging;

use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "geofix")]
#[command(version = geofix::VERSION)]
#[command(about = "Resolve the current position from every available source", long_about = None)]
struct Args {
    /// Config file to use instead of ~/.geofix/config.ini
    #[arg(long)]
    config: Option<PathBuf>,

    /// Platform hint: android, ios, other, or a full user-agent string
    #[arg(long)]
    platform: Option<String>,

    /// Hard per-source timeout in seconds
    #[arg(long)]
    fallback_timeout: Option<u64>,

    /// IP geolocation endpoint
    #[arg(long)]
    ip_endpoint: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Directory for the log file
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log more detail (per-source outcomes)
    #[arg(short, long)]
    verbose: bool,

    /// Write the effective settings to the config file and exit
    #[arg(long)]
    save_config: bool,
}

impl Args {
    /// Load the config file and apply command-line overrides.
    fn config(&self) -> Result<ConfigFile, CliError> {
        let mut config = match &self.config {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::load()?,
        };

        if let Some(hint) = &self.platform {
            config.resolver.platform = PlatformSetting::Hint(hint.clone());
        }
        if let Some(secs) = self.fallback_timeout {
            if secs == 0 {
                return Err(CliError::InvalidArgument(
                    "--fallback-timeout must be greater than zero".to_string(),
                ));
            }
            config.resolver.fallback_timeout = secs;
        }
        if let Some(endpoint) = &self.ip_endpoint {
            validate_ip_endpoint(endpoint)?;
            config.ip.endpoint = endpoint.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.logging.directory = dir.clone();
        }

        Ok(config)
    }

    /// Persist `config` to `--config`, or to ~/.geofix/config.ini.
    fn save(&self, config: &ConfigFile) -> Result<PathBuf, CliError> {
        match &self.config {
            Some(path) => {
                config.save_to(path)?;
                Ok(path.clone())
            }
            None => {
                config.save()?;
                Ok(config_file_path())
            }
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    match run(args).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => e.exit(),
    }
}

/// Run one resolution. Returns whether a position was found.
async fn run(args: Args) -> Result<bool, CliError> {
    let config = args.config()?;

    if args.save_config {
        let path = args.save(&config)?;
        println!("Wrote configuration to {}", path.display());
        return Ok(true);
    }

    let level = if args.verbose { "debug" } else { "warn" };
    let _logging_guard = init_logging(&config.logging.directory, &config.logging.file, level)
        .map_err(CliError::LoggingInit)?;

    tracing::info!(
        version = geofix::VERSION,
        platform = %config.platform(),
        fallback_timeout_secs = config.resolver.fallback_timeout,
        endpoint = %config.ip.endpoint,
        "Starting position resolution"
    );

    let coordinator = ResolutionCoordinator::baseline(
        Arc::new(UnavailableLocationService),
        ReqwestGeoClient::new()?,
        &config,
    )?;

    let outcome = coordinator.resolve().await;
    let found = outcome.is_ok();

    let output = if args.json {
        serde_json::to_string_pretty(&json_report(&outcome))?
    } else {
        plain_report(&outcome)
    };
    println!("{}", output);

    Ok(found)
}

fn plain_report(outcome: &Result<Resolution, ResolutionError>) -> String {
    match outcome {
        Ok(resolution) => {
            let position = &resolution.position;
            let mut lines = vec![
                format!("Position:  {:.6}, {:.6}", position.latitude(), position.longitude()),
                format!("Accuracy:  ±{} m", position.accuracy()),
            ];
            if let Some(altitude) = position.altitude() {
                lines.push(format!("Altitude:  {} m", altitude));
            }
            if let Some(heading) = position.heading() {
                lines.push(format!("Heading:   {}°", heading));
            }
            if let Some(speed) = position.speed() {
                lines.push(format!("Speed:     {} m/s", speed));
            }
            lines.push(format!(
                "Source:    {} ({} ms)",
                resolution.provider,
                resolution.elapsed.as_millis()
            ));
            lines.join("\n")
        }
        Err(e) => {
            let mut lines = vec![format!("Position unavailable ({})", e)];
            for error in e.failures().values() {
                lines.push(format!("  {}", error));
            }
            lines.join("\n")
        }
    }
}

fn json_report(outcome: &Result<Resolution, ResolutionError>) -> serde_json::Value {
    match outcome {
        Ok(resolution) => serde_json::json!({
            "available": true,
            "provider": resolution.provider,
            "elapsedMs": resolution.elapsed.as_millis() as u64,
            "position": resolution.position,
        }),
        Err(e) => serde_json::json!({
            "available": false,
            "failures": e
                .failures()
                .iter()
                .map(|(name, error)| (name.clone(), serde_json::Value::from(error.to_string())))
                .collect::<serde_json::Map<String, serde_json::Value>>(),
        }),
    }
}
