use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use crate::error::TacResult;
use std::path::Path;
use std::sync::Mutex;

/// Initialize logging system
///
/// Logs go to stderr (or `log_file`) so stdout stays free for the report.
/// `RUST_LOG` overrides `level` when set.
pub fn init_logger(level: &str, json_output: bool, log_file: Option<&Path>) -> TacResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    match (json_output, log_file) {
        (true, Some(file)) => {
            let file = open_log_file(file)?;
            registry
                .with(fmt::layer().json().with_writer(Mutex::new(file)))
                .init();
        }
        (true, None) => {
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        (false, Some(file)) => {
            let file = open_log_file(file)?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .init();
        }
        (false, None) => {
            registry
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

fn open_log_file(path: &Path) -> TacResult<std::fs::File> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    Ok(file)
}

/// Initialize logger from config
pub fn init_from_config(config: &crate::utils::config::LoggingConfig) -> TacResult<()> {
    let json = config.output == "json";
    let log_file = if !config.file_path.is_empty() {
        Some(Path::new(&config.file_path))
    } else {
        None
    };

    init_logger(&config.level, json, log_file)
}
