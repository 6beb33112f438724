use anyhow::Result;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::builders::reporter::{ConsoleReporter, SummaryReporter};
use crate::builders::validator::JsonRecordValidator;
use crate::core::config::{ConfigManager, ConfigProvider, LogLevel, ValidateConfig};
use crate::core::error::ValidateError;
use crate::core::pipeline::ValidationTally;
use crate::core::runner::ValidationRun;
use crate::core::source::SourceDescriptor;

/// Installs the stderr log sink.
///
/// `RUST_LOG` wins when set; otherwise `level` is used. Call once at startup.
pub fn init_tracing(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Reads the settings file (if any) and overlays the command-line values.
pub fn load_settings(
    config_path: Option<PathBuf>,
    overrides: ValidateConfig,
) -> Result<ValidateConfig, ValidateError> {
    let config_manager = ConfigManager::new(config_path);
    let config = config_manager.load_config()?;
    Ok(config.merge(overrides))
}

/// Resolves the configured source and validates it with the default record
/// validator.
pub fn run_validation(config: &ValidateConfig) -> Result<ValidationTally, ValidateError> {
    let descriptor = SourceDescriptor::resolve(config.locator(), config.file_type)?;
    ValidationRun::new(descriptor).execute(&JsonRecordValidator::new())
}

/// Writes the summary for `tally` to stdout.
pub fn print_summary(tally: &ValidationTally) -> Result<()> {
    let mut reporter = ConsoleReporter::new(io::stdout().lock());
    reporter.report(tally)
}

pub fn log_config_used(config_path: Option<&PathBuf>) {
    if let Some(path) = config_path {
        info!(msg_id = 1003, path = %path.display(), "Using config file: {}", path.display());
    }
}
