//! Validates that a JSON-lines data source is made of well-formed records,
//! each with a RECORD_ID and a DATA_SOURCE field. The source can be a local
//! file, an http(s) URL, a gzip-compressed version of either, or whatever is
//! piped to standard input. Bad lines are counted, not fatal: the whole
//! source is always read and a summary is printed at the end.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use jsonl_validate::core::config::{LogLevel, ValidateConfig};
use jsonl_validate::core::source::FileType;
use jsonl_validate::utils;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "jsonl-validate", version)]
#[command(
    about = "Validates a file is in JSON-lines format and conforms to the generic entity specification."
)]
#[command(long_about = "Validates a file is in JSON-lines format and conforms to the generic \
entity specification. For example:

jsonl-validate --input-url \"file:///path/to/json/lines/file.jsonl\"
jsonl-validate --input-url \"https://example.com/datasets/truth-set.jsonl.gz\"
cat file.jsonl | jsonl-validate")]
struct Cli {
    /// Input location (file, http or https URL). Omit to read standard input
    #[arg(
        short = 'i',
        long = "input-url",
        alias = "inputURL",
        env = "SENZING_TOOLS_INPUT_URL"
    )]
    input_url: Option<String>,

    /// File type override, for sources without a .jsonl or .gz extension
    #[arg(
        long = "file-type",
        alias = "fileType",
        env = "SENZING_TOOLS_FILE_TYPE",
        value_enum,
        ignore_case = true
    )]
    file_type: Option<FileType>,

    /// Verbosity of the diagnostic log written to stderr
    #[arg(
        long = "log-level",
        alias = "logLevel",
        env = "SENZING_TOOLS_LOG_LEVEL",
        value_enum,
        ignore_case = true
    )]
    log_level: Option<LogLevel>,

    /// Settings file (.yaml, .yml or .toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ValidateConfig {
        ValidateConfig {
            input_url: self.input_url.clone(),
            file_type: self.file_type,
            log_level: self.log_level,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let settings = match utils::load_settings(cli.config.clone(), cli.overrides()) {
        Ok(settings) => settings,
        Err(e) => {
            utils::init_tracing(cli.log_level.unwrap_or_default());
            error!(msg_id = e.message_id(), "{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    utils::init_tracing(settings.log_level());
    utils::log_config_used(cli.config.as_ref());

    match utils::run_validation(&settings) {
        Ok(tally) => {
            utils::print_summary(&tally)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(msg_id = e.message_id(), "{e}");
            if e.wants_usage() {
                Cli::command().print_help()?;
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
