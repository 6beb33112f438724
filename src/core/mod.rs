// This file is the module declaration file for the `core` module.
// It declares the submodules that make up a validation run and exposes
// them to the rest of the crate.

// `config` module:
// Defines `ValidateConfig`, the settings for a run, and the `ConfigManager`
// that reads them from a YAML or TOML file passed with `--config`.
pub mod config;

// `error` module:
// The `ValidateError` enum. Every variant aborts a run and carries a
// numeric message id for the log sink.
pub mod error;

// `pipeline` module:
// The line-by-line scan. Feeds each non-blank line to a `RecordValidator`,
// classifies failures and returns a `ValidationTally`.
pub mod pipeline;

// `runner` module:
// Ties a resolved source to the pipeline and owns the open stream for
// the duration of one run.
pub mod runner;

// `source` module:
// Turns an input locator and an optional file type override into a
// `SourceDescriptor`, then opens it as a buffered line reader.
pub mod source;
