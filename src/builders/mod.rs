// This file is the module declaration file for the `builders` module.
// It declares and makes public the pluggable pieces around the pipeline.

// `reporter` module:
// Renders a `ValidationTally` as the human-readable summary. Defines the
// `SummaryReporter` trait and a `ConsoleReporter` that writes to any stream.
pub mod reporter;

// `validator` module:
// Defines the `RecordValidator` trait the pipeline calls for every line and
// the default `JsonRecordValidator`, which checks for well-formed JSON and
// the `RECORD_ID` and `DATA_SOURCE` fields.
pub mod validator;
