use anyhow::Result;
use serde_json::{Map, Value};

/// Top-level field that uniquely identifies a record within its data source.
pub const RECORD_ID_FIELD: &str = "RECORD_ID";
/// Top-level field naming the data source a record belongs to.
pub const DATA_SOURCE_FIELD: &str = "DATA_SOURCE";

/// The outcome of validating a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineVerdict {
    /// The line is a well-formed record.
    Valid,
    /// The line was rejected. The reason is free text and may be absent.
    Invalid(Option<String>),
}

impl LineVerdict {
    /// Shorthand for an invalid verdict carrying a reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        LineVerdict::Invalid(Some(reason.into()))
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, LineVerdict::Valid)
    }
}

/// The `RecordValidator` trait defines the public interface for checking a
/// single JSON-lines record.
///
/// The pipeline only depends on this trait, so any schema checker can be
/// plugged in. Implementations report an invalid record through
/// [`LineVerdict::Invalid`]; an `Err` means the validator itself broke and
/// the run is aborted.
pub trait RecordValidator {
    /// Validates one trimmed, non-blank line.
    ///
    /// # Arguments
    /// * `line`: The line content without surrounding whitespace.
    ///
    /// # Returns
    /// A `Result<LineVerdict>`. The reason text of an invalid verdict should
    /// mention `RECORD_ID`, `DATA_SOURCE` or `not well formed` so the failure
    /// can be classified.
    fn validate(&self, line: &str) -> Result<LineVerdict>;
}

/// Any closure from a line to a verdict can act as a validator.
impl<F> RecordValidator for F
where
    F: Fn(&str) -> Result<LineVerdict>,
{
    fn validate(&self, line: &str) -> Result<LineVerdict> {
        self(line)
    }
}

/// The `JsonRecordValidator` is the default implementation of `RecordValidator`.
///
/// It checks that a line parses as a JSON object and that the object carries
/// both a `RECORD_ID` and a `DATA_SOURCE` field. A field whose value is `null`
/// or an empty string counts as absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRecordValidator;

impl JsonRecordValidator {
    /// Creates a new instance of `JsonRecordValidator`.
    pub fn new() -> Self {
        Self
    }

    /// Checks whether `field` is present with a usable value.
    ///
    /// # Arguments
    /// * `record`: The parsed top-level JSON object.
    /// * `field`: The name of the required field.
    ///
    /// # Returns
    /// `true` if the field exists and is neither `null` nor a blank string.
    fn has_field(&self, record: &Map<String, Value>, field: &str) -> bool {
        match record.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        }
    }
}

impl RecordValidator for JsonRecordValidator {
    /// Parses the line and checks the required fields in order:
    /// well-formedness first, then `RECORD_ID`, then `DATA_SOURCE`.
    fn validate(&self, line: &str) -> Result<LineVerdict> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                return Ok(LineVerdict::invalid(format!(
                    "line is not well formed JSON: {e}"
                )));
            }
        };

        let Value::Object(record) = value else {
            return Ok(LineVerdict::invalid("record is not a JSON object"));
        };

        if !self.has_field(&record, RECORD_ID_FIELD) {
            return Ok(LineVerdict::invalid(format!(
                "record has no {RECORD_ID_FIELD} field"
            )));
        }
        if !self.has_field(&record, DATA_SOURCE_FIELD) {
            return Ok(LineVerdict::invalid(format!(
                "record has no {DATA_SOURCE_FIELD} field"
            )));
        }

        Ok(LineVerdict::Valid)
    }
}
