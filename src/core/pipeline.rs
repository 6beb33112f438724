use std::fmt;
use std::io::BufRead;
use tracing::warn;

use crate::builders::validator::{LineVerdict, RecordValidator};
use crate::core::error::ValidateError;

/// The bucket an invalid line is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MissingRecordId,
    MissingDataSource,
    Malformed,
    OtherInvalid,
}

impl FailureKind {
    /// Classifies a validator's reason text.
    ///
    /// Rules are tried in order and the first match wins, so a reason that
    /// mentions both `RECORD_ID` and `DATA_SOURCE` is a missing record id.
    pub fn classify(reason: Option<&str>) -> Self {
        match reason {
            Some(r) if r.contains("RECORD_ID") => FailureKind::MissingRecordId,
            Some(r) if r.contains("DATA_SOURCE") => FailureKind::MissingDataSource,
            Some(r) if r.contains("not well formed") => FailureKind::Malformed,
            _ => FailureKind::OtherInvalid,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingRecordId => write!(f, "missing-record-id"),
            FailureKind::MissingDataSource => write!(f, "missing-data-source"),
            FailureKind::Malformed => write!(f, "malformed"),
            FailureKind::OtherInvalid => write!(f, "other-invalid"),
        }
    }
}

/// Counters produced by one validation run.
///
/// `total_lines` includes blank lines. Each invalid line increments exactly
/// one of the four failure counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ValidationTally {
    pub total_lines: u64,
    pub missing_record_id: u64,
    pub missing_data_source: u64,
    pub malformed: u64,
    pub other_invalid: u64,
}

impl ValidationTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one invalid line in its bucket.
    pub fn record(&mut self, kind: FailureKind) {
        match kind {
            FailureKind::MissingRecordId => self.missing_record_id += 1,
            FailureKind::MissingDataSource => self.missing_data_source += 1,
            FailureKind::Malformed => self.malformed += 1,
            FailureKind::OtherInvalid => self.other_invalid += 1,
        }
    }

    /// Number of lines that failed validation for any reason.
    pub fn bad_lines(&self) -> u64 {
        self.missing_record_id + self.missing_data_source + self.malformed + self.other_invalid
    }

    pub fn count(&self, kind: FailureKind) -> u64 {
        match kind {
            FailureKind::MissingRecordId => self.missing_record_id,
            FailureKind::MissingDataSource => self.missing_data_source,
            FailureKind::Malformed => self.malformed,
            FailureKind::OtherInvalid => self.other_invalid,
        }
    }
}

/// Streams `reader` line by line through `validator` and returns the tally.
///
/// Invalid lines never stop the scan. The run is aborted only when reading
/// the stream fails or the validator itself returns an error.
///
/// # Arguments
/// * `reader`: A buffered byte stream positioned at its start. It is consumed.
/// * `validator`: The record check applied to every non-blank line.
///
/// # Returns
/// The final `ValidationTally`, or the `ValidateError` that aborted the scan.
pub fn validate_lines<R, V>(mut reader: R, validator: &V) -> Result<ValidationTally, ValidateError>
where
    R: BufRead,
    V: RecordValidator + ?Sized,
{
    let mut tally = ValidationTally::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| ValidateError::Read {
                line: tally.total_lines + 1,
                source,
            })?;
        if read == 0 {
            break;
        }

        tally.total_lines += 1;
        let text = String::from_utf8_lossy(&buf);
        let line = text.trim();
        if line.is_empty() {
            continue;
        }

        let verdict = validator
            .validate(line)
            .map_err(|e| ValidateError::ValidatorFault {
                line: tally.total_lines,
                message: format!("{e:#}"),
            })?;

        if let LineVerdict::Invalid(reason) = verdict {
            let kind = FailureKind::classify(reason.as_deref());
            warn!(
                msg_id = 2001,
                line = tally.total_lines,
                kind = %kind,
                "Line {} {}",
                tally.total_lines,
                reason.as_deref().unwrap_or("failed validation")
            );
            tally.record(kind);
        }
    }

    Ok(tally)
}
