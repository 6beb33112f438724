use anyhow::Result;
use std::io::Write;

use crate::core::pipeline::{FailureKind, ValidationTally};

/// Summary text for one failure bucket, or `None` when nothing failed that way.
fn category_line(kind: FailureKind, count: u64) -> Option<String> {
    if count == 0 {
        return None;
    }
    let text = match kind {
        FailureKind::MissingRecordId => "had no RECORD_ID field.",
        FailureKind::MissingDataSource => "had no DATA_SOURCE field.",
        FailureKind::Malformed => "are not well formed JSON-lines.",
        FailureKind::OtherInvalid => "did not validate for an unknown reason.",
    };
    Some(format!("{count} line(s) {text}"))
}

/// Renders the tally as the lines of the final summary.
///
/// Categories with a zero count are left out. The last line always gives
/// the total and the number of bad lines.
pub fn summary_lines(tally: &ValidationTally) -> Vec<String> {
    let mut lines: Vec<String> = [
        FailureKind::MissingRecordId,
        FailureKind::MissingDataSource,
        FailureKind::Malformed,
        FailureKind::OtherInvalid,
    ]
    .into_iter()
    .filter_map(|kind| category_line(kind, tally.count(kind)))
    .collect();

    lines.push(format!(
        "Validated {} lines, {} were bad.",
        tally.total_lines,
        tally.bad_lines()
    ));
    lines
}

pub trait SummaryReporter {
    fn report(&mut self, tally: &ValidationTally) -> Result<()>;
}

/// A concrete implementation of `SummaryReporter` that writes the summary
/// to any output stream. The binary hands it stdout.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    /// Constructs a new `ConsoleReporter` writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SummaryReporter for ConsoleReporter<W> {
    fn report(&mut self, tally: &ValidationTally) -> Result<()> {
        for line in summary_lines(tally) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}
