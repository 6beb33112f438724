use tracing::info;

use crate::builders::validator::RecordValidator;
use crate::core::error::ValidateError;
use crate::core::pipeline::{ValidationTally, validate_lines};
use crate::core::source::{Encoding, SourceDescriptor, SourceKind};

/// One pass over one source.
///
/// The stream is opened inside [`ValidationRun::execute`] and dropped when it
/// returns, on success and on every error path alike.
pub struct ValidationRun {
    descriptor: SourceDescriptor,
}

impl ValidationRun {
    pub fn new(descriptor: SourceDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn execute<V>(&self, validator: &V) -> Result<ValidationTally, ValidateError>
    where
        V: RecordValidator + ?Sized,
    {
        let descriptor = &self.descriptor;
        let what = match descriptor.kind {
            SourceKind::Stdin => "standard input",
            SourceKind::File(_) => "file",
            SourceKind::Http(_) | SourceKind::Https(_) => "resource",
        };
        info!(msg_id = 1001, locator = %descriptor.locator, "Validating URL string: {}", descriptor.locator);
        info!(msg_id = 1002, encoding = %descriptor.encoding, "Validating {} as {}.", what, descriptor.encoding);

        let reader = descriptor.open()?;
        let tally = validate_lines(reader, validator).map_err(|e| match (e, descriptor.encoding) {
            (ValidateError::Read { line, source }, Encoding::Gzip) => {
                ValidateError::Decompression { line, source }
            }
            (e, _) => e,
        })?;

        info!(
            msg_id = 2002,
            total = tally.total_lines,
            bad = tally.bad_lines(),
            "validation run complete"
        );
        Ok(tally)
    }
}
