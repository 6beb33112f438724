use clap::ValueEnum;
use flate2::read::MultiGzDecoder;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Read};
use std::path::PathBuf;
use tracing::{debug, warn};
use url::{ParseError, Url};

use crate::core::error::ValidateError;

/// Shortest locator that can carry a scheme and a path: `s://p`.
pub const MIN_LOCATOR_LEN: usize = 5;

/// Explicit file type given with `--file-type`, overriding the extension check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
pub enum FileType {
    #[value(name = "JSONL")]
    #[serde(rename = "JSONL", alias = "jsonl", alias = "Jsonl")]
    Jsonl,
    #[value(name = "GZ")]
    #[serde(rename = "GZ", alias = "gz", alias = "Gz")]
    Gz,
}

/// Where the bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Stdin,
    File(PathBuf),
    Http(Url),
    Https(Url),
}

/// How the bytes are turned into lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Plain,
    Gzip,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Plain => write!(f, "JSONL"),
            Encoding::Gzip => write!(f, "gzip-compressed JSONL"),
        }
    }
}

/// A resolved input: the source kind and the decoding path, decided once
/// before any I/O happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub locator: String,
    pub kind: SourceKind,
    pub encoding: Encoding,
}

impl SourceDescriptor {
    /// Resolves `locator` against the real standard input.
    ///
    /// An empty locator means "read standard input", which is only accepted
    /// when stdin is piped so the tool never blocks on a terminal.
    pub fn resolve(locator: &str, file_type: Option<FileType>) -> Result<Self, ValidateError> {
        Self::resolve_with(locator, file_type, io::stdin().is_terminal())
    }

    /// Same as [`SourceDescriptor::resolve`] with the terminal check supplied
    /// by the caller.
    pub fn resolve_with(
        locator: &str,
        file_type: Option<FileType>,
        stdin_is_terminal: bool,
    ) -> Result<Self, ValidateError> {
        if locator.is_empty() {
            if stdin_is_terminal {
                return Err(ValidateError::NoPipe);
            }
            if file_type == Some(FileType::Gz) {
                warn!(msg_id = 1004, "standard input is read as plain JSONL; ignoring --file-type GZ");
            }
            return Ok(Self {
                locator: "-".to_string(),
                kind: SourceKind::Stdin,
                encoding: Encoding::Plain,
            });
        }

        if locator.len() < MIN_LOCATOR_LEN {
            return Err(ValidateError::InvalidLocator(locator.to_string()));
        }

        // A bare path has no scheme at all, which is reported like any other
        // scheme we can't read.
        let url = Url::parse(locator).map_err(|e| match e {
            ParseError::RelativeUrlWithoutBase => ValidateError::UnsupportedScheme {
                scheme: String::new(),
            },
            _ => ValidateError::InvalidLocator(locator.to_string()),
        })?;

        let path = url.path().to_string();
        let kind = match url.scheme() {
            "file" => {
                let file_path = url
                    .to_file_path()
                    .map_err(|_| ValidateError::InvalidLocator(locator.to_string()))?;
                SourceKind::File(file_path)
            }
            "http" => SourceKind::Http(url),
            "https" => SourceKind::Https(url),
            other => {
                return Err(ValidateError::UnsupportedScheme {
                    scheme: other.to_string(),
                });
            }
        };

        let encoding = select_encoding(&path, file_type).ok_or_else(|| {
            ValidateError::UnrecognizedType {
                locator: locator.to_string(),
            }
        })?;

        Ok(Self {
            locator: locator.to_string(),
            kind,
            encoding,
        })
    }

    /// Opens the source and returns a line-ready reader.
    ///
    /// The returned reader owns the file handle, HTTP body and decoder, so
    /// dropping it releases all of them.
    pub fn open(&self) -> Result<Box<dyn BufRead>, ValidateError> {
        let raw: Box<dyn Read> = match &self.kind {
            SourceKind::Stdin => return Ok(Box::new(io::stdin().lock())),
            SourceKind::File(path) => {
                debug!(path = %path.display(), "opening local file");
                let file = File::open(path).map_err(|e| self.open_error(e))?;
                Box::new(file)
            }
            SourceKind::Http(url) | SourceKind::Https(url) => {
                debug!(url = %url, "requesting remote resource");
                let response = http_client()
                    .and_then(|client| client.get(url.clone()).send())
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| self.open_error(e))?;
                Box::new(response)
            }
        };

        Ok(match self.encoding {
            Encoding::Plain => Box::new(BufReader::new(raw)),
            Encoding::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(raw))),
        })
    }

    fn open_error(&self, reason: impl fmt::Display) -> ValidateError {
        ValidateError::SourceOpen {
            locator: self.locator.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Blocking client without the default request timeout: a slow body is read
/// until EOF rather than abandoned.
fn http_client() -> reqwest::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder().timeout(None).build()
}

/// Picks the decoding path. The JSONL rule is checked before the gzip rule,
/// so an explicit `JSONL` override wins over a `.gz` extension.
fn select_encoding(path: &str, file_type: Option<FileType>) -> Option<Encoding> {
    if path.ends_with(".jsonl") || file_type == Some(FileType::Jsonl) {
        Some(Encoding::Plain)
    } else if path.ends_with(".gz") || file_type == Some(FileType::Gz) {
        Some(Encoding::Gzip)
    } else {
        None
    }
}
