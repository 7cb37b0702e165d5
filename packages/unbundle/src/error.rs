//! Error types for the unbundler.
//!
//! Uses the dual-error pattern: `UnbundleError` for library consumers and
//! the CLI, with `DecodeError`/`EncodeError` from the codec boundary kept as
//! sources.

use std::path::PathBuf;

use thiserror::Error;

use crate::fhir::{DecodeError, EncodeError};
use crate::report::UnbundleReport;

/// Main error type for the unbundler library.
#[derive(Debug, Error)]
pub enum UnbundleError {
    /// Input file missing or unreadable.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not a valid FHIR R4 JSON document.
    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    /// Output directory unusable.
    #[error("Output directory {} {reason}", .path.display())]
    OutputDir { path: PathBuf, reason: &'static str },

    /// A single resource could not be encoded.
    #[error("Failed to encode entry {index}: {source}")]
    Encode {
        index: usize,
        #[source]
        source: EncodeError,
    },

    /// An output file could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Some entries failed while continuing past failures.
    ///
    /// Carries the full report so callers can still show what was written.
    #[error("{} of {} entries failed to unbundle", .report.failed.len(), .report.total_entries())]
    EntriesFailed { report: Box<UnbundleReport> },
}

/// Result type alias for unbundle operations.
pub type Result<T> = std::result::Result<T, UnbundleError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{FailedEntry, Outcome};

    #[test]
    fn test_output_dir_display() {
        let err = UnbundleError::OutputDir {
            path: PathBuf::from("out"),
            reason: "does not exist",
        };
        assert_eq!(err.to_string(), "Output directory out does not exist");
    }

    #[test]
    fn test_read_display_includes_path() {
        let err = UnbundleError::Read {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "Failed to read missing.json: not found");
    }

    #[test]
    fn test_entries_failed_display() {
        let mut report = UnbundleReport::new(Outcome::Unbundled { entries: 5 });
        for index in [1, 3] {
            report.failed.push(FailedEntry {
                index,
                path: PathBuf::from(format!("b-Patient-{index}-p.json")),
                error: UnbundleError::OutputDir {
                    path: PathBuf::from("out"),
                    reason: "does not exist",
                },
            });
        }
        let err = UnbundleError::EntriesFailed {
            report: Box::new(report),
        };
        assert_eq!(err.to_string(), "2 of 5 entries failed to unbundle");
    }
}
