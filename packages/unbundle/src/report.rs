//! Outcome of an unbundle run.

use std::fmt;
use std::path::PathBuf;

use crate::error::UnbundleError;
use crate::fhir::{EntryResource, ResourceKind};

/// What the top-level document turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The input was a bundle with `entries` entries.
    Unbundled { entries: usize },

    /// The input was a single resource; nothing was written.
    NotABundle { kind: ResourceKind },
}

/// Why an entry produced no file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry carries no resource.
    Empty,

    /// The entry's resource has no `resourceType`.
    MissingResourceType,

    /// The entry's resource type is not supported.
    UnknownResourceType(String),
}

impl SkipReason {
    pub(crate) fn from_entry(resource: Option<&EntryResource>) -> Self {
        match resource {
            Some(EntryResource::Unrecognized {
                resource_type: Some(name),
            }) => Self::UnknownResourceType(name.clone()),
            Some(EntryResource::Unrecognized {
                resource_type: None,
            }) => Self::MissingResourceType,
            // Known resources are never skipped
            None | Some(EntryResource::Known(_)) => Self::Empty,
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("entry has no resource"),
            Self::MissingResourceType => f.write_str("resource has no resourceType"),
            Self::UnknownResourceType(name) => write!(f, "unsupported resource type '{name}'"),
        }
    }
}

/// An entry that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Position in the bundle.
    pub index: usize,

    /// Why it was skipped.
    pub reason: SkipReason,
}

/// An entry whose encode or write failed while continuing past failures.
#[derive(Debug)]
pub struct FailedEntry {
    /// Position in the bundle.
    pub index: usize,

    /// The file the entry would have been written to.
    pub path: PathBuf,

    /// The underlying error.
    pub error: UnbundleError,
}

/// Summary of one run.
#[derive(Debug)]
pub struct UnbundleReport {
    /// Top-level result.
    pub outcome: Outcome,

    /// Written files, in entry order.
    pub written: Vec<PathBuf>,

    /// Entries that were skipped.
    pub skipped: Vec<SkippedEntry>,

    /// Entries that failed.
    pub failed: Vec<FailedEntry>,
}

impl UnbundleReport {
    pub(crate) fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            written: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Whether the input was a bundle.
    #[must_use]
    pub fn is_bundle(&self) -> bool {
        matches!(self.outcome, Outcome::Unbundled { .. })
    }

    /// Total entries in the bundle (0 when not a bundle).
    #[must_use]
    pub fn total_entries(&self) -> usize {
        match self.outcome {
            Outcome::Unbundled { entries } => entries,
            Outcome::NotABundle { .. } => 0,
        }
    }
}
