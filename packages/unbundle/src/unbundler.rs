//! Main unbundle service that ties decoding, naming and writing together.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use crate::config::{validate_output_dir, FailurePolicy, UnbundleOptions};
use crate::error::{Result, UnbundleError};
use crate::fhir::{decode, encode_pretty, Bundle, Document, Resource};
use crate::naming::{base_name, entry_path};
use crate::report::{FailedEntry, Outcome, SkipReason, SkippedEntry, UnbundleReport};
use crate::writer::write_file;

/// Split the bundle at `input` into one file per contained resource.
///
/// # Arguments
/// * `input` - Path to a FHIR R4 JSON document
/// * `options` - Output directory, decode context and failure policy
///
/// # Returns
/// A report of written, skipped and failed entries. A document that is not
/// a bundle yields [`Outcome::NotABundle`] and writes nothing.
#[tracing::instrument(skip_all, fields(input = %input.display()))]
pub fn unbundle(input: &Path, options: &UnbundleOptions) -> Result<UnbundleReport> {
    validate_output_dir(&options.output_dir)?;

    let bytes = fs::read(input).map_err(|source| UnbundleError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let document = decode(&bytes, &options.decode).map_err(|source| UnbundleError::Decode {
        path: input.to_path_buf(),
        source,
    })?;
    tracing::info!(kind = %document.kind(), version = %options.decode.version, "Decoded input");

    unbundle_document(&document, base_name(input), options)
}

/// Split an already decoded document.
///
/// `base` is the prefix of every output file name.
///
/// When entries fail under [`FailurePolicy::KeepGoing`], the full report is
/// returned inside [`UnbundleError::EntriesFailed`].
pub fn unbundle_document(
    document: &Document,
    base: impl AsRef<OsStr>,
    options: &UnbundleOptions,
) -> Result<UnbundleReport> {
    let Document::Bundle(bundle) = document else {
        tracing::info!(kind = %document.kind(), "Not a bundle, nothing to unbundle");
        return Ok(UnbundleReport::new(Outcome::NotABundle {
            kind: document.kind(),
        }));
    };

    let report = unbundle_entries(bundle, base, options)?;

    if !report.failed.is_empty() {
        for failure in &report.failed {
            tracing::warn!(index = failure.index, "Entry failed: {}", failure.error);
        }
        return Err(UnbundleError::EntriesFailed {
            report: Box::new(report),
        });
    }

    Ok(report)
}

/// Walk the entries of `bundle`, writing each supported resource.
///
/// Unlike [`unbundle_document`], per-entry failures under
/// [`FailurePolicy::KeepGoing`] stay in the returned report instead of
/// turning into an error.
pub fn unbundle_entries(
    bundle: &Bundle,
    base: impl AsRef<OsStr>,
    options: &UnbundleOptions,
) -> Result<UnbundleReport> {
    let base = base.as_ref();
    let entries = bundle.entries();
    tracing::info!(entries = entries.len(), "Unbundling");

    let mut report = UnbundleReport::new(Outcome::Unbundled {
        entries: entries.len(),
    });

    for entry in entries {
        let index = entry.index();

        let Some(resource) = entry.record() else {
            let reason = SkipReason::from_entry(entry.resource());
            tracing::warn!(index, "Skipping entry: {reason}");
            report.skipped.push(SkippedEntry { index, reason });
            continue;
        };

        let path = entry_path(&options.output_dir, base, index, resource);
        match write_entry(index, resource, &path) {
            Ok(()) => {
                tracing::debug!(index, path = %path.display(), "Wrote {}", resource.kind());
                report.written.push(path);
            }
            Err(error) => match options.failure_policy {
                FailurePolicy::FailFast => return Err(error),
                FailurePolicy::KeepGoing => {
                    report.failed.push(FailedEntry { index, path, error });
                }
            },
        }
    }

    Ok(report)
}

fn write_entry(index: usize, resource: &Resource, path: &Path) -> Result<()> {
    let bytes = encode_pretty(resource).map_err(|source| UnbundleError::Encode { index, source })?;
    write_file(path, &bytes)
}
