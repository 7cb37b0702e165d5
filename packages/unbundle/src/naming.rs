//! Output file naming.
//!
//! Every resource is written to `{base}-{kind}-{index}-{id}.json`, where
//! `base` is the input file name without its extension and `index` is the
//! entry's position in the bundle. Names are built as `OsString` so the
//! bytes of the input name carry over unchanged.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::config::OUTPUT_EXTENSION;
use crate::fhir::Resource;

/// Input file name with everything from its last `.` removed.
///
/// A name whose only dot is the leading one is all extension, so its base
/// is empty.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use fhir_unbundle::naming::base_name;
///
/// assert_eq!(base_name(Path::new("data/patient-bundle.json")), "patient-bundle");
/// assert_eq!(base_name(Path::new("bundle.fhir.json")), "bundle.fhir");
/// assert_eq!(base_name(Path::new("bundle")), "bundle");
/// assert_eq!(base_name(Path::new(".bundle")), "");
/// ```
#[must_use]
pub fn base_name(input: &Path) -> OsString {
    let Some(name) = input.file_name() else {
        return OsString::new();
    };
    match input.extension() {
        Some(_) => input.file_stem().map(OsStr::to_os_string).unwrap_or_default(),
        None if name.as_encoded_bytes().starts_with(b".") => OsString::new(),
        None => name.to_os_string(),
    }
}

/// File name for one entry.
///
/// # Examples
/// ```
/// use fhir_unbundle::naming::entry_file_name;
///
/// assert_eq!(
///     entry_file_name("patient-bundle", "Patient", 2, "abc123"),
///     "patient-bundle-Patient-2-abc123.json"
/// );
/// ```
#[must_use]
pub fn entry_file_name(base: impl AsRef<OsStr>, kind: &str, index: usize, id: &str) -> OsString {
    let mut name = base.as_ref().to_os_string();
    name.push(format!("-{kind}-{index}-{id}.{OUTPUT_EXTENSION}"));
    name
}

/// Full output path for a resource at `index`.
#[must_use]
pub fn entry_path(output_dir: &Path, base: &OsStr, index: usize, resource: &Resource) -> PathBuf {
    output_dir.join(entry_file_name(
        base,
        resource.kind().as_str(),
        index,
        resource.id_value(),
    ))
}
