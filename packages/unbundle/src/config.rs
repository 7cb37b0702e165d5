//! Configuration constants, options and validation functions.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{Result, UnbundleError};
use crate::fhir::DecodeContext;

/// Output directory used when none is given (the current directory).
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Extension of every written file.
pub const OUTPUT_EXTENSION: &str = "json";

/// Log level used when neither `RUST_LOG` nor `--verbose` is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// FHIR id: 1 to 64 letters, digits, `-` or `.`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static RESOURCE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-.]{1,64}$").expect("valid regex"));

/// Check a resource id against the FHIR id rules.
///
/// Valid ids never contain path separators, so they are safe to embed in
/// file names.
///
/// # Examples
/// ```
/// use fhir_unbundle::config::is_valid_resource_id;
///
/// assert!(is_valid_resource_id("abc123"));
/// assert!(is_valid_resource_id("a.b-c"));
/// assert!(!is_valid_resource_id("a/b"));
/// assert!(!is_valid_resource_id(""));
/// ```
#[must_use]
pub fn is_valid_resource_id(id: &str) -> bool {
    RESOURCE_ID_PATTERN.is_match(id)
}

/// Check that `dir` exists and is a directory.
///
/// The output directory is never created.
pub fn validate_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(UnbundleError::OutputDir {
            path: dir.to_path_buf(),
            reason: "does not exist",
        });
    }
    if !dir.is_dir() {
        return Err(UnbundleError::OutputDir {
            path: dir.to_path_buf(),
            reason: "is not a directory",
        });
    }
    Ok(())
}

/// What to do when encoding or writing one entry fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort on the first failing entry.
    #[default]
    FailFast,

    /// Record the failure, continue with the remaining entries, and fail at
    /// the end.
    KeepGoing,
}

/// Options for a single unbundle run.
#[derive(Debug, Clone)]
pub struct UnbundleOptions {
    /// Directory the per-resource files are written to.
    pub output_dir: PathBuf,

    /// Decoding settings.
    pub decode: DecodeContext,

    /// Per-entry failure handling.
    pub failure_policy: FailurePolicy,
}

impl Default for UnbundleOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            decode: DecodeContext::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl UnbundleOptions {
    /// Set the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Set the decode context.
    #[must_use]
    pub fn with_decode_context(mut self, ctx: DecodeContext) -> Self {
        self.decode = ctx;
        self
    }
}
