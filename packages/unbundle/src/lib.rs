//! fhir-unbundle - Split a FHIR R4 bundle into one file per resource.
//!
//! This crate decodes a FHIR R4 JSON document and, when it is a `Bundle`,
//! writes every contained resource to its own pretty-printed JSON file
//! named `{base}-{resourceType}-{index}-{id}.json`.
//!
//! # Example
//!
//! ```
//! use fhir_unbundle::fhir::{decode, DecodeContext, ResourceKind};
//! use fhir_unbundle::naming::entry_file_name;
//!
//! let doc = decode(br#"{"resourceType":"Patient","id":"abc123"}"#, &DecodeContext::default())
//!     .unwrap();
//! assert_eq!(doc.kind(), ResourceKind::Patient);
//! assert!(doc.as_bundle().is_none());
//!
//! assert_eq!(
//!     entry_file_name("patient-bundle", "Patient", 2, "abc123"),
//!     "patient-bundle-Patient-2-abc123.json"
//! );
//! ```
//!
//! # Architecture
//!
//! - [`fhir`]: FHIR JSON decoding/encoding and the resource type table
//! - [`config`]: Constants, run options and validation
//! - [`error`]: Error types and Result alias
//! - [`naming`]: Output file naming
//! - [`writer`]: Output file writing
//! - [`report`]: Run summary types
//! - [`unbundler`]: Main unbundle service
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod fhir;
pub mod naming;
pub mod report;
pub mod unbundler;
pub mod writer;

// Re-export main functions
pub use unbundler::{unbundle, unbundle_document};

// Re-export commonly used items
pub use config::{FailurePolicy, UnbundleOptions};
pub use error::{Result, UnbundleError};
pub use report::{Outcome, SkipReason, SkippedEntry, UnbundleReport};
