//! Errors raised at the FHIR JSON codec boundary.

use thiserror::Error;

/// Input bytes are not a valid FHIR R4 JSON document.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Bytes are not well-formed JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level JSON value is not an object.
    #[error("expected a JSON object at the top level, found {found}")]
    NotAnObject { found: &'static str },

    /// Top-level object has no string `resourceType`.
    #[error("missing or non-string 'resourceType'")]
    MissingResourceType,

    /// Top-level `resourceType` is not an R4 resource type.
    #[error("unknown resource type '{0}'")]
    UnknownResourceType(String),

    /// Resource id does not satisfy the FHIR id rules.
    #[error("invalid id {value} on {kind} resource")]
    InvalidId { kind: String, value: String },

    /// Resource `meta` is not an object or has ill-typed fields.
    #[error("invalid meta on {kind} resource: {reason}")]
    InvalidMeta { kind: String, reason: String },

    /// `meta.lastUpdated` is not a valid dateTime.
    #[error("invalid lastUpdated '{value}' on {kind} resource")]
    InvalidInstant { kind: String, value: String },

    /// Bundle `entry` is not an array of objects.
    #[error("invalid bundle entry{}: {reason}", .index.map(|i| format!(" {i}")).unwrap_or_default())]
    InvalidEntry { index: Option<usize>, reason: String },
}

/// A resource could not be serialized back to JSON.
#[derive(Debug, Error)]
#[error("failed to encode {kind} resource: {source}")]
pub struct EncodeError {
    pub kind: String,
    #[source]
    pub source: serde_json::Error,
}
