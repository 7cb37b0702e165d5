//! FHIR JSON decoding and pretty encoding.

use std::fmt;

use chrono::{FixedOffset, Offset, Utc};
use serde_json::Value;

use super::bundle::{Bundle, Document};
use super::error::{DecodeError, EncodeError};
use super::kind::ResourceKind;
use super::resource::Resource;

/// FHIR release a document is decoded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FhirVersion {
    /// FHIR R4 (4.0.1).
    #[default]
    R4,
}

impl FhirVersion {
    /// Short release name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::R4 => "R4",
        }
    }
}

impl fmt::Display for FhirVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings that affect how input bytes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeContext {
    /// Schema release.
    pub version: FhirVersion,

    /// Timezone applied to dateTime values that carry no offset.
    pub timezone: FixedOffset,
}

impl Default for DecodeContext {
    /// R4 in UTC. The local timezone is deliberately not consulted.
    fn default() -> Self {
        Self {
            version: FhirVersion::R4,
            timezone: Utc.fix(),
        }
    }
}

impl DecodeContext {
    /// Override the timezone for offset-less dateTime values.
    #[must_use]
    pub fn with_timezone(mut self, timezone: FixedOffset) -> Self {
        self.timezone = timezone;
        self
    }
}

/// Decode a FHIR JSON document.
///
/// Returns [`Document::Bundle`] when the top-level resource is a `Bundle`,
/// otherwise [`Document::Resource`]. Any schema violation fails the whole
/// decode.
pub fn decode(bytes: &[u8], ctx: &DecodeContext) -> Result<Document, DecodeError> {
    let value: Value = serde_json::from_slice(bytes)?;

    let body = match value {
        Value::Object(body) => body,
        other => {
            return Err(DecodeError::NotAnObject {
                found: json_type_name(&other),
            })
        }
    };

    let name = body
        .get("resourceType")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingResourceType)?;
    let kind = ResourceKind::from_name(name)
        .ok_or_else(|| DecodeError::UnknownResourceType(name.to_string()))?;

    let resource = Resource::from_json(kind, body, ctx)?;
    if kind.is_bundle() {
        Ok(Document::Bundle(Bundle::from_resource(resource, ctx)?))
    } else {
        Ok(Document::Resource(resource))
    }
}

/// Encode a single resource as indented JSON with a trailing newline.
///
/// Field order follows the decoded input.
pub fn encode_pretty(resource: &Resource) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = serde_json::to_vec_pretty(resource.body()).map_err(|source| EncodeError {
        kind: resource.kind().to_string(),
        source,
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
