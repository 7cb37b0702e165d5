//! Generic accessor over every FHIR resource type.
//!
//! A [`Resource`] keeps the decoded JSON body untouched for re-encoding and
//! lifts out the few fields every resource shares: `resourceType`, `id` and
//! `meta`.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::DecodeError;
use super::json::DecodeContext;
use super::kind::ResourceKind;
use crate::config::is_valid_resource_id;

/// Resource metadata (`Resource.meta`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    /// Version specific identifier.
    pub version_id: Option<String>,

    /// When the resource version last changed.
    pub last_updated: Option<DateTime<FixedOffset>>,
}

/// Wire shape of the `meta` fields this crate reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeta {
    version_id: Option<String>,
    last_updated: Option<String>,
}

impl Meta {
    fn from_json(kind: ResourceKind, value: &Value, ctx: &DecodeContext) -> Result<Self, DecodeError> {
        let raw = RawMeta::deserialize(value).map_err(|e| DecodeError::InvalidMeta {
            kind: kind.to_string(),
            reason: e.to_string(),
        })?;

        let last_updated = raw
            .last_updated
            .map(|s| {
                parse_date_time(&s, ctx.timezone).ok_or_else(|| DecodeError::InvalidInstant {
                    kind: kind.to_string(),
                    value: s.clone(),
                })
            })
            .transpose()?;

        Ok(Self {
            version_id: raw.version_id,
            last_updated,
        })
    }
}

/// Parse a FHIR dateTime with seconds.
///
/// Values without an offset are taken to be in `timezone`.
fn parse_date_time(value: &str, timezone: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    timezone.from_local_datetime(&naive).single()
}

/// One decoded FHIR resource of any kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    kind: ResourceKind,
    id: Option<String>,
    meta: Option<Meta>,
    body: Map<String, Value>,
}

impl Resource {
    /// Build a resource of a known kind from its JSON object.
    ///
    /// Validates `id` and `meta`; every other field is kept as-is.
    pub(crate) fn from_json(
        kind: ResourceKind,
        body: Map<String, Value>,
        ctx: &DecodeContext,
    ) -> Result<Self, DecodeError> {
        let id = match body.get("id") {
            None => None,
            Some(Value::String(id)) if is_valid_resource_id(id) => Some(id.clone()),
            Some(other) => {
                return Err(DecodeError::InvalidId {
                    kind: kind.to_string(),
                    value: other.to_string(),
                })
            }
        };

        let meta = match body.get("meta") {
            None => None,
            Some(value @ Value::Object(_)) => Some(Meta::from_json(kind, value, ctx)?),
            Some(_) => {
                return Err(DecodeError::InvalidMeta {
                    kind: kind.to_string(),
                    reason: "expected an object".to_string(),
                })
            }
        };

        Ok(Self { kind, id, meta, body })
    }

    /// Resource type.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Logical id, if the resource has one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Logical id, or the empty string when absent.
    #[must_use]
    pub fn id_value(&self) -> &str {
        self.id().unwrap_or_default()
    }

    /// Resource metadata, if present.
    #[must_use]
    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    /// The full JSON body, `resourceType` included.
    #[must_use]
    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test input must be an object"),
        }
    }

    #[test]
    fn test_resource_accessors() {
        let body = object(json!({
            "resourceType": "Patient",
            "id": "abc123",
            "meta": { "versionId": "2", "lastUpdated": "2024-03-01T10:00:00Z" },
            "active": true
        }));
        let resource =
            Resource::from_json(ResourceKind::Patient, body, &DecodeContext::default()).unwrap();

        assert_eq!(resource.kind(), ResourceKind::Patient);
        assert_eq!(resource.id(), Some("abc123"));
        let meta = resource.meta().unwrap();
        assert_eq!(meta.version_id.as_deref(), Some("2"));
        assert_eq!(
            meta.last_updated.unwrap().to_rfc3339(),
            "2024-03-01T10:00:00+00:00"
        );
        assert_eq!(resource.body()["active"], json!(true));
    }

    #[test]
    fn test_missing_id_is_empty_value() {
        let body = object(json!({ "resourceType": "Observation" }));
        let resource =
            Resource::from_json(ResourceKind::Observation, body, &DecodeContext::default()).unwrap();
        assert_eq!(resource.id(), None);
        assert_eq!(resource.id_value(), "");
        assert!(resource.meta().is_none());
    }

    #[test]
    fn test_rejects_id_with_path_separator() {
        let body = object(json!({ "resourceType": "Patient", "id": "../etc" }));
        let err = Resource::from_json(ResourceKind::Patient, body, &DecodeContext::default())
            .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidId { .. }));
    }

    #[test]
    fn test_rejects_numeric_id() {
        let body = object(json!({ "resourceType": "Patient", "id": 7 }));
        let err = Resource::from_json(ResourceKind::Patient, body, &DecodeContext::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid id 7 on Patient resource");
    }

    #[test]
    fn test_rejects_non_object_meta() {
        let body = object(json!({ "resourceType": "Patient", "meta": "x" }));
        let err = Resource::from_json(ResourceKind::Patient, body, &DecodeContext::default())
            .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidMeta { .. }));
    }

    #[test]
    fn test_rejects_bad_last_updated() {
        let body = object(json!({
            "resourceType": "Patient",
            "meta": { "lastUpdated": "yesterday" }
        }));
        let err = Resource::from_json(ResourceKind::Patient, body, &DecodeContext::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid lastUpdated 'yesterday' on Patient resource");
    }

    #[test]
    fn test_offsetless_date_time_uses_context_timezone() {
        let utc = parse_date_time("2024-03-01T10:00:00", DecodeContext::default().timezone).unwrap();
        assert_eq!(utc.to_rfc3339(), "2024-03-01T10:00:00+00:00");

        let cet = FixedOffset::east_opt(3600).unwrap();
        let local = parse_date_time("2024-03-01T10:00:00.5", cet).unwrap();
        assert_eq!(local.to_rfc3339(), "2024-03-01T10:00:00.500+01:00");
    }

    #[test]
    fn test_offset_in_value_wins_over_context() {
        let cet = FixedOffset::east_opt(3600).unwrap();
        let dt = parse_date_time("2015-02-07T13:28:17.239+02:00", cet).unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 7200);
    }
}
