//! Bundle container types.

use serde_json::{Map, Value};

use super::error::DecodeError;
use super::json::DecodeContext;
use super::kind::ResourceKind;
use super::resource::Resource;

/// A decoded top-level document.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// A `Bundle` whose entries were decoded.
    Bundle(Bundle),

    /// Any other single resource.
    Resource(Resource),
}

impl Document {
    /// Resource type of the top-level value.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Bundle(bundle) => bundle.resource().kind(),
            Self::Resource(resource) => resource.kind(),
        }
    }

    /// The bundle, if this document is one.
    #[must_use]
    pub fn as_bundle(&self) -> Option<&Bundle> {
        match self {
            Self::Bundle(bundle) => Some(bundle),
            Self::Resource(_) => None,
        }
    }
}

/// A FHIR `Bundle` with its entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    resource: Resource,
    entries: Vec<BundleEntry>,
}

impl Bundle {
    /// Decode the entries of an already validated bundle resource.
    pub(crate) fn from_resource(resource: Resource, ctx: &DecodeContext) -> Result<Self, DecodeError> {
        let entries = match resource.body().get("entry") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| BundleEntry::from_json(index, item, ctx))
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(DecodeError::InvalidEntry {
                    index: None,
                    reason: "'entry' must be an array".to_string(),
                })
            }
        };

        Ok(Self { resource, entries })
    }

    /// The bundle itself as a resource.
    #[must_use]
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Entries in stored order.
    #[must_use]
    pub fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }
}

/// One slot of a bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleEntry {
    index: usize,
    resource: Option<EntryResource>,
}

/// The populated case of an entry's resource slot.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryResource {
    /// A resource of a supported type.
    Known(Resource),

    /// A resource whose `resourceType` is missing or not an R4 type.
    Unrecognized { resource_type: Option<String> },
}

impl BundleEntry {
    fn from_json(index: usize, item: &Value, ctx: &DecodeContext) -> Result<Self, DecodeError> {
        let Value::Object(entry) = item else {
            return Err(DecodeError::InvalidEntry {
                index: Some(index),
                reason: "expected an object".to_string(),
            });
        };

        let resource = match entry.get("resource") {
            None | Some(Value::Null) => None,
            Some(Value::Object(body)) => Some(decode_contained(body, ctx)?),
            Some(_) => {
                return Err(DecodeError::InvalidEntry {
                    index: Some(index),
                    reason: "'resource' must be an object".to_string(),
                })
            }
        };

        Ok(Self { index, resource })
    }

    /// Zero-based position within the bundle.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The populated resource case, if any.
    #[must_use]
    pub fn resource(&self) -> Option<&EntryResource> {
        self.resource.as_ref()
    }

    /// The contained resource, when it is of a supported type.
    #[must_use]
    pub fn record(&self) -> Option<&Resource> {
        match &self.resource {
            Some(EntryResource::Known(resource)) => Some(resource),
            _ => None,
        }
    }
}

fn decode_contained(body: &Map<String, Value>, ctx: &DecodeContext) -> Result<EntryResource, DecodeError> {
    let resource_type = body.get("resourceType").and_then(Value::as_str);
    match resource_type.and_then(ResourceKind::from_name) {
        Some(kind) => Ok(EntryResource::Known(Resource::from_json(kind, body.clone(), ctx)?)),
        None => Ok(EntryResource::Unrecognized {
            resource_type: resource_type.map(str::to_string),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle(value: Value) -> Result<Bundle, DecodeError> {
        let Value::Object(body) = value else {
            unreachable!("test input must be an object");
        };
        let ctx = DecodeContext::default();
        let resource = Resource::from_json(ResourceKind::Bundle, body, &ctx)?;
        Bundle::from_resource(resource, &ctx)
    }

    #[test]
    fn test_bundle_without_entries() {
        let bundle = bundle(json!({ "resourceType": "Bundle", "type": "collection" })).unwrap();
        assert!(bundle.entries().is_empty());
    }

    #[test]
    fn test_entries_keep_input_positions() {
        let bundle = bundle(json!({
            "resourceType": "Bundle",
            "entry": [
                { "resource": { "resourceType": "Patient", "id": "p1" } },
                { "fullUrl": "urn:uuid:1" },
                { "resource": { "resourceType": "Starship", "id": "x" } },
                { "resource": { "id": "no-type" } },
                { "resource": { "resourceType": "Observation", "id": "o1" } }
            ]
        }))
        .unwrap();

        let entries = bundle.entries();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].record().map(Resource::id_value), Some("p1"));
        assert!(entries[1].resource().is_none());
        assert_eq!(
            entries[2].resource(),
            Some(&EntryResource::Unrecognized {
                resource_type: Some("Starship".to_string())
            })
        );
        assert_eq!(
            entries[3].resource(),
            Some(&EntryResource::Unrecognized { resource_type: None })
        );
        assert_eq!(entries[4].index(), 4);
        assert_eq!(entries[4].record().map(Resource::kind), Some(ResourceKind::Observation));
    }

    #[test]
    fn test_non_array_entry_is_rejected() {
        let err = bundle(json!({ "resourceType": "Bundle", "entry": {} })).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEntry { index: None, .. }));
    }

    #[test]
    fn test_non_object_entry_is_rejected() {
        let err = bundle(json!({ "resourceType": "Bundle", "entry": [{}, 42] })).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEntry { index: Some(1), .. }));
    }

    #[test]
    fn test_invalid_known_entry_fails_whole_bundle() {
        let err = bundle(json!({
            "resourceType": "Bundle",
            "entry": [{ "resource": { "resourceType": "Patient", "id": "has space" } }]
        }))
        .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidId { .. }));
    }

    #[test]
    fn test_nested_bundle_is_a_plain_record() {
        let bundle = bundle(json!({
            "resourceType": "Bundle",
            "entry": [{ "resource": { "resourceType": "Bundle", "id": "inner", "entry": [] } }]
        }))
        .unwrap();
        let inner = bundle.entries()[0].record().unwrap();
        assert_eq!(inner.kind(), ResourceKind::Bundle);
        assert_eq!(inner.id(), Some("inner"));
    }
}
