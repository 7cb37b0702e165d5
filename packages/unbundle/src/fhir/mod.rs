//! FHIR R4 JSON codec boundary.
//!
//! Decodes raw bytes into a [`Document`] and encodes single resources back
//! to JSON. Resource bodies are carried as opaque JSON; only `resourceType`,
//! `id`, `meta` and bundle entries are interpreted.

mod bundle;
mod error;
mod json;
mod kind;
mod resource;

pub use bundle::{Bundle, BundleEntry, Document, EntryResource};
pub use error::{DecodeError, EncodeError};
pub use json::{decode, encode_pretty, DecodeContext, FhirVersion};
pub use kind::ResourceKind;
pub use resource::{Meta, Resource};
