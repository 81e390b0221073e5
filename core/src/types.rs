//! Domain types for the entity API.
//!
//! Records are opaque to this crate: the backend owns their schema, so a
//! record is carried as a parsed JSON value. Callers that know the shape can
//! decode into their own types through the `*_as` methods.

/// Entity name of the dart report resource.
pub const DART_REPORT: &str = "dart_report";

/// Identifier of a single record. Not validated locally.
pub type RecordId = i64;

/// One record of an entity, as returned by the backend.
pub type Record = serde_json::Value;
