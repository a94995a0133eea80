use thiserror::Error;

use crate::store::EntityId;

/// Errors raised while mapping an XML record to a domain object.
///
/// Only `Storage` and `NameClash` can surface after a record has touched the
/// store; the rest are produced during `load`. Duplicate detection is not an
/// error at all - it is a counted outcome (see `ProcessingResult`).
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed value \"{text}\" for field {field} in {record} record: {detail}")]
    Parse {
        record: &'static str,
        field: &'static str,
        text: String,
        detail: String,
    },

    #[error("required field {field} missing from {record} record")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("schema violation in {record} record: {detail}")]
    SchemaViolation {
        record: &'static str,
        detail: String,
    },

    #[error("unknown tag <{tag}> in coding {coding}")]
    UnknownTag { coding: String, tag: String },

    #[error("could not store {record} record \"{name}\": {source}")]
    Storage {
        record: &'static str,
        name: String,
        source: StoreError,
    },

    #[error("could not find a non-clashing name for \"{name}\" after {attempts} attempts")]
    NameClash { name: String, attempts: u32 },
}

/// Errors reported by an object store collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no entity with id {0}")]
    NotFound(EntityId),

    #[error("store rejected the entity: {0}")]
    Rejected(String),
}
