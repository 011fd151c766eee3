//! Service layer translating API operations into queries over the entity models.
//! - `query` holds the shared filter/aggregate/bulk shapes, generic over any entity.
//! - `db` holds the per-entity services instantiating those shapes.
//! - Validation lives in the `models` crate and is surfaced through `ServiceError`.

pub mod errors;
pub mod query;
pub mod db;
#[cfg(test)]
pub mod test_support;
