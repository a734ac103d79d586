//! Event records and the training-time schema
//!
//! Input parsing and range checks for a single submission, plus the column
//! layout and vocabulary the trained artifacts were fitted on.

pub mod record;
pub mod schema;

pub use record::{EventRecord, FieldValue};
pub use schema::SchemaRegistry;
