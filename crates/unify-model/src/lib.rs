//! Shared data model for the field unification workspace.
//!
//! - **field**: documentation table rows and the closed set of field types
//! - **interface**: parsed interface schemas and their original-to-canonical maps
//! - **canonical**: the canonical field projection persisted by the schema builder
//! - **record**: provider records in single-mapping or tabular shape

pub mod canonical;
pub mod field;
pub mod interface;
pub mod record;

pub use canonical::{CanonicalField, TypeHistogram};
pub use field::{FieldSpec, FieldType};
pub use interface::{Direction, InterfaceFieldMap, InterfaceSchema};
pub use record::{Record, RecordSet, RecordShape};
