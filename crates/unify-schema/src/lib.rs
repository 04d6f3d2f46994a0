#![deny(unsafe_code)]

//! Schema builder and field catalog.
//!
//! [`SchemaBuilder`] folds parsed interface schemas through a
//! [`unify_map::FieldResolver`] into a [`FieldCatalog`]: canonical fields with
//! their spellings, types, and interfaces, plus per-interface
//! original-to-canonical maps. The catalog is saved as JSON and loaded
//! read-only by the orchestrator.

pub mod builder;
pub mod catalog;
pub mod error;
pub mod type_map;
pub mod views;

pub use builder::{PLACEHOLDER_NAMES, SchemaBuilder};
pub use catalog::{AliasConflict, CATALOG_VERSION, FieldCatalog};
pub use error::SchemaError;
pub use type_map::normalize_type_label;
pub use views::{
    ArtifactPaths, FIELD_TABLE_FILE, FieldRow, INTERFACE_TABLE_FILE, InterfaceRow, MAPPING_FILE,
    write_artifacts, write_csv,
};
