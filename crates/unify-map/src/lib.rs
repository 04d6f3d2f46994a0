#![deny(unsafe_code)]

//! Canonical field resolution.
//!
//! An [`AliasTable`] groups the many spellings providers use for one logical
//! field under a single canonical name. [`FieldResolver`] answers lookups
//! against a loaded table, and [`validate`] checks that no spelling belongs to
//! two canonical fields.

pub mod alias;
pub mod coverage;
pub mod error;
pub mod hash;
pub mod resolver;
pub mod validate;

pub use alias::AliasTable;
pub use coverage::{Coverage, EquivalenceSuggestion, coverage, suggest_equivalents};
pub use error::MapError;
pub use resolver::FieldResolver;
pub use validate::{AliasIssue, AliasReport, validate};
