#![deny(unsafe_code)]

//! Unification orchestrator.
//!
//! The [`Unifier`] translates caller parameters into an interface's native
//! spellings and re-keys provider records onto canonical names, normalizing
//! values on the way through an ordered [`RuleSet`].
//!
//! # Example
//!
//! ```ignore
//! use unify_core::Unifier;
//!
//! let unifier = Unifier::open(Path::new("result/complete_field_mapping.json"), None)?;
//! let params = unifier.unify_input("stock_zh_a_hist", &params)?;
//! let output = unifier.unify_output("stock_zh_a_hist", records)?;
//! ```

mod error;
mod options;
pub mod rules;
mod unifier;

pub use error::UnifyError;
pub use options::UnifyOptions;
pub use rules::{RuleKind, RuleSet, ValueRule};
pub use unifier::{UnifiedOutput, Unifier};
