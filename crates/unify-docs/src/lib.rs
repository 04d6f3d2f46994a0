//! Interface documentation parsing.
//!
//! A documentation unit is semi-structured text describing many interfaces.
//! Each interface starts with a labelled header block (name, target, description,
//! optional limit) followed by an input-parameter table and one or more
//! output-parameter tables in pipe-delimited form.

pub mod discovery;
pub mod error;
pub mod labels;
pub mod parser;
pub mod table;

pub use discovery::{DocUnit, category_from_file_name, list_doc_files, parse_dir};
pub use error::{DocsError, Result};
pub use labels::DocLabels;
pub use parser::{DocParser, ParseOutcome, parse};
pub use table::{FieldTable, parse_required};
