//! Provider records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record: field name to value, in provider column order.
pub type Record = IndexMap<String, Value>;

/// Either a single mapping or a table of records.
///
/// The orchestrator preserves the shape: a list in gives a list out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordSet {
    Table(Vec<Record>),
    Record(Record),
}

impl RecordSet {
    pub fn shape(&self) -> RecordShape {
        match self {
            Self::Table(_) => RecordShape::Table,
            Self::Record(_) => RecordShape::Record,
        }
    }

    /// Number of records (1 for a single mapping).
    pub fn len(&self) -> usize {
        match self {
            Self::Table(rows) => rows.len(),
            Self::Record(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Table(rows) if rows.is_empty())
    }
}

/// Shape tag reported alongside unified output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordShape {
    Record,
    Table,
}

impl RecordShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::Table => "table",
        }
    }
}
