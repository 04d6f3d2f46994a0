//! Interface schemas recovered from documentation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::field::FieldSpec;

/// Which side of an interface a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Accepted as a call parameter.
    Input,
    /// Produced in returned records.
    Output,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

/// One named data-retrieval operation and its declared field tables.
///
/// `func_name` is the identity used by every other component. Schemas are
/// rebuilt wholesale from documentation text and never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSchema {
    pub func_name: String,
    #[serde(default)]
    pub target_url: String,
    #[serde(default)]
    pub description: String,
    /// Documentation unit the interface came from (e.g. `stock`).
    #[serde(default)]
    pub data_type_category: String,
    /// Optional rate or volume limit note from the header block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    /// Nearest heading above the interface header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Non-blank lines in the data example block, 0 when absent.
    #[serde(default)]
    pub example_lines: usize,
    #[serde(default)]
    pub input_fields: Vec<FieldSpec>,
    #[serde(default)]
    pub output_fields: Vec<FieldSpec>,
}

impl InterfaceSchema {
    pub fn new(func_name: impl Into<String>) -> Self {
        Self {
            func_name: func_name.into(),
            ..Self::default()
        }
    }

    /// Returns the field table for one side of the interface.
    pub fn fields(&self, direction: Direction) -> &[FieldSpec] {
        match direction {
            Direction::Input => &self.input_fields,
            Direction::Output => &self.output_fields,
        }
    }
}

/// Per-interface original-name to canonical-name dictionaries.
///
/// Declaration order is preserved; the orchestrator relies on it when two
/// original spellings canonicalize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceFieldMap {
    #[serde(default)]
    pub input: IndexMap<String, String>,
    #[serde(default)]
    pub output: IndexMap<String, String>,
}

impl InterfaceFieldMap {
    pub fn side(&self, direction: Direction) -> &IndexMap<String, String> {
        match direction {
            Direction::Input => &self.input,
            Direction::Output => &self.output,
        }
    }

    pub fn side_mut(&mut self, direction: Direction) -> &mut IndexMap<String, String> {
        match direction {
            Direction::Input => &mut self.input,
            Direction::Output => &mut self.output,
        }
    }
}
