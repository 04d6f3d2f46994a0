//! The persisted field catalog and its lookup queries.

use std::collections::BTreeSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use unify_map::AliasTable;
use unify_model::{CanonicalField, InterfaceFieldMap, InterfaceSchema};

use crate::builder::PLACEHOLDER_NAMES;
use crate::error::SchemaError;

/// Format version written into every catalog.
pub const CATALOG_VERSION: &str = "2.0";

/// Everything the schema builder learned, as persisted on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldCatalog {
    pub version: String,
    pub generated_at: String,
    /// [`AliasTable::fingerprint`] of the table the catalog was built with.
    #[serde(default)]
    pub alias_fingerprint: String,
    pub fields: IndexMap<String, CanonicalField>,
    pub interfaces: IndexMap<String, InterfaceSchema>,
    pub field_to_interfaces: IndexMap<String, Vec<String>>,
    pub interface_to_fields: IndexMap<String, InterfaceFieldMap>,
}

/// A spelling claimed by more than one canonical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasConflict {
    pub spelling: String,
    pub canonicals: Vec<String>,
}

impl FieldCatalog {
    pub fn from_json_str(text: &str, origin: &Path) -> Result<Self, SchemaError> {
        serde_json::from_str(text).map_err(|source| SchemaError::Json {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|e| SchemaError::io(path, e))?;
        let catalog = Self::from_json_str(&text, path)?;
        debug!(
            path = %path.display(),
            fields = catalog.fields.len(),
            interfaces = catalog.interfaces.len(),
            "loaded field catalog"
        );
        Ok(catalog)
    }

    /// Writes the catalog as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), SchemaError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| SchemaError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| SchemaError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|e| SchemaError::io(path, e))?;
        info!(path = %path.display(), "saved field catalog");
        Ok(())
    }

    /// True if the catalog was built from `table`.
    pub fn built_with(&self, table: &AliasTable) -> bool {
        self.alias_fingerprint == table.fingerprint()
    }

    pub fn interface(&self, func_name: &str) -> Option<&InterfaceSchema> {
        self.interfaces.get(func_name)
    }

    pub fn interface_fields(&self, func_name: &str) -> Option<&InterfaceFieldMap> {
        self.interface_to_fields.get(func_name)
    }

    /// Finds a field by canonical name or alias, exactly first and then
    /// ignoring case.
    pub fn find_field(&self, name: &str) -> Option<&CanonicalField> {
        let name = name.trim();
        if let Some(field) = self.fields.get(name) {
            return Some(field);
        }
        if let Some(field) = self.fields.values().find(|field| field.aliases.contains(name)) {
            return Some(field);
        }
        let folded = name.to_lowercase();
        self.fields.values().find(|field| {
            field.canonical_name.to_lowercase() == folded
                || field
                    .aliases
                    .iter()
                    .any(|alias| alias.to_lowercase() == folded)
        })
    }

    /// Canonical names containing `fragment`, ignoring case.
    pub fn similar_fields(&self, fragment: &str) -> Vec<&str> {
        containing(self.fields.keys(), fragment)
    }

    /// Interface names containing `fragment`, ignoring case.
    pub fn similar_interfaces(&self, fragment: &str) -> Vec<&str> {
        containing(self.interfaces.keys(), fragment)
    }

    /// Spellings that more than one canonical field answers to.
    ///
    /// Empty for any catalog built from a single valid alias table.
    pub fn alias_conflicts(&self) -> Vec<AliasConflict> {
        let mut owners: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for field in self.fields.values() {
            let spellings = std::iter::once(&field.canonical_name).chain(&field.aliases);
            for spelling in spellings {
                let entry = owners.entry(spelling.as_str()).or_default();
                if !entry.contains(&field.canonical_name.as_str()) {
                    entry.push(field.canonical_name.as_str());
                }
            }
        }
        owners
            .into_iter()
            .filter(|(_, canonicals)| canonicals.len() > 1)
            .map(|(spelling, canonicals)| AliasConflict {
                spelling: spelling.to_string(),
                canonicals: canonicals.into_iter().map(str::to_string).collect(),
            })
            .collect()
    }

    /// Number of interface tables each raw field spelling appears in.
    pub fn observed_counts(&self) -> IndexMap<String, usize> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for schema in self.interfaces.values() {
            let names: BTreeSet<&str> = schema
                .input_fields
                .iter()
                .chain(&schema.output_fields)
                .map(|spec| spec.original_name.trim())
                .filter(|name| !PLACEHOLDER_NAMES.contains(name))
                .collect();
            for name in names {
                *counts.entry(name.to_string()).or_insert(0) += 1;
            }
        }
        counts
    }
}

fn containing<'a>(names: impl Iterator<Item = &'a String>, fragment: &str) -> Vec<&'a str> {
    let fragment = fragment.trim().to_lowercase();
    if fragment.is_empty() {
        return Vec::new();
    }
    let mut matches: Vec<&str> = names
        .filter(|name| name.to_lowercase().contains(&fragment))
        .map(String::as_str)
        .collect();
    matches.sort_unstable();
    matches
}
