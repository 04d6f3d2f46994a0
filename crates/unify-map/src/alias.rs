//! Alias table configuration.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MapError;
use crate::hash::sha256_hex;

/// Built-in alias table, embedded at compile time.
const BUILTIN_ALIASES: &str = include_str!("../data/default_aliases.json");

/// Canonical field names and the raw spellings grouped under each.
///
/// Canonical order is significant: when a spelling is listed under several
/// canonicals the first one wins. The table is read-only once loaded;
/// regeneration produces a new table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTable {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub generated_at: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "aliases", alias = "field_equivalents")]
    entries: IndexMap<String, Vec<String>>,
}

impl AliasTable {
    /// Builds a table from `(canonical, aliases)` pairs in the given order.
    pub fn from_entries<C, A, S>(entries: impl IntoIterator<Item = (C, A)>) -> Self
    where
        C: Into<String>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(canonical, aliases)| {
                (
                    canonical.into(),
                    aliases.into_iter().map(Into::into).collect(),
                )
            })
            .collect();
        Self {
            entries,
            ..Self::default()
        }
    }

    /// The table shipped with the crate.
    pub fn builtin() -> Result<Self, MapError> {
        Self::parse(BUILTIN_ALIASES, "<builtin>")
    }

    pub fn from_json_str(text: &str) -> Result<Self, MapError> {
        Self::parse(text, "<string>")
    }

    pub fn load(path: &Path) -> Result<Self, MapError> {
        let text = std::fs::read_to_string(path).map_err(|e| MapError::io(path, e))?;
        let table = Self::parse(&text, &path.display().to_string())?;
        debug!(path = %path.display(), canonicals = table.len(), "loaded alias table");
        Ok(table)
    }

    fn parse(text: &str, origin: &str) -> Result<Self, MapError> {
        let table: Self = serde_json::from_str(text).map_err(|source| MapError::Json {
            origin: origin.to_string(),
            source,
        })?;
        if let Some(blank) = table.entries.keys().find(|name| name.trim().is_empty()) {
            return Err(MapError::InvalidTable {
                message: format!("blank canonical name {blank:?}"),
            });
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(canonical, aliases)| (canonical.as_str(), aliases.as_slice()))
    }

    pub fn aliases_of(&self, canonical: &str) -> Option<&[String]> {
        self.entries.get(canonical).map(Vec::as_slice)
    }

    pub fn contains_canonical(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Canonical name at `index` in table order.
    pub fn canonical_at(&self, index: usize) -> Option<&str> {
        self.entries.get_index(index).map(|(name, _)| name.as_str())
    }

    /// True if `name` is a canonical name or listed verbatim as an alias.
    pub fn covers(&self, name: &str) -> bool {
        self.iter()
            .any(|(canonical, aliases)| canonical == name || aliases.iter().any(|a| a == name))
    }

    /// SHA-256 hex digest of the canonical entries, ignoring metadata.
    pub fn fingerprint(&self) -> String {
        let bytes = serde_json::to_vec(&self.entries).unwrap_or_default();
        sha256_hex(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_loads_in_order() {
        let table = AliasTable::builtin().expect("builtin table");
        assert_eq!(table.canonical_at(0), Some("date"));
        assert_eq!(table.canonical_at(1), Some("symbol"));
        assert!(table.aliases_of("date").expect("date").contains(&"日期".to_string()));
        assert_eq!(table.aliases_of("qvix"), Some(&[][..]));
    }

    #[test]
    fn legacy_key_is_accepted() {
        let table =
            AliasTable::from_json_str(r#"{"field_equivalents": {"close": ["收盘价"]}}"#)
                .expect("legacy table");
        assert!(table.covers("收盘价"));
        assert!(table.version.is_empty());
    }

    #[test]
    fn blank_canonical_is_rejected() {
        let err = AliasTable::from_json_str(r#"{"aliases": {" ": ["x"]}}"#).unwrap_err();
        assert!(matches!(err, MapError::InvalidTable { .. }));
    }

    #[test]
    fn fingerprint_ignores_metadata_but_not_order() {
        let mut a = AliasTable::from_entries([("open", vec!["开盘价"]), ("close", vec!["收盘价"])]);
        let b = AliasTable::from_entries([("close", vec!["收盘价"]), ("open", vec!["开盘价"])]);
        let before = a.fingerprint();
        a.version = "2.0".to_string();
        assert_eq!(a.fingerprint(), before);
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(before.len(), 64);
    }
}
