//! Canonical field resolver.

use std::collections::HashMap;
use std::sync::Arc;

use crate::alias::AliasTable;
use crate::error::MapError;

/// Names passed through untouched instead of resolved.
const PLACEHOLDER_NAMES: &[&str] = &["", "-", "nan"];

/// Maps raw field spellings to canonical names.
///
/// Lookup order per canonical, in table order: exact canonical name, exact
/// alias, case-insensitive alias. The first canonical with any hit wins.
/// Unknown spellings resolve to themselves.
#[derive(Debug, Clone)]
pub struct FieldResolver {
    table: Arc<AliasTable>,
    /// Canonical names and aliases, first canonical index per spelling.
    exact: HashMap<String, usize>,
    /// Lowercased aliases, first canonical index per folded spelling.
    folded: HashMap<String, usize>,
}

impl FieldResolver {
    pub fn new(table: AliasTable) -> Self {
        let mut exact = HashMap::new();
        let mut folded = HashMap::new();
        for (index, (canonical, aliases)) in table.iter().enumerate() {
            exact.entry(canonical.to_string()).or_insert(index);
            for alias in aliases {
                exact.entry(alias.clone()).or_insert(index);
                folded.entry(alias.to_lowercase()).or_insert(index);
            }
        }
        Self {
            table: Arc::new(table),
            exact,
            folded,
        }
    }

    /// Resolver over [`AliasTable::builtin`].
    pub fn builtin() -> Result<Self, MapError> {
        AliasTable::builtin().map(Self::new)
    }

    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    /// Canonical name for a curated spelling, `None` if the table has no entry.
    pub fn lookup(&self, raw: &str) -> Option<&str> {
        let name = raw.trim();
        if PLACEHOLDER_NAMES.contains(&name) {
            return None;
        }
        let exact = self.exact.get(name).copied();
        let folded = self.folded.get(&name.to_lowercase()).copied();
        let index = match (exact, folded) {
            (Some(a), Some(b)) => a.min(b),
            (a, b) => a.or(b)?,
        };
        self.table.canonical_at(index)
    }

    /// Canonical name for `raw`, or the trimmed input when uncurated.
    pub fn resolve(&self, raw: &str) -> String {
        match self.lookup(raw) {
            Some(canonical) => canonical.to_string(),
            None => raw.trim().to_string(),
        }
    }

    pub fn is_canonical(&self, name: &str) -> bool {
        self.table.contains_canonical(name)
    }
}
