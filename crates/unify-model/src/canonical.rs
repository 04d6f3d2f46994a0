//! Canonical field projection.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::field::FieldType;

/// Count of observed types for one canonical field, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeHistogram(IndexMap<FieldType, usize>);

impl TypeHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, field_type: FieldType) {
        *self.0.entry(field_type).or_insert(0) += 1;
    }

    pub fn count(&self, field_type: FieldType) -> usize {
        self.0.get(&field_type).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldType, usize)> + '_ {
        self.0.iter().map(|(ty, count)| (*ty, *count))
    }

    /// Most frequent type; ties go to the type inserted first.
    pub fn mode(&self) -> Option<FieldType> {
        let mut best: Option<(FieldType, usize)> = None;
        for (ty, count) in self.iter() {
            match best {
                Some((_, top)) if count <= top => {}
                _ => best = Some((ty, count)),
            }
        }
        best.map(|(ty, _)| ty)
    }

    /// Adds every count of `other` into this histogram.
    pub fn absorb(&mut self, other: &TypeHistogram) {
        for (ty, count) in other.iter() {
            *self.0.entry(ty).or_insert(0) += count;
        }
    }
}

/// One logical field and everything observed about its spellings.
///
/// `canonical_name` never appears in `aliases`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalField {
    pub canonical_name: String,
    #[serde(default)]
    pub aliases: BTreeSet<String>,
    #[serde(default)]
    pub common_type: FieldType,
    #[serde(default)]
    pub type_histogram: TypeHistogram,
    /// Interfaces returning this field, first-seen order.
    #[serde(default)]
    pub producing_interfaces: Vec<String>,
    /// Interfaces accepting this field as a parameter, first-seen order.
    #[serde(default)]
    pub consuming_interfaces: Vec<String>,
    #[serde(default)]
    pub sample_descriptions: Vec<String>,
}

impl CanonicalField {
    pub fn new(canonical_name: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            aliases: BTreeSet::new(),
            common_type: FieldType::default(),
            type_histogram: TypeHistogram::new(),
            producing_interfaces: Vec::new(),
            consuming_interfaces: Vec::new(),
            sample_descriptions: Vec::new(),
        }
    }

    /// Records an observed spelling. The canonical name itself is ignored.
    pub fn add_alias(&mut self, spelling: &str) {
        if spelling != self.canonical_name {
            self.aliases.insert(spelling.to_string());
        }
    }

    /// True if `name` is the canonical name or one of its aliases.
    pub fn answers_to(&self, name: &str) -> bool {
        self.canonical_name == name || self.aliases.contains(name)
    }

    /// Recomputes `common_type` from the histogram.
    pub fn refresh_common_type(&mut self) {
        self.common_type = self.type_histogram.mode().unwrap_or_default();
    }
}
