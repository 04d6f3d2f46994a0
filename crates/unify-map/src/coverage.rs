//! Coverage of observed field names by an alias table.

use std::cmp::Ordering;

use indexmap::IndexMap;
use rapidfuzz::distance::jaro_winkler;
use serde::Serialize;

use crate::alias::AliasTable;

/// Shortest normalized form allowed to match by containment.
const MIN_CONTAINMENT_LEN: usize = 3;

/// Observed names split by whether the table already curates them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub covered: Vec<(String, usize)>,
    /// Sorted by occurrence count, most frequent first.
    pub uncovered: Vec<(String, usize)>,
}

impl Coverage {
    pub fn observed(&self) -> usize {
        self.covered.len() + self.uncovered.len()
    }

    /// Share of distinct observed names that are curated, in `[0, 1]`.
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        match self.observed() {
            0 => 1.0,
            n => self.covered.len() as f64 / n as f64,
        }
    }
}

/// Splits `observed` (name to occurrence count) into covered and uncovered.
pub fn coverage(table: &AliasTable, observed: &IndexMap<String, usize>) -> Coverage {
    let mut result = Coverage::default();
    for (name, count) in observed {
        let bucket = if table.covers(name) {
            &mut result.covered
        } else {
            &mut result.uncovered
        };
        bucket.push((name.clone(), *count));
    }
    result.uncovered.sort_by(|a, b| b.1.cmp(&a.1));
    result
}

/// A pair of spellings that look like the same field but are not grouped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquivalenceSuggestion {
    pub left: String,
    pub right: String,
    pub left_count: usize,
    pub right_count: usize,
    /// Jaro-Winkler similarity of the normalized forms.
    pub similarity: f64,
}

/// Lowercased alphanumeric characters only.
fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn looks_equivalent(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    let long_enough =
        a.chars().count() >= MIN_CONTAINMENT_LEN && b.chars().count() >= MIN_CONTAINMENT_LEN;
    long_enough && (a.contains(b) || b.contains(a))
}

fn grouped_together(table: &AliasTable, a: &str, b: &str) -> bool {
    table.iter().any(|(canonical, aliases)| {
        let member = |name: &str| canonical == name || aliases.iter().any(|alias| alias == name);
        member(a) && member(b)
    })
}

/// Proposes observed spelling pairs that probably name the same field.
///
/// Two spellings qualify when their alphanumeric forms are equal, or one
/// contains the other and both have at least three characters. Pairs the
/// table already groups under one canonical are skipped. Results are ranked
/// by similarity, then by combined occurrence count.
pub fn suggest_equivalents(
    observed: &IndexMap<String, usize>,
    table: &AliasTable,
) -> Vec<EquivalenceSuggestion> {
    let names: Vec<(&String, usize, String)> = observed
        .iter()
        .map(|(name, count)| (name, *count, normalize(name)))
        .collect();

    let mut suggestions = Vec::new();
    for (i, (left, left_count, left_norm)) in names.iter().enumerate() {
        for (right, right_count, right_norm) in &names[i + 1..] {
            if !looks_equivalent(left_norm, right_norm) || grouped_together(table, left, right) {
                continue;
            }
            suggestions.push(EquivalenceSuggestion {
                left: (*left).clone(),
                right: (*right).clone(),
                left_count: *left_count,
                right_count: *right_count,
                similarity: jaro_winkler::similarity(left_norm.chars(), right_norm.chars()),
            });
        }
    }

    suggestions.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
            .then_with(|| (b.left_count + b.right_count).cmp(&(a.left_count + a.right_count)))
    });
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observed(pairs: &[(&str, usize)]) -> IndexMap<String, usize> {
        pairs
            .iter()
            .map(|(name, count)| ((*name).to_string(), *count))
            .collect()
    }

    #[test]
    fn splits_covered_and_sorts_uncovered() {
        let table = AliasTable::from_entries([("close", vec!["收盘价"])]);
        let seen = observed(&[("收盘价", 9), ("换手率", 2), ("振幅", 5), ("close", 1)]);
        let result = coverage(&table, &seen);
        assert_eq!(result.covered.len(), 2);
        assert_eq!(
            result.uncovered,
            vec![("振幅".to_string(), 5), ("换手率".to_string(), 2)]
        );
        assert!((result.ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn suggests_spelling_variants() {
        let table = AliasTable::from_entries([("volume", vec!["成交量"])]);
        let seen = observed(&[
            ("trade_date", 4),
            ("TRADE-DATE", 2),
            ("成交量", 3),
            ("成交量(手)", 1),
            ("pe", 1),
            ("pe_ttm", 1),
        ]);
        let suggestions = suggest_equivalents(&seen, &table);
        let pairs: Vec<(&str, &str)> = suggestions
            .iter()
            .map(|s| (s.left.as_str(), s.right.as_str()))
            .collect();
        assert_eq!(pairs, vec![("trade_date", "TRADE-DATE"), ("成交量", "成交量(手)")]);
        assert!((suggestions[0].similarity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn grouped_pairs_are_not_suggested() {
        let table = AliasTable::from_entries([("volume", vec!["成交量", "成交量(手)"])]);
        let seen = observed(&[("成交量", 3), ("成交量(手)", 1)]);
        assert!(suggest_equivalents(&seen, &table).is_empty());
    }
}
