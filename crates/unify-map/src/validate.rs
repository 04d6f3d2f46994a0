//! Alias-table integrity checks.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use crate::alias::AliasTable;
use crate::error::MapError;

/// One integrity finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AliasIssue {
    /// The same spelling is listed under several canonicals.
    Ambiguous {
        spelling: String,
        canonicals: Vec<String>,
    },
    /// A canonical name is listed as another canonical's alias.
    CanonicalAsAlias {
        canonical: String,
        listed_under: String,
    },
    /// Spellings under different canonicals differ only by case.
    CaseCollision {
        folded: String,
        spellings: Vec<String>,
        canonicals: Vec<String>,
    },
}

impl AliasIssue {
    /// Errors make resolution order-dependent; case collisions only warn.
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::CaseCollision { .. })
    }
}

impl fmt::Display for AliasIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ambiguous {
                spelling,
                canonicals,
            } => write!(
                f,
                "'{spelling}' is an alias of {}",
                canonicals.join(", ")
            ),
            Self::CanonicalAsAlias {
                canonical,
                listed_under,
            } => write!(
                f,
                "canonical '{canonical}' is also listed as an alias of '{listed_under}'"
            ),
            Self::CaseCollision {
                folded,
                spellings,
                canonicals,
            } => write!(
                f,
                "'{folded}' spelled {} across {}",
                spellings.join(" / "),
                canonicals.join(", ")
            ),
        }
    }
}

/// Result of [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AliasReport {
    pub canonicals: usize,
    pub spellings: usize,
    pub issues: Vec<AliasIssue>,
}

impl AliasReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = &AliasIssue> {
        self.issues.iter().filter(|issue| issue.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &AliasIssue> {
        self.issues.iter().filter(|issue| !issue.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Fails with [`MapError::AliasAmbiguity`] if any finding is an error.
    pub fn into_result(self) -> Result<Self, MapError> {
        let errors: Vec<String> = self.errors().map(ToString::to_string).collect();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(MapError::AliasAmbiguity {
                count: errors.len(),
                details: errors.join("; "),
            })
        }
    }
}

/// Checks that every spelling maps to exactly one canonical field.
pub fn validate(table: &AliasTable) -> AliasReport {
    let mut owners: IndexMap<&str, Vec<&str>> = IndexMap::new();
    let mut issues = Vec::new();

    for (canonical, aliases) in table.iter() {
        owners.entry(canonical).or_default().push(canonical);
        for alias in aliases {
            if alias == canonical {
                continue;
            }
            if table.contains_canonical(alias) {
                issues.push(AliasIssue::CanonicalAsAlias {
                    canonical: alias.clone(),
                    listed_under: canonical.to_string(),
                });
                continue;
            }
            let entry = owners.entry(alias.as_str()).or_default();
            if !entry.contains(&canonical) {
                entry.push(canonical);
            }
        }
    }

    for (spelling, canonicals) in &owners {
        if canonicals.len() > 1 {
            issues.push(AliasIssue::Ambiguous {
                spelling: (*spelling).to_string(),
                canonicals: canonicals.iter().map(ToString::to_string).collect(),
            });
        }
    }

    let mut folded: IndexMap<String, (BTreeSet<&str>, Vec<&str>)> = IndexMap::new();
    for (spelling, canonicals) in &owners {
        let (spellings, seen_under) = folded.entry(spelling.to_lowercase()).or_default();
        spellings.insert(*spelling);
        for canonical in canonicals {
            if !seen_under.contains(canonical) {
                seen_under.push(*canonical);
            }
        }
    }
    for (key, (spellings, canonicals)) in folded {
        if spellings.len() > 1 && canonicals.len() > 1 {
            issues.push(AliasIssue::CaseCollision {
                folded: key,
                spellings: spellings.iter().map(ToString::to_string).collect(),
                canonicals: canonicals.iter().map(ToString::to_string).collect(),
            });
        }
    }

    for issue in &issues {
        warn!(%issue, "alias table issue");
    }

    AliasReport {
        canonicals: table.len(),
        spellings: owners.len(),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_clean() {
        let table = AliasTable::builtin().expect("builtin table");
        let report = validate(&table);
        assert!(report.is_clean(), "{:?}", report.issues);
        assert_eq!(report.canonicals, table.len());
    }

    #[test]
    fn detects_shared_alias() {
        let table = AliasTable::from_entries([
            ("close", vec!["收盘"]),
            ("price", vec!["收盘", "现价"]),
        ]);
        let report = validate(&table);
        assert_eq!(
            report.issues,
            vec![AliasIssue::Ambiguous {
                spelling: "收盘".to_string(),
                canonicals: vec!["close".to_string(), "price".to_string()],
            }]
        );
        let err = report.into_result().unwrap_err();
        assert!(matches!(err, MapError::AliasAmbiguity { count: 1, .. }));
    }

    #[test]
    fn detects_canonical_listed_as_alias_both_ways() {
        let table = AliasTable::from_entries([("open", vec!["start"]), ("start", vec!["open"])]);
        let report = validate(&table);
        assert_eq!(report.errors().count(), 2);
        assert!(report.issues.iter().all(|issue| matches!(
            issue,
            AliasIssue::CanonicalAsAlias { .. }
        )));
    }

    #[test]
    fn case_collision_is_a_warning() {
        let table = AliasTable::from_entries([("volume", vec!["VOL"]), ("volatility", vec!["vol"])]);
        let report = validate(&table);
        assert_eq!(report.errors().count(), 0);
        assert_eq!(report.warnings().count(), 1);
        assert!(report.clone().into_result().is_ok());
        assert!(!report.is_clean());
    }
}
