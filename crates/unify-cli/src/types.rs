use unify_map::{AliasReport, Coverage, EquivalenceSuggestion};
use unify_schema::{AliasConflict, ArtifactPaths};

/// One documentation unit in a generate run.
#[derive(Debug, Clone)]
pub struct UnitSummary {
    pub category: String,
    pub interfaces: usize,
    pub input_fields: usize,
    pub output_fields: usize,
    pub dropped_rows: usize,
}

#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub units: Vec<UnitSummary>,
    /// Distinct interfaces after duplicate names were replaced.
    pub interfaces: usize,
    pub fields: usize,
    /// Canonical fields that come from the alias table.
    pub curated_fields: usize,
    pub alias_report: AliasReport,
    pub conflicts: Vec<AliasConflict>,
    pub artifacts: ArtifactPaths,
}

#[derive(Debug, Clone)]
pub struct ValidateResult {
    pub report: AliasReport,
    pub coverage: Option<Coverage>,
    pub suggestions: Vec<EquivalenceSuggestion>,
    pub top: usize,
}

impl ValidateResult {
    pub fn has_errors(&self) -> bool {
        self.report.has_errors()
    }
}
