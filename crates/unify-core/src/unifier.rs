//! Request and response unification.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use unify_map::{AliasTable, FieldResolver};
use unify_model::{InterfaceFieldMap, Record, RecordSet, RecordShape};
use unify_schema::FieldCatalog;

use crate::error::UnifyError;
use crate::options::UnifyOptions;
use crate::rules::RuleSet;

/// Provider output re-keyed onto canonical names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedOutput {
    pub data: RecordSet,
    #[serde(rename = "type")]
    pub shape: RecordShape,
}

/// Read-only orchestrator over one catalog and one alias table.
#[derive(Debug, Clone)]
pub struct Unifier {
    resolver: FieldResolver,
    catalog: FieldCatalog,
    rules: RuleSet,
    options: UnifyOptions,
}

impl Unifier {
    pub fn new(resolver: FieldResolver, catalog: FieldCatalog) -> Self {
        Self {
            resolver,
            catalog,
            rules: RuleSet::default(),
            options: UnifyOptions::default(),
        }
    }

    /// Loads a saved catalog and an alias table (the built-in one when
    /// `aliases` is `None`).
    pub fn open(catalog_path: &Path, aliases: Option<&Path>) -> Result<Self, UnifyError> {
        let table = match aliases {
            Some(path) => AliasTable::load(path)?,
            None => AliasTable::builtin()?,
        };
        let catalog = FieldCatalog::load(catalog_path)?;
        if !catalog.built_with(&table) {
            warn!(
                catalog = %catalog_path.display(),
                "catalog was generated with a different alias table"
            );
        }
        Ok(Self::new(FieldResolver::new(table), catalog))
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_options(mut self, options: UnifyOptions) -> Self {
        self.options = options;
        self
    }

    pub fn resolver(&self) -> &FieldResolver {
        &self.resolver
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn options(&self) -> &UnifyOptions {
        &self.options
    }

    /// Canonical name for a raw field spelling.
    pub fn resolve(&self, field_name: &str) -> String {
        self.resolver.resolve(field_name)
    }

    /// Applies the value rule selected by `canonical`.
    pub fn normalize_value(&self, canonical: &str, value: Value) -> Value {
        self.rules.apply(canonical, value, &self.options)
    }

    fn fields_of(&self, interface: &str) -> Result<&InterfaceFieldMap, UnifyError> {
        self.catalog
            .interface_fields(interface)
            .ok_or_else(|| UnifyError::UnknownInterface {
                name: interface.to_string(),
            })
    }

    /// Translates caller parameters into the interface's native spellings.
    ///
    /// Each key is matched against the interface's declared inputs by exact
    /// spelling, then ignoring case, then by canonical name. Keys with no
    /// declared counterpart are dropped. When two keys reach the same
    /// parameter the first one wins.
    pub fn unify_input(
        &self,
        interface: &str,
        params: &IndexMap<String, Value>,
    ) -> Result<Record, UnifyError> {
        let inputs = &self.fields_of(interface)?.input;
        let mut native = Record::new();

        for (key, value) in params {
            let Some((original, canonical)) = self.match_input(inputs, key) else {
                debug!(interface, key = %key, "dropping undeclared parameter");
                continue;
            };
            if native.contains_key(original) {
                debug!(interface, key = %key, param = %original, "parameter already supplied");
                continue;
            }
            let value = self.normalize_value(canonical, value.clone());
            native.insert(original.to_string(), value);
        }
        Ok(native)
    }

    fn match_input<'a>(
        &self,
        inputs: &'a IndexMap<String, String>,
        key: &str,
    ) -> Option<(&'a String, &'a String)> {
        let key = key.trim();
        if let Some(found) = inputs.get_key_value(key) {
            return Some(found);
        }
        let folded = key.to_lowercase();
        if let Some(found) = inputs
            .iter()
            .find(|(original, _)| original.to_lowercase() == folded)
        {
            return Some(found);
        }
        let canonical = self.resolver.resolve(key);
        inputs.iter().find(|(_, mapped)| **mapped == canonical)
    }

    /// Re-keys provider output onto canonical names, keeping its shape.
    ///
    /// Field names use the interface's recorded mapping first and the
    /// resolver otherwise. When two raw fields land on the same canonical
    /// key the first one is kept.
    pub fn unify_output(&self, interface: &str, raw: RecordSet) -> Result<UnifiedOutput, UnifyError> {
        let outputs = &self.fields_of(interface)?.output;
        let shape = raw.shape();
        let data = match raw {
            RecordSet::Table(rows) => RecordSet::Table(
                rows.into_iter()
                    .map(|row| self.unify_record(interface, outputs, row))
                    .collect(),
            ),
            RecordSet::Record(row) => RecordSet::Record(self.unify_record(interface, outputs, row)),
        };
        Ok(UnifiedOutput { data, shape })
    }

    fn unify_record(
        &self,
        interface: &str,
        outputs: &IndexMap<String, String>,
        row: Record,
    ) -> Record {
        let mut unified = Record::with_capacity(row.len());
        for (field, value) in row {
            let canonical = match outputs.get(field.trim()) {
                Some(mapped) => mapped.clone(),
                None => self.resolver.resolve(&field),
            };
            if unified.contains_key(&canonical) {
                debug!(interface, field = %field, canonical = %canonical, "duplicate canonical field dropped");
                continue;
            }
            let value = self.normalize_value(&canonical, value);
            unified.insert(canonical, value);
        }
        unified
    }
}
