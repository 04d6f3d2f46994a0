//! Folding interface schemas into a [`FieldCatalog`].

use indexmap::IndexMap;
use tracing::{debug, info, warn};
use unify_map::FieldResolver;
use unify_model::{CanonicalField, Direction, InterfaceFieldMap, InterfaceSchema};

use crate::catalog::{CATALOG_VERSION, FieldCatalog};
use crate::type_map::normalize_type_label;

/// Field names that stand for "no field" in documentation tables.
pub const PLACEHOLDER_NAMES: &[&str] = &["", "-", "无", "nan"];

/// Most descriptions kept per canonical field.
const MAX_SAMPLE_DESCRIPTIONS: usize = 10;

/// Accumulates interface schemas, keyed by `func_name`.
///
/// One builder per worker is fine; combine them with [`SchemaBuilder::merge`]
/// before calling [`SchemaBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    interfaces: IndexMap<String, InterfaceSchema>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a schema. A later schema with the same name replaces the earlier
    /// one but keeps its position.
    pub fn add(&mut self, schema: InterfaceSchema) {
        let category = schema.data_type_category.clone();
        if let Some(previous) = self.interfaces.insert(schema.func_name.clone(), schema) {
            warn!(
                interface = %previous.func_name,
                replaced = %previous.data_type_category,
                by = %category,
                "duplicate interface definition replaced"
            );
        }
    }

    pub fn extend(&mut self, schemas: impl IntoIterator<Item = InterfaceSchema>) {
        for schema in schemas {
            self.add(schema);
        }
    }

    /// Appends every schema of `other`, which wins on duplicate names.
    pub fn merge(&mut self, other: SchemaBuilder) {
        self.extend(other.interfaces.into_values());
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceSchema> {
        self.interfaces.values()
    }

    /// Resolves every field occurrence and builds the catalog.
    pub fn build(&self, resolver: &FieldResolver) -> FieldCatalog {
        let mut fields: IndexMap<String, CanonicalField> = IndexMap::new();
        let mut field_to_interfaces: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut interface_to_fields: IndexMap<String, InterfaceFieldMap> = IndexMap::new();

        for (func_name, schema) in &self.interfaces {
            let mapping = interface_to_fields.entry(func_name.clone()).or_default();
            for direction in [Direction::Input, Direction::Output] {
                for spec in schema.fields(direction) {
                    let name = spec.original_name.trim();
                    if PLACEHOLDER_NAMES.contains(&name) {
                        continue;
                    }
                    let canonical = resolver.resolve(name);

                    push_unique(
                        field_to_interfaces.entry(canonical.clone()).or_default(),
                        func_name,
                    );
                    mapping
                        .side_mut(direction)
                        .insert(name.to_string(), canonical.clone());

                    let field = fields
                        .entry(canonical.clone())
                        .or_insert_with(|| CanonicalField::new(canonical));
                    field.add_alias(name);
                    let interfaces = match direction {
                        Direction::Input => &mut field.consuming_interfaces,
                        Direction::Output => &mut field.producing_interfaces,
                    };
                    push_unique(interfaces, func_name);
                    if let Some(field_type) = normalize_type_label(&spec.type_label) {
                        field.type_histogram.record(field_type);
                    }
                    let description = spec.description.trim();
                    if !matches!(description, "" | "-")
                        && field.sample_descriptions.len() < MAX_SAMPLE_DESCRIPTIONS
                    {
                        push_unique(&mut field.sample_descriptions, description);
                    }
                }
            }
            debug!(
                interface = %func_name,
                inputs = mapping.input.len(),
                outputs = mapping.output.len(),
                "folded interface"
            );
        }

        for field in fields.values_mut() {
            field.refresh_common_type();
        }

        info!(
            interfaces = self.interfaces.len(),
            fields = fields.len(),
            "built field catalog"
        );

        FieldCatalog {
            version: CATALOG_VERSION.to_string(),
            generated_at: chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
            alias_fingerprint: resolver.table().fingerprint(),
            fields,
            interfaces: self.interfaces.clone(),
            field_to_interfaces,
            interface_to_fields,
        }
    }
}

impl FromIterator<InterfaceSchema> for SchemaBuilder {
    fn from_iter<I: IntoIterator<Item = InterfaceSchema>>(iter: I) -> Self {
        let mut builder = Self::new();
        builder.extend(iter);
        builder
    }
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}
