//! Flattened tabular views of a catalog.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::catalog::FieldCatalog;
use crate::error::SchemaError;

pub const MAPPING_FILE: &str = "complete_field_mapping.json";
pub const FIELD_TABLE_FILE: &str = "field_query_table.csv";
pub const INTERFACE_TABLE_FILE: &str = "interface_query_table.csv";

const LISTED_INTERFACES: usize = 10;
const LISTED_PARAMETERS: usize = 20;

/// One canonical field per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRow {
    pub canonical_name: String,
    /// Aliases joined with `|`.
    pub aliases: String,
    pub common_type: String,
    pub output_interface_count: usize,
    /// First ten producing interfaces, sorted, joined with `|`.
    pub output_interfaces: String,
    pub input_interface_count: usize,
    pub input_interfaces: String,
}

/// One interface per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceRow {
    pub func_name: String,
    pub category: String,
    pub description: String,
    pub input_count: usize,
    /// First twenty input names, joined with `|`.
    pub inputs: String,
    pub output_count: usize,
    pub outputs: String,
}

fn sample(names: &[String], limit: usize) -> String {
    let mut shown: Vec<&str> = names.iter().take(limit).map(String::as_str).collect();
    shown.sort_unstable();
    shown.join("|")
}

impl FieldCatalog {
    /// Field rows, most widely produced first.
    pub fn field_rows(&self) -> Vec<FieldRow> {
        let mut rows: Vec<FieldRow> = self
            .fields
            .values()
            .map(|field| FieldRow {
                canonical_name: field.canonical_name.clone(),
                aliases: field
                    .aliases
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join("|"),
                common_type: field.common_type.to_string(),
                output_interface_count: field.producing_interfaces.len(),
                output_interfaces: sample(&field.producing_interfaces, LISTED_INTERFACES),
                input_interface_count: field.consuming_interfaces.len(),
                input_interfaces: sample(&field.consuming_interfaces, LISTED_INTERFACES),
            })
            .collect();
        rows.sort_by(|a, b| b.output_interface_count.cmp(&a.output_interface_count));
        rows
    }

    /// Interface rows ordered by category, then name.
    pub fn interface_rows(&self) -> Vec<InterfaceRow> {
        let mut rows: Vec<InterfaceRow> = self
            .interfaces
            .values()
            .map(|schema| {
                let names = |specs: &[unify_model::FieldSpec], limit: usize| {
                    specs
                        .iter()
                        .take(limit)
                        .map(|spec| spec.original_name.as_str())
                        .collect::<Vec<_>>()
                        .join("|")
                };
                InterfaceRow {
                    func_name: schema.func_name.clone(),
                    category: schema.data_type_category.clone(),
                    description: schema.description.clone(),
                    input_count: schema.input_fields.len(),
                    inputs: names(&schema.input_fields, LISTED_PARAMETERS),
                    output_count: schema.output_fields.len(),
                    outputs: names(&schema.output_fields, usize::MAX),
                }
            })
            .collect();
        rows.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.func_name.cmp(&b.func_name))
        });
        rows
    }
}

/// Writes `rows` as CSV with a header row.
///
/// A UTF-8 byte order mark is written first so spreadsheet tools detect the
/// encoding of the CJK field names.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), SchemaError> {
    let csv_error = |source| SchemaError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut file = std::fs::File::create(path).map_err(|e| SchemaError::io(path, e))?;
    file.write_all(b"\xEF\xBB\xBF")
        .map_err(|e| SchemaError::io(path, e))?;
    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    writer.flush().map_err(|e| SchemaError::io(path, e))?;
    Ok(())
}

/// Where [`write_artifacts`] put each file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub mapping: PathBuf,
    pub field_table: PathBuf,
    pub interface_table: PathBuf,
}

/// Saves the catalog JSON and both CSV views into `dir`.
pub fn write_artifacts(catalog: &FieldCatalog, dir: &Path) -> Result<ArtifactPaths, SchemaError> {
    std::fs::create_dir_all(dir).map_err(|e| SchemaError::io(dir, e))?;
    let paths = ArtifactPaths {
        mapping: dir.join(MAPPING_FILE),
        field_table: dir.join(FIELD_TABLE_FILE),
        interface_table: dir.join(INTERFACE_TABLE_FILE),
    };
    catalog.save(&paths.mapping)?;
    write_csv(&paths.field_table, &catalog.field_rows())?;
    write_csv(&paths.interface_table, &catalog.interface_rows())?;
    info!(dir = %dir.display(), "wrote catalog artifacts");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use unify_model::{CanonicalField, FieldSpec, FieldType, InterfaceSchema};

    use super::*;

    #[test]
    fn field_rows_sorted_by_producer_count() {
        let mut close = CanonicalField::new("close");
        close.add_alias("收盘");
        close.add_alias("收盘价");
        close.common_type = FieldType::Float;
        close.producing_interfaces = vec!["b_hist".into(), "a_hist".into()];
        let mut date = CanonicalField::new("date");
        date.producing_interfaces = vec!["a_hist".into()];
        date.consuming_interfaces = vec!["a_hist".into()];

        let catalog = FieldCatalog {
            fields: [("date".to_string(), date), ("close".to_string(), close)]
                .into_iter()
                .collect(),
            ..FieldCatalog::default()
        };
        let rows = catalog.field_rows();
        assert_eq!(rows[0].canonical_name, "close");
        assert_eq!(rows[0].aliases, "收盘|收盘价");
        assert_eq!(rows[0].common_type, "float");
        assert_eq!(rows[0].output_interfaces, "a_hist|b_hist");
        assert_eq!(rows[1].input_interface_count, 1);
    }

    #[test]
    fn interface_rows_sorted_by_category_then_name() {
        let mut spot = InterfaceSchema::new("z_spot");
        spot.data_type_category = "fund".into();
        let mut hist = InterfaceSchema::new("b_hist");
        hist.data_type_category = "stock".into();
        hist.input_fields = (0..25).map(|i| FieldSpec::new(format!("p{i}"), "str")).collect();
        let mut info = InterfaceSchema::new("a_info");
        info.data_type_category = "stock".into();

        let catalog = FieldCatalog {
            interfaces: [hist, spot, info]
                .into_iter()
                .map(|s| (s.func_name.clone(), s))
                .collect(),
            ..FieldCatalog::default()
        };
        let rows = catalog.interface_rows();
        let order: Vec<&str> = rows.iter().map(|r| r.func_name.as_str()).collect();
        assert_eq!(order, vec!["z_spot", "a_info", "b_hist"]);
        assert_eq!(rows[2].input_count, 25);
        assert_eq!(rows[2].inputs.split('|').count(), 20);
    }
}
