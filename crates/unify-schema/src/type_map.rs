//! Provider type labels to [`FieldType`].

use unify_model::FieldType;

/// Collapses a raw type label into the closed type set.
///
/// Returns `None` for blank and placeholder labels so they do not skew the
/// histogram. Unrecognised labels count as strings.
pub fn normalize_type_label(label: &str) -> Option<FieldType> {
    let lowered = label.trim().to_lowercase();
    let base = lowered.split('[').next().unwrap_or_default().trim();
    let field_type = match base {
        "" | "-" | "无" => return None,
        "object" | "str" | "string" | "text" => FieldType::String,
        "int" | "int8" | "int16" | "int32" | "int64" | "integer" | "long" => FieldType::Integer,
        "float" | "float16" | "float32" | "float64" | "double" | "number" | "decimal" => {
            FieldType::Float
        }
        "bool" | "boolean" => FieldType::Boolean,
        "datetime" | "datetime64" | "date" | "timestamp" => FieldType::Datetime,
        "list" | "array" => FieldType::Array,
        "dict" | "json" | "map" => FieldType::Object,
        _ => FieldType::String,
    };
    Some(field_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_labels() {
        assert_eq!(normalize_type_label("object"), Some(FieldType::String));
        assert_eq!(normalize_type_label("Float64"), Some(FieldType::Float));
        assert_eq!(normalize_type_label("int32"), Some(FieldType::Integer));
        assert_eq!(normalize_type_label("datetime64[ns]"), Some(FieldType::Datetime));
        assert_eq!(normalize_type_label("dict"), Some(FieldType::Object));
        assert_eq!(normalize_type_label("list"), Some(FieldType::Array));
        assert_eq!(normalize_type_label("bool"), Some(FieldType::Boolean));
        assert_eq!(normalize_type_label("decimal(10,2)"), Some(FieldType::String));
        assert_eq!(normalize_type_label("-"), None);
        assert_eq!(normalize_type_label(" "), None);
    }
}
