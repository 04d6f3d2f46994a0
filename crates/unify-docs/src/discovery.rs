//! Documentation unit discovery.

use std::path::{Path, PathBuf};

use tracing::info;
use unify_model::InterfaceSchema;

use crate::error::{DocsError, Result};
use crate::parser::DocParser;

/// File-name suffix of a documentation unit.
pub const DOC_SUFFIX: &str = ".md.txt";

/// One parsed documentation file.
#[derive(Debug, Clone)]
pub struct DocUnit {
    pub path: PathBuf,
    /// Category derived from the file name, e.g. `stock`.
    pub category: String,
    pub interfaces: Vec<InterfaceSchema>,
    pub dropped_rows: usize,
}

/// Strips the unit suffix from a file name: `stock.md.txt` gives `stock`.
pub fn category_from_file_name(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    base.strip_suffix(DOC_SUFFIX)
        .or_else(|| base.strip_suffix(".md"))
        .or_else(|| base.strip_suffix(".txt"))
        .unwrap_or(base)
        .to_string()
}

/// Lists all documentation units in a directory.
///
/// Returns files sorted by filename.
pub fn list_doc_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(DocsError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| DocsError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| DocsError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_unit = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(DOC_SUFFIX));
        if is_unit {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Parses every documentation unit in `dir`, in file-name order.
pub fn parse_dir(parser: &DocParser, dir: &Path) -> Result<Vec<DocUnit>> {
    let mut units = Vec::new();
    for path in list_doc_files(dir)? {
        let text = std::fs::read_to_string(&path).map_err(|e| DocsError::io(&path, e))?;
        let category = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(category_from_file_name)
            .unwrap_or_default();
        let outcome = parser.parse_unit(&text, &category);
        info!(
            unit = %category,
            interfaces = outcome.interfaces.len(),
            dropped = outcome.dropped_rows,
            "parsed documentation unit"
        );
        units.push(DocUnit {
            path,
            category,
            interfaces: outcome.interfaces,
            dropped_rows: outcome.dropped_rows,
        });
    }
    Ok(units)
}
