//! Pipe-delimited field tables.

use std::collections::BTreeMap;

use unify_model::FieldSpec;

const NAME_KEYS: &[&str] = &["名称", "name", "Name", "字段名", "字段"];
const TYPE_KEYS: &[&str] = &["类型", "type", "Type"];
const DESCRIPTION_KEYS: &[&str] = &["描述", "description", "Description", "说明"];
const EXAMPLE_KEYS: &[&str] = &["示例", "example", "Example", "举例"];
const REQUIRED_KEYS: &[&str] = &["必填", "required", "Required", "是否必填"];

/// A field table found under a caption line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTable {
    /// Caption line as written, e.g. `输出参数-实时行情数据`.
    pub caption: String,
    pub headers: Vec<String>,
    pub fields: Vec<FieldSpec>,
    /// Data rows whose cell count did not match the header.
    pub dropped_rows: usize,
}

impl FieldTable {
    /// Locates the table introduced by `label` within `section`.
    ///
    /// A caption that is exactly `label` is preferred; otherwise the first
    /// caption starting with `label` (e.g. `label-suffix`) is used. Captions
    /// not followed by a header row and a separator row are ignored.
    pub fn find(section: &str, label: &str) -> Option<FieldTable> {
        let lines: Vec<&str> = section.lines().collect();
        let captions: Vec<(usize, bool)> = lines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| caption_kind(line, label).map(|exact| (idx, exact)))
            .collect();

        let ordered = captions
            .iter()
            .filter(|(_, exact)| *exact)
            .chain(captions.iter());

        let mut fallback = None;
        for (idx, _) in ordered {
            let Some(table) = read_table(lines[*idx].trim(), &lines[idx + 1..]) else {
                continue;
            };
            if !table.fields.is_empty() {
                return Some(table);
            }
            fallback.get_or_insert(table);
        }
        fallback
    }
}

/// `Some(true)` for an exact caption, `Some(false)` for a suffixed one.
fn caption_kind(line: &str, label: &str) -> Option<bool> {
    let text = line
        .trim()
        .trim_start_matches(['#', '*', '>', '-', ' '])
        .trim();
    let rest = text.strip_prefix(label)?;
    let rest = rest.trim_matches(|c: char| c.is_whitespace() || matches!(c, '*' | ':' | '：'));
    Some(rest.is_empty())
}

fn read_table(caption: &str, after: &[&str]) -> Option<FieldTable> {
    let mut rows = after
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .take_while(|line| line.starts_with('|'));

    let headers: Vec<String> = rows
        .next()?
        .split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect();
    if headers.is_empty() || !is_separator_row(rows.next()?) {
        return None;
    }

    let columns = ColumnMap::new(&headers);
    let mut table = FieldTable {
        caption: caption.to_string(),
        headers,
        ..FieldTable::default()
    };
    for row in rows {
        if row.contains("|---") || is_rule_row(row) {
            continue;
        }
        let cells = split_cells(row);
        if cells.len() == table.headers.len() {
            table.fields.push(columns.to_field(&table.headers, &cells));
        } else {
            table.dropped_rows += 1;
        }
    }
    Some(table)
}

/// Cells between the outer pipes: `| a | b |` gives `["a", "b"]`.
fn split_cells(row: &str) -> Vec<&str> {
    let parts: Vec<&str> = row.split('|').collect();
    if parts.len() < 2 {
        return Vec::new();
    }
    parts[1..parts.len() - 1].iter().map(|cell| cell.trim()).collect()
}

fn is_separator_row(row: &str) -> bool {
    let cells = split_cells(row);
    !cells.is_empty()
        && cells.iter().all(|cell| {
            cell.contains('-') && cell.chars().all(|c| matches!(c, '-' | ':' | ' '))
        })
}

/// A separator repeated inside the body, e.g. `| --- | --- |`. Single-dash
/// cells are placeholders, not rules.
fn is_rule_row(row: &str) -> bool {
    is_separator_row(row) && split_cells(row).iter().all(|cell| cell.contains("--"))
}

/// Parses a required-column cell.
pub fn parse_required(cell: &str) -> Option<bool> {
    match cell.trim().to_lowercase().as_str() {
        "是" | "必填" | "yes" | "true" | "y" | "1" => Some(true),
        "否" | "选填" | "no" | "false" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Header positions of the columns with dedicated [`FieldSpec`] slots.
struct ColumnMap {
    name: Option<usize>,
    type_label: Option<usize>,
    description: Option<usize>,
    example: Option<usize>,
    required: Option<usize>,
}

impl ColumnMap {
    fn new(headers: &[String]) -> Self {
        let locate = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| headers.iter().position(|header| header == key))
        };
        Self {
            name: locate(NAME_KEYS),
            type_label: locate(TYPE_KEYS),
            description: locate(DESCRIPTION_KEYS),
            example: locate(EXAMPLE_KEYS),
            required: locate(REQUIRED_KEYS),
        }
    }

    fn is_mapped(&self, idx: usize) -> bool {
        [
            self.name,
            self.type_label,
            self.description,
            self.example,
            self.required,
        ]
        .contains(&Some(idx))
    }

    fn to_field(&self, headers: &[String], cells: &[&str]) -> FieldSpec {
        let cell = |idx: Option<usize>| idx.and_then(|i| cells.get(i)).copied().unwrap_or("");
        let non_empty = |idx: Option<usize>| Some(cell(idx)).filter(|v| !v.is_empty());

        let extra: BTreeMap<String, String> = headers
            .iter()
            .zip(cells)
            .enumerate()
            .filter(|(idx, (_, value))| !self.is_mapped(*idx) && !value.is_empty())
            .map(|(_, (header, value))| (header.clone(), (*value).to_string()))
            .collect();

        FieldSpec {
            original_name: cell(self.name).to_string(),
            type_label: cell(self.type_label).to_string(),
            description: cell(self.description).to_string(),
            example: non_empty(self.example).map(str::to_string),
            required: non_empty(self.required).and_then(parse_required),
            extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTION: &str = "\
输入参数
| 名称 | 类型 | 描述 |
|-----|-----|-----|
| symbol | str | 股票代码 |
| period | str |
| adjust | str | 复权类型 |

输出参数-历史行情数据
| 名称 | 类型 | 描述 | 单位 |
| --- | :---: | --- | --- |
| 日期 | object | 交易日 | - |
| 收盘 | float64 | 收盘价 | 元 |
";

    #[test]
    fn exact_caption_with_dropped_row() {
        let table = FieldTable::find(SECTION, "输入参数").expect("input table");
        assert_eq!(table.caption, "输入参数");
        assert_eq!(table.headers, vec!["名称", "类型", "描述"]);
        let names: Vec<&str> = table.fields.iter().map(|f| f.original_name.as_str()).collect();
        assert_eq!(names, vec!["symbol", "adjust"]);
        assert_eq!(table.dropped_rows, 1);
    }

    #[test]
    fn suffixed_caption_and_extra_columns() {
        let table = FieldTable::find(SECTION, "输出参数").expect("output table");
        assert_eq!(table.caption, "输出参数-历史行情数据");
        assert_eq!(table.fields.len(), 2);
        let close = &table.fields[1];
        assert_eq!(close.original_name, "收盘");
        assert_eq!(close.type_label, "float64");
        assert_eq!(close.extra.get("单位").map(String::as_str), Some("元"));
    }

    #[test]
    fn caption_without_table_is_ignored() {
        assert_eq!(FieldTable::find("输入参数\n无\n", "输入参数"), None);
        assert_eq!(FieldTable::find("no tables here", "输入参数"), None);
    }

    #[test]
    fn english_headers_and_required_column() {
        let section = "\
Input parameters
| Name | Type | Required | Example |
|------|------|----------|---------|
| symbol | str | yes | 000001 |
| start_date | str | 否 | |
";
        let table = FieldTable::find(section, "Input parameters").expect("table");
        assert_eq!(table.fields[0].required, Some(true));
        assert_eq!(table.fields[0].example.as_deref(), Some("000001"));
        assert_eq!(table.fields[1].required, Some(false));
        assert_eq!(table.fields[1].example, None);
    }

    #[test]
    fn required_cells() {
        assert_eq!(parse_required("是"), Some(true));
        assert_eq!(parse_required(" N "), Some(false));
        assert_eq!(parse_required("maybe"), None);
    }
}
