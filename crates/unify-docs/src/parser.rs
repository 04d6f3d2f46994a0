//! Interface header and section parsing.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};
use unify_model::InterfaceSchema;

use crate::error::Result;
use crate::labels::DocLabels;
use crate::table::FieldTable;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^#{1,6}[ \t]+(.+?)[ \t#]*$").expect("Invalid heading regex")
});

static DEFAULT_PARSER: LazyLock<DocParser> = LazyLock::new(|| {
    DocParser::new(DocLabels::default()).expect("Invalid default documentation labels")
});

/// Parses one documentation unit with the default labels.
pub fn parse(text: &str) -> Vec<InterfaceSchema> {
    DEFAULT_PARSER.parse(text)
}

/// Interfaces recovered from one unit plus what had to be discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub interfaces: Vec<InterfaceSchema>,
    /// Table rows dropped for a cell-count mismatch, across all interfaces.
    pub dropped_rows: usize,
}

/// Documentation parser for one label set.
#[derive(Debug, Clone)]
pub struct DocParser {
    labels: DocLabels,
    header: Regex,
}

struct HeaderMatch<'a> {
    start: usize,
    end: usize,
    func_name: &'a str,
    target_url: &'a str,
    description: &'a str,
    limit: Option<&'a str>,
}

impl DocParser {
    pub fn new(labels: DocLabels) -> Result<Self> {
        let line = |label: &str, group: &str| {
            format!(
                r"[ \t]*{}[ \t]*[:：][ \t]*(?P<{group}>[^\n]*?)[ \t]*(?:\n|$)",
                regex::escape(label)
            )
        };
        let pattern = format!(
            "(?m)^{}{}{}(?:{})?",
            line(&labels.interface, "name"),
            line(&labels.target, "url"),
            line(&labels.description, "desc"),
            line(&labels.limit, "limit"),
        );
        Ok(Self {
            header: Regex::new(&pattern)?,
            labels,
        })
    }

    pub fn parse(&self, text: &str) -> Vec<InterfaceSchema> {
        self.parse_unit(text, "").interfaces
    }

    /// Parses every interface in `text`, tagging each with `category`.
    ///
    /// The section of interface `i` runs from its header (or the document
    /// start, for the first one) to the next header. The title is the last
    /// heading between the previous header and this one.
    pub fn parse_unit(&self, text: &str, category: &str) -> ParseOutcome {
        let text = text.replace("\r\n", "\n");
        let headers = self.headers(&text);
        let mut outcome = ParseOutcome::default();

        for (idx, header) in headers.iter().enumerate() {
            if header.func_name.is_empty() {
                debug!(offset = header.start, "skipping header with empty interface name");
                continue;
            }
            let previous_end = idx.checked_sub(1).map_or(0, |prev| headers[prev].end);
            let section_start = if idx == 0 { 0 } else { header.start };
            let section_end = headers.get(idx + 1).map_or(text.len(), |next| next.start);
            let section = &text[section_start..section_end];

            let mut schema = InterfaceSchema::new(header.func_name);
            schema.target_url = header.target_url.to_string();
            schema.description = header.description.to_string();
            schema.data_type_category = category.to_string();
            schema.limit = header.limit.map(str::to_string);
            schema.title = last_heading(&text[previous_end..header.start]);
            schema.example_lines = self.example_lines(section);

            for (label, slot) in [
                (&self.labels.input_table, &mut schema.input_fields),
                (&self.labels.output_table, &mut schema.output_fields),
            ] {
                if let Some(table) = FieldTable::find(section, label) {
                    if table.dropped_rows > 0 {
                        warn!(
                            interface = %header.func_name,
                            table = %table.caption,
                            dropped = table.dropped_rows,
                            "dropped malformed table rows"
                        );
                        outcome.dropped_rows += table.dropped_rows;
                    }
                    *slot = table.fields;
                }
            }

            debug!(
                interface = %schema.func_name,
                inputs = schema.input_fields.len(),
                outputs = schema.output_fields.len(),
                "parsed interface"
            );
            outcome.interfaces.push(schema);
        }
        outcome
    }

    fn headers<'a>(&self, text: &'a str) -> Vec<HeaderMatch<'a>> {
        self.header
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let group = |name: &str| caps.name(name).map_or("", |m| m.as_str().trim());
                Some(HeaderMatch {
                    start: whole.start(),
                    end: whole.end(),
                    func_name: group("name"),
                    target_url: group("url"),
                    description: group("desc"),
                    limit: caps
                        .name("limit")
                        .map(|m| m.as_str().trim())
                        .filter(|limit| !limit.is_empty()),
                })
            })
            .collect()
    }

    /// Non-blank lines inside the fenced block that follows the example label.
    fn example_lines(&self, section: &str) -> usize {
        let mut lines = section.lines().map(str::trim);
        if !lines.any(|line| line == self.labels.data_example) {
            return 0;
        }
        let mut lines = lines.skip_while(|line| line.is_empty());
        if !lines.next().is_some_and(|line| line.starts_with("```")) {
            return 0;
        }
        lines
            .take_while(|line| !line.starts_with("```"))
            .filter(|line| !line.is_empty())
            .count()
    }
}

fn last_heading(region: &str) -> Option<String> {
    HEADING
        .captures_iter(region)
        .last()
        .map(|caps| caps[1].trim().to_string())
        .filter(|title| !title.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_accepts_both_colons_and_limit() {
        let text = "接口：stock_zh_a_spot\n目标地址: https://example.com/spot\n描述:  沪深京 A 股实时行情  \n限量: 单次返回全部数据\n";
        let schemas = parse(text);
        assert_eq!(schemas.len(), 1);
        let spot = &schemas[0];
        assert_eq!(spot.func_name, "stock_zh_a_spot");
        assert_eq!(spot.target_url, "https://example.com/spot");
        assert_eq!(spot.description, "沪深京 A 股实时行情");
        assert_eq!(spot.limit.as_deref(), Some("单次返回全部数据"));
    }

    #[test]
    fn headings_attach_to_the_following_interface() {
        let text = "\
# 股票数据
### 实时行情
接口: a_spot
目标地址: u1
描述: d1

### 历史行情
接口: a_hist
目标地址: u2
描述: d2
";
        let schemas = parse(text);
        assert_eq!(schemas[0].title.as_deref(), Some("实时行情"));
        assert_eq!(schemas[1].title.as_deref(), Some("历史行情"));
        assert_eq!(schemas[1].limit, None);
    }

    #[test]
    fn empty_interface_name_is_skipped() {
        let text = "接口:\n目标地址: u\n描述: d\n";
        assert!(parse(text).is_empty());
    }

    #[test]
    fn counts_example_lines() {
        let text = "\
接口: a_spot
目标地址: u
描述: d

数据示例

```
     代码   名称
0  000001  平安银行

1  600000  浦发银行
```
";
        assert_eq!(parse(text)[0].example_lines, 3);
    }
}
