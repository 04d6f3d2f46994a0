//! End-to-end parsing of documentation units.

use std::fs;

use unify_docs::{DocLabels, DocParser, parse, parse_dir};

const STOCK_UNIT: &str = "\
## A股

### 实时行情数据

接口: stock_zh_a_spot_em
目标地址: https://quote.eastmoney.com/center/gridlist.html#hs_a_board
描述: 东方财富网-沪深京 A 股-实时行情数据
限量: 单次返回所有沪深京 A 股上市公司的实时行情数据

输入参数

| 名称 | 类型 | 描述 |
|-----|-----|-----|
| - | - | - |

输出参数

| 名称 | 类型 | 描述 |
|-----|-----|-----|
| 序号 | int64 | - |
| 代码 | object | - |
| 名称 | object | - |
| 最新价 | float64 | - |
| 涨跌幅 | float64 | 注意单位: % |

数据示例

```
      序号 代码 名称 最新价
0        1  000001  平安银行  10.52
```

### 历史行情数据

接口: stock_zh_a_hist
目标地址: https://quote.eastmoney.com/concept/sh603777.html?from=classic
描述: 东方财富-沪深京 A 股日频率数据

输入参数

| 名称 | 类型 | 描述 |
|-----|-----|-----|
| symbol | str | symbol='603777'; 股票代码 |
| period | str | period='daily' | extra |
| start_date | str | start_date='20210301'; 开始查询的日期 |

输出参数-历史行情数据

| 名称 | 类型 | 描述 |
|-----|-----|-----|
| 日期 | object | 交易日 |
| 收盘 | float64 | 收盘价 |
";

#[test]
fn recovers_every_interface_in_a_unit() {
    let schemas = parse(STOCK_UNIT);
    let names: Vec<&str> = schemas.iter().map(|s| s.func_name.as_str()).collect();
    assert_eq!(names, vec!["stock_zh_a_spot_em", "stock_zh_a_hist"]);

    let spot = &schemas[0];
    assert_eq!(spot.title.as_deref(), Some("实时行情数据"));
    assert!(spot.limit.is_some());
    assert_eq!(spot.input_fields.len(), 1);
    assert_eq!(spot.input_fields[0].original_name, "-");
    assert_eq!(spot.output_fields.len(), 5);
    assert_eq!(spot.output_fields[4].description, "注意单位: %");
    assert_eq!(spot.example_lines, 2);
}

#[test]
fn broken_row_keeps_identity_and_other_rows() {
    let schemas = parse(STOCK_UNIT);
    let hist = &schemas[1];
    assert_eq!(hist.target_url, "https://quote.eastmoney.com/concept/sh603777.html?from=classic");
    assert_eq!(hist.description, "东方财富-沪深京 A 股日频率数据");
    let inputs: Vec<&str> = hist.input_fields.iter().map(|f| f.original_name.as_str()).collect();
    assert_eq!(inputs, vec!["symbol", "start_date"]);
    let outputs: Vec<&str> = hist.output_fields.iter().map(|f| f.original_name.as_str()).collect();
    assert_eq!(outputs, vec!["日期", "收盘"]);
    assert_eq!(hist.example_lines, 0);
}

#[test]
fn parse_unit_counts_dropped_rows() {
    let parser = DocParser::new(DocLabels::default()).expect("parser");
    let outcome = parser.parse_unit(STOCK_UNIT, "stock");
    assert_eq!(outcome.dropped_rows, 1);
    assert!(outcome.interfaces.iter().all(|s| s.data_type_category == "stock"));
}

#[test]
fn tables_never_leak_across_sections() {
    let text = "\
接口: first
目标地址: u1
描述: no tables here

接口: second
目标地址: u2
描述: d2

输出参数
| 名称 | 类型 | 描述 |
|---|---|---|
| close | float | price |
";
    let schemas = parse(text);
    assert!(schemas[0].output_fields.is_empty());
    assert_eq!(schemas[1].output_fields.len(), 1);
}

#[test]
fn crlf_and_english_labels() {
    let text = "Interface: fx_spot\r\nTarget: https://example.com/fx\r\nDescription: FX spot quotes\r\n\r\nOutput parameters (quotes)\r\n| Name | Type | Description |\r\n|---|---|---|\r\n| pair | str | currency pair |\r\n";
    let parser = DocParser::new(DocLabels::english()).expect("parser");
    let schemas = parser.parse(text);
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas[0].description, "FX spot quotes");
    assert_eq!(schemas[0].output_fields[0].original_name, "pair");
}

#[test]
fn parses_directory_in_file_name_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("stock.md.txt"), STOCK_UNIT).expect("write stock");
    fs::write(
        dir.path().join("bond.md.txt"),
        "接口: bond_zh_hs_spot\n目标地址: u\n描述: 债券行情\n",
    )
    .expect("write bond");
    fs::write(dir.path().join("notes.txt"), "接口: ignored\n目标地址: u\n描述: d\n")
        .expect("write notes");

    let parser = DocParser::new(DocLabels::default()).expect("parser");
    let units = parse_dir(&parser, dir.path()).expect("parse dir");
    let categories: Vec<&str> = units.iter().map(|u| u.category.as_str()).collect();
    assert_eq!(categories, vec!["bond", "stock"]);
    assert_eq!(units[1].interfaces.len(), 2);
    assert_eq!(units[1].dropped_rows, 1);
}

#[test]
fn missing_directory_is_an_error() {
    let parser = DocParser::new(DocLabels::default()).expect("parser");
    assert!(parse_dir(&parser, std::path::Path::new("/nonexistent/docs")).is_err());
}
