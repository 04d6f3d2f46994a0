use serde_json::{Map, Value, json};
use unify_map::{AliasTable, FieldResolver};
use unify_schema::{FieldCatalog, SchemaBuilder, write_artifacts};

const STOCK_DOC: &str = "\
## 历史行情
接口: stock_hist
目标地址: http://example.com/hist
描述: 历史行情数据

输入参数
| 名称 | 类型 | 描述 |
|-----|-----|-----|
| symbol | str | 股票代码 |
| start_date | str | 开始日期 |

输出参数
| 名称 | 类型 | 描述 |
|-----|-----|-----|
| 日期 | object | 交易日 |
| 收盘 | float64 | 收盘价 |
| 振幅 | float64 | - |

## 实时行情
接口: stock_spot
目标地址: http://example.com/spot
描述: 实时行情

输入参数
| 名称 | 类型 | 描述 |
|-----|-----|-----|
| - | - | - |

输出参数
| 名称 | 类型 | 描述 |
|-----|-----|-----|
| 代码 | object | 股票代码 |
| 最新价 | float64 | 最新价 |
";

fn resolver() -> FieldResolver {
    FieldResolver::new(AliasTable::from_entries([
        ("symbol", vec!["代码"]),
        ("date", vec!["日期", "trade_date"]),
        ("close", vec!["收盘"]),
        ("price", vec!["最新价"]),
    ]))
}

fn build() -> FieldCatalog {
    let builder: SchemaBuilder = unify_docs::parse(STOCK_DOC).into_iter().collect();
    builder.build(&resolver())
}

#[test]
fn catalog_projection_snapshot() {
    let catalog = build();
    let fields: Map<String, Value> = catalog
        .fields
        .values()
        .map(|field| {
            (
                field.canonical_name.clone(),
                json!({
                    "aliases": field.aliases,
                    "common_type": field.common_type,
                    "producing": field.producing_interfaces,
                    "consuming": field.consuming_interfaces,
                }),
            )
        })
        .collect();
    let projection = json!({
        "fields": fields,
        "interface_to_fields": catalog.interface_to_fields,
    });

    insta::assert_json_snapshot!(projection, @r#"
    {
      "fields": {
        "symbol": {
          "aliases": [
            "代码"
          ],
          "common_type": "string",
          "producing": [
            "stock_spot"
          ],
          "consuming": [
            "stock_hist"
          ]
        },
        "start_date": {
          "aliases": [],
          "common_type": "string",
          "producing": [],
          "consuming": [
            "stock_hist"
          ]
        },
        "date": {
          "aliases": [
            "日期"
          ],
          "common_type": "string",
          "producing": [
            "stock_hist"
          ],
          "consuming": []
        },
        "close": {
          "aliases": [
            "收盘"
          ],
          "common_type": "float",
          "producing": [
            "stock_hist"
          ],
          "consuming": []
        },
        "振幅": {
          "aliases": [],
          "common_type": "float",
          "producing": [
            "stock_hist"
          ],
          "consuming": []
        },
        "price": {
          "aliases": [
            "最新价"
          ],
          "common_type": "float",
          "producing": [
            "stock_spot"
          ],
          "consuming": []
        }
      },
      "interface_to_fields": {
        "stock_hist": {
          "input": {
            "symbol": "symbol",
            "start_date": "start_date"
          },
          "output": {
            "日期": "date",
            "收盘": "close",
            "振幅": "振幅"
          }
        },
        "stock_spot": {
          "input": {},
          "output": {
            "代码": "symbol",
            "最新价": "price"
          }
        }
      }
    }
    "#);
}

#[test]
fn built_catalog_has_disjoint_alias_sets() {
    let catalog = build();
    assert!(catalog.alias_conflicts().is_empty());
    assert_eq!(catalog.version, "2.0");
    assert!(catalog.built_with(resolver().table()));
    assert!(!catalog.built_with(&AliasTable::from_entries([("date", vec!["日期"])])));
}

#[test]
fn observed_counts_skip_placeholders() {
    let counts = build().observed_counts();
    assert_eq!(counts.get("symbol"), Some(&1));
    assert_eq!(counts.get("代码"), Some(&1));
    assert!(!counts.contains_key("-"));
    assert_eq!(counts.len(), 7);
}

#[test]
fn artifacts_round_trip_through_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = build();
    let paths = write_artifacts(&catalog, &dir.path().join("out")).expect("write artifacts");

    let loaded = FieldCatalog::load(&paths.mapping).expect("load catalog");
    assert_eq!(loaded, catalog);
    assert_eq!(
        loaded.find_field("最新价").map(|f| f.canonical_name.as_str()),
        Some("price")
    );

    let fields_csv = std::fs::read_to_string(&paths.field_table).expect("field table");
    let fields_csv = fields_csv.trim_start_matches('\u{feff}');
    assert!(fields_csv.starts_with("canonical_name,aliases,common_type,"));
    assert_eq!(fields_csv.lines().count(), 1 + catalog.fields.len());

    let iface_csv = std::fs::read_to_string(&paths.interface_table).expect("interface table");
    assert!(iface_csv.contains("stock_hist,,历史行情数据,2,symbol|start_date,3,日期|收盘|振幅"));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = FieldCatalog::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, unify_schema::SchemaError::Io { .. }));
}
