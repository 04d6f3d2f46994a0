use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::Value;
use unify_map::AliasIssue;
use unify_model::{CanonicalField, Direction, InterfaceFieldMap, InterfaceSchema};

use crate::types::{GenerateResult, ValidateResult};

pub fn print_generate_summary(result: &GenerateResult) {
    println!("Catalog: {}", result.artifacts.mapping.display());
    println!("Field table: {}", result.artifacts.field_table.display());
    println!("Interface table: {}", result.artifacts.interface_table.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Unit"),
        header_cell("Interfaces"),
        header_cell("Inputs"),
        header_cell("Outputs"),
        header_cell("Dropped rows"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut totals = (0usize, 0usize, 0usize, 0usize);
    for unit in &result.units {
        totals.0 += unit.interfaces;
        totals.1 += unit.input_fields;
        totals.2 += unit.output_fields;
        totals.3 += unit.dropped_rows;
        table.add_row(vec![
            Cell::new(&unit.category)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(unit.interfaces),
            Cell::new(unit.input_fields),
            Cell::new(unit.output_fields),
            count_cell(unit.dropped_rows, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(totals.0).add_attribute(Attribute::Bold),
        Cell::new(totals.1).add_attribute(Attribute::Bold),
        Cell::new(totals.2).add_attribute(Attribute::Bold),
        count_cell(totals.3, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!(
        "{} interfaces, {} canonical fields ({} curated)",
        result.interfaces, result.fields, result.curated_fields
    );
    print_issue_table(&result.alias_report.issues);
    if !result.conflicts.is_empty() {
        eprintln!("Alias conflicts:");
        for conflict in &result.conflicts {
            eprintln!("- {} -> {}", conflict.spelling, conflict.canonicals.join(", "));
        }
    }
}

pub fn print_validate(result: &ValidateResult) {
    println!(
        "Alias table: {} canonical fields, {} spellings",
        result.report.canonicals, result.report.spellings
    );
    if result.report.is_clean() {
        println!("No issues found.");
    } else {
        print_issue_table(&result.report.issues);
    }

    if let Some(coverage) = &result.coverage {
        println!();
        println!(
            "Coverage: {}/{} observed names curated ({:.1}%)",
            coverage.covered.len(),
            coverage.observed(),
            coverage.ratio() * 100.0
        );
        if !coverage.uncovered.is_empty() {
            let mut table = Table::new();
            table.set_header(vec![header_cell("Uncovered name"), header_cell("Tables")]);
            apply_table_style(&mut table);
            align_column(&mut table, 1, CellAlignment::Right);
            for (name, count) in coverage.uncovered.iter().take(result.top) {
                table.add_row(vec![Cell::new(name), Cell::new(count)]);
            }
            println!("{table}");
        }
    }

    if !result.suggestions.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Spelling"),
            header_cell("Spelling"),
            header_cell("Similarity"),
            header_cell("Tables"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        align_column(&mut table, 3, CellAlignment::Right);
        for suggestion in result.suggestions.iter().take(result.top) {
            table.add_row(vec![
                Cell::new(&suggestion.left),
                Cell::new(&suggestion.right),
                Cell::new(format!("{:.3}", suggestion.similarity)),
                Cell::new(format!(
                    "{} / {}",
                    suggestion.left_count, suggestion.right_count
                )),
            ]);
        }
        println!();
        println!("Possible equivalents:");
        println!("{table}");
    }
}

pub fn print_field(field: &CanonicalField) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    let aliases: Vec<&str> = field.aliases.iter().map(String::as_str).collect();
    let histogram: Vec<String> = field
        .type_histogram
        .iter()
        .map(|(ty, count)| format!("{ty}: {count}"))
        .collect();
    table.add_row(vec![label_cell("Canonical"), Cell::new(&field.canonical_name)]);
    table.add_row(vec![label_cell("Aliases"), list_cell(&aliases)]);
    table.add_row(vec![label_cell("Type"), Cell::new(field.common_type)]);
    table.add_row(vec![label_cell("Types seen"), Cell::new(histogram.join(", "))]);
    table.add_row(vec![
        label_cell("Returned by"),
        count_list_cell(&field.producing_interfaces),
    ]);
    table.add_row(vec![
        label_cell("Accepted by"),
        count_list_cell(&field.consuming_interfaces),
    ]);
    for description in &field.sample_descriptions {
        table.add_row(vec![label_cell("Description"), Cell::new(description)]);
    }
    println!("{table}");
}

pub fn print_interface(schema: &InterfaceSchema, mapping: &InterfaceFieldMap) {
    println!("{} [{}]", schema.func_name, schema.data_type_category);
    if let Some(title) = &schema.title {
        println!("{title}");
    }
    println!("{}", schema.description);
    println!("{}", schema.target_url);
    if let Some(limit) = &schema.limit {
        println!("Limit: {limit}");
    }
    for direction in [Direction::Input, Direction::Output] {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Field"),
            header_cell("Canonical"),
            header_cell("Type"),
            header_cell("Description"),
        ]);
        apply_table_style(&mut table);
        let canonical = mapping.side(direction);
        for spec in schema.fields(direction) {
            let name = spec.original_name.trim();
            let canonical_cell = match canonical.get(name) {
                Some(mapped) if mapped == name => dim_cell(mapped),
                Some(mapped) => Cell::new(mapped).fg(Color::Green),
                None => dim_cell("-"),
            };
            table.add_row(vec![
                Cell::new(name),
                canonical_cell,
                Cell::new(&spec.type_label),
                Cell::new(&spec.description),
            ]);
        }
        println!();
        println!("{} ({}):", direction.as_str(), schema.fields(direction).len());
        println!("{table}");
    }
}

pub fn print_not_found(kind: &str, name: &str, similar: &[&str]) {
    eprintln!("{kind} not found: {name}");
    if !similar.is_empty() {
        eprintln!("Similar: {}", similar.join(", "));
    }
}

pub fn print_resolutions(resolutions: &[(String, String, bool)]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Name"), header_cell("Canonical")]);
    apply_table_style(&mut table);
    for (raw, canonical, curated) in resolutions {
        let canonical_cell = if *curated {
            Cell::new(canonical).fg(Color::Green)
        } else {
            dim_cell(format!("{canonical} (uncurated)"))
        };
        table.add_row(vec![Cell::new(raw), canonical_cell]);
    }
    println!("{table}");
}

pub fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_issue_table(issues: &[AliasIssue]) {
    if issues.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Severity"), header_cell("Issue")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for issue in issues {
        let severity = if issue.is_error() {
            Cell::new("ERROR").fg(Color::Red).add_attribute(Attribute::Bold)
        } else {
            Cell::new("WARN").fg(Color::Yellow)
        };
        table.add_row(vec![severity, Cell::new(issue.to_string())]);
    }
    println!();
    println!("Alias issues:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn list_cell(items: &[&str]) -> Cell {
    if items.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(items.join(", "))
    }
}

fn count_list_cell(items: &[String]) -> Cell {
    if items.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(format!("{} ({})", items.join(", "), items.len()))
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
