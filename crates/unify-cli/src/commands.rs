use std::path::Path;

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{info, info_span, warn};
use unify_core::{Unifier, UnifyOptions};
use unify_docs::{DocParser, parse_dir};
use unify_map::{AliasTable, FieldResolver, coverage, suggest_equivalents, validate};
use unify_model::RecordSet;
use unify_schema::{FieldCatalog, SchemaBuilder, write_artifacts};

use crate::cli::{
    FieldArgs, GenerateArgs, IfaceArgs, ResolveArgs, UnifyArgs, UnifyInputArgs, UnifyOutputArgs,
    ValidateArgs,
};
use crate::types::{GenerateResult, UnitSummary, ValidateResult};

/// Loads the alias table from `path`, or the built-in one.
pub fn load_aliases(path: Option<&Path>) -> Result<AliasTable> {
    match path {
        Some(path) => {
            AliasTable::load(path).with_context(|| format!("load alias table {}", path.display()))
        }
        None => AliasTable::builtin().context("load built-in alias table"),
    }
}

fn load_catalog(path: &Path) -> Result<FieldCatalog> {
    FieldCatalog::load(path).with_context(|| {
        format!(
            "load catalog {} (run `unify generate` first)",
            path.display()
        )
    })
}

pub fn run_generate(args: &GenerateArgs) -> Result<GenerateResult> {
    let span = info_span!("generate", docs = %args.docs.display());
    let _guard = span.enter();

    let table = load_aliases(args.aliases.as_deref())?;
    let alias_report = validate(&table);
    let alias_report = if args.allow_ambiguous {
        alias_report
    } else {
        alias_report
            .into_result()
            .context("alias table has ambiguous spellings (use --allow-ambiguous to continue)")?
    };

    let parser = DocParser::new(args.labels.labels()).context("build documentation parser")?;
    let units = parse_dir(&parser, &args.docs)
        .with_context(|| format!("parse documentation in {}", args.docs.display()))?;
    if units.is_empty() {
        bail!("no documentation units found in {}", args.docs.display());
    }

    let mut builder = SchemaBuilder::new();
    let mut summaries = Vec::with_capacity(units.len());
    for unit in units {
        summaries.push(UnitSummary {
            category: unit.category.clone(),
            interfaces: unit.interfaces.len(),
            input_fields: unit.interfaces.iter().map(|s| s.input_fields.len()).sum(),
            output_fields: unit.interfaces.iter().map(|s| s.output_fields.len()).sum(),
            dropped_rows: unit.dropped_rows,
        });
        builder.merge(unit.interfaces.into_iter().collect());
    }

    let resolver = FieldResolver::new(table);
    let catalog = builder.build(&resolver);
    let conflicts = catalog.alias_conflicts();
    for conflict in &conflicts {
        warn!(
            spelling = %conflict.spelling,
            canonicals = %conflict.canonicals.join(", "),
            "spelling claimed by several canonical fields"
        );
    }
    let artifacts = write_artifacts(&catalog, &args.output)
        .with_context(|| format!("write artifacts to {}", args.output.display()))?;
    let curated_fields = catalog
        .fields
        .keys()
        .filter(|name| resolver.is_canonical(name))
        .count();
    info!(
        interfaces = catalog.interfaces.len(),
        fields = catalog.fields.len(),
        curated = curated_fields,
        "generate finished"
    );

    Ok(GenerateResult {
        units: summaries,
        interfaces: catalog.interfaces.len(),
        fields: catalog.fields.len(),
        curated_fields,
        alias_report,
        conflicts,
        artifacts,
    })
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidateResult> {
    let table = load_aliases(args.aliases.as_deref())?;
    let report = validate(&table);
    let (coverage, suggestions) = match &args.catalog {
        Some(path) => {
            let catalog = load_catalog(path)?;
            if !catalog.built_with(&table) {
                warn!(catalog = %path.display(), "catalog was generated with a different alias table");
            }
            let observed = catalog.observed_counts();
            (
                Some(coverage(&table, &observed)),
                suggest_equivalents(&observed, &table),
            )
        }
        None => (None, Vec::new()),
    };
    Ok(ValidateResult {
        report,
        coverage,
        suggestions,
        top: args.top,
    })
}

/// Prints a field and returns whether it was found.
pub fn run_field(args: &FieldArgs) -> Result<bool> {
    let catalog = load_catalog(&args.catalog)?;
    match catalog.find_field(&args.name) {
        Some(field) => {
            crate::summary::print_field(field);
            Ok(true)
        }
        None => {
            crate::summary::print_not_found("field", &args.name, &catalog.similar_fields(&args.name));
            Ok(false)
        }
    }
}

/// Prints an interface and returns whether it was found.
pub fn run_iface(args: &IfaceArgs) -> Result<bool> {
    let catalog = load_catalog(&args.catalog)?;
    match (
        catalog.interface(&args.name),
        catalog.interface_fields(&args.name),
    ) {
        (Some(schema), Some(mapping)) => {
            crate::summary::print_interface(schema, mapping);
            Ok(true)
        }
        _ => {
            crate::summary::print_not_found(
                "interface",
                &args.name,
                &catalog.similar_interfaces(&args.name),
            );
            Ok(false)
        }
    }
}

/// Resolves each name: `(raw, canonical, curated)`.
pub fn run_resolve(args: &ResolveArgs) -> Result<Vec<(String, String, bool)>> {
    let resolver = FieldResolver::new(load_aliases(args.aliases.as_deref())?);
    Ok(args
        .names
        .iter()
        .map(|name| {
            let curated = resolver.lookup(name).is_some();
            (name.clone(), resolver.resolve(name), curated)
        })
        .collect())
}

fn open_unifier(args: &UnifyArgs) -> Result<Unifier> {
    let options = UnifyOptions::default()
        .with_date_form(args.date_form.into())
        .with_code_form(args.code_form.into());
    let unifier = Unifier::open(&args.catalog, args.aliases.as_deref()).with_context(|| {
        format!(
            "open catalog {} (run `unify generate` first)",
            args.catalog.display()
        )
    })?;
    Ok(unifier.with_options(options))
}

pub fn run_unify_input(args: &UnifyInputArgs) -> Result<Value> {
    let params: IndexMap<String, Value> =
        serde_json::from_str(&args.params).context("--params must be a JSON object")?;
    let unifier = open_unifier(&args.unify)?;
    let native = unifier.unify_input(&args.interface, &params)?;
    Ok(Value::Object(native.into_iter().collect()))
}

pub fn run_unify_output(args: &UnifyOutputArgs) -> Result<Value> {
    let text = std::fs::read_to_string(&args.records)
        .with_context(|| format!("read records {}", args.records.display()))?;
    let raw: RecordSet = serde_json::from_str(&text)
        .with_context(|| format!("{} must hold an object or a list of objects", args.records.display()))?;
    let unifier = open_unifier(&args.unify)?;
    let output = unifier.unify_output(&args.interface, raw)?;
    serde_json::to_value(&output).context("serialize unified output")
}
