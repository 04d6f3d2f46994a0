//! CLI argument definitions for the `unify` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use unify_docs::DocLabels;
use unify_normalize::{CodeForm, DateForm};

/// Default location of the generated catalog.
pub const DEFAULT_CATALOG: &str = "result/complete_field_mapping.json";

#[derive(Parser)]
#[command(
    name = "unify",
    version,
    about = "Field canonicalization and value normalization for data-provider interfaces",
    long_about = "Build a canonical field catalog from interface documentation and use it\n\
                  to translate request parameters and response records.\n\n\
                  Run `generate` first; the other commands read its catalog."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse documentation units and write the field catalog and CSV views.
    Generate(GenerateArgs),

    /// Check the alias table, and its coverage of a catalog when given.
    Validate(ValidateArgs),

    /// Show a canonical field by canonical name or alias.
    Field(FieldArgs),

    /// Show an interface and its field mapping.
    Iface(IfaceArgs),

    /// Resolve a raw field name to its canonical name.
    Resolve(ResolveArgs),

    /// Translate request parameters into an interface's native spelling.
    UnifyInput(UnifyInputArgs),

    /// Re-key provider records onto canonical field names.
    UnifyOutput(UnifyOutputArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Directory containing `*.md.txt` documentation units.
    #[arg(long = "docs", value_name = "DIR")]
    pub docs: PathBuf,

    /// Alias table JSON (default: built-in table).
    #[arg(long = "aliases", value_name = "FILE")]
    pub aliases: Option<PathBuf>,

    /// Output directory for the catalog and CSV views.
    #[arg(long = "output", value_name = "DIR", default_value = "result")]
    pub output: PathBuf,

    /// Label language used by the documentation headers and captions.
    #[arg(long = "labels", value_enum, default_value = "native")]
    pub labels: LabelsArg,

    /// Build the catalog even if the alias table has ambiguous spellings.
    #[arg(long = "allow-ambiguous")]
    pub allow_ambiguous: bool,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Alias table JSON (default: built-in table).
    #[arg(long = "aliases", value_name = "FILE")]
    pub aliases: Option<PathBuf>,

    /// Catalog to measure alias coverage against.
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Rows shown in the uncovered and suggestion tables.
    #[arg(long = "top", value_name = "N", default_value_t = 20)]
    pub top: usize,
}

#[derive(Parser)]
pub struct FieldArgs {
    /// Canonical name or alias.
    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(long = "catalog", value_name = "FILE", default_value = DEFAULT_CATALOG)]
    pub catalog: PathBuf,
}

#[derive(Parser)]
pub struct IfaceArgs {
    /// Interface function name.
    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(long = "catalog", value_name = "FILE", default_value = DEFAULT_CATALOG)]
    pub catalog: PathBuf,
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// Raw field names.
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,

    /// Alias table JSON (default: built-in table).
    #[arg(long = "aliases", value_name = "FILE")]
    pub aliases: Option<PathBuf>,
}

/// Options shared by the two unification commands.
#[derive(Parser)]
pub struct UnifyArgs {
    #[arg(long = "catalog", value_name = "FILE", default_value = DEFAULT_CATALOG)]
    pub catalog: PathBuf,

    /// Alias table JSON (default: built-in table).
    #[arg(long = "aliases", value_name = "FILE")]
    pub aliases: Option<PathBuf>,

    /// Output form for date fields.
    #[arg(long = "date-form", value_enum, default_value = "dashed")]
    pub date_form: DateFormArg,

    /// Output form for instrument codes.
    #[arg(long = "code-form", value_enum, default_value = "digits")]
    pub code_form: CodeFormArg,
}

#[derive(Parser)]
pub struct UnifyInputArgs {
    /// Interface function name.
    #[arg(value_name = "IFACE")]
    pub interface: String,

    /// Parameters as a JSON object, e.g. '{"symbol": "sh600000"}'.
    #[arg(long = "params", value_name = "JSON")]
    pub params: String,

    #[command(flatten)]
    pub unify: UnifyArgs,
}

#[derive(Parser)]
pub struct UnifyOutputArgs {
    /// Interface function name.
    #[arg(value_name = "IFACE")]
    pub interface: String,

    /// JSON file holding one record or a list of records.
    #[arg(long = "records", value_name = "FILE")]
    pub records: PathBuf,

    #[command(flatten)]
    pub unify: UnifyArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LabelsArg {
    Native,
    English,
}

impl LabelsArg {
    pub fn labels(self) -> DocLabels {
        match self {
            Self::Native => DocLabels::default(),
            Self::English => DocLabels::english(),
        }
    }
}

/// Date output forms.
#[derive(Clone, Copy, ValueEnum)]
pub enum DateFormArg {
    /// YYYYMMDD
    Compact,
    /// YYYY-MM-DD
    Dashed,
    /// YYYY-MM-DD HH:MM:SS
    Datetime,
    /// YYYYMM
    YearMonth,
}

impl From<DateFormArg> for DateForm {
    fn from(arg: DateFormArg) -> Self {
        match arg {
            DateFormArg::Compact => DateForm::Compact,
            DateFormArg::Dashed => DateForm::Dashed,
            DateFormArg::Datetime => DateForm::DateTime,
            DateFormArg::YearMonth => DateForm::YearMonth,
        }
    }
}

/// Instrument code output forms.
#[derive(Clone, Copy, ValueEnum)]
pub enum CodeFormArg {
    /// 000001
    Digits,
    /// 000001.SZ
    Suffixed,
    /// sz000001
    Prefixed,
}

impl From<CodeFormArg> for CodeForm {
    fn from(arg: CodeFormArg) -> Self {
        match arg {
            CodeFormArg::Digits => CodeForm::Digits,
            CodeFormArg::Suffixed => CodeForm::Suffixed,
            CodeFormArg::Prefixed => CodeForm::Prefixed,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
