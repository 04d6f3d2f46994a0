//! Ordered value-normalization rules.
//!
//! A rule matches when one of its keywords occurs in the lowercased canonical
//! field name. Rules are tried in order and the first match decides; a
//! matching textual-only rule leaves non-string values alone rather than
//! letting a later rule claim them.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::debug;
use unify_normalize::{MarketHint, Normalized, normalize_code, normalize_date, normalize_float};

use crate::options::UnifyOptions;

/// Which normalizer a rule routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Instrument codes, rendered in [`UnifyOptions::code_form`].
    Identifier,
    /// Dates and timestamps, rendered in [`UnifyOptions::date_form`].
    Temporal,
    /// Prices, amounts, and ratios parsed to floats.
    Magnitude,
}

impl RuleKind {
    /// Runs the normalizer for this kind over one value.
    pub fn normalize(self, value: &Value, options: &UnifyOptions) -> Normalized<Value> {
        let text = match value {
            Value::Null => return Normalized::Absent,
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            other => return Normalized::Unchanged(other.to_string()),
        };
        match self {
            Self::Identifier => {
                normalize_code(&text, options.code_form, MarketHint::Auto).map(Value::String)
            }
            Self::Temporal => normalize_date(&text, options.date_form).map(|date| {
                if date.clamped {
                    debug!(raw = %text, normalized = %date.text, "clamped out-of-range date part");
                }
                Value::String(date.text)
            }),
            Self::Magnitude => match normalize_float(&text) {
                Normalized::Value(number) => Number::from_f64(number)
                    .map_or(Normalized::Unchanged(text), |n| Normalized::Value(Value::Number(n))),
                Normalized::Unchanged(raw) => Normalized::Unchanged(raw),
                Normalized::Absent => Normalized::Absent,
            },
        }
    }
}

/// One keyword-to-normalizer rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRule {
    pub name: String,
    /// Lowercase substrings searched for in the canonical name.
    pub keywords: Vec<String>,
    pub kind: RuleKind,
    /// Only string values are normalized; others pass through.
    #[serde(default)]
    pub textual_only: bool,
}

impl ValueRule {
    pub fn new(name: impl Into<String>, kind: RuleKind, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            kind,
            textual_only: false,
        }
    }

    pub fn textual_only(mut self) -> Self {
        self.textual_only = true;
        self
    }

    pub fn matches(&self, field: &str) -> bool {
        let field = field.to_lowercase();
        self.keywords.iter().any(|keyword| field.contains(keyword.as_str()))
    }

    /// Normalized value, or `value` itself when the rule declines.
    pub fn apply(&self, value: Value, options: &UnifyOptions) -> Value {
        if self.textual_only && !value.is_string() {
            return value;
        }
        match self.kind.normalize(&value, options) {
            Normalized::Value(normalized) => normalized,
            Normalized::Unchanged(_) => value,
            Normalized::Absent => Value::Null,
        }
    }
}

/// Rules in precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<ValueRule>,
}

impl Default for RuleSet {
    /// Identifier, then temporal, then textual-only magnitude.
    fn default() -> Self {
        Self::new(vec![
            ValueRule::new(
                "identifier",
                RuleKind::Identifier,
                &["symbol", "code", "stock", "bond", "fund", "index", "代码"],
            ),
            ValueRule::new(
                "temporal",
                RuleKind::Temporal,
                &["date", "time", "year", "month", "日期", "时间"],
            ),
            ValueRule::new(
                "magnitude",
                RuleKind::Magnitude,
                &["price", "amount", "value", "rate", "percent"],
            )
            .textual_only(),
        ])
    }
}

impl RuleSet {
    pub fn new(rules: Vec<ValueRule>) -> Self {
        Self { rules }
    }

    /// A rule set that never rewrites values.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn push(&mut self, rule: ValueRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[ValueRule] {
        &self.rules
    }

    /// First rule whose keywords match `field`.
    pub fn select(&self, field: &str) -> Option<&ValueRule> {
        self.rules.iter().find(|rule| rule.matches(field))
    }

    /// Normalizes `value` with the rule selected for `field`.
    pub fn apply(&self, field: &str, value: Value, options: &UnifyOptions) -> Value {
        match self.select(field) {
            Some(rule) => rule.apply(value, options),
            None => value,
        }
    }
}
