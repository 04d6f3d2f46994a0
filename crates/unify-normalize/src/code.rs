//! Market-instrument code normalization.
//!
//! Codes arrive as bare digits (`1`, `000001`), suffixed (`000001.SZ`,
//! `600000sh`) or prefixed (`sz000001`). The market marker is matched
//! case-insensitively, longest variant first, and the numeric part is
//! zero-filled to six digits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::outcome::{Normalized, is_null_like};

const CODE_WIDTH: usize = 6;

/// Exchange a code is listed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    #[serde(rename = "sh")]
    Shanghai,
    #[serde(rename = "sz")]
    Shenzhen,
    #[serde(rename = "bj")]
    Beijing,
}

impl Market {
    pub const ALL: [Market; 3] = [Market::Shanghai, Market::Shenzhen, Market::Beijing];

    /// Lowercase two-letter tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Shanghai => "sh",
            Self::Shenzhen => "sz",
            Self::Beijing => "bj",
        }
    }

    /// Market implied by the leading digit of an unmarked six-digit code.
    ///
    /// `6` is checked before `0`/`3`, which is checked before `8`/`4`/`9`.
    pub fn infer(digits: &str) -> Option<Market> {
        if digits.len() != CODE_WIDTH || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match digits.as_bytes()[0] {
            b'6' => Some(Self::Shanghai),
            b'0' | b'3' => Some(Self::Shenzhen),
            b'8' | b'4' | b'9' => Some(Self::Beijing),
            _ => None,
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Market {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|market| market.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown market '{s}'"))
    }
}

/// Market to assume when the code carries no marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarketHint {
    /// Infer from the leading digit of a six-digit code.
    #[default]
    Auto,
    /// Always use this market.
    Fixed(Market),
    /// Leave the market undetermined.
    Unknown,
}

/// Target rendering for normalized codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeForm {
    /// `000001`
    #[default]
    Digits,
    /// `000001.SZ`
    Suffixed,
    /// `sz000001`
    Prefixed,
}

impl FromStr for CodeForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "digits" => Ok(Self::Digits),
            "suffixed" | "suffix" => Ok(Self::Suffixed),
            "prefixed" | "prefix" => Ok(Self::Prefixed),
            other => Err(format!("unknown code form '{other}'")),
        }
    }
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split = value.len().checked_sub(suffix.len())?;
    let tail = value.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &value[..split])
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &value[prefix.len()..])
}

/// Splits an explicit market marker off `value`.
///
/// Suffixes are tried before prefixes; within each, dotted variants come first.
fn split_marker(value: &str) -> Option<(Market, &str)> {
    let dotted = Market::ALL.map(|market| (market, format!(".{}", market.tag())));
    let bare = Market::ALL.map(|market| (market, market.tag().to_string()));

    dotted
        .iter()
        .chain(bare.iter())
        .find_map(|(market, suffix)| {
            strip_suffix_ignore_case(value, suffix).map(|rest| (*market, rest))
        })
        .or_else(|| {
            bare.iter().find_map(|(market, prefix)| {
                strip_prefix_ignore_case(value, prefix).map(|rest| (*market, rest))
            })
        })
}

fn first_digit_run(value: &str) -> &str {
    let Some(start) = value.find(|c: char| c.is_ascii_digit()) else {
        return "";
    };
    let rest = &value[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Normalizes an instrument code.
///
/// Inputs without any digit come back as [`Normalized::Unchanged`]. A
/// market-dependent `form` with no determinable market renders digits only.
pub fn normalize_code(raw: &str, form: CodeForm, hint: MarketHint) -> Normalized<String> {
    let trimmed = raw.trim();
    if is_null_like(trimmed) {
        return Normalized::Absent;
    }

    let (market, numeric) = match split_marker(trimmed) {
        Some((market, rest)) => (Some(market), rest),
        None => {
            let run = first_digit_run(trimmed);
            let market = match hint {
                MarketHint::Auto => Market::infer(run),
                MarketHint::Fixed(market) => Some(market),
                MarketHint::Unknown => None,
            };
            (market, run)
        }
    };

    let digits: String = numeric.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Normalized::Unchanged(trimmed.to_string());
    }
    let padded = format!("{digits:0>CODE_WIDTH$}");

    let rendered = match (form, market) {
        (CodeForm::Suffixed, Some(market)) => {
            format!("{padded}.{}", market.tag().to_ascii_uppercase())
        }
        (CodeForm::Prefixed, Some(market)) => format!("{}{padded}", market.tag()),
        _ => padded,
    };
    Normalized::Value(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(raw: &str) -> Option<String> {
        normalize_code(raw, CodeForm::Digits, MarketHint::Auto).into_value()
    }

    #[test]
    fn strips_markers_and_pads() {
        assert_eq!(digits("000001.SZ").as_deref(), Some("000001"));
        assert_eq!(digits("sh600000").as_deref(), Some("600000"));
        assert_eq!(digits("600000SH").as_deref(), Some("600000"));
        assert_eq!(digits(" 1 ").as_deref(), Some("000001"));
    }

    #[test]
    fn renders_market_forms() {
        let suffixed = normalize_code("600000", CodeForm::Suffixed, MarketHint::Auto);
        assert_eq!(suffixed.into_value().as_deref(), Some("600000.SH"));

        let prefixed = normalize_code("000001.sz", CodeForm::Prefixed, MarketHint::Auto);
        assert_eq!(prefixed.into_value().as_deref(), Some("sz000001"));

        let fixed = normalize_code(
            "1",
            CodeForm::Suffixed,
            MarketHint::Fixed(Market::Beijing),
        );
        assert_eq!(fixed.into_value().as_deref(), Some("000001.BJ"));
    }

    #[test]
    fn unknown_market_falls_back_to_digits() {
        let code = normalize_code("123", CodeForm::Suffixed, MarketHint::Auto);
        assert_eq!(code.into_value().as_deref(), Some("000123"));

        let code = normalize_code("600000", CodeForm::Prefixed, MarketHint::Unknown);
        assert_eq!(code.into_value().as_deref(), Some("600000"));
    }

    #[test]
    fn digitless_input_is_unchanged() {
        assert_eq!(
            normalize_code(" ABC ", CodeForm::Digits, MarketHint::Auto),
            Normalized::Unchanged("ABC".to_string())
        );
        assert!(normalize_code("nan", CodeForm::Digits, MarketHint::Auto).is_absent());
    }

    #[test]
    fn inference_follows_leading_digit() {
        assert_eq!(Market::infer("600519"), Some(Market::Shanghai));
        assert_eq!(Market::infer("300750"), Some(Market::Shenzhen));
        assert_eq!(Market::infer("830799"), Some(Market::Beijing));
        assert_eq!(Market::infer("430047"), Some(Market::Beijing));
        assert_eq!(Market::infer("100000"), None);
        assert_eq!(Market::infer("60000"), None);
    }

    #[test]
    fn market_and_form_parse() {
        assert_eq!("SZ".parse::<Market>(), Ok(Market::Shenzhen));
        assert_eq!("suffixed".parse::<CodeForm>(), Ok(CodeForm::Suffixed));
        assert!("exchange".parse::<CodeForm>().is_err());
    }
}
