//! Date and timestamp normalization.
//!
//! Parsing runs three strategies in order: the `<year>年<month>月<day>日`
//! literal, a list of chrono formats (month-before-day where ambiguous), and
//! finally digit extraction. Out-of-range months and days are clamped to 1 and
//! the clamp is reported on the result.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::outcome::{Normalized, is_null_like};

static CJK_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})年(\d{1,2})月(\d{1,2})日").expect("Invalid CJK date regex"));

/// Target rendering for normalized dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateForm {
    /// `YYYYMMDD`
    #[serde(rename = "YYYYMMDD")]
    Compact,
    /// `YYYY-MM-DD`
    #[default]
    #[serde(rename = "YYYY-MM-DD")]
    Dashed,
    /// `YYYY-MM-DD HH:MM:SS`
    #[serde(rename = "YYYY-MM-DD HH:MM:SS")]
    DateTime,
    /// `YYYYMM`
    #[serde(rename = "YYYYMM")]
    YearMonth,
}

impl DateForm {
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Compact => "YYYYMMDD",
            Self::Dashed => "YYYY-MM-DD",
            Self::DateTime => "YYYY-MM-DD HH:MM:SS",
            Self::YearMonth => "YYYYMM",
        }
    }
}

impl fmt::Display for DateForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

impl FromStr for DateForm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Compact, Self::Dashed, Self::DateTime, Self::YearMonth]
            .into_iter()
            .find(|form| form.pattern().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown date form '{s}'"))
    }
}

/// A rendered date plus whether a month or day had to be reset to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDate {
    pub text: String,
    pub clamped: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct DateParts {
    year: u32,
    month: Option<u32>,
    day: Option<u32>,
    hour: u32,
    minute: u32,
    second: u32,
}

impl DateParts {
    fn from_datetime(dt: NaiveDateTime) -> Self {
        Self {
            year: dt.year().unsigned_abs(),
            month: Some(dt.month()),
            day: Some(dt.day()),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }

    fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year().unsigned_abs(),
            month: Some(date.month()),
            day: Some(date.day()),
            ..Self::default()
        }
    }

    /// Resets out-of-range month and day to 1; returns true if anything changed.
    fn clamp(&mut self) -> bool {
        let mut clamped = false;
        match self.month {
            Some(month) if (1..=12).contains(&month) => {}
            Some(_) => {
                self.month = Some(1);
                clamped = true;
            }
            None => self.month = Some(1),
        }
        match self.day {
            Some(day) if (1..=31).contains(&day) => {}
            Some(_) => {
                self.day = Some(1);
                clamped = true;
            }
            None => self.day = Some(1),
        }
        clamped
    }

    fn render(&self, form: DateForm) -> String {
        let month = self.month.unwrap_or(1);
        let day = self.day.unwrap_or(1);
        match form {
            DateForm::Compact => format!("{:04}{month:02}{day:02}", self.year),
            DateForm::Dashed => format!("{:04}-{month:02}-{day:02}", self.year),
            DateForm::DateTime => format!(
                "{:04}-{month:02}-{day:02} {:02}:{:02}:{:02}",
                self.year, self.hour, self.minute, self.second
            ),
            DateForm::YearMonth => format!("{:04}{month:02}", self.year),
        }
    }
}

/// Normalizes a free-form date string into `form`.
///
/// Inputs with no recoverable year come back as [`Normalized::Unchanged`].
pub fn normalize_date(raw: &str, form: DateForm) -> Normalized<NormalizedDate> {
    let trimmed = raw.trim();
    if is_null_like(trimmed) || trimmed.eq_ignore_ascii_case("nat") {
        return Normalized::Absent;
    }

    let parts = parse_cjk(trimmed)
        .or_else(|| try_parse_datetime(trimmed).map(DateParts::from_datetime))
        .or_else(|| try_parse_date(trimmed).map(DateParts::from_date))
        .or_else(|| parse_digits(trimmed));

    match parts {
        Some(mut parts) if parts.year != 0 => {
            let clamped = parts.clamp();
            Normalized::Value(NormalizedDate {
                text: parts.render(form),
                clamped,
            })
        }
        _ => Normalized::Unchanged(trimmed.to_string()),
    }
}

/// String-level convenience: normalized text, the untouched input, or `None`.
pub fn normalize_date_str(raw: &str, form: DateForm) -> Option<String> {
    normalize_date(raw, form).map(|date| date.text).into_text()
}

fn parse_cjk(value: &str) -> Option<DateParts> {
    let caps = CJK_DATE.captures(value)?;
    Some(DateParts {
        year: caps[1].parse().ok()?,
        month: caps[2].parse().ok(),
        day: caps[3].parse().ok(),
        ..DateParts::default()
    })
}

/// chrono's `%Y` also accepts one to three digits, so `1/2/24` would read as
/// year 1 under a year-first format. Only four-digit years are taken from a
/// `%Y` match; two-digit years go through the `%y` formats.
fn in_year_range(year: i32) -> bool {
    (1000..=9999).contains(&year)
}

/// Try to parse full datetime formats.
fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%m/%d/%Y %H:%M:%S", // US before European
        "%m/%d/%Y %H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
        "%m/%d/%y %H:%M:%S",
        "%m/%d/%y %H:%M",
        "%d-%b-%Y %H:%M:%S",
        "%d-%b-%Y %H:%M",
    ];

    formats
        .iter()
        .find_map(|fmt| {
            NaiveDateTime::parse_from_str(value, fmt)
                .ok()
                .filter(|dt| in_year_range(dt.year()))
        })
}

/// Try to parse date-only formats.
fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y.%m.%d",
        "%m/%d/%Y", // 01/15/2024
        "%d/%m/%Y", // 15/01/2024
        "%m-%d-%Y",
        "%d-%m-%Y",
        "%d.%m.%Y",
        "%m/%d/%y",
        "%d/%m/%y",
        "%m-%d-%y",
        "%d-%m-%y",
        "%d-%b-%Y",
        "%d-%B-%Y",
        "%b %d, %Y",
        "%B %d, %Y",
        "%d %b %Y",
        "%d %B %Y",
        "%Y-%b-%d",
    ];

    formats
        .iter()
        .find_map(|fmt| {
            NaiveDate::parse_from_str(value, fmt)
                .ok()
                .filter(|date| in_year_range(date.year()))
        })
}

/// Concatenates every digit run and reads it by length.
fn parse_digits(value: &str) -> Option<DateParts> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    let field = |range: std::ops::Range<usize>| digits.get(range)?.parse::<u32>().ok();

    match digits.len() {
        n if n >= 8 => {
            let mut parts = DateParts {
                year: field(0..4)?,
                month: field(4..6),
                day: field(6..8),
                ..DateParts::default()
            };
            if n >= 14 {
                parts.hour = field(8..10)?;
                parts.minute = field(10..12)?;
                parts.second = field(12..14)?;
            }
            Some(parts)
        }
        6 => Some(DateParts {
            year: field(0..4)?,
            month: field(4..6),
            ..DateParts::default()
        }),
        4 => Some(DateParts {
            year: field(0..4)?,
            month: Some(1),
            ..DateParts::default()
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(raw: &str, form: DateForm) -> Option<String> {
        normalize_date_str(raw, form)
    }

    #[test]
    fn cjk_literal_takes_precedence() {
        assert_eq!(text("2024年1月1日", DateForm::Dashed).as_deref(), Some("2024-01-01"));
        assert_eq!(text("2024年12月31日 星期二", DateForm::Compact).as_deref(), Some("20241231"));
    }

    #[test]
    fn chrono_formats_prefer_month_first() {
        assert_eq!(text("03/04/2024", DateForm::Dashed).as_deref(), Some("2024-03-04"));
        assert_eq!(text("25/04/2024", DateForm::Dashed).as_deref(), Some("2024-04-25"));
        assert_eq!(
            text("2024-01-01T09:30:00", DateForm::DateTime).as_deref(),
            Some("2024-01-01 09:30:00")
        );
    }

    #[test]
    fn short_years_read_month_first() {
        assert_eq!(text("1/2/24", DateForm::Dashed).as_deref(), Some("2024-01-02"));
        assert_eq!(text("1-2-24", DateForm::Compact).as_deref(), Some("20240102"));
        assert_eq!(text("25/04/24", DateForm::Dashed).as_deref(), Some("2024-04-25"));
        assert_eq!(
            text("1/2/24 9:05", DateForm::DateTime).as_deref(),
            Some("2024-01-02 09:05:00")
        );
        assert_eq!(text("2024-1-5", DateForm::Dashed).as_deref(), Some("2024-01-05"));
        assert_eq!(text("2024/1/2 9:05", DateForm::Compact).as_deref(), Some("20240102"));
    }

    #[test]
    fn digit_fallback_by_length() {
        assert_eq!(text("20240101", DateForm::Compact).as_deref(), Some("20240101"));
        assert_eq!(
            text("20240101093000", DateForm::DateTime).as_deref(),
            Some("2024-01-01 09:30:00")
        );
        assert_eq!(text("202403", DateForm::Dashed).as_deref(), Some("2024-03-01"));
        assert_eq!(text("2024", DateForm::YearMonth).as_deref(), Some("202401"));
    }

    #[test]
    fn unparseable_inputs_pass_through() {
        assert_eq!(
            normalize_date("yesterday", DateForm::Dashed),
            Normalized::Unchanged("yesterday".to_string())
        );
        assert_eq!(
            normalize_date("12345", DateForm::Dashed),
            Normalized::Unchanged("12345".to_string())
        );
        assert_eq!(
            normalize_date("0000", DateForm::Dashed),
            Normalized::Unchanged("0000".to_string())
        );
    }

    #[test]
    fn null_like_inputs_are_absent() {
        for raw in ["", "  ", "NaT", "nan", "None"] {
            assert!(normalize_date(raw, DateForm::Dashed).is_absent(), "{raw}");
        }
    }

    #[test]
    fn out_of_range_parts_are_clamped_and_flagged() {
        let Normalized::Value(date) = normalize_date("20241345", DateForm::Dashed) else {
            panic!("expected a value");
        };
        assert_eq!(date.text, "2024-01-01");
        assert!(date.clamped);

        let Normalized::Value(date) = normalize_date("20240230", DateForm::Dashed) else {
            panic!("expected a value");
        };
        assert_eq!(date.text, "2024-02-30");
        assert!(!date.clamped);
    }

    #[test]
    fn date_form_parses_patterns() {
        assert_eq!("yyyy-mm-dd".parse::<DateForm>(), Ok(DateForm::Dashed));
        assert_eq!("YYYYMM".parse::<DateForm>(), Ok(DateForm::YearMonth));
        assert!("DD/MM".parse::<DateForm>().is_err());
    }
}
