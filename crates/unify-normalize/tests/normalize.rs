//! Documented examples for each normalizer.

use unify_normalize::{
    CodeForm, DateForm, MarketHint, Normalized, normalize_code, normalize_date_str,
    normalize_float, normalize_int,
};

#[test]
fn date_examples() {
    assert_eq!(
        normalize_date_str("2024年1月1日", DateForm::Dashed).as_deref(),
        Some("2024-01-01")
    );
    assert_eq!(
        normalize_date_str("20240101", DateForm::Compact).as_deref(),
        Some("20240101")
    );
    assert_eq!(
        normalize_date_str("2024-01-01 12:34:56", DateForm::DateTime).as_deref(),
        Some("2024-01-01 12:34:56")
    );
    assert_eq!(
        normalize_date_str("2024-01-01", DateForm::DateTime).as_deref(),
        Some("2024-01-01 00:00:00")
    );
}

#[test]
fn numeric_examples() {
    assert_eq!(normalize_float("1,234.56").into_value(), Some(1234.56));
    assert_eq!(normalize_float("100%").into_value(), Some(1.0));
    assert_eq!(normalize_float("-78.9").into_value(), Some(-78.9));
    assert_eq!(normalize_int("1,234.56").into_value(), Some(1235));
}

#[test]
fn code_examples() {
    let cases = [
        ("000001.SZ", CodeForm::Digits, "000001"),
        ("sz000001", CodeForm::Suffixed, "000001.SZ"),
        ("600519", CodeForm::Prefixed, "sh600519"),
        ("830799", CodeForm::Suffixed, "830799.BJ"),
        ("1", CodeForm::Digits, "000001"),
    ];
    for (raw, form, expected) in cases {
        assert_eq!(
            normalize_code(raw, form, MarketHint::Auto),
            Normalized::Value(expected.to_string()),
            "{raw}"
        );
    }
}
