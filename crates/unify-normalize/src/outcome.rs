//! Typed normalization outcome.

/// Result of running one normalizer over one raw value.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized<T> {
    /// The normalizer produced a canonical value.
    Value(T),
    /// The normalizer declined; carries the trimmed input unchanged.
    Unchanged(String),
    /// The input was empty or a null placeholder.
    Absent,
}

impl<T> Normalized<T> {
    /// True when a canonical value was produced.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Normalized<U> {
        match self {
            Self::Value(value) => Normalized::Value(f(value)),
            Self::Unchanged(raw) => Normalized::Unchanged(raw),
            Self::Absent => Normalized::Absent,
        }
    }
}

impl Normalized<String> {
    /// Normalized text, or the untouched input when the normalizer declined.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Value(text) | Self::Unchanged(text) => Some(text),
            Self::Absent => None,
        }
    }
}

/// Checks for empty strings and the placeholders providers emit for missing cells.
pub fn is_null_like(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed == "-"
        || ["nan", "none", "null"]
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_like_tokens() {
        assert!(is_null_like(""));
        assert!(is_null_like("  "));
        assert!(is_null_like("-"));
        assert!(is_null_like("NaN"));
        assert!(is_null_like("None"));
        assert!(!is_null_like("--5"));
        assert!(!is_null_like("0"));
    }

    #[test]
    fn outcome_accessors() {
        let value: Normalized<String> = Normalized::Value("000001".to_string());
        assert!(value.is_ok());
        assert_eq!(value.clone().into_text().as_deref(), Some("000001"));

        let declined: Normalized<String> = Normalized::Unchanged("ABC".to_string());
        assert!(!declined.is_ok());
        assert_eq!(declined.value(), None);
        assert_eq!(declined.into_text().as_deref(), Some("ABC"));

        let absent: Normalized<String> = Normalized::Absent;
        assert!(absent.is_absent());
        assert_eq!(absent.into_text(), None);
    }
}
