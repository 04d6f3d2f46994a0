//! Value normalization for provider data.
//!
//! Every normalizer is total: it never panics and reports its result as a
//! [`Normalized`] outcome so callers can tell a rewritten value from one the
//! normalizer declined to touch.
//!
//! - **code**: market-instrument identifiers (`000001`, `000001.SZ`, `sz000001`)
//! - **date**: calendar dates and timestamps in four target forms
//! - **numeric**: floats and integers with percent and separator handling

pub mod code;
pub mod date;
pub mod numeric;
pub mod outcome;

pub use code::{CodeForm, Market, MarketHint, normalize_code};
pub use date::{DateForm, NormalizedDate, normalize_date, normalize_date_str};
pub use numeric::{normalize_float, normalize_float_value, normalize_int, normalize_int_value};
pub use outcome::{Normalized, is_null_like};
