//! # Text Input Module
//!
//! Permissive parsing for the free-text fields on every screen.
//!
//! ## Coercion Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field            Input          Result                                 │
//! │  ─────────────    ───────────    ──────────────────────────────────     │
//! │  note count       ""   / "  "    0                                      │
//! │                   "abc"          0                                      │
//! │                   "-4"           0   (clamped, never negative)          │
//! │                   "9999999999"   0   (does not fit an i32)              │
//! │                   "12"           12                                     │
//! │                                                                         │
//! │  price            ""  / "x"      0.0                                    │
//! │                   "NaN" / "inf"  0.0 (non-finite treated as invalid)    │
//! │                   "99.5"         99.5                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No function here returns an error: the screens never show one.

/// Parses a banknote count typed by the user.
///
/// Blank, non-numeric and out-of-range input all become 0; negative values
/// are clamped to 0.
///
/// ## Example
/// ```rust
/// use pocket_core::text::parse_count;
///
/// assert_eq!(parse_count("12"), 12);
/// assert_eq!(parse_count(""), 0);
/// assert_eq!(parse_count("-3"), 0);
/// assert_eq!(parse_count("lots"), 0);
/// ```
pub fn parse_count(raw: &str) -> u32 {
    if is_blank(raw) {
        return 0;
    }

    // Parse as i32 so the accepted range matches a typical numeric text field
    raw.parse::<i32>()
        .map(|n| u32::try_from(n.max(0)).unwrap_or(0))
        .unwrap_or(0)
}

/// Parses a price typed by the user. Surrounding whitespace is ignored;
/// anything else that is not a finite number becomes 0.0.
///
/// ## Example
/// ```rust
/// use pocket_core::text::parse_price;
///
/// assert_eq!(parse_price("150"), 150.0);
/// assert_eq!(parse_price("12.5"), 12.5);
/// assert_eq!(parse_price(" 150 "), 150.0);
/// assert_eq!(parse_price("twelve"), 0.0);
/// ```
pub fn parse_price(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Returns true when the text is empty or only whitespace.
#[inline]
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_valid() {
        assert_eq!(parse_count("0"), 0);
        assert_eq!(parse_count("7"), 7);
        assert_eq!(parse_count("+7"), 7);
        assert_eq!(parse_count("2147483647"), i32::MAX as u32);
    }

    #[test]
    fn test_parse_count_coerces_to_zero() {
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("   "), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("1.5"), 0);
        assert_eq!(parse_count(" 3"), 0);
        assert_eq!(parse_count("-12"), 0);
        assert_eq!(parse_count("99999999999"), 0);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("100"), 100.0);
        assert_eq!(parse_price("-5"), -5.0);
        assert_eq!(parse_price("1e3"), 1000.0);
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("1,5"), 0.0);
        assert_eq!(parse_price("NaN"), 0.0);
        assert_eq!(parse_price("inf"), 0.0);
    }

    #[test]
    fn test_parse_price_ignores_surrounding_whitespace() {
        assert_eq!(parse_price(" 150"), 150.0);
        assert_eq!(parse_price("12.5\t"), 12.5);
        assert_eq!(parse_price("\n 80 \n"), 80.0);
        assert_eq!(parse_price("1 5"), 0.0);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" a "));
    }
}
