//! Display text <-> number conversion
//!
//! Results are printed with the shortest decimal that round-trips to the same
//! `f64`, so there are never trailing zeros or a dangling decimal point.

/// Magnitude from which results switch to exponent notation
pub const EXPONENT_UPPER: f64 = 1e21;

/// Non-zero magnitudes below this switch to exponent notation
pub const EXPONENT_LOWER: f64 = 1e-7;

/// Formats a value for the display
///
/// ```rust
/// use deskcalc::core::format::format_number;
///
/// assert_eq!(format_number(7.0), "7");
/// assert_eq!(format_number(0.5), "0.5");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(2e21), "2e21");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.0 as well.
        return "0".to_string();
    }
    if !value.is_finite() {
        return format!("{value}");
    }

    let magnitude = value.abs();
    if magnitude >= EXPONENT_UPPER || magnitude < EXPONENT_LOWER {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

/// Parses display text as a number
///
/// Returns `None` for anything that is not a number, which in practice means
/// the error token.
#[must_use]
pub fn parse_display(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

/// Returns true if digits can be appended to `text`
///
/// That is an optional minus, digits, and at most one point: what typing
/// produces. Exponent forms and `inf`/`NaN` only come out of arithmetic.
#[must_use]
pub fn is_plain_decimal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1
}

/// Returns true if the text already holds a decimal point
#[must_use]
pub fn has_decimal_point(text: &str) -> bool {
    text.contains('.')
}
