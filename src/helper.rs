//! Shared value helpers used by the page objects' checks.
//!
//! The listing renders prices in the shop's display locale, so comparisons go
//! through [`to_float`] and an explicit tolerance instead of string equality.

/// Tolerance for price comparisons, in the shop currency.
///
/// Prices render with two decimals, so two values are considered equal when
/// they are less than half a cent apart.
pub const PRICE_TOLERANCE: f64 = 0.005;

/// Parses a displayed price to a number.
///
/// Everything but digits and separators is dropped first, so currency signs
/// and surrounding text do not matter. Of `,` and `.`, whichever appears last
/// is taken as the decimal separator and the other as a thousands mark, which
/// covers both `1.499,00 €` and `$1,499.00`. Returns `None` when no number
/// remains.
pub fn to_float(text: &str) -> Option<f64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let decimal = match (kept.rfind(','), kept.rfind('.')) {
        (Some(comma), Some(dot)) => Some(if comma > dot { ',' } else { '.' }),
        (Some(_), None) => Some(','),
        (None, Some(_)) => Some('.'),
        (None, None) => None,
    };

    let normalized = match decimal {
        Some(',') => kept.replace('.', "").replace(',', "."),
        Some('.') => kept.replace(',', ""),
        _ => kept,
    };

    normalized.parse().ok()
}

/// Formats a price the way the check messages display it.
pub fn format_price(value: f64) -> String {
    format!("{:.2} €", value)
}

/// Whether two prices are equal within [`PRICE_TOLERANCE`].
pub fn prices_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < PRICE_TOLERANCE
}

/// Resolves the displayed name of a filter group or property.
///
/// The trimmed visible text wins. When it is empty, the trimmed `title`
/// attribute is returned verbatim. When the visible text is used and
/// `has_brackets` is set, it ends in a bracketed article count which is cut at
/// the last space, so `"Red (12)"` becomes `"Red"` (and a text without any
/// space becomes empty). The title fallback never strips brackets; the
/// asymmetry is intentional, keep the two branches separate.
pub fn resolve_name(text: &str, title: Option<&str>, has_brackets: bool) -> String {
    let name = text.trim();

    if name.is_empty() {
        return title.unwrap_or("").trim().to_string();
    }

    if has_brackets {
        return match name.rfind(' ') {
            Some(index) => name[..index].to_string(),
            None => String::new(),
        };
    }

    name.to_string()
}
