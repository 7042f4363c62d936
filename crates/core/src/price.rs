//! Price normalization
//!
//! Source price fields are free text scraped from heterogeneous listings:
//! `"৳ 10.25"`, `"Price: ৳ 10.25"`, or malformed strings with stray decimal
//! points like `"10.256.00"`. Normalization is total: every input maps to a
//! non-negative value, with `0.0` standing in for anything unparseable.

/// Currency markers that may prefix a price, possibly after a label.
const CURRENCY_MARKERS: [char; 5] = ['৳', '$', '₹', '€', '£'];

/// Normalize a raw price string to a canonical non-negative value.
///
/// Never fails; unparseable input yields `0.0`. Use [`try_normalize`] when
/// the caller needs to distinguish a genuine zero price from a parse failure.
pub fn normalize(raw: &str) -> f64 {
    try_normalize(raw).unwrap_or(0.0)
}

/// Normalize a raw price string, reporting parse failure as `None`.
///
/// Pipeline:
/// 1. Strip everything up to and including the first currency marker, so a
///    label prefix like `"Price: ৳"` falls away.
/// 2. Keep only ASCII digits and decimal points.
/// 3. A second decimal point means trailing noise from the source; keep the
///    integer group and at most two digits of the first fractional group
///    (`"10.256.00"` → `10.25`). This is a defensive heuristic for known-bad
///    source rows, not a general numeric parser.
/// 4. Parse as `f64`.
pub fn try_normalize(raw: &str) -> Option<f64> {
    let mut s = raw;
    if let Some((pos, marker)) = s.char_indices().find(|(_, c)| CURRENCY_MARKERS.contains(c)) {
        s = &s[pos + marker.len_utf8()..];
    }

    let mut cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if let Some(first_dot) = cleaned.find('.') {
        if let Some(second_dot) = cleaned[first_dot + 1..].find('.') {
            let frac_len = second_dot.min(2);
            cleaned.truncate(first_dot + 1 + frac_len);
        }
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Canonical two-decimal rendering used in API payloads and documents.
pub fn display(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_number_passes_through() {
        assert_eq!(normalize("10.25"), 10.25);
        assert_eq!(normalize("5"), 5.0);
    }

    #[test]
    fn currency_prefix_is_stripped() {
        assert_eq!(normalize("৳ 10.25"), 10.25);
        assert_eq!(normalize("Price: ৳ 10.25"), 10.25);
        assert_eq!(normalize("$ 3.50"), 3.5);
    }

    #[test]
    fn malformed_double_dot_truncates() {
        // Pinned edge case: first int.frac is the true value, trailing noise
        // is discarded.
        assert_eq!(normalize("10.256.00"), 10.25);
        assert_eq!(normalize("7.5.5"), 7.5);
    }

    #[test]
    fn unparseable_input_is_zero() {
        assert_eq!(normalize(""), 0.0);
        assert_eq!(normalize("abc"), 0.0);
        assert_eq!(normalize("N/A"), 0.0);
        assert_eq!(normalize("..."), 0.0);
    }

    #[test]
    fn try_normalize_reports_failure() {
        assert_eq!(try_normalize("abc"), None);
        assert_eq!(try_normalize(""), None);
        assert_eq!(try_normalize("0"), Some(0.0));
    }

    #[test]
    fn normalization_is_total_and_non_negative() {
        for raw in ["", "-5", "৳৳৳", "12a34b.5", "Price:", "\u{0}", "1e9"] {
            assert!(normalize(raw) >= 0.0, "normalize({raw:?}) went negative");
        }
    }

    #[test]
    fn display_round_trips_canonical_values() {
        for v in [0.0, 5.0, 10.25, 199.99] {
            assert_eq!(normalize(&display(v)), v);
        }
    }
}
