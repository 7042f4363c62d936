//! Line costing
//!
//! Line-level prices and quantities arrive from the client boundary and are
//! attacker/typo-controllable, so subtotals and totals are always recomputed
//! here and never taken as given. Costing fails closed: a line that cannot
//! be priced keeps a zero subtotal and a flag instead of being dropped.

use serde::Serialize;

use crate::price;

/// The computed cost of one prescription line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineCost {
    pub subtotal: f64,
    /// Set when the price or quantity failed to parse and the subtotal was
    /// zeroed; the caller surfaces the anomaly.
    pub flagged: bool,
}

/// Compute the subtotal for one line.
///
/// Quantity must be a positive integer; zero and negative quantities zero
/// the line rather than producing a zero-is-valid or negative charge. An
/// unparseable price likewise zeroes the line. Flagged lines are retained.
pub fn price_line(raw_price: &str, quantity: i64) -> LineCost {
    let price = match price::try_normalize(raw_price) {
        Some(p) => p,
        None => {
            return LineCost {
                subtotal: 0.0,
                flagged: true,
            };
        }
    };

    if quantity <= 0 {
        return LineCost {
            subtotal: 0.0,
            flagged: true,
        };
    }

    LineCost {
        subtotal: price * quantity as f64,
        flagged: false,
    }
}

/// Sum line subtotals; the empty prescription totals zero.
pub fn total(subtotals: impl IntoIterator<Item = f64>) -> f64 {
    subtotals.into_iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtotal_is_price_times_quantity() {
        let line = price_line("12.50", 3);
        assert_eq!(line.subtotal, 37.5);
        assert!(!line.flagged);
    }

    #[test]
    fn currency_prefixed_price_is_normalized_first() {
        let line = price_line("৳ 5.00", 2);
        assert_eq!(line.subtotal, 10.0);
        assert!(!line.flagged);
    }

    #[test]
    fn unparseable_price_fails_closed() {
        let line = price_line("abc", 3);
        assert_eq!(line.subtotal, 0.0);
        assert!(line.flagged);
    }

    #[test]
    fn non_positive_quantity_fails_closed() {
        for quantity in [0, -1, -100] {
            let line = price_line("12.50", quantity);
            assert_eq!(line.subtotal, 0.0);
            assert!(line.flagged, "quantity {quantity} should flag the line");
        }
    }

    #[test]
    fn genuine_zero_price_is_not_an_anomaly() {
        let line = price_line("0", 5);
        assert_eq!(line.subtotal, 0.0);
        assert!(!line.flagged);
    }

    #[test]
    fn empty_total_is_zero() {
        assert_eq!(total([]), 0.0);
    }

    #[test]
    fn total_sums_subtotals() {
        assert_eq!(total([10.0, 27.5, 0.0]), 37.5);
    }
}
