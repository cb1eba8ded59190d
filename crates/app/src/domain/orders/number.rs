//! Order number formatting.

use jiff::civil::Date;

/// Prefix on every human-readable order number.
pub(crate) const ORDER_NUMBER_PREFIX: &str = "ORD";

/// Formats an order number as `ORD` + `YYMMDD` + the zero-padded daily
/// sequence. Sequences past 9999 widen the number rather than wrap.
pub(crate) fn format_order_number(date: Date, sequence: u32) -> String {
    format!(
        "{ORDER_NUMBER_PREFIX}{:02}{:02}{:02}{sequence:04}",
        date.year().rem_euclid(100),
        date.month(),
        date.day(),
    )
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn number_is_prefix_date_and_padded_sequence() {
        assert_eq!(
            format_order_number(date(2026, 8, 6), 1),
            "ORD2608060001".to_string()
        );
    }

    #[test]
    fn single_digit_months_and_days_are_zero_padded() {
        assert_eq!(
            format_order_number(date(2030, 1, 9), 42),
            "ORD3001090042".to_string()
        );
    }

    #[test]
    fn sequence_past_four_digits_widens() {
        assert_eq!(
            format_order_number(date(2026, 8, 6), 12345),
            "ORD26080612345".to_string()
        );
    }
}
