//! Currency conversion and price formatting.
//!
//! Menu prices arrive in USD; the app displays Moroccan Dirham (MAD).

/// Exchange rate: 1 USD = ~10 MAD.
pub const USD_TO_MAD_RATE: f64 = 10.0;

/// Converts a USD amount to MAD.
pub fn convert_to_mad(usd_amount: f64) -> f64 {
    usd_amount * USD_TO_MAD_RATE
}

/// Formats a USD amount as a MAD price string.
///
/// With `show_decimals` the amount keeps two decimal places, otherwise it is
/// rounded to a whole dirham.
pub fn format_price_mad(usd_amount: f64, show_decimals: bool) -> String {
    let mad = convert_to_mad(usd_amount);
    if show_decimals {
        format!("{:.2} DH", mad)
    } else {
        format!("{} DH", mad.round() as i64)
    }
}

/// Formats a USD amount with the USD value as an alternative.
pub fn format_price_with_usd(usd_amount: f64) -> String {
    format!("{:.2} DH ({:.2} $)", convert_to_mad(usd_amount), usd_amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion() {
        assert!((convert_to_mad(12.99) - 129.9).abs() < 1e-9);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_price_mad(12.99, true), "129.90 DH");
        assert_eq!(format_price_mad(12.99, false), "130 DH");
        assert_eq!(format_price_with_usd(5.0), "50.00 DH (5.00 $)");
    }
}
