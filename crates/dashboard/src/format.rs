use rust_decimal::Decimal;

/// Formats a money amount for display, rounded to two decimal places.
///
/// Rupiah follows the Indonesian convention (`Rp 1.234.567,89`); any other
/// code is prefixed to a comma-grouped amount (`USD 1,234.50`).
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    if currency.eq_ignore_ascii_case("IDR") {
        format!("{sign}Rp {},{fraction}", group_thousands(whole, '.'))
    } else {
        format!(
            "{sign}{} {}.{fraction}",
            currency.to_ascii_uppercase(),
            group_thousands(whole, ',')
        )
    }
}

/// Rounds to `dp` places and drops trailing zeros: `3.50` -> `3.5`, `4.00` -> `4`.
pub fn format_decimal(value: Decimal, dp: u32) -> String {
    value.round_dp(dp).normalize().to_string()
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rupiah_uses_dot_thousands_and_comma_decimals() {
        assert_eq!(format_currency(dec!(1234567.891), "IDR"), "Rp 1.234.567,89");
        assert_eq!(format_currency(dec!(999), "IDR"), "Rp 999,00");
        assert_eq!(format_currency(dec!(0), "idr"), "Rp 0,00");
    }

    #[test]
    fn negative_amounts_keep_their_sign() {
        assert_eq!(format_currency(dec!(-1500.5), "IDR"), "-Rp 1.500,50");
        assert_eq!(format_currency(dec!(-0.001), "IDR"), "Rp 0,00");
    }

    #[test]
    fn other_currencies_use_comma_thousands() {
        assert_eq!(format_currency(dec!(1234.5), "usd"), "USD 1,234.50");
        assert_eq!(format_currency(dec!(100000), "BRL"), "BRL 100,000.00");
    }

    #[test]
    fn decimals_are_trimmed() {
        assert_eq!(format_decimal(dec!(3.8333), 2), "3.83");
        assert_eq!(format_decimal(dec!(4.00), 2), "4");
        assert_eq!(format_decimal(dec!(3.5), 2), "3.5");
    }
}
