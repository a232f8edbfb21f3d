//! Display formatting for calculated figures.
//!
//! Magnitudes use the South Asian bands: crore (10,000,000), lakh (100,000)
//! and thousand.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::calculations::common::round_half_up;

const CRORE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);
const LAKH: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);
const THOUSAND: Decimal = Decimal::ONE_THOUSAND;

/// Divisor, short suffix and spelled-out unit for each band, largest first.
const BANDS: [(Decimal, &str, &str); 3] = [
    (CRORE, "Cr", "crores"),
    (LAKH, "L", "lakhs"),
    (THOUSAND, "K", "thousand"),
];

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

fn band_for(magnitude: Decimal) -> Option<(Decimal, &'static str, &'static str)> {
    BANDS
        .into_iter()
        .find(|(divisor, _, _)| magnitude >= *divisor)
}

fn sign_prefix(
    value: Decimal,
    shown: Decimal,
) -> &'static str {
    if value.is_sign_negative() && !shown.is_zero() {
        "-"
    } else {
        ""
    }
}

/// Formats `value` with a Cr / L / K suffix.
///
/// Scaled values are rounded half-up to two decimals and always show both
/// decimals. Values below 1,000 are shown as-is, rounded to two decimals
/// with trailing zeros dropped. Negative values keep their sign.
///
/// ```
/// use rust_decimal_macros::dec;
/// use commute_core::formatting::format_scaled;
///
/// assert_eq!(format_scaled(dec!(1000)), "1.00 K");
/// assert_eq!(format_scaled(dec!(250000)), "2.50 L");
/// assert_eq!(format_scaled(dec!(12500000)), "1.25 Cr");
/// assert_eq!(format_scaled(dec!(512.5)), "512.5");
/// ```
pub fn format_scaled(value: Decimal) -> String {
    let magnitude = value.abs();

    match band_for(magnitude) {
        Some((divisor, suffix, _)) => {
            let scaled = round_half_up(magnitude / divisor);
            format!("{}{:.2} {}", sign_prefix(value, scaled), scaled, suffix)
        }
        None => {
            let shown = round_half_up(magnitude).normalize();
            format!("{}{}", sign_prefix(value, shown), shown)
        }
    }
}

/// Spells `value` out: "2.50 lakhs", "12.00 thousand", "five hundred twelve".
///
/// The same bands as [`format_scaled`] apply. Below 1,000 the value is
/// rounded to the nearest integer and written in words; zero is "zero".
pub fn format_in_words(value: Decimal) -> String {
    let magnitude = value.abs();

    if let Some((divisor, _, unit)) = band_for(magnitude) {
        let scaled = round_half_up(magnitude / divisor);
        return format!("{}{:.2} {}", sign_prefix(value, scaled), scaled, unit);
    }

    let whole = magnitude.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let words = number_to_words(whole.to_u64().unwrap_or_default());
    if value.is_sign_negative() && !whole.is_zero() {
        format!("minus {words}")
    } else {
        words
    }
}

/// Cardinal English words for `n`, e.g. `342` → "three hundred forty-two".
pub fn number_to_words(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut groups = Vec::new();
    let mut rest = n;
    let mut scale = 0;
    while rest > 0 {
        let chunk = (rest % 1000) as usize;
        if chunk > 0 {
            let words = hundreds_to_words(chunk);
            groups.push(match SCALES[scale] {
                "" => words,
                unit => format!("{words} {unit}"),
            });
        }
        rest /= 1000;
        scale += 1;
    }

    groups.reverse();
    groups.join(" ")
}

/// Words for 1..=999.
fn hundreds_to_words(n: usize) -> String {
    let mut parts = Vec::with_capacity(2);

    if n >= 100 {
        parts.push(format!("{} hundred", ONES[n / 100]));
    }

    let rest = n % 100;
    match rest {
        0 => {}
        1..=19 => parts.push(ONES[rest].to_string()),
        _ if rest % 10 == 0 => parts.push(TENS[rest / 10].to_string()),
        _ => parts.push(format!("{}-{}", TENS[rest / 10], ONES[rest % 10])),
    }

    parts.join(" ")
}

/// Formats `value` as rupees with two decimals and Indian digit grouping,
/// e.g. `₹11,60,000.00`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let text = format!("{:.2}", rounded.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!(
        "{}₹{}.{}",
        sign_prefix(value, rounded),
        group_indian(integer),
        fraction
    )
}

/// Inserts separators after the last three digits and then every two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // format_scaled tests
    // =========================================================================

    #[test]
    fn format_scaled_band_boundaries() {
        assert_eq!(format_scaled(dec!(1000)), "1.00 K");
        assert_eq!(format_scaled(dec!(100000)), "1.00 L");
        assert_eq!(format_scaled(dec!(10000000)), "1.00 Cr");
    }

    #[test]
    fn format_scaled_just_below_boundaries() {
        assert_eq!(format_scaled(dec!(999.99)), "999.99");
        assert_eq!(format_scaled(dec!(99999)), "100.00 K");
        assert_eq!(format_scaled(dec!(9999999)), "100.00 L");
    }

    #[test]
    fn format_scaled_rounds_to_two_decimals() {
        assert_eq!(format_scaled(dec!(11600.0000001)), "11.60 K");
        assert_eq!(format_scaled(dec!(2933.3333333)), "2.93 K");
        assert_eq!(format_scaled(dec!(6666.6666667)), "6.67 K");
    }

    #[test]
    fn format_scaled_small_values_as_is() {
        assert_eq!(format_scaled(dec!(0)), "0");
        assert_eq!(format_scaled(dec!(500)), "500");
        assert_eq!(format_scaled(dec!(2.13312)), "2.13");
    }

    #[test]
    fn format_scaled_keeps_sign() {
        assert_eq!(format_scaled(dec!(-9600)), "-9.60 K");
        assert_eq!(format_scaled(dec!(-115200)), "-1.15 L");
        assert_eq!(format_scaled(dec!(-0.001)), "0");
    }

    // =========================================================================
    // format_in_words tests
    // =========================================================================

    #[test]
    fn format_in_words_uses_spelled_out_bands() {
        assert_eq!(format_in_words(dec!(25000000)), "2.50 crores");
        assert_eq!(format_in_words(dec!(600000)), "6.00 lakhs");
        assert_eq!(format_in_words(dec!(11600)), "11.60 thousand");
    }

    #[test]
    fn format_in_words_spells_small_values() {
        assert_eq!(format_in_words(dec!(0)), "zero");
        assert_eq!(format_in_words(dec!(7)), "seven");
        assert_eq!(format_in_words(dec!(512.4)), "five hundred twelve");
        assert_eq!(format_in_words(dec!(99.5)), "one hundred");
    }

    #[test]
    fn format_in_words_negative_small_value() {
        assert_eq!(format_in_words(dec!(-40)), "minus forty");
        assert_eq!(format_in_words(dec!(-0.2)), "zero");
    }

    // =========================================================================
    // number_to_words tests
    // =========================================================================

    #[test]
    fn number_to_words_teens_and_tens() {
        assert_eq!(number_to_words(13), "thirteen");
        assert_eq!(number_to_words(20), "twenty");
        assert_eq!(number_to_words(42), "forty-two");
    }

    #[test]
    fn number_to_words_hundreds() {
        assert_eq!(number_to_words(100), "one hundred");
        assert_eq!(number_to_words(305), "three hundred five");
        assert_eq!(number_to_words(999), "nine hundred ninety-nine");
    }

    #[test]
    fn number_to_words_skips_empty_groups() {
        assert_eq!(number_to_words(1000), "one thousand");
        assert_eq!(number_to_words(1_000_001), "one million one");
        assert_eq!(
            number_to_words(12_345),
            "twelve thousand three hundred forty-five"
        );
    }

    #[test]
    fn number_to_words_handles_u64_max() {
        assert!(number_to_words(u64::MAX).starts_with("eighteen quintillion"));
    }

    // =========================================================================
    // format_currency tests
    // =========================================================================

    #[test]
    fn format_currency_groups_indian_style() {
        assert_eq!(format_currency(dec!(11600)), "₹11,600.00");
        assert_eq!(format_currency(dec!(600000)), "₹6,00,000.00");
        assert_eq!(format_currency(dec!(12345678.9)), "₹1,23,45,678.90");
    }

    #[test]
    fn format_currency_small_and_negative() {
        assert_eq!(format_currency(dec!(0)), "₹0.00");
        assert_eq!(format_currency(dec!(999.999)), "₹1,000.00");
        assert_eq!(format_currency(dec!(-9600)), "-₹9,600.00");
    }
}
