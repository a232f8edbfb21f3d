//! Shared constants and rounding for cost calculations.

use rust_decimal::Decimal;

/// Months in the flat yearly projection.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Kilograms of CO2 emitted per kilometre driven (0.404 kg/km).
pub const EMISSION_FACTOR_KG_PER_KM: Decimal = Decimal::from_parts(404, 0, 0, false, 3);

/// Kilograms in one metric ton.
pub const KG_PER_METRIC_TON: Decimal = Decimal::ONE_THOUSAND;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Engine results are kept unrounded; this is applied only when a figure is
/// displayed. Values at exactly 0.005 round away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use commute_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(2933.3333)), dec!(2933.33));
/// assert_eq!(round_half_up(dec!(6666.6667)), dec!(6666.67));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
