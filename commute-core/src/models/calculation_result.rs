use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ViewMode;
use crate::CostEngineError;

/// Outcome of one successful cost calculation.
///
/// All cost figures are on the monthly basis and unrounded. The four
/// components always add up to `total_car_cost` exactly. A new calculation
/// replaces the whole record; it is never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Kilometres driven per month for the round-trip commute.
    pub monthly_distance: Decimal,

    /// Monthly cost of owning and running the car.
    pub total_car_cost: Decimal,

    /// Monthly cost of public transport.
    pub total_commute_cost: Decimal,

    /// Public transport cost minus car cost. Positive means public transport
    /// is cheaper.
    pub monthly_savings: Decimal,

    /// Yearly commute cost minus yearly car cost.
    pub yearly_savings: Decimal,

    pub fuel_cost: Decimal,
    pub maintenance_cost: Decimal,

    /// Yearly premium spread over twelve months.
    pub insurance_cost: Decimal,

    /// Purchase price minus resale value, spread over the ownership horizon.
    /// Negative when the car is expected to sell for more than it cost.
    pub depreciation_cost: Decimal,

    /// Estimated CO2 output of a year of driving, in metric tons.
    pub yearly_emissions: Decimal,
}

fn scale(
    value: Decimal,
    view: ViewMode,
    what: &'static str,
) -> Result<Decimal, CostEngineError> {
    value
        .checked_mul(Decimal::from(view.months()))
        .ok_or(CostEngineError::Overflow(what))
}

impl CalculationResult {
    /// Car cost for the period covered by `view`.
    ///
    /// # Errors
    ///
    /// Returns [`CostEngineError::Overflow`] when the yearly figure does not
    /// fit in a [`Decimal`].
    pub fn car_cost(
        &self,
        view: ViewMode,
    ) -> Result<Decimal, CostEngineError> {
        scale(self.total_car_cost, view, "car cost")
    }

    /// Public transport cost for the period covered by `view`.
    pub fn commute_cost(
        &self,
        view: ViewMode,
    ) -> Result<Decimal, CostEngineError> {
        scale(self.total_commute_cost, view, "public transport cost")
    }

    /// Savings for the period covered by `view`.
    pub fn savings(
        &self,
        view: ViewMode,
    ) -> Decimal {
        match view {
            ViewMode::Monthly => self.monthly_savings,
            ViewMode::Yearly => self.yearly_savings,
        }
    }

    /// The four car cost components, labelled, scaled to `view`.
    ///
    /// A single component can exceed the total when depreciation is
    /// negative, so each one is scaled with overflow checking.
    pub fn components(
        &self,
        view: ViewMode,
    ) -> Result<[(&'static str, Decimal); 4], CostEngineError> {
        Ok([
            ("Fuel", scale(self.fuel_cost, view, "fuel cost")?),
            ("Maintenance", scale(self.maintenance_cost, view, "maintenance cost")?),
            ("Insurance", scale(self.insurance_cost, view, "insurance cost")?),
            ("Depreciation", scale(self.depreciation_cost, view, "depreciation cost")?),
        ])
    }

    pub fn public_transport_is_cheaper(&self) -> bool {
        self.monthly_savings > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample() -> CalculationResult {
        CalculationResult {
            monthly_distance: dec!(440),
            total_car_cost: dec!(5000),
            total_commute_cost: dec!(2000),
            monthly_savings: dec!(-3000),
            yearly_savings: dec!(-36000),
            fuel_cost: dec!(2000),
            maintenance_cost: dec!(1000),
            insurance_cost: dec!(1000),
            depreciation_cost: dec!(1000),
            yearly_emissions: dec!(2.13312),
        }
    }

    #[test]
    fn yearly_view_scales_costs_by_twelve() {
        let result = sample();

        assert_eq!(result.car_cost(ViewMode::Yearly), Ok(dec!(60000)));
        assert_eq!(result.commute_cost(ViewMode::Yearly), Ok(dec!(24000)));
        assert_eq!(result.savings(ViewMode::Yearly), dec!(-36000));
    }

    #[test]
    fn monthly_view_is_unscaled() {
        let result = sample();

        assert_eq!(result.car_cost(ViewMode::Monthly), Ok(dec!(5000)));
        assert_eq!(result.savings(ViewMode::Monthly), dec!(-3000));
    }

    #[test]
    fn components_sum_to_car_cost_in_both_views() {
        let result = sample();

        for view in [ViewMode::Monthly, ViewMode::Yearly] {
            let sum: Decimal = result.components(view).unwrap().iter().map(|(_, v)| *v).sum();
            assert_eq!(Ok(sum), result.car_cost(view));
        }
    }

    #[test]
    fn yearly_component_overflow_is_an_error() {
        // Depreciation far below zero lets fuel exceed the monthly total.
        let result = CalculationResult {
            fuel_cost: dec!(10000000000000000000000000000),
            depreciation_cost: dec!(-9999999999999999999999999000),
            total_car_cost: dec!(1000),
            ..sample()
        };

        assert!(result.components(ViewMode::Monthly).is_ok());
        assert_eq!(
            result.components(ViewMode::Yearly),
            Err(CostEngineError::Overflow("fuel cost"))
        );
        assert_eq!(result.car_cost(ViewMode::Yearly), Ok(dec!(12000)));
    }

    #[test]
    fn negative_savings_mean_driving_is_cheaper() {
        assert!(!sample().public_transport_is_cheaper());
    }
}
