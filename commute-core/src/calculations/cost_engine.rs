//! Monthly cost of car ownership compared with public transport.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Monthly distance: one-way distance × 2 × working days |
//! | 2    | Fuel: (monthly distance ÷ fuel efficiency) × fuel price |
//! | 3    | Depreciation: (car price − resale value) ÷ (resale years × 12) |
//! | 4    | Car cost: fuel + maintenance + insurance ÷ 12 + depreciation |
//! | 5    | Yearly car cost: step 4 × 12; yearly commute cost: transport × 12 |
//! | 6    | Monthly savings: public transport − car cost |
//! | 7    | Yearly savings: yearly commute cost − yearly car cost |
//! | 8    | Yearly emissions: monthly distance × 12 × 0.404 kg ÷ 1000 |
//!
//! Nothing is rounded or clamped. Depreciation and savings may be negative.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use commute_core::calculations::common::round_half_up;
//! use commute_core::{CostEngine, CostInput};
//!
//! let input = CostInput {
//!     car_price: dec!(600000),
//!     fuel_efficiency: dec!(15),
//!     fuel_price: dec!(100),
//!     distance_to_work: dec!(10),
//!     working_days_per_month: dec!(22),
//!     maintenance_costs: dec!(1000),
//!     insurance_costs: dec!(12000),
//!     resale_value: dec!(200000),
//!     resale_years: dec!(5),
//!     public_transport_costs: dec!(2000),
//! };
//!
//! let result = CostEngine::new().calculate(&input).unwrap();
//!
//! assert_eq!(result.monthly_distance, dec!(440));
//! assert_eq!(round_half_up(result.total_car_cost), dec!(11600.00));
//! assert_eq!(round_half_up(result.monthly_savings), dec!(-9600.00));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{EMISSION_FACTOR_KG_PER_KM, KG_PER_METRIC_TON, MONTHS_PER_YEAR};
use crate::{CalculationResult, CostInput};

/// Errors raised when the arithmetic cannot produce a finite figure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CostEngineError {
    /// A divisor was zero, e.g. a fuel efficiency of 0.
    #[error("division by zero while computing {0}")]
    DivisionByZero(&'static str),

    /// An intermediate value exceeded the decimal range.
    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

/// Calculator for the car versus public transport comparison.
///
/// Emissions use the fixed [`EMISSION_FACTOR_KG_PER_KM`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CostEngine;

impl CostEngine {
    pub fn new() -> Self {
        Self
    }

    /// Runs every calculation step and returns the full result.
    ///
    /// The input is expected to have passed form validation. The engine
    /// itself checks nothing beyond what the arithmetic needs.
    ///
    /// # Errors
    ///
    /// Returns [`CostEngineError`] if:
    /// - fuel efficiency or the ownership horizon is zero
    /// - an intermediate value overflows
    pub fn calculate(
        &self,
        input: &CostInput,
    ) -> Result<CalculationResult, CostEngineError> {
        let months = Decimal::from(MONTHS_PER_YEAR);

        let monthly_distance =
            self.monthly_distance(input.distance_to_work, input.working_days_per_month)?;

        let fuel_cost =
            self.monthly_fuel_cost(monthly_distance, input.fuel_efficiency, input.fuel_price)?;

        let insurance_cost = divide(input.insurance_costs, months, "monthly insurance")?;

        let depreciation_cost =
            self.monthly_depreciation(input.car_price, input.resale_value, input.resale_years)?;

        let total_car_cost = self.monthly_car_cost(
            fuel_cost,
            input.maintenance_costs,
            insurance_cost,
            depreciation_cost,
        )?;

        let yearly_car_cost = multiply(total_car_cost, months, "yearly car cost")?;
        let yearly_commute_cost =
            multiply(input.public_transport_costs, months, "yearly commute cost")?;

        let monthly_savings = subtract(
            input.public_transport_costs,
            total_car_cost,
            "monthly savings",
        )?;
        let yearly_savings = subtract(yearly_commute_cost, yearly_car_cost, "yearly savings")?;

        let yearly_emissions = self.yearly_emissions(monthly_distance)?;

        debug!(
            %monthly_distance,
            %total_car_cost,
            %monthly_savings,
            %yearly_emissions,
            "cost calculation complete"
        );

        Ok(CalculationResult {
            monthly_distance,
            total_car_cost,
            total_commute_cost: input.public_transport_costs,
            monthly_savings,
            yearly_savings,
            fuel_cost,
            maintenance_cost: input.maintenance_costs,
            insurance_cost,
            depreciation_cost,
            yearly_emissions,
        })
    }

    /// Round-trip distance driven in a month.
    fn monthly_distance(
        &self,
        distance_to_work: Decimal,
        working_days: Decimal,
    ) -> Result<Decimal, CostEngineError> {
        let round_trip = multiply(distance_to_work, Decimal::TWO, "monthly distance")?;
        multiply(round_trip, working_days, "monthly distance")
    }

    /// Fuel bought for the month's driving.
    fn monthly_fuel_cost(
        &self,
        monthly_distance: Decimal,
        fuel_efficiency: Decimal,
        fuel_price: Decimal,
    ) -> Result<Decimal, CostEngineError> {
        let litres = divide(monthly_distance, fuel_efficiency, "monthly fuel cost")?;
        multiply(litres, fuel_price, "monthly fuel cost")
    }

    /// Loss of value spread linearly over the ownership horizon.
    fn monthly_depreciation(
        &self,
        car_price: Decimal,
        resale_value: Decimal,
        resale_years: Decimal,
    ) -> Result<Decimal, CostEngineError> {
        let loss = subtract(car_price, resale_value, "monthly depreciation")?;
        let horizon = multiply(
            resale_years,
            Decimal::from(MONTHS_PER_YEAR),
            "monthly depreciation",
        )?;
        divide(loss, horizon, "monthly depreciation")
    }

    fn monthly_car_cost(
        &self,
        fuel_cost: Decimal,
        maintenance_cost: Decimal,
        insurance_cost: Decimal,
        depreciation_cost: Decimal,
    ) -> Result<Decimal, CostEngineError> {
        [maintenance_cost, insurance_cost, depreciation_cost]
            .into_iter()
            .try_fold(fuel_cost, |total, component| {
                total
                    .checked_add(component)
                    .ok_or(CostEngineError::Overflow("monthly car cost"))
            })
    }

    /// Metric tons of CO2 from a year of commuting.
    fn yearly_emissions(
        &self,
        monthly_distance: Decimal,
    ) -> Result<Decimal, CostEngineError> {
        let yearly_distance = multiply(
            monthly_distance,
            Decimal::from(MONTHS_PER_YEAR),
            "yearly emissions",
        )?;
        let kilograms = multiply(yearly_distance, EMISSION_FACTOR_KG_PER_KM, "yearly emissions")?;
        divide(kilograms, KG_PER_METRIC_TON, "yearly emissions")
    }
}

fn multiply(
    a: Decimal,
    b: Decimal,
    what: &'static str,
) -> Result<Decimal, CostEngineError> {
    a.checked_mul(b).ok_or(CostEngineError::Overflow(what))
}

fn subtract(
    a: Decimal,
    b: Decimal,
    what: &'static str,
) -> Result<Decimal, CostEngineError> {
    a.checked_sub(b).ok_or(CostEngineError::Overflow(what))
}

fn divide(
    a: Decimal,
    b: Decimal,
    what: &'static str,
) -> Result<Decimal, CostEngineError> {
    if b.is_zero() {
        return Err(CostEngineError::DivisionByZero(what));
    }
    a.checked_div(b).ok_or(CostEngineError::Overflow(what))
}
