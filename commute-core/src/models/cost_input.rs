use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fully parsed calculator input, ready for the cost engine.
///
/// Produced by [`InputSet::to_cost_input`](super::InputSet::to_cost_input),
/// which fills absent fields with zero and `resale_years` with one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostInput {
    /// Purchase price of the car.
    pub car_price: Decimal,

    /// Distance driven per unit of fuel (km per litre).
    pub fuel_efficiency: Decimal,

    /// Price of one unit of fuel.
    pub fuel_price: Decimal,

    /// One-way distance from home to work, in km.
    pub distance_to_work: Decimal,

    pub working_days_per_month: Decimal,

    /// Monthly maintenance spend.
    pub maintenance_costs: Decimal,

    /// Yearly insurance premium.
    pub insurance_costs: Decimal,

    /// Expected resale value at the end of the ownership horizon.
    pub resale_value: Decimal,

    /// Ownership horizon in years.
    pub resale_years: Decimal,

    /// Monthly spend on public transport for the same commute.
    pub public_transport_costs: Decimal,
}

impl Default for CostInput {
    fn default() -> Self {
        Self {
            car_price: Decimal::ZERO,
            fuel_efficiency: Decimal::ZERO,
            fuel_price: Decimal::ZERO,
            distance_to_work: Decimal::ZERO,
            working_days_per_month: Decimal::ZERO,
            maintenance_costs: Decimal::ZERO,
            insurance_costs: Decimal::ZERO,
            resale_value: Decimal::ZERO,
            resale_years: Decimal::ONE,
            public_transport_costs: Decimal::ZERO,
        }
    }
}
