use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a field name matches none of the calculator inputs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown input field '{0}'")]
pub struct UnknownFieldError(pub String);

/// One of the ten numeric inputs collected by the calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    CarPrice,
    FuelEfficiency,
    FuelPrice,
    DistanceToWork,
    WorkingDaysPerMonth,
    MaintenanceCosts,
    InsuranceCosts,
    ResaleValue,
    ResaleYears,
    PublicTransportCosts,
}

impl InputField {
    /// Every field, in form order.
    pub const ALL: [InputField; 10] = [
        Self::CarPrice,
        Self::FuelEfficiency,
        Self::FuelPrice,
        Self::DistanceToWork,
        Self::WorkingDaysPerMonth,
        Self::MaintenanceCosts,
        Self::InsuranceCosts,
        Self::ResaleValue,
        Self::ResaleYears,
        Self::PublicTransportCosts,
    ];

    /// The wire key used by the presentation layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CarPrice => "carPrice",
            Self::FuelEfficiency => "fuelEfficiency",
            Self::FuelPrice => "fuelPrice",
            Self::DistanceToWork => "distanceToWork",
            Self::WorkingDaysPerMonth => "workingDaysPerMonth",
            Self::MaintenanceCosts => "maintenanceCosts",
            Self::InsuranceCosts => "insuranceCosts",
            Self::ResaleValue => "resaleValue",
            Self::ResaleYears => "resaleYears",
            Self::PublicTransportCosts => "publicTransportCosts",
        }
    }

    /// Human-readable label, also used as the subject of error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CarPrice => "Car price",
            Self::FuelEfficiency => "Fuel efficiency",
            Self::FuelPrice => "Fuel price",
            Self::DistanceToWork => "Distance to work",
            Self::WorkingDaysPerMonth => "Working days per month",
            Self::MaintenanceCosts => "Maintenance costs",
            Self::InsuranceCosts => "Insurance costs",
            Self::ResaleValue => "Resale value",
            Self::ResaleYears => "Resale years",
            Self::PublicTransportCosts => "Public transport costs",
        }
    }

    /// Unit hint shown next to the input.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::CarPrice | Self::ResaleValue => "₹",
            Self::FuelEfficiency => "km/l",
            Self::FuelPrice => "₹/l",
            Self::DistanceToWork => "km",
            Self::WorkingDaysPerMonth => "days",
            Self::MaintenanceCosts | Self::PublicTransportCosts => "₹/month",
            Self::InsuranceCosts => "₹/year",
            Self::ResaleYears => "years",
        }
    }

    /// Whether calculation is refused while this field is empty.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Self::CarPrice | Self::FuelEfficiency | Self::FuelPrice | Self::WorkingDaysPerMonth
        )
    }

    /// Parses either the camelCase wire key or its snake_case spelling.
    pub fn parse(s: &str) -> Option<Self> {
        let key = s.trim();
        Self::ALL.into_iter().find(|field| {
            field.as_str() == key || field.snake_case() == key
        })
    }

    fn snake_case(&self) -> &'static str {
        match self {
            Self::CarPrice => "car_price",
            Self::FuelEfficiency => "fuel_efficiency",
            Self::FuelPrice => "fuel_price",
            Self::DistanceToWork => "distance_to_work",
            Self::WorkingDaysPerMonth => "working_days_per_month",
            Self::MaintenanceCosts => "maintenance_costs",
            Self::InsuranceCosts => "insurance_costs",
            Self::ResaleValue => "resale_value",
            Self::ResaleYears => "resale_years",
            Self::PublicTransportCosts => "public_transport_costs",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}
