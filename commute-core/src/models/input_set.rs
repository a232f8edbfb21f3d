use std::{collections::BTreeMap, fmt};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CostInput, InputField};
use crate::utils::{ParseDecimalError, parse_decimal_or};

/// Raw text of every calculator field, exactly as the user typed it.
///
/// Text is only turned into numbers by [`InputSet::to_cost_input`] at
/// calculation time. An absent entry and an empty string mean the same thing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputSet {
    values: BTreeMap<InputField, String>,
}

impl InputSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an input set from `(field, raw text)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (InputField, S)>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for (field, value) in pairs {
            set.set(field, value);
        }
        set
    }

    /// Current raw text of `field`; empty when the field was never set.
    pub fn get(
        &self,
        field: InputField,
    ) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Replaces the raw text of `field`. Setting an empty string clears it.
    pub fn set(
        &mut self,
        field: InputField,
        value: impl Into<String>,
    ) {
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    pub fn is_blank(
        &self,
        field: InputField,
    ) -> bool {
        self.get(field).trim().is_empty()
    }

    /// Iterates over the non-empty fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (InputField, &str)> {
        self.values
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }

    /// Parses every field into a [`CostInput`].
    ///
    /// Empty fields become zero, except `resaleYears` which becomes one so
    /// depreciation never divides by zero.
    ///
    /// # Errors
    ///
    /// Returns [`ParseDecimalError`] for the first non-empty field whose text
    /// is not a number.
    pub fn to_cost_input(&self) -> Result<CostInput, ParseDecimalError> {
        let parse = |field| parse_decimal_or(self.get(field), Decimal::ZERO);

        Ok(CostInput {
            car_price: parse(InputField::CarPrice)?,
            fuel_efficiency: parse(InputField::FuelEfficiency)?,
            fuel_price: parse(InputField::FuelPrice)?,
            distance_to_work: parse(InputField::DistanceToWork)?,
            working_days_per_month: parse(InputField::WorkingDaysPerMonth)?,
            maintenance_costs: parse(InputField::MaintenanceCosts)?,
            insurance_costs: parse(InputField::InsuranceCosts)?,
            resale_value: parse(InputField::ResaleValue)?,
            resale_years: parse_decimal_or(self.get(InputField::ResaleYears), Decimal::ONE)?,
            public_transport_costs: parse(InputField::PublicTransportCosts)?,
        })
    }
}

impl fmt::Display for InputSet {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for field in InputField::ALL {
            let value = match self.get(field) {
                "" => "—",
                raw => raw,
            };
            writeln!(f, "{:<24}{} {}", format!("{}:", field.label()), value, field.unit())?;
        }
        Ok(())
    }
}
