//! Per-field and whole-form validation of calculator inputs.
//!
//! Both validators are pure. [`validate_field`] runs on every keystroke and
//! never looks at other fields; [`validate_form`] additionally enforces the
//! required fields and gates the calculation.

use std::{collections::BTreeMap, fmt};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{InputField, InputSet, utils::parse_optional_decimal};

/// Upper bound for working days in a month.
const MAX_WORKING_DAYS: Decimal = Decimal::from_parts(31, 0, 0, false, 0);

/// Why a single field was rejected. `Display` yields the user-facing message.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("This field is required")]
    Required,

    #[error("{} must be greater than 0", .0.label())]
    MustBePositive(InputField),

    #[error("Working days must be between 1 and 31")]
    WorkingDaysOutOfRange,

    #[error("Value cannot be negative")]
    Negative,

    /// The text is not a number at all. Unreachable from keyboard entry,
    /// which is filtered at the input boundary.
    #[error("Please enter a valid number")]
    InvalidNumber,
}

/// Checks one field's raw text against its constraint.
///
/// Empty text is always valid here; required-field presence is only
/// enforced by [`validate_form`].
pub fn validate_field(
    field: InputField,
    raw: &str,
) -> Option<FieldError> {
    let value = match parse_optional_decimal(raw) {
        Ok(Some(value)) => value,
        Ok(None) => return None,
        Err(_) => return Some(FieldError::InvalidNumber),
    };

    match field {
        InputField::CarPrice
        | InputField::FuelEfficiency
        | InputField::FuelPrice
        | InputField::ResaleYears => {
            (value <= Decimal::ZERO).then_some(FieldError::MustBePositive(field))
        }
        InputField::WorkingDaysPerMonth => (value <= Decimal::ZERO || value > MAX_WORKING_DAYS)
            .then_some(FieldError::WorkingDaysOutOfRange),
        _ => (value < Decimal::ZERO).then_some(FieldError::Negative),
    }
}

/// The message the presentation layer shows next to `field`: empty when
/// the text is valid.
pub fn field_message(
    field: InputField,
    raw: &str,
) -> String {
    validate_field(field, raw)
        .map(|error| error.to_string())
        .unwrap_or_default()
}

/// Validates every field and the presence of the required ones.
///
/// The form passes when the returned map is empty.
pub fn validate_form(inputs: &InputSet) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for field in InputField::ALL {
        let error = if field.is_required() && inputs.is_blank(field) {
            Some(FieldError::Required)
        } else {
            validate_field(field, inputs.get(field))
        };
        errors.set(field, error);
    }

    errors
}

/// Current error, if any, for each field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<InputField, FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        field: InputField,
    ) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// The message for `field`, or an empty string when it has no error.
    pub fn message(
        &self,
        field: InputField,
    ) -> String {
        self.get(field)
            .map(|error| error.to_string())
            .unwrap_or_default()
    }

    /// Records `error` for `field`; `None` clears any previous error.
    pub fn set(
        &mut self,
        field: InputField,
        error: Option<FieldError>,
    ) {
        match error {
            Some(error) => {
                self.errors.insert(field, error);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Field errors in form order.
    pub fn iter(&self) -> impl Iterator<Item = (InputField, FieldError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (field, error) in self.iter() {
            writeln!(f, "{}: {}", field.label(), error)?;
        }
        Ok(())
    }
}
