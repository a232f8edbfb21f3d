//! State of one calculator form.
//!
//! [`CalculatorSession`] is the event adapter between a front end and the
//! pure validators and engine: it stores raw keystrokes, keeps the error map
//! current, and holds the last successful result together with the two
//! display toggles. Nothing here is shared between sessions.

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    CalculationResult, ChartStyle, CostEngine, FieldErrors, InputField, InputSet, ViewMode,
    utils::is_acceptable_input,
    validation::{validate_field, validate_form},
};

/// Notice shown when a validated calculation still fails.
pub const CALCULATION_FAILED_NOTICE: &str =
    "Unable to calculate costs. Please check your inputs and try again.";

/// A keystroke was refused at the input boundary; the field is unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{text}' is not accepted for {field}: only digits and one decimal point are allowed")]
pub struct InputRejected {
    pub field: InputField,
    pub text: String,
}

/// Why [`CalculatorSession::calculate`] produced no result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalculateError {
    /// One or more fields are invalid or missing.
    #[error("{} field(s) need attention", .0.len())]
    Invalid(FieldErrors),

    /// The inputs validated but the arithmetic failed.
    #[error("{}", CALCULATION_FAILED_NOTICE)]
    Failed,
}

/// Form inputs, errors, last result and display toggles of one calculator.
#[derive(Debug, Clone, Default)]
pub struct CalculatorSession {
    engine: CostEngine,
    inputs: InputSet,
    errors: FieldErrors,
    result: Option<CalculationResult>,
    view_mode: ViewMode,
    chart_style: ChartStyle,
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one edit to `field`.
    ///
    /// Text containing anything other than digits and a single decimal point
    /// is rejected and the stored value is left as it was. Otherwise the text
    /// is stored and the field's error is re-derived from it alone; clearing
    /// a field clears its error.
    ///
    /// # Errors
    ///
    /// Returns [`InputRejected`] when the text fails the boundary check.
    pub fn update_field(
        &mut self,
        field: InputField,
        text: &str,
    ) -> Result<(), InputRejected> {
        if !is_acceptable_input(text) {
            warn!(%field, text, "rejected keystroke");
            return Err(InputRejected {
                field,
                text: text.to_string(),
            });
        }

        self.inputs.set(field, text);
        self.errors.set(field, validate_field(field, text));
        Ok(())
    }

    /// Replaces every input at once, e.g. with a row loaded from a file.
    ///
    /// The boundary check is skipped; each field is validated on its own
    /// exactly as after a keystroke.
    pub fn load_inputs(
        &mut self,
        inputs: InputSet,
    ) {
        self.errors = FieldErrors::new();
        for field in InputField::ALL {
            self.errors.set(field, validate_field(field, inputs.get(field)));
        }
        self.inputs = inputs;
    }

    /// Re-validates the whole form, replacing the error map.
    ///
    /// Returns `true` when every field is valid and present as required.
    pub fn validate(&mut self) -> bool {
        self.errors = validate_form(&self.inputs);
        self.errors.is_empty()
    }

    /// Validates the form and, if it passes, runs the engine.
    ///
    /// On success the new result replaces the previous one. On any failure
    /// the previous result, if there is one, is kept unchanged.
    ///
    /// # Errors
    ///
    /// - [`CalculateError::Invalid`] with the error map when validation fails
    /// - [`CalculateError::Failed`] when the inputs cannot be parsed or the
    ///   arithmetic fails
    pub fn calculate(&mut self) -> Result<&CalculationResult, CalculateError> {
        if !self.validate() {
            debug!(errors = self.errors.len(), "calculation blocked by validation");
            return Err(CalculateError::Invalid(self.errors.clone()));
        }

        let computed = self
            .inputs
            .to_cost_input()
            .map_err(|error| {
                warn!(%error, "inputs could not be parsed");
                CalculateError::Failed
            })
            .and_then(|input| {
                self.engine.calculate(&input).map_err(|error| {
                    warn!(%error, "cost calculation failed");
                    CalculateError::Failed
                })
            })?;

        Ok(&*self.result.insert(computed))
    }

    pub fn inputs(&self) -> &InputSet {
        &self.inputs
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The last successful result, or `None` before the first one.
    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(
        &mut self,
        view_mode: ViewMode,
    ) {
        self.view_mode = view_mode;
    }

    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggled();
        self.view_mode
    }

    pub fn chart_style(&self) -> ChartStyle {
        self.chart_style
    }

    pub fn set_chart_style(
        &mut self,
        chart_style: ChartStyle,
    ) {
        self.chart_style = chart_style;
    }

    pub fn toggle_chart_style(&mut self) -> ChartStyle {
        self.chart_style = self.chart_style.toggled();
        self.chart_style
    }

    /// Clears inputs, errors and the last result. Toggles are kept.
    pub fn reset(&mut self) {
        self.inputs = InputSet::new();
        self.errors = FieldErrors::new();
        self.result = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{FieldError, calculations::common::round_half_up};

    fn filled_session() -> CalculatorSession {
        let mut session = CalculatorSession::new();
        for (field, text) in [
            (InputField::CarPrice, "600000"),
            (InputField::FuelEfficiency, "15"),
            (InputField::FuelPrice, "100"),
            (InputField::DistanceToWork, "10"),
            (InputField::WorkingDaysPerMonth, "22"),
            (InputField::MaintenanceCosts, "1000"),
            (InputField::InsuranceCosts, "12000"),
            (InputField::ResaleValue, "200000"),
            (InputField::ResaleYears, "5"),
            (InputField::PublicTransportCosts, "2000"),
        ] {
            session.update_field(field, text).unwrap();
        }
        session
    }

    #[test]
    fn update_field_rejects_non_numeric_keystrokes() {
        let mut session = CalculatorSession::new();
        session.update_field(InputField::FuelPrice, "10").unwrap();

        let result = session.update_field(InputField::FuelPrice, "10.5.");

        assert!(result.is_err());
        assert_eq!(session.inputs().get(InputField::FuelPrice), "10");
    }

    #[test]
    fn update_field_revalidates_that_field_only() {
        let mut session = CalculatorSession::new();

        session.update_field(InputField::WorkingDaysPerMonth, "32").unwrap();

        assert_eq!(
            session.errors().get(InputField::WorkingDaysPerMonth),
            Some(FieldError::WorkingDaysOutOfRange)
        );
        // Required fields are not flagged while typing.
        assert_eq!(session.errors().len(), 1);
    }

    #[test]
    fn clearing_a_field_clears_its_error() {
        let mut session = CalculatorSession::new();
        session.update_field(InputField::CarPrice, "0").unwrap();

        session.update_field(InputField::CarPrice, "").unwrap();

        assert!(session.errors().is_empty());
    }

    #[test]
    fn calculate_reference_scenario() {
        let mut session = filled_session();

        let result = session.calculate().unwrap();

        assert_eq!(round_half_up(result.total_car_cost), dec!(11600.00));
        assert_eq!(round_half_up(result.monthly_savings), dec!(-9600.00));
    }

    #[test]
    fn calculate_without_car_price_reports_required() {
        let mut session = filled_session();
        session.update_field(InputField::CarPrice, "").unwrap();

        let result = session.calculate();

        match result {
            Err(CalculateError::Invalid(errors)) => {
                assert_eq!(errors.message(InputField::CarPrice), "This field is required");
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert!(session.result().is_none());
    }

    #[test]
    fn failed_validation_keeps_previous_result() {
        let mut session = filled_session();
        let first = session.calculate().unwrap().clone();

        session.update_field(InputField::FuelEfficiency, "0").unwrap();
        assert!(session.calculate().is_err());

        assert_eq!(session.result(), Some(&first));
    }

    #[test]
    fn load_inputs_validates_without_boundary_check() {
        let mut session = CalculatorSession::new();
        let inputs = InputSet::from_pairs([
            (InputField::CarPrice, "600000"),
            (InputField::MaintenanceCosts, "-50"),
        ]);

        session.load_inputs(inputs);

        assert_eq!(session.inputs().get(InputField::MaintenanceCosts), "-50");
        assert_eq!(
            session.errors().get(InputField::MaintenanceCosts),
            Some(FieldError::Negative)
        );
        assert_eq!(session.errors().len(), 1);
    }

    #[test]
    fn overflow_surfaces_as_calculation_failure() {
        let mut session = filled_session();
        session
            .update_field(InputField::DistanceToWork, "79228162514264337593543950335")
            .unwrap();

        let result = session.calculate();

        assert_eq!(result, Err(CalculateError::Failed));
        assert_eq!(result.unwrap_err().to_string(), CALCULATION_FAILED_NOTICE);
    }

    #[test]
    fn new_calculation_replaces_result() {
        let mut session = filled_session();
        session.calculate().unwrap();

        session.update_field(InputField::PublicTransportCosts, "15000").unwrap();
        let result = session.calculate().unwrap();

        assert_eq!(round_half_up(result.monthly_savings), dec!(3400.00));
    }

    #[test]
    fn toggles_do_not_touch_the_result() {
        let mut session = filled_session();
        let first = session.calculate().unwrap().clone();

        assert_eq!(session.toggle_view_mode(), ViewMode::Yearly);
        assert_eq!(session.toggle_chart_style(), ChartStyle::Pie);

        assert_eq!(session.result(), Some(&first));
    }

    #[test]
    fn reset_keeps_toggles() {
        let mut session = filled_session();
        session.set_view_mode(ViewMode::Yearly);
        session.calculate().unwrap();

        session.reset();

        assert!(session.result().is_none());
        assert_eq!(session.inputs().iter().count(), 0);
        assert_eq!(session.view_mode(), ViewMode::Yearly);
    }
}
