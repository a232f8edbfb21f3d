//! Glue between parsed command-line input and the calculator session.

use commute_core::{CALCULATION_FAILED_NOTICE, CalculateError, CalculatorSession};
use tracing::{info, warn};

use crate::{
    config::DisplayConfig,
    csv_loader::Scenario,
    report::{ErrorList, Report, ReportOptions},
};

impl From<DisplayConfig> for ReportOptions {
    fn from(display: DisplayConfig) -> Self {
        Self {
            view: display.view,
            chart: display.chart,
            words: display.words,
        }
    }
}

/// Creates a session whose toggles start from `options`.
pub fn build_session(options: &ReportOptions) -> CalculatorSession {
    let mut session = CalculatorSession::new();
    session.set_view_mode(options.view);
    session.set_chart_style(options.chart);
    session
}

/// Calculates the session's current inputs and renders the report.
///
/// The view and chart come from the session toggles. A result whose figures
/// cannot be scaled to the chosen view fails like any other calculation.
pub fn calculate_report(
    session: &mut CalculatorSession,
    words: bool,
) -> Result<String, CalculateError> {
    let options = ReportOptions {
        view: session.view_mode(),
        chart: session.chart_style(),
        words,
    };
    let result = session.calculate()?.clone();

    let report = Report::new(session.inputs(), &result, options).map_err(|error| {
        warn!(%error, view = %options.view, "result cannot be shown in this view");
        CalculateError::Failed
    })?;
    Ok(report.to_string())
}

/// Text to show the user for a failed calculation.
pub fn describe_failure(error: &CalculateError) -> String {
    match error {
        CalculateError::Invalid(errors) => ErrorList(errors).to_string(),
        CalculateError::Failed => format!("{CALCULATION_FAILED_NOTICE}\n"),
    }
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub output: String,
    pub succeeded: usize,
    pub failed: usize,
}

/// Calculates every scenario independently and concatenates the reports.
///
/// A scenario that fails is reported in place and does not stop the run.
pub fn run_batch(
    scenarios: Vec<Scenario>,
    options: &ReportOptions,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for scenario in scenarios {
        let mut session = build_session(options);
        session.load_inputs(scenario.inputs);

        summary.output.push_str(&format!("== {} ==\n", scenario.name));
        match calculate_report(&mut session, options.words) {
            Ok(report) => {
                summary.succeeded += 1;
                summary.output.push_str(&report);
            }
            Err(error) => {
                warn!(scenario = %scenario.name, %error, "scenario skipped");
                summary.failed += 1;
                summary.output.push_str(&describe_failure(&error));
            }
        }
        summary.output.push('\n');
    }

    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "batch finished"
    );
    summary
}
