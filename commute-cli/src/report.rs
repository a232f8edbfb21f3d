//! Text rendering of a calculation: entered values, summary cards and a
//! breakdown chart.

use std::fmt;

use commute_core::{
    CalculationResult, ChartStyle, CostEngineError, FieldErrors, InputSet, ViewMode,
    calculations::common::round_half_up,
    formatting::{format_currency, format_in_words, format_scaled},
};
use rust_decimal::{Decimal, prelude::ToPrimitive};

/// Width of the longest bar in the bar chart.
const BAR_WIDTH: usize = 30;

/// How a report is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub view: ViewMode,
    pub chart: ChartStyle,
    /// Spell amounts out next to the figures.
    pub words: bool,
}

fn period_label(view: ViewMode) -> &'static str {
    match view {
        ViewMode::Monthly => "month",
        ViewMode::Yearly => "year",
    }
}

/// Figures scaled to the displayed period.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PeriodFigures {
    car_cost: Decimal,
    commute_cost: Decimal,
    savings: Decimal,
    components: [(&'static str, Decimal); 4],
    /// Sum of the absolute component values.
    component_magnitude: Decimal,
}

impl PeriodFigures {
    fn new(
        result: &CalculationResult,
        view: ViewMode,
    ) -> Result<Self, CostEngineError> {
        let components = result.components(view)?;
        let component_magnitude = components
            .iter()
            .try_fold(Decimal::ZERO, |total, (_, value)| {
                total.checked_add(value.abs())
            })
            .ok_or(CostEngineError::Overflow("cost breakdown"))?;

        Ok(Self {
            car_cost: result.car_cost(view)?,
            commute_cost: result.commute_cost(view)?,
            savings: result.savings(view),
            components,
            component_magnitude,
        })
    }
}

/// A fully scaled report, ready to print.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    inputs: &'a InputSet,
    result: &'a CalculationResult,
    figures: PeriodFigures,
    options: ReportOptions,
}

impl<'a> Report<'a> {
    /// Scales `result` to the view in `options`.
    ///
    /// # Errors
    ///
    /// Returns [`CostEngineError::Overflow`] when a yearly figure does not
    /// fit in a [`Decimal`].
    pub fn new(
        inputs: &'a InputSet,
        result: &'a CalculationResult,
        options: ReportOptions,
    ) -> Result<Self, CostEngineError> {
        Ok(Self {
            inputs,
            result,
            figures: PeriodFigures::new(result, options.view)?,
            options,
        })
    }

    fn write_amount(
        &self,
        out: &mut impl fmt::Write,
        label: &str,
        value: Decimal,
    ) -> fmt::Result {
        write!(
            out,
            "  {:<20}{} ({}",
            label,
            format_currency(value),
            format_scaled(value)
        )?;
        if self.options.words {
            write!(out, ", {}", format_in_words(value))?;
        }
        writeln!(out, ")")
    }

    fn write_inputs(
        &self,
        out: &mut impl fmt::Write,
    ) -> fmt::Result {
        writeln!(out, "Entered values")?;
        for line in self.inputs.to_string().lines() {
            writeln!(out, "  {line}")?;
        }
        Ok(())
    }

    fn write_cards(
        &self,
        out: &mut impl fmt::Write,
    ) -> fmt::Result {
        let period = period_label(self.options.view);
        let savings = self.figures.savings;

        writeln!(out, "Cost comparison per {period}")?;
        self.write_amount(out, "Car ownership", self.figures.car_cost)?;
        self.write_amount(out, "Public transport", self.figures.commute_cost)?;
        self.write_amount(out, "Savings", savings)?;

        if savings > Decimal::ZERO {
            writeln!(
                out,
                "  Public transport saves {} per {period}.",
                format_currency(savings)
            )?;
        } else if savings < Decimal::ZERO {
            writeln!(
                out,
                "  Driving costs {} more per {period} than public transport.",
                format_currency(savings.abs())
            )?;
        } else {
            writeln!(out, "  Both options cost the same.")?;
        }

        writeln!(
            out,
            "  {:<20}{} km per month, {} t CO2 per year",
            "Driving",
            round_half_up(self.result.monthly_distance).normalize(),
            round_half_up(self.result.yearly_emissions)
        )
    }

    fn write_bar_chart(
        &self,
        out: &mut impl fmt::Write,
    ) -> fmt::Result {
        let components = &self.figures.components;
        let largest = components
            .iter()
            .map(|(_, value)| value.abs())
            .max()
            .unwrap_or_default();

        writeln!(
            out,
            "Car cost breakdown per {}",
            period_label(self.options.view)
        )?;
        for (label, value) in components {
            let bar = if largest.is_zero() {
                0
            } else {
                (value.abs() / largest * Decimal::from(BAR_WIDTH))
                    .round()
                    .to_usize()
                    .unwrap_or(0)
            };
            let fill = if value.is_sign_negative() { '-' } else { '#' };
            writeln!(
                out,
                "  {:<14}{:<width$} {}",
                label,
                fill.to_string().repeat(bar),
                format_scaled(*value),
                width = BAR_WIDTH
            )?;
        }
        Ok(())
    }

    fn write_share_chart(
        &self,
        out: &mut impl fmt::Write,
    ) -> fmt::Result {
        let total = self.figures.component_magnitude;

        writeln!(out, "Car cost share per {}", period_label(self.options.view))?;
        for (label, value) in &self.figures.components {
            let share = if total.is_zero() {
                Decimal::ZERO
            } else {
                round_half_up(value.abs() / total * Decimal::ONE_HUNDRED)
            };
            let credit = if value.is_sign_negative() && !value.is_zero() {
                " (credit)"
            } else {
                ""
            };
            writeln!(
                out,
                "  {:<14}{:>6.2}%  {}{}",
                label,
                share,
                format_scaled(*value),
                credit
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        self.write_inputs(f)?;
        writeln!(f)?;
        self.write_cards(f)?;
        writeln!(f)?;
        match self.options.chart {
            ChartStyle::Bar => self.write_bar_chart(f),
            ChartStyle::Pie => self.write_share_chart(f),
        }
    }
}

/// Validation errors, one per line, in form order.
#[derive(Debug, Clone, Copy)]
pub struct ErrorList<'a>(pub &'a FieldErrors);

impl fmt::Display for ErrorList<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Please correct the following fields:")?;
        for (field, error) in self.0.iter() {
            writeln!(f, "  {:<24}{}", field.label(), error)?;
        }
        Ok(())
    }
}
