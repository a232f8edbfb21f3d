//! CSV loader for batches of calculator scenarios.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Every
//! column is optional; a missing column or an empty cell leaves the field
//! empty, which the calculator treats as "not entered". Cells are kept as
//! raw text and only validated when the scenario is calculated.
//!
//! | Column                   | Notes                                     |
//! |--------------------------|-------------------------------------------|
//! | `name`                   | Label for the report; defaults to `Scenario <row>` |
//! | `car_price`              | required for calculation                  |
//! | `fuel_efficiency`        | km per litre, required for calculation    |
//! | `fuel_price`             | per litre, required for calculation       |
//! | `distance_to_work`       | one-way km                                |
//! | `working_days_per_month` | 1–31, required for calculation            |
//! | `maintenance_costs`      | per month                                 |
//! | `insurance_costs`        | per year                                  |
//! | `resale_value`           |                                           |
//! | `resale_years`           | defaults to 1 when empty                  |
//! | `public_transport_costs` | per month                                 |
//!
//! ### Minimal example
//!
//! ```csv
//! car_price,fuel_efficiency,fuel_price,working_days_per_month
//! 600000,15,100,22
//! ```
use std::path::{Path, PathBuf};

use commute_core::{InputField, InputSet};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: Option<String>,
    car_price: Option<String>,
    fuel_efficiency: Option<String>,
    fuel_price: Option<String>,
    distance_to_work: Option<String>,
    working_days_per_month: Option<String>,
    maintenance_costs: Option<String>,
    insurance_costs: Option<String>,
    resale_value: Option<String>,
    resale_years: Option<String>,
    public_transport_costs: Option<String>,
}

/// One named set of inputs read from a CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub inputs: InputSet,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading scenario data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, wrong
    /// column count, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// The file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Convert a single CSV row into a scenario.
///
/// row_number is 1-based (for default names).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Scenario {
    let cells = [
        (InputField::CarPrice, row.car_price),
        (InputField::FuelEfficiency, row.fuel_efficiency),
        (InputField::FuelPrice, row.fuel_price),
        (InputField::DistanceToWork, row.distance_to_work),
        (InputField::WorkingDaysPerMonth, row.working_days_per_month),
        (InputField::MaintenanceCosts, row.maintenance_costs),
        (InputField::InsuranceCosts, row.insurance_costs),
        (InputField::ResaleValue, row.resale_value),
        (InputField::ResaleYears, row.resale_years),
        (InputField::PublicTransportCosts, row.public_transport_costs),
    ];

    let inputs = InputSet::from_pairs(
        cells
            .into_iter()
            .filter_map(|(field, cell)| cell.map(|text| (field, text))),
    );

    let name = row
        .name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("Scenario {row_number}"));

    Scenario { name, inputs }
}

/// Parse CSV text and return the scenarios in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – if the CSV is structurally invalid.
pub fn load_from_str(input: &str) -> Result<Vec<Scenario>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    let scenarios = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| -> Result<Scenario, CsvLoadError> {
            let row = result?;
            Ok(convert_row(row, idx + 1)) // 1-based for user-facing names
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = scenarios.len(), "parsed scenario CSV");
    Ok(scenarios)
}

/// Convenience wrapper: read a file from disk and delegate to [load_from_str].
///
/// # Errors
///
/// Returns [CsvLoadError::Io] when the file cannot be read, or
/// [CsvLoadError::Parse] when the contents are invalid.
pub fn load_from_file(path: &Path) -> Result<Vec<Scenario>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL_CSV: &str = "\
car_price,fuel_efficiency,fuel_price,working_days_per_month
600000,15,100,22
";

    const FULL_CSV: &str = "\
name,car_price,fuel_efficiency,fuel_price,distance_to_work,working_days_per_month,maintenance_costs,insurance_costs,resale_value,resale_years,public_transport_costs
Hatchback,600000,15,100,10,22,1000,12000,200000,5,2000
";

    #[test]
    fn test_minimal_csv_sets_only_present_columns() {
        let scenarios = load_from_str(MINIMAL_CSV).expect("should parse minimal CSV");

        assert_eq!(scenarios.len(), 1);

        let s = &scenarios[0];
        assert_eq!(s.name, "Scenario 1");
        assert_eq!(s.inputs.get(InputField::CarPrice), "600000");
        assert_eq!(s.inputs.get(InputField::WorkingDaysPerMonth), "22");
        assert_eq!(s.inputs.get(InputField::DistanceToWork), "");
        assert_eq!(s.inputs.iter().count(), 4);
    }

    #[test]
    fn test_full_csv_all_fields_populated() {
        let scenarios = load_from_str(FULL_CSV).expect("should parse full CSV");
        let s = &scenarios[0];

        assert_eq!(s.name, "Hatchback");
        assert_eq!(s.inputs.iter().count(), 10);
        assert_eq!(s.inputs.get(InputField::InsuranceCosts), "12000");
        assert_eq!(s.inputs.get(InputField::PublicTransportCosts), "2000");
    }

    #[test]
    fn test_empty_cells_leave_fields_empty() {
        let csv = "\
name,car_price,resale_years
,450000,
";
        let scenarios = load_from_str(csv).expect("should parse");

        assert_eq!(scenarios[0].name, "Scenario 1");
        assert_eq!(scenarios[0].inputs.get(InputField::ResaleYears), "");
    }

    #[test]
    fn test_values_are_kept_as_raw_text() {
        // Invalid numbers survive loading; validation reports them later.
        let csv = "car_price,maintenance_costs\n1e5,-20\n";
        let scenarios = load_from_str(csv).expect("should parse");

        assert_eq!(scenarios[0].inputs.get(InputField::CarPrice), "1e5");
        assert_eq!(scenarios[0].inputs.get(InputField::MaintenanceCosts), "-20");
    }

    #[test]
    fn test_column_order_and_whitespace_do_not_matter() {
        let csv = "\
 fuel_price , car_price
 100 , 600000
";
        let scenarios = load_from_str(csv).expect("should parse");

        assert_eq!(scenarios[0].inputs.get(InputField::FuelPrice), "100");
        assert_eq!(scenarios[0].inputs.get(InputField::CarPrice), "600000");
    }

    #[test]
    fn test_ragged_row_returns_parse_error() {
        let csv = "car_price,fuel_price\n600000,100,extra\n";
        let result = load_from_str(csv);

        match result {
            Err(CsvLoadError::Parse(_)) => { /* expected */ }
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_returns_empty_vec() {
        let scenarios = load_from_str("car_price,fuel_price\n").expect("header-only CSV is valid");
        assert!(scenarios.is_empty());
    }

    #[test]
    fn test_rows_are_numbered_in_file_order() {
        let csv = "car_price\n1\n2\n3\n";
        let scenarios = load_from_str(csv).expect("should parse");

        let names: Vec<_> = scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Scenario 1", "Scenario 2", "Scenario 3"]);
    }
}
