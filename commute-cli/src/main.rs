use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use commute_cli::{
    app,
    config::AppConfig,
    csv_loader,
    logging::{apply_config, enable_file_logging, init_logging},
    report::ReportOptions,
};
use commute_core::{ChartStyle, InputField, ViewMode};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compares the monthly and yearly cost of owning a car with commuting by
/// public transport.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// TOML file with display and logging settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `info,commute_core=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Show costs per month or per year.
    #[arg(long, global = true)]
    view: Option<ViewMode>,

    /// Draw the breakdown as a bar or pie chart.
    #[arg(long, global = true)]
    chart: Option<ChartStyle>,

    /// Spell amounts out in words.
    #[arg(long, global = true)]
    words: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate one scenario from command-line values.
    Calc(FieldArgs),

    /// Calculate every row of a scenario CSV file.
    Batch {
        /// Path to the CSV file.
        file: PathBuf,
    },
}

/// Raw field values, exactly as typed.
#[derive(Debug, Args)]
struct FieldArgs {
    /// Purchase price of the car.
    #[arg(long)]
    car_price: Option<String>,

    /// Kilometres per litre.
    #[arg(long)]
    fuel_efficiency: Option<String>,

    /// Price of one litre of fuel.
    #[arg(long)]
    fuel_price: Option<String>,

    /// One-way distance to work in kilometres.
    #[arg(long)]
    distance_to_work: Option<String>,

    /// Commuting days per month (1 to 31).
    #[arg(long)]
    working_days_per_month: Option<String>,

    /// Maintenance per month.
    #[arg(long)]
    maintenance_costs: Option<String>,

    /// Insurance per year.
    #[arg(long)]
    insurance_costs: Option<String>,

    /// Expected resale value.
    #[arg(long)]
    resale_value: Option<String>,

    /// Years until resale.
    #[arg(long)]
    resale_years: Option<String>,

    /// Public transport pass per month.
    #[arg(long)]
    public_transport_costs: Option<String>,
}

impl FieldArgs {
    fn into_pairs(self) -> Vec<(InputField, String)> {
        [
            (InputField::CarPrice, self.car_price),
            (InputField::FuelEfficiency, self.fuel_efficiency),
            (InputField::FuelPrice, self.fuel_price),
            (InputField::DistanceToWork, self.distance_to_work),
            (InputField::WorkingDaysPerMonth, self.working_days_per_month),
            (InputField::MaintenanceCosts, self.maintenance_costs),
            (InputField::InsuranceCosts, self.insurance_costs),
            (InputField::ResaleValue, self.resale_value),
            (InputField::ResaleYears, self.resale_years),
            (InputField::PublicTransportCosts, self.public_transport_costs),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|text| (field, text)))
        .collect()
    }
}

// ─── settings ────────────────────────────────────────────────────────────────

/// Loads the config file and layers the command-line overrides on top.
fn resolve_options(cli: &Cli) -> anyhow::Result<ReportOptions> {
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    apply_config(&config.logging, cli.log_level.as_deref())
        .context("cannot apply logging config")?;
    if let Some(path) = &cli.log_file {
        enable_file_logging(path)?;
    }

    let mut options = ReportOptions::from(config.display);
    if let Some(view) = cli.view {
        options.view = view;
    }
    if let Some(chart) = cli.chart {
        options.chart = chart;
    }
    options.words |= cli.words;

    debug!(?options, "resolved display options");
    Ok(options)
}

// ─── commands ────────────────────────────────────────────────────────────────

fn run_calc(
    fields: FieldArgs,
    options: &ReportOptions,
) -> anyhow::Result<()> {
    let mut session = app::build_session(options);
    for (field, text) in fields.into_pairs() {
        session.update_field(field, &text)?;
    }

    match app::calculate_report(&mut session, options.words) {
        Ok(report) => {
            print!("{report}");
            Ok(())
        }
        Err(error) => {
            eprint!("{}", app::describe_failure(&error));
            Err(error.into())
        }
    }
}

fn run_batch(
    file: PathBuf,
    options: &ReportOptions,
) -> anyhow::Result<()> {
    let scenarios = csv_loader::load_from_file(&file)?;
    info!(count = scenarios.len(), file = %file.display(), "loaded scenarios");

    let summary = app::run_batch(scenarios, options);
    print!("{}", summary.output);

    if summary.succeeded == 0 && summary.failed > 0 {
        bail!("no scenario in '{}' could be calculated", file.display());
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_logging("info");

    let cli = Cli::parse();
    let options = resolve_options(&cli)?;

    match cli.command {
        Command::Calc(fields) => run_calc(fields, &options),
        Command::Batch { file } => run_batch(file, &options),
    }
}
