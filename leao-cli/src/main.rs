mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use leao_core::calculations::{
    PersonalExpenses, RegimeConfig, RegimeSimulation, SelectionAverages, SelectionSummary,
};
use leao_core::{Month, extract_statement};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Carnê-Leão statement analyzer.
///
/// Reads the text of a statement page, prints the monthly breakdown with
/// effective rates, and simulates the cost of staying an individual (PF)
/// versus incorporating (PJ).
#[derive(Debug, Parser)]
struct Cli {
    /// Path to the statement page text.
    file: PathBuf,

    /// Monthly therapy expenses, deductible in the full-deduction variant.
    #[arg(long, default_value = "0")]
    therapy: Decimal,

    /// Monthly health-plan expenses.
    #[arg(long, default_value = "0")]
    health_plan: Decimal,

    /// Other monthly health expenses.
    #[arg(long, default_value = "0")]
    other_health: Decimal,

    /// Months to analyze, e.g. `--months Jan,Fev,Mar`. All twelve when
    /// omitted.
    #[arg(long, value_delimiter = ',', value_parser = parse_month)]
    months: Vec<Month>,

    /// Only print the monthly breakdown; skip the regime simulation.
    #[arg(long, default_value_t = false)]
    no_simulation: bool,
}

fn parse_month(s: &str) -> Result<Month, String> {
    Month::parse(s).ok_or_else(|| format!("unknown month abbreviation '{s}'"))
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let expenses = PersonalExpenses {
        therapy: cli.therapy,
        health_plan: cli.health_plan,
        other_health: cli.other_health,
    };
    if expenses.therapy < Decimal::ZERO
        || expenses.health_plan < Decimal::ZERO
        || expenses.other_health < Decimal::ZERO
    {
        bail!("expense amounts must not be negative");
    }

    let text = fs::read_to_string(&cli.file)
        .with_context(|| format!("cannot read statement text: {}", cli.file.display()))?;

    let statement = extract_statement(&text)
        .with_context(|| format!("failed to extract statement from {}", cli.file.display()))?;

    let months = if cli.months.is_empty() {
        Month::ALL.to_vec()
    } else {
        cli.months.clone()
    };
    debug!(selected = months.len(), "analyzing selection");

    let selection = statement.select(&months);

    println!("{}", report::header(&statement));
    println!();
    println!("{}", report::monthly_table(&selection));

    let summary = SelectionSummary::over_records(selection.iter().copied());
    println!("{}", report::summary_block(&summary));

    if !cli.no_simulation {
        let averages = SelectionAverages::over_records(selection.iter().copied())
            .context("cannot simulate over this selection")?;
        let simulation = RegimeSimulation::new(RegimeConfig::year_2025())?;
        let comparison = simulation.compare(&averages, &expenses);

        println!();
        println!("{}", report::comparison_block(&comparison));
    }

    Ok(())
}
