use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::preferences::{Period, Weekday};

/// Course-planning assistant client.
#[derive(Debug, Parser)]
#[command(name = "coursai", version, about)]
pub struct Args {
    /// Log output format
    #[arg(long, value_enum, default_value_t = default_tracing_format(), global = true)]
    pub tracing: TracingFormat,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TracingFormat {
    Pretty,
    Json,
}

fn default_tracing_format() -> TracingFormat {
    if cfg!(debug_assertions) {
        TracingFormat::Pretty
    } else {
        TracingFormat::Json
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build preferences, request plans, and print the timetables
    Plan(PlanArgs),
    /// Transform and print a saved plan service response
    Render {
        /// JSON file holding the raw response body
        file: PathBuf,
        /// Print the transformed result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, clap::Args)]
pub struct PlanArgs {
    /// TOML preference file applied before any other flag
    #[arg(short, long)]
    pub preferences: Option<PathBuf>,

    /// Set a preference field, e.g. `--set target_credits=22`
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub fields: Vec<(String, String)>,

    /// Toggle a period, e.g. `--period mon:2` or `--period 水:3`
    #[arg(long = "period", value_name = "DAY:N", value_parser = parse_slot)]
    pub periods: Vec<(Weekday, Period)>,

    /// Search all time slots; clears any selected periods
    #[arg(long)]
    pub no_preference: bool,

    /// Print the request body instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    Ok((name.trim().to_owned(), value.to_owned()))
}

fn parse_slot(s: &str) -> Result<(Weekday, Period), String> {
    let (day, period) = s
        .split_once(':')
        .ok_or_else(|| format!("expected DAY:PERIOD, got '{s}'"))?;
    let day: Weekday = day.parse().map_err(|e| format!("{e}"))?;
    let period = period
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("invalid period '{period}'"))
        .and_then(|n| Period::new(n).map_err(|e| e.to_string()))?;
    Ok((day, period))
}
