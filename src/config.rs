// ⚙️ Command-line configuration
//
// Input files are always passed explicitly; there are no built-in default
// paths.

use chrono::NaiveDate;
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::filters::ApproachFilter;

/// Explore near-Earth objects and their close approaches to Earth
#[derive(Debug, Clone, Parser)]
#[command(name = "neo-explorer", version, about)]
pub struct Cli {
    /// CSV file of near-Earth objects (needs a `pdes` column)
    #[arg(long, value_name = "PATH")]
    pub neofile: PathBuf,

    /// JSON file of close approaches (`{"fields": [...], "data": [...]}`)
    #[arg(long, value_name = "PATH")]
    pub cadfile: PathBuf,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Look up a single NEO by designation or name
    Inspect(InspectArgs),
    /// Select close approaches and print or save them
    Query(QueryArgs),
}

#[derive(Debug, Clone, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["pdes", "name"])))]
pub struct InspectArgs {
    /// Primary designation, e.g. "433"
    #[arg(short, long)]
    pub pdes: Option<String>,

    /// IAU name, e.g. "Eros"
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Only approaches on this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Only approaches on or after this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub start_date: Option<NaiveDate>,

    /// Only approaches on or before this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub end_date: Option<NaiveDate>,

    /// Minimum approach distance (au)
    #[arg(long)]
    pub min_distance: Option<f64>,

    /// Maximum approach distance (au)
    #[arg(long)]
    pub max_distance: Option<f64>,

    /// Minimum relative velocity (km/s)
    #[arg(long)]
    pub min_velocity: Option<f64>,

    /// Maximum relative velocity (km/s)
    #[arg(long)]
    pub max_velocity: Option<f64>,

    /// Minimum NEO diameter (km)
    #[arg(long)]
    pub min_diameter: Option<f64>,

    /// Maximum NEO diameter (km)
    #[arg(long)]
    pub max_diameter: Option<f64>,

    /// Only potentially hazardous NEOs
    #[arg(long, conflicts_with = "not_hazardous")]
    pub hazardous: bool,

    /// Only NEOs that are not potentially hazardous
    #[arg(long)]
    pub not_hazardous: bool,

    /// Maximum number of results (0 for no limit)
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// Save results to a .csv or .json file instead of printing them
    #[arg(short, long, value_name = "PATH")]
    pub outfile: Option<PathBuf>,
}

impl QueryArgs {
    pub fn to_filter(&self) -> ApproachFilter {
        let hazardous = match (self.hazardous, self.not_hazardous) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        ApproachFilter {
            date: self.date,
            start_date: self.start_date,
            end_date: self.end_date,
            distance_min: self.min_distance,
            distance_max: self.max_distance,
            velocity_min: self.min_velocity,
            velocity_max: self.max_velocity,
            diameter_min: self.min_diameter,
            diameter_max: self.max_diameter,
            hazardous,
        }
    }
}
