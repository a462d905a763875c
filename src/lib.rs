// NEO Explorer - Core Library
// Loads near-Earth objects and close approaches, links them, and writes
// filtered results back to CSV or JSON

pub mod config;
pub mod database;
pub mod entities;
pub mod error;
pub mod extract;
pub mod filters;
pub mod write;

// Re-export commonly used types
pub use database::NeoDatabase;
pub use entities::{parse_approach_time, CloseApproach, NearEarthObject};
pub use error::{NeoError, Result};
pub use extract::{load_approaches, load_neos};
pub use filters::{limit, ApproachFilter};
pub use write::{write_results, write_to_csv, write_to_json, OutputFormat, CSV_FIELDNAMES};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
