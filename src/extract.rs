// 📥 Extraction - NEO CSV and close approach JSON loaders
//
// Both loaders read one file fully and return a materialized Vec in input
// order. Any malformed row aborts the whole load.

use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

use crate::entities::{parse_approach_time, CloseApproach, NearEarthObject};
use crate::error::{NeoError, Result};

// ============================================================================
// NEO CSV
// ============================================================================

/// Column holding the primary designation; every other column is optional
pub const DESIGNATION_COLUMN: &str = "pdes";

/// `pha` code marking a Potentially Hazardous Asteroid
pub const HAZARDOUS_CODE: &str = "Y";

/// Raw NEO row. The real file has dozens of columns; only these are read.
#[derive(Debug, Deserialize)]
struct NeoRow {
    pdes: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    diameter: Option<String>,
    #[serde(default)]
    pha: Option<String>,
}

impl NeoRow {
    fn into_neo(self, line: usize) -> Result<NearEarthObject> {
        if self.pdes.is_empty() {
            return Err(NeoError::invalid_value(
                DESIGNATION_COLUMN,
                self.pdes,
                format!("line {}", line),
            ));
        }

        let name = self.name.filter(|n| !n.is_empty());

        let diameter = match self.diameter.as_deref().map(str::trim) {
            None | Some("") => f64::NAN,
            Some(raw) => raw.parse::<f64>().map_err(|_| {
                NeoError::invalid_value("diameter", raw, format!("line {}", line))
            })?,
        };

        let hazardous = self.pha.as_deref().map(str::trim) == Some(HAZARDOUS_CODE);

        Ok(NearEarthObject::new(self.pdes, name, diameter, hazardous))
    }
}

/// Read near-Earth objects from a CSV file with a header row
///
/// # Errors
/// * `NeoError::Io` - file missing or unreadable
/// * `NeoError::MissingColumn` - header has no `pdes` column
/// * `NeoError::InvalidValue` - empty designation or non-numeric diameter
pub fn load_neos(neo_csv_path: &Path) -> Result<Vec<NearEarthObject>> {
    let file = File::open(neo_csv_path)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    if !reader.headers()?.iter().any(|h| h == DESIGNATION_COLUMN) {
        return Err(NeoError::MissingColumn {
            path: neo_csv_path.to_path_buf(),
            column: DESIGNATION_COLUMN.to_string(),
        });
    }

    let mut neos = Vec::new();

    for (row_num, result) in reader.deserialize::<NeoRow>().enumerate() {
        // +2 because: 1-indexed + header row
        let row = result?;
        neos.push(row.into_neo(row_num + 2)?);
    }

    info!(path = %neo_csv_path.display(), count = neos.len(), "Loaded NEOs");
    Ok(neos)
}

// ============================================================================
// CLOSE APPROACH JSON
// ============================================================================

/// Top-level key holding the close approach rows
pub const DATA_KEY: &str = "data";

// Fixed positions in each `data` entry (JPL SBDB close-approach API layout)
const DESIGNATION_INDEX: usize = 0;
const TIME_INDEX: usize = 3;
const DISTANCE_INDEX: usize = 4;
const VELOCITY_INDEX: usize = 7;

/// Minimum number of positional fields per entry
pub const MIN_APPROACH_FIELDS: usize = VELOCITY_INDEX + 1;

fn string_field<'a>(entry: &'a [Value], idx: usize, field: &str, index: usize) -> Result<&'a str> {
    entry[idx]
        .as_str()
        .ok_or_else(|| NeoError::invalid_value(field, entry[idx].to_string(), format!("entry {}", index)))
}

/// Accepts `"0.0114"` (the API's encoding) as well as a bare JSON number
fn float_field(entry: &[Value], idx: usize, field: &str, index: usize) -> Result<f64> {
    let value = &entry[idx];
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        let raw = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        NeoError::invalid_value(field, raw, format!("entry {}", index))
    })
}

fn parse_approach(entry: &Value, index: usize) -> Result<CloseApproach> {
    let fields = entry.as_array().ok_or_else(|| {
        NeoError::invalid_value("entry", entry.to_string(), format!("entry {}", index))
    })?;

    if fields.len() < MIN_APPROACH_FIELDS {
        return Err(NeoError::TooFewFields {
            index,
            expected: MIN_APPROACH_FIELDS,
            found: fields.len(),
        });
    }

    let designation = string_field(fields, DESIGNATION_INDEX, "des", index)?;
    if designation.is_empty() {
        return Err(NeoError::invalid_value("des", "", format!("entry {}", index)));
    }

    let raw_time = string_field(fields, TIME_INDEX, "cd", index)?;
    let time = parse_approach_time(raw_time)
        .map_err(|_| NeoError::invalid_value("cd", raw_time, format!("entry {}", index)))?;

    let distance = float_field(fields, DISTANCE_INDEX, "dist", index)?;
    let velocity = float_field(fields, VELOCITY_INDEX, "v_rel", index)?;

    Ok(CloseApproach::new(designation.to_string(), time, distance, velocity))
}

/// Read close approaches from a `{"fields": [...], "data": [[...], ...]}` document
///
/// The `fields` header is not consulted; positions are fixed.
///
/// # Errors
/// * `NeoError::Io` - file missing or unreadable
/// * `NeoError::Json` - not a JSON document
/// * `NeoError::MissingKey` - no top-level `data` array
/// * `NeoError::TooFewFields` - entry shorter than 8 fields
/// * `NeoError::InvalidValue` - bad designation, time, distance or velocity
pub fn load_approaches(cad_json_path: &Path) -> Result<Vec<CloseApproach>> {
    let file = File::open(cad_json_path)?;
    let json: Value = serde_json::from_reader(BufReader::new(file))?;

    let data = json
        .get(DATA_KEY)
        .and_then(|d| d.as_array())
        .ok_or_else(|| NeoError::MissingKey {
            path: cad_json_path.to_path_buf(),
            key: DATA_KEY.to_string(),
        })?;

    debug!(entries = data.len(), "Parsing close approach entries");

    let approaches = data
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_approach(entry, index))
        .collect::<Result<Vec<_>>>()?;

    info!(path = %cad_json_path.display(), count = approaches.len(), "Loaded close approaches");
    Ok(approaches)
}
