// 📤 Writers - serialize linked close approaches to CSV or JSON
//
// Rendering is a pure projection: each record is mapped into a local row
// struct and the shared NEO behind it is only ever read.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::entities::CloseApproach;
use crate::error::{NeoError, Result};

/// Output CSV header, in column order
pub const CSV_FIELDNAMES: [&str; 7] = [
    "datetime_utc",
    "distance_au",
    "velocity_km_s",
    "designation",
    "name",
    "diameter_km",
    "potentially_hazardous",
];

// ============================================================================
// OUTPUT FORMAT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// Pick the writer from the output file's extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("csv") => Ok(OutputFormat::Csv),
            Some("json") => Ok(OutputFormat::Json),
            _ => Err(NeoError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Write `results` to `path` with the writer matching its extension
pub fn write_results<'a, I>(results: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = &'a CloseApproach>,
{
    match OutputFormat::from_path(path)? {
        OutputFormat::Csv => write_to_csv(results, path),
        OutputFormat::Json => write_to_json(results, path),
    }
}

// ============================================================================
// CSV
// ============================================================================

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    datetime_utc: String,
    distance_au: f64,
    velocity_km_s: f64,
    designation: &'a str,
    name: &'a str,
    diameter_km: String,
    potentially_hazardous: &'static str,
}

fn render_diameter(diameter: f64) -> String {
    if diameter.is_nan() {
        "nan".to_string()
    } else {
        diameter.to_string()
    }
}

/// Write close approaches to a CSV file, one row per record
///
/// The header row is always written, so an empty input yields a
/// header-only file. Returns the number of data rows written.
pub fn write_to_csv<'a, I>(results: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = &'a CloseApproach>,
{
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(CSV_FIELDNAMES)?;

    let mut count = 0;
    for approach in results {
        let neo = approach.neo_or_unknown();
        let row = CsvRow {
            datetime_utc: approach.time_str(),
            distance_au: approach.distance,
            velocity_km_s: approach.velocity,
            // The approach's own copy, so unlinked records still render
            designation: &approach.designation,
            name: neo.name.as_deref().unwrap_or(""),
            diameter_km: render_diameter(neo.diameter),
            potentially_hazardous: if neo.hazardous { "True" } else { "False" },
        };
        writer.serialize(row)?;
        count += 1;
    }

    writer.flush()?;
    debug!(path = %path.display(), rows = count, "Wrote CSV");
    Ok(count)
}

// ============================================================================
// JSON
// ============================================================================

#[derive(Debug, Serialize)]
struct JsonNeo {
    designation: String,
    name: String,
    /// NaN serializes as `null`: JSON has no NaN literal
    diameter_km: f64,
    potentially_hazardous: bool,
}

#[derive(Debug, Serialize)]
struct JsonRow {
    datetime_utc: String,
    distance_au: f64,
    velocity_km_s: f64,
    neo: JsonNeo,
}

impl From<&CloseApproach> for JsonRow {
    fn from(approach: &CloseApproach) -> Self {
        let neo = approach.neo_or_unknown();
        JsonRow {
            datetime_utc: approach.time_str(),
            distance_au: approach.distance,
            velocity_km_s: approach.velocity,
            neo: JsonNeo {
                designation: neo.designation.clone(),
                name: neo.name.clone().unwrap_or_default(),
                diameter_km: neo.diameter,
                potentially_hazardous: neo.hazardous,
            },
        }
    }
}

/// Write close approaches to a JSON file as a single array of objects
///
/// Returns the number of records written.
pub fn write_to_json<'a, I>(results: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = &'a CloseApproach>,
{
    let rows: Vec<JsonRow> = results.into_iter().map(JsonRow::from).collect();

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.flush()?;

    debug!(path = %path.display(), records = rows.len(), "Wrote JSON");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{parse_approach_time, NearEarthObject};
    use serde_json::Value;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn approach(designation: &str) -> CloseApproach {
        CloseApproach::new(
            designation.to_string(),
            parse_approach_time("1900-Dec-27 01:30").unwrap(),
            0.0114,
            5.89,
        )
    }

    fn eros() -> Arc<NearEarthObject> {
        Arc::new(NearEarthObject::new(
            "433".to_string(),
            Some("Eros".to_string()),
            16.84,
            false,
        ))
    }

    fn out_path(dir: &TempDir, name: &str) -> PathBuf {
        dir.path().join(name)
    }

    // ============================================================================
    // Output format
    // ============================================================================

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("out.csv")).unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path(Path::new("OUT.JSON")).unwrap(), OutputFormat::Json);
        assert!(matches!(
            OutputFormat::from_path(Path::new("out.txt")),
            Err(NeoError::UnsupportedFormat { .. })
        ));
        assert!(OutputFormat::from_path(Path::new("out")).is_err());
    }

    #[test]
    fn test_write_results_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = out_path(&dir, "out.xml");
        let ca = approach("433");

        assert!(write_results([&ca], &path).is_err());
        assert!(!path.exists());
    }

    // ============================================================================
    // CSV
    // ============================================================================

    #[test]
    fn test_csv_empty_input_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = out_path(&dir, "empty.csv");

        let count = write_to_csv(std::iter::empty::<&CloseApproach>(), &path).unwrap();
        assert_eq!(count, 0);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert_eq!(
            contents.trim_end(),
            "datetime_utc,distance_au,velocity_km_s,designation,name,diameter_km,potentially_hazardous"
        );
    }

    #[test]
    fn test_csv_linked_row() {
        let dir = TempDir::new().unwrap();
        let path = out_path(&dir, "linked.csv");
        let mut ca = approach("433");
        ca.link(eros());

        write_to_csv([&ca], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let row = contents.lines().nth(1).unwrap();
        assert_eq!(row, "1900-12-27 01:30,0.0114,5.89,433,Eros,16.84,False");
    }

    #[test]
    fn test_csv_unknown_neo_row() {
        let dir = TempDir::new().unwrap();
        let path = out_path(&dir, "unknown.csv");
        let mut linked = approach("2020 AB");
        linked.link(Arc::new(NearEarthObject::unknown("2020 AB")));
        let unlinked = approach("2021 CD");

        write_to_csv([&linked, &unlinked], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let rows: Vec<&str> = contents.lines().skip(1).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].ends_with(",,nan,False"));
        assert!(rows[1].starts_with("1900-12-27 01:30,0.0114,5.89,2021 CD,"));
        assert!(rows[1].ends_with(",,nan,False"));
    }

    #[test]
    fn test_csv_hazardous_and_order() {
        let dir = TempDir::new().unwrap();
        let path = out_path(&dir, "order.csv");
        let mut first = approach("1620");
        first.link(Arc::new(NearEarthObject::new(
            "1620".to_string(),
            Some("Geographos".to_string()),
            5.0,
            true,
        )));
        let mut second = approach("433");
        second.link(eros());

        write_to_csv(vec![&first, &second], &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(&records[0][3], "1620");
        assert_eq!(&records[0][6], "True");
        assert_eq!(&records[1][3], "433");
        assert_eq!(&records[1][6], "False");
    }

    #[test]
    fn test_csv_does_not_mutate_shared_neo() {
        let dir = TempDir::new().unwrap();
        let path = out_path(&dir, "shared.csv");
        let shared = Arc::new(NearEarthObject::new("2020 AB".to_string(), None, f64::NAN, true));
        let mut a = approach("2020 AB");
        let mut b = approach("2020 AB");
        a.link(Arc::clone(&shared));
        b.link(Arc::clone(&shared));

        write_to_csv([&a, &b], &path).unwrap();

        assert_eq!(shared.name, None);
        assert!(shared.diameter.is_nan());
        let contents = std::fs::read_to_string(&path).unwrap();
        let rows: Vec<&str> = contents.lines().skip(1).collect();
        assert_eq!(rows[0], rows[1]);
        assert!(rows[0].ends_with(",,nan,True"));
    }

    // ============================================================================
    // JSON
    // ============================================================================

    #[test]
    fn test_json_shape() {
        let dir = TempDir::new().unwrap();
        let path = out_path(&dir, "out.json");
        let mut ca = approach("433");
        ca.link(eros());

        assert_eq!(write_to_json([&ca], &path).unwrap(), 1);

        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let records = doc.as_array().unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record["datetime_utc"], "1900-12-27 01:30");
        assert_eq!(record["distance_au"], 0.0114);
        assert_eq!(record["velocity_km_s"], 5.89);
        assert_eq!(record["neo"]["designation"], "433");
        assert_eq!(record["neo"]["name"], "Eros");
        assert_eq!(record["neo"]["diameter_km"], 16.84);
        assert_eq!(record["neo"]["potentially_hazardous"], false);
    }

    #[test]
    fn test_json_unknown_neo() {
        let dir = TempDir::new().unwrap();
        let path = out_path(&dir, "unknown.json");
        let unlinked = approach("2021 CD");

        write_to_json([&unlinked], &path).unwrap();

        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let neo = &doc[0]["neo"];
        assert_eq!(neo["designation"], "2021 CD");
        assert_eq!(neo["name"], "");
        assert!(neo["diameter_km"].is_null());
        assert_eq!(neo["potentially_hazardous"], false);
    }

    #[test]
    fn test_json_empty_input() {
        let dir = TempDir::new().unwrap();
        let path = out_path(&dir, "empty.json");

        write_to_json(std::iter::empty::<&CloseApproach>(), &path).unwrap();

        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc, Value::Array(vec![]));
    }

    #[test]
    fn test_write_results_dispatch() {
        let dir = TempDir::new().unwrap();
        let ca = approach("433");

        let csv_path = out_path(&dir, "out.csv");
        write_results([&ca], &csv_path).unwrap();
        assert!(std::fs::read_to_string(&csv_path).unwrap().starts_with("datetime_utc,"));

        let json_path = out_path(&dir, "out.json");
        write_results([&ca], &json_path).unwrap();
        assert!(std::fs::read_to_string(&json_path).unwrap().trim_start().starts_with('['));
    }
}
