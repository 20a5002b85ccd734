use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use arrow::array::Array;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Source schema
// ---------------------------------------------------------------------------

pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER: &str = "Booster Version Category";
pub const COL_FLIGHT: &str = "Flight Number";

/// Columns every source must provide. Other columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = [COL_SITE, COL_PAYLOAD, COL_CLASS, COL_BOOSTER, COL_FLIGHT];

/// Errors raised while turning a source file into a [`LaunchDataset`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("{0}")]
    Malformed(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the [`REQUIRED_COLUMNS`]
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 500.0, ... }, ...]`
/// * `.parquet` – one column per field, any scalar type
pub fn load_file(path: &Path) -> Result<LaunchDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let open = || {
        File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    let dataset = match ext.as_str() {
        "csv" => read_csv(open()?)?,
        "json" => read_json(open()?)?,
        "parquet" | "pq" => read_parquet(open()?)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} launches from {} ({} rows dropped), sites {:?}",
        dataset.len(),
        path.display(),
        dataset.dropped_rows,
        dataset.sites
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row cleaning (shared by every format)
// ---------------------------------------------------------------------------

/// One source row with every required cell still as text.
#[derive(Debug, Default, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Launch Site", default)]
    site: Option<String>,
    #[serde(rename = "Payload Mass (kg)", default)]
    payload: Option<String>,
    #[serde(rename = "class", default)]
    class: Option<String>,
    #[serde(rename = "Booster Version Category", default)]
    booster: Option<String>,
    #[serde(rename = "Flight Number", default)]
    flight: Option<String>,
}

/// Numeric coercion: unparsable, empty and non-finite cells are missing.
fn parse_number(cell: Option<&str>) -> Option<f64> {
    cell?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Why a source row did not make it into the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RejectReason {
    MissingPayload,
    MissingClass,
    InvalidClass(String),
}

/// A dropped row. `row` is 1-based, counting data rows after any header.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RowRejection {
    row: usize,
    reason: RejectReason,
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            RejectReason::MissingPayload => write!(f, "Row {}: payload mass missing", self.row),
            RejectReason::MissingClass => write!(f, "Row {}: class missing", self.row),
            RejectReason::InvalidClass(text) => {
                write!(f, "Row {}: class '{text}' is not 0 or 1", self.row)
            }
        }
    }
}

/// Turn a raw row into a record, or say why it is dropped.
fn clean_row(row: RawLaunchRow, row_no: usize) -> Result<LaunchRecord, RowRejection> {
    let reject = |reason| RowRejection { row: row_no, reason };

    let payload_mass_kg =
        parse_number(row.payload.as_deref()).ok_or_else(|| reject(RejectReason::MissingPayload))?;

    let class_text = row
        .class
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| reject(RejectReason::MissingClass))?;
    let outcome = parse_number(Some(class_text))
        .and_then(Outcome::from_class)
        .ok_or_else(|| reject(RejectReason::InvalidClass(class_text.to_string())))?;

    Ok(LaunchRecord {
        site: row.site.unwrap_or_default(),
        payload_mass_kg,
        outcome,
        booster_category: row.booster.unwrap_or_default(),
        flight_number: row.flight.unwrap_or_default(),
    })
}

/// Split rows into kept records and rejections, numbering rows from 1.
fn partition_rows(rows: Vec<RawLaunchRow>) -> (Vec<LaunchRecord>, Vec<RowRejection>) {
    let mut records = Vec::with_capacity(rows.len());
    let mut rejected = Vec::new();
    for (i, row) in rows.into_iter().enumerate() {
        match clean_row(row, i + 1) {
            Ok(rec) => records.push(rec),
            Err(rejection) => rejected.push(rejection),
        }
    }
    (records, rejected)
}

fn clean_rows(rows: Vec<RawLaunchRow>) -> LaunchDataset {
    let total = rows.len();
    let (records, rejected) = partition_rows(rows);
    for rejection in &rejected {
        match rejection.reason {
            RejectReason::InvalidClass(_) => log::warn!("{rejection}, dropping row"),
            _ => log::trace!("{rejection}, dropping row"),
        }
    }
    if !rejected.is_empty() {
        log::debug!(
            "Dropped {} of {total} rows with missing payload or class",
            rejected.len()
        );
    }
    LaunchDataset::from_records(records, rejected.len())
}

fn require_columns(present: impl Fn(&str) -> bool) -> Result<(), LoadError> {
    match REQUIRED_COLUMNS.iter().find(|col| !present(col)) {
        Some(missing) => Err(LoadError::MissingColumn(*missing)),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a CSV launch table from any reader.
pub fn read_csv<R: Read>(source: R) -> Result<LaunchDataset, LoadError> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers()?.clone();
    require_columns(|col| headers.iter().any(|h| h == col))?;

    let rows = reader
        .deserialize::<RawLaunchRow>()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(clean_rows(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 500.0, "class": 1,
///     "Booster Version Category": "v1.0", "Flight Number": 3 },
///   ...
/// ]
/// ```
pub fn read_json<R: Read>(source: R) -> Result<LaunchDataset, LoadError> {
    let root: JsonValue = serde_json::from_reader(source)?;
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected top-level JSON array".into()))?;

    let mut columns: BTreeSet<&str> = BTreeSet::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;
        columns.extend(obj.keys().map(String::as_str));

        let cell = |col: &str| obj.get(col).and_then(json_cell_text);
        rows.push(RawLaunchRow {
            site: cell(COL_SITE),
            payload: cell(COL_PAYLOAD),
            class: cell(COL_CLASS),
            booster: cell(COL_BOOSTER),
            flight: cell(COL_FLIGHT),
        });
    }
    require_columns(|col| columns.contains(col))?;

    Ok(clean_rows(rows))
}

fn json_cell_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet launch table. Column types are free; every cell is
/// rendered to text and goes through the same cleaning as CSV.
pub fn read_parquet(file: File) -> Result<LaunchDataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    require_columns(|col| schema.index_of(col).is_ok())?;

    let reader = builder.build()?;
    let options = FormatOptions::default();
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let column = |name: &str| -> Result<_, LoadError> {
            let idx = batch.schema().index_of(name)?;
            Ok(batch.column(idx).clone())
        };
        let cols = [
            column(COL_SITE)?,
            column(COL_PAYLOAD)?,
            column(COL_CLASS)?,
            column(COL_BOOSTER)?,
            column(COL_FLIGHT)?,
        ];
        let formatters = cols
            .iter()
            .map(|c| ArrayFormatter::try_new(c.as_ref(), &options))
            .collect::<Result<Vec<_>, _>>()?;

        for row in 0..batch.num_rows() {
            let cell = |i: usize| -> Option<String> {
                if cols[i].is_null(row) {
                    None
                } else {
                    Some(formatters[i].value(row).to_string())
                }
            };
            rows.push(RawLaunchRow {
                site: cell(0),
                payload: cell(1),
                class: cell(2),
                booster: cell(3),
                flight: cell(4),
            });
        }
    }

    Ok(clean_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_CSV: &str = "\
Flight Number,Launch Site,Mission Outcome,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,Success,0,0,F9 v1.0  B0003,v1.0
2,CCAFS LC-40,Success,0,,F9 v1.0  B0004,v1.0
3,CCAFS LC-40,Success,0,525,F9 v1.0  B0005,v1.0
4,VAFB SLC-4E,Success,1,unknown,F9 v1.1  B1003,v1.1
5,KSC LC-39A,Success,1,2490,F9 FT B1031.1,FT
6,KSC LC-39A,Success,,5300,F9 FT B1032.1,FT
7,VAFB SLC-4E,Success (drone ship),1,9600,F9 FT B1029.1,FT
";

    #[test]
    fn test_csv_drops_rows_missing_payload_or_class() {
        let ds = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        let flights: Vec<&str> = ds.records.iter().map(|r| r.flight_number.as_str()).collect();
        assert_eq!(flights, vec!["1", "3", "5", "7"]);
        assert_eq!(ds.dropped_rows, 3);
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E"]);
        assert_eq!(ds.payload_bounds, Some((0.0, 9600.0)));

        let last = &ds.records[3];
        assert_eq!(last.site, "VAFB SLC-4E");
        assert_eq!(last.payload_mass_kg, 9600.0);
        assert_eq!(last.outcome, Outcome::Success);
        assert_eq!(last.booster_category, "FT");
    }

    #[test]
    fn test_csv_invalid_class_is_dropped() {
        let csv = "\
Launch Site,Payload Mass (kg),class,Booster Version Category,Flight Number
A,100,1.0,FT,1
A,200,2,FT,2
A,300,yes,FT,3
A,400,0.0,FT,4
A,nan,1,FT,5
";
        let ds = read_csv(csv.as_bytes()).unwrap();
        let payloads: Vec<f64> = ds.records.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(payloads, vec![100.0, 400.0]);
        assert_eq!(ds.records[1].outcome, Outcome::Failure);
        assert_eq!(ds.dropped_rows, 3);
    }

    #[test]
    fn test_rejected_rows_are_numbered_from_one() {
        let row = |payload: Option<&str>, class: Option<&str>| RawLaunchRow {
            site: Some("A".to_string()),
            payload: payload.map(str::to_string),
            class: class.map(str::to_string),
            booster: Some("FT".to_string()),
            flight: None,
        };
        let (records, rejected) = partition_rows(vec![
            row(Some("yes"), Some("1")),
            row(Some("100"), Some("1")),
            row(Some("200"), None),
            row(Some("300"), Some("7")),
        ]);

        assert_eq!(records.len(), 1);
        let rows: Vec<usize> = rejected.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![1, 3, 4]);
        assert_eq!(rejected[0].reason, RejectReason::MissingPayload);
        assert_eq!(rejected[1].reason, RejectReason::MissingClass);
        assert_eq!(rejected[2].to_string(), "Row 4: class '7' is not 0 or 1");
    }

    #[test]
    fn test_csv_missing_column() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,Flight Number\nA,1,FT,1\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(COL_CLASS)));
        assert_eq!(err.to_string(), "missing required column 'class'");
    }

    #[test]
    fn test_json_records() {
        let json = r#"[
            {"Launch Site": "A", "Payload Mass (kg)": 500.0, "class": 1,
             "Booster Version Category": "FT", "Flight Number": 1},
            {"Launch Site": "A", "Payload Mass (kg)": null, "class": 0,
             "Booster Version Category": "FT", "Flight Number": 2},
            {"Launch Site": "B", "Payload Mass (kg)": "1500", "class": 0,
             "Booster Version Category": "B4", "Flight Number": 3}
        ]"#;
        let ds = read_json(json.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.dropped_rows, 1);
        assert_eq!(ds.records[1].payload_mass_kg, 1500.0);
        assert_eq!(ds.records[1].flight_number, "3");
    }

    #[test]
    fn test_json_not_an_array() {
        let err = read_json(r#"{"Launch Site": "A"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn test_json_empty_array_has_no_columns() {
        let err = read_json("[]".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(COL_SITE)));
    }

    #[test]
    fn test_load_file_dispatch() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("launches.CSV");
        std::fs::File::create(&csv_path)
            .unwrap()
            .write_all(SAMPLE_CSV.as_bytes())
            .unwrap();
        assert_eq!(load_file(&csv_path).unwrap().len(), 4);

        let txt_path = dir.path().join("launches.txt");
        std::fs::write(&txt_path, SAMPLE_CSV).unwrap();
        assert!(matches!(
            load_file(&txt_path),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "txt"
        ));

        let missing = dir.path().join("nope.csv");
        assert!(matches!(load_file(&missing), Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_parquet_round_trip_through_cleaning() {
        use std::sync::Arc;

        use arrow::array::{Float64Array, Int64Array, StringArray};
        use arrow::datatypes::{DataType, Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_FLIGHT, DataType::Int64, false),
            Field::new(COL_SITE, DataType::Utf8, false),
            Field::new(COL_CLASS, DataType::Int64, true),
            Field::new(COL_PAYLOAD, DataType::Float64, true),
            Field::new(COL_BOOSTER, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![1, 2, 3])),
                Arc::new(StringArray::from(vec!["A", "A", "B"])),
                Arc::new(Int64Array::from(vec![Some(1), None, Some(0)])),
                Arc::new(Float64Array::from(vec![Some(500.0), Some(2000.0), None])),
                Arc::new(StringArray::from(vec!["FT", "FT", "B4"])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launches.parquet");
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.dropped_rows, 2);
        assert_eq!(ds.records[0].site, "A");
        assert_eq!(ds.records[0].payload_mass_kg, 500.0);
        assert_eq!(ds.records[0].outcome, Outcome::Success);
        assert_eq!(ds.records[0].flight_number, "1");
    }
}
