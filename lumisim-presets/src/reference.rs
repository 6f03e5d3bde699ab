//! Historical reference dataset loading
//!
//! Field survey data arrives in two shapes:
//!
//! ### Spreadsheet export (CSV)
//! `;` delimited, comma decimal separator, one header row:
//! ```text
//! tipo_ambiente;superficie_m2;tecnologia;lumenes_requeridos_lm
//! aula;35,5;LED;21040,7
//! ```
//!
//! ### Converted records (JSON)
//! An array of objects with the same four keys and `.` decimals. English
//! keys (`room_type`, `area_m2`, `technology`, `observed_lumens`) are
//! accepted too, and numbers may also be given as strings.
//!
//! Rows are validated as they are read. A bad row rejects the whole file
//! with its line number: silently dropping survey rows would skew every
//! bootstrap band computed from the rest.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use lumisim_core::{ReferenceDataset, ReferenceRow, RoomType, Technology};
use serde::Deserialize;

use crate::PresetError;

const CSV_DELIMITER: char = ';';
const CSV_COLUMNS: usize = 4;

/// Number as found in exported data
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

/// One JSON record before validation
#[derive(Debug, Clone, Deserialize)]
struct RawRecord {
    #[serde(rename = "tipo_ambiente", alias = "room_type")]
    room_type: String,
    #[serde(rename = "superficie_m2", alias = "area_m2", alias = "area")]
    area: Numeric,
    #[serde(rename = "tecnologia", alias = "technology")]
    technology: String,
    #[serde(rename = "lumenes_requeridos_lm", alias = "observed_lumens")]
    observed_lumens: Numeric,
}

/// Parse a number that may use `,` as the decimal separator
pub fn parse_decimal(text: &str) -> Option<f64> {
    let value: f64 = text.trim().replace(',', ".").parse().ok()?;
    value.is_finite().then_some(value)
}

fn numeric(value: &Numeric, field: &str, line: usize) -> Result<f64, PresetError> {
    let parsed = match value {
        Numeric::Number(n) if n.is_finite() => Some(*n),
        Numeric::Number(_) => None,
        Numeric::Text(text) => parse_decimal(text),
    };
    parsed.ok_or_else(|| PresetError::record(line, format!("{field} is not a number")))
}

/// Validate raw fields into a row
fn build_row(
    line: usize,
    room_type: &str,
    area: f64,
    technology: &str,
    observed_lumens: f64,
) -> Result<ReferenceRow, PresetError> {
    let room_type = RoomType::from_str(room_type)
        .map_err(|e| PresetError::record(line, format!("{e} '{}'", room_type.trim())))?;
    let technology = Technology::from_str(technology)
        .map_err(|e| PresetError::record(line, format!("{e} '{}'", technology.trim())))?;

    if area <= 0.0 {
        return Err(PresetError::record(line, "area must be positive"));
    }
    if observed_lumens < 0.0 {
        return Err(PresetError::record(line, "lumens cannot be negative"));
    }

    Ok(ReferenceRow {
        area,
        room_type,
        technology,
        observed_lumens,
    })
}

/// Parse the converted JSON records
pub fn reference_from_json(json: &str) -> Result<ReferenceDataset, PresetError> {
    let records: Vec<RawRecord> = serde_json::from_str(json)?;

    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let line = index + 1;
            build_row(
                line,
                &record.room_type,
                numeric(&record.area, "area", line)?,
                &record.technology,
                numeric(&record.observed_lumens, "lumens", line)?,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Parsed {} reference records", rows.len());
    Ok(ReferenceDataset::new(rows))
}

/// Parse the `;`-delimited spreadsheet export
///
/// The first non-empty line is the header and is skipped. Blank lines are
/// ignored. Line numbers in errors count from 1 and include the header.
pub fn reference_from_csv(csv: &str) -> Result<ReferenceDataset, PresetError> {
    let mut lines = csv
        .lines()
        .enumerate()
        .map(|(index, text)| (index + 1, text.trim_start_matches('\u{feff}')))
        .filter(|(_, text)| !text.trim().is_empty());

    if lines.next().is_none() {
        return Err(PresetError::Parse("CSV has no header row".into()));
    }

    let mut rows = Vec::new();
    for (line, text) in lines {
        let fields: Vec<&str> = text.split(CSV_DELIMITER).map(str::trim).collect();
        if fields.len() != CSV_COLUMNS {
            return Err(PresetError::record(
                line,
                format!("expected {CSV_COLUMNS} fields, found {}", fields.len()),
            ));
        }

        let area = parse_decimal(fields[1])
            .ok_or_else(|| PresetError::record(line, "area is not a number"))?;
        let lumens = parse_decimal(fields[3])
            .ok_or_else(|| PresetError::record(line, "lumens is not a number"))?;
        rows.push(build_row(line, fields[0], area, fields[2], lumens)?);
    }

    log::debug!("Parsed {} reference rows from CSV", rows.len());
    Ok(ReferenceDataset::new(rows))
}

/// Load a JSON reference file
pub fn load_reference_json(path: impl AsRef<Path>) -> Result<ReferenceDataset, PresetError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| PresetError::io(path, &e))?;
    reference_from_json(&text)
}

/// Load a CSV reference file
pub fn load_reference_csv(path: impl AsRef<Path>) -> Result<ReferenceDataset, PresetError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| PresetError::io(path, &e))?;
    reference_from_csv(&text)
}

/// Load either format, chosen by file extension (`.csv`, otherwise JSON)
pub fn load_reference(path: impl AsRef<Path>) -> Result<ReferenceDataset, PresetError> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        load_reference_csv(path)
    } else {
        load_reference_json(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "tipo_ambiente;superficie_m2;tecnologia;lumenes_requeridos_lm\n\
                       aula;35,5;LED;21040,7\n\
                       \n\
                       oficina;20;fluorescente;24500\n\
                       sala-reuniones;12,25;LED;7300,0\n";

    #[test]
    fn decimal_comma() {
        assert_eq!(parse_decimal("35,5"), Some(35.5));
        assert_eq!(parse_decimal(" 20 "), Some(20.0));
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("inf"), None);
    }

    #[test]
    fn csv_export() {
        let dataset = reference_from_csv(CSV).unwrap();
        assert_eq!(dataset.len(), 3);

        let first = dataset.rows()[0];
        assert_eq!(first.room_type, RoomType::Classroom);
        assert_eq!(first.technology, Technology::Led);
        assert_eq!(first.area, 35.5);
        assert_eq!(first.observed_lumens, 21040.7);

        assert_eq!(dataset.rows()[2].room_type, RoomType::MeetingRoom);
    }

    #[test]
    fn csv_errors_carry_line_numbers() {
        let csv = "h1;h2;h3;h4\naula;10;LED;5000\naula;diez;LED;5000\n";
        match reference_from_csv(csv) {
            Err(PresetError::InvalidRecord { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("area"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let csv = "h1;h2;h3;h4\n\naula;10;halogen;5000\n";
        assert!(matches!(
            reference_from_csv(csv),
            Err(PresetError::InvalidRecord { line: 3, .. })
        ));

        let csv = "h1;h2;h3;h4\naula;10;LED\n";
        assert!(matches!(
            reference_from_csv(csv),
            Err(PresetError::InvalidRecord { line: 2, .. })
        ));
    }

    #[test]
    fn empty_csv_has_no_header() {
        assert!(matches!(reference_from_csv("\n \n"), Err(PresetError::Parse(_))));
    }

    #[test]
    fn header_only_csv_is_empty() {
        let dataset = reference_from_csv("tipo_ambiente;superficie_m2;tecnologia;lumenes\n").unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn converter_output() {
        let json = r#"[
            { "tipo_ambiente": "aula", "superficie_m2": 35.5,
              "tecnologia": "LED", "lumenes_requeridos_lm": 21041 },
            { "tipo_ambiente": "Oficina", "superficie_m2": "20,5",
              "tecnologia": "Fluorescente", "lumenes_requeridos_lm": 24500 }
        ]"#;
        let dataset = reference_from_json(json).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[1].room_type, RoomType::Office);
        assert_eq!(dataset.rows()[1].area, 20.5);
        assert_eq!(dataset.rows()[1].technology, Technology::Fluorescent);
    }

    #[test]
    fn english_keys() {
        let json = r#"[{ "room_type": "meeting-room", "area_m2": 14,
                         "technology": "led", "observed_lumens": 8200 }]"#;
        let dataset = reference_from_json(json).unwrap();
        assert_eq!(dataset.rows()[0].room_type, RoomType::MeetingRoom);
    }

    #[test]
    fn json_rejects_non_positive_area() {
        let json = r#"[
            { "room_type": "office", "area_m2": 10, "technology": "led", "observed_lumens": 1 },
            { "room_type": "office", "area_m2": 0, "technology": "led", "observed_lumens": 1 }
        ]"#;
        assert!(matches!(
            reference_from_json(json),
            Err(PresetError::InvalidRecord { line: 2, .. })
        ));
    }
}
