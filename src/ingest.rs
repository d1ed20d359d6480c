//! Reading input tables and writing plans/configs.
//!
//! Inputs are kept as strings; typing happens in [`Dataset::from_table`](crate::Dataset::from_table).
//! CSV may be UTF-8 or CP949 (Korean Excel exports); spreadsheets are read from their first sheet.

use crate::error::{DotPlotError, Result};
use crate::models::{ChartConfig, Table};
use crate::viz::DrawPlan;
use calamine::{Data, Range, Reader, open_workbook_auto};
use csv::ReaderBuilder;
use encoding_rs::EUC_KR;
use serde_json::{Map, Value};
use std::fs::File;
use std::borrow::Cow;
use std::io::{BufReader, Read, Write};
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Load a table, choosing the reader by file extension (`.csv`, `.json`, `.xlsx`/`.xls`).
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();
    let table = match ext.as_str() {
        "csv" => read_csv(BufReader::new(File::open(path)?))?,
        "json" => read_json(BufReader::new(File::open(path)?))?,
        "xlsx" | "xls" => read_spreadsheet(path)?,
        _ => return Err(DotPlotError::UnsupportedFormat(ext)),
    };
    log::info!(
        "loaded {} rows x {} columns from {}",
        table.rows.len(),
        table.columns.len(),
        path.display()
    );
    Ok(table)
}

/// Read a CSV table with a header row. Short rows are padded with empty cells.
///
/// UTF-8 (with or without BOM) is read as is; anything else is decoded as CP949.
pub fn read_csv<R: Read>(mut reader: R) -> Result<Table> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
    let text = match std::str::from_utf8(body) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            let (decoded, had_errors) = EUC_KR.decode_without_bom_handling(body);
            if had_errors {
                return Err(DotPlotError::Encoding);
            }
            log::debug!("input is not UTF-8; decoded as CP949");
            decoded
        }
    };

    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let mut row: Vec<String> = rec.iter().map(str::to_string).collect();
        if row.len() < columns.len() {
            row.resize(columns.len(), String::new());
        }
        rows.push(row);
    }
    Ok(Table::new(columns, rows))
}

/// Read a JSON array of objects. Columns are the union of keys in first-seen order.
pub fn read_json<R: Read>(reader: R) -> Result<Table> {
    let objects: Vec<Map<String, Value>> = serde_json::from_reader(reader)?;

    let mut columns: Vec<String> = Vec::new();
    for obj in &objects {
        for key in obj.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = objects
        .iter()
        .map(|obj| {
            columns
                .iter()
                .map(|c| obj.get(c).map(json_cell).unwrap_or_default())
                .collect()
        })
        .collect();
    Ok(Table::new(columns, rows))
}

/// Read the first worksheet of a spreadsheet; its first row is the header.
pub fn read_spreadsheet<P: AsRef<Path>>(path: P) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DotPlotError::EmptyWorkbook)??;
    Ok(sheet_to_table(&range))
}

fn sheet_to_table(range: &Range<Data>) -> Table {
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(sheet_cell).collect::<Vec<String>>());
    let columns = rows.next().unwrap_or_default();
    let rows = rows
        .map(|mut row| {
            if row.len() < columns.len() {
                row.resize(columns.len(), String::new());
            }
            row
        })
        .collect();
    Table::new(columns, rows)
}

fn sheet_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn json_cell(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Save a draw plan as pretty JSON.
pub fn save_plan_json<P: AsRef<Path>>(plan: &DrawPlan, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(plan)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Load a chart configuration from JSON. Missing keys take their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ChartConfig> {
    let f = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(f))?)
}

/// Save a chart configuration as pretty JSON.
pub fn save_config<P: AsRef<Path>>(config: &ChartConfig, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(config)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn csv_with_bom_and_short_rows() {
        let input = "\u{feff}대학명_전형,등급,결과\nA대_교과,2.1,합\nB대_종합,3.0\n";
        let t = read_csv(input.as_bytes()).unwrap();
        assert_eq!(t.columns, vec!["대학명_전형", "등급", "결과"]);
        assert_eq!(t.rows[1], vec!["B대_종합", "3.0", ""]);
    }

    #[test]
    fn cp949_csv_is_decoded() {
        // "대학명_전형,등급,결과\n가대_교과,2.0,합\n" saved as CP949
        let bytes: &[u8] = b"\xb4\xeb\xc7\xd0\xb8\xed\x5f\xc0\xfc\xc7\xfc\x2c\xb5\xee\xb1\xde\x2c\xb0\xe1\xb0\xfa\x0a\xb0\xa1\xb4\xeb\x5f\xb1\xb3\xb0\xfa\x2c\x32\x2e\x30\x2c\xc7\xd5\x0a";
        let t = read_csv(bytes).unwrap();
        assert_eq!(t.columns, vec!["대학명_전형", "등급", "결과"]);
        assert_eq!(t.rows[0], vec!["가대_교과", "2.0", "합"]);
    }

    #[test]
    fn undecodable_csv_is_an_encoding_error() {
        let bytes: &[u8] = b"\xff\xff,\xfe\n";
        assert!(matches!(read_csv(bytes), Err(DotPlotError::Encoding)));
    }

    #[test]
    fn first_sheet_row_is_the_header() {
        let mut range: Range<Data> = Range::new((0, 0), (2, 2));
        range.set_value((0, 0), Data::String("대학명_전형".into()));
        range.set_value((0, 1), Data::String("등급".into()));
        range.set_value((0, 2), Data::String("결과".into()));
        range.set_value((1, 0), Data::String("가대_교과".into()));
        range.set_value((1, 1), Data::Float(1.75));
        range.set_value((1, 2), Data::String("합".into()));
        range.set_value((2, 0), Data::String("나대_종합".into()));
        range.set_value((2, 1), Data::Int(3));
        let t = sheet_to_table(&range);
        assert_eq!(t.columns, vec!["대학명_전형", "등급", "결과"]);
        assert_eq!(t.rows[0], vec!["가대_교과", "1.75", "합"]);
        assert_eq!(t.rows[1], vec!["나대_종합", "3", ""]);
    }

    #[test]
    fn broken_workbook_is_a_spreadsheet_error() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("data.xlsx");
        std::fs::write(&p, b"not a zip archive").unwrap();
        assert!(matches!(load_table(&p), Err(DotPlotError::Spreadsheet(_))));
    }

    #[test]
    fn json_cells_are_stringified() {
        let input = r#"[{"대학명_전형":"A","등급":2.5,"결과":"합"},{"대학명_전형":"B","등급":null,"비고":"x"}]"#;
        let t = read_json(input.as_bytes()).unwrap();
        assert_eq!(t.columns, vec!["대학명_전형", "등급", "결과", "비고"]);
        assert_eq!(t.rows[0], vec!["A", "2.5", "합", ""]);
        assert_eq!(t.rows[1], vec!["B", "", "", "x"]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("data.txt");
        std::fs::write(&p, b"whatever").unwrap();
        match load_table(&p) {
            Err(DotPlotError::UnsupportedFormat(ext)) => assert_eq!(ext, "txt"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn config_file_round_trip_keeps_values() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("chart.json");
        let cfg = ChartConfig {
            x_max: 6.0,
            ..ChartConfig::default()
        };
        save_config(&cfg, &p).unwrap();
        assert_eq!(load_config(&p).unwrap(), cfg);
    }
}
