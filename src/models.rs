use crate::error::{DotPlotError, Result};
use serde::{Deserialize, Serialize};

/// Column holding the admission track (university + admission channel).
pub const TRACK_COLUMN: &str = "대학명_전형";
/// Column holding the numeric grade.
pub const GRADE_COLUMN: &str = "등급";
/// Column holding the outcome label (합 / 추합 / 불 / anything else).
pub const OUTCOME_COLUMN: &str = "결과";

/// The three columns every input table must carry, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 3] = [TRACK_COLUMN, GRADE_COLUMN, OUTCOME_COLUMN];

/// Raw tabular input as handed over by an ingestion shell: named columns and
/// string cells, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Index of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Required columns that are not present, in canonical order.
    pub fn missing_columns(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|c| self.column_index(c).is_none())
            .map(|c| c.to_string())
            .collect()
    }
}

/// One applicant result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub track: String,
    /// `None` when the source cell was empty; such rows still define a category.
    pub grade: Option<f64>,
    pub outcome: String,
}

impl Record {
    pub fn new(track: impl Into<String>, grade: f64, outcome: impl Into<String>) -> Self {
        Self {
            track: track.into(),
            grade: Some(grade),
            outcome: outcome.into(),
        }
    }
}

/// Records in load order. Load order is significant: it drives category order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Validate the required columns and type the grade column.
    ///
    /// Fails with [`DotPlotError::MissingColumns`] before looking at any row, so a
    /// table without the three fields never yields a partial dataset.
    pub fn from_table(table: &Table) -> Result<Self> {
        let missing = table.missing_columns();
        if !missing.is_empty() {
            return Err(DotPlotError::MissingColumns { missing });
        }
        let index_of = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| DotPlotError::MissingColumns {
                    missing: vec![name.to_string()],
                })
        };
        let (ti, gi, oi) = (
            index_of(TRACK_COLUMN)?,
            index_of(GRADE_COLUMN)?,
            index_of(OUTCOME_COLUMN)?,
        );

        let cell = |row: &[String], idx: usize| row.get(idx).cloned().unwrap_or_default();

        let mut records = Vec::with_capacity(table.rows.len());
        for (i, row) in table.rows.iter().enumerate() {
            let raw_grade = cell(row, gi);
            let trimmed = raw_grade.trim();
            let grade = if trimmed.is_empty() {
                None
            } else {
                match trimmed.parse::<f64>() {
                    Ok(v) if v.is_finite() => Some(v),
                    Ok(_) => None,
                    Err(_) => {
                        return Err(DotPlotError::InvalidGrade {
                            row: i + 1,
                            value: raw_grade,
                        });
                    }
                }
            };
            records.push(Record {
                track: cell(row, ti),
                grade,
                outcome: cell(row, oi),
            });
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Where the legend box sits inside the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPosition {
    #[default]
    UpperRight,
    LowerRight,
}

impl LegendPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegendPosition::UpperRight => "upper-right",
            LegendPosition::LowerRight => "lower-right",
        }
    }
}

impl std::str::FromStr for LegendPosition {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '_'], "-").as_str() {
            "upper-right" => Ok(LegendPosition::UpperRight),
            "lower-right" => Ok(LegendPosition::LowerRight),
            other => Err(format!(
                "unknown legend position {other:?} (expected upper-right or lower-right)"
            )),
        }
    }
}

/// Lower bound of the x axis; fixed.
pub const X_MIN: f64 = 0.9;
/// Bounds for `ChartConfig::x_max`.
pub const X_MAX_RANGE: (f64, f64) = (2.0, 9.0);

/// Slider bounds used by the interactive shells.
pub mod bounds {
    pub const WIDTH: (f64, f64) = (4.0, 32.0);
    pub const HEIGHT: (f64, f64) = (4.0, 20.0);
    pub const X_MAX_STEP: f64 = 0.5;
    pub const LINE_WIDTH: (f64, f64) = (0.5, 10.0);
    pub const MARKER_SIZE: (f64, f64) = (10.0, 200.0);
}

/// User-controlled chart appearance. Width and height are inches, `line_width`
/// is points and `marker_size` is a marker area in points².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub x_max: f64,
    pub legend_position: LegendPosition,
    pub line_width: f64,
    pub marker_size: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "지원자/합격자/불합격자 분포".to_string(),
            width: 16.0,
            height: 9.0,
            x_max: 4.5,
            legend_position: LegendPosition::UpperRight,
            line_width: 2.0,
            marker_size: 50.0,
        }
    }
}

impl ChartConfig {
    /// Copy with every numeric field forced into its documented range.
    /// Non-finite values fall back to the defaults.
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        let fix = |v: f64, fallback: f64, lo: f64, hi: f64| {
            if v.is_finite() { v.clamp(lo, hi) } else { fallback }
        };
        let out = Self {
            title: self.title.clone(),
            width: fix(self.width, d.width, 1.0, 64.0),
            height: fix(self.height, d.height, 1.0, 64.0),
            x_max: fix(self.x_max, d.x_max, X_MAX_RANGE.0, X_MAX_RANGE.1),
            legend_position: self.legend_position,
            line_width: fix(self.line_width, d.line_width, 0.1, 20.0),
            marker_size: fix(self.marker_size, d.marker_size, 1.0, 1000.0),
        };
        if out != *self {
            log::warn!("chart configuration out of range, clamped: {self:?} -> {out:?}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn from_table_keeps_order_and_types_grades() {
        let t = table(
            &["결과", "대학명_전형", "등급"],
            &[&["합", "A대_교과", "1.5"], &["불", "B대_종합", " 2.25 "], &["추합", "A대_교과", ""]],
        );
        let ds = Dataset::from_table(&t).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records()[0], Record::new("A대_교과", 1.5, "합"));
        assert_eq!(ds.records()[1].grade, Some(2.25));
        assert_eq!(ds.records()[2].grade, None);
        assert_eq!(ds.records()[2].outcome, "추합");
    }

    #[test]
    fn from_table_names_every_missing_column() {
        let t = table(&["결과"], &[]);
        match Dataset::from_table(&t) {
            Err(DotPlotError::MissingColumns { missing }) => {
                assert_eq!(missing, vec!["대학명_전형".to_string(), "등급".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn from_table_rejects_text_grade() {
        let t = table(&["대학명_전형", "등급", "결과"], &[&["A", "1.0", "합"], &["A", "x", "합"]]);
        match Dataset::from_table(&t) {
            Err(DotPlotError::InvalidGrade { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "x");
            }
            other => panic!("expected InvalidGrade, got {other:?}"),
        }
    }

    #[test]
    fn legend_position_parses_loose_spellings() {
        assert_eq!("upper right".parse(), Ok(LegendPosition::UpperRight));
        assert_eq!("Lower_Right".parse(), Ok(LegendPosition::LowerRight));
        assert!("center".parse::<LegendPosition>().is_err());
        for pos in [LegendPosition::UpperRight, LegendPosition::LowerRight] {
            assert_eq!(pos.as_str().parse(), Ok(pos));
        }
    }

    #[test]
    fn clamped_pulls_values_into_range() {
        let cfg = ChartConfig {
            x_max: 1.0,
            width: f64::NAN,
            marker_size: -5.0,
            ..ChartConfig::default()
        };
        let c = cfg.clamped();
        assert_eq!(c.x_max, 2.0);
        assert_eq!(c.width, 16.0);
        assert_eq!(c.marker_size, 1.0);
        assert_eq!(ChartConfig::default().clamped(), ChartConfig::default());
    }

    #[test]
    fn config_json_uses_kebab_case_legend() {
        let json = serde_json::to_string(&ChartConfig::default()).unwrap();
        assert!(json.contains("\"upper-right\""));
        let back: ChartConfig = serde_json::from_str(r#"{"x_max": 6.0}"#).unwrap();
        assert_eq!(back.x_max, 6.0);
        assert_eq!(back.title, ChartConfig::default().title);
    }
}
