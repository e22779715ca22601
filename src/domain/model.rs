use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::PathBuf;

/// A single cell as delivered by an input source.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Text rendering; whole numbers print without a fractional part.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    /// Lenient integer conversion: anything that is not an integer reads as 0.
    pub fn to_int(&self) -> i64 {
        self.to_text().trim().parse::<i64>().unwrap_or(0)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

/// One booking row of a Ticketleo export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    pub number: i64,
    pub first_name: String,
    pub last_name: String,
    pub price: i64,
    pub seat_count: u32,
    pub seats: String,
}

/// Output of the extract phase.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedExport {
    pub title: String,
    pub reservations: Vec<Reservation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTotals {
    pub booking_count: usize,
    pub total_seats: u64,
    pub generated_at: NaiveDateTime,
}

/// Sorted reservations plus their totals, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub reservations: Vec<Reservation>,
    pub totals: ReportTotals,
}

/// Where a rendered report landed and how large it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedReport {
    pub path: PathBuf,
    pub bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub output_path: PathBuf,
    pub title: String,
    pub booking_count: usize,
    pub total_seats: u64,
    pub bytes_written: usize,
}
