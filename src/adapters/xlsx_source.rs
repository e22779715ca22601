use crate::domain::model::CellValue;
use crate::domain::ports::CellSource;
use crate::utils::error::{ConvertError, Result};
use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};
use std::io::Cursor;

/// First worksheet of an xlsx workbook, loaded fully into memory.
pub struct XlsxSource {
    range: Range<Data>,
}

impl XlsxSource {
    /// Opens a workbook from raw bytes.
    ///
    /// A buffer that is not a readable xlsx workbook has no readable title,
    /// so it is reported as [`ConvertError::MissingTitleError`].
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).map_err(|e| {
            ConvertError::MissingTitleError {
                reason: format!("not an xlsx workbook: {}", e),
            }
        })?;

        let range = match workbook.worksheet_range_at(0) {
            Some(Ok(range)) => range,
            Some(Err(e)) => {
                return Err(ConvertError::MissingTitleError {
                    reason: format!("first worksheet unreadable: {}", e),
                })
            }
            None => {
                return Err(ConvertError::MissingTitleError {
                    reason: "workbook contains no worksheet".to_string(),
                })
            }
        };

        tracing::debug!(
            "Loaded worksheet with {} rows x {} columns",
            range.height(),
            range.width()
        );

        Ok(Self { range })
    }
}

impl CellSource for XlsxSource {
    fn cell(&self, row: u32, col: u16) -> CellValue {
        if row == 0 || col == 0 {
            return CellValue::Empty;
        }

        match self.range.get_value((row - 1, u32::from(col) - 1)) {
            None | Some(Data::Empty) => CellValue::Empty,
            Some(Data::String(s)) => CellValue::Text(s.clone()),
            Some(Data::Float(n)) => CellValue::Number(*n),
            Some(Data::Int(n)) => CellValue::Number(*n as f64),
            Some(Data::Bool(b)) => CellValue::Bool(*b),
            Some(Data::DateTime(dt)) => CellValue::Number(dt.as_f64()),
            Some(Data::DateTimeIso(s)) | Some(Data::DurationIso(s)) => CellValue::Text(s.clone()),
            Some(Data::Error(e)) => CellValue::Text(e.to_string()),
        }
    }
}
