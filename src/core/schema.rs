//! Fixed cell layout of a Ticketleo reservation export.
//!
//! | Cell          | Meaning                              |
//! |---------------|--------------------------------------|
//! | (1, 1)        | document title                       |
//! | (3, 1)        | start marker `Reservierungsnr.`      |
//! | (row >= 4, 1) | reservation number, empty ends data  |
//! | (row, 3)      | first name                           |
//! | (row, 4)      | last name                            |
//! | (row, 7)      | price                                |
//! | (row, 8)      | seat count                           |
//! | (row, 9)      | seats text                           |

use crate::domain::model::CellValue;
use crate::domain::ports::CellSource;
use crate::utils::error::{ConvertError, Result};

pub const TITLE_CELL: (u32, u16) = (1, 1);
pub const MARKER_CELL: (u32, u16) = (3, 1);
pub const MARKER_TEXT: &str = "Reservierungsnr.";
pub const FIRST_DATA_ROW: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Number,
    FirstName,
    LastName,
    Price,
    SeatCount,
    Seats,
}

/// Column of each extracted field within a data row.
pub const FIELD_COLUMNS: [(Field, u16); 6] = [
    (Field::Number, 1),
    (Field::FirstName, 3),
    (Field::LastName, 4),
    (Field::Price, 7),
    (Field::SeatCount, 8),
    (Field::Seats, 9),
];

pub fn column(field: Field) -> u16 {
    FIELD_COLUMNS
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, col)| *col)
        .unwrap_or(0)
}

/// Decides where the data block of an export ends.
pub trait SentinelRule {
    fn is_end_of_data(&self, row: u32, identifier: &CellValue) -> bool;
}

/// The first row with an empty reservation number terminates the data.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankIdentifier;

impl SentinelRule for BlankIdentifier {
    fn is_end_of_data(&self, _row: u32, identifier: &CellValue) -> bool {
        identifier.is_empty()
    }
}

pub struct SchemaValidator;

impl SchemaValidator {
    /// Checks title and start marker; returns the document title.
    pub fn validate(source: &dyn CellSource) -> Result<String> {
        let (row, col) = TITLE_CELL;
        let title = source.cell(row, col).to_text();
        if title.is_empty() {
            return Err(ConvertError::MissingTitleError {
                reason: "cell A1 is empty".to_string(),
            });
        }

        let (row, col) = MARKER_CELL;
        let marker = source.cell(row, col).to_text();
        if marker != MARKER_TEXT {
            return Err(ConvertError::MissingMarkerError { found: marker });
        }

        tracing::debug!("Export layout recognised, title: {:?}", title);
        Ok(title)
    }
}
