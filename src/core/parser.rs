use crate::core::schema::{column, BlankIdentifier, Field, SentinelRule, FIRST_DATA_ROW};
use crate::domain::model::Reservation;
use crate::domain::ports::CellSource;
use regex::Regex;
use std::sync::LazyLock;

/// Booking-system annotation appended to every seat in the seats column.
pub const SEAT_TAG: &str = "(Plätze, Sitzplatz)";

// A comma right after the tag separates line-broken seat entries and goes with it.
static SEAT_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t]*\(Plätze, Sitzplatz\)(?:,(\r?\n))?").expect("seat tag pattern is valid")
});

pub fn strip_seat_tags(seats: &str) -> String {
    SEAT_TAG_RE.replace_all(seats, "${1}").into_owned()
}

pub struct RecordParser<R: SentinelRule = BlankIdentifier> {
    sentinel: R,
}

impl RecordParser {
    pub fn new() -> Self {
        Self {
            sentinel: BlankIdentifier,
        }
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: SentinelRule> RecordParser<R> {
    pub fn with_sentinel(sentinel: R) -> Self {
        Self { sentinel }
    }

    /// Reads reservations from [`FIRST_DATA_ROW`] until the sentinel row, in row order.
    pub fn parse(&self, source: &dyn CellSource) -> Vec<Reservation> {
        let mut reservations = Vec::new();
        let mut row = FIRST_DATA_ROW;

        loop {
            let identifier = source.cell(row, column(Field::Number));
            if self.sentinel.is_end_of_data(row, &identifier) {
                tracing::debug!("End of data at row {}", row);
                break;
            }

            let raw_seat_count = source.cell(row, column(Field::SeatCount)).to_int();
            let seat_count = u32::try_from(raw_seat_count).unwrap_or_else(|_| {
                tracing::warn!(
                    "Row {}: seat count {} out of range, using 0",
                    row,
                    raw_seat_count
                );
                0
            });

            reservations.push(Reservation {
                number: identifier.to_int(),
                first_name: source.cell(row, column(Field::FirstName)).to_text(),
                last_name: source.cell(row, column(Field::LastName)).to_text(),
                price: source.cell(row, column(Field::Price)).to_int(),
                seat_count,
                seats: strip_seat_tags(&source.cell(row, column(Field::Seats)).to_text()),
            });

            row += 1;
        }

        tracing::debug!("Parsed {} reservations", reservations.len());
        reservations
    }
}
