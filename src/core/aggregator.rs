use crate::domain::model::{Reservation, ReportTotals};
use chrono::NaiveDateTime;

pub const TIMESTAMP_FORMAT: &str = "%-d.%-m.%Y %H:%M";

pub struct ReportAggregator;

impl ReportAggregator {
    pub fn aggregate(reservations: &[Reservation], generated_at: NaiveDateTime) -> ReportTotals {
        ReportTotals {
            booking_count: reservations.len(),
            total_seats: reservations.iter().map(|r| u64::from(r.seat_count)).sum(),
            generated_at,
        }
    }
}

pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

impl ReportTotals {
    pub fn summary_line(&self) -> String {
        format!(
            "Buchungen: {}, Reservierte Plätze: {} --- {}",
            self.booking_count,
            self.total_seats,
            format_timestamp(&self.generated_at)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn reservation(seat_count: u32) -> Reservation {
        Reservation {
            number: 1,
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            price: 15,
            seat_count,
            seats: String::new(),
        }
    }

    #[test]
    fn test_totals() {
        let records = vec![reservation(2), reservation(1), reservation(0), reservation(4)];
        let totals = ReportAggregator::aggregate(&records, at(2025, 1, 4, 9, 5));

        assert_eq!(totals.booking_count, 4);
        assert_eq!(totals.total_seats, 7);
    }

    #[test]
    fn test_empty_input_has_zero_totals() {
        let totals = ReportAggregator::aggregate(&[], at(2025, 1, 4, 9, 5));
        assert_eq!(totals.booking_count, 0);
        assert_eq!(totals.total_seats, 0);
    }

    #[test]
    fn test_timestamp_format() {
        assert_eq!(format_timestamp(&at(2025, 1, 4, 9, 5)), "4.1.2025 09:05");
        assert_eq!(format_timestamp(&at(2024, 12, 31, 23, 59)), "31.12.2024 23:59");
    }

    #[test]
    fn test_summary_line() {
        let totals = ReportAggregator::aggregate(
            &[reservation(2), reservation(1)],
            at(2025, 1, 4, 9, 5),
        );
        assert_eq!(
            totals.summary_line(),
            "Buchungen: 2, Reservierte Plätze: 3 --- 4.1.2025 09:05"
        );
    }
}
