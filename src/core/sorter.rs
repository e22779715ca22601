use crate::domain::model::Reservation;
use std::cmp::Ordering;

pub struct RecordSorter;

impl RecordSorter {
    /// Last name, then first name (both ordinal), then reservation number.
    pub fn compare(a: &Reservation, b: &Reservation) -> Ordering {
        a.last_name
            .cmp(&b.last_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
            .then_with(|| a.number.cmp(&b.number))
    }

    /// Stable: records with identical keys keep their input order.
    pub fn sort(mut reservations: Vec<Reservation>) -> Vec<Reservation> {
        reservations.sort_by(Self::compare);
        reservations
    }
}
