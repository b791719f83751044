use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::types::MIN_LEAD_SECONDS;

/// Vrai si l'instant `(date, time)` est strictement dans le futur.
pub(super) fn is_future(date: NaiveDate, time: NaiveTime, now: NaiveDateTime) -> bool {
    NaiveDateTime::new(date, time) > now
}

/// Vrai s'il reste au moins une heure avant `(date, time)`.
/// Règle commune à la réservation et à l'annulation.
pub(super) fn has_lead(date: NaiveDate, time: NaiveTime, now: NaiveDateTime) -> bool {
    (NaiveDateTime::new(date, time) - now).num_seconds() >= MIN_LEAD_SECONDS
}
