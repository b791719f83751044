use chrono::NaiveDate;

use super::types::WEEKLY_QUOTA;
use crate::model::{week_bounds, Client, Ledger};

/// Vrai si le client peut encore réserver dans la semaine ISO de `date`
/// (strictement moins de [`WEEKLY_QUOTA`] réservations sur lundi..dimanche).
pub(super) fn within_quota(ledger: &Ledger, client: &Client, date: NaiveDate) -> bool {
    let (week_start, week_end) = week_bounds(date);
    let count = client
        .reservations
        .iter()
        .filter_map(|id| ledger.find_reservation(id))
        .filter(|r| week_start <= r.date && r.date <= week_end)
        .count();
    count < WEEKLY_QUOTA
}
