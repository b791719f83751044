use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::Ledger;

/// Vrai si aucune réservation de `date` ne couvre `time`.
pub(super) fn is_vacant(ledger: &Ledger, date: NaiveDate, time: NaiveTime) -> bool {
    !ledger.reservations_on(date).any(|r| r.covers(time))
}

/// Écart jusqu'au prochain départ de réservation strictement postérieur
/// à `(date, time)` et à moins de 90 minutes (comparaison en instants,
/// une réservation du lendemain matin compte). Sans candidat : exactement
/// 90 minutes, « entièrement libre ».
pub(super) fn gap_to_next_start(ledger: &Ledger, date: NaiveDate, time: NaiveTime) -> Duration {
    let from = NaiveDateTime::new(date, time);
    ledger
        .reservations
        .iter()
        .filter_map(|r| {
            let start = NaiveDateTime::new(r.date, r.start);
            let gap = start - from;
            (gap > Duration::zero() && gap < Duration::minutes(90)).then_some(gap)
        })
        .min()
        .unwrap_or_else(|| Duration::minutes(90))
}

/// Prochain créneau libre après un `(date, time)` occupé : la fin de la
/// chaîne de réservations couvrantes, retenue seulement si au moins
/// 30 minutes la séparent du départ suivant.
pub(super) fn next_available(
    ledger: &Ledger,
    date: NaiveDate,
    time: NaiveTime,
) -> Option<NaiveTime> {
    let mut candidate = ledger.reservations_on(date).find(|r| r.covers(time))?.end;
    // Une réservation dos à dos couvre exactement la fin de la
    // précédente : on saute jusqu'à un candidat réellement libre.
    // Chaque saut avance strictement, la boucle termine.
    while let Some(next) = ledger.reservations_on(date).find(|r| r.covers(candidate)) {
        candidate = next.end;
    }
    (gap_to_next_start(ledger, date, candidate) >= Duration::minutes(30)).then_some(candidate)
}
