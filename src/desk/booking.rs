use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{availability, quota, window, BookingError, BookingPrompt, Desk, DurationMenu};
use crate::model::{ClientId, Ledger, Reservation, ReservationId};

pub(super) fn book(
    desk: &mut Desk,
    client: &ClientId,
    date: NaiveDate,
    time: NaiveTime,
    now: NaiveDateTime,
    prompt: &mut dyn BookingPrompt,
) -> Result<ReservationId, BookingError> {
    let Some(holder) = desk.ledger.find_client_by_id(client) else {
        return Err(BookingError::UnknownClient(client.as_str().to_string()));
    };

    if !quota::within_quota(&desk.ledger, holder, date) {
        return Err(BookingError::QuotaExceeded);
    }
    if !window::is_future(date, time, now) {
        return Err(BookingError::PastTime);
    }
    if !window::has_lead(date, time, now) {
        return Err(BookingError::InsufficientLead);
    }

    let slot_start = match claim(&desk.ledger, date, time) {
        Ok(()) => time,
        // Seul cas récupérable : proposer la fin de la chaîne occupée.
        Err(BookingError::SlotOccupied) => {
            let Some(alternative) = availability::next_available(&desk.ledger, date, time) else {
                return Err(BookingError::NoAlternativeWithinWindow);
            };
            if !prompt.accept_alternative(date, alternative) {
                return Err(BookingError::BookingCancelledByUser);
            }
            alternative
        }
        Err(other) => return Err(other),
    };

    create(desk, client, date, slot_start, prompt)
}

/// Réclame `(date, time)` : un horaire couvert est signalé par
/// [`BookingError::SlotOccupied`].
fn claim(ledger: &Ledger, date: NaiveDate, time: NaiveTime) -> Result<(), BookingError> {
    if availability::is_vacant(ledger, date, time) {
        Ok(())
    } else {
        Err(BookingError::SlotOccupied)
    }
}

/// Sélection de durée puis écriture : une seule insertion, dans le ledger
/// et dans la liste du client, ou rien.
fn create(
    desk: &mut Desk,
    client: &ClientId,
    date: NaiveDate,
    start: NaiveTime,
    prompt: &mut dyn BookingPrompt,
) -> Result<ReservationId, BookingError> {
    let gap = availability::gap_to_next_start(&desk.ledger, date, start);
    let menu = DurationMenu::at(gap, start);
    if menu.is_empty() {
        return Err(BookingError::CrossesMidnight);
    }

    let choice = prompt.choose_duration(menu);
    let Some(minutes) = choice.minutes() else {
        return Err(BookingError::BookingCancelledByUser);
    };
    if !menu.offers(choice) {
        return Err(BookingError::DurationUnavailable);
    }

    let end = start
        .overflowing_add_signed(chrono::Duration::minutes(minutes))
        .0;
    let reservation = Reservation::new(client.clone(), date, start, end)
        .map_err(|_| BookingError::InvalidTimeRange)?;
    let id = reservation.id.clone();

    // La liste du client d'abord : aucune écriture ne doit rester seule.
    let holder = desk
        .ledger
        .find_client_mut_by_id(client)
        .ok_or_else(|| BookingError::UnknownClient(client.as_str().to_string()))?;
    holder.reservations.push(id.clone());
    desk.ledger.reservations.push(reservation);

    Ok(id)
}

pub(super) fn cancel(
    desk: &mut Desk,
    client: &ClientId,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Result<ReservationId, BookingError> {
    let Some(holder) = desk.ledger.find_client_by_id(client) else {
        return Err(BookingError::UnknownClient(client.as_str().to_string()));
    };

    let Some(target) = holder
        .reservations
        .iter()
        .filter_map(|id| desk.ledger.find_reservation(id))
        .find(|r| r.date == date)
    else {
        return Err(BookingError::NoSuchReservation);
    };

    if !window::has_lead(target.date, target.start, now) {
        return Err(BookingError::CancellationTooLate);
    }

    // Retire les deux vues d'un seul tenant.
    let id = target.id.clone();
    desk.ledger.reservations.retain(|r| r.id != id);
    if let Some(holder) = desk.ledger.find_client_mut_by_id(client) {
        holder.reservations.retain(|rid| rid != &id);
    }
    Ok(id)
}
