mod availability;
mod booking;
mod quota;
mod types;
mod window;

pub use types::{
    BookingError, BookingPrompt, DurationChoice, DurationMenu, MIN_LEAD_SECONDS, WEEKLY_QUOTA,
};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::{ClientId, Ledger, ReservationId};

/// Guichet de réservation : encapsule le [`Ledger`] et séquence les
/// contrôles (quota, passé, délai, vacance) avant toute écriture.
#[derive(Debug, Default)]
pub struct Desk {
    ledger: Ledger,
}

impl Desk {
    pub fn new() -> Self {
        Self {
            ledger: Ledger::default(),
        }
    }

    /// Reprend un ledger existant (chargé depuis le stockage).
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Retrouve un client par nom normalisé, ou le crée à la première
    /// rencontre. Les clients ne sont jamais supprimés.
    pub fn register_client(&mut self, name: &str) -> ClientId {
        if let Some(existing) = self.ledger.find_client_by_name(name) {
            return existing.id.clone();
        }
        let client = crate::model::Client::new(name);
        let id = client.id.clone();
        self.ledger.clients.push(client);
        id
    }

    /// Réserve le court pour `client` à `(date, time)`. Le `prompt`
    /// tranche la durée et l'éventuel créneau de repli ; `now` sert aux
    /// règles de délai. Aucune mutation en cas d'échec.
    pub fn book(
        &mut self,
        client: &ClientId,
        date: NaiveDate,
        time: NaiveTime,
        now: NaiveDateTime,
        prompt: &mut dyn BookingPrompt,
    ) -> Result<ReservationId, BookingError> {
        booking::book(self, client, date, time, now, prompt)
    }

    /// Annule la réservation du client à `date`, si le délai d'une heure
    /// avant son début est encore respecté.
    pub fn cancel(
        &mut self,
        client: &ClientId,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<ReservationId, BookingError> {
        booking::cancel(self, client, date, now)
    }

    /// Vrai si aucune réservation ne couvre `(date, time)`.
    pub fn is_vacant(&self, date: NaiveDate, time: NaiveTime) -> bool {
        availability::is_vacant(&self.ledger, date, time)
    }

    /// Prochain créneau libre derrière un `(date, time)` occupé, s'il
    /// laisse au moins 30 minutes utilisables.
    pub fn next_available(&self, date: NaiveDate, time: NaiveTime) -> Option<NaiveTime> {
        availability::next_available(&self.ledger, date, time)
    }

    /// Écart jusqu'au prochain départ occupé, plafonné à 90 minutes.
    pub fn gap_to_next_start(&self, date: NaiveDate, time: NaiveTime) -> Duration {
        availability::gap_to_next_start(&self.ledger, date, time)
    }
}
