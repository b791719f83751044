use chrono::{Duration, NaiveDate, NaiveTime};
use thiserror::Error;

/// Délai minimal (réservation comme annulation) : 1 heure.
pub const MIN_LEAD_SECONDS: i64 = 3600;

/// Quota hebdomadaire par client (semaine ISO, lundi..dimanche).
pub const WEEKLY_QUOTA: usize = 2;

/// Choix de durée proposé lors de la réservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationChoice {
    Cancel,
    Min30,
    Min60,
    Min90,
}

impl DurationChoice {
    /// Durée en minutes ; `None` pour l'abandon.
    pub fn minutes(self) -> Option<i64> {
        match self {
            DurationChoice::Cancel => None,
            DurationChoice::Min30 => Some(30),
            DurationChoice::Min60 => Some(60),
            DurationChoice::Min90 => Some(90),
        }
    }
}

/// Menu de durées réservables à un instant donné, borné par l'écart
/// jusqu'à la prochaine réservation et par minuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationMenu {
    max_minutes: i64,
}

impl DurationMenu {
    /// Construit le menu pour un départ à `start` avec un écart `gap`
    /// jusqu'au prochain créneau occupé. Écart >= 90 min : tout le menu ;
    /// >= 60 : jusqu'à 60 ; sinon 30 seulement. Les durées qui
    /// franchiraient minuit sont retirées.
    pub fn at(gap: Duration, start: NaiveTime) -> Self {
        let by_gap = if gap >= Duration::minutes(90) {
            90
        } else if gap >= Duration::minutes(60) {
            60
        } else {
            30
        };
        let mut max = 0i64;
        for minutes in [30i64, 60, 90] {
            if minutes <= by_gap && fits_in_day(start, minutes) {
                max = minutes;
            }
        }
        Self { max_minutes: max }
    }

    /// Aucun choix possible (départ trop proche de minuit).
    pub fn is_empty(&self) -> bool {
        self.max_minutes == 0
    }

    pub fn offers(&self, choice: DurationChoice) -> bool {
        match choice.minutes() {
            None => true, // l'abandon reste toujours possible
            Some(m) => m <= self.max_minutes,
        }
    }

    /// Durées proposées, croissantes.
    pub fn choices(&self) -> Vec<DurationChoice> {
        [DurationChoice::Min30, DurationChoice::Min60, DurationChoice::Min90]
            .into_iter()
            .filter(|c| self.offers(*c))
            .collect()
    }

    /// Plus longue durée proposée, en minutes.
    pub fn max_minutes(&self) -> i64 {
        self.max_minutes
    }
}

/// Vrai si `[start, start + minutes)` tient dans la journée civile.
fn fits_in_day(start: NaiveTime, minutes: i64) -> bool {
    let (_, wrapped) = start.overflowing_add_signed(Duration::minutes(minutes));
    wrapped == 0
}

/// Décisions demandées à l'appelant pendant une réservation
/// (menu de durée, créneau de repli). Le CLI répond via des drapeaux,
/// les tests via des scripts.
pub trait BookingPrompt {
    /// Choisit une durée parmi celles offertes par `menu`.
    fn choose_duration(&mut self, menu: DurationMenu) -> DurationChoice;
    /// Accepte ou refuse le créneau alternatif proposé.
    fn accept_alternative(&mut self, date: NaiveDate, time: NaiveTime) -> bool;
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("unknown client: {0}")]
    UnknownClient(String),
    #[error("the client already has {WEEKLY_QUOTA} reservations that week")]
    QuotaExceeded,
    #[error("this time has already passed")]
    PastTime,
    #[error("less than 1 hour remains until the requested time")]
    InsufficientLead,
    #[error("this time is already occupied")]
    SlotOccupied,
    #[error("no usable slot follows the occupied one")]
    NoAlternativeWithinWindow,
    #[error("the booking process was cancelled")]
    BookingCancelledByUser,
    #[error("duration not available for this slot")]
    DurationUnavailable,
    #[error("the reservation would run past midnight")]
    CrossesMidnight,
    #[error("invalid time range: end must be after start")]
    InvalidTimeRange,
    #[error("less than 1 hour remains until the reservation, it can no longer be cancelled")]
    CancellationTooLate,
    #[error("no reservation found for the specified date")]
    NoSuchReservation,
}
