#![forbid(unsafe_code)]
//! Courtbook — bibliothèque de réservation d'un court unique (sans BD).
//!
//! - Créneaux semi-ouverts `[start, end)` de 30/60/90 minutes, sans
//!   chevauchement sur une même date.
//! - Quota de 2 réservations par client et par semaine ISO, délai d'une
//!   heure pour réserver comme pour annuler.
//! - Recherche du prochain créneau libre derrière un horaire occupé.
//! - Agenda par jour sur une plage de dates ; export console, JSON, CSV.
//! - Heures locales naïves ; « maintenant » est toujours passé en
//!   paramètre, l'horloge reste en dehors de la lib.

pub mod desk;
pub mod export;
pub mod model;
pub mod parse;
pub mod schedule;
pub mod storage;

pub use desk::{
    BookingError, BookingPrompt, Desk, DurationChoice, DurationMenu, MIN_LEAD_SECONDS,
    WEEKLY_QUOTA,
};
pub use export::{
    export_csv, export_json, render_text, schedule_to_csv, schedule_to_json, validate_file_name,
    ExportError,
};
pub use model::{week_bounds, Client, ClientId, Ledger, Reservation, ReservationId};
pub use schedule::{build_schedule, day_label, DaySchedule, Schedule, ScheduleEntry};
pub use storage::{JsonStorage, Storage};
