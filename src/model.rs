use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Durées de réservation autorisées, en minutes.
pub const ALLOWED_DURATIONS_MIN: [i64; 3] = [30, 60, 90];

/// Identifiant fort pour Client
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(String);

impl ClientId {
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Client du court (créé à la première rencontre, jamais supprimé)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    /// Nom normalisé (title-case), clef de retrouvaille.
    pub name: String,
    /// Références (non possédantes) vers les réservations du ledger.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reservations: Vec<ReservationId>,
}

impl Client {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            id: ClientId::random(),
            name: name.into(),
            reservations: Vec::new(),
        }
    }
}

/// Identifiant fort pour Reservation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(String);

impl ReservationId {
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Créneau réservé sur le court : intervalle semi-ouvert `[start, end)`
/// sur une date civile, heures locales.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub client: ClientId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Reservation {
    /// Crée une réservation en validant `end > start` et une durée
    /// de 30, 60 ou 90 minutes.
    pub fn new(
        client: ClientId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self, String> {
        if end <= start {
            return Err("end must be strictly after start".to_string());
        }
        let minutes = (end - start).num_minutes();
        if !ALLOWED_DURATIONS_MIN.contains(&minutes) {
            return Err(format!("duration must be 30, 60 or 90 minutes, got {minutes}"));
        }
        Ok(Self {
            id: ReservationId::random(),
            client,
            date,
            start,
            end,
        })
    }

    /// Durée en minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Vrai si `time` tombe dans `[start, end)`.
    pub fn covers(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }
}

/// Bornes de la semaine ISO (lundi..dimanche) contenant `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let weekday = i64::from(date.weekday().num_days_from_monday());
    let week_start = date - Duration::days(weekday);
    (week_start, week_start + Duration::days(6))
}

/// Registre complet : tous les clients et toutes les réservations.
/// Source de vérité unique pour les requêtes de disponibilité.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Ledger {
    pub clients: Vec<Client>,
    pub reservations: Vec<Reservation>,
}

impl Ledger {
    pub fn find_client_by_name<'a>(&'a self, name: &str) -> Option<&'a Client> {
        self.clients.iter().find(|c| c.name == name)
    }
    pub fn find_client_by_id<'a>(&'a self, id: &ClientId) -> Option<&'a Client> {
        self.clients.iter().find(|c| &c.id == id)
    }
    pub fn find_client_mut_by_id(&mut self, id: &ClientId) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| &c.id == id)
    }
    pub fn find_reservation<'a>(&'a self, id: &ReservationId) -> Option<&'a Reservation> {
        self.reservations.iter().find(|r| &r.id == id)
    }
    /// Réservations d'une date donnée, dans l'ordre d'insertion.
    pub fn reservations_on(&self, date: NaiveDate) -> impl Iterator<Item = &Reservation> {
        self.reservations.iter().filter(move |r| r.date == date)
    }
}
