use chrono::{Duration, NaiveDate, NaiveTime};

use crate::model::Ledger;

/// Entrée d'agenda : une réservation vue côté planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub client_name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Un jour d'agenda, entrées triées par heure de début.
#[derive(Debug, Clone)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub entries: Vec<ScheduleEntry>,
}

/// Agenda agrégé sur une plage de dates inclusive, un jour par date,
/// jours vides compris.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pub days: Vec<DaySchedule>,
}

impl Schedule {
    /// Nombre total d'entrées, tous jours confondus.
    pub fn entry_count(&self) -> usize {
        self.days.iter().map(|d| d.entries.len()).sum()
    }
}

/// Construit l'agenda de `from` à `to` inclus. Lecture seule sur le
/// ledger ; les noms inconnus (ne devrait pas arriver) sortent en "?".
pub fn build_schedule(ledger: &Ledger, from: NaiveDate, to: NaiveDate) -> Schedule {
    let mut days = Vec::new();
    let mut current = from;
    while current <= to {
        let mut entries: Vec<ScheduleEntry> = ledger
            .reservations_on(current)
            .map(|r| ScheduleEntry {
                client_name: ledger
                    .find_client_by_id(&r.client)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "?".to_string()),
                start: r.start,
                end: r.end,
            })
            .collect();
        entries.sort_by_key(|e| e.start);
        days.push(DaySchedule {
            date: current,
            entries,
        });
        current = current + Duration::days(1);
    }
    Schedule { days }
}

/// Libellé du jour relatif à `today` : Today, Tomorrow, etc., sinon le
/// nom du jour de la semaine.
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    let offset = (date - today).num_days();
    match offset {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        2 => "The day after tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        -2 => "The day before yesterday".to_string(),
        _ => date.format("%A").to_string(),
    }
}
