use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::schedule::{day_label, DaySchedule, Schedule};

/// Caractères interdits dans un nom de fichier fourni par l'appelant.
const FORBIDDEN_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("invalid file name {0:?}: <, >, :, \", /, \\, |, ?, * and control characters are not allowed")]
    InvalidFileName(String),
    #[error("writing schedule file failed")]
    Write(#[from] std::io::Error),
    #[error("rendering CSV failed")]
    Csv(#[from] csv::Error),
    #[error("rendering JSON failed")]
    Json(#[from] serde_json::Error),
}

/// Valide un nom de base (sans extension) contre les caractères interdits.
pub fn validate_file_name(name: &str) -> Result<(), ExportError> {
    let clean = !name.is_empty()
        && !name
            .chars()
            .any(|c| FORBIDDEN_CHARS.contains(&c) || c.is_control());
    if clean {
        Ok(())
    } else {
        Err(ExportError::InvalidFileName(name.to_string()))
    }
}

/// Rendu console : par jour, libellé et date, puis une ligne par entrée
/// ou "No Reservations". Ligne vide entre les jours et en fin de sortie.
pub fn render_text(schedule: &Schedule, today: NaiveDate) -> String {
    let mut out = String::new();
    for day in &schedule.days {
        let _ = writeln!(
            out,
            "{}, {}",
            day_label(day.date, today),
            day.date.format("%d.%m.%Y")
        );
        if day.entries.is_empty() {
            out.push_str("No Reservations\n");
        } else {
            for entry in &day.entries {
                let _ = writeln!(
                    out,
                    "* {}, from {} to {}",
                    entry.client_name,
                    entry.start.format("%H:%M"),
                    entry.end.format("%H:%M")
                );
            }
        }
        out.push('\n');
    }
    out
}

// Le JSON est un objet ordonné par date ; serde_json trie ses maps par
// clef, et "DD.MM" ne se trie pas comme une date, d'où la sérialisation
// manuelle en ordre d'itération.
struct JsonDays<'a>(&'a [DaySchedule]);

impl Serialize for JsonDays<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for day in self.0 {
            let key = day.date.format("%d.%m").to_string();
            map.serialize_entry(&key, &JsonEntries(day))?;
        }
        map.end()
    }
}

struct JsonEntries<'a>(&'a DaySchedule);

impl Serialize for JsonEntries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Row<'a> {
            name: &'a str,
            start_time: String,
            end_time: String,
        }
        let mut seq = serializer.serialize_seq(Some(self.0.entries.len()))?;
        for entry in &self.0.entries {
            seq.serialize_element(&Row {
                name: &entry.client_name,
                start_time: entry.start.format("%H:%M").to_string(),
                end_time: entry.end.format("%H:%M").to_string(),
            })?;
        }
        seq.end()
    }
}

/// Rendu JSON : `{"DD.MM": [{name, start_time, end_time}, ...], ...}`,
/// une clef par jour dans l'ordre de la plage, indentation 2 espaces.
pub fn schedule_to_json(schedule: &Schedule) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&JsonDays(&schedule.days))?)
}

/// Rendu CSV : entête `name,start_time,end_time`, une ligne par entrée,
/// horaires complets `DD.MM.YYYY HH:MM`, aucun champ cité.
pub fn schedule_to_csv(schedule: &Schedule) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());
    writer.write_record(["name", "start_time", "end_time"])?;
    for day in &schedule.days {
        for entry in &day.entries {
            let start = format!("{} {}", day.date.format("%d.%m.%Y"), entry.start.format("%H:%M"));
            let end = format!("{} {}", day.date.format("%d.%m.%Y"), entry.end.format("%H:%M"));
            writer.write_record([entry.client_name.as_str(), start.as_str(), end.as_str()])?;
        }
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

/// Écrit l'agenda en `<base>.json` dans `dir` après validation du nom.
pub fn export_json<P: AsRef<Path>>(
    dir: P,
    base: &str,
    schedule: &Schedule,
) -> Result<PathBuf, ExportError> {
    validate_file_name(base)?;
    let path = dir.as_ref().join(format!("{base}.json"));
    fs::write(&path, schedule_to_json(schedule)?)?;
    Ok(path)
}

/// Écrit l'agenda en `<base>.csv` dans `dir` après validation du nom.
pub fn export_csv<P: AsRef<Path>>(
    dir: P,
    base: &str,
    schedule: &Schedule,
) -> Result<PathBuf, ExportError> {
    validate_file_name(base)?;
    let path = dir.as_ref().join(format!("{base}.csv"));
    fs::write(&path, schedule_to_csv(schedule)?)?;
    Ok(path)
}
