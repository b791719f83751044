use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveDateTime};

/// Ramène `/` et `-` sur `.` et rogne les espaces, avant parsing.
fn normalize_separators(raw: &str) -> String {
    raw.trim().replace(['/', '-'], ".")
}

/// Parse `DD.MM.YY HH:MM` ou `DD.MM.YYYY HH:MM` (séparateurs `/` et `-`
/// acceptés).
pub fn parse_booking_datetime(raw: &str) -> anyhow::Result<NaiveDateTime> {
    let normalized = normalize_separators(raw);
    NaiveDateTime::parse_from_str(&normalized, "%d.%m.%y %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(&normalized, "%d.%m.%Y %H:%M"))
        .with_context(|| format!("invalid date and time {raw:?}, expected DD.MM.YYYY HH:MM"))
}

/// Parse `DD.MM.YY` ou `DD.MM.YYYY` (séparateurs `/` et `-` acceptés).
pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    let normalized = normalize_separators(raw);
    NaiveDate::parse_from_str(&normalized, "%d.%m.%y")
        .or_else(|_| NaiveDate::parse_from_str(&normalized, "%d.%m.%Y"))
        .with_context(|| format!("invalid date {raw:?}, expected DD.MM.YYYY"))
}

/// Valide un nom de client — exactement deux mots alphabétiques — et le
/// normalise en title-case ("john  DOE" -> "John Doe").
pub fn normalize_client_name(raw: &str) -> anyhow::Result<String> {
    if !raw.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        bail!("client name must contain letters only");
    }
    let words: Vec<&str> = raw.split_whitespace().collect();
    if words.len() != 2 {
        bail!("client name must be a first name and a surname");
    }
    Ok(words
        .iter()
        .map(|w| title_case(w))
        .collect::<Vec<_>>()
        .join(" "))
}

fn title_case(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => lower,
    }
}
