#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveTime};
use courtbook::{
    build_schedule, day_label, export, Client, Ledger, Reservation,
};
use tempfile::tempdir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}
fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Ledger garni à la main, insertions volontairement dans le désordre.
fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::default();
    let john = Client::new("John Doe");
    let jane = Client::new("Jane Roe");
    let day = d(2026, 8, 18);

    let mut push = |client: &Client, start: NaiveTime, end: NaiveTime| {
        let r = Reservation::new(client.id.clone(), day, start, end).unwrap();
        ledger.reservations.push(r);
    };
    push(&jane, t(14, 0), t(15, 0));
    push(&john, t(10, 0), t(11, 0));

    ledger.clients.push(john);
    ledger.clients.push(jane);
    ledger
}

#[test]
fn schedule_has_one_bucket_per_day_sorted_by_start() {
    let ledger = sample_ledger();
    let schedule = build_schedule(&ledger, d(2026, 8, 17), d(2026, 8, 19));

    assert_eq!(schedule.days.len(), 3);
    assert!(schedule.days[0].entries.is_empty());
    assert!(schedule.days[2].entries.is_empty());

    let busy = &schedule.days[1];
    assert_eq!(busy.date, d(2026, 8, 18));
    let starts: Vec<NaiveTime> = busy.entries.iter().map(|e| e.start).collect();
    assert_eq!(starts, vec![t(10, 0), t(14, 0)]);
    assert_eq!(busy.entries[0].client_name, "John Doe");
    assert_eq!(schedule.entry_count(), 2);
}

#[test]
fn single_day_range_on_empty_ledger_yields_one_empty_bucket() {
    let schedule = build_schedule(&Ledger::default(), d(2026, 8, 18), d(2026, 8, 18));
    assert_eq!(schedule.days.len(), 1);
    assert!(schedule.days[0].entries.is_empty());
}

#[test]
fn day_labels_follow_today() {
    let today = d(2026, 8, 18);
    assert_eq!(day_label(today, today), "Today");
    assert_eq!(day_label(d(2026, 8, 19), today), "Tomorrow");
    assert_eq!(day_label(d(2026, 8, 20), today), "The day after tomorrow");
    assert_eq!(day_label(d(2026, 8, 17), today), "Yesterday");
    assert_eq!(day_label(d(2026, 8, 16), today), "The day before yesterday");
    assert_eq!(day_label(d(2026, 8, 24), today), "Monday");
}

#[test]
fn text_rendering_matches_console_contract() {
    let ledger = sample_ledger();
    let schedule = build_schedule(&ledger, d(2026, 8, 18), d(2026, 8, 19));
    let out = export::render_text(&schedule, d(2026, 8, 18));
    insta::assert_snapshot!(out, @r"
    Today, 18.08.2026
    * John Doe, from 10:00 to 11:00
    * Jane Roe, from 14:00 to 15:00

    Tomorrow, 19.08.2026
    No Reservations
    ");
}

#[test]
fn json_rendering_is_pretty_and_day_keyed() {
    let ledger = sample_ledger();
    let schedule = build_schedule(&ledger, d(2026, 8, 18), d(2026, 8, 19));
    let json = export::schedule_to_json(&schedule).unwrap();

    let expected = r#"{
  "18.08": [
    {
      "name": "John Doe",
      "start_time": "10:00",
      "end_time": "11:00"
    },
    {
      "name": "Jane Roe",
      "start_time": "14:00",
      "end_time": "15:00"
    }
  ],
  "19.08": []
}"#;
    assert_eq!(json, expected);
}

#[test]
fn json_keys_keep_date_order_across_year_boundary() {
    // "31.12" < "01.01" en ordre de dates mais pas en ordre lexical.
    let schedule = build_schedule(&Ledger::default(), d(2026, 12, 31), d(2027, 1, 1));
    let json = export::schedule_to_json(&schedule).unwrap();
    let december = json.find("\"31.12\"").unwrap();
    let january = json.find("\"01.01\"").unwrap();
    assert!(december < january);
}

#[test]
fn csv_rendering_uses_full_timestamps_without_quoting() {
    let ledger = sample_ledger();
    let schedule = build_schedule(&ledger, d(2026, 8, 18), d(2026, 8, 19));
    let csv = export::schedule_to_csv(&schedule).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "name,start_time,end_time");
    assert_eq!(lines[1], "John Doe,18.08.2026 10:00,18.08.2026 11:00");
    assert_eq!(lines[2], "Jane Roe,18.08.2026 14:00,18.08.2026 15:00");
    // Parité avec le ledger filtré sur la plage : une ligne par entrée.
    assert_eq!(lines.len() - 1, schedule.entry_count());
}

#[test]
fn exported_files_land_next_to_each_other() {
    let dir = tempdir().unwrap();
    let ledger = sample_ledger();
    let schedule = build_schedule(&ledger, d(2026, 8, 18), d(2026, 8, 18));

    let json_path = export::export_json(dir.path(), "august", &schedule).unwrap();
    let csv_path = export::export_csv(dir.path(), "august", &schedule).unwrap();
    assert_eq!(json_path, dir.path().join("august.json"));
    assert_eq!(csv_path, dir.path().join("august.csv"));

    let json = std::fs::read_to_string(&json_path).unwrap();
    assert_eq!(json, export::schedule_to_json(&schedule).unwrap());
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("name,start_time,end_time"));
}

#[test]
fn forbidden_file_names_are_rejected() {
    for bad in ["a/b", "a\\b", "a:b", "a*b", "a?b", "a<b", "a>b", "a|b", "a\"b", "a\tb", ""] {
        let err = export::validate_file_name(bad);
        assert!(
            matches!(err, Err(export::ExportError::InvalidFileName(_))),
            "{bad:?} should be rejected"
        );
    }
    assert!(export::validate_file_name("schedule_août 2026").is_ok());

    let dir = tempdir().unwrap();
    let schedule = build_schedule(&Ledger::default(), d(2026, 8, 18), d(2026, 8, 18));
    assert!(export::export_json(dir.path(), "a/b", &schedule).is_err());
}
