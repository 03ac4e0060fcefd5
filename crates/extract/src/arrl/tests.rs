// SPDX-FileCopyrightText: Copyright (C) 2024-2026 airwave project contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use jiff::civil::{date, time};

use airwave_core::prelude::*;

use super::*;

const BULLETIN: &str = r#"
QST de W1AW
QST QST QST
Newington CT  November 20, 2024
Visit http://www.arrl.org/w1aw-operating-schedule for updates.
CW: 1.8025 3.5815 7.0475
DIGITAL: - 3.5975 7.095
VOICE: - 3.990 7.290
Morning Schedule:
1400 UTC (9 AM EST) CWs Wed, Fri
1400  "  "  CWf Tue, Thu
Daily Visitor Operating Hours
Afternoon/Evening Schedule:
2100 UTC (4 PM EST) CWf Mon, Wed, Fri
2200  "  "  DIGITAL Daily
2300  "  "  CWb Daily
0000  "  "  VOICE Daily
Notes:
0100 UTC (8 PM EST) CWf Daily
"#;

#[test]
fn extracts_header_fields() {
    let schedule = extract_schedule(BULLETIN).unwrap();
    assert_eq!(schedule.name, SCHEDULE_NAME);
    assert_eq!(schedule.date, date(2024, 11, 20));
    assert_eq!(
        schedule.source_url.as_deref(),
        Some("http://www.arrl.org/w1aw-operating-schedule")
    );
    assert_eq!(schedule.stations.len(), 1);
    let station = &schedule.stations[0];
    assert_eq!(station.callsign, "W1AW");
    assert_eq!(station.location, "Newington CT");
    assert!(schedule.is_valid());
}

#[test]
fn cross_joins_mode_tables_with_recorded_windows() {
    let schedule = extract_schedule(BULLETIN).unwrap();
    let station = &schedule.stations[0];

    // Three CW values, two digital, two voice; dashes contribute nothing.
    let values: Vec<_> = station.frequencies.iter().map(|f| f.value).collect();
    assert_eq!(
        values,
        vec![
            1_802_500.0,
            3_581_500.0,
            7_047_500.0,
            3_597_500.0,
            7_095_000.0,
            3_990_000.0,
            7_290_000.0,
        ]
    );

    // The CW window stays open across the two 1400 lines, is closed by
    // the next schedule heading, and reopens twice more afterwards.
    let cw_times = &station.frequencies[0].times;
    assert_eq!(
        cw_times,
        &vec![
            TimeRange::new(time(14, 0, 0, 0), time(14, 0, 0, 0)),
            TimeRange::new(time(21, 0, 0, 0), time(21, 0, 0, 0)),
            TimeRange::new(time(23, 0, 0, 0), time(23, 0, 0, 0)),
        ]
    );
    assert_eq!(
        station.frequencies[3].times,
        vec![TimeRange::new(time(22, 0, 0, 0), time(22, 0, 0, 0))]
    );

    // Only the digital frequencies are on the air at 2200.
    let active: Vec<_> = station
        .active_frequencies_at(time(22, 0, 0, 0))
        .iter()
        .map(|f| f.value)
        .collect();
    assert_eq!(active, vec![3_597_500.0, 7_095_000.0]);
}

#[test]
fn emits_one_transmission_per_event_line() {
    let schedule = extract_schedule(BULLETIN).unwrap();
    let station = &schedule.stations[0];
    let titles: Vec<_> = station
        .transmissions
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Slow Code",
            "Fast Code",
            "Fast Code",
            "Digital Bulletin",
            "Code Bulletin",
            "Voice Bulletin",
        ]
    );

    let slow = &station.transmissions[0];
    assert_eq!(slow.days, vec![DayOfWeek::Wed, DayOfWeek::Fri]);
    assert_eq!(slow.emissions, vec![EmissionType::A1A]);
    assert_eq!(slow.times, vec![TimeList::new(time(14, 0, 0, 0))]);

    let digital = &station.transmissions[3];
    assert_eq!(
        digital.emissions,
        vec![EmissionType::F1B, EmissionType::J2B]
    );
    assert_eq!(
        digital.days,
        vec![
            DayOfWeek::Mon,
            DayOfWeek::Tue,
            DayOfWeek::Wed,
            DayOfWeek::Thu,
            DayOfWeek::Fri,
        ]
    );

    // Everything after the notes heading is ignored.
    assert!(station
        .transmissions
        .iter()
        .all(|t| !t.times.contains(&TimeList::new(time(1, 0, 0, 0)))));
}

#[test]
fn overrides_am_voice_frequency_emissions() {
    let schedule = extract_schedule(BULLETIN).unwrap();
    let station = &schedule.stations[0];
    let am = station
        .frequencies
        .iter()
        .find(|f| f.value == 7_290_000.0)
        .unwrap();
    assert_eq!(am.emissions, vec![EmissionType::A3E]);
    let ssb = station
        .frequencies
        .iter()
        .find(|f| f.value == 3_990_000.0)
        .unwrap();
    assert!(ssb.emissions.is_empty());
}

#[test]
fn merges_value_shared_between_modes() {
    let bulletin = r#"
QST de W1AW
Newington CT  November 20, 2024
CW: 7.0475
VOICE: 7.0475
1000 UTC (EST) CWf Daily
2000  "  "  VOICE Daily
Notes:
"#;
    let schedule = extract_schedule(bulletin).unwrap();
    let station = &schedule.stations[0];
    assert_eq!(station.frequencies.len(), 1);
    let frequency = &station.frequencies[0];
    assert_eq!(frequency.value, 7_047_500.0);
    assert_eq!(
        frequency.times,
        vec![
            TimeRange::new(time(10, 0, 0, 0), time(10, 0, 0, 0)),
            TimeRange::new(time(20, 0, 0, 0), time(20, 0, 0, 0)),
        ]
    );
}

#[test]
fn fails_without_callsign() {
    let bulletin = r#"
Newington CT  November 20, 2024
Notes:
"#;
    let err = extract_schedule(bulletin).unwrap_err();
    assert!(matches!(err, Error::MissingField("callsign")));
}

#[test]
fn fails_without_location_and_date() {
    let bulletin = r#"
QST de W1AW
Notes:
"#;
    let err = extract_schedule(bulletin).unwrap_err();
    assert!(matches!(err, Error::MissingField("location")));
}

#[test]
fn fails_on_unknown_day_name() {
    let bulletin = r#"
QST de W1AW
Newington CT  November 20, 2024
1000 UTC (EST) CWf Someday
Notes:
"#;
    let err = extract_schedule(bulletin).unwrap_err();
    assert!(matches!(err, Error::UnknownDay(day) if day == "Someday"));
}
