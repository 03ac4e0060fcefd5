// SPDX-FileCopyrightText: Copyright (C) 2024-2026 airwave project contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use airwave_core::schedule::{MapArea, TimeList, TimeRange};
use jiff::civil::time;

use super::*;

fn test_station(with_time_range: bool) -> Station {
    let mut station = Station::new("W1AW", "Newington CT");
    let mut frequency = Frequency::new(123.4);
    if with_time_range {
        frequency
            .times
            .push(TimeRange::new(time(0, 0, 0, 0), time(1, 0, 0, 0)));
    }
    station.add_frequency(frequency).unwrap();
    station
        .add_map_area(MapArea::new("ID", "Test Description"))
        .unwrap();
    let mut transmission = Transmission::new("Test Title");
    transmission.emissions = vec![EmissionType::A1A];
    transmission.days = vec![DayOfWeek::Mon, DayOfWeek::Tue];
    transmission.map_area = Some("ID".to_owned());
    transmission.times.push(TimeList::new(time(0, 30, 0, 0)));
    station.add_transmission(transmission).unwrap();
    station
}

#[test]
fn resolve_emissions_precedence() {
    let mut station = test_station(true);

    // Transmission declaration wins over the (empty) frequency level.
    let transmission = station.transmissions[0].clone();
    let active = station.active_frequencies_at(time(0, 30, 0, 0));
    assert_eq!(
        resolve_emissions(&station, &transmission, &active),
        vec![EmissionType::A1A]
    );

    // Nothing declared anywhere: empty.
    let mut transmission = transmission;
    transmission.emissions.clear();
    let active = station.active_frequencies_at(time(0, 30, 0, 0));
    assert_eq!(resolve_emissions(&station, &transmission, &active), vec![]);

    // Station default applies when the transmission is silent.
    station.emissions = vec![EmissionType::J3C];
    let active = station.active_frequencies_at(time(0, 30, 0, 0));
    assert_eq!(
        resolve_emissions(&station, &transmission, &active),
        vec![EmissionType::J3C]
    );

    // An active frequency with emissions outranks everything else.
    station.frequencies[0].emissions = vec![EmissionType::A3E];
    let active = station.active_frequencies_at(time(0, 30, 0, 0));
    assert_eq!(
        resolve_emissions(&station, &transmission, &active),
        vec![EmissionType::A3E]
    );
}

#[test]
fn frequency_emissions_outrank_transmission_default_fallback() {
    // Station defaults {J3C}, transmission {}, active frequency {A3E}:
    // the frequency level wins before the fallback to station defaults.
    let mut station = test_station(true);
    station.emissions = vec![EmissionType::J3C];
    station.frequencies[0].emissions = vec![EmissionType::A3E];
    let mut transmission = station.transmissions[0].clone();
    transmission.emissions.clear();
    let active = station.active_frequencies_at(time(0, 30, 0, 0));
    assert_eq!(
        resolve_emissions(&station, &transmission, &active),
        vec![EmissionType::A3E]
    );
}

#[test]
fn query_matches_single_event() {
    let station = test_station(true);
    let window = CyclicWindow::new(DayOfWeek::Mon, time(0, 0, 0, 0), time(1, 0, 0, 0));
    let events = query_events(&window, std::slice::from_ref(&station));
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.day, DayOfWeek::Mon);
    assert_eq!(event.time, time(0, 30, 0, 0));
    assert_eq!(event.name, "Test Title (A1A)");
    assert_eq!(event.station, "W1AW (Newington CT)");
    assert_eq!(event.frequencies, vec![123.4]);
}

#[test]
fn query_outside_window_matches_nothing() {
    let station = test_station(true);
    let window = CyclicWindow::new(DayOfWeek::Mon, time(12, 0, 0, 0), time(13, 0, 0, 0));
    assert!(query_events(&window, std::slice::from_ref(&station)).is_empty());
}

#[test]
fn query_without_time_ranges_still_matches() {
    let station = test_station(false);
    let window = CyclicWindow::new(DayOfWeek::Mon, time(0, 0, 0, 0), time(1, 0, 0, 0));
    let events = query_events(&window, std::slice::from_ref(&station));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].frequencies, vec![123.4]);
}

#[test]
fn query_title_without_emissions_has_no_parens() {
    let mut station = test_station(false);
    station.transmissions[0].emissions.clear();
    let window = CyclicWindow::new(DayOfWeek::Mon, time(0, 0, 0, 0), time(1, 0, 0, 0));
    let events = query_events(&window, std::slice::from_ref(&station));
    assert_eq!(events[0].name, "Test Title");
}

#[test]
fn query_results_are_sorted_by_day_then_time() {
    let mut station = test_station(false);
    let mut late = Transmission::new("Later Title");
    late.days = vec![DayOfWeek::Sun, DayOfWeek::Mon];
    late.times.push(TimeList::new(time(0, 10, 0, 0)));
    late.times.push(TimeList::new(time(0, 50, 0, 0)));
    station.add_transmission(late).unwrap();

    // Wrapping window starting Sunday evening, reaching into Monday.
    let window = CyclicWindow::new(DayOfWeek::Sun, time(23, 0, 0, 0), time(1, 0, 0, 0));
    let events = query_events(&window, std::slice::from_ref(&station));
    let keys: Vec<_> = events.iter().map(|e| (e.day, e.time)).collect();
    assert_eq!(
        keys,
        vec![
            (DayOfWeek::Mon, time(0, 10, 0, 0)),
            (DayOfWeek::Mon, time(0, 30, 0, 0)),
            (DayOfWeek::Mon, time(0, 50, 0, 0)),
        ]
    );
}
