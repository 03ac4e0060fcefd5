// SPDX-FileCopyrightText: Copyright (C) 2024-2026 airwave project contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time-window queries against loaded station data.
//!
//! The engine is a pure computation: the caller supplies stations with all
//! frequencies, transmissions, and time lists already resolved in memory,
//! and receives an ordered list of broadcast events. It performs no I/O
//! and no re-validation of its inputs.

use airwave_core::{
    radio::{CyclicWindow, DayOfWeek, EmissionType},
    schedule::{Frequency, FrequencyValue, Station, Transmission},
    util::clock::Time,
};

/// One broadcast event matching a query window.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub day: DayOfWeek,
    pub time: Time,

    /// Transmission title, with the resolved emission codes appended in
    /// parentheses when any are known.
    pub name: String,

    /// Station tag in the form `"CALLSIGN (Location)"`.
    pub station: String,

    /// Values of the frequencies active at the event time.
    pub frequencies: Vec<FrequencyValue>,
}

/// Resolves the effective emissions of a transmission at some instant.
///
/// Precedence, highest first: the union over all active frequencies, the
/// transmission's own declaration, the station default. The first
/// non-empty level wins; the result is empty only if all three are.
#[must_use]
pub fn resolve_emissions(
    station: &Station,
    transmission: &Transmission,
    active_frequencies: &[&Frequency],
) -> Vec<EmissionType> {
    let mut from_frequencies: Vec<_> = active_frequencies
        .iter()
        .flat_map(|frequency| frequency.emissions.iter().copied())
        .collect();
    from_frequencies.sort_unstable();
    from_frequencies.dedup();
    if !from_frequencies.is_empty() {
        return from_frequencies;
    }
    if !transmission.emissions.is_empty() {
        return transmission.emissions.clone();
    }
    station.emissions.clone()
}

fn display_name(transmission: &Transmission, emissions: &[EmissionType]) -> String {
    if emissions.is_empty() {
        return transmission.title.clone();
    }
    let codes = emissions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} ({codes})", transmission.title)
}

/// All broadcast events of the given stations that fall into the window.
///
/// Events are sorted ascending by `(day, time)` in `Sun..Sat` order; ties
/// preserve the order in which stations and transmissions were supplied.
#[must_use]
pub fn query_events(window: &CyclicWindow, stations: &[Station]) -> Vec<Event> {
    let mut events = Vec::new();
    for station in stations {
        for transmission in &station.transmissions {
            for day in transmission.days.iter().copied() {
                for timelist in &transmission.times {
                    if !window.in_range(day, timelist.initial) {
                        continue;
                    }
                    let active_frequencies = station.active_frequencies_at(timelist.initial);
                    let emissions = resolve_emissions(station, transmission, &active_frequencies);
                    events.push(Event {
                        day,
                        time: timelist.initial,
                        name: display_name(transmission, &emissions),
                        station: format!("{} ({})", station.callsign, station.location),
                        frequencies: active_frequencies
                            .iter()
                            .map(|frequency| frequency.value)
                            .collect(),
                    });
                }
            }
        }
    }
    events.sort_by_key(|event| (event.day, event.time));
    events
}

///////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests;
