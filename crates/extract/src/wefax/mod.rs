// SPDX-FileCopyrightText: Copyright (C) 2024-2026 airwave project contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction of NWS weather-fax station tables.
//!
//! Each input document describes one station and is laid out in strictly
//! ordered sections: a location header, the frequency table, the
//! transmission table, the map-area table, and an "Information dated"
//! footer. A cursor scans forward to each section marker and consumes
//! rows until the section ends. All documents of one run are combined
//! into a single schedule dated with the latest footer date found.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use airwave_core::{
    radio::EmissionType,
    schedule::{Frequency, MapArea, Schedule, Station, TimeList, TimeRange, Transmission},
    util::clock::{parse_hhmm, parse_long_date, Date, Time},
};

use crate::{Error, Result};

pub const SCHEDULE_NAME: &str = "wefax";

/// The combined schedule all station tables are excerpted from.
pub const SOURCE_URL: &str = "https://www.weather.gov/media/marine/rfax.pdf";

/// Placeholder for an unused schedule-time column.
const NO_TIME: &str = "----";

static FREQUENCY_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Z0-9]*| ) *([0-9.]*) *kHz *(ALL BROADCAST TIMES|[0-9z-]*) *([A-Z][0-9][A-Z]) *([0-9]*)",
    )
    .expect("valid regex")
});
static TIME_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})z?-(\d{4})").expect("valid regex"));
static TRANSMISSION_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<first>[0-9]{4}|-{4})/(?P<second>[0-9]{4}|-{4}) *(?P<title>.*[A-Za-z0-9)]) *[0-9]{3}/[0-9]{3} *(?P<valid>LATEST|[0-9]{4}|[0-9]{2}/[0-9]{2})[ \t]*(?P<map>[A-Z0-9/]*)",
    )
    .expect("valid regex")
});
// Looser variant for rows without the power and validity columns.
static TRANSMISSION_ROW_FALLBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<first>[0-9]{4}|-{4})/(?P<second>[0-9]{4}|-{4}) *(?P<title>.*[A-Za-z0-9)])( *[0-9]{3}/[0-9]{3})?")
        .expect("valid regex")
});
static MAP_ROW_PAIRED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9A-Z])\. *([0-9A-Z][0-9A-Z, -]*[A-Z])[ \t]*([0-9A-Z]{1,2})\. *([0-9A-Z][0-9A-Z, -]*[0-9A-Z])")
        .expect("valid regex")
});
static MAP_ROW_SINGLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9A-Z])\. *([0-9A-Z][0-9A-Z, -]*)").expect("valid regex"));
static TITLE_REMNANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\d{3}/\d{3}$").expect("valid regex"));
static DATE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Information dated (.*)\)").expect("valid regex"));

fn state_abbreviation(name: &str) -> Option<&'static str> {
    // Extend as further station tables are onboarded.
    match name {
        "ALASKA" => Some("AK"),
        "CALIFORNIA" => Some("CA"),
        "HAWAII" => Some("HI"),
        "LOUISIANA" => Some("LA"),
        "MASSACHUSETTS" => Some("MA"),
        _ => None,
    }
}

/// Title-cases a phrase: the first letter of every alphabetic run is
/// uppercased, the rest lowercased.
fn titlecase(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Forward-only line cursor over one document.
#[derive(Debug)]
struct Cursor<'a> {
    lines: Vec<&'a str>,
    index: usize,
}

impl<'a> Cursor<'a> {
    fn new(document: &'a str) -> Self {
        Self {
            lines: document.lines().map(str::trim_end).collect(),
            index: 0,
        }
    }

    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.index).copied();
        if line.is_some() {
            self.index += 1;
        }
        line
    }

    fn next_nonblank(&mut self) -> Option<&'a str> {
        while let Some(line) = self.next_line() {
            if !line.trim().is_empty() {
                return Some(line);
            }
        }
        None
    }

    /// Advances to the first line satisfying `is_marker` without
    /// consuming it.
    fn skip_to(&mut self, section: &'static str, is_marker: impl Fn(&str) -> bool) -> Result<()> {
        while let Some(line) = self.lines.get(self.index) {
            if is_marker(line) {
                return Ok(());
            }
            self.index += 1;
        }
        Err(Error::MissingSection(section))
    }

    /// Advances past the first line satisfying `is_marker`.
    fn skip_past(&mut self, section: &'static str, is_marker: impl Fn(&str) -> bool) -> Result<()> {
        self.skip_to(section, is_marker)?;
        self.index += 1;
        Ok(())
    }
}

/// `"<CITY>, <STATE NAME>, <COUNTRY>"` into `"<City>, <ST>"`.
fn parse_location(line: &str) -> Result<String> {
    let mut parts = line.split(", ");
    let (Some(city), Some(state)) = (parts.next(), parts.next()) else {
        return Err(Error::MalformedLine(line.to_owned()));
    };
    let abbreviation =
        state_abbreviation(state).ok_or_else(|| Error::UnknownState(state.to_owned()))?;
    Ok(format!("{}, {abbreviation}", titlecase(city)))
}

fn parse_frequency_row(line: &str, caps: &Captures<'_>) -> Result<Frequency> {
    let value = caps[2]
        .parse()
        .map_err(|_| Error::MalformedLine(line.to_owned()))?;
    let mut frequency = Frequency::new(value);
    let callsign = caps[1].trim();
    if !callsign.is_empty() {
        frequency.callsign = Some(callsign.to_owned());
    }
    let times = &caps[3];
    if times != "ALL BROADCAST TIMES" && !times.is_empty() {
        let span = TIME_SPAN
            .captures(times)
            .ok_or_else(|| Error::MalformedLine(line.to_owned()))?;
        let start = parse_hhmm(&span[1]).map_err(Error::InvalidTime)?;
        let end = parse_hhmm(&span[2]).map_err(Error::InvalidTime)?;
        frequency.times.push(TimeRange::new(start, end));
    }
    let code = &caps[4];
    let emission: EmissionType = code
        .parse()
        .map_err(|_| Error::UnknownEmission(code.to_owned()))?;
    frequency.emissions = vec![emission];
    let power = &caps[5];
    if !power.is_empty() {
        frequency.power = Some(
            power
                .parse()
                .map_err(|_| Error::MalformedLine(line.to_owned()))?,
        );
    }
    Ok(frequency)
}

/// Validity column of a transmission row.
enum Validity {
    Unconstrained,
    /// One stamp per schedule time, in row order.
    PerTime([Time; 2]),
    /// A single stamp covering every schedule time of the row.
    All(Time),
}

fn parse_validity(token: &str) -> Result<Validity> {
    if token == "LATEST" {
        return Ok(Validity::Unconstrained);
    }
    if let Some((first, second)) = token.split_once('/') {
        // Hour pairs like "06/18" expand to full stamps.
        let first = parse_hhmm(&format!("{first}00")).map_err(Error::InvalidTime)?;
        let second = parse_hhmm(&format!("{second}00")).map_err(Error::InvalidTime)?;
        return Ok(Validity::PerTime([first, second]));
    }
    let stamp = parse_hhmm(&format!("{token:0>4}")).map_err(Error::InvalidTime)?;
    Ok(Validity::All(stamp))
}

fn clean_title(raw: &str) -> String {
    let stripped = TITLE_REMNANT.replace(raw, "");
    titlecase(stripped.trim())
}

/// A parsed transmission row, with its map-area reference still
/// unresolved.
struct TransmissionRow {
    transmission: Transmission,
    map_ref: Option<String>,
}

fn parse_transmission_row(line: &str) -> Result<TransmissionRow> {
    let (caps, detailed) = match TRANSMISSION_ROW.captures(line) {
        Some(caps) => (caps, true),
        None => (
            TRANSMISSION_ROW_FALLBACK
                .captures(line)
                .ok_or_else(|| Error::MalformedLine(line.to_owned()))?,
            false,
        ),
    };

    let mut times = Vec::new();
    for token in [&caps["first"], &caps["second"]] {
        if token != NO_TIME {
            times.push(TimeList::new(
                parse_hhmm(token).map_err(Error::InvalidTime)?,
            ));
        }
    }

    let mut map_ref = None;
    if detailed {
        match parse_validity(&caps["valid"])? {
            Validity::Unconstrained => {}
            Validity::PerTime(stamps) => {
                for (timelist, stamp) in times.iter_mut().zip(stamps) {
                    timelist.valid = Some(stamp);
                }
            }
            Validity::All(stamp) => {
                for timelist in &mut times {
                    timelist.valid = Some(stamp);
                }
            }
        }
        let reference = &caps["map"];
        if !reference.is_empty() {
            map_ref = Some(reference.to_owned());
        }
    }

    let mut transmission = Transmission::new(clean_title(&caps["title"]));
    transmission.times = times;
    Ok(TransmissionRow {
        transmission,
        map_ref,
    })
}

/// Scans one station document into a station plus its footer date.
fn scan_document(document: &str) -> Result<(Station, Date)> {
    let mut cursor = Cursor::new(document);

    let location_line = cursor
        .next_nonblank()
        .ok_or(Error::MissingSection("location"))?;
    let location = parse_location(location_line)?;

    // Frequency table: rows follow the "CALL SIGN" header until the
    // first row that no longer parses.
    cursor.skip_past("CALL SIGN", |line| line.starts_with("CALL SIGN"))?;
    let mut callsign: Option<String> = None;
    let mut frequencies = Vec::new();
    while let Some(line) = cursor.next_line() {
        let Some(caps) = FREQUENCY_ROW.captures(line) else {
            break;
        };
        let frequency = parse_frequency_row(line, &caps)?;
        if callsign.is_none() {
            callsign.clone_from(&frequency.callsign);
        }
        frequencies.push(frequency);
    }

    // Transmission table: headers vary, but the first data row always
    // starts with a leading zero hour.
    cursor.skip_to("transmission table", |line| line.starts_with('0'))?;
    let mut rows = Vec::new();
    while let Some(line) = cursor.next_line() {
        if line.is_empty() {
            break;
        }
        rows.push(parse_transmission_row(line)?);
    }

    // Map-area table: the marker line and any other non-row lines fail
    // both layout patterns and are skipped.
    cursor.skip_to("MAP", |line| line.starts_with("MAP"))?;
    let mut map_areas = Vec::new();
    while let Some(line) = cursor.next_line() {
        if line.is_empty() {
            break;
        }
        if let Some(caps) = MAP_ROW_PAIRED.captures(line) {
            map_areas.push(MapArea::new(&caps[1], &caps[2]));
            map_areas.push(MapArea::new(&caps[3], &caps[4]));
        } else if let Some(caps) = MAP_ROW_SINGLE.captures(line) {
            map_areas.push(MapArea::new(&caps[1], &caps[2]));
        }
    }

    let date = loop {
        let line = cursor
            .next_line()
            .ok_or(Error::MissingSection("Information dated"))?;
        if let Some(caps) = DATE_LINE.captures(line) {
            break parse_long_date(&caps[1]).map_err(Error::InvalidDate)?;
        }
    };

    let mut station = Station::new(
        callsign.ok_or(Error::MissingField("callsign"))?,
        location,
    );
    station.map_areas = map_areas;
    station.frequencies = frequencies;
    for TransmissionRow {
        mut transmission,
        map_ref,
    } in rows
    {
        if let Some(reference) = map_ref {
            if reference.contains('/') {
                log::warn!(
                    "dropping compound map area reference `{reference}` of `{}`",
                    transmission.title
                );
            } else if station.map_area(&reference).is_some() {
                transmission.map_area = Some(reference);
            } else {
                log::warn!(
                    "dropping unresolved map area reference `{reference}` of `{}`",
                    transmission.title
                );
            }
        }
        station.transmissions.push(transmission);
    }
    Ok((station, date))
}

/// Extracts one combined schedule from any number of station documents.
///
/// The schedule is dated with the latest "Information dated" footer found
/// across all documents. Supplying no documents is an error.
pub fn extract_schedule<'a>(documents: impl IntoIterator<Item = &'a str>) -> Result<Schedule> {
    let mut stations = Vec::new();
    let mut latest: Option<Date> = None;
    for document in documents {
        let (station, date) = scan_document(document)?;
        latest = Some(latest.map_or(date, |seen| seen.max(date)));
        stations.push(station);
    }
    let date = latest.ok_or(Error::MissingField("documents"))?;
    let mut schedule = Schedule::new(SCHEDULE_NAME, date);
    schedule.source_url = Some(SOURCE_URL.to_owned());
    schedule.stations = stations;
    Ok(schedule)
}

///////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////
