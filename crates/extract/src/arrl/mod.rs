// SPDX-FileCopyrightText: Copyright (C) 2024-2026 airwave project contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction of the W1AW code/voice practice schedule from an ARRL
//! bulletin.
//!
//! The bulletin is scanned once, line by line. Each line is tested against
//! the field patterns in a fixed priority order and consumed by the first
//! one that matches. Event lines additionally drive a small state machine
//! that tracks the currently open per-mode time window; the recorded
//! windows and the per-mode frequency tables are combined afterwards.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use airwave_core::{
    radio::{DayOfWeek, EmissionType},
    schedule::{
        Frequency, FrequencyValue, Schedule, Station, TimeList, TimeRange, Transmission,
    },
    util::clock::{parse_hhmm, parse_long_date, Date, Time},
};

use crate::{Error, Result};

pub const SCHEDULE_NAME: &str = "arrl";

/// Bulletin frequency columns are megahertz; the model stores hertz.
const HZ_PER_MHZ: FrequencyValue = 1_000_000.0;

/// Voice transmissions on 7.290 MHz are AM, double-sideband full-carrier,
/// according to the published web schedule as of Nov 2024 — an upstream
/// quirk of this one frequency, not a general rule.
const AM_VOICE_HZ: FrequencyValue = 7_290_000.0;

static CALLSIGN_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^QST de ([0-9A-Z]*)$").expect("valid regex"));
static LOCATION_DATE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z,]* [A-Z]{2}) *([A-Za-z]* [0-9]*, [0-9]*)$").expect("valid regex")
});
static SOURCE_URL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(https?:[^ ]*)").expect("valid regex"));
static FREQUENCY_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<mode>[A-Z]+):(?:\s*-)?\s*(?P<values>[\d\s.\-]*)").expect("valid regex")
});
static RESET_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Schedule:").expect("valid regex"));
static EXIT_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Notes:").expect("valid regex"));
static EVENT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<time>[0-9]{4}) (?:UTC| " ) (?:\([0-9 A-Z:]*\)| *") *(?P<mode>[A-Z]{2,})(?P<suffix>[a-z]?) *(?P<days>.*)"#,
    )
    .expect("valid regex")
});

/// Transmission mode column of the bulletin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Cw,
    Digital,
    Voice,
}

impl Mode {
    const ALL: [Self; 3] = [Self::Cw, Self::Digital, Self::Voice];

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "CW" => Some(Self::Cw),
            "DIGITAL" => Some(Self::Digital),
            "VOICE" => Some(Self::Voice),
            _ => None,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    fn emissions(self) -> &'static [EmissionType] {
        match self {
            Self::Cw => &[EmissionType::A1A],
            Self::Digital => &[EmissionType::F1B, EmissionType::J2B],
            Self::Voice => &[EmissionType::J3E],
        }
    }

    /// Transmission title for a mode plus its event-line suffix.
    fn title(self, suffix: &str) -> Option<&'static str> {
        match (self, suffix) {
            (Self::Cw, "f") => Some("Fast Code"),
            (Self::Cw, "s") => Some("Slow Code"),
            (Self::Cw, "b") => Some("Code Bulletin"),
            (Self::Digital, "") => Some("Digital Bulletin"),
            (Self::Voice, "") => Some("Voice Bulletin"),
            _ => None,
        }
    }
}

/// The per-mode time window currently being accumulated.
#[derive(Debug)]
struct OpenWindow {
    mode: Mode,
    start: Time,
    end: Time,
}

/// Scanner state advanced by [`Scanner::consume`], one line at a time.
#[derive(Debug, Default)]
struct Scanner {
    callsign: Option<String>,
    location: Option<String>,
    date: Option<Date>,
    source_url: Option<String>,
    mode_values: [Vec<FrequencyValue>; 3],
    mode_windows: [Vec<TimeRange>; 3],
    open_window: Option<OpenWindow>,
    transmissions: Vec<Transmission>,
    done: bool,
}

impl Scanner {
    fn consume(&mut self, line: &str) -> Result<()> {
        if self.done {
            return Ok(());
        }
        if let Some(caps) = CALLSIGN_LINE.captures(line) {
            self.callsign = Some(caps[1].to_owned());
            return Ok(());
        }
        if let Some(caps) = LOCATION_DATE_LINE.captures(line) {
            self.location = Some(caps[1].to_owned());
            self.date = Some(parse_long_date(&caps[2]).map_err(Error::InvalidDate)?);
            return Ok(());
        }
        if let Some(caps) = SOURCE_URL_LINE.captures(line) {
            self.source_url = Some(caps[1].to_owned());
            return Ok(());
        }
        if let Some(caps) = FREQUENCY_ROW.captures(line) {
            if let Some(mode) = Mode::from_token(&caps["mode"]) {
                self.mode_values[mode.index()] = parse_frequency_values(line, &caps["values"])?;
                return Ok(());
            }
            log::debug!("ignoring non-mode table row: {line}");
        }
        if RESET_LINE.is_match(line) {
            self.flush_open_window();
            return Ok(());
        }
        if EXIT_LINE.is_match(line) {
            self.flush_open_window();
            self.done = true;
            return Ok(());
        }
        if let Some(caps) = EVENT_LINE.captures(line) {
            self.consume_event(&caps)?;
        }
        Ok(())
    }

    fn consume_event(&mut self, caps: &Captures<'_>) -> Result<()> {
        let at = parse_hhmm(&caps["time"]).map_err(Error::InvalidTime)?;
        let mode_token = &caps["mode"];
        let mode = Mode::from_token(mode_token)
            .ok_or_else(|| Error::UnknownMode(mode_token.to_owned()))?;

        // Same mode extends the open window; a different mode closes it
        // and opens a fresh one.
        match &mut self.open_window {
            Some(open) if open.mode == mode => open.end = at,
            _ => {
                self.flush_open_window();
                self.open_window = Some(OpenWindow {
                    mode,
                    start: at,
                    end: at,
                });
            }
        }

        let suffix = &caps["suffix"];
        let title = mode
            .title(suffix)
            .ok_or_else(|| Error::UnknownMode(format!("{mode_token}{suffix}")))?;
        let mut transmission = Transmission::new(title);
        transmission.emissions = mode.emissions().to_vec();
        if let Some(days) = parse_days(caps["days"].trim())? {
            transmission.days = days;
        }
        transmission.times.push(TimeList::new(at));
        self.transmissions.push(transmission);
        Ok(())
    }

    fn flush_open_window(&mut self) {
        if let Some(OpenWindow { mode, start, end }) = self.open_window.take() {
            self.mode_windows[mode.index()].push(TimeRange::new(start, end));
        }
    }

    fn finish(self) -> Result<Schedule> {
        let Self {
            callsign,
            location,
            date,
            source_url,
            mode_values,
            mode_windows,
            transmissions,
            ..
        } = self;
        let callsign = callsign.ok_or(Error::MissingField("callsign"))?;
        let location = location.ok_or(Error::MissingField("location"))?;
        let date = date.ok_or(Error::MissingField("date"))?;

        let mut frequencies = merge_by_value(cross_join(&mode_values, &mode_windows));
        for frequency in &mut frequencies {
            if frequency.value == AM_VOICE_HZ {
                frequency.emissions = vec![EmissionType::A3E];
            }
        }

        let mut station = Station::new(callsign, location);
        station.frequencies = frequencies;
        station.transmissions = transmissions;

        let mut schedule = Schedule::new(SCHEDULE_NAME, date);
        schedule.source_url = source_url;
        schedule.stations.push(station);
        Ok(schedule)
    }
}

fn parse_frequency_values(line: &str, values: &str) -> Result<Vec<FrequencyValue>> {
    let mut parsed = Vec::new();
    for token in values.split_whitespace() {
        // A literal "-" marks an empty table cell.
        if token == "-" {
            continue;
        }
        let megahertz: FrequencyValue = token
            .parse()
            .map_err(|_| Error::MalformedLine(line.to_owned()))?;
        parsed.push(megahertz * HZ_PER_MHZ);
    }
    Ok(parsed)
}

fn parse_days(token: &str) -> Result<Option<Vec<DayOfWeek>>> {
    // Unspecified: the model default (all seven days) applies.
    if token.is_empty() {
        return Ok(None);
    }
    if token == "Daily" {
        return Ok(Some(vec![
            DayOfWeek::Mon,
            DayOfWeek::Tue,
            DayOfWeek::Wed,
            DayOfWeek::Thu,
            DayOfWeek::Fri,
        ]));
    }
    token
        .split(", ")
        .map(|day| {
            day.parse()
                .map_err(|_| Error::UnknownDay(day.to_owned()))
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Per-mode cross-join: every frequency value recorded for a mode receives
/// every time window recorded for that mode.
fn cross_join(
    mode_values: &[Vec<FrequencyValue>; 3],
    mode_windows: &[Vec<TimeRange>; 3],
) -> Vec<(FrequencyValue, Vec<TimeRange>)> {
    let mut joined = Vec::new();
    for mode in Mode::ALL {
        for &value in &mode_values[mode.index()] {
            joined.push((value, mode_windows[mode.index()].clone()));
        }
    }
    joined
}

/// Merges cross-joined entries by numeric value: a value recorded under
/// several modes accumulates the union of all their windows. First-seen
/// order is preserved.
fn merge_by_value(joined: Vec<(FrequencyValue, Vec<TimeRange>)>) -> Vec<Frequency> {
    let mut merged: Vec<Frequency> = Vec::new();
    for (value, windows) in joined {
        if let Some(existing) = merged.iter_mut().find(|f| f.value == value) {
            existing.times.extend(windows);
        } else {
            let mut frequency = Frequency::new(value);
            frequency.times = windows;
            merged.push(frequency);
        }
    }
    merged
}

/// Extracts the single-station schedule from one ARRL bulletin text.
///
/// Extraction fails outright on any malformed structure; no partial
/// schedule is returned.
pub fn extract_schedule(bulletin: &str) -> Result<Schedule> {
    let mut scanner = Scanner::default();
    for line in bulletin.lines() {
        scanner.consume(line.trim())?;
    }
    scanner.finish()
}

///////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests;
