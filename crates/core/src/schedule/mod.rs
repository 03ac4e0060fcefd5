// SPDX-FileCopyrightText: Copyright (C) 2024-2026 airwave project contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The normalized broadcast schedule model.
//!
//! Entities own their children directly (`Schedule` → `Station` →
//! `Frequency`/`Transmission`/`MapArea`); cross-references within a station
//! are expressed as plain ident lookups instead of ownership cycles.
//! Uniqueness and referential invariants are enforced by the checked
//! mutation operations, which report violations as named [`Conflict`]
//! values. Bulletin extractors build transient instances and may populate
//! the child collections directly.

use strum::IntoEnumIterator as _;
use thiserror::Error;

use crate::{
    prelude::*,
    radio::{DayOfWeek, EmissionType},
    util::clock::{Date, Time},
};

/// Frequency value in hertz.
pub type FrequencyValue = f64;

/// Transmit power in watts.
pub type PowerValue = f64;

/// A named uniqueness or referential violation of the schedule model.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Conflict {
    #[error("duplicate station callsign `{0}`")]
    StationCallsign(String),

    #[error("duplicate frequency value {0}")]
    FrequencyValue(FrequencyValue),

    #[error("duplicate transmission title `{0}`")]
    TransmissionTitle(String),

    #[error("duplicate map area ident `{0}`")]
    MapAreaIdent(String),

    #[error("map area `{0}` does not belong to this station")]
    ForeignMapArea(String),

    #[error("map area `{0}` is still referenced by a transmission")]
    MapAreaInUse(String),

    #[error("map area `{0}` not found")]
    MapAreaNotFound(String),
}

/// One published schedule, identified by its (name, date) pair.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    pub name: String,

    /// Publication date as stated by the bulletin.
    pub date: Date,

    #[cfg_attr(feature = "serde", serde(default))]
    pub source_url: Option<String>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub stations: Vec<Station>,
}

impl Schedule {
    #[must_use]
    pub fn new(name: impl Into<String>, date: Date) -> Self {
        Self {
            name: name.into(),
            date,
            source_url: None,
            stations: Vec::new(),
        }
    }

    /// Adds a station, rejecting a duplicate callsign within this schedule.
    pub fn add_station(&mut self, station: Station) -> Result<(), Conflict> {
        if self.stations.iter().any(|s| s.callsign == station.callsign) {
            return Err(Conflict::StationCallsign(station.callsign));
        }
        self.stations.push(station);
        Ok(())
    }
}

/// A transmitting station within one schedule.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    pub callsign: String,
    pub location: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub region: Option<String>,

    /// Default emissions, used when neither a transmission nor an active
    /// frequency declares more specific ones.
    #[cfg_attr(feature = "serde", serde(default))]
    pub emissions: Vec<EmissionType>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub frequencies: Vec<Frequency>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub transmissions: Vec<Transmission>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub map_areas: Vec<MapArea>,
}

impl Station {
    #[must_use]
    pub fn new(callsign: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            callsign: callsign.into(),
            location: location.into(),
            region: None,
            emissions: Vec::new(),
            frequencies: Vec::new(),
            transmissions: Vec::new(),
            map_areas: Vec::new(),
        }
    }

    /// Adds a frequency, rejecting a duplicate value within this station.
    pub fn add_frequency(&mut self, frequency: Frequency) -> Result<(), Conflict> {
        if self.frequencies.iter().any(|f| f.value == frequency.value) {
            return Err(Conflict::FrequencyValue(frequency.value));
        }
        self.frequencies.push(frequency);
        Ok(())
    }

    /// Adds a transmission, rejecting a duplicate title and any map area
    /// reference that does not resolve within this station.
    pub fn add_transmission(&mut self, transmission: Transmission) -> Result<(), Conflict> {
        if self
            .transmissions
            .iter()
            .any(|t| t.title == transmission.title)
        {
            return Err(Conflict::TransmissionTitle(transmission.title));
        }
        if let Some(ident) = &transmission.map_area {
            if self.map_area(ident).is_none() {
                return Err(Conflict::ForeignMapArea(ident.clone()));
            }
        }
        self.transmissions.push(transmission);
        Ok(())
    }

    /// Adds a map area, rejecting a duplicate ident within this station.
    pub fn add_map_area(&mut self, map_area: MapArea) -> Result<(), Conflict> {
        if self.map_areas.iter().any(|m| m.ident == map_area.ident) {
            return Err(Conflict::MapAreaIdent(map_area.ident));
        }
        self.map_areas.push(map_area);
        Ok(())
    }

    /// Removes a map area by ident.
    ///
    /// Fails while any transmission still references the ident; the map
    /// area and the referencing transmissions are left unchanged.
    pub fn remove_map_area(&mut self, ident: &str) -> Result<MapArea, Conflict> {
        let index = self
            .map_areas
            .iter()
            .position(|m| m.ident == ident)
            .ok_or_else(|| Conflict::MapAreaNotFound(ident.to_owned()))?;
        if self
            .transmissions
            .iter()
            .any(|t| t.map_area.as_deref() == Some(ident))
        {
            return Err(Conflict::MapAreaInUse(ident.to_owned()));
        }
        Ok(self.map_areas.remove(index))
    }

    #[must_use]
    pub fn map_area(&self, ident: &str) -> Option<&MapArea> {
        self.map_areas.iter().find(|m| m.ident == ident)
    }

    /// All frequencies of this station that are active at the given
    /// time-of-day, irrespective of the day of week.
    #[must_use]
    pub fn active_frequencies_at(&self, at: Time) -> Vec<&Frequency> {
        self.frequencies
            .iter()
            .filter(|frequency| frequency.is_active_at(at))
            .collect()
    }
}

/// A frequency assignment of a station.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frequency {
    pub value: FrequencyValue,

    /// Callsign override for this frequency, if it differs from the
    /// station default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub callsign: Option<String>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub emissions: Vec<EmissionType>,

    /// Validity windows. An empty set means "always active".
    #[cfg_attr(feature = "serde", serde(default))]
    pub times: Vec<TimeRange>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub power: Option<PowerValue>,
}

impl Frequency {
    #[must_use]
    pub fn new(value: FrequencyValue) -> Self {
        Self {
            value,
            callsign: None,
            emissions: Vec::new(),
            times: Vec::new(),
            power: None,
        }
    }

    #[must_use]
    pub fn is_active_at(&self, at: Time) -> bool {
        self.times.is_empty() || self.times.iter().any(|range| range.contains(at))
    }
}

/// A time-of-day validity window of a frequency.
///
/// `end < start` means the window spans midnight.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeRange {
    pub start: Time,
    pub end: Time,
}

impl TimeRange {
    #[must_use]
    pub const fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Day-agnostic membership with the shared midnight wrap rule.
    #[must_use]
    pub fn contains(&self, at: Time) -> bool {
        time_of_day_in_range(self.start, self.end, at)
    }
}

fn all_days() -> Vec<DayOfWeek> {
    DayOfWeek::iter().collect()
}

/// A recurring broadcast of a station.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transmission {
    pub title: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub times: Vec<TimeList>,

    /// Overrides the station default emissions when non-empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub emissions: Vec<EmissionType>,

    /// Days on which the broadcast occurs; defaults to all seven.
    #[cfg_attr(feature = "serde", serde(default = "all_days"))]
    pub days: Vec<DayOfWeek>,

    /// Ident of a [`MapArea`] belonging to the same station.
    #[cfg_attr(feature = "serde", serde(default))]
    pub map_area: Option<String>,
}

impl Transmission {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            times: Vec::new(),
            emissions: Vec::new(),
            days: all_days(),
            map_area: None,
        }
    }
}

/// One scheduled slot of a transmission.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeList {
    /// Scheduled start.
    pub initial: Time,

    #[cfg_attr(feature = "serde", serde(default))]
    pub rebroadcast: Option<Time>,

    /// Upper bound on when the listing applies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub valid: Option<Time>,
}

impl TimeList {
    #[must_use]
    pub const fn new(initial: Time) -> Self {
        Self {
            initial,
            rebroadcast: None,
            valid: None,
        }
    }
}

/// A geographic coverage region of a weather-fax station.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapArea {
    pub ident: String,
    pub description: String,
}

impl MapArea {
    #[must_use]
    pub fn new(ident: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            description: description.into(),
        }
    }
}

///////////////////////////////////////////////////////////////////////
// Validation
///////////////////////////////////////////////////////////////////////

#[derive(Copy, Clone, Debug)]
pub enum ScheduleInvalidity {
    NameEmpty,
    Station(usize, StationInvalidity),
}

impl Validate for Schedule {
    type Invalidity = ScheduleInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self { name, stations, .. } = self;
        let context = ValidationContext::new()
            .invalidate_if(name.trim().is_empty(), Self::Invalidity::NameEmpty);
        stations
            .iter()
            .enumerate()
            .fold(context, |context, (index, station)| {
                context.validate_with(station, |invalidity| {
                    Self::Invalidity::Station(index, invalidity)
                })
            })
            .into()
    }
}

#[derive(Copy, Clone, Debug)]
pub enum StationInvalidity {
    CallsignEmpty,
    LocationEmpty,
    RegionEmpty,
    Frequency(usize, FrequencyInvalidity),
    Transmission(usize, TransmissionInvalidity),
    MapArea(usize, MapAreaInvalidity),
}

impl Validate for Station {
    type Invalidity = StationInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            callsign,
            location,
            region,
            frequencies,
            transmissions,
            map_areas,
            emissions: _,
        } = self;
        let context = ValidationContext::new()
            .invalidate_if(callsign.trim().is_empty(), Self::Invalidity::CallsignEmpty)
            .invalidate_if(location.trim().is_empty(), Self::Invalidity::LocationEmpty)
            .invalidate_if(
                region.as_ref().is_some_and(|region| region.trim().is_empty()),
                Self::Invalidity::RegionEmpty,
            );
        let context = frequencies
            .iter()
            .enumerate()
            .fold(context, |context, (index, frequency)| {
                context.validate_with(frequency, |invalidity| {
                    Self::Invalidity::Frequency(index, invalidity)
                })
            });
        let context = transmissions
            .iter()
            .enumerate()
            .fold(context, |context, (index, transmission)| {
                context.validate_with(transmission, |invalidity| {
                    Self::Invalidity::Transmission(index, invalidity)
                })
            });
        map_areas
            .iter()
            .enumerate()
            .fold(context, |context, (index, map_area)| {
                context.validate_with(map_area, |invalidity| {
                    Self::Invalidity::MapArea(index, invalidity)
                })
            })
            .into()
    }
}

#[derive(Copy, Clone, Debug)]
pub enum FrequencyInvalidity {
    ValueOutOfRange,
    CallsignEmpty,
    PowerOutOfRange,
}

impl Validate for Frequency {
    type Invalidity = FrequencyInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            value,
            callsign,
            power,
            ..
        } = self;
        ValidationContext::new()
            .invalidate_if(
                !value.is_finite() || *value <= 0.0,
                Self::Invalidity::ValueOutOfRange,
            )
            .invalidate_if(
                callsign
                    .as_ref()
                    .is_some_and(|callsign| callsign.trim().is_empty()),
                Self::Invalidity::CallsignEmpty,
            )
            .invalidate_if(
                power.is_some_and(|power| !power.is_finite() || power <= 0.0),
                Self::Invalidity::PowerOutOfRange,
            )
            .into()
    }
}

#[derive(Copy, Clone, Debug)]
pub enum TransmissionInvalidity {
    TitleEmpty,
    DaysEmpty,
    MapAreaIdentEmpty,
}

impl Validate for Transmission {
    type Invalidity = TransmissionInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            title,
            days,
            map_area,
            ..
        } = self;
        ValidationContext::new()
            .invalidate_if(title.trim().is_empty(), Self::Invalidity::TitleEmpty)
            .invalidate_if(days.is_empty(), Self::Invalidity::DaysEmpty)
            .invalidate_if(
                map_area
                    .as_ref()
                    .is_some_and(|ident| ident.trim().is_empty()),
                Self::Invalidity::MapAreaIdentEmpty,
            )
            .into()
    }
}

#[derive(Copy, Clone, Debug)]
pub enum MapAreaInvalidity {
    IdentEmpty,
    DescriptionEmpty,
}

impl Validate for MapArea {
    type Invalidity = MapAreaInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self { ident, description } = self;
        ValidationContext::new()
            .invalidate_if(ident.trim().is_empty(), Self::Invalidity::IdentEmpty)
            .invalidate_if(
                description.trim().is_empty(),
                Self::Invalidity::DescriptionEmpty,
            )
            .into()
    }
}

///////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////
