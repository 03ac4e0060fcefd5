// SPDX-FileCopyrightText: Copyright (C) 2024-2026 airwave project contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Broadcast primitives: days of week, emission designators, and the
//! day-anchored cyclic time window.

use crate::util::clock::{time_of_day_in_range, Time};

/// Day of week in the fixed broadcast-schedule order `Sun..Sat`.
///
/// The `Ord` impl follows the declaration order, which is the sort order
/// of query results.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayOfWeek {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl DayOfWeek {
    /// The cyclic successor, wrapping `Sat` back to `Sun`.
    #[must_use]
    pub const fn next(self) -> Self {
        use DayOfWeek::*;
        match self {
            Sun => Mon,
            Mon => Tue,
            Tue => Wed,
            Wed => Thu,
            Thu => Fri,
            Fri => Sat,
            Sat => Sun,
        }
    }
}

/// ITU emission designator of a transmission's modulation/mode.
///
/// Closed set: parsing any other code fails instead of being coerced.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EmissionType {
    /// CW (Morse telegraphy)
    A1A,

    /// AM speech, double-sideband full-carrier
    A3E,

    /// FSK (RTTY)
    F1B,

    /// PSK (PSK31)
    J2B,

    /// Facsimile (weather fax)
    J3C,

    /// SSB speech
    J3E,
}

/// A contiguous interval anchored to the day of week its interval begins on.
///
/// `end < start` means the interval spans midnight into the following day.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CyclicWindow {
    pub day: DayOfWeek,
    pub start: Time,
    pub end: Time,
}

impl CyclicWindow {
    #[must_use]
    pub const fn new(day: DayOfWeek, start: Time, end: Time) -> Self {
        Self { day, start, end }
    }

    /// Whether the given day/time instant falls within this window.
    ///
    /// A wrapping window matches on the anchor day from `start` onwards
    /// and on the following day up to `end`. Bounds are inclusive.
    #[must_use]
    pub fn in_range(&self, day: DayOfWeek, at: Time) -> bool {
        let Self { day: anchor, start, end } = *self;
        if start <= end {
            day == anchor && time_of_day_in_range(start, end, at)
        } else {
            (day == anchor && at >= start) || (day == anchor.next() && at <= end)
        }
    }
}

///////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////
