// SPDX-FileCopyrightText: Copyright (C) 2024-2026 airwave project contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Naive calendar/time-of-day primitives for bulletin schedules.
//!
//! All times are bulletin-local. Neither time zones nor UTC offsets are
//! modeled; a time-of-day is just a point on a 24-hour dial.

pub use jiff::civil::{Date, Time};

/// Membership test for a time-of-day range that may wrap past midnight.
///
/// Non-wrapping ranges (`start <= end`) use inclusive bounds on both ends.
/// A wrapping range (`end < start`) covers the two half-open dial segments
/// on either side of midnight, again with inclusive bounds.
///
/// This is the single wraparound primitive shared by frequency validity
/// windows and the day-anchored query window.
#[must_use]
pub fn time_of_day_in_range(start: Time, end: Time, at: Time) -> bool {
    if start <= end {
        start <= at && at <= end
    } else {
        at >= start || at <= end
    }
}

/// Parses a bare `HHMM` time token, e.g. `"0230"`.
pub fn parse_hhmm(token: &str) -> Result<Time, jiff::Error> {
    Time::strptime("%H%M", token)
}

/// Parses a long-form month/day/year date, e.g. `"November 20, 2024"`.
pub fn parse_long_date(text: &str) -> Result<Date, jiff::Error> {
    Date::strptime("%B %d, %Y", text)
}

#[cfg(test)]
mod tests;
