// SPDX-FileCopyrightText: Copyright (C) 2024-2026 airwave project contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use jiff::civil::{date, time};

use super::*;

#[test]
fn in_range_inclusive_bounds() {
    let start = time(8, 0, 0, 0);
    let end = time(18, 0, 0, 0);
    assert!(time_of_day_in_range(start, end, start));
    assert!(time_of_day_in_range(start, end, end));
    assert!(time_of_day_in_range(start, end, time(12, 0, 0, 0)));
    assert!(!time_of_day_in_range(start, end, time(7, 59, 0, 0)));
    assert!(!time_of_day_in_range(start, end, time(18, 1, 0, 0)));
}

#[test]
fn in_range_wraps_midnight() {
    let start = time(22, 0, 0, 0);
    let end = time(6, 0, 0, 0);
    assert!(time_of_day_in_range(start, end, start));
    assert!(time_of_day_in_range(start, end, end));
    assert!(time_of_day_in_range(start, end, time(23, 0, 0, 0)));
    assert!(time_of_day_in_range(start, end, time(5, 0, 0, 0)));
    // Midpoint of the uncovered segment
    assert!(!time_of_day_in_range(start, end, time(14, 0, 0, 0)));
}

#[test]
fn in_range_single_instant() {
    let at = time(0, 0, 0, 0);
    assert!(time_of_day_in_range(at, at, at));
    assert!(!time_of_day_in_range(at, at, time(0, 1, 0, 0)));
}

#[test]
fn parse_hhmm_token() {
    assert_eq!(parse_hhmm("0000").unwrap(), time(0, 0, 0, 0));
    assert_eq!(parse_hhmm("2359").unwrap(), time(23, 59, 0, 0));
    assert!(parse_hhmm("2400").is_err());
    assert!(parse_hhmm("garbage").is_err());
}

#[test]
fn parse_long_date_text() {
    assert_eq!(
        parse_long_date("November 20, 2024").unwrap(),
        date(2024, 11, 20)
    );
    assert_eq!(parse_long_date("July 1, 2024").unwrap(), date(2024, 7, 1));
    assert!(parse_long_date("Smarch 1, 2024").is_err());
}
