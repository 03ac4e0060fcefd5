// SPDX-FileCopyrightText: Copyright (C) 2024-2026 airwave project contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction of broadcast schedules from plain-text bulletins.
//!
//! Two independent pipelines are supported: ARRL code/voice practice
//! bulletins ([`arrl`]) and NWS weather-fax station tables ([`wefax`]).
//! Both consume raw bulletin text and emit one normalized
//! [`Schedule`](airwave_core::Schedule). Extraction is all-or-nothing: any
//! structural defect aborts with an [`enum@Error`] instead of returning a
//! partially populated schedule.

use std::result::Result as StdResult;

use thiserror::Error;

pub mod arrl;
pub mod wefax;

#[derive(Error, Debug)]
pub enum Error {
    /// An expected section marker was never found before the input ended.
    #[error("section `{0}` not found")]
    MissingSection(&'static str),

    /// A required field never appeared anywhere in the bulletin.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A line failed every candidate pattern where a match was required.
    #[error("malformed line: `{0}`")]
    MalformedLine(String),

    #[error("unknown state name `{0}`")]
    UnknownState(String),

    #[error("unknown emission code `{0}`")]
    UnknownEmission(String),

    #[error("unknown day name `{0}`")]
    UnknownDay(String),

    #[error("unknown mode token `{0}`")]
    UnknownMode(String),

    #[error("invalid time: {0}")]
    InvalidTime(#[source] jiff::Error),

    #[error("invalid date: {0}")]
    InvalidDate(#[source] jiff::Error),

    #[error(transparent)]
    Conflict(#[from] airwave_core::schedule::Conflict),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = StdResult<T, Error>;
