// SPDX-FileCopyrightText: Copyright (C) 2024-2026 airwave project contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod radio;
pub mod schedule;
pub mod util;

pub use self::{
    radio::{CyclicWindow, DayOfWeek, EmissionType},
    schedule::{Frequency, MapArea, Schedule, Station, TimeList, TimeRange, Transmission},
};

pub mod prelude {
    // Re-export trait methods from semval
    pub use semval::{IsValid as _, Validate as _};
    pub(crate) use semval::prelude::*;

    pub(crate) use crate::util::clock::*;
}
