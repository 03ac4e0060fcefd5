// SPDX-FileCopyrightText: Copyright (C) 2024-2026 airwave project contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Facade crate that re-exports the workspace members.

pub use airwave_core as core;

#[cfg(feature = "api")]
pub use airwave_core_api as api;

#[cfg(feature = "extract")]
pub use airwave_extract as extract;
