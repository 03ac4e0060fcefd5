// SPDX-FileCopyrightText: Copyright (C) 2024-2026 airwave project contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod query;
