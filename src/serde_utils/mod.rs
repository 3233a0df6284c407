// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Helpers for skipping default values when serializing.
mod defaults;

/// Macros for string wrapper tuples.
mod tuples;

/// Visitors for loosely typed provider payloads.
mod visitors;

pub use self::defaults::*;
pub use self::visitors::*;
