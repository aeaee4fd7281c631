// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Selection core: condition aggregation, tray derivation, notifications and query output.

pub mod condition_set;
pub mod debounce;
pub mod notify;
pub mod query;
pub mod selection;
