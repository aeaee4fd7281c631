// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: pure data types shared between the field handlers and the selection core.

pub mod condition;
pub mod field_def;
