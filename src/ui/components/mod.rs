// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Field handlers and panel widgets structured for MVU-style updates.

pub mod date_field;
pub mod enum_field;
pub mod field_panel;
pub mod number_field;
pub mod selected_tray;
pub mod text_field;
