// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Faceted filter/search panel.
//!
//! Field handlers turn user gestures into [`models::condition::Condition`]s; the
//! [`logic::selection::SelectionController`] merges them into one consistent set of active
//! conditions, keeps the "selected conditions" tray in sync and notifies handlers when a
//! field is cleared.

pub mod app;
pub mod config;
pub mod logic;
pub mod models;
pub mod mvu;
pub mod ui;
