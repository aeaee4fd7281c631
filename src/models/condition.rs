// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Atomic query conditions produced by field handlers.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a filterable field; unique across one panel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One atomic user choice for a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Condition {
    pub field: FieldId,
    /// Display label of the field.
    pub title: String,
    /// Machine value; for multi-value fields a single item's value.
    pub value: String,
    /// Human label paired with `value`.
    pub text: String,
    pub is_multi: bool,
}

impl Condition {
    /// Condition for a single-value field (text, number, date, single-select).
    pub fn single(
        field: impl Into<FieldId>,
        title: impl Into<String>,
        value: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            title: title.into(),
            value: value.into(),
            text: text.into(),
            is_multi: false,
        }
    }

    /// Condition for one item of a multi-select field.
    pub fn multi(
        field: impl Into<FieldId>,
        title: impl Into<String>,
        value: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            is_multi: true,
            ..Self::single(field, title, value, text)
        }
    }
}

/// Desired state of a multi-select item, decided by the field handler before calling the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}
