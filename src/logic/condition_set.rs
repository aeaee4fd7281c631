// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Active query conditions keyed by field.
//!
//! Fields and their values keep insertion order; removals never reorder what remains.

use indexmap::IndexMap;

use crate::models::condition::{Condition, FieldId};

/// Active `{value -> text}` pairs of one field.
///
/// Never empty while stored in a [`ConditionSet`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveValueSet {
    title: String,
    is_multi: bool,
    entries: IndexMap<String, String>,
}

impl ActiveValueSet {
    fn from_condition(condition: &Condition) -> Self {
        let mut entries = IndexMap::new();
        entries.insert(condition.value.clone(), condition.text.clone());
        Self {
            title: condition.title.clone(),
            is_multi: condition.is_multi,
            entries,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_multi(&self) -> bool {
        self.is_multi
    }

    /// Number of distinct active values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.contains_key(value)
    }

    /// `(value, text)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(v, t)| (v.as_str(), t.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }
}

/// Mapping from field to its active values. A field is present iff it has at least one value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConditionSet {
    fields: IndexMap<FieldId, ActiveValueSet>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff the field has at least one active value.
    pub fn has_field(&self, field: &FieldId) -> bool {
        self.fields.contains_key(field)
    }

    /// True iff the field is active and `value` is among its values.
    pub fn has_item(&self, field: &FieldId, value: &str) -> bool {
        self.fields
            .get(field)
            .is_some_and(|set| set.contains(value))
    }

    pub fn get(&self, field: &FieldId) -> Option<&ActiveValueSet> {
        self.fields.get(field)
    }

    /// Active fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &ActiveValueSet)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Add or replace a value for the condition's field.
    ///
    /// An inactive field, or any non-multi condition, replaces the whole value set while
    /// keeping the field's position. An active multi field gains the value; re-setting a
    /// present value only overwrites its text and leaves the count alone.
    pub fn set_field(&mut self, condition: &Condition) {
        match self.fields.get_mut(&condition.field) {
            Some(set) if condition.is_multi => {
                set.title.clone_from(&condition.title);
                set.entries
                    .insert(condition.value.clone(), condition.text.clone());
            }
            // `insert` on an existing key keeps its slot in the map.
            _ => {
                self.fields.insert(
                    condition.field.clone(),
                    ActiveValueSet::from_condition(condition),
                );
            }
        }
    }

    /// Drop every value of `field`. Returns whether the field was active.
    pub fn remove_whole(&mut self, field: &FieldId) -> bool {
        self.fields.shift_remove(field).is_some()
    }

    /// Remove the condition from its field. Returns true iff the field entry was fully removed.
    ///
    /// With `force_whole`, or for a single-value field, the whole entry goes. Otherwise only
    /// `condition.value` is dropped and the entry goes once its last value is gone. Missing
    /// values are ignored.
    pub fn remove_field(&mut self, condition: &Condition, force_whole: bool) -> bool {
        let is_multi = self
            .fields
            .get(&condition.field)
            .map_or(condition.is_multi, |set| set.is_multi);

        if force_whole || !is_multi {
            self.remove_whole(&condition.field);
            return true;
        }

        let Some(set) = self.fields.get_mut(&condition.field) else {
            return false;
        };
        if set.entries.shift_remove(&condition.value).is_none() {
            return false;
        }
        if set.entries.is_empty() {
            self.fields.shift_remove(&condition.field);
            return true;
        }
        false
    }
}
