// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Selection controller: the only writer of a panel's active conditions.
//!
//! [`ConditionSet`] is the single source of truth. The "selected conditions" list is a
//! cache rebuilt by [`derive_display`] inside every mutating operation, so the two views
//! cannot diverge.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::logic::condition_set::ConditionSet;
use crate::logic::notify::{FieldCleared, FieldClearedListeners};
use crate::logic::query::{QueryCondition, build_query};
use crate::models::condition::{Condition, FieldId, Toggle};
use crate::models::field_def::FieldDef;

/// One row of the "selected conditions" tray.
///
/// Multi-value fields carry their items in `value_array`/`text_array`; `value`/`text` are
/// the comma-joined projections in selection order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayEntry {
    pub field: FieldId,
    pub title: String,
    pub text: String,
    pub value: String,
    pub value_array: Option<Vec<String>>,
    pub text_array: Option<Vec<String>>,
}

/// What an operation did to the panel state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    /// The field became active.
    Added,
    /// An active field changed value(s).
    Updated,
    /// One value of a multi field was removed; the field stays active.
    ItemRemoved,
    /// The field is no longer active.
    Cleared,
    /// Nothing to do (stale or unknown reference).
    Unchanged,
}

/// Contract violations rejected by the controller. State is untouched when returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error(
        "field `{field}` has inconsistent multi-value flag (established: {established}, requested: {requested})"
    )]
    InconsistentMultiFlag {
        field: FieldId,
        established: bool,
        requested: bool,
    },
}

/// Project the condition set onto tray rows, one per active field, in field order.
pub fn derive_display(set: &ConditionSet) -> Vec<DisplayEntry> {
    set.iter()
        .map(|(field, active)| {
            let values: Vec<String> = active.values().map(str::to_string).collect();
            let texts: Vec<String> = active.texts().map(str::to_string).collect();
            if active.is_multi() {
                DisplayEntry {
                    field: field.clone(),
                    title: active.title().to_string(),
                    text: texts.join(","),
                    value: values.join(","),
                    value_array: Some(values),
                    text_array: Some(texts),
                }
            } else {
                DisplayEntry {
                    field: field.clone(),
                    title: active.title().to_string(),
                    text: texts.concat(),
                    value: values.concat(),
                    value_array: None,
                    text_array: None,
                }
            }
        })
        .collect()
}

/// Mediates between field handlers and the active condition set for one panel session.
#[derive(Debug, Default)]
pub struct SelectionController {
    conditions: ConditionSet,
    display: Vec<DisplayEntry>,
    multi_flags: HashMap<FieldId, bool>,
    listeners: FieldClearedListeners,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller whose fields' multi-ness is fixed by their definitions.
    pub fn with_fields(defs: &[FieldDef]) -> Self {
        let mut controller = Self::new();
        controller.register_fields(defs);
        controller
    }

    pub fn register_fields(&mut self, defs: &[FieldDef]) {
        for def in defs {
            self.multi_flags.insert(def.field.clone(), def.is_multi);
        }
    }

    /// Start a new session with a new set of fields. Clears without notifying.
    pub fn reset_fields(&mut self, defs: &[FieldDef]) {
        self.conditions.clear();
        self.display.clear();
        self.multi_flags.clear();
        self.register_fields(defs);
    }

    pub fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    pub fn display_entries(&self) -> &[DisplayEntry] {
        &self.display
    }

    pub fn listeners_mut(&mut self) -> &mut FieldClearedListeners {
        &mut self.listeners
    }

    pub fn query(&self) -> Vec<QueryCondition> {
        build_query(&self.conditions)
    }

    /// Set the value of a single-value field, keeping its tray position when already active.
    pub fn apply_single(&mut self, condition: Condition) -> Result<Change, SelectionError> {
        self.ensure_multi_flag(&condition, false)?;

        let change = if self.conditions.has_field(&condition.field) {
            Change::Updated
        } else {
            Change::Added
        };
        self.conditions.set_field(&condition);
        self.refresh();
        debug!(
            field = %condition.field,
            value = %condition.value,
            ?change,
            entries = ?self.display,
            "applied single condition"
        );
        Ok(change)
    }

    /// Fully clear a field. Notifies listeners when the field was active.
    pub fn retract(&mut self, field: &FieldId) -> Change {
        if !self.conditions.remove_whole(field) {
            debug!(%field, "retract on inactive field ignored");
            return Change::Unchanged;
        }
        self.refresh();
        self.notify_cleared(field);
        Change::Cleared
    }

    /// Add or remove one item of a multi-select field.
    ///
    /// `toggle` is the state the caller already decided for the item; the rendered item
    /// index stays with the caller.
    pub fn toggle_multi_item(
        &mut self,
        condition: Condition,
        toggle: Toggle,
    ) -> Result<Change, SelectionError> {
        self.ensure_multi_flag(&condition, true)?;

        let change = match toggle {
            Toggle::On => {
                let change = if self.conditions.has_field(&condition.field) {
                    Change::Updated
                } else {
                    Change::Added
                };
                self.conditions.set_field(&condition);
                self.refresh();
                change
            }
            Toggle::Off => {
                if !self.conditions.has_item(&condition.field, &condition.value) {
                    debug!(
                        field = %condition.field,
                        value = %condition.value,
                        "toggle off for inactive item ignored"
                    );
                    return Ok(Change::Unchanged);
                }
                let cleared = self.conditions.remove_field(&condition, false);
                self.refresh();
                if cleared {
                    self.notify_cleared(&condition.field);
                    Change::Cleared
                } else {
                    Change::ItemRemoved
                }
            }
        };

        debug!(
            field = %condition.field,
            value = %condition.value,
            ?toggle,
            ?change,
            entries = ?self.display,
            "toggled multi item"
        );
        Ok(change)
    }

    /// Remove the tray row at `index` outright, whatever the field's multi-ness.
    pub fn remove_by_index(&mut self, index: usize) -> Change {
        let Some(entry) = self.display.get(index) else {
            debug!(index, rows = self.display.len(), "tray index out of range");
            return Change::Unchanged;
        };
        let field = entry.field.clone();
        self.conditions.remove_whole(&field);
        self.refresh();
        self.notify_cleared(&field);
        Change::Cleared
    }

    fn established_multi(&self, field: &FieldId) -> Option<bool> {
        self.multi_flags
            .get(field)
            .copied()
            .or_else(|| self.conditions.get(field).map(|set| set.is_multi()))
    }

    fn ensure_multi_flag(
        &self,
        condition: &Condition,
        multi_path: bool,
    ) -> Result<(), SelectionError> {
        let established = self
            .established_multi(&condition.field)
            .unwrap_or(multi_path);
        if condition.is_multi == multi_path && established == multi_path {
            return Ok(());
        }
        warn!(
            field = %condition.field,
            established,
            requested = condition.is_multi,
            "rejected condition with inconsistent multi-value flag"
        );
        Err(SelectionError::InconsistentMultiFlag {
            field: condition.field.clone(),
            established,
            requested: condition.is_multi,
        })
    }

    fn refresh(&mut self) {
        self.display = derive_display(&self.conditions);
    }

    fn notify_cleared(&mut self, field: &FieldId) {
        let delivered = self.listeners.notify(&FieldCleared {
            field: field.clone(),
        });
        debug!(%field, delivered, entries = ?self.display, "field cleared");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::models::field_def::FieldKind;

    fn red() -> Condition {
        Condition::multi("color", "Color", "red", "Red")
    }

    fn blue() -> Condition {
        Condition::multi("color", "Color", "blue", "Blue")
    }

    fn green() -> Condition {
        Condition::multi("color", "Color", "green", "Green")
    }

    /// Record every field-cleared notification for `field`.
    fn watch(controller: &mut SelectionController, field: &str) -> Rc<RefCell<Vec<FieldId>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        controller
            .listeners_mut()
            .subscribe(FieldId::from(field), move |ev| {
                sink.borrow_mut().push(ev.field.clone())
            });
        seen
    }

    fn assert_in_sync(controller: &SelectionController) {
        let entries = controller.display_entries();
        assert_eq!(entries.len(), controller.conditions().len());
        for entry in entries {
            assert!(controller.conditions().has_field(&entry.field));
        }
        for (field, _) in controller.conditions().iter() {
            assert!(entries.iter().any(|e| &e.field == field));
        }
    }

    #[test]
    fn repeated_single_applies_keep_one_entry_with_last_value() {
        let mut ctrl = SelectionController::new();
        for value in ["a", "b", "c"] {
            ctrl.apply_single(Condition::single("name", "Name", value, value))
                .unwrap();
        }

        assert_eq!(ctrl.display_entries().len(), 1);
        let entry = &ctrl.display_entries()[0];
        assert_eq!(entry.value, "c");
        assert_eq!(entry.text, "c");
        assert!(entry.value_array.is_none());
        assert_eq!(ctrl.conditions().get(&FieldId::from("name")).unwrap().len(), 1);
        assert_in_sync(&ctrl);
    }

    #[test]
    fn single_update_keeps_tray_position() {
        let mut ctrl = SelectionController::new();
        ctrl.apply_single(Condition::single("a", "A", "1", "1")).unwrap();
        ctrl.apply_single(Condition::single("b", "B", "1", "1")).unwrap();
        let change = ctrl
            .apply_single(Condition::single("a", "A", "2", "two"))
            .unwrap();

        assert_eq!(change, Change::Updated);
        let fields: Vec<_> = ctrl
            .display_entries()
            .iter()
            .map(|e| e.field.as_str())
            .collect();
        assert_eq!(fields, vec!["a", "b"]);
        assert_eq!(ctrl.display_entries()[0].text, "two");
    }

    #[test]
    fn multi_values_join_in_insertion_order() {
        let mut ctrl = SelectionController::new();
        ctrl.toggle_multi_item(red(), Toggle::On).unwrap();
        ctrl.toggle_multi_item(blue(), Toggle::On).unwrap();
        ctrl.toggle_multi_item(green(), Toggle::On).unwrap();

        let entry = &ctrl.display_entries()[0];
        assert_eq!(
            entry.value_array.as_deref(),
            Some(&["red".to_string(), "blue".into(), "green".into()][..])
        );
        assert_eq!(entry.value, "red,blue,green");

        ctrl.toggle_multi_item(blue(), Toggle::Off).unwrap();
        let entry = &ctrl.display_entries()[0];
        assert_eq!(
            entry.value_array.as_deref(),
            Some(&["red".to_string(), "green".into()][..])
        );
        assert_eq!(entry.value, "red,green");
        assert_eq!(entry.text, "Red,Green");
        assert_in_sync(&ctrl);
    }

    #[test]
    fn toggle_round_trip_restores_previous_state() {
        let mut ctrl = SelectionController::new();
        let seen = watch(&mut ctrl, "color");
        ctrl.toggle_multi_item(red(), Toggle::On).unwrap();
        let before_entries = ctrl.display_entries().to_vec();
        let before_set = ctrl.conditions().clone();

        ctrl.toggle_multi_item(blue(), Toggle::On).unwrap();
        assert_eq!(
            ctrl.toggle_multi_item(blue(), Toggle::Off).unwrap(),
            Change::ItemRemoved
        );

        assert_eq!(ctrl.display_entries(), before_entries.as_slice());
        assert_eq!(ctrl.conditions(), &before_set);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn color_scenario_notifies_only_on_last_removal() {
        let mut ctrl = SelectionController::new();
        let seen = watch(&mut ctrl, "color");
        let field = FieldId::from("color");

        ctrl.toggle_multi_item(red(), Toggle::On).unwrap();
        ctrl.toggle_multi_item(blue(), Toggle::On).unwrap();
        assert_eq!(ctrl.display_entries()[0].text, "Red,Blue");

        ctrl.toggle_multi_item(red(), Toggle::Off).unwrap();
        assert_eq!(ctrl.display_entries()[0].text, "Blue");
        assert!(ctrl.conditions().has_field(&field));
        assert!(seen.borrow().is_empty());

        let change = ctrl.toggle_multi_item(blue(), Toggle::Off).unwrap();
        assert_eq!(change, Change::Cleared);
        assert!(!ctrl.conditions().has_field(&field));
        assert!(ctrl.display_entries().is_empty());
        assert_eq!(*seen.borrow(), vec![field]);
    }

    #[test]
    fn remove_by_index_clears_whole_multi_field_once() {
        let mut ctrl = SelectionController::new();
        let seen = watch(&mut ctrl, "color");
        ctrl.apply_single(Condition::single("name", "Name", "x", "x"))
            .unwrap();
        ctrl.toggle_multi_item(red(), Toggle::On).unwrap();
        ctrl.toggle_multi_item(blue(), Toggle::On).unwrap();
        ctrl.toggle_multi_item(green(), Toggle::On).unwrap();

        assert_eq!(ctrl.remove_by_index(1), Change::Cleared);

        assert_eq!(seen.borrow().len(), 1);
        assert!(!ctrl.conditions().has_field(&FieldId::from("color")));
        assert_eq!(ctrl.display_entries().len(), 1);
        assert_eq!(ctrl.display_entries()[0].field.as_str(), "name");
        assert_in_sync(&ctrl);
    }

    #[test]
    fn remove_by_index_out_of_range_is_noop() {
        let mut ctrl = SelectionController::new();
        ctrl.apply_single(Condition::single("name", "Name", "x", "x"))
            .unwrap();
        assert_eq!(ctrl.remove_by_index(3), Change::Unchanged);
        assert_eq!(ctrl.display_entries().len(), 1);
    }

    #[test]
    fn retract_notifies_only_active_fields() {
        let mut ctrl = SelectionController::new();
        let seen = watch(&mut ctrl, "name");
        let field = FieldId::from("name");

        assert_eq!(ctrl.retract(&field), Change::Unchanged);
        assert!(seen.borrow().is_empty());

        ctrl.apply_single(Condition::single("name", "Name", "x", "x"))
            .unwrap();
        assert_eq!(ctrl.retract(&field), Change::Cleared);
        assert_eq!(seen.borrow().len(), 1);
        assert!(ctrl.display_entries().is_empty());
    }

    #[test]
    fn removing_an_entry_does_not_reorder_the_rest() {
        let mut ctrl = SelectionController::new();
        for field in ["a", "b", "c"] {
            ctrl.apply_single(Condition::single(field, field, "1", "1"))
                .unwrap();
        }
        ctrl.retract(&FieldId::from("b"));

        let fields: Vec<_> = ctrl
            .display_entries()
            .iter()
            .map(|e| e.field.as_str())
            .collect();
        assert_eq!(fields, vec!["a", "c"]);
    }

    #[test]
    fn toggle_off_on_inactive_field_is_noop() {
        let mut ctrl = SelectionController::new();
        let seen = watch(&mut ctrl, "color");
        assert_eq!(
            ctrl.toggle_multi_item(red(), Toggle::Off).unwrap(),
            Change::Unchanged
        );
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn double_toggle_on_does_not_duplicate_items() {
        let mut ctrl = SelectionController::new();
        ctrl.toggle_multi_item(red(), Toggle::On).unwrap();
        ctrl.toggle_multi_item(red(), Toggle::On).unwrap();

        assert_eq!(ctrl.display_entries()[0].value, "red");
        assert_eq!(
            ctrl.toggle_multi_item(red(), Toggle::Off).unwrap(),
            Change::Cleared
        );
    }

    #[test]
    fn inconsistent_multi_flag_is_rejected_without_mutation() {
        let defs = vec![FieldDef {
            field: FieldId::from("color"),
            title: "Color".into(),
            kind: FieldKind::Enum,
            items: Vec::new(),
            is_multi: true,
        }];
        let mut ctrl = SelectionController::with_fields(&defs);

        let err = ctrl
            .apply_single(Condition::single("color", "Color", "red", "Red"))
            .unwrap_err();
        assert_eq!(
            err,
            SelectionError::InconsistentMultiFlag {
                field: FieldId::from("color"),
                established: true,
                requested: false,
            }
        );
        assert!(ctrl.display_entries().is_empty());

        let err = ctrl
            .toggle_multi_item(Condition::single("color", "Color", "red", "Red"), Toggle::On)
            .unwrap_err();
        assert!(matches!(err, SelectionError::InconsistentMultiFlag { .. }));
    }

    #[test]
    fn unregistered_field_keeps_multi_flag_while_active() {
        let mut ctrl = SelectionController::new();
        ctrl.apply_single(Condition::single("tag", "Tag", "a", "a"))
            .unwrap();
        assert!(
            ctrl.toggle_multi_item(Condition::multi("tag", "Tag", "b", "b"), Toggle::On)
                .is_err()
        );

        ctrl.retract(&FieldId::from("tag"));
        assert!(
            ctrl.toggle_multi_item(Condition::multi("tag", "Tag", "b", "b"), Toggle::On)
                .is_ok()
        );
    }

    #[test]
    fn reset_fields_clears_without_notifying() {
        let mut ctrl = SelectionController::new();
        let seen = watch(&mut ctrl, "name");
        ctrl.apply_single(Condition::single("name", "Name", "x", "x"))
            .unwrap();

        ctrl.reset_fields(&[]);

        assert!(ctrl.conditions().is_empty());
        assert!(ctrl.display_entries().is_empty());
        assert!(seen.borrow().is_empty());
    }
}
