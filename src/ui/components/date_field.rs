// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Date range field handler with optional bounds, committed with a confirm button.

use chrono::{Local, NaiveDate};
use eframe::egui;
use egui_extras::DatePickerButton;

use crate::models::condition::Condition;
use crate::models::field_def::FieldDef;
use crate::ui::components::field_panel::PanelAction;

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct DateFieldModel {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateFieldModel {
    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn reset(&mut self) {
        self.from = None;
        self.to = None;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateFieldMsg {
    SetFrom(Option<NaiveDate>),
    SetTo(Option<NaiveDate>),
    Confirm,
}

pub fn update(
    model: &mut DateFieldModel,
    def: &FieldDef,
    msg: DateFieldMsg,
) -> Option<PanelAction> {
    match msg {
        DateFieldMsg::SetFrom(date) => {
            model.from = date;
            None
        }
        DateFieldMsg::SetTo(date) => {
            model.to = date;
            None
        }
        DateFieldMsg::Confirm => Some(match date_range_condition(def, model.from, model.to) {
            Some(condition) => PanelAction::ApplySingle(condition),
            None => PanelAction::Retract(def.field.clone()),
        }),
    }
}

/// Build the date range condition; `None` when both bounds are unset.
///
/// Values use `from~to`, `from~` and `~to` with ISO dates so they never clash with the
/// hyphens inside a date.
pub fn date_range_condition(
    def: &FieldDef,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Option<Condition> {
    let (value, text) = match (from, to) {
        (Some(f), Some(t)) => (format!("{f}~{t}"), format!("{f} ~ {t}")),
        (Some(f), None) => (format!("{f}~"), format!(">={f}")),
        (None, Some(t)) => (format!("~{t}"), format!("<={t}")),
        (None, None) => return None,
    };
    Some(Condition::single(
        def.field.clone(),
        def.title.clone(),
        value,
        text,
    ))
}

pub fn view(ui: &mut egui::Ui, def: &FieldDef, model: &DateFieldModel) -> Vec<DateFieldMsg> {
    let mut msgs = Vec::new();
    let today = Local::now().date_naive();

    ui.horizontal(|ui| {
        bound_picker(ui, def, "from", model.from, today, &mut msgs, DateFieldMsg::SetFrom);
        ui.label("~");
        bound_picker(ui, def, "to", model.to, today, &mut msgs, DateFieldMsg::SetTo);
        if ui
            .button(format!("{} Apply", egui_phosphor::regular::CHECK))
            .clicked()
        {
            msgs.push(DateFieldMsg::Confirm);
        }
    });

    msgs
}

/// One optional bound: a checkbox enabling it plus a date picker while enabled.
fn bound_picker(
    ui: &mut egui::Ui,
    def: &FieldDef,
    which: &str,
    current: Option<NaiveDate>,
    today: NaiveDate,
    msgs: &mut Vec<DateFieldMsg>,
    make: fn(Option<NaiveDate>) -> DateFieldMsg,
) {
    let mut enabled = current.is_some();
    if ui
        .checkbox(&mut enabled, which)
        .on_hover_text(format!("Limit {which} date"))
        .changed()
    {
        msgs.push(make(enabled.then_some(today)));
    }
    let Some(mut date) = current else {
        return;
    };
    let salt = format!("{}-{which}", def.field);
    if ui
        .add(
            DatePickerButton::new(&mut date)
                .id_salt(&salt)
                .show_icon(true),
        )
        .changed()
    {
        msgs.push(make(Some(date)));
    }
}
