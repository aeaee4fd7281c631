// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Numeric range field handler, committed with a confirm button.

use eframe::egui;

use crate::models::condition::Condition;
use crate::models::field_def::FieldDef;
use crate::ui::components::field_panel::PanelAction;

/// Raw bound inputs as typed by the user.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct NumberFieldModel {
    lower: String,
    upper: String,
}

impl NumberFieldModel {
    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn upper(&self) -> &str {
        &self.upper
    }

    pub fn reset(&mut self) {
        self.lower.clear();
        self.upper.clear();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NumberFieldMsg {
    LowerChanged(String),
    UpperChanged(String),
    Confirm,
}

/// Apply a message. Invalid numbers are reported back and never reach the core.
pub fn update(
    model: &mut NumberFieldModel,
    def: &FieldDef,
    msg: NumberFieldMsg,
) -> Result<Option<PanelAction>, String> {
    match msg {
        NumberFieldMsg::LowerChanged(text) => {
            model.lower = text;
            Ok(None)
        }
        NumberFieldMsg::UpperChanged(text) => {
            model.upper = text;
            Ok(None)
        }
        NumberFieldMsg::Confirm => {
            let lower = parse_bound(&model.lower)
                .ok_or_else(|| format!("Field '{}' needs a valid lower number.", def.title))?;
            let upper = parse_bound(&model.upper)
                .ok_or_else(|| format!("Field '{}' needs a valid upper number.", def.title))?;
            Ok(Some(match range_condition(def, lower, upper) {
                Some(condition) => PanelAction::ApplySingle(condition),
                None => PanelAction::Retract(def.field.clone()),
            }))
        }
    }
}

/// Build the range condition; `None` when both bounds are empty.
///
/// Both bounds give `l-u` / `l - u`, a lower bound alone `l-` / `>=l`, an upper bound
/// alone `-u` / `<=u`.
pub fn range_condition(
    def: &FieldDef,
    lower: Option<f64>,
    upper: Option<f64>,
) -> Option<Condition> {
    let (value, text) = match (lower, upper) {
        (Some(l), Some(u)) => (format!("{l}-{u}"), format!("{l} - {u}")),
        (Some(l), None) => (format!("{l}-"), format!(">={l}")),
        (None, Some(u)) => (format!("-{u}"), format!("<={u}")),
        (None, None) => return None,
    };
    Some(Condition::single(
        def.field.clone(),
        def.title.clone(),
        value,
        text,
    ))
}

/// `Some(None)` for an empty input, `None` for garbage.
fn parse_bound(raw: &str) -> Option<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(None);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Some)
}

pub fn view(ui: &mut egui::Ui, model: &NumberFieldModel) -> Vec<NumberFieldMsg> {
    let mut msgs = Vec::new();

    ui.horizontal(|ui| {
        let mut lower = model.lower.clone();
        if ui
            .add(
                egui::TextEdit::singleline(&mut lower)
                    .hint_text("min")
                    .desired_width(80.0),
            )
            .changed()
        {
            msgs.push(NumberFieldMsg::LowerChanged(lower));
        }
        ui.label("-");
        let mut upper = model.upper.clone();
        if ui
            .add(
                egui::TextEdit::singleline(&mut upper)
                    .hint_text("max")
                    .desired_width(80.0),
            )
            .changed()
        {
            msgs.push(NumberFieldMsg::UpperChanged(upper));
        }
        if ui
            .button(format!("{} Apply", egui_phosphor::regular::CHECK))
            .clicked()
        {
            msgs.push(NumberFieldMsg::Confirm);
        }
    });

    msgs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::selection::SelectionController;
    use crate::models::condition::FieldId;
    use crate::models::field_def::FieldKind;

    fn def() -> FieldDef {
        FieldDef {
            field: FieldId::from("price"),
            title: "Price".into(),
            kind: FieldKind::Number,
            items: Vec::new(),
            is_multi: false,
        }
    }

    fn confirm(model: &mut NumberFieldModel, lower: &str, upper: &str) -> PanelAction {
        let def = def();
        update(model, &def, NumberFieldMsg::LowerChanged(lower.into())).unwrap();
        update(model, &def, NumberFieldMsg::UpperChanged(upper.into())).unwrap();
        update(model, &def, NumberFieldMsg::Confirm)
            .unwrap()
            .expect("confirm always yields an action")
    }

    #[test]
    fn range_formats_match_bounds() {
        let def = def();
        let both = range_condition(&def, Some(10.0), Some(50.0)).unwrap();
        assert_eq!((both.value.as_str(), both.text.as_str()), ("10-50", "10 - 50"));

        let lower = range_condition(&def, Some(2.5), None).unwrap();
        assert_eq!((lower.value.as_str(), lower.text.as_str()), ("2.5-", ">=2.5"));

        let upper = range_condition(&def, None, Some(20.0)).unwrap();
        assert_eq!((upper.value.as_str(), upper.text.as_str()), ("-20", "<=20"));

        assert!(range_condition(&def, None, None).is_none());
        assert_eq!(range_condition(&def, Some(0.0), None).unwrap().value, "0-");
    }

    #[test]
    fn price_scenario_replaces_then_retracts() {
        let mut ctrl = SelectionController::new();
        let mut model = NumberFieldModel::default();
        let field = FieldId::from("price");

        for (lower, upper, expected) in [("10", "50", "10 - 50"), ("", "20", "<=20")] {
            match confirm(&mut model, lower, upper) {
                PanelAction::ApplySingle(condition) => {
                    ctrl.apply_single(condition).unwrap();
                }
                other => panic!("unexpected action {other:?}"),
            }
            assert_eq!(ctrl.display_entries().len(), 1);
            assert_eq!(ctrl.display_entries()[0].text, expected);
        }
        assert_eq!(ctrl.display_entries()[0].value, "-20");

        let action = confirm(&mut model, "", "");
        assert_eq!(action, PanelAction::Retract(field.clone()));
        ctrl.retract(&field);
        assert!(!ctrl.conditions().has_field(&field));
    }

    #[test]
    fn invalid_number_is_reported() {
        let def = def();
        let mut model = NumberFieldModel::default();
        update(&mut model, &def, NumberFieldMsg::LowerChanged("ten".into())).unwrap();

        let err = update(&mut model, &def, NumberFieldMsg::Confirm).unwrap_err();
        assert!(err.contains("Price"));
    }

    #[test]
    fn reset_clears_inputs() {
        let mut model = NumberFieldModel {
            lower: "1".into(),
            upper: "2".into(),
        };
        model.reset();
        assert_eq!((model.lower(), model.upper()), ("", ""));
    }
}
