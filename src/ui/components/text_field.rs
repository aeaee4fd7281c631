// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Free-text field handler. Edits settle after a delay before reaching the core.

use std::time::{Duration, Instant};

use eframe::egui;

use crate::logic::debounce::Debouncer;
use crate::models::condition::Condition;
use crate::models::field_def::FieldDef;
use crate::ui::components::field_panel::PanelAction;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextFieldModel {
    input: String,
    settle: Debouncer<String>,
}

impl TextFieldModel {
    pub fn new(delay: Duration) -> Self {
        Self {
            input: String::new(),
            settle: Debouncer::new(delay),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// When the pending edit settles, if any.
    pub fn settles_at(&self) -> Option<Instant> {
        self.settle.due()
    }

    /// Clear the input and drop any edit that has not settled yet.
    pub fn reset(&mut self) {
        self.input.clear();
        self.settle.cancel();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextFieldMsg {
    InputChanged { text: String, at: Instant },
    Tick(Instant),
}

pub fn update(
    model: &mut TextFieldModel,
    def: &FieldDef,
    msg: TextFieldMsg,
) -> Option<PanelAction> {
    match msg {
        TextFieldMsg::InputChanged { text, at } => {
            model.input.clone_from(&text);
            model.settle.schedule(text, at);
            None
        }
        TextFieldMsg::Tick(now) => {
            let settled = model.settle.poll(now)?;
            if settled.is_empty() {
                Some(PanelAction::Retract(def.field.clone()))
            } else {
                Some(PanelAction::ApplySingle(Condition::single(
                    def.field.clone(),
                    def.title.clone(),
                    settled.clone(),
                    settled,
                )))
            }
        }
    }
}

pub fn view(ui: &mut egui::Ui, model: &TextFieldModel) -> Vec<TextFieldMsg> {
    let mut msgs = Vec::new();
    let mut input = model.input.clone();
    let resp = ui.add(
        egui::TextEdit::singleline(&mut input)
            .hint_text(format!("{} Search", egui_phosphor::regular::MAGNIFYING_GLASS))
            .desired_width(240.0),
    );
    if resp.changed() {
        msgs.push(TextFieldMsg::InputChanged {
            text: input,
            at: Instant::now(),
        });
    }
    msgs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::condition::FieldId;
    use crate::models::field_def::FieldKind;

    const DELAY: Duration = Duration::from_millis(800);

    fn def() -> FieldDef {
        FieldDef {
            field: FieldId::from("name"),
            title: "Name".into(),
            kind: FieldKind::Text,
            items: Vec::new(),
            is_multi: false,
        }
    }

    fn typed(text: &str, at: Instant) -> TextFieldMsg {
        TextFieldMsg::InputChanged {
            text: text.into(),
            at,
        }
    }

    #[test]
    fn only_the_settled_value_is_applied() {
        let def = def();
        let start = Instant::now();
        let mut model = TextFieldModel::new(DELAY);

        assert!(update(&mut model, &def, typed("a", start)).is_none());
        update(&mut model, &def, typed("al", start + Duration::from_millis(100)));
        update(&mut model, &def, typed("ali", start + Duration::from_millis(200)));

        assert!(update(&mut model, &def, TextFieldMsg::Tick(start + DELAY)).is_none());
        let action = update(
            &mut model,
            &def,
            TextFieldMsg::Tick(start + Duration::from_millis(1000)),
        )
        .unwrap();
        assert!(matches!(
            action,
            PanelAction::ApplySingle(ref c) if c.value == "ali" && c.text == "ali"
        ));
        assert!(
            update(&mut model, &def, TextFieldMsg::Tick(start + DELAY * 3)).is_none(),
            "settles once"
        );
    }

    #[test]
    fn empty_input_retracts_field() {
        let def = def();
        let start = Instant::now();
        let mut model = TextFieldModel::new(DELAY);

        update(&mut model, &def, typed("", start));
        let action = update(&mut model, &def, TextFieldMsg::Tick(start + DELAY)).unwrap();
        assert_eq!(action, PanelAction::Retract(FieldId::from("name")));
    }

    #[test]
    fn reset_cancels_pending_settle() {
        let def = def();
        let start = Instant::now();
        let mut model = TextFieldModel::new(DELAY);
        update(&mut model, &def, typed("stale", start));

        model.reset();

        assert_eq!(model.input(), "");
        assert!(model.settles_at().is_none());
        assert!(update(&mut model, &def, TextFieldMsg::Tick(start + DELAY)).is_none());
    }
}
