// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Enumerated-choice field handler (single or multi select).

use eframe::egui;

use crate::models::condition::{Condition, Toggle};
use crate::models::field_def::FieldDef;
use crate::ui::components::field_panel::PanelAction;

/// Local selection affordance state of one enum field.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct EnumFieldModel {
    /// Per rendered item: toggled on (multi-select only).
    toggled: Vec<bool>,
    /// Selected item (single-select only).
    selected_index: Option<usize>,
    /// Whether all items are shown.
    expanded: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnumFieldMsg {
    ItemClicked(usize),
    ToggleExpanded,
}

impl EnumFieldModel {
    pub fn is_selected(&self, def: &FieldDef, index: usize) -> bool {
        if def.is_multi {
            self.toggled.get(index).copied().unwrap_or(false)
        } else {
            self.selected_index == Some(index)
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Forget every local selection after the field was cleared elsewhere.
    pub fn reset(&mut self) {
        self.toggled.clear();
        self.selected_index = None;
    }
}

/// Apply a message and return the core operation it requests, if any.
pub fn update(
    model: &mut EnumFieldModel,
    def: &FieldDef,
    msg: EnumFieldMsg,
) -> Option<PanelAction> {
    match msg {
        EnumFieldMsg::ToggleExpanded => {
            model.expanded = !model.expanded;
            None
        }
        EnumFieldMsg::ItemClicked(index) => {
            let item = def.items.get(index)?;
            if def.is_multi {
                if model.toggled.len() <= index {
                    model.toggled.resize(index + 1, false);
                }
                let now_on = !model.toggled[index];
                model.toggled[index] = now_on;
                Some(PanelAction::ToggleMulti {
                    condition: Condition::multi(
                        def.field.clone(),
                        def.title.clone(),
                        item.value.clone(),
                        item.text.clone(),
                    ),
                    toggle: if now_on { Toggle::On } else { Toggle::Off },
                })
            } else if model.selected_index != Some(index) {
                model.selected_index = Some(index);
                Some(PanelAction::ApplySingle(Condition::single(
                    def.field.clone(),
                    def.title.clone(),
                    item.value.clone(),
                    item.text.clone(),
                )))
            } else {
                None
            }
        }
    }
}

/// Render the item chips and the "More/Less" expander.
pub fn view(
    ui: &mut egui::Ui,
    def: &FieldDef,
    model: &EnumFieldModel,
    collapsed_items: usize,
) -> Vec<EnumFieldMsg> {
    let mut msgs = Vec::new();
    let collapsible = def.items.len() > collapsed_items;
    let shown = if model.expanded || !collapsible {
        def.items.len()
    } else {
        collapsed_items
    };

    ui.horizontal_wrapped(|ui| {
        for (index, item) in def.items.iter().take(shown).enumerate() {
            let selected = model.is_selected(def, index);
            let label = if def.is_multi {
                let icon = if selected {
                    egui_phosphor::regular::CHECK_SQUARE
                } else {
                    egui_phosphor::regular::SQUARE
                };
                format!("{icon} {}", item.text)
            } else {
                item.text.clone()
            };
            if ui
                .add(egui::Button::new(label).selected(selected))
                .clicked()
            {
                msgs.push(EnumFieldMsg::ItemClicked(index));
            }
        }

        if collapsible {
            let label = if model.expanded {
                format!("Less {}", egui_phosphor::regular::CARET_UP)
            } else {
                format!("More {}", egui_phosphor::regular::CARET_DOWN)
            };
            if ui.small_button(label).clicked() {
                msgs.push(EnumFieldMsg::ToggleExpanded);
            }
        }
    });

    msgs
}
