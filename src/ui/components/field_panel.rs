// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Query panel composition: mounts one handler per field definition, routes handler
//! actions into the selection controller and renders the selected-conditions tray.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use eframe::egui;
use tracing::warn;

use crate::config::PanelConfig;
use crate::logic::notify::ListenerId;
use crate::logic::query;
use crate::logic::selection::{Change, SelectionController};
use crate::models::condition::{Condition, FieldId, Toggle};
use crate::models::field_def::{FieldDef, FieldKind};
use crate::ui::components::date_field::{self, DateFieldModel, DateFieldMsg};
use crate::ui::components::enum_field::{self, EnumFieldModel, EnumFieldMsg};
use crate::ui::components::number_field::{self, NumberFieldModel, NumberFieldMsg};
use crate::ui::components::selected_tray::{self, SelectedTrayMsg};
use crate::ui::components::text_field::{self, TextFieldModel, TextFieldMsg};

/// Core operation requested by a field handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelAction {
    ApplySingle(Condition),
    Retract(FieldId),
    ToggleMulti { condition: Condition, toggle: Toggle },
}

/// Local state of one mounted field handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldWidget {
    Enum(EnumFieldModel),
    Text(TextFieldModel),
    Number(NumberFieldModel),
    Date(DateFieldModel),
    Unsupported,
}

impl FieldWidget {
    fn for_def(def: &FieldDef, text_debounce: Duration) -> Self {
        match def.kind {
            FieldKind::Enum => Self::Enum(EnumFieldModel::default()),
            FieldKind::Text => Self::Text(TextFieldModel::new(text_debounce)),
            FieldKind::Number => Self::Number(NumberFieldModel::default()),
            FieldKind::Date => Self::Date(DateFieldModel::default()),
            FieldKind::Unknown(_) => Self::Unsupported,
        }
    }

    /// Clear the selection affordance after a field-cleared notification.
    pub fn reset(&mut self) {
        match self {
            Self::Enum(m) => m.reset(),
            Self::Text(m) => m.reset(),
            Self::Number(m) => m.reset(),
            Self::Date(m) => m.reset(),
            Self::Unsupported => {}
        }
    }
}

#[derive(Debug)]
struct FieldSlot {
    def: FieldDef,
    widget: Rc<RefCell<FieldWidget>>,
    listener: ListenerId,
}

/// Panel state for one session of field definitions.
#[derive(Debug)]
pub struct FieldPanelModel {
    controller: SelectionController,
    slots: Vec<FieldSlot>,
    text_debounce: Duration,
    collapsed_items: usize,
}

impl Default for FieldPanelModel {
    fn default() -> Self {
        Self::new(&PanelConfig::default())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelMsg {
    Enum { slot: usize, msg: EnumFieldMsg },
    Text { slot: usize, msg: TextFieldMsg },
    Number { slot: usize, msg: NumberFieldMsg },
    Date { slot: usize, msg: DateFieldMsg },
    Tray(SelectedTrayMsg),
    /// Frame clock used to settle debounced text input.
    Tick(Instant),
}

/// Feedback surfaced to the status bar or error modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelEvent {
    pub message: String,
    pub is_error: bool,
}

impl FieldPanelModel {
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            controller: SelectionController::new(),
            slots: Vec::new(),
            text_debounce: config.text_debounce,
            collapsed_items: config.collapsed_items,
        }
    }

    /// Replace the mounted handlers with new field definitions and start a fresh session.
    pub fn mount(&mut self, defs: Vec<FieldDef>) {
        self.unmount();
        self.controller.reset_fields(&defs);

        for def in defs {
            let widget = Rc::new(RefCell::new(FieldWidget::for_def(&def, self.text_debounce)));
            let sink = Rc::clone(&widget);
            let listener = self
                .controller
                .listeners_mut()
                .subscribe(def.field.clone(), move |_| sink.borrow_mut().reset());
            self.slots.push(FieldSlot {
                def,
                widget,
                listener,
            });
        }
    }

    /// Drop all handlers and their listeners.
    pub fn unmount(&mut self) {
        for slot in self.slots.drain(..) {
            self.controller.listeners_mut().unsubscribe(slot.listener);
        }
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn field_defs(&self) -> impl Iterator<Item = &FieldDef> {
        self.slots.iter().map(|slot| &slot.def)
    }

    /// Snapshot of a mounted handler's state.
    pub fn widget(&self, slot: usize) -> Option<FieldWidget> {
        self.slots.get(slot).map(|s| s.widget.borrow().clone())
    }

    /// Earliest instant a pending text edit settles.
    pub fn next_settle(&self) -> Option<Instant> {
        self.slots
            .iter()
            .filter_map(|slot| match &*slot.widget.borrow() {
                FieldWidget::Text(m) => m.settles_at(),
                _ => None,
            })
            .min()
    }

    /// Run `f` on a slot's handler state; the borrow ends before the caller touches the
    /// controller so notifications can reset the same handler.
    fn with_widget<R>(
        &self,
        slot: usize,
        f: impl FnOnce(&mut FieldWidget, &FieldDef) -> Option<R>,
    ) -> Option<R> {
        let slot = self.slots.get(slot)?;
        let mut widget = slot.widget.borrow_mut();
        f(&mut *widget, &slot.def)
    }
}

/// Apply a panel message. Returns a feedback event when relevant.
pub fn update(model: &mut FieldPanelModel, msg: PanelMsg) -> Option<PanelEvent> {
    match msg {
        PanelMsg::Enum { slot, msg } => {
            let action = model.with_widget(slot, |widget, def| match widget {
                FieldWidget::Enum(m) => enum_field::update(m, def, msg),
                _ => mismatched(def),
            })?;
            dispatch(&mut model.controller, action)
        }
        PanelMsg::Text { slot, msg } => {
            let action = model.with_widget(slot, |widget, def| match widget {
                FieldWidget::Text(m) => text_field::update(m, def, msg),
                _ => mismatched(def),
            })?;
            dispatch(&mut model.controller, action)
        }
        PanelMsg::Number { slot, msg } => {
            let outcome = model.with_widget(slot, |widget, def| match widget {
                FieldWidget::Number(m) => Some(number_field::update(m, def, msg)),
                _ => mismatched(def),
            })?;
            match outcome {
                Ok(Some(action)) => dispatch(&mut model.controller, action),
                Ok(None) => None,
                Err(message) => Some(PanelEvent {
                    message,
                    is_error: true,
                }),
            }
        }
        PanelMsg::Date { slot, msg } => {
            let action = model.with_widget(slot, |widget, def| match widget {
                FieldWidget::Date(m) => date_field::update(m, def, msg),
                _ => mismatched(def),
            })?;
            dispatch(&mut model.controller, action)
        }
        PanelMsg::Tray(SelectedTrayMsg::Remove(index)) => {
            let title = model
                .controller
                .display_entries()
                .get(index)
                .map(|entry| entry.title.clone())?;
            match model.controller.remove_by_index(index) {
                Change::Cleared => Some(PanelEvent {
                    message: format!("Removed condition '{title}'"),
                    is_error: false,
                }),
                _ => None,
            }
        }
        PanelMsg::Tick(now) => {
            let actions: Vec<PanelAction> = (0..model.slots.len())
                .filter_map(|slot| {
                    model.with_widget(slot, |widget, def| match widget {
                        FieldWidget::Text(m) => text_field::update(m, def, TextFieldMsg::Tick(now)),
                        _ => None,
                    })
                })
                .collect();
            actions
                .into_iter()
                .filter_map(|action| dispatch(&mut model.controller, action))
                .last()
        }
    }
}

/// Route a handler action to the controller; contract violations become error events.
fn dispatch(controller: &mut SelectionController, action: PanelAction) -> Option<PanelEvent> {
    let result = match action {
        PanelAction::ApplySingle(condition) => controller.apply_single(condition),
        PanelAction::Retract(field) => Ok(controller.retract(&field)),
        PanelAction::ToggleMulti { condition, toggle } => {
            controller.toggle_multi_item(condition, toggle)
        }
    };
    result.err().map(|err| PanelEvent {
        message: err.to_string(),
        is_error: true,
    })
}

fn mismatched<R>(def: &FieldDef) -> Option<R> {
    warn!(field = %def.field, kind = def.kind.as_str(), "message routed to wrong handler");
    None
}

/// Render every field row, the selected-conditions tray and the query preview.
pub fn view(ui: &mut egui::Ui, model: &FieldPanelModel) -> Vec<PanelMsg> {
    let mut msgs = Vec::new();

    if model.slots.is_empty() {
        ui.label(
            egui::RichText::new("No fields loaded. Open a field definition file to start.")
                .italics()
                .color(egui::Color32::from_gray(110)),
        );
        return msgs;
    }

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        egui::Grid::new("query_panel_fields")
            .num_columns(2)
            .spacing(egui::vec2(8.0, 10.0))
            .min_col_width(120.0)
            .show(ui, |ui| {
                for (index, slot) in model.slots.iter().enumerate() {
                    ui.label(format!("{}:", slot.def.title));
                    render_slot(ui, model, index, slot, &mut msgs);
                    ui.end_row();
                }
            });
    });

    ui.add_space(8.0);
    let tray = selected_tray::view(ui, model.controller.display_entries());
    msgs.extend(tray.into_iter().map(PanelMsg::Tray));

    ui.add_space(8.0);
    egui::CollapsingHeader::new(format!("{} Query", egui_phosphor::regular::FUNNEL))
        .default_open(false)
        .show(ui, |ui| {
            let json = query::to_json(&model.controller.query())
                .unwrap_or_else(|err| format!("Failed to render query: {err}"));
            ui.label(egui::RichText::new(json).monospace());
        });

    msgs
}

fn render_slot(
    ui: &mut egui::Ui,
    model: &FieldPanelModel,
    index: usize,
    slot: &FieldSlot,
    msgs: &mut Vec<PanelMsg>,
) {
    let widget = slot.widget.borrow();
    match &*widget {
        FieldWidget::Enum(m) => msgs.extend(
            enum_field::view(ui, &slot.def, m, model.collapsed_items)
                .into_iter()
                .map(|msg| PanelMsg::Enum { slot: index, msg }),
        ),
        FieldWidget::Text(m) => msgs.extend(
            text_field::view(ui, m)
                .into_iter()
                .map(|msg| PanelMsg::Text { slot: index, msg }),
        ),
        FieldWidget::Number(m) => msgs.extend(
            number_field::view(ui, m)
                .into_iter()
                .map(|msg| PanelMsg::Number { slot: index, msg }),
        ),
        FieldWidget::Date(m) => msgs.extend(
            date_field::view(ui, &slot.def, m)
                .into_iter()
                .map(|msg| PanelMsg::Date { slot: index, msg }),
        ),
        FieldWidget::Unsupported => {
            ui.label(
                egui::RichText::new(format!(
                    "Unsupported field type `{}`",
                    slot.def.kind.as_str()
                ))
                .italics()
                .color(egui::Color32::from_gray(110)),
            );
        }
    }
}
