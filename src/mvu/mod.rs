// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring panel state, messages, and commands.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::PanelConfig;
use crate::models::field_def::{FieldDef, load_field_definitions};
use crate::ui::components::field_panel::{self, FieldPanelModel, PanelMsg};

/// Top-level application state.
#[derive(Debug, Default)]
pub struct AppModel {
    /// Query panel: mounted field handlers plus the selection core.
    pub panel: FieldPanelModel,
    /// File the current field definitions were read from.
    pub fields_source: Option<PathBuf>,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            panel: FieldPanelModel::new(config),
            ..Default::default()
        }
    }
}

/// Application messages routed through the update function.
#[derive(Debug)]
pub enum Msg {
    PickFieldsRequested,
    LoadFieldsRequested(PathBuf),
    ReloadRequested,
    FieldsPickCancelled,
    FieldsLoaded {
        fields: Vec<FieldDef>,
        source: PathBuf,
    },
    FieldsFailed(String),
    DismissError,
    Panel(PanelMsg),
}

/// Commands represent side-effects executed between frames.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    PickFieldsFile,
    LoadFields(PathBuf),
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::PickFieldsRequested => cmds.push(Command::PickFieldsFile),
        Msg::LoadFieldsRequested(path) => cmds.push(Command::LoadFields(path)),
        Msg::ReloadRequested => match &model.fields_source {
            Some(path) => cmds.push(Command::LoadFields(path.clone())),
            None => surface_event(model, "No field definition file to reload.".into(), false),
        },
        Msg::FieldsPickCancelled => surface_event(model, "Open cancelled.".into(), false),
        Msg::FieldsLoaded { fields, source } => {
            info!(count = fields.len(), source = %source.display(), "field definitions loaded");
            let message = format!("Loaded {} field(s) from {}", fields.len(), source.display());
            model.panel.mount(fields);
            model.fields_source = Some(source);
            surface_event(model, message, false);
        }
        Msg::FieldsFailed(err) => {
            warn!(%err, "field definitions failed to load");
            surface_event(model, format!("Failed to load field definitions:\n\n{err}"), true);
        }
        Msg::DismissError => model.error = None,
        Msg::Panel(m) => {
            if let Some(event) = field_panel::update(&mut model.panel, m) {
                surface_event(model, event.message, event.is_error);
            }
        }
    }
}

/// Execute a command synchronously and return a resulting message.
pub fn run_command(cmd: Command) -> Msg {
    match cmd {
        Command::PickFieldsFile => {
            let file = rfd::FileDialog::new()
                .set_title("Select field definitions")
                .add_filter("JSON", &["json"])
                .pick_file();
            match file {
                Some(path) => load_fields(path),
                None => Msg::FieldsPickCancelled,
            }
        }
        Command::LoadFields(path) => load_fields(path),
    }
}

fn load_fields(path: PathBuf) -> Msg {
    match load_field_definitions(&path) {
        Ok(fields) => Msg::FieldsLoaded {
            fields,
            source: path,
        },
        // `{:#}` keeps the whole context chain on one line.
        Err(err) => Msg::FieldsFailed(format!("{err:#}")),
    }
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}
