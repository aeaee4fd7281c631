// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the query panel.
//! Handles layout, the file controls, and wiring to the background command worker.

pub mod components;

use std::time::Instant;

use eframe::egui;

use crate::config::PanelConfig;
use crate::mvu::{self, AppModel, Command, Msg};
use crate::ui::components::field_panel::{self, PanelMsg};

/// Stateful egui application hosting one query panel.
pub struct QueryPanelApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl QueryPanelApp {
    /// Spawn the command workers and queue the initial field load, if configured.
    pub fn new(config: &PanelConfig) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().clamp(1, 2))
            .unwrap_or(1);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd);
                    let _ = msg_tx.send(msg);
                }
            });
        }

        let mut inbox = Vec::new();
        if let Some(path) = &config.fields_path {
            inbox.push(Msg::LoadFieldsRequested(path.clone()));
        }

        Self {
            model: AppModel::new(config),
            inbox,
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for QueryPanelApp {
    /// Drives a single UI frame: drains worker results, settles debounced input, applies
    /// queued messages in arrival order, and renders the panel.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pull messages produced by the command worker.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }
        self.inbox.push(Msg::Panel(PanelMsg::Tick(Instant::now())));

        for msg in std::mem::take(&mut self.inbox) {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }

        if let Some(due) = self.model.panel.next_settle() {
            ctx.request_repaint_after(due.saturating_duration_since(Instant::now()));
        }
        if self.model.pending_commands > 0 {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Query Panel");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(2.0);
                    egui::widgets::global_theme_preference_switch(ui);
                    ui.separator();
                    self.render_file_controls(ui);
                });
            });
            ui.add_space(4.0);
        });

        self.render_error_modal(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                let msgs = field_panel::view(ui, &self.model.panel);
                self.inbox.extend(msgs.into_iter().map(Msg::Panel));
            });
        });
    }
}

impl QueryPanelApp {
    /// Open and reload buttons for the field definition file.
    fn render_file_controls(&mut self, ui: &mut egui::Ui) {
        let reload = egui::Button::new(format!(
            "{} Reload",
            egui_phosphor::regular::ARROW_CLOCKWISE
        ));
        if ui
            .add_enabled(self.model.fields_source.is_some(), reload)
            .on_disabled_hover_text("Open a field definition file first")
            .clicked()
        {
            self.inbox.push(Msg::ReloadRequested);
        }

        if ui
            .button(format!(
                "{} Open fields…",
                egui_phosphor::regular::FOLDER_OPEN
            ))
            .clicked()
        {
            self.inbox.push(Msg::PickFieldsRequested);
        }
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render the active-condition count plus the latest status message.
    fn render_status(&self, ui: &mut egui::Ui) {
        let active = self.model.panel.controller().conditions().len();
        let mut display = format!("{active} active condition(s)");
        if let Some(text) = &self.model.status {
            display.push_str("  ·  ");
            display.push_str(text.lines().next().unwrap_or_default());
        }
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
            if self.model.pending_commands > 0 {
                ui.add(egui::Spinner::new().size(14.0)).on_hover_text(format!(
                    "{} task(s) running in background",
                    self.model.pending_commands
                ));
            }
        });
    }
}
