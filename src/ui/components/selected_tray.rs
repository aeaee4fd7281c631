// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! "Selected conditions" tray: one chip per active field, click to remove.

use eframe::egui;

use crate::logic::selection::DisplayEntry;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectedTrayMsg {
    Remove(usize),
}

/// Chip label shown for one tray row.
pub fn chip_label(entry: &DisplayEntry) -> String {
    format!("{}: {}", entry.title, entry.text)
}

pub fn view(ui: &mut egui::Ui, entries: &[DisplayEntry]) -> Vec<SelectedTrayMsg> {
    let mut msgs = Vec::new();

    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new("Selected:").strong());
        if entries.is_empty() {
            ui.label(
                egui::RichText::new("No conditions selected.")
                    .italics()
                    .color(egui::Color32::from_gray(110)),
            );
            return;
        }

        for (index, entry) in entries.iter().enumerate() {
            let label = format!("{} {}", chip_label(entry), egui_phosphor::regular::X);
            if ui
                .add(egui::Button::new(label).wrap())
                .on_hover_text("Remove condition")
                .clicked()
            {
                msgs.push(SelectedTrayMsg::Remove(index));
            }
        }
    });

    msgs
}
