// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring logging, configuration and egui/eframe.

use anyhow::{Result, anyhow};
use eframe::egui;
use egui_phosphor::Variant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::PanelConfig;
use crate::ui::QueryPanelApp;

/// Install the global log subscriber. `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("querypanel=info"));
    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run() -> Result<()> {
    init_tracing();
    let config = PanelConfig::from_env();
    info!(?config, "starting query panel");

    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Query Panel",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(QueryPanelApp::new(&config)))
        }),
    )
    .map_err(|err| anyhow!("UI event loop failed: {err}"))
}
