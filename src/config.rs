// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Runtime configuration from command line arguments with environment fallbacks.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "querypanel", version)]
/// Faceted filter panel
pub struct Args {
    /// Field definition file (JSON array) loaded at startup.
    #[arg(env = "QUERYPANEL_FIELDS")]
    pub fields: Option<PathBuf>,
    /// Delay in milliseconds before typed text is applied.
    #[arg(long, env = "QUERYPANEL_DEBOUNCE_MS", default_value_t = 800)]
    pub debounce_ms: u64,
    /// Enum items shown before the "More" expander.
    #[arg(long, env = "QUERYPANEL_COLLAPSED_ITEMS", default_value_t = 8)]
    pub collapsed_items: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelConfig {
    /// Field-definition file loaded at startup, if any.
    pub fields_path: Option<PathBuf>,
    /// Settle delay for text inputs.
    pub text_debounce: Duration,
    /// Enum items visible while a field is collapsed.
    pub collapsed_items: usize,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            fields_path: None,
            text_debounce: Duration::from_millis(800),
            collapsed_items: 8,
        }
    }
}

impl From<Args> for PanelConfig {
    fn from(args: Args) -> Self {
        Self {
            fields_path: args
                .fields
                .filter(|path| !path.as_os_str().is_empty()),
            text_debounce: Duration::from_millis(args.debounce_ms),
            collapsed_items: args.collapsed_items,
        }
    }
}

impl PanelConfig {
    /// Parse the process arguments. Prints usage and exits on `--help` or invalid input.
    pub fn from_env() -> Self {
        Args::parse().into()
    }
}
