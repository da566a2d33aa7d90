//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! File I/O (open, save, autosave persists, PDF export) happens in the
//! effects layer after each pure update, on the thread that owns the
//! buffer; background timers and watchers only feed messages in.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, Prompt, PromptKind, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;
use std::time::Duration;

use crate::autosave::DEFAULT_INTERVAL;
use crate::config::ThemeMode;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    watch_enabled: bool,
    autosave_enabled: bool,
    autosave_interval: Duration,
    theme_mode: ThemeMode,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application, optionally opening a file at startup.
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            watch_enabled: false,
            autosave_enabled: true,
            autosave_interval: DEFAULT_INTERVAL,
            theme_mode: ThemeMode::Light,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Enable or disable external-change watching.
    pub fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Enable or disable the autosave loop.
    pub fn with_autosave(mut self, enabled: bool) -> Self {
        self.autosave_enabled = enabled;
        self
    }

    /// Override the autosave cadence.
    pub const fn with_autosave_interval(mut self, interval: Duration) -> Self {
        self.autosave_interval = interval;
        self
    }

    /// Set the startup theme.
    pub const fn with_theme(mut self, mode: ThemeMode) -> Self {
        self.theme_mode = mode;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}

#[cfg(test)]
mod tests;
