use std::io::stdout;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracing::warn;

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::autosave::AutosaveTimer;
use crate::document::Document;
use crate::ui::style::Theme;
use crate::watcher::FileWatcher;

/// Debounce window for the external-change watcher.
const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization fails or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        // Load the document before touching the terminal
        let mut document = Document::new();
        let mut load_error = None;
        if let Some(path) = &self.file_path
            && let Err(err) = document.open(path)
        {
            // Start with an empty buffer and surface the failure as a toast
            document = Document::new();
            load_error = Some(format!("{err:#}"));
        }

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal — jotter requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(
            document,
            (size.width, size.height),
            Theme::from_mode(self.theme_mode),
        );
        model.watch_enabled = self.watch_enabled;
        model.autosave_enabled = self.autosave_enabled;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        if let Some(message) = load_error {
            model.show_toast(ToastLevel::Error, message);
        }

        execute!(stdout(), EnableMouseCapture)?;

        let result = Self::event_loop(&mut terminal, &mut model, self.autosave_interval);

        // Restore terminal
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        autosave_interval: Duration,
    ) -> Result<()> {
        // The timer thread runs for the whole process; whether a tick
        // persists anything is decided per tick in the effects layer.
        let mut autosave = AutosaveTimer::new(autosave_interval);

        let mut file_watcher = if model.watch_enabled {
            Self::make_file_watcher(model)
        } else {
            None
        };
        let mut watched_path = model.document.path().map(Path::to_path_buf);
        let mut needs_render = true;

        loop {
            // Re-watch when the open file changed (open / save-as)
            if model.watch_enabled {
                let current = model.document.path().map(Path::to_path_buf);
                if current != watched_path {
                    file_watcher = Self::make_file_watcher(model);
                    watched_path = current;
                }
            } else if file_watcher.is_some() {
                file_watcher = None;
            }

            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            if autosave.take_tick_ready() {
                *model = update(std::mem::take(model), Message::AutosaveTick);
                Self::handle_message_side_effects(
                    model,
                    &mut file_watcher,
                    &mut autosave,
                    &Message::AutosaveTick,
                );
                needs_render = true;
            }

            if model.watch_enabled
                && file_watcher
                    .as_mut()
                    .is_some_and(FileWatcher::take_change_ready)
            {
                *model = update(std::mem::take(model), Message::FileChanged);
                Self::handle_message_side_effects(
                    model,
                    &mut file_watcher,
                    &mut autosave,
                    &Message::FileChanged,
                );
                needs_render = true;
            }

            // Handle events
            let poll_ms = if needs_render { 0 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = Self::handle_event(&event::read()?, model) {
                    let side_msg = msg.clone();
                    *model = update(std::mem::take(model), msg);
                    Self::handle_message_side_effects(
                        model,
                        &mut file_watcher,
                        &mut autosave,
                        &side_msg,
                    );
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        let side_msg = msg.clone();
                        *model = update(std::mem::take(model), msg);
                        Self::handle_message_side_effects(
                            model,
                            &mut file_watcher,
                            &mut autosave,
                            &side_msg,
                        );
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    pub(super) fn make_file_watcher(model: &mut Model) -> Option<FileWatcher> {
        let path = model.document.path()?.to_path_buf();
        match FileWatcher::new(&path, WATCH_DEBOUNCE) {
            Ok(watcher) => Some(watcher),
            Err(err) => {
                model.watch_enabled = false;
                model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
                warn!(%err, path = %path.display(), "failed to watch file");
                None
            }
        }
    }
}
