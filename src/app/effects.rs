use tracing::{debug, warn};

use crate::app::model::FileAction;
use crate::app::{App, Message, Model, ToastLevel};
use crate::autosave::AutosaveTimer;
use crate::export::{self, ExportError};
use crate::watcher::FileWatcher;

impl App {
    /// Execute the side effects a message implies, after the pure update.
    ///
    /// Everything that touches the filesystem lives here: saves, opens,
    /// autosave persists, PDF export and watcher management.
    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        file_watcher: &mut Option<FileWatcher>,
        autosave: &mut AutosaveTimer,
        msg: &Message,
    ) {
        match msg {
            Message::ToggleWatch => {
                if model.watch_enabled {
                    if model.document.path().is_none() {
                        model.watch_enabled = false;
                        model.show_toast(
                            ToastLevel::Warning,
                            "Save the file first before watching it",
                        );
                    } else {
                        *file_watcher = Self::make_file_watcher(model);
                        if file_watcher.is_some() {
                            model.show_toast(ToastLevel::Info, "Watching file changes");
                        }
                    }
                } else {
                    *file_watcher = None;
                    model.show_toast(ToastLevel::Info, "Watch disabled");
                }
            }

            Message::FileChanged => {
                if model.document.is_dirty() {
                    // Never clobber unsaved edits with on-disk content
                    model.show_toast(
                        ToastLevel::Warning,
                        "File changed on disk; keeping unsaved changes",
                    );
                } else {
                    match model.document.reload_from_disk() {
                        Ok(()) => {
                            sync_after_load(model);
                            model.show_toast(ToastLevel::Info, "Reloaded (file changed on disk)");
                        }
                        Err(err) => {
                            model.show_toast(ToastLevel::Error, format!("{err:#}"));
                            warn!(%err, "reload after external change failed");
                        }
                    }
                }
            }

            Message::Save => {
                // An unnamed buffer opened a Save-as prompt in the update
                if model.document.path().is_some() {
                    match model.document.save() {
                        Ok(()) => debug!("buffer saved"),
                        Err(err) => model.show_toast(ToastLevel::Error, format!("{err:#}")),
                    }
                }
            }

            Message::AutosaveTick => {
                if !model.autosave_enabled {
                    return;
                }
                // No path or nothing to persist: the tick is a no-op
                if model.document.path().is_some() && model.document.is_dirty() {
                    autosave.begin_save();
                    match model.document.save() {
                        Ok(()) => {
                            autosave.finish_save(true);
                            debug!("autosaved");
                        }
                        Err(err) => {
                            autosave.finish_save(false);
                            model
                                .show_toast(ToastLevel::Warning, format!("Autosave failed: {err:#}"));
                            warn!(%err, "autosave failed");
                        }
                    }
                }
            }

            Message::ExportPdf => {
                let text = model.document.buffer().text();
                match export::export_pdf(model.document.path(), &text) {
                    Ok(out) => model.show_toast(
                        ToastLevel::Info,
                        format!("File saved as {}", out.display()),
                    ),
                    Err(err @ ExportError::NoFilePath) => {
                        model.show_toast(ToastLevel::Warning, err.to_string());
                    }
                    Err(err) => model.show_toast(ToastLevel::Error, err.to_string()),
                }
            }

            Message::PromptSubmit | Message::SelectRecent(_) => {
                let Some(action) = model.pending_file_action.take() else {
                    return;
                };
                match action {
                    FileAction::Open(path) => match model.document.open(&path) {
                        Ok(()) => sync_after_load(model),
                        Err(err) => model.show_toast(ToastLevel::Error, format!("{err:#}")),
                    },
                    FileAction::SaveAs(path) => {
                        if let Err(err) = model.document.save_as(&path) {
                            model.show_toast(ToastLevel::Error, format!("{err:#}"));
                        }
                    }
                }
            }

            _ => {}
        }
    }
}

/// Reconcile viewport and search state with a freshly loaded buffer.
fn sync_after_load(model: &mut Model) {
    let total = model.document.buffer().line_count();
    model.viewport.set_total_lines(total);
    model.viewport.ensure_visible(model.document.buffer().cursor().line);
    super::update::refresh_search_matches(model, false);
}
