use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::document::Document;
use crate::search::Match;
use crate::ui::style::Theme;
use crate::ui::viewport::Viewport;

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which footer prompt is collecting input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    /// Path of a file to open.
    Open,
    /// Path to save the buffer under.
    SaveAs,
    /// Search query.
    Find,
    /// First half of replace: the text to find.
    ReplaceQuery,
    /// Second half of replace: the replacement for `query`.
    ReplaceWith { query: String },
}

/// A single-line footer input, driving open/save-as/find/replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

impl Prompt {
    pub const fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
        }
    }

    /// Label shown in front of the input field.
    pub fn title(&self) -> &'static str {
        match self.kind {
            PromptKind::Open => "Open file",
            PromptKind::SaveAs => "Save as",
            PromptKind::Find => "Find",
            PromptKind::ReplaceQuery => "Replace: find",
            PromptKind::ReplaceWith { .. } => "Replace with",
        }
    }
}

/// A file operation decided by a pure update, executed by the effects layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    Open(PathBuf),
    SaveAs(PathBuf),
}

pub struct Model {
    /// The document being edited (buffer, path, dirty flag, recent files)
    pub document: Document,
    /// Viewport managing the visible slice of the buffer
    pub viewport: Viewport,
    /// Active theme; restyles the whole frame when toggled
    pub theme: Theme,
    /// Whether external-change watching is enabled
    pub watch_enabled: bool,
    /// Whether autosave ticks persist the buffer
    pub autosave_enabled: bool,
    /// Whether the help overlay is visible
    pub help_visible: bool,
    /// Active footer prompt, if any
    pub prompt: Option<Prompt>,
    /// Whether the recent-files picker overlay is open
    pub recent_picker_open: bool,
    /// Current search query
    pub search_query: Option<String>,
    /// Locations of every match of the current query
    pub(super) search_matches: Vec<Match>,
    /// Selected match index inside `search_matches`
    pub(super) search_match_index: Option<usize>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after a quit attempt with unsaved changes; second attempt quits
    pub quit_confirmed: bool,
    /// Set after an open attempt with unsaved changes; second attempt proceeds
    pub open_confirmed: bool,
    /// File operation for the effects layer to execute
    pub(super) pending_file_action: Option<FileAction>,
    toast: Option<Toast>,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("document", &self.document)
            .field("watch_enabled", &self.watch_enabled)
            .field("autosave_enabled", &self.autosave_enabled)
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model around an already-loaded document.
    pub fn new(document: Document, terminal_size: (u16, u16), theme: Theme) -> Self {
        let total_lines = document.buffer().line_count();
        Self {
            document,
            viewport: Viewport::new(
                terminal_size.0,
                terminal_size.1.saturating_sub(1),
                total_lines,
            ),
            theme,
            watch_enabled: false,
            autosave_enabled: true,
            help_visible: false,
            prompt: None,
            recent_picker_open: false,
            search_query: None,
            search_matches: Vec::new(),
            search_match_index: None,
            should_quit: false,
            quit_confirmed: false,
            open_confirmed: false,
            pending_file_action: None,
            toast: None,
            config_global_path: None,
            config_local_path: None,
        }
    }

    pub const fn search_match_count(&self) -> usize {
        self.search_matches.len()
    }

    /// One-based (current, total) for the search bar.
    pub fn current_search_match(&self) -> Option<(usize, usize)> {
        self.search_match_index
            .map(|idx| (idx + 1, self.search_matches.len()))
    }

    /// Location of the currently selected match, for highlighting.
    pub fn current_match(&self) -> Option<Match> {
        self.search_match_index
            .and_then(|idx| self.search_matches.get(idx).copied())
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(Document::new(), (80, 24), Theme::default())
    }
}
