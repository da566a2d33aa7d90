//! Document state: the open file, the dirty flag and the recent-files list.
//!
//! All handlers receive the [`Document`] by reference; there is no ambient
//! editor state anywhere else. File I/O is deliberately plain whole-file
//! UTF-8 read/write with no temp-file dance, so a crash mid-write can
//! truncate the target.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::editor::EditorBuffer;

/// How many entries the recent-files list retains.
pub const RECENT_CAPACITY: usize = 5;

/// Most-recent-first list of opened paths, capped at [`RECENT_CAPACITY`].
///
/// Recording a path that is already present moves it to the front; entries
/// are unique. Not persisted across runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecentFiles {
    entries: Vec<PathBuf>,
}

impl RecentFiles {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record `path` as the most recently opened file.
    pub fn record(&mut self, path: &Path) {
        if let Some(pos) = self.entries.iter().position(|p| p == path) {
            self.entries.remove(pos);
        }
        self.entries.insert(0, path.to_path_buf());
        self.entries.truncate(RECENT_CAPACITY);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.iter()
    }

    pub fn get(&self, idx: usize) -> Option<&PathBuf> {
        self.entries.get(idx)
    }

    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The document being edited: buffer, optional backing path, recent files.
///
/// Created at startup with no path, a clean empty buffer and an empty
/// recent list; dropped at process exit.
#[derive(Debug)]
pub struct Document {
    buffer: EditorBuffer,
    path: Option<PathBuf>,
    recent: RecentFiles,
}

impl Document {
    /// An empty, unnamed, clean document.
    pub fn new() -> Self {
        Self {
            buffer: EditorBuffer::empty(),
            path: None,
            recent: RecentFiles::new(),
        }
    }

    /// An unnamed, clean document seeded with `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: EditorBuffer::from_text(text),
            path: None,
            recent: RecentFiles::new(),
        }
    }

    pub const fn buffer(&self) -> &EditorBuffer {
        &self.buffer
    }

    pub const fn buffer_mut(&mut self) -> &mut EditorBuffer {
        &mut self.buffer
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Display name for the status bar.
    pub fn file_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(|| "untitled".to_string(), |n| n.to_string_lossy().to_string())
    }

    pub const fn recent(&self) -> &RecentFiles {
        &self.recent
    }

    /// Whether the in-memory buffer diverges from the file on disk.
    pub const fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Flag the buffer as diverged. Side effect only.
    pub const fn mark_dirty(&mut self) {
        self.buffer.mark_dirty();
    }

    /// Clear the divergence flag, after a successful save.
    pub const fn clear_dirty(&mut self) {
        self.buffer.mark_clean();
    }

    /// Remember `path` at the front of the recent-files list.
    pub fn record_opened(&mut self, path: &Path) {
        self.recent.record(path);
    }

    /// Open `path`, replacing the buffer with its whole-file UTF-8 content.
    ///
    /// A path that does not exist yet binds an empty buffer to it, so saving
    /// creates the file. The path is recorded in the recent list either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read as UTF-8 text.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let text = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Could not open file: {}", path.display()))?
        } else {
            String::new()
        };
        self.buffer = EditorBuffer::from_text(&text);
        self.path = Some(path.to_path_buf());
        self.record_opened(path);
        Ok(())
    }

    /// Replace the buffer with the on-disk content of the current path.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no path or the file cannot be read.
    pub fn reload_from_disk(&mut self) -> Result<()> {
        let path = self
            .path
            .clone()
            .context("no file associated with this buffer")?;
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Could not open file: {}", path.display()))?;
        self.buffer = EditorBuffer::from_text(&text);
        Ok(())
    }

    /// Write the buffer to the current path, overwriting, then clear dirty.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no path or the write fails. On failure
    /// the dirty flag is left set.
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .path
            .clone()
            .context("no file associated with this buffer")?;
        fs::write(&path, self.buffer.text())
            .with_context(|| format!("Could not save file: {}", path.display()))?;
        self.clear_dirty();
        Ok(())
    }

    /// Rebind the document to `path` and save there.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the path is still rebound.
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        self.path = Some(path.to_path_buf());
        self.record_opened(path);
        self.save()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
