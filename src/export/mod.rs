//! PDF export.
//!
//! Produces a single-page PDF that places the entire buffer as one drawn
//! string at a fixed coordinate — no pagination, no line wrapping. That
//! matches the export behavior this editor has always had; the output is a
//! faithful dump, not a typeset document. The writer emits the five objects
//! a minimal PDF needs (catalog, page tree, page, font, content stream)
//! plus a correct xref table, with no external PDF library.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// US-Letter media box, in points.
const PAGE_WIDTH: u32 = 612;
const PAGE_HEIGHT: u32 = 792;

/// Where the buffer text is drawn on the page.
const TEXT_X: u32 = 50;
const TEXT_Y: u32 = 750;
const FONT_SIZE: u32 = 12;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Save the file first before exporting to PDF.")]
    NoFilePath,
    #[error("Could not write PDF: {0}")]
    Io(#[from] std::io::Error),
}

/// The PDF path derived from a document path: same location, `.pdf` extension.
pub fn pdf_output_path(path: &Path) -> PathBuf {
    path.with_extension("pdf")
}

/// Export `text` next to `doc_path` as a single-page PDF.
///
/// # Errors
///
/// Fails with [`ExportError::NoFilePath`] when the document has never been
/// saved, or with an I/O error if the write fails.
pub fn export_pdf(doc_path: Option<&Path>, text: &str) -> Result<PathBuf, ExportError> {
    let path = doc_path.ok_or(ExportError::NoFilePath)?;
    let out = pdf_output_path(path);
    fs::write(&out, render_pdf(text))?;
    Ok(out)
}

/// Serialize `text` into a complete one-page PDF document.
pub fn render_pdf(text: &str) -> Vec<u8> {
    let stream = format!(
        "BT\n/F1 {FONT_SIZE} Tf\n{TEXT_X} {TEXT_Y} Td\n({}) Tj\nET",
        escape_pdf_string(text)
    );

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            stream.len(),
            stream
        ),
    ];

    let mut buf: Vec<u8> = Vec::with_capacity(text.len() + 1024);
    buf.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (idx, body) in objects.iter().enumerate() {
        offsets.push(buf.len());
        buf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", idx + 1).as_bytes());
    }

    let xref_offset = buf.len();
    buf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    buf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        buf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    buf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    buf
}

/// Escape the characters that terminate or confuse a PDF literal string.
fn escape_pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            _ => out.push(ch),
        }
    }
    out
}
