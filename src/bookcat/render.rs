//! Record to PDF rendering.
//!
//! [`PdfRenderer`] builds a small, self-contained PDF with `pdf-writer`,
//! using the standard Helvetica-Bold font, so no font files or external tools
//! are needed. Each record becomes an A4 document listing, in this order:
//!
//! ```text
//! Title: ...
//! Author: ...
//! Publisher: ...
//! Description: ...
//! ```
//!
//! Long values are wrapped at word boundaries and spill onto further pages.
//! Text is encoded as WinAnsi, so Latin-1 letters and typographic punctuation
//! (’ “ ” – — €) come through; anything else is printed as `?`.
//! The output depends only on the record's fields, so rendering the same
//! record twice yields identical bytes.

use crate::error::{CatalogError, Result};
use crate::model::Record;
use encoding_rs::WINDOWS_1252;
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

/// Turns a record into document bytes.
///
/// Implementations are shared read-only between export workers.
pub trait Renderer: Send + Sync {
    fn render(&self, record: &Record) -> Result<Vec<u8>>;
}

// A4 in points.
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
/// 10 mm
const MARGIN: f32 = 28.35;
const FONT_SIZE: f32 = 16.0;
const LEADING: f32 = 28.35;
const WRAP_AT: usize = 56;

const FONT_NAME: Name<'static> = Name(b"F1");

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }

    fn lines(record: &Record) -> Vec<String> {
        let fields = [
            ("Title", &record.title),
            ("Author", &record.author),
            ("Publisher", &record.publisher),
            ("Description", &record.description),
        ];

        let mut lines = Vec::new();
        for (label, value) in fields {
            let text = format!("{}: {}", label, value);
            for paragraph in text.lines() {
                lines.extend(wrap(paragraph, WRAP_AT));
            }
        }
        lines
    }
}

impl Renderer for PdfRenderer {
    fn render(&self, record: &Record) -> Result<Vec<u8>> {
        if record.id.is_empty() {
            return Err(CatalogError::Render {
                id: record.id.clone(),
                reason: "record has no id".to_string(),
            });
        }

        let lines = Self::lines(record);
        let pages: Vec<&[String]> = lines.chunks(lines_per_page()).collect();
        Ok(write_pdf(&pages))
    }
}

fn lines_per_page() -> usize {
    ((PAGE_HEIGHT - 2.0 * MARGIN) / LEADING).floor() as usize
}

/// Greedy word wrap. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                out.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            out.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > width && current_len > 0 {
            out.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 || out.is_empty() {
        out.push(current);
    }
    out
}

/// Encodes `text` for a WinAnsi font. Characters the encoding lacks become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for c in text.chars() {
        let (bytes, _, unmappable) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
        if unmappable || c.is_control() {
            out.push(b'?');
        } else {
            out.extend_from_slice(&bytes);
        }
    }
    out
}

fn page_content(lines: &[String]) -> Vec<u8> {
    let mut content = Content::new();
    content.begin_text();
    content.set_font(FONT_NAME, FONT_SIZE);
    content.set_leading(LEADING);
    content.next_line(MARGIN, PAGE_HEIGHT - MARGIN - FONT_SIZE);
    for line in lines {
        content.show(Str(&win_ansi(line)));
        content.next_line_using_leading();
    }
    content.end_text();
    content.finish().to_vec()
}

fn write_pdf(pages: &[&[String]]) -> Vec<u8> {
    // 1 catalog, 2 page tree, 3 font, then a page/content pair per page.
    let catalog_id = Ref::new(1);
    let tree_id = Ref::new(2);
    let font_id = Ref::new(3);
    let page_id = |i: usize| Ref::new(4 + 2 * i as i32);
    let content_id = |i: usize| Ref::new(5 + 2 * i as i32);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids((0..pages.len()).map(page_id))
        .count(pages.len() as i32);
    pdf.type1_font(font_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for (i, lines) in pages.iter().enumerate() {
        let mut page = pdf.page(page_id(i));
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(tree_id);
        page.contents(content_id(i));
        page.resources().fonts().pair(FONT_NAME, font_id);
        page.finish();

        pdf.stream(content_id(i), &page_content(lines));
    }

    pdf.finish()
}
