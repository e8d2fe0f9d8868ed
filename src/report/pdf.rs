//! Paginated PDF rendition of a critique.
//!
//! Letter pages, built-in Helvetica fonts, greedy word wrap. Layout is
//! intentionally simple: a title block, the original idea, then the analysis
//! split into paragraphs, with page breaks whenever the cursor reaches the
//! bottom margin.

use chrono::{DateTime, Local};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};

use crate::config::ANALYST_NAME;
use crate::error::AgentError;

use super::format_date;

const PAGE_WIDTH_MM: f64 = 215.9; // Letter
const PAGE_HEIGHT_MM: f64 = 279.4;
const MARGIN_MM: f64 = 20.0;

const TITLE_SIZE: f64 = 18.0;
const HEADING_SIZE: f64 = 14.0;
const BODY_SIZE: f64 = 11.0;

const BODY_LEADING_MM: f64 = 5.5;
const HEADING_LEADING_MM: f64 = 8.0;
const TITLE_LEADING_MM: f64 = 10.0;

/// Characters per body line at 11pt Helvetica across the text column
const BODY_WRAP_CHARS: usize = 90;

/// Render the critique as a paginated PDF, returning the document bytes
pub fn render_pdf(
    idea: &str,
    critique: &str,
    generated_at: &DateTime<Local>,
) -> Result<Vec<u8>, AgentError> {
    let mut writer = PdfWriter::new("Business Idea Analysis")?;

    writer.title("Business Idea Analysis");
    writer.space(3.0);
    writer.body_line(&format!("Date: {}", format_date(generated_at)));
    writer.body_line(&format!("Analyst: {}", ANALYST_NAME));
    writer.space(6.0);

    writer.heading("Original Business Idea");
    writer.paragraphs(idea);
    writer.space(3.0);

    writer.heading("Analysis & Feedback");
    writer.paragraphs(critique);
    writer.space(6.0);

    writer.footer("Generated by Business Idea Refinement Agent");

    writer.finish()
}

struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
    /// Cursor height in mm from the page bottom
    y: f64,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self, AgentError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text");

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AgentError::Render(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AgentError::Render(e.to_string()))?;
        let oblique = doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| AgentError::Render(e.to_string()))?;

        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            oblique,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        })
    }

    /// Advance the cursor, breaking to a fresh page when it passes the
    /// bottom margin
    fn advance(&mut self, leading: f64) {
        self.y -= leading;
        if self.y < MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
    }

    fn write(&mut self, text: &str, size: f64, font: &IndirectFontRef, leading: f64) {
        self.advance(leading);
        self.layer
            .use_text(text, size, Mm(MARGIN_MM), Mm(self.y), font);
    }

    fn title(&mut self, text: &str) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.17, 0.24, 0.31, None)));
        let font = self.bold.clone();
        self.write(text, TITLE_SIZE, &font, TITLE_LEADING_MM);
        self.layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    }

    fn heading(&mut self, text: &str) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.20, 0.29, 0.37, None)));
        let font = self.bold.clone();
        self.write(text, HEADING_SIZE, &font, HEADING_LEADING_MM);
        self.layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    }

    fn body_line(&mut self, text: &str) {
        let font = self.regular.clone();
        self.write(text, BODY_SIZE, &font, BODY_LEADING_MM);
    }

    fn footer(&mut self, text: &str) {
        let font = self.oblique.clone();
        self.write(text, BODY_SIZE, &font, BODY_LEADING_MM);
    }

    /// Write text split into paragraphs on blank lines, wrapping each line
    fn paragraphs(&mut self, text: &str) {
        for paragraph in text.split("\n\n") {
            let paragraph = paragraph.trim();
            if paragraph.is_empty() {
                continue;
            }
            for line in paragraph.lines() {
                for wrapped in wrap(line, BODY_WRAP_CHARS) {
                    self.body_line(&wrapped);
                }
            }
            self.space(3.0);
        }
    }

    fn space(&mut self, mm: f64) {
        self.advance(mm);
    }

    fn finish(self) -> Result<Vec<u8>, AgentError> {
        self.doc
            .save_to_bytes()
            .map_err(|e| AgentError::Render(e.to_string()))
    }
}

/// Greedy word wrap by character count
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if current.is_empty() {
            current = word.to_string();
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_wrap_short_line_is_unchanged() {
        assert_eq!(wrap("a short line", 90), vec!["a short line"]);
    }

    #[test]
    fn test_wrap_splits_on_word_boundaries() {
        let lines = wrap("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap("", 90).is_empty());
        assert!(wrap("   ", 90).is_empty());
    }

    #[test]
    fn test_wrap_overlong_word_gets_own_line() {
        let lines = wrap("tiny supercalifragilisticexpialidocious end", 10);
        assert_eq!(
            lines,
            vec!["tiny", "supercalifragilisticexpialidocious", "end"]
        );
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let ts = Local.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap();
        let bytes = render_pdf("An idea.", "A critique.", &ts).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_cursor_breaks_to_fresh_page() {
        let mut writer = PdfWriter::new("t").unwrap();

        // Drive the cursor past the bottom margin
        let usable = PAGE_HEIGHT_MM - 2.0 * MARGIN_MM;
        let steps = (usable / BODY_LEADING_MM) as usize + 2;
        for _ in 0..steps {
            writer.advance(BODY_LEADING_MM);
        }

        // After the break the cursor sits near the top of a new page
        assert!(writer.y > PAGE_HEIGHT_MM / 2.0);
        assert!(writer.y <= PAGE_HEIGHT_MM - MARGIN_MM);
    }

    #[test]
    fn test_render_long_critique_grows_output() {
        let ts = Local.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap();
        let paragraph = "This analysis point repeats to force pagination. ".repeat(20);
        let critique = vec![paragraph; 30].join("\n\n");

        let short = render_pdf("An idea.", "A critique.", &ts).unwrap();
        let long = render_pdf("An idea.", &critique, &ts).unwrap();
        assert!(long.len() > short.len());
    }
}
