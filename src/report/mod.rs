//! Document writers for critique artifacts.
//!
//! The critique is rendered three ways: Markdown, a paginated PDF, and the
//! raw text. All three carry the same analysis.

pub mod markdown;
pub mod pdf;

pub use markdown::render_markdown;
pub use pdf::render_pdf;

use chrono::{DateTime, Local};

/// Human-readable timestamp used in the rendered documents
pub(crate) fn format_date(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%B %d, %Y at %I:%M %p").to_string()
}
