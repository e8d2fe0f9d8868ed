//! Markdown rendition of a critique.

use chrono::{DateTime, Local};

use crate::config::ANALYST_NAME;

use super::format_date;

/// Render the critique as a Markdown document
pub fn render_markdown(idea: &str, critique: &str, generated_at: &DateTime<Local>) -> String {
    format!(
        "# Business Idea Analysis\n\
         **Date**: {date}  \n\
         **Analyst**: {analyst}\n\n\
         ## Original Business Idea\n\n\
         {idea}\n\n\
         ## Analysis & Feedback\n\n\
         {critique}\n\n\
         ---\n\
         *Generated by Business Idea Refinement Agent*\n",
        date = format_date(generated_at),
        analyst = ANALYST_NAME,
        idea = idea,
        critique = critique,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_render_contains_sections() {
        let ts = Local.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap();
        let doc = render_markdown("Sell moon rocks.", "Bold, but sourcing is hard.", &ts);

        assert!(doc.starts_with("# Business Idea Analysis\n"));
        assert!(doc.contains("**Date**: March 14, 2025 at 03:09 PM"));
        assert!(doc.contains("## Original Business Idea\n\nSell moon rocks."));
        assert!(doc.contains("## Analysis & Feedback\n\nBold, but sourcing is hard."));
        assert!(doc.contains("*Generated by Business Idea Refinement Agent*"));
    }
}
