//! Markdown rendering utilities.
//!
//! Provides markdown-to-HTML conversion with the editor's fixed rendering
//! configuration, and a sanitized variant safe to inject into a page.

use comrak::{Options, markdown_to_html};

use crate::config;
use crate::error::SanitizeError;
use crate::sanitize::SanitizationPolicy;

/// Sample document the editor starts with.
pub const EXAMPLE_MARKDOWN: &str = include_str!("../assets/example.md");

/// Convert markdown to raw, unsanitized HTML.
///
/// Supports extended markdown syntax including:
/// - Strikethrough (`~~text~~`)
/// - Tables
/// - Autolinks
/// - Task lists (`- [x] done`)
/// - Footnotes
///
/// Soft line breaks become `<br>`. Inline HTML is kept verbatim, so the
/// output must go through [`crate::sanitize`] before it reaches a page.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = config::markdown::GFM;
    options.extension.table = config::markdown::GFM;
    options.extension.autolink = config::markdown::GFM;
    options.extension.tasklist = config::markdown::GFM;
    options.extension.footnotes = config::markdown::GFM;
    options.render.hardbreaks = config::markdown::HARD_BREAKS;
    options.parse.smart = config::markdown::SMART_PUNCTUATION;
    // Raw HTML passes through here; sanitization happens afterwards.
    options.render.r#unsafe = true;

    markdown_to_html(markdown, &options)
}

/// Convert markdown to HTML that is safe to inject into a page.
pub fn markdown_to_safe_html(markdown: &str) -> Result<String, SanitizeError> {
    SanitizationPolicy::shared().sanitize(&render_markdown(markdown))
}
