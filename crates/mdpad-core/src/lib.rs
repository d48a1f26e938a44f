//! Core of the mdpad Markdown editor.
//!
//! - [`sanitize`] - HTML sanitization policy (allow-lists plus element hooks)
//! - [`markdown`] - Markdown rendering with the editor's fixed options
//! - [`preview`] - standalone preview page around sanitized HTML
//! - [`format`] - timestamped download filenames, size formatting
//! - [`config`] - shared constants

pub mod config;
pub mod error;
pub mod format;
pub mod markdown;
pub mod preview;
pub mod sanitize;

pub use error::SanitizeError;
pub use markdown::{EXAMPLE_MARKDOWN, markdown_to_safe_html, render_markdown};
pub use preview::{PreviewPage, render_preview_page};
pub use sanitize::{
    SanitizationPolicy, allowed_attributes, allowed_css_properties, allowed_tags,
    has_unsafe_content, sanitize,
};
