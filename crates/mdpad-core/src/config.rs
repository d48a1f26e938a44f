//! Application configuration.
//!
//! Centralizes the constants shared by the renderer, the preview page and
//! the CLI. The sanitization allow-lists live next to the policy in
//! [`crate::sanitize`].

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name.
pub const APP_NAME: &str = "mdpad";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Markdown Rendering
// =============================================================================

/// Fixed Markdown rendering configuration.
pub mod markdown {
    /// GitHub-flavored extensions (tables, strikethrough, autolinks, task
    /// lists, footnotes).
    pub const GFM: bool = true;
    /// Render soft line breaks as `<br>`.
    pub const HARD_BREAKS: bool = true;
    /// Typographic quote and dash substitution.
    pub const SMART_PUNCTUATION: bool = false;
}

// =============================================================================
// Preview Page
// =============================================================================

/// Preview document settings.
pub mod preview {
    /// Default document title.
    pub const TITLE: &str = "Markdown Preview";

    /// GitHub Markdown stylesheet.
    pub const GITHUB_MARKDOWN_CSS: &str =
        "https://cdnjs.cloudflare.com/ajax/libs/github-markdown-css/5.1.0/github-markdown-light.min.css";

    /// `id` of the element holding the rendered content.
    pub const CONTENT_ID: &str = "preview-content-area";

    /// Page background.
    pub const BACKGROUND_COLOR: &str = "#f5f5f5";

    /// Content card background.
    pub const CARD_COLOR: &str = "#ffffff";

    /// Table header background.
    pub const TABLE_HEADER_COLOR: &str = "#e9ecef";

    /// Font stack for rendered content.
    pub const FONT_FAMILY: &str = r#"-apple-system, "PingFang SC", "Hiragino Sans GB", "Microsoft YaHei", sans-serif"#;
}

// =============================================================================
// Download
// =============================================================================

/// File download settings.
pub mod download {
    /// Extension for downloaded Markdown sources.
    pub const MARKDOWN_EXTENSION: &str = "md";
    /// Extension for saved preview pages.
    pub const HTML_EXTENSION: &str = "html";
}
