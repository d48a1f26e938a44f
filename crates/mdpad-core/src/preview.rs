//! Standalone preview document.
//!
//! Wraps sanitized HTML in a complete page: GitHub Markdown styling, a
//! centered content card, and print rules that keep headings, tables and
//! code blocks from splitting across pages.

use crate::config::preview;

/// Builder for the preview page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewPage<'a> {
    title: &'a str,
    stylesheet: &'a str,
    body: &'a str,
}

impl<'a> PreviewPage<'a> {
    /// Page around `safe_html`, which must already be sanitized.
    pub fn new(safe_html: &'a str) -> Self {
        Self {
            title: preview::TITLE,
            stylesheet: preview::GITHUB_MARKDOWN_CSS,
            body: safe_html,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn stylesheet(mut self, url: &'a str) -> Self {
        self.stylesheet = url;
        self
    }

    /// Render the full HTML document. The body is inserted verbatim.
    pub fn render(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="stylesheet" href="{stylesheet}">
<style>{css}</style>
</head>
<body>
<div class="container">
<article id="{content_id}" class="markdown-body">
{body}
</article>
</div>
</body>
</html>
"#,
            title = escape_html(self.title),
            stylesheet = escape_html(self.stylesheet),
            css = page_styles(),
            content_id = preview::CONTENT_ID,
            body = self.body,
        )
    }
}

/// Render the preview page with default settings.
pub fn render_preview_page(safe_html: &str) -> String {
    PreviewPage::new(safe_html).render()
}

fn page_styles() -> String {
    format!(
        r#"
body {{
  margin: 0;
  padding: 0;
  background-color: {background};
}}

.container {{
  max-width: 100%;
  margin: 0 auto;
  padding: 20px;
}}

.markdown-body {{
  box-sizing: border-box;
  background-color: {card};
  padding: 30px;
  margin: 0 auto;
  width: 90%;
  border-radius: 8px;
  box-shadow: 0 2px 10px rgba(0, 0, 0, 0.1);
  font-family: {font};
  text-align: left;
}}

.markdown-body table th {{
  background-color: {table_header};
  font-weight: 600;
}}

.markdown-body h1,
.markdown-body h2,
.markdown-body h3,
.markdown-body h4,
.markdown-body h5,
.markdown-body h6 {{
  letter-spacing: normal;
  word-spacing: normal;
  font-family: {font};
}}

.markdown-body * {{
  word-break: normal;
  overflow-wrap: break-word;
}}

@media print {{
  h1, h2, h3, h4, h5, h6,
  img, table, pre, figure, blockquote,
  ul, ol, dl {{
    break-inside: avoid-page;
    page-break-inside: avoid;
  }}
  h1, h2 {{
    break-after: avoid-page;
    page-break-after: avoid;
  }}
  h1 {{
    break-before: page;
    page-break-before: page;
  }}
}}
"#,
        background = preview::BACKGROUND_COLOR,
        card = preview::CARD_COLOR,
        table_header = preview::TABLE_HEADER_COLOR,
        font = preview::FONT_FAMILY,
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
