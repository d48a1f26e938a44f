//! Subcommand handlers.
//!
//! Each handler works on strings and paths so it can be driven from tests
//! without spawning the binary.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use mdpad_core::config::download::MARKDOWN_EXTENSION;
use mdpad_core::format::{format_size, timestamp_filename};
use mdpad_core::{
    PreviewPage, allowed_attributes, allowed_css_properties, allowed_tags, has_unsafe_content,
    markdown_to_safe_html, sanitize,
};
use tracing::{debug, info};

use crate::{CliError, PolicyList};

/// Path argument meaning "standard input" or "standard output".
pub const STDIO: &str = "-";

/// Read a whole input file, or stdin for `-`.
pub fn read_input(path: &Path) -> Result<String, CliError> {
    let mut content = String::new();
    if path.as_os_str() == STDIO {
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|source| CliError::io(path, source))?;
    } else {
        content = fs::read_to_string(path).map_err(|source| CliError::io(path, source))?;
    }
    debug!(path = %path.display(), size = %format_size(content.len() as u64), "read input");
    Ok(content)
}

/// Write `content` to `path`, or to `stdout` when no path (or `-`) is given.
pub fn write_output(
    path: Option<&Path>,
    content: &str,
    stdout: &mut dyn Write,
) -> Result<(), CliError> {
    match path {
        Some(path) if path.as_os_str() != STDIO => {
            fs::write(path, content).map_err(|source| CliError::io(path, source))?;
            info!(path = %path.display(), size = %format_size(content.len() as u64), "wrote output");
        }
        _ => {
            stdout
                .write_all(content.as_bytes())
                .map_err(|source| CliError::io(Path::new(STDIO), source))?;
        }
    }
    Ok(())
}

/// Render markdown into a complete, sanitized preview page.
pub fn preview_page(markdown: &str, title: &str, stylesheet: &str) -> Result<String, CliError> {
    let body = markdown_to_safe_html(markdown)?;
    Ok(PreviewPage::new(&body)
        .title(title)
        .stylesheet(stylesheet)
        .render())
}

/// Write `content` to `YYYYMMDDHHmmss.<extension>` inside `dir`.
///
/// Never overwrites an existing file.
pub fn save_timestamped(
    content: &str,
    dir: &Path,
    extension: &str,
    unix_secs: u64,
) -> Result<PathBuf, CliError> {
    let path = dir.join(timestamp_filename(extension, unix_secs));
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|source| CliError::io(&path, source))?;
    file.write_all(content.as_bytes())
        .map_err(|source| CliError::io(&path, source))?;

    info!(path = %path.display(), size = %format_size(content.len() as u64), "saved file");
    Ok(path)
}

/// Save markdown under a timestamped name inside `dir`.
///
/// Refuses whitespace-only content.
pub fn download(markdown: &str, dir: &Path, unix_secs: u64) -> Result<PathBuf, CliError> {
    if markdown.trim().is_empty() {
        return Err(CliError::EmptyContent);
    }
    save_timestamped(markdown, dir, MARKDOWN_EXTENSION, unix_secs)
}

/// Sanitize an HTML fragment.
pub fn sanitize_html(html: &str) -> Result<String, CliError> {
    Ok(sanitize(html)?)
}

/// Whether the policy would alter `input`. Markdown is rendered first when
/// `is_markdown` is set.
pub fn check(input: &str, is_markdown: bool) -> Result<bool, CliError> {
    let unsafe_content = if is_markdown {
        has_unsafe_content(&mdpad_core::render_markdown(input))?
    } else {
        has_unsafe_content(input)?
    };
    debug!(unsafe_content, "checked input");
    Ok(unsafe_content)
}

/// One of the policy allow-lists.
pub fn policy_list(list: PolicyList) -> &'static [&'static str] {
    match list {
        PolicyList::Tags => allowed_tags(),
        PolicyList::Attributes => allowed_attributes(),
        PolicyList::Css => allowed_css_properties(),
    }
}

/// An allow-list as lines, or as a pretty JSON array.
pub fn render_policy_list(list: PolicyList, json: bool) -> Result<String, CliError> {
    let entries = policy_list(list);
    if json {
        Ok(serde_json::to_string_pretty(entries)?)
    } else {
        Ok(entries.join("\n"))
    }
}
