//! Command-line front end for the mdpad editor.
//!
//! Subcommands mirror the editor's actions:
//! - `preview` -- render markdown into a sanitized, standalone preview page,
//!   optionally saved under a timestamped `.html` name
//! - `download` -- save markdown under a timestamped filename
//! - `sanitize` -- run the sanitization policy over an HTML fragment
//! - `check` -- report whether the policy would alter the input
//! - `policy` -- list the allow-lists
//! - `example` -- print the sample document

pub mod commands;
pub mod logging;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use mdpad_core::config::download::HTML_EXTENSION;
use mdpad_core::config::{self, preview};
use mdpad_core::format::unix_now;
use mdpad_core::{EXAMPLE_MARKDOWN, SanitizeError};
use thiserror::Error;
use tracing::warn;

/// Markdown editor: sanitized previews and timestamped downloads.
#[derive(Parser, Debug)]
#[command(name = config::APP_NAME, version = config::APP_VERSION)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render markdown into a sanitized preview page.
    Preview {
        /// Markdown file, or `-` for stdin.
        input: PathBuf,

        /// Output file (default: stdout).
        #[arg(short, long, conflicts_with = "dir")]
        output: Option<PathBuf>,

        /// Save as `YYYYMMDDHHmmss.html` inside this directory.
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Page title.
        #[arg(long, default_value = preview::TITLE)]
        title: String,

        /// Markdown stylesheet URL.
        #[arg(long, default_value = preview::GITHUB_MARKDOWN_CSS)]
        stylesheet: String,
    },

    /// Save markdown as `YYYYMMDDHHmmss.md`.
    Download {
        /// Markdown file, or `-` for stdin.
        input: PathBuf,

        /// Target directory.
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Sanitize an HTML fragment.
    Sanitize {
        /// HTML file, or `-` for stdin.
        input: PathBuf,

        /// Output file (default: stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report whether sanitizing would alter the input (exit status 1 if so).
    Check {
        /// HTML file, or `-` for stdin.
        input: PathBuf,

        /// Treat the input as markdown and render it first.
        #[arg(long)]
        markdown: bool,
    },

    /// List the sanitization allow-lists.
    Policy {
        #[arg(value_enum, default_value_t = PolicyList::Tags)]
        list: PolicyList,

        /// Print a JSON array instead of one entry per line.
        #[arg(long)]
        json: bool,
    },

    /// Print the example markdown document.
    Example,
}

/// Which allow-list `policy` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyList {
    Tags,
    Attributes,
    Css,
}

/// CLI failures.
#[derive(Debug, Error)]
pub enum CliError {
    /// Nothing to save.
    #[error("content is empty, nothing to download")]
    EmptyContent,

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Sanitize(#[from] SanitizeError),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// `check` found content the policy would alter.
    UnsafeContent,
}

/// Run one parsed command, writing primary output to `stdout`.
pub fn run(cli: Cli, stdout: &mut dyn Write) -> Result<Outcome, CliError> {
    match cli.command {
        Command::Preview {
            input,
            output,
            dir,
            title,
            stylesheet,
        } => {
            let markdown = commands::read_input(&input)?;
            let page = commands::preview_page(&markdown, &title, &stylesheet)?;
            match dir {
                Some(dir) => {
                    let path =
                        commands::save_timestamped(&page, &dir, HTML_EXTENSION, unix_now())?;
                    writeln!(stdout, "{}", path.display())
                        .map_err(|source| CliError::io(Path::new(commands::STDIO), source))?;
                }
                None => commands::write_output(output.as_deref(), &page, stdout)?,
            }
        }

        Command::Download { input, dir } => {
            let markdown = commands::read_input(&input)?;
            let path = commands::download(&markdown, &dir, unix_now())?;
            writeln!(stdout, "{}", path.display())
                .map_err(|source| CliError::io(Path::new(commands::STDIO), source))?;
        }

        Command::Sanitize { input, output } => {
            let html = commands::read_input(&input)?;
            let clean = commands::sanitize_html(&html)?;
            commands::write_output(output.as_deref(), &clean, stdout)?;
        }

        Command::Check { input, markdown } => {
            let content = commands::read_input(&input)?;
            let unsafe_content = commands::check(&content, markdown)?;
            let verdict = if unsafe_content { "unsafe" } else { "clean" };
            writeln!(stdout, "{verdict}")
                .map_err(|source| CliError::io(Path::new(commands::STDIO), source))?;
            if unsafe_content {
                warn!(input = %input.display(), "sanitization would alter the input");
                return Ok(Outcome::UnsafeContent);
            }
        }

        Command::Policy { list, json } => {
            let entries = commands::render_policy_list(list, json)?;
            writeln!(stdout, "{entries}")
                .map_err(|source| CliError::io(Path::new(commands::STDIO), source))?;
        }

        Command::Example => {
            commands::write_output(None, EXAMPLE_MARKDOWN, stdout)?;
        }
    }
    Ok(Outcome::Done)
}
