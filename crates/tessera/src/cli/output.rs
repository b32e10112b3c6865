//! Output formatting utilities

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use tessera_types::ValueError;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
    /// Human-readable text
    #[default]
    Text,
}

/// Color output modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Set up color output based on user preference
pub fn setup_colors(mode: ColorMode) {
    let enabled = match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal(),
    };
    colored::control::set_override(enabled);
}

/// Format an error for display
///
/// Value errors carry their diagnostic code and, when available, help text.
pub fn format_error(error: &anyhow::Error) -> String {
    let mut message = format!("{} {:#}", "Error:".red().bold(), error);
    if let Some(value_error) = error.chain().find_map(|e| e.downcast_ref::<ValueError>()) {
        let code = value_error.code();
        message.push_str(&format!(" [{}]", code.to_string().yellow()));
        if let Some(help) = code.info().help {
            message.push_str(&format!("\n  {} {}", "help:".cyan(), help));
        }
    }
    message
}

/// Format a warning for display
pub fn format_warning(warning: &str) -> String {
    format!("{} {}", "Warning:".yellow().bold(), warning)
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

/// Write output to a file or stdout
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
        eprintln!(
            "{}",
            format_success(&format!("Output written to {}", path.display()))
        );
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Render a report in the requested format
pub fn render<T: Serialize + Display>(report: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(report).context("Failed to serialize JSON"),
        OutputFormat::Pretty => {
            serde_json::to_string_pretty(report).context("Failed to serialize JSON")
        }
        OutputFormat::Text => Ok(report.to_string()),
    }
}

/// Print a report in the specified format
pub fn print_report<T: Serialize + Display>(
    report: &T,
    format: OutputFormat,
    output_file: Option<&Path>,
) -> Result<()> {
    write_output(&render(report, format)?, output_file)
}

/// Header cell for text tables
pub fn heading(label: &str) -> String {
    label.bold().to_string()
}
