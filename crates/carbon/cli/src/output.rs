//! Output formatting utilities

use colored::*;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Serialize a value in a machine-readable format.
///
/// `Text` falls back to pretty JSON; commands with a text rendering handle
/// that case themselves.
pub fn render<T: Serialize>(data: &T, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text | OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
    })
}

/// Print a single item in the specified format
pub fn print_single<T: Serialize>(data: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(data, format)?);
    Ok(())
}

/// Print rows as a table
pub fn print_table<T: Tabled>(rows: Vec<T>) {
    if rows.is_empty() {
        println!("{}", "No results".dimmed());
    } else {
        println!("{}", Table::new(rows));
    }
}

/// Print a `key: value` line with the key highlighted
pub fn print_field(key: &str, value: impl std::fmt::Display) {
    println!("  {} {}", format!("{key}:").bold(), value);
}

/// Print a section heading
pub fn print_heading(title: &str) {
    println!("{}", title.bold().underline());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_render_formats() {
        let value = json!({"total_blocks": 3});
        let json = render(&value, OutputFormat::Json).unwrap();
        assert!(json.contains("\"total_blocks\": 3"));

        let yaml = render(&value, OutputFormat::Yaml).unwrap();
        assert_eq!(yaml.trim(), "total_blocks: 3");
    }
}
