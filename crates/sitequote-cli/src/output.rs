use console::style;
use serde::Serialize;
use std::fmt::Display;
use tabled::{settings::Style, Table, Tabled};

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Writes command results either for people or as JSON envelopes
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        Self { format: if json { OutputFormat::Json } else { OutputFormat::Human } }
    }

    pub fn info(&self, message: impl Display) {
        match self.format {
            OutputFormat::Human => {
                println!("{} {}", style("ℹ").blue().bold(), message);
            }
            OutputFormat::Json => {
                print_json(&serde_json::json!({
                    "status": "info",
                    "message": message.to_string(),
                }));
            }
        }
    }

    pub fn warning(&self, message: impl Display) {
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", style("⚠").yellow().bold(), message);
            }
            OutputFormat::Json => {
                eprint_json(&serde_json::json!({
                    "status": "warning",
                    "message": message.to_string(),
                }));
            }
        }
    }

    pub fn error(&self, message: impl Display) {
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", style("✗").red().bold(), message);
            }
            OutputFormat::Json => {
                eprint_json(&serde_json::json!({
                    "status": "error",
                    "message": message.to_string(),
                }));
            }
        }
    }

    /// Render rows as a table; in JSON mode the rows go out as an array
    pub fn table<T: Tabled + Serialize>(&self, data: Vec<T>) {
        match self.format {
            OutputFormat::Human => {
                if data.is_empty() {
                    println!("{}", style("(no data)").dim());
                } else {
                    let mut table = Table::new(data);
                    table.with(Style::rounded());
                    println!("{}", table);
                }
            }
            OutputFormat::Json => {
                print_json(&serde_json::json!({
                    "status": "success",
                    "data": data,
                }));
            }
        }
    }

    pub fn result<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "status": "success",
                    "data": data,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
        Ok(())
    }

    pub fn kv(&self, key: impl Display, value: impl Display) {
        match self.format {
            OutputFormat::Human => {
                println!("{}: {}", style(key).bold(), value);
            }
            OutputFormat::Json => {
                print_json(&serde_json::json!({
                    key.to_string(): value.to_string(),
                }));
            }
        }
    }

    pub fn section(&self, title: impl Display) {
        match self.format {
            OutputFormat::Human => {
                println!("\n{}", style(title).bold().underlined());
            }
            OutputFormat::Json => {}
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Failed to render JSON output: {}", e),
    }
}

fn eprint_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => eprintln!("{}", text),
        Err(e) => eprintln!("Failed to render JSON output: {}", e),
    }
}

/// Currency with two decimals and thousands separators
pub fn money(amount: f64) -> String {
    let cents = (amount * 100.0).round() / 100.0;
    let whole = cents.trunc();
    let fraction = ((cents - whole).abs() * 100.0).round() as u64;
    format!("${}.{:02}", sitequote_core::units::group_thousands(whole), fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(350.0), "$350.00");
        assert_eq!(money(6500.0), "$6,500.00");
        assert_eq!(money(1234.567), "$1,234.57");
        assert_eq!(money(0.0), "$0.00");
    }

    #[test]
    fn test_writer_mode() {
        assert!(OutputWriter::new(true).is_json());
        assert!(!OutputWriter::new(false).is_json());
    }
}
