//! Terminal and JSON rendering helpers.

use anyhow::Result;
use clap::ValueEnum;
use ronda::traits::format;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::fmt::Display;

/// Width of the boxed headers.
const BANNER_WIDTH: usize = 62;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable tables
    #[default]
    Text,
    /// One JSON document keyed by symbol
    Json,
}

/// Collects per-symbol output and prints it in the chosen format.
///
/// Text is printed as it is produced. JSON is gathered into one object keyed
/// by symbol and printed by [`Output::finish`], so a failing ticker shows up
/// as `{"Error": ...}` next to the others instead of aborting the run.
#[derive(Debug)]
pub(crate) struct Output {
    format: OutputFormat,
    document: Map<String, Value>,
    failures: usize,
}

impl Output {
    /// Start a command's output, printing its header in text mode.
    pub(crate) fn new(format: OutputFormat, title: &str) -> Self {
        if format == OutputFormat::Text {
            banner(title);
        }
        Self {
            format,
            document: Map::new(),
            failures: 0,
        }
    }

    /// Whether text output is wanted.
    pub(crate) fn is_text(&self) -> bool {
        self.format == OutputFormat::Text
    }

    /// Record a symbol's result for JSON output. Does nothing in text mode.
    pub(crate) fn record<T: Serialize>(&mut self, symbol: &str, value: &T) -> Result<()> {
        if !self.is_text() {
            self.document
                .insert(symbol.to_string(), serde_json::to_value(value)?);
        }
        Ok(())
    }

    /// Report a symbol that could not be analysed.
    pub(crate) fn failure(&mut self, symbol: &str, error: &dyn Display) {
        self.failures += 1;
        tracing::warn!(symbol, error = %error, "analysis failed");
        if self.is_text() {
            println!("{symbol}: Error: {error}\n");
        } else {
            self.document
                .insert(symbol.to_string(), json!({ "Error": error.to_string() }));
        }
    }

    /// Print the JSON document, if any.
    pub(crate) fn finish(self) -> Result<()> {
        if !self.is_text() {
            println!("{}", serde_json::to_string_pretty(&self.document)?);
        } else if self.failures > 0 {
            println!("{} symbol(s) could not be analysed.", self.failures);
        }
        Ok(())
    }
}

/// Print a boxed title.
pub(crate) fn banner(title: &str) {
    let rule = "═".repeat(BANNER_WIDTH);
    println!("\n╔{rule}╗");
    println!("║{title:^BANNER_WIDTH$}║");
    println!("╚{rule}╝\n");
}

/// Print a heavy section rule around a heading.
pub(crate) fn section(heading: &str) {
    let rule = "━".repeat(BANNER_WIDTH);
    println!("{rule}");
    println!("{heading}");
    println!("{rule}\n");
}

/// Currency amount with a compact suffix, e.g. `$1.25B`.
pub(crate) fn money(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", format::compact(-value))
    } else {
        format!("${}", format::compact(value))
    }
}

/// Signed percentage with one decimal, e.g. `+12.3%`.
pub(crate) fn signed_percent(value: f64) -> String {
    let text = format::percent(value, 1);
    if value > 0.0 { format!("+{text}") } else { text }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(1.25e9), "$1.25B");
        assert_eq!(money(-3e6), "-$3.00M");
        assert_eq!(money(8.0), "$8.00");
    }

    #[test]
    fn test_signed_percent() {
        assert_eq!(signed_percent(0.123), "+12.3%");
        assert_eq!(signed_percent(-0.05), "-5.0%");
        assert_eq!(signed_percent(0.0), "0.0%");
    }

    #[test]
    fn test_json_document_keeps_failures() {
        let mut out = Output::new(OutputFormat::Json, "Test");
        out.record("AAPL", &json!({"Value per Share": 1.0})).unwrap();
        out.failure("ZZZZ", &"Symbol not found");

        assert_eq!(out.document["AAPL"]["Value per Share"], 1.0);
        assert_eq!(out.document["ZZZZ"], json!({"Error": "Symbol not found"}));
        assert_eq!(out.failures, 1);
    }

    #[test]
    fn test_text_mode_records_nothing() {
        let mut out = Output::new(OutputFormat::Text, "Test");
        out.record("AAPL", &1.0).unwrap();
        assert!(out.document.is_empty());
    }
}
