//! Output formatting for planned networks.
//!
//! - [`info`] - Human-readable report
//! - [`json`] - JSON documents
//! - [`csv`] - CSV rows
//! - [`terminal`] - Field formatting helpers

mod csv;
mod info;
mod json;
mod terminal;

use crate::error::{Error, Result};
use crate::models::ProviderRegistry;
use crate::processing::TopologyPlan;
use std::fmt;
use std::str::FromStr;

pub use csv::{providers_csv, subnet_csv};
pub use info::{info_report, providers_table};
pub use json::{plan_json, providers_json};
pub use terminal::{format_field, format_thousands};

/// Supported output formats.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Info,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<OutputFormat> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(OutputFormat::Info),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(Error::UnsupportedOutput(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Info => "info",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        })
    }
}

/// Render a plan in the requested format.
pub fn render_plan(plan: &TopologyPlan, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Info => Ok(info_report(plan)),
        OutputFormat::Json => plan_json(plan),
        OutputFormat::Csv => Ok(subnet_csv(plan)),
    }
}

/// Render the provider table in the requested format.
pub fn render_providers(registry: &ProviderRegistry, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Info => Ok(providers_table(registry)),
        OutputFormat::Json => providers_json(registry),
        OutputFormat::Csv => Ok(providers_csv(registry)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("info".parse::<OutputFormat>().unwrap(), OutputFormat::Info);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!(matches!(
            "terraform".parse::<OutputFormat>(),
            Err(Error::UnsupportedOutput(name)) if name == "terraform"
        ));
        assert_eq!(OutputFormat::default().to_string(), "info");
    }
}
