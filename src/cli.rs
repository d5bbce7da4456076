//! CLI argument parsing for Enlace

use clap::{Parser, ValueEnum};

/// Output format for join-state reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable sectioned report (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "enlace")]
#[command(version)]
#[command(about = "Pure Rust Entra ID (Azure AD) device join state reader", long_about = None)]
pub struct Cli {
    /// Tenant to query (GUID or domain); defaults to the joined tenant
    #[arg(short = 't', long = "tenant", value_name = "TENANT_ID")]
    pub tenant: Option<String>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
