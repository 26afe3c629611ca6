pub mod booking_request;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "detail-booking")]
#[command(about = "Book a detailing appointment and export it to a calendar")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "booking.toml")]
    pub config: String,

    /// Path to the TOML booking request
    #[arg(short, long)]
    pub request: String,

    /// User agent used to pick the calendar options
    #[arg(long, default_value = "")]
    pub user_agent: String,

    /// Walk the booking without contacting the relay
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON log lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validation::validate_path("config", &self.config)?;
        validation::validate_path("request", &self.request)?;
        Ok(())
    }
}
