//! Configuration and CLI argument handling

use clap::Parser;

use crate::{error::TimerError, state::FastingMode};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "fasting-timer")]
#[command(about = "A state-managed HTTP server driving an intermittent fasting countdown")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Fasting mode to select at startup (20:4, 16:8 or 18:6)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Start the countdown right away (needs --mode)
    #[arg(long, requires = "mode")]
    pub autostart: bool,

    /// Show a desktop notification whenever the phase changes
    #[arg(short, long)]
    pub notify: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Resolve the startup mode against the catalog
    pub fn initial_mode(&self) -> Result<Option<FastingMode>, TimerError> {
        self.mode.as_deref().map(FastingMode::find).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["fasting-timer"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.initial_mode().unwrap(), None);
        assert!(!config.autostart);
    }

    #[test]
    fn startup_mode_is_resolved() {
        let config =
            Config::try_parse_from(["fasting-timer", "--mode", "16:8", "--autostart", "-v"]).unwrap();
        assert_eq!(config.initial_mode().unwrap(), Some(FastingMode::SIXTEEN_EIGHT));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn autostart_requires_mode() {
        assert!(Config::try_parse_from(["fasting-timer", "--autostart"]).is_err());
    }

    #[test]
    fn unknown_startup_mode_is_an_error() {
        let config = Config::try_parse_from(["fasting-timer", "-m", "5:2"]).unwrap();
        assert!(config.initial_mode().is_err());
    }
}
