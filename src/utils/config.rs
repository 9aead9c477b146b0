use std::env;
use std::fmt;

use anyhow::Context;

use crate::utils::formatting::{CurrencyFormat, CurrencyStyle};

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: Option<String>,
    pub currency: String,
    pub currency_style: CurrencyStyle,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            currency: "SEK".to_string(),
            currency_style: CurrencyStyle::Plain,
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `from_env` passes
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let currency_style = match lookup("CURRENCY_STYLE") {
            Some(raw) => raw
                .parse::<CurrencyStyle>()
                .context("Invalid CURRENCY_STYLE")?,
            None => defaults.currency_style,
        };

        let config = Config {
            catalog_path: lookup("CATALOG_PATH").filter(|path| !path.trim().is_empty()),
            currency: lookup("CURRENCY").unwrap_or(defaults.currency),
            currency_style,
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
        };

        config.validate()?;
        tracing::debug!("Config: successfully loaded for {} environment", config.environment);
        Ok(config)
    }

    /// Log level to start the subscriber with, read before the rest of
    /// the configuration so that configuration errors get logged.
    pub fn log_level_from_env() -> String {
        dotenv::dotenv().ok();
        Self::log_level_from(|key| env::var(key).ok())
    }

    pub fn log_level_from<F>(lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("LOG_LEVEL")
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| Config::default().log_level)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(anyhow::anyhow!(
                "CURRENCY must be a three letter ISO code like 'SEK', got '{}'",
                self.currency
            ));
        }

        if self.log_level.trim().is_empty() {
            return Err(anyhow::anyhow!("LOG_LEVEL must not be empty"));
        }

        Ok(())
    }

    pub fn with_catalog_path(mut self, path: Option<String>) -> Self {
        if path.is_some() {
            self.catalog_path = path;
        }
        self
    }

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.currency_style, self.currency.clone())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "catalog:        {}",
            self.catalog_path.as_deref().unwrap_or("<embedded>")
        )?;
        writeln!(f, "currency:       {}", self.currency)?;
        writeln!(f, "currency style: {}", self.currency_style)?;
        writeln!(f, "log level:      {}", self.log_level)?;
        write!(f, "environment:    {}", self.environment)
    }
}
