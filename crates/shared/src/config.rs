//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Ledger configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Account code of the designated cash/bank account used by
    /// bank reconciliation and non-cash invoice payments.
    #[serde(default = "default_bank_account_code")]
    pub bank_account_code: String,
    /// Account code of the cash-on-hand account used for cash payments.
    #[serde(default = "default_cash_account_code")]
    pub cash_account_code: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            bank_account_code: default_bank_account_code(),
            cash_account_code: default_cash_account_code(),
        }
    }
}

fn default_bank_account_code() -> String {
    "1010".to_string()
}

fn default_cash_account_code() -> String {
    "1000".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources are layered: `config/default`, then `config/{RUN_MODE}`,
    /// then `MIZAN__`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MIZAN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_defaults() {
        let cfg: DatabaseConfig =
            serde_json::from_str(r#"{"url": "postgres://localhost/mizan"}"#).unwrap();
        assert_eq!(cfg.max_connections, 10);
        assert_eq!(cfg.min_connections, 1);
    }

    #[test]
    fn test_ledger_defaults() {
        let cfg = LedgerConfig::default();
        assert_eq!(cfg.bank_account_code, "1010");
        assert_eq!(cfg.cash_account_code, "1000");
    }
}
