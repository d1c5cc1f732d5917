//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Variance classifier thresholds.
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Category taxonomy source.
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Thresholds for execution ratings and budget health.
///
/// Rating bands are upper bounds on `|variance %|`, inclusive.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Upper bound of the "excellent" band.
    #[serde(default = "default_excellent_max")]
    pub excellent_max: Decimal,
    /// Upper bound of the "good" band.
    #[serde(default = "default_good_max")]
    pub good_max: Decimal,
    /// Upper bound of the "attention" band.
    #[serde(default = "default_attention_max")]
    pub attention_max: Decimal,
    /// Spend below `total * ratio` counts as under budget.
    #[serde(default = "default_under_budget_ratio")]
    pub under_budget_ratio: Decimal,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            excellent_max: default_excellent_max(),
            good_max: default_good_max(),
            attention_max: default_attention_max(),
            under_budget_ratio: default_under_budget_ratio(),
        }
    }
}

fn default_excellent_max() -> Decimal {
    Decimal::from(5)
}

fn default_good_max() -> Decimal {
    Decimal::from(15)
}

fn default_attention_max() -> Decimal {
    Decimal::from(30)
}

fn default_under_budget_ratio() -> Decimal {
    Decimal::new(9, 1)
}

/// Where the category taxonomy comes from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxonomyConfig {
    /// Path to a taxonomy file (TOML or JSON). The built-in standard
    /// taxonomy is used when unset.
    pub path: Option<String>,
}

impl AppConfig {
    /// Loads configuration from config files and `BUDGETRY__*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BUDGETRY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
