use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_yml;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

fn evcc_base_url_default() -> String { return "http://evcc.local:7070/api".to_string() }
fn evcc_timeout_default() -> u64 { return 5 }

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct EvccConfig {
    #[serde(default="evcc_base_url_default")]
    pub base_url: String,
    /* Request timeout in seconds */
    #[serde(default="evcc_timeout_default")]
    pub timeout: u64,
}

impl Default for EvccConfig {
    fn default() -> Self {
        return EvccConfig { base_url: evcc_base_url_default(), timeout: evcc_timeout_default() }
    }
}

fn evcc_default() -> EvccConfig { return EvccConfig::default() }

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default="evcc_default")]
    pub evcc: EvccConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unable to parse config file: {0}")]
    Yaml(#[from] serde_yml::Error),
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        /* An empty file is a valid config, everything has defaults */
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        return Ok(serde_yml::from_str(contents)?);
    }
}

impl Config {
    /// Load the configuration from `config/evcc.yaml` or `evcc.yaml`,
    /// falling back to the defaults if neither exists.
    pub fn load() -> Result<Self, ConfigError> {
        for path in ["config/evcc.yaml", "evcc.yaml"] {
            if Path::new(path).exists() {
                info!("Loading config from {path}");
                return Config::load_from(path);
            }
        }

        debug!("No config file found, using defaults");
        return Ok(Config::default());
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        return contents.parse();
    }
}
