use std::fs;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::DEFAULT_MAX_MINUTES;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub policy: PolicyConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_max_minutes")]
    pub max_minutes: i64,
}

fn default_max_minutes() -> i64 {
    DEFAULT_MAX_MINUTES
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_minutes: default_max_minutes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Config {
    pub fn load(filename: &str) -> Result<Self> {
        let config = fs::read_to_string(filename)
            .with_context(|| format!("failed to read config file {}", filename))?;
        Self::from_yaml(&config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("failed to parse config file")?;
        anyhow::ensure!(
            config.policy.max_minutes > 0,
            "policy.max_minutes must be positive, got {}",
            config.policy.max_minutes
        );
        Ok(config)
    }
}

impl ApiConfig {
    pub fn reservations_url(&self) -> String {
        format!("{}/api/reservations", self.base_url.trim_end_matches('/'))
    }
}
