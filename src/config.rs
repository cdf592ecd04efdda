// ⚙️ Configuration - environment driven
//
// HOST           bind host          (default 0.0.0.0)
// PORT           bind port          (default 3000)
// MERCHANTS_DIR  merchant registry  (default data/merchants)

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MERCHANTS_DIR: &str = "data/merchants";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub merchants_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            merchants_dir: PathBuf::from(DEFAULT_MERCHANTS_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a number between 0 and 65535, got {:?}", raw))?,
            None => defaults.port,
        };
        let merchants_dir = lookup("MERCHANTS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.merchants_dir);

        Ok(Config {
            host,
            port,
            merchants_dir,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
