use super::error::{Error, Result};
use serde_derive::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize, Eq, PartialEq)]
pub struct Config {
    #[serde(default)]
    storage: StorageConfig,
}

impl Config {
    const DEFAULT_ENDPOINT: &'static str = "https://storage.googleapis.com";

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(Error::ConfigRead)?;

        Ok(toml::from_str::<Config>(&contents)?)
    }

    /// Bucket used for locations that are neither URLs nor explicit paths.
    pub fn default_bucket(&self) -> Option<&str> {
        self.storage.bucket.as_deref()
    }

    pub fn endpoint(&self) -> &str {
        self.storage
            .endpoint
            .as_deref()
            .unwrap_or(Self::DEFAULT_ENDPOINT)
    }
}

#[derive(Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
struct StorageConfig {
    bucket: Option<String>,
    endpoint: Option<String>,
}
