//! Configuration for Tallychain ledgers

use crate::error::{ChainError, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    /// Leading-zero run length required by the admission gate.
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,
    /// Optional cap on the proof search, for test harnesses. Production
    /// configs leave this unset; the search is unbounded by default.
    #[serde(default)]
    pub max_proof_iterations: Option<u64>,
    /// Producer identity recorded on the genesis block.
    #[serde(default = "default_genesis_producer")]
    pub genesis_producer: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            max_proof_iterations: None,
            genesis_producer: default_genesis_producer(),
        }
    }
}

impl ChainConfig {
    /// Parse a config from a TOML fragment. The core never reads files;
    /// drivers load the text and hand it over.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ChainConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.genesis_producer.is_empty() {
            return Err(ChainError::ConfigError(
                "genesis_producer must not be empty".to_string(),
            ));
        }
        if self.max_proof_iterations == Some(0) {
            return Err(ChainError::ConfigError(
                "max_proof_iterations must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_difficulty() -> u32 {
    crate::pow::DEFAULT_DIFFICULTY
}

fn default_genesis_producer() -> String {
    "Genesis".to_string()
}
