//! Clinic configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::EntityKind;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Page size for {0} must be at least 1")]
    ZeroPageSize(EntityKind),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Runtime options for a [`crate::Clinic`].
///
/// ```json
/// { "page_sizes": { "pharmacy": 5, "patient": 20 }, "seed": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicConfig {
    /// Per-section page size overrides
    pub page_sizes: BTreeMap<EntityKind, usize>,
    /// Load the mock records into every store
    pub seed: bool,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            page_sizes: BTreeMap::new(),
            seed: true,
        }
    }
}

impl ClinicConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: ClinicConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        match self.page_sizes.iter().find(|(_, size)| **size == 0) {
            Some((kind, _)) => Err(ConfigError::ZeroPageSize(*kind)),
            None => Ok(()),
        }
    }

    /// Effective page size for a section.
    pub fn page_size(&self, kind: EntityKind) -> usize {
        self.page_sizes
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_page_size())
    }

    pub fn with_page_size(mut self, kind: EntityKind, size: usize) -> Self {
        self.page_sizes.insert(kind, size);
        self
    }
}
