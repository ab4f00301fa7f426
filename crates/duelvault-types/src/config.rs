//! Deployment configuration.
//!
//! A [`DeploymentConfig`] describes one engine deployment: its program
//! identity (from which the vault identity is derived) and the values the
//! owner passes to `initialize`. It is usually loaded from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{AssetId, DuelVaultError, Identity, Result, validate_percentage};

/// Configuration for a single engine deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Program identity; the vault is derived from it.
    pub program_id: Identity,
    /// Initial company cut, percent.
    pub company_percentage: u8,
    /// Initial pool cut, percent.
    pub pool_percentage: u8,
    /// Company fee beneficiary.
    pub company: Identity,
    /// Pool fee beneficiary.
    pub pool: Identity,
    /// Asset accepted for wagers.
    pub asset: AssetId,
}

impl DeploymentConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    /// `Serialization` for malformed JSON, `Configuration` for bad values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, otherwise as [`Self::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Check both percentages are in `[0, 100]`.
    ///
    /// # Errors
    /// `Configuration` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        validate_percentage(self.company_percentage).map_err(|e| {
            DuelVaultError::Configuration(format!("company_percentage: {e}"))
        })?;
        validate_percentage(self.pool_percentage)
            .map_err(|e| DuelVaultError::Configuration(format!("pool_percentage: {e}")))?;
        Ok(())
    }
}
