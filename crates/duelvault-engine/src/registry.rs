//! Fee configuration registry.
//!
//! Holds the singleton [`FeeConfig`]. It is created once by `initialize`,
//! after which only the owner may change it. Each update returns the old
//! and new values so the caller can record the change.

use duelvault_types::{
    AssetId, DuelVaultError, FeeConfig, Identity, Result, validate_percentage,
};

use crate::guard::require_owner;

/// The singleton registry. Empty until initialized.
#[derive(Debug, Default)]
pub struct FeeRegistry {
    config: Option<FeeConfig>,
}

/// Values `initialize` registers besides the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrySetup {
    pub company_percentage: u8,
    pub pool_percentage: u8,
    pub company: Identity,
    pub pool: Identity,
    pub asset: AssetId,
}

impl FeeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.config.is_some()
    }

    /// Create the registry. `caller` becomes the owner.
    ///
    /// # Errors
    /// - `AlreadyInitialized` if it already exists
    /// - `InvalidPercentage` if either percentage exceeds 100
    pub fn initialize(
        &mut self,
        caller: Identity,
        setup: RegistrySetup,
        vault: Identity,
    ) -> Result<&FeeConfig> {
        if self.config.is_some() {
            return Err(DuelVaultError::AlreadyInitialized);
        }
        validate_percentage(setup.company_percentage)?;
        validate_percentage(setup.pool_percentage)?;

        Ok(self.config.insert(FeeConfig {
            owner: caller,
            company: setup.company,
            pool: setup.pool,
            company_percentage: setup.company_percentage,
            pool_percentage: setup.pool_percentage,
            asset: setup.asset,
            vault,
        }))
    }

    /// The current configuration.
    ///
    /// # Errors
    /// `NotInitialized` before `initialize`.
    pub fn config(&self) -> Result<&FeeConfig> {
        self.config.as_ref().ok_or(DuelVaultError::NotInitialized)
    }

    fn owned_mut(&mut self, caller: &Identity, operation: &str) -> Result<&mut FeeConfig> {
        let config = self.config.as_mut().ok_or(DuelVaultError::NotInitialized)?;
        require_owner(config, caller, operation)?;
        Ok(config)
    }

    /// Returns `(old, new)`.
    pub fn update_company_allocation(&mut self, caller: &Identity, pct: u8) -> Result<(u8, u8)> {
        let config = self.owned_mut(caller, "update_company_allocation")?;
        validate_percentage(pct)?;
        let old = std::mem::replace(&mut config.company_percentage, pct);
        Ok((old, pct))
    }

    /// Returns `(old, new)`.
    pub fn update_pool_allocation(&mut self, caller: &Identity, pct: u8) -> Result<(u8, u8)> {
        let config = self.owned_mut(caller, "update_pool_allocation")?;
        validate_percentage(pct)?;
        let old = std::mem::replace(&mut config.pool_percentage, pct);
        Ok((old, pct))
    }

    /// Returns `(old, new)`.
    pub fn update_company_address(
        &mut self,
        caller: &Identity,
        company: Identity,
    ) -> Result<(Identity, Identity)> {
        let config = self.owned_mut(caller, "update_company_address")?;
        let old = std::mem::replace(&mut config.company, company);
        Ok((old, company))
    }

    /// Returns `(old, new)`.
    pub fn update_pool_address(
        &mut self,
        caller: &Identity,
        pool: Identity,
    ) -> Result<(Identity, Identity)> {
        let config = self.owned_mut(caller, "update_pool_address")?;
        let old = std::mem::replace(&mut config.pool, pool);
        Ok((old, pool))
    }

    /// Change the asset used by duels that have not started. Active duels
    /// keep the asset pinned in their custody.
    ///
    /// Returns `(old, new)`.
    pub fn update_token_mint(
        &mut self,
        caller: &Identity,
        asset: AssetId,
    ) -> Result<(AssetId, AssetId)> {
        let config = self.owned_mut(caller, "update_token_mint")?;
        let old = std::mem::replace(&mut config.asset, asset);
        Ok((old, asset))
    }
}
