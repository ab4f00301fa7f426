//! The fee configuration registry record.

use serde::{Deserialize, Serialize};

use crate::{AssetId, DuelVaultError, Identity, Result, constants};

/// Protocol-wide fee and ownership configuration. Exactly one per
/// deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeConfig {
    /// Registry owner and duel organizer. Immutable after creation.
    pub owner: Identity,
    /// Company fee beneficiary.
    pub company: Identity,
    /// Pool fee beneficiary.
    pub pool: Identity,
    /// Company cut, percent of the pooled stake.
    pub company_percentage: u8,
    /// Pool cut, percent of the pooled stake.
    pub pool_percentage: u8,
    /// Asset accepted for duels that have not started yet.
    pub asset: AssetId,
    /// Keyless vault control identity derived from the program identity.
    pub vault: Identity,
}

impl FeeConfig {
    #[must_use]
    pub fn is_owner(&self, who: &Identity) -> bool {
        self.owner == *who
    }
}

/// Check a fee percentage is within `[0, 100]`.
///
/// # Errors
/// `InvalidPercentage` otherwise.
pub fn validate_percentage(value: u8) -> Result<u8> {
    if value > constants::MAX_PERCENTAGE {
        return Err(DuelVaultError::InvalidPercentage { value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_bounds() {
        assert_eq!(validate_percentage(0).unwrap(), 0);
        assert_eq!(validate_percentage(100).unwrap(), 100);
        assert!(matches!(
            validate_percentage(101),
            Err(DuelVaultError::InvalidPercentage { value: 101 })
        ));
        assert!(validate_percentage(u8::MAX).is_err());
    }

    #[test]
    fn owner_check() {
        let owner = Identity::random();
        let cfg = FeeConfig {
            owner,
            company: Identity::random(),
            pool: Identity::random(),
            company_percentage: 5,
            pool_percentage: 5,
            asset: AssetId::random(),
            vault: Identity::random(),
        };
        assert!(cfg.is_owner(&owner));
        assert!(!cfg.is_owner(&cfg.company));
    }
}
