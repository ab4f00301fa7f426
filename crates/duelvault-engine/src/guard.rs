//! Authorization and state guards.
//!
//! Every mutating operation runs its guards before touching any state. A
//! guard only reads; on rejection it returns the error and, for caller
//! checks, logs a warning with the rejected identity.

use duelvault_ledger::AssetLedger;
use duelvault_types::{
    AssetId, DuelRecord, DuelStatus, DuelVaultError, FeeConfig, Identity, Result,
};

/// Caller must be the registry owner.
///
/// # Errors
/// `Unauthorized` otherwise.
pub fn require_owner(config: &FeeConfig, caller: &Identity, operation: &str) -> Result<()> {
    if config.is_owner(caller) {
        return Ok(());
    }
    tracing::warn!(caller = %caller.short(), operation, "Rejected non-owner call");
    Err(DuelVaultError::Unauthorized { caller: *caller })
}

/// Duel must be in exactly `expected`.
///
/// # Errors
/// `WrongState` otherwise.
pub fn require_status(duel: &DuelRecord, expected: DuelStatus) -> Result<()> {
    let actual = duel.status();
    if actual != expected {
        return Err(DuelVaultError::WrongState {
            duel: duel.id,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Duel must still be waiting for a counterparty.
///
/// # Errors
/// `AlreadyJoined` otherwise.
pub fn require_joinable(duel: &DuelRecord) -> Result<()> {
    if duel.status() != DuelStatus::AwaitingJoiner {
        return Err(DuelVaultError::AlreadyJoined(duel.id));
    }
    Ok(())
}

/// Duel must be `Active`.
///
/// # Errors
/// `AlreadyCompleted` if it has already been settled, `WrongState` for any
/// other status.
pub fn require_settleable(duel: &DuelRecord) -> Result<()> {
    if duel.status() == DuelStatus::Completed {
        return Err(DuelVaultError::AlreadyCompleted(duel.id));
    }
    require_status(duel, DuelStatus::Active)
}

/// A party may not join its own duel.
///
/// # Errors
/// `CannotPlayAgainstSelf` if `caller` is the host.
pub fn require_not_host(duel: &DuelRecord, caller: &Identity) -> Result<()> {
    if duel.host == *caller {
        tracing::warn!(duel = %duel.id, caller = %caller.short(), "Host tried to join own duel");
        return Err(DuelVaultError::CannotPlayAgainstSelf);
    }
    Ok(())
}

/// The vault may not be a party: its pulls from itself are owner-signed
/// and would record custody that never arrived.
///
/// # Errors
/// `VaultAsParty` if `party` is the registry's vault identity.
pub fn require_not_vault(config: &FeeConfig, party: &Identity) -> Result<()> {
    if config.vault == *party {
        tracing::warn!(party = %party.short(), "Rejected vault identity as duel party");
        return Err(DuelVaultError::VaultAsParty(*party));
    }
    Ok(())
}

/// Declared winner must be the host or the joiner.
///
/// # Errors
/// `InvalidWinner` otherwise.
pub fn require_party(duel: &DuelRecord, winner: &Identity) -> Result<()> {
    if !duel.is_party(winner) {
        return Err(DuelVaultError::InvalidWinner {
            duel: duel.id,
            winner: *winner,
        });
    }
    Ok(())
}

/// `who` must hold at least `needed` of `asset`.
///
/// # Errors
/// `InsufficientFunds` otherwise.
pub fn require_funds<L: AssetLedger>(
    ledger: &L,
    who: &Identity,
    asset: &AssetId,
    needed: u64,
) -> Result<()> {
    let available = ledger.balance(who, asset);
    if available < needed {
        return Err(DuelVaultError::InsufficientFunds { needed, available });
    }
    Ok(())
}
