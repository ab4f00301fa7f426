//! System-wide constants for the DuelVault engine.

/// Upper bound (inclusive) for any fee percentage.
pub const MAX_PERCENTAGE: u8 = 100;

/// Denominator used when applying a percentage to an amount.
pub const PERCENTAGE_DENOMINATOR: u128 = 100;

/// Number of parties that stake into a duel.
pub const PARTIES_PER_DUEL: u64 = 2;

/// Seed for the vault control identity.
pub const VAULT_SEED: &[u8] = b"vault";

/// Domain separator for derived (keyless) identities.
pub const DERIVATION_DOMAIN: &[u8] = b"duelvault:pda:v1:";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "DuelVault";
