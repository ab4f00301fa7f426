//! Error types for the DuelVault engine.
//!
//! All errors use the `DV_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Fee registry errors
//! - 2xx: Duel lifecycle errors
//! - 3xx: Funds / vault errors
//! - 4xx: Settlement errors
//! - 9xx: General / internal errors
//!
//! Every failing operation leaves engine and ledger state exactly as it was
//! before the call.

use thiserror::Error;

use crate::{AuthorizationId, DuelId, DuelStatus, Identity};

/// Central error enum for all DuelVault operations.
#[derive(Debug, Error)]
pub enum DuelVaultError {
    // =================================================================
    // Fee Registry Errors (1xx)
    // =================================================================
    /// `initialize` was called on a deployment that already has a registry.
    #[error("DV_ERR_100: Fee registry already initialized")]
    AlreadyInitialized,

    /// An operation needs the registry but `initialize` has not run.
    #[error("DV_ERR_101: Fee registry not initialized")]
    NotInitialized,

    /// The caller does not hold the role the operation requires.
    #[error("DV_ERR_102: Unauthorized caller: {caller}")]
    Unauthorized { caller: Identity },

    /// A fee percentage outside `[0, 100]`.
    #[error("DV_ERR_103: Invalid fee percentage: {value}")]
    InvalidPercentage { value: u8 },

    // =================================================================
    // Duel Lifecycle Errors (2xx)
    // =================================================================
    /// No duel record with this id.
    #[error("DV_ERR_200: Duel not found: {0}")]
    DuelNotFound(DuelId),

    /// Wager must be a positive amount.
    #[error("DV_ERR_201: Invalid wager amount: {0}")]
    InvalidAmount(u64),

    /// The operation is not valid for the duel's current stage.
    #[error("DV_ERR_202: Wrong duel state for {duel}: expected {expected}, got {actual}")]
    WrongState {
        duel: DuelId,
        expected: DuelStatus,
        actual: DuelStatus,
    },

    /// `joinDuel` on a duel that already has a joiner.
    #[error("DV_ERR_203: Duel already joined: {0}")]
    AlreadyJoined(DuelId),

    /// `distributeRewards` on a duel that has already been settled.
    #[error("DV_ERR_204: Duel already completed: {0}")]
    AlreadyCompleted(DuelId),

    /// The host tried to join their own duel.
    #[error("DV_ERR_205: Cannot play against yourself")]
    CannotPlayAgainstSelf,

    /// The declared winner is neither the host nor the joiner.
    #[error("DV_ERR_206: Invalid winner {winner} for {duel}")]
    InvalidWinner { duel: DuelId, winner: Identity },

    // =================================================================
    // Funds / Vault Errors (3xx)
    // =================================================================
    /// The source account does not hold enough of the asset.
    #[error("DV_ERR_300: Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    /// The delegated allowance does not cover the requested pull.
    #[error("DV_ERR_301: Insufficient allowance: need {needed}, approved {approved}")]
    InsufficientAllowance { needed: u64, approved: u64 },

    /// A transfer authorization was presented a second time.
    #[error("DV_ERR_302: Transfer authorization already consumed: {0}")]
    AuthorizationConsumed(AuthorizationId),

    /// Vault custody for a duel does not match what the operation expects.
    #[error("DV_ERR_303: Custody mismatch for {duel}: {reason}")]
    CustodyMismatch { duel: DuelId, reason: String },

    /// The vault's own identity was named as host or joiner.
    #[error("DV_ERR_304: Vault identity {0} cannot be a duel party")]
    VaultAsParty(Identity),

    // =================================================================
    // Settlement Errors (4xx)
    // =================================================================
    /// Combined fee percentages exceed the pooled amount.
    #[error("DV_ERR_400: Fees exceed pool: company {company_pct}% + pool {pool_pct}%")]
    FeesExceedPool { company_pct: u8, pool_pct: u8 },

    /// An amount computation overflowed.
    #[error("DV_ERR_401: Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    /// Supply conservation invariant violated. Critical safety alert.
    #[error("DV_ERR_402: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("DV_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("DV_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("DV_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error.
    #[error("DV_ERR_903: I/O error: {0}")]
    Io(String),

    /// A string that does not decode to a 32-byte identity.
    #[error("DV_ERR_904: Invalid identity: {0}")]
    InvalidIdentity(String),
}

impl DuelVaultError {
    /// `true` for every lifecycle-stage rejection, including the
    /// `AlreadyJoined` and `AlreadyCompleted` specializations.
    #[must_use]
    pub fn is_wrong_state(&self) -> bool {
        matches!(
            self,
            Self::WrongState { .. } | Self::AlreadyJoined(_) | Self::AlreadyCompleted(_)
        )
    }

    /// The numeric `DV_ERR_` code.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Self::AlreadyInitialized => 100,
            Self::NotInitialized => 101,
            Self::Unauthorized { .. } => 102,
            Self::InvalidPercentage { .. } => 103,
            Self::DuelNotFound(_) => 200,
            Self::InvalidAmount(_) => 201,
            Self::WrongState { .. } => 202,
            Self::AlreadyJoined(_) => 203,
            Self::AlreadyCompleted(_) => 204,
            Self::CannotPlayAgainstSelf => 205,
            Self::InvalidWinner { .. } => 206,
            Self::InsufficientFunds { .. } => 300,
            Self::InsufficientAllowance { .. } => 301,
            Self::AuthorizationConsumed(_) => 302,
            Self::CustodyMismatch { .. } => 303,
            Self::VaultAsParty(_) => 304,
            Self::FeesExceedPool { .. } => 400,
            Self::ArithmeticOverflow(_) => 401,
            Self::SupplyInvariantViolation { .. } => 402,
            Self::Internal(_) => 900,
            Self::Serialization(_) => 901,
            Self::Configuration(_) => 902,
            Self::Io(_) => 903,
            Self::InvalidIdentity(_) => 904,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, DuelVaultError>;

// Conversion from std::io::Error
impl From<std::io::Error> for DuelVaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DuelVaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
