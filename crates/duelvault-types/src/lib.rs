//! # duelvault-types
//!
//! Shared types, errors, and configuration for the **DuelVault** wager
//! escrow engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Identity`], [`AssetId`], [`DuelId`], [`AuthorizationId`]
//! - **Registry model**: [`FeeConfig`]
//! - **Duel model**: [`DuelRecord`], [`DuelStage`], [`DuelStatus`], [`DuelCustody`], [`Payout`]
//! - **Transfer capability**: [`TransferAuthorization`], [`AuthorizationState`]
//! - **Ledger accounts**: [`TokenAccount`], [`Delegation`]
//! - **Events**: [`EngineEvent`], [`EventRecord`]
//! - **Configuration**: [`DeploymentConfig`]
//! - **Errors**: [`DuelVaultError`] with `DV_ERR_` prefix codes
//! - **Constants**: seeds, domains and limits

pub mod authorization;
pub mod balance;
pub mod config;
pub mod constants;
pub mod duel;
pub mod error;
pub mod event;
pub mod fee_config;
pub mod ids;

// Re-export all primary types at crate root for ergonomic imports:
//   use duelvault_types::{DuelRecord, FeeConfig, Identity, ...};

pub use authorization::*;
pub use balance::*;
pub use config::*;
pub use duel::*;
pub use error::*;
pub use event::*;
pub use fee_config::*;
pub use ids::*;

// Constants are accessed via `duelvault_types::constants::FOO`
// (not re-exported to avoid name collisions).
