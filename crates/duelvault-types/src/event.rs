//! Engine events and the records that make up the append-only event log.
//!
//! Every committed operation produces exactly one [`EngineEvent`]. Failed
//! operations produce none.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AssetId, DuelId, Identity, Payout};

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineEvent {
    Initialized {
        owner: Identity,
        company_percentage: u8,
        pool_percentage: u8,
        asset: AssetId,
        vault: Identity,
    },
    DuelCreated {
        duel_id: DuelId,
        host: Identity,
        wager_amount: u64,
    },
    DuelJoined {
        duel_id: DuelId,
        joiner: Identity,
    },
    DuelStarted {
        duel_id: DuelId,
        host: Identity,
        pooled_amount: u64,
    },
    DuelDecided {
        duel_id: DuelId,
        winner: Identity,
        payout: Payout,
    },
    CompanyAllocationUpdated {
        old_company_percentage: u8,
        new_company_percentage: u8,
    },
    PoolAllocationUpdated {
        old_pool_percentage: u8,
        new_pool_percentage: u8,
    },
    CompanyAddressUpdated {
        old_company_address: Identity,
        new_company_address: Identity,
    },
    PoolAddressUpdated {
        old_pool_address: Identity,
        new_pool_address: Identity,
    },
    TokenMintUpdated {
        old_token_mint: AssetId,
        new_token_mint: AssetId,
    },
}

impl EngineEvent {
    /// Short name used in log lines.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialized { .. } => "INITIALIZED",
            Self::DuelCreated { .. } => "DUEL_CREATED",
            Self::DuelJoined { .. } => "DUEL_JOINED",
            Self::DuelStarted { .. } => "DUEL_STARTED",
            Self::DuelDecided { .. } => "DUEL_DECIDED",
            Self::CompanyAllocationUpdated { .. } => "COMPANY_ALLOCATION_UPDATED",
            Self::PoolAllocationUpdated { .. } => "POOL_ALLOCATION_UPDATED",
            Self::CompanyAddressUpdated { .. } => "COMPANY_ADDRESS_UPDATED",
            Self::PoolAddressUpdated { .. } => "POOL_ADDRESS_UPDATED",
            Self::TokenMintUpdated { .. } => "TOKEN_MINT_UPDATED",
        }
    }

    /// SHA-256 over the event's JSON encoding.
    #[must_use]
    pub fn payload_hash(&self) -> [u8; 32] {
        // Plain derived structs of fixed-size fields; encoding cannot fail.
        let payload = serde_json::to_vec(self).expect("engine events always serialize");
        let hash = Sha256::digest(&payload);
        let mut out = [0u8; 32];
        out.copy_from_slice(&hash);
        out
    }
}

/// One entry of the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the log, starting at 0.
    pub sequence: u64,
    pub event: EngineEvent,
    pub recorded_at: DateTime<Utc>,
    /// See [`EngineEvent::payload_hash`].
    pub payload_hash: [u8; 32],
}

impl EventRecord {
    #[must_use]
    pub fn new(sequence: u64, event: EngineEvent) -> Self {
        let payload_hash = event.payload_hash();
        Self {
            sequence,
            event,
            recorded_at: Utc::now(),
            payload_hash,
        }
    }

    /// Recompute the hash and compare.
    #[must_use]
    pub fn verify(&self) -> bool {
        self.event.payload_hash() == self.payload_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(duel: u64) -> EngineEvent {
        EngineEvent::DuelCreated {
            duel_id: DuelId(duel),
            host: Identity::from_bytes([1u8; 32]),
            wager_amount: 1_000_000,
        }
    }

    #[test]
    fn payload_hash_deterministic() {
        assert_eq!(created(0).payload_hash(), created(0).payload_hash());
        assert_ne!(created(0).payload_hash(), created(1).payload_hash());
    }

    #[test]
    fn record_verifies() {
        let mut record = EventRecord::new(0, created(0));
        assert!(record.verify());
        record.event = created(1);
        assert!(!record.verify(), "tampered event must not verify");
    }

    #[test]
    fn event_name() {
        assert_eq!(created(0).name(), "DUEL_CREATED");
        let ev = EngineEvent::TokenMintUpdated {
            old_token_mint: AssetId::random(),
            new_token_mint: AssetId::random(),
        };
        assert_eq!(ev.name(), "TOKEN_MINT_UPDATED");
    }

    #[test]
    fn serde_is_tagged() {
        let json = serde_json::to_value(created(2)).unwrap();
        assert_eq!(json["kind"], "duel_created");
        assert_eq!(json["wager_amount"], 1_000_000);
        let back: EngineEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, created(2));
    }
}
