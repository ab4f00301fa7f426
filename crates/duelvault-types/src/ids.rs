//! Identifiers used throughout DuelVault.
//!
//! Parties, fee beneficiaries, the registry owner and the vault are all
//! addressed by a 32-byte [`Identity`]. Party identities are usually ed25519
//! public keys; the vault's identity is derived from the program identity
//! and has no private key at all.

use std::{fmt, str::FromStr};

use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{DuelVaultError, constants};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A 32-byte account identity. Serialized as a lowercase hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
pub struct Identity(pub [u8; 32]);

impl Identity {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Identity of an ed25519 key holder.
    #[must_use]
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        Self(key.to_bytes())
    }

    /// Derive a keyless identity from `seeds` under `program_id`.
    ///
    /// `SHA-256(domain || (len || seed)* || program_id)`. The same seeds and
    /// program always produce the same identity, and nobody holds a signing
    /// key for it.
    #[must_use]
    pub fn derive(seeds: &[&[u8]], program_id: &Identity) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(constants::DERIVATION_DOMAIN);
        for seed in seeds {
            hasher.update((seed.len() as u64).to_le_bytes());
            hasher.update(seed);
        }
        hasher.update(program_id.0);
        let hash = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    /// First four bytes as hex, for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Identity {
    type Err = DuelVaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = hex::decode(s.trim_start_matches("0x"))
            .map_err(|e| DuelVaultError::InvalidIdentity(format!("{s}: {e}")))?;
        let bytes: [u8; 32] = raw.try_into().map_err(|raw: Vec<u8>| {
            DuelVaultError::InvalidIdentity(format!("expected 32 bytes, got {}", raw.len()))
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// AssetId
// ---------------------------------------------------------------------------

/// Identifier of a fungible asset type (the token mint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub Identity);

impl AssetId {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(Identity::from_bytes(bytes))
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset:{}", self.0.short())
    }
}

// ---------------------------------------------------------------------------
// DuelId
// ---------------------------------------------------------------------------

/// Sequential duel identifier. The first duel is `DuelId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct DuelId(pub u64);

impl fmt::Display for DuelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duel:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// AuthorizationId
// ---------------------------------------------------------------------------

/// Unique identifier for a transfer authorization. UUIDv7, so ids sort by
/// issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AuthorizationId(pub Uuid);

impl AuthorizationId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AuthorizationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AuthorizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "auth:{}", self.0)
    }
}

/// Random identities for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl Identity {
    /// A fresh ed25519 key holder.
    pub fn random() -> Self {
        let signing = ed25519_dalek::SigningKey::generate(&mut rand::rngs::OsRng);
        Self::from_verifying_key(&signing.verifying_key())
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl AssetId {
    /// A fresh asset type.
    pub fn random() -> Self {
        Self(Identity::from_bytes(rand::random::<[u8; 32]>()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
