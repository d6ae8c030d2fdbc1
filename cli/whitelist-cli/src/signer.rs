//! STARK-curve signing of whitelist entries.
//!
//! Each entry is hashed with `pedersen_hash(address, quantity)` and the digest
//! is signed with ECDSA over the STARK curve. Nonces come from RFC 6979, so the
//! same key and entry always produce the same `(r, s)`.

use std::env::{self, VarError};
use std::fmt;

use starknet_crypto::{get_public_key, pedersen_hash, rfc6979_generate_k, sign, SignError};
use starknet_types_core::felt::Felt;
use tracing::{debug, info};
use zeroize::Zeroize;

use crate::common::{hex_encode, parse_felt_hex};
use crate::error::{Result, SignerError};
use crate::whitelist::{SignedEntry, WhitelistEntry};

/// Environment variable read when no other name is configured.
pub const DEFAULT_KEY_ENV: &str = "SIGNER_KEY";

/// Order of the STARK curve generator. Private keys must lie in `[1, EC_ORDER)`.
pub const EC_ORDER: Felt =
    Felt::from_hex_unchecked("0x0800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f");

// Each rejected nonce bumps the RFC 6979 seed; hitting this many in a row
// does not happen for honest digests.
const MAX_NONCE_ATTEMPTS: u32 = 64;

/// A STARK private key.
#[derive(Clone)]
pub struct StarkKey(Felt);

impl fmt::Debug for StarkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StarkKey(<redacted>)")
    }
}

impl StarkKey {
    /// Parses a private key from hex, with or without the "0x" prefix.
    ///
    /// # Errors
    /// Returns [`SignerError::Config`] if the string is not valid hex, is zero,
    /// or is not below the curve order
    pub fn from_hex(value: &str) -> Result<Self> {
        let secret = parse_felt_hex(value)
            .map_err(|reason| SignerError::Config(format!("invalid private key: {reason}")))?;
        Self::from_secret_scalar(secret)
    }

    pub fn from_secret_scalar(secret: Felt) -> Result<Self> {
        if secret == Felt::ZERO {
            return Err(SignerError::Config("private key is zero".to_string()));
        }
        if secret >= EC_ORDER {
            return Err(SignerError::Config(
                "private key is not below the STARK curve order".to_string(),
            ));
        }
        Ok(Self(secret))
    }

    /// Reads the named environment variable and parses it as a private key.
    pub fn from_env(name: &str) -> Result<Self> {
        let mut raw = match env::var(name) {
            Ok(value) => value,
            Err(VarError::NotPresent) => {
                return Err(SignerError::Config(format!(
                    "environment variable {name} is not set"
                )))
            }
            Err(VarError::NotUnicode(_)) => {
                return Err(SignerError::Config(format!(
                    "environment variable {name} is not valid unicode"
                )))
            }
        };
        if raw.trim().is_empty() {
            raw.zeroize();
            return Err(SignerError::Config(format!(
                "environment variable {name} is empty"
            )));
        }
        let key = Self::from_hex(&raw);
        raw.zeroize();
        key
    }

    /// The STARK public key, i.e. the x coordinate of `key * G`.
    pub fn public_key(&self) -> Felt {
        get_public_key(&self.0)
    }
}

/// Computes the message digest signed for one whitelist entry.
pub fn entry_digest(entry: &WhitelistEntry) -> Felt {
    pedersen_hash(&entry.address, &entry.quantity)
}

/// Signs `digest`, re-deriving the nonce with an incrementing seed whenever
/// the primitive rejects it.
fn sign_digest(private_key: &Felt, digest: &Felt) -> Result<(Felt, Felt)> {
    let mut seed: Option<Felt> = None;
    for _ in 0..MAX_NONCE_ATTEMPTS {
        let k = rfc6979_generate_k(digest, private_key, seed.as_ref());
        match sign(private_key, digest, &k) {
            Ok(signature) => return Ok((signature.r, signature.s)),
            Err(SignError::InvalidK) => {
                seed = Some(seed.map_or(Felt::ONE, |prev| prev + Felt::ONE));
            }
            Err(err) => {
                return Err(SignerError::Signature(format!(
                    "digest {} rejected: {err:?}",
                    hex_encode(digest)
                )))
            }
        }
    }
    Err(SignerError::Signature(format!(
        "no valid nonce for digest {} after {MAX_NONCE_ATTEMPTS} attempts",
        hex_encode(digest)
    )))
}

/// Signs whitelist entries with a single private key.
#[derive(Debug, Clone)]
pub struct WhitelistSigner {
    key: StarkKey,
}

impl WhitelistSigner {
    pub fn new(key: StarkKey) -> Self {
        Self { key }
    }

    pub fn public_key(&self) -> Felt {
        self.key.public_key()
    }

    /// Hashes and signs a single entry.
    pub fn sign_entry(&self, entry: &WhitelistEntry) -> Result<SignedEntry> {
        let digest = entry_digest(entry);
        let (r, s) = sign_digest(&self.key.0, &digest)?;
        Ok(SignedEntry {
            address: entry.address,
            quantity: entry.quantity,
            r,
            s,
        })
    }

    /// Signs every entry in order. The first failure aborts the batch.
    pub fn sign_all(&self, entries: &[WhitelistEntry]) -> Result<Vec<SignedEntry>> {
        let mut signed = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let record = self.sign_entry(entry).map_err(|err| match err {
                SignerError::Signature(reason) => {
                    SignerError::Signature(format!("entry #{index}: {reason}"))
                }
                other => other,
            })?;
            debug!(index, address = %hex_encode(&entry.address), "signed entry");
            signed.push(record);

            if (index + 1) % 1_000 == 0 {
                info!(signed = index + 1, total = entries.len(), "signing progress");
            }
        }
        Ok(signed)
    }
}
