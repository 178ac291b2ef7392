use chrono::Utc;
use rand::{rngs::OsRng, RngCore};

use crate::error::{Error, Result};

/// Bytes of randomness behind every generated nonce.
pub const NONCE_BYTES: usize = 16;

/// Source of `oauth_timestamp` values (seconds since the epoch).
pub trait Clock: Send + Sync {
    fn timestamp(&self) -> i64;
}

/// Source of `oauth_nonce` values. Must never repeat a value in production.
pub trait NonceSource: Send + Sync {
    fn nonce(&self) -> Result<String>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Hex-encoded bytes from the operating system RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandomNonce;

impl NonceSource for OsRandomNonce {
    fn nonce(&self) -> Result<String> {
        let mut buf = [0u8; NONCE_BYTES];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| Error::Signing(format!("random source failed: {}", e)))?;
        Ok(hex::encode(buf))
    }
}

/// Always reports the same instant. For signature test vectors.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn timestamp(&self) -> i64 {
        self.0
    }
}

/// Always hands out the same nonce. For signature test vectors only.
#[derive(Clone, Debug)]
pub struct FixedNonce(pub String);

impl FixedNonce {
    pub fn new(nonce: impl Into<String>) -> Self {
        FixedNonce(nonce.into())
    }
}

impl NonceSource for FixedNonce {
    fn nonce(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
