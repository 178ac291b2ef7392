//! OAuth 1.0a request signing (HMAC-SHA1).
//!
//! [`Signer`] turns a method and a final URL into an `Authorization`
//! header value. Time and nonce come from injectable [`Clock`] and
//! [`NonceSource`] implementations so signatures can be pinned in tests.

mod signer;
mod source;
mod values;

pub use signer::{hmac_sha1_signature, percent_encode, signature_base_string, Signer};
pub use source::{
    Clock, FixedClock, FixedNonce, NonceSource, OsRandomNonce, SystemClock, NONCE_BYTES,
};
pub use values::*;
