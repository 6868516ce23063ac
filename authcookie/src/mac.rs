//! Two pass HMAC-SHA256.
//!
//! ```text
//! k   = HMAC-SHA256(payload, secret)
//! tag = HMAC-SHA256(payload, k)
//! ```
//!
//! Each payload is signed under its own derived key. This is kept as two
//! passes and must not be reduced to a single HMAC.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::CookieError;
use crate::encodings::TAG_LEN;

fn keyed(secret: &[u8], payload: &[u8]) -> Hmac<Sha256> {
    let mut m1 = Hmac::<Sha256>::new_from_slice(secret).expect("hmac accepts keys of any length");
    m1.update(payload);
    let k = m1.finalize().into_bytes();

    let mut m2 = Hmac::<Sha256>::new_from_slice(&k).expect("hmac accepts keys of any length");
    m2.update(payload);
    m2
}

pub(crate) fn sign(secret: &[u8], payload: &[u8]) -> [u8; TAG_LEN] {
    keyed(secret, payload).finalize().into_bytes().into()
}

/// Constant time comparison of the full tag.
pub(crate) fn verify(
    secret: &[u8],
    payload: &[u8],
    tag: &[u8; TAG_LEN],
) -> Result<(), CookieError> {
    keyed(secret, payload)
        .verify_slice(tag)
        .map_err(|_| CookieError::WrongSignature)
}
