//! Secret keys for signing cookies.

use core::fmt;

use crate::CookieError;

/// A secret key used to sign and verify cookies.
///
/// Any byte string works as a key, but keys shorter than 32 bytes are weaker
/// than the signature. [`SecretKey::random`] generates a key of that size.
///
/// All cookie functions accept `impl AsRef<[u8]>`, so a plain byte slice can
/// be passed instead.
#[derive(Clone)]
pub struct SecretKey(Box<[u8]>);

impl SecretKey {
    /// Length of a [random](Self::random) key in bytes.
    pub const RANDOM_LEN: usize = 32;

    pub fn from_bytes(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(bytes.into())
    }

    /// Generate a random key
    pub fn random() -> Result<Self, CookieError> {
        let mut bytes = [0; Self::RANDOM_LEN];
        getrandom::fill(&mut bytes).map_err(|_| CookieError::CryptoError)?;
        Ok(Self(bytes.into()))
    }

    /// Hex encode the key, to store it in configuration.
    pub fn expose_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl AsRef<[u8]> for SecretKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretKey").field(&"<redacted>").finish()
    }
}

/// Parses a hex encoded key.
impl core::str::FromStr for SecretKey {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode(s.trim()).map(Self::from_bytes)
    }
}
