//! Signed and verified cookies

use crate::validation::Validate;
use crate::{CookieError, encodings, mac};

/// A cookie that has had its signature verified.
///
/// This type is un-serializable as it isn't signed. For that you will want
/// [`SignedCookie`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedCookie {
    /// The login the cookie authenticates. Never empty.
    pub login: String,
    /// Expiration time in seconds since the Unix epoch.
    pub expires: u32,
}

impl VerifiedCookie {
    /// Create a cookie for the given login, to be [signed](Self::sign).
    ///
    /// Returns `None` if the login is empty.
    pub fn new(login: impl Into<String>, expires: u32) -> Option<Self> {
        let login = login.into();
        if login.is_empty() {
            return None;
        }
        Some(Self { login, expires })
    }

    /// The expiration time as a timestamp.
    pub fn expires_at(&self) -> jiff::Timestamp {
        // every u32 number of seconds is in range
        jiff::Timestamp::from_second(i64::from(self.expires)).unwrap_or(jiff::Timestamp::MAX)
    }

    /// Check the cookie against some validation, usually [`Time`](crate::validation::Time).
    pub fn validate(&self, validation: &impl Validate<Claims = Self>) -> Result<(), CookieError> {
        validation.validate(self)
    }

    #[doc(alias = "issue")]
    pub fn sign(&self, secret: impl AsRef<[u8]>) -> SignedCookie {
        let login = encodings::escape(&self.login);
        let payload = format!("{login}{}{}", encodings::SEPARATOR, self.expires);
        let tag = mac::sign(secret.as_ref(), payload.as_bytes());

        tracing::trace!(expires = self.expires, "signed cookie");

        SignedCookie {
            payload,
            login: self.login.clone(),
            expires: self.expires,
            tag,
        }
    }
}

/// A signed cookie.
///
/// This represents a cookie that was parsed but whose signature has not been
/// checked yet. To access the login, you will need to [`verify`](Self::verify)
/// it. Parsing checks only the structure of the cookie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedCookie {
    /// `escaped_login|expiration`, exactly as signed
    pub(crate) payload: String,
    pub(crate) login: String,
    pub(crate) expires: u32,
    pub(crate) tag: [u8; encodings::TAG_LEN],
}

impl SignedCookie {
    /// View the **unverified** login of this cookie
    pub fn unverified_login(&self) -> &str {
        &self.login
    }

    /// View the **unverified** expiration time of this cookie
    pub fn unverified_expires(&self) -> u32 {
        self.expires
    }

    /// Verify the cookie signature. The expiration time is not checked.
    ///
    /// Parsing accepts the signature hex in either case, so distinct strings
    /// can verify as the same cookie. Compare [`Display`](core::fmt::Display)
    /// output, which is always lowercase, rather than the input string.
    pub fn verify(self, secret: impl AsRef<[u8]>) -> Result<VerifiedCookie, CookieError> {
        if let Err(err) = mac::verify(secret.as_ref(), self.payload.as_bytes(), &self.tag) {
            tracing::debug!(error = %err, "rejected cookie");
            return Err(err);
        }

        tracing::trace!(expires = self.expires, "verified cookie");

        Ok(VerifiedCookie {
            login: self.login,
            expires: self.expires,
        })
    }
}
