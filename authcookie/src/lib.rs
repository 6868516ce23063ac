//! Signed authentication cookies.
//!
//! A cookie binds a login to an expiration time and is authenticated with a
//! secret key, so no session needs to be stored on the server.
//!
//! ```
//! use authcookie::validation::Time;
//!
//! let secret = b"secret key";
//!
//! // issue a cookie for "bender" that expires at the given unix time
//! let cookie = authcookie::issue("bender", 1_700_000_000, secret).unwrap();
//!
//! // verify the cookie signature and read back its fields
//! let verified = authcookie::verify(&cookie, secret).unwrap();
//! assert_eq!(verified.login, "bender");
//! assert_eq!(verified.expires, 1_700_000_000);
//!
//! // the cookie has long expired, so it does not authenticate anyone
//! let now = "2025-01-01T00:00:00Z".parse().unwrap();
//! assert_eq!(authcookie::login_if_valid(&cookie, secret, &Time::valid_at(now)), None);
//! ```
//!
//! # Format
//!
//! ```text
//! login|expiration|signature
//! ```
//!
//! where the expiration is a decimal count of seconds since the Unix epoch and
//! the signature is the hex encoded
//!
//! ```text
//! signature = HMAC-SHA256(login|expiration, k)
//! k         = HMAC-SHA256(login|expiration, secret)
//! ```
//!
//! Since `|` separates the fields, the login is escaped before it is signed:
//! `~` becomes `~~` and `|` becomes `~!`. The login and expiration are not
//! encrypted and can be read by anyone holding the cookie.
//!
//! # Bounding input
//!
//! Verification does work proportional to the length of the cookie. Reject
//! anything longer than [`max_encoded_len`] for your longest allowed login
//! before calling [`verify`].

pub mod encodings;
pub mod key;
mod mac;
pub mod tokens;
pub mod validation;

use core::fmt;

pub use encodings::{MIN_ENCODED_LEN, max_encoded_len};
pub use key::SecretKey;
pub use tokens::{SignedCookie, VerifiedCookie};

use validation::{Time, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
/// Error returned for all cookie operations that can fail
pub enum CookieError {
    /// The cookie was not of a valid form
    Malformed(Malformed),
    /// The cookie signature did not match its contents
    WrongSignature,
    /// The cookie failed validation because it has expired
    Expired,
    /// The system entropy source failed
    CryptoError,
}

/// Why a cookie could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Malformed {
    /// The cookie did not have exactly three `|` separated fields
    FieldCount,
    /// The login field was empty
    EmptyLogin,
    /// The login contained `~` followed by something other than `~` or `!`
    UnknownEscape,
    /// The login ended with a lone `~`
    UnterminatedEscape,
    /// The expiration was not a canonical decimal 32-bit integer
    Expiration,
    /// The signature was not hex encoded
    TagEncoding,
    /// The signature did not decode to 32 bytes
    TagLength,
}

impl std::error::Error for CookieError {}

impl fmt::Display for CookieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookieError::Malformed(m) => write!(f, "malformed cookie: {m}"),
            CookieError::WrongSignature => f.write_str("wrong cookie signature"),
            CookieError::Expired => f.write_str("cookie has expired"),
            CookieError::CryptoError => f.write_str("could not generate random bytes"),
        }
    }
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Malformed::FieldCount => "expected 3 fields",
            Malformed::EmptyLogin => "empty login",
            Malformed::UnknownEscape => "unknown escape sequence",
            Malformed::UnterminatedEscape => "unterminated escape sequence",
            Malformed::Expiration => "invalid expiration time",
            Malformed::TagEncoding => "signature is not hex",
            Malformed::TagLength => "signature has the wrong length",
        })
    }
}

impl From<Malformed> for CookieError {
    fn from(value: Malformed) -> Self {
        CookieError::Malformed(value)
    }
}

/// Returns a signed cookie for the given login, expiration time in seconds
/// since the Unix epoch, and secret key.
///
/// Returns `None` if the login is empty, as a cookie for nobody is never
/// issued. Use `.unwrap_or_default()` where an empty string is expected.
pub fn issue(login: &str, expires: u32, secret: impl AsRef<[u8]>) -> Option<String> {
    VerifiedCookie::new(login, expires).map(|cookie| cookie.sign(secret).to_string())
}

/// Returns a signed cookie that expires `seconds_from_now` after `now`.
///
/// The expiration is truncated to 32 bits with wrapping arithmetic. Keeping
/// it in range is up to the caller. No allowance is made for clock skew.
pub fn issue_relative(
    login: &str,
    seconds_from_now: i64,
    now: jiff::Timestamp,
    secret: impl AsRef<[u8]>,
) -> Option<String> {
    let expires = now.as_second().wrapping_add(seconds_from_now) as u32;
    issue(login, expires, secret)
}

/// [`issue_relative`] using the current system time.
pub fn issue_since_now(
    login: &str,
    seconds_from_now: i64,
    secret: impl AsRef<[u8]>,
) -> Option<String> {
    issue_relative(login, seconds_from_now, jiff::Timestamp::now(), secret)
}

/// Validates the cookie with the secret key and returns the login and
/// expiration time it contains.
///
/// This only proves the cookie is well formed and was signed with `secret`.
/// Callers must still check the returned expiration time, for example with
/// [`VerifiedCookie::validate`].
///
/// The signature hex is accepted in either case, so several spellings of
/// one cookie verify. Do not key anything on the raw cookie string; use the
/// canonical form from [`SignedCookie`]'s `Display` or the verified fields.
pub fn verify(cookie: &str, secret: impl AsRef<[u8]>) -> Result<VerifiedCookie, CookieError> {
    let signed = cookie
        .parse::<SignedCookie>()
        .inspect_err(|err| tracing::debug!(error = %err, "rejected cookie"))?;
    signed.verify(secret)
}

/// Returns the login of a cookie that verifies and passes `validation`.
///
/// Every kind of failure gives `None`, so a caller probing with forged or
/// stale cookies cannot tell them apart.
pub fn login_if_valid(
    cookie: &str,
    secret: impl AsRef<[u8]>,
    validation: &impl Validate<Claims = VerifiedCookie>,
) -> Option<String> {
    let verified = verify(cookie, secret).ok()?;
    verified.validate(validation).ok()?;
    Some(verified.login)
}

/// Returns the login of a cookie that verifies and has not yet expired.
pub fn login(cookie: &str, secret: impl AsRef<[u8]>) -> Option<String> {
    login_if_valid(cookie, secret, &Time::valid_now())
}
