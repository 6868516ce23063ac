//! Checks on verified cookies.
//!
//! Verification only proves a cookie was issued with the secret key. Whether
//! it should still be accepted is decided here.

use std::marker::PhantomData;
use std::time::Duration;

use crate::CookieError;
use crate::tokens::VerifiedCookie;

pub trait Validate {
    /// The type of claim that can be validated
    type Claims;

    /// The validation to perform on the claims
    fn validate(&self, claims: &Self::Claims) -> Result<(), CookieError>;
}

/// Accepts every cookie, including expired ones.
pub struct NoValidation<Claims>(PhantomData<Claims>);

impl<Claims> NoValidation<Claims> {
    pub fn dangerous_no_validation() -> Self {
        NoValidation(PhantomData)
    }
}

impl<Claims> Validate for NoValidation<Claims> {
    type Claims = Claims;
    fn validate(&self, _: &Self::Claims) -> Result<(), CookieError> {
        Ok(())
    }
}

/// Rejects cookies that expired before `now`.
///
/// A cookie is still valid during the second it expires.
pub struct Time {
    now: jiff::Timestamp,
}

impl Time {
    pub fn valid_now() -> Self {
        Self {
            now: jiff::Timestamp::now(),
        }
    }

    pub fn valid_at(now: jiff::Timestamp) -> Self {
        Self { now }
    }

    /// Accept cookies up to `leeway` past their expiration, to allow for
    /// clock skew between the issuer and the verifier.
    pub fn with_leeway(self, leeway: Duration) -> TimeWithLeeway {
        TimeWithLeeway {
            now: self.now,
            leeway,
        }
    }
}

impl Validate for Time {
    type Claims = VerifiedCookie;

    fn validate(&self, claims: &Self::Claims) -> Result<(), CookieError> {
        if i64::from(claims.expires) < self.now.as_second() {
            return Err(CookieError::Expired);
        }
        Ok(())
    }
}

pub struct TimeWithLeeway {
    now: jiff::Timestamp,
    leeway: Duration,
}

impl Validate for TimeWithLeeway {
    type Claims = VerifiedCookie;

    fn validate(&self, claims: &Self::Claims) -> Result<(), CookieError> {
        let leeway = i64::try_from(self.leeway.as_secs()).unwrap_or(i64::MAX);
        if i64::from(claims.expires).saturating_add(leeway) < self.now.as_second() {
            return Err(CookieError::Expired);
        }
        Ok(())
    }
}
