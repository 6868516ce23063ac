//! Cookie text encoding.
//!
//! ```text
//! escaped_login|expiration|hex(tag)
//! ```

use core::fmt;
use std::borrow::Cow;

use crate::tokens::SignedCookie;
use crate::{CookieError, Malformed};

/// Separates the fields of a cookie.
pub const SEPARATOR: char = '|';
/// Starts an escape sequence in the login field.
pub const ESCAPE: char = '~';
/// Length of the signature in bytes.
pub const TAG_LEN: usize = 32;

/// Digits in `u32::MAX`.
const MAX_EXPIRATION_DIGITS: usize = 10;

/// Length of the shortest well-formed cookie: a one byte login, a one digit
/// expiration, and the hex signature.
pub const MIN_ENCODED_LEN: usize = 1 + 1 + 1 + 1 + 2 * TAG_LEN;

/// Length of the longest cookie that can be issued for a login of at most
/// `max_login_len` bytes.
///
/// Cookies longer than this can be rejected before they are parsed.
pub const fn max_encoded_len(max_login_len: usize) -> usize {
    // every login byte may escape to two
    max_login_len
        .saturating_mul(2)
        .saturating_add(1 + MAX_EXPIRATION_DIGITS + 1 + 2 * TAG_LEN)
}

/// Escape a login so it can not be confused with the field separator.
///
/// `~` becomes `~~` and `|` becomes `~!`.
pub fn escape(login: &str) -> Cow<'_, str> {
    if !login.contains([ESCAPE, SEPARATOR]) {
        return Cow::Borrowed(login);
    }

    let mut out = String::with_capacity(login.len() + 8);
    for c in login.chars() {
        match c {
            ESCAPE => out.push_str("~~"),
            SEPARATOR => out.push_str("~!"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Reverse [`escape`].
pub fn unescape(s: &str) -> Result<Cow<'_, str>, Malformed> {
    if !s.contains(ESCAPE) {
        return Ok(Cow::Borrowed(s));
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(i) = rest.find(ESCAPE) {
        out.push_str(&rest[..i]);
        match rest.as_bytes().get(i + 1) {
            Some(b'~') => out.push(ESCAPE),
            Some(b'!') => out.push(SEPARATOR),
            Some(_) => return Err(Malformed::UnknownEscape),
            None => return Err(Malformed::UnterminatedEscape),
        }
        // both bytes of the sequence are ascii
        rest = &rest[i + 2..];
    }
    out.push_str(rest);

    Ok(Cow::Owned(out))
}

/// Parse the canonical decimal form of an expiration time.
fn parse_expiration(s: &str) -> Result<u32, Malformed> {
    let canonical = match s.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        digits => {
            digits.len() <= MAX_EXPIRATION_DIGITS && digits.iter().all(u8::is_ascii_digit)
        }
    };
    if !canonical {
        return Err(Malformed::Expiration);
    }
    s.parse().map_err(|_| Malformed::Expiration)
}

fn parse_tag(s: &str) -> Result<[u8; TAG_LEN], Malformed> {
    let mut tag = [0; TAG_LEN];
    hex::decode_to_slice(s, &mut tag).map_err(|err| match err {
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            Malformed::TagLength
        }
        _ => Malformed::TagEncoding,
    })?;
    Ok(tag)
}

impl fmt::Display for SignedCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.payload)?;
        write!(f, "{SEPARATOR}")?;
        f.write_str(&hex::encode(self.tag))
    }
}

impl std::str::FromStr for SignedCookie {
    type Err = CookieError;

    /// Checks the structure of the cookie. The signature is not verified.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split(SEPARATOR);
        let (Some(login), Some(expiration), Some(tag), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(Malformed::FieldCount.into());
        };

        let tag = parse_tag(tag)?;
        let expires = parse_expiration(expiration)?;
        if login.is_empty() {
            return Err(Malformed::EmptyLogin.into());
        }
        let unescaped = unescape(login)?.into_owned();

        // the signed bytes are exactly `login|expiration` as received
        let payload_len = login.len() + SEPARATOR.len_utf8() + expiration.len();
        Ok(Self {
            payload: s[..payload_len].to_owned(),
            login: unescaped,
            expires,
            tag,
        })
    }
}

#[cfg(feature = "serde")]
impl serde_core::Serialize for SignedCookie {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde_core::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde_core::Deserialize<'de> for SignedCookie {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde_core::Deserializer<'de>,
    {
        struct FromStrVisitor;
        impl<'de> serde_core::de::Visitor<'de> for FromStrVisitor {
            type Value = SignedCookie;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a \"login|expiration|signature\" cookie")
            }
            fn visit_str<Err>(self, v: &str) -> Result<Self::Value, Err>
            where
                Err: serde_core::de::Error,
            {
                v.parse().map_err(Err::custom)
            }
        }
        deserializer.deserialize_str(FromStrVisitor)
    }
}
