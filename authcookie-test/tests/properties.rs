use authcookie::validation::Time;
use authcookie::{CookieError, MIN_ENCODED_LEN, SecretKey, SignedCookie, max_encoded_len};

const KEY: &[u8] = b"secret key";

const LOGINS: &[&str] = &[
    "a",
    "bender",
    "hello world",
    "|",
    "~",
    "~|~",
    "||||",
    "~~~!|zoidberg|!~~~",
    "one~!two~~~!three~|four",
    "üñíçødé",
    "user@example.com",
    "tab\tnew\nline",
    "\0",
];

const EXPIRES: &[u32] = &[0, 1, 42, 1_700_000_000, u32::MAX];

fn at(secs: i64) -> jiff::Timestamp {
    jiff::Timestamp::from_second(secs).unwrap()
}

fn is_malformed(r: Result<authcookie::VerifiedCookie, CookieError>) -> bool {
    matches!(r, Err(CookieError::Malformed(_)))
}

#[test]
fn round_trip() {
    authcookie_test::init_tracing();

    for login in LOGINS {
        for &expires in EXPIRES {
            let cookie = authcookie::issue(login, expires, KEY).unwrap();
            assert!(cookie.len() >= MIN_ENCODED_LEN);
            assert!(cookie.len() <= max_encoded_len(login.len()));

            let verified = authcookie::verify(&cookie, KEY).unwrap();
            assert_eq!(verified.login, *login);
            assert_eq!(verified.expires, expires);
        }
    }
}

#[test]
fn empty_login() {
    for &expires in EXPIRES {
        assert_eq!(authcookie::issue("", expires, KEY), None);
    }
}

#[test]
fn tampered_tag_is_wrong_signature() {
    authcookie_test::init_tracing();

    for login in LOGINS {
        let cookie = authcookie::issue(login, 1_700_000_000, KEY).unwrap();
        let (payload, tag) = cookie.rsplit_once('|').unwrap();
        let tag = hex::decode(tag).unwrap();

        for bit in 0..tag.len() * 8 {
            let mut bad = tag.clone();
            bad[bit / 8] ^= 1 << (bit % 8);
            let bad = format!("{payload}|{}", hex::encode(bad));

            assert_eq!(
                authcookie::verify(&bad, KEY),
                Err(CookieError::WrongSignature),
                "{login:?} bit {bit}"
            );
        }
    }
}

#[test]
fn truncation_is_malformed() {
    authcookie_test::init_tracing();

    for login in LOGINS {
        let cookie = authcookie::issue(login, 1_700_000_000, KEY).unwrap();
        for (end, _) in cookie.char_indices().skip(1) {
            let truncated = &cookie[..end];
            assert!(
                is_malformed(authcookie::verify(truncated, KEY)),
                "{truncated:?}"
            );
        }
        assert!(is_malformed(authcookie::verify("", KEY)));
    }
}

#[test]
fn wrong_key() {
    let other = SecretKey::random().unwrap();
    for login in LOGINS {
        let cookie = authcookie::issue(login, 42, KEY).unwrap();
        assert_eq!(
            authcookie::verify(&cookie, &other),
            Err(CookieError::WrongSignature)
        );
        assert_eq!(
            authcookie::verify(&cookie, b"secret kez"),
            Err(CookieError::WrongSignature)
        );
    }
}

#[test]
fn expiration_is_data() {
    let past = 1_000;
    let cookie = authcookie::issue("bender", past, KEY).unwrap();

    let verified = authcookie::verify(&cookie, KEY).unwrap();
    assert_eq!(verified.expires, past);

    assert_eq!(
        authcookie::login_if_valid(&cookie, KEY, &Time::valid_at(at(1_000))).as_deref(),
        Some("bender")
    );
    assert_eq!(
        authcookie::login_if_valid(&cookie, KEY, &Time::valid_at(at(1_001))),
        None
    );
    assert_eq!(authcookie::login(&cookie, KEY), None);
}

#[test]
fn login_if_valid_hides_the_reason() {
    let time = Time::valid_at(at(1_000));
    let fresh = authcookie::issue("bender", 2_000, KEY).unwrap();
    let stale = authcookie::issue("bender", 500, KEY).unwrap();

    let malformed = &fresh[..fresh.len() - 1];
    let forged = authcookie::issue("bender", 2_000, b"other key").unwrap();

    for cookie in [malformed, forged.as_str(), stale.as_str()] {
        assert_eq!(authcookie::login_if_valid(cookie, KEY, &time), None);
    }
    assert_eq!(
        authcookie::login_if_valid(&fresh, KEY, &time).as_deref(),
        Some("bender")
    );
}

#[test]
fn bender() {
    let cookie = authcookie::issue("bender", 1_700_000_000, "secret key").unwrap();

    let verified = authcookie::verify(&cookie, "secret key").unwrap();
    assert_eq!(verified.login, "bender");
    assert_eq!(verified.expires, 1_700_000_000);

    assert_eq!(
        authcookie::verify(&cookie, "wrong key"),
        Err(CookieError::WrongSignature)
    );
    assert!(is_malformed(authcookie::verify(
        &cookie[..cookie.len() - 1],
        "secret key"
    )));
}

#[test]
fn parse_before_verify() {
    let cookie = authcookie::issue("one|two", 42, KEY).unwrap();
    let signed: SignedCookie = cookie.parse().unwrap();
    assert_eq!(signed.unverified_login(), "one|two");
    assert_eq!(signed.unverified_expires(), 42);
    assert_eq!(signed.to_string(), cookie);

    let verified = signed.verify(KEY).unwrap();
    assert_eq!(verified.expires_at(), at(42));
}

#[test]
fn parallel() {
    let key = SecretKey::random().unwrap();
    std::thread::scope(|s| {
        for i in 0..8u32 {
            let key = &key;
            s.spawn(move || {
                for j in 0..64u32 {
                    let login = format!("user|{i}~{j}");
                    let cookie = authcookie::issue(&login, i * 1000 + j, key).unwrap();
                    let verified = authcookie::verify(&cookie, key).unwrap();
                    assert_eq!(verified.login, login);
                    assert_eq!(verified.expires, i * 1000 + j);
                }
            });
        }
    });
}
