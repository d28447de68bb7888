//! Password hashing for user accounts.
//!
//! Hashes are PBKDF2-HMAC-SHA256 with a random per-user salt, stored as a
//! versioned string so the iteration count can be raised without breaking
//! existing rows.

use std::num::NonZeroU32;

use base64::{Engine as _, engine::general_purpose};
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};

const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;
const HASH_PREFIX: &str = "pbkdf2:v1";
const DEFAULT_ITERATIONS: u32 = 100_000;

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

/// Hash a password for storage, using the default iteration count.
pub(crate) fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .expect("salt generation failed");
    derive(password, &salt, DEFAULT_ITERATIONS)
}

fn derive(password: &str, salt: &[u8], iterations: u32) -> String {
    let mut hash = [0u8; HASH_LEN];
    pbkdf2::derive(
        ALGORITHM,
        NonZeroU32::new(iterations).expect("iterations must be non-zero"),
        salt,
        password.as_bytes(),
        &mut hash,
    );
    format!(
        "{HASH_PREFIX}:{iterations}:{}:{}",
        general_purpose::STANDARD.encode(salt),
        general_purpose::STANDARD.encode(hash)
    )
}

/// Verify a password against a stored hash string.
pub(crate) fn verify_password(password: &str, stored: &str) -> bool {
    let Some(rest) = stored.strip_prefix(HASH_PREFIX) else {
        return false;
    };
    let mut parts = rest.trim_start_matches(':').splitn(3, ':');
    let (Some(iterations), Some(salt_b64), Some(hash_b64)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    let Some(iterations) = NonZeroU32::new(iterations) else {
        return false;
    };
    let (Ok(salt), Ok(hash)) = (
        general_purpose::STANDARD.decode(salt_b64),
        general_purpose::STANDARD.decode(hash_b64),
    ) else {
        return false;
    };
    pbkdf2::verify(ALGORITHM, iterations, &salt, password.as_bytes(), &hash).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verify_round_trip() {
        let stored = hash_password("correct horse");
        assert!(stored.starts_with("pbkdf2:v1:"));
        assert!(verify_password("correct horse", &stored));
        assert!(!verify_password("wrong horse", &stored));
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("same password");
        let second = hash_password("same password");
        assert_ne!(first, second);
    }

    #[test]
    fn verify_rejects_unversioned_values() {
        assert!(!verify_password("anything", "plaintext-password"));
        assert!(!verify_password("anything", "pbkdf2:v1:not-a-number:AA==:AA=="));
        assert!(!verify_password("anything", "pbkdf2:v1:0:AA==:AA=="));
        assert!(!verify_password("anything", "pbkdf2:v1:1000:*bad*:AA=="));
    }
}
