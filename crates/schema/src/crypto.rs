//! PBKDF2-SHA256 password hashing with a per-user salt.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::ValidationError;

const PBKDF2_ITERATIONS: u32 = 600_000;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

/// Hash a password. Returns `(hash_hex, salt_hex)` for the two user columns.
pub fn hash_password(password: &str) -> Result<(String, String), ValidationError> {
    let mut salt = [0u8; SALT_LEN];
    getrandom::getrandom(&mut salt)
        .map_err(|e| ValidationError::new(format!("RNG failure: {e}")))?;

    let mut hash = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, PBKDF2_ITERATIONS, &mut hash);

    Ok((hex::encode(hash), hex::encode(salt)))
}

/// Verify a password against stored hash and salt (both hex-encoded).
pub fn verify_password(password: &str, hash_hex: &str, salt_hex: &str) -> bool {
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let Ok(expected) = hex::decode(hash_hex) else {
        return false;
    };

    let mut hash = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, PBKDF2_ITERATIONS, &mut hash);

    // Constant-time comparison
    hash.len() == expected.len() && hash.iter().zip(expected.iter()).all(|(a, b)| a == b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let (hash, salt) = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash, &salt));
        assert!(!verify_password("wrong horse", &hash, &salt));
        assert!(!verify_password("correct horse", "zz-not-hex", &salt));
    }

    #[test]
    fn test_salts_differ() {
        let (_, salt_a) = hash_password("pw").unwrap();
        let (_, salt_b) = hash_password("pw").unwrap();
        assert_ne!(salt_a, salt_b);
    }
}
