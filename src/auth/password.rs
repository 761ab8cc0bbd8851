use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Hash a plaintext password into a salted PHC string safe to persist.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "password hashing failed");
            anyhow::anyhow!(e.to_string())
        })?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored hash. A mismatch is
/// `Ok(false)`; a stored hash that cannot be parsed is an error.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "stored password hash is malformed");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_accepts_the_password() {
        let hash = hash_password("let-me-in-please").expect("hash");
        assert!(verify_password("let-me-in-please", &hash).expect("verify"));
    }

    #[test]
    fn verify_rejects_a_wrong_password() {
        let hash = hash_password("let-me-in-please").expect("hash");
        assert!(!verify_password("let-me-out", &hash).expect("verify"));
    }

    #[test]
    fn stored_plaintext_never_equals_the_hash() {
        let hash = hash_password("let-me-in-please").expect("hash");
        assert_ne!(hash, "let-me-in-please");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn hashing_is_salted() {
        let a = hash_password("same-password").expect("hash");
        let b = hash_password("same-password").expect("hash");
        assert_ne!(a, b);
    }

    #[test]
    fn verify_errors_on_a_malformed_stored_hash() {
        assert!(verify_password("anything", "plainly-not-a-phc-string").is_err());
    }
}
