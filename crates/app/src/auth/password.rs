//! Password hashing for stored accounts.
//!
//! Hashes are Argon2id PHC strings with a per-password salt from [`OsRng`],
//! so the parameters travel with the hash.

use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash `password` for storage.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// Check `password` against a stored hash.
///
/// A mismatch is `Ok(false)`; only a malformed hash is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, password_hash::Error> {
    let parsed = PasswordHash::new(stored_hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Err(password_hash::Error::Password) => Ok(false),
        other => other.map(|()| true),
    }
}

/// Spend the same work as a real verification when the account is unknown,
/// so a miss on the email is indistinguishable from a wrong password.
pub fn verify_unknown_account(password: &str) {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();
    let dummy = DUMMY_HASH.get_or_init(|| hash_password("staydesk-unknown-account").ok());
    if let Some(hash) = dummy {
        let _ = verify_password(password, hash);
    }
}
