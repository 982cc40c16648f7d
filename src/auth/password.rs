//! Password hashing and verification for stile.
//!
//! Uses Argon2id. Hashes are PHC-formatted strings with a per-call random
//! salt, so hashing the same password twice yields different outputs.
//! Length policy (5-20 characters) is enforced upstream by
//! [`crate::auth::validation`], not here.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use thiserror::Error;

/// Password hashing errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),
}

/// Create the Argon2 hasher with recommended parameters.
///
/// Parameters:
/// - Memory cost: 64 MB (65536 KiB)
/// - Time cost: 3 iterations
/// - Parallelism: 4 threads
fn create_argon2() -> Argon2<'static> {
    let m_cost = 65536;
    let t_cost = 3;
    let p_cost = 4;

    let params = Params::new(m_cost, t_cost, p_cost, None).expect("valid Argon2 params");
    Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
}

/// Hash a password using Argon2id.
///
/// Returns a PHC-formatted hash string that embeds the salt and parameters.
///
/// # Examples
///
/// ```
/// use stile::hash_password;
///
/// let hash = hash_password("my_password").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = create_argon2();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// Returns `false` for a wrong password and also for a malformed or
/// foreign-format stored hash; verification never fails with an error.
/// The comparison runs in constant time within the argon2 verifier.
///
/// # Examples
///
/// ```
/// use stile::{hash_password, verify_password};
///
/// let hash = hash_password("my_password").unwrap();
/// assert!(verify_password("my_password", &hash));
/// assert!(!verify_password("wrong_password", &hash));
/// assert!(!verify_password("my_password", "not a phc string"));
/// ```
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(stored_hash) {
        Ok(h) => h,
        Err(_) => {
            tracing::debug!("stored hash is not a valid PHC string");
            return false;
        }
    };

    // Parameters come from the parsed hash, not from create_argon2()
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
