// Credential hashing
// The single administrative password is bcrypt-hashed at startup and
// verified against that hash on login

use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashes a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, String> {
    hash(password, DEFAULT_COST).map_err(|e| e.to_string())
}

/// Verifies a password against a bcrypt hash
///
/// Returns `Ok(false)` on a mismatch; `Err` only when the stored hash is
/// unusable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    verify(password, hash).map_err(|e| e.to_string())
}
