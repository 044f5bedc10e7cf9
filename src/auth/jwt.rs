// JWT token creation and verification
// Tokens are time-boxed from issuance; the window is configurable and
// defaults to 60 minutes

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (the authenticated username)
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Authenticated username (subject)
    pub sub: String,
    /// Expiry timestamp (seconds since epoch)
    pub exp: usize,
}

/// Creates a signed token for the given subject
///
/// # Arguments
/// * `subject` - The username to embed in the 'sub' claim
/// * `secret` - The signing secret (from configuration)
/// * `ttl_minutes` - Minutes until expiry
///
/// # Token Properties
/// - Signed with HS256
/// - Expires `ttl_minutes` after issuance
pub fn create_token(subject: &str, secret: &str, ttl_minutes: i64) -> Result<String, String> {
    let expiry = Utc::now() + Duration::minutes(ttl_minutes);
    let claims = Claims {
        sub: subject.to_string(),
        exp: expiry.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| e.to_string())
}

/// Verifies a token and returns its claims
///
/// Fails when the token is malformed, the signature does not match the
/// secret, or the expiry has passed.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-unit-tests";

    #[test]
    fn create_and_verify_token() {
        let token = create_token("admin", TEST_SECRET, 60).expect("valid token");

        let claims = verify_token(&token, TEST_SECRET).expect("valid verification");
        assert_eq!(claims.sub, "admin");
    }

    #[test]
    fn wrong_secret_fails() {
        let token = create_token("admin", TEST_SECRET, 60).expect("valid token");

        let result = verify_token(&token, "wrong-secret");
        assert!(result.is_err());
    }

    #[test]
    fn invalid_token_fails() {
        let result = verify_token("invalid.token.string", TEST_SECRET);
        assert!(result.is_err());
    }

    #[test]
    fn expired_token_fails() {
        // Issued two hours in the past, well beyond validation leeway
        let token = create_token("admin", TEST_SECRET, -120).expect("valid token");

        let result = verify_token(&token, TEST_SECRET);
        assert!(result.is_err());
    }

    #[test]
    fn token_expiry_honors_window() {
        let token = create_token("admin", TEST_SECRET, 60).expect("valid token");

        let claims = verify_token(&token, TEST_SECRET).expect("valid verification");
        let expiry_time = claims.exp as i64;
        let now = Utc::now().timestamp();
        let in_60_minutes = (Utc::now() + Duration::minutes(60)).timestamp();

        assert!(expiry_time > now);
        assert!(expiry_time <= in_60_minutes + 10); // 10 second buffer
    }
}
