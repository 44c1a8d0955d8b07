use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token lifetime: one hour from issuance. Expiry is the only termination
/// mechanism; there is no server-side revocation list.
pub const TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Owning user id.
    pub sub: i32,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
    #[error("token generation failed: {0}")]
    Generation(String),
}

/// HS256 signing and verification keys derived from the server secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn issue(&self, user_id: i32) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue with an explicit clock. Production code goes through
    /// [`TokenKeys::issue`]; tests use this to back-date tokens.
    pub fn issue_at(&self, user_id: i32, now: DateTime<Utc>) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: user_id,
            iat,
            exp: iat + TOKEN_TTL_SECS,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<i32, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn keys() -> TokenKeys {
        TokenKeys::new(b"unit-test-secret")
    }

    #[test]
    fn verify_returns_issued_user_id() {
        let keys = keys();
        let token = keys.issue(7).unwrap();
        assert_eq!(keys.verify(&token).unwrap(), 7);
    }

    #[test]
    fn token_expires_after_one_hour() {
        let keys = keys();
        // Two hours in the past, well beyond TTL plus validation leeway.
        let token = keys
            .issue_at(7, Utc::now() - Duration::hours(2))
            .unwrap();
        assert!(matches!(keys.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn claims_carry_one_hour_ttl() {
        let keys = keys();
        let token = keys.issue_at(42, Utc::now()).unwrap();
        let data = decode::<Claims>(&token, &keys.decoding, &Validation::default()).unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let keys = keys();
        let mut token = keys.issue(7).unwrap();
        // Flip a character in the signature segment.
        let flipped = if token.ends_with('a') { 'b' } else { 'a' };
        token.pop();
        token.push(flipped);
        assert!(matches!(keys.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = keys().issue(7).unwrap();
        let other = TokenKeys::new(b"a-different-secret");
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid)));
    }
}
