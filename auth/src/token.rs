use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Errors from session token operations.
///
/// Expiry is the only failure a caller may want to distinguish; everything
/// else about a bad token collapses into [`TokenError::Invalid`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}

/// Claims carried by a session token.
///
/// This is the entire session state. Tokens are self-contained and nothing
/// is kept server-side, so logout is purely a client-side affair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Numeric user id.
    pub id: i64,
    /// Email the session was established with.
    pub email: String,
    /// Role tag, carried verbatim for downstream authorization decisions.
    pub role: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Mints and validates signed session tokens (JWT, HS256).
///
/// The signing secret and token lifetime are fixed at construction.
/// Verification applies zero clock leeway: a token is rejected the moment
/// its stated window ends.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl TokenIssuer {
    /// `secret` should be at least 32 bytes for HS256. `ttl_seconds` is the
    /// lifetime stamped into every issued token.
    pub fn new(secret: &[u8], ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_seconds,
        }
    }

    /// Lifetime of issued tokens, for callers that align other state with
    /// it, such as the session cookie's Max-Age.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Mint a signed token for an authenticated user.
    pub fn issue(&self, id: i64, email: &str, role: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            id,
            email: email.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token, recovering its claims.
    ///
    /// # Errors
    /// * [`TokenError::Expired`] - the token's validity window has ended
    /// * [`TokenError::Invalid`] - bad signature, malformed structure, or
    ///   claims that do not match [`SessionClaims`]
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!!";

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let issuer = TokenIssuer::new(SECRET, 900);
        let token = issuer.issue(42, "alice@example.com", "user").unwrap();

        let claims = issuer.verify(&token).unwrap();

        assert_eq!(claims.id, 42);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, "user");
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_ttl_is_reported() {
        let issuer = TokenIssuer::new(SECRET, 900);
        assert_eq!(issuer.ttl_seconds(), 900);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let issuer = TokenIssuer::new(SECRET, 900);
        let other = TokenIssuer::new(b"another_secret_also_32_bytes_long!!", 900);
        let token = other.issue(42, "alice@example.com", "user").unwrap();

        assert!(matches!(issuer.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let issuer = TokenIssuer::new(SECRET, 900);

        assert!(matches!(
            issuer.verify("not.a.token"),
            Err(TokenError::Invalid(_))
        ));
        assert!(matches!(issuer.verify(""), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // negative lifetime backdates the expiry
        let issuer = TokenIssuer::new(SECRET, -120);
        let token = issuer.issue(42, "alice@example.com", "user").unwrap();

        assert_eq!(issuer.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_verify_rejects_foreign_claims_shape() {
        #[derive(Serialize)]
        struct Opaque {
            sub: String,
        }

        let foreign = encode(
            &Header::new(Algorithm::HS256),
            &Opaque {
                sub: "user123".to_string(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let issuer = TokenIssuer::new(SECRET, 900);
        assert!(matches!(issuer.verify(&foreign), Err(TokenError::Invalid(_))));
    }
}
