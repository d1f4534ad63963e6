use accountd_config::AuthConfig;
use accountd_database::PublicProfile;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("signing secret is not configured")]
    MissingSecret,
    #[error("failed to encode token: {0}")]
    TokenCreation(String),
    #[error("invalid token: {0}")]
    InvalidToken(String),
}

/// Digest function applied to plaintext passwords before storage and lookup.
///
/// Injected through app state so the scheme can be swapped without touching
/// the handlers. The shipped [`Sha256Hasher`] matches the digests already
/// persisted by earlier deployments; a key-derivation scheme would implement
/// the same trait.
pub trait PasswordHasher: Send + Sync {
    fn digest(&self, plaintext: &str) -> String;
}

/// Hex-encoded SHA-256 of the UTF-8 plaintext. Deterministic and unsalted,
/// which is what existing stored digests require.
#[derive(Debug, Default, Clone)]
pub struct Sha256Hasher;

impl PasswordHasher for Sha256Hasher {
    fn digest(&self, plaintext: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(plaintext.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Claims carried by an issued token: the bearer's public profile plus a
/// standard `exp` payload claim.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub exp: usize,
}

/// Signs bearer tokens over a shared HS256 secret.
///
/// Constructed once at startup from [`AuthConfig`]; a missing secret is a
/// startup failure, never a per-request one.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_duration: Duration,
}

impl TokenIssuer {
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let secret = config.secret.as_deref().ok_or(AuthError::MissingSecret)?;
        let ttl_days = config.token_ttl_days.max(0) as u64;
        Ok(Self::new(secret, Duration::from_secs(ttl_days * 24 * 60 * 60)))
    }

    pub fn new(secret: &str, token_duration: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            token_duration,
        }
    }

    /// Issue a signed token binding the given public profile.
    pub fn issue(&self, profile: &PublicProfile) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::TokenCreation("system time error".to_string()))?;

        let exp = now + self.token_duration;

        let claims = Claims {
            id: profile.id,
            name: profile.name.clone(),
            email: profile.email.clone(),
            address: profile.address.clone(),
            phone: profile.phone.clone(),
            exp: exp.as_secs() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| AuthError::TokenCreation(err.to_string()))
    }

    /// Validate a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(jsonwebtoken::Algorithm::HS256);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|err| AuthError::InvalidToken(err.to_string()))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_profile() -> PublicProfile {
        PublicProfile {
            id: 1,
            name: "t".to_string(),
            email: "t@m.com".to_string(),
            address: "t".to_string(),
            phone: "t".to_string(),
        }
    }

    fn test_issuer() -> TokenIssuer {
        TokenIssuer::new(
            "test_secret_key_that_is_long_enough_for_hs256",
            Duration::from_secs(7 * 24 * 60 * 60),
        )
    }

    #[test]
    fn sha256_digest_is_deterministic() {
        let hasher = Sha256Hasher;
        assert_eq!(hasher.digest("1234"), hasher.digest("1234"));
        assert_ne!(hasher.digest("1234"), hasher.digest("12345"));
    }

    #[test]
    fn sha256_digest_matches_known_vector() {
        let hasher = Sha256Hasher;
        assert_eq!(
            hasher.digest("1234"),
            "03ac674216f3e15c761ee1a5e255f067953623c8b388b4459e13f978d7c846f4"
        );
    }

    #[test]
    fn token_issue_and_verify_round_trip() {
        let issuer = test_issuer();
        let token = issuer.issue(&test_profile()).unwrap();
        assert!(!token.is_empty());

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.id, 1);
        assert_eq!(claims.email, "t@m.com");
        assert_eq!(claims.name, "t");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = test_issuer();
        let other = TokenIssuer::new("a_completely_different_secret_value", issuer.token_duration);

        let token = other.issue(&test_profile()).unwrap();
        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn missing_secret_is_a_construction_error() {
        let config = AuthConfig {
            secret: None,
            token_ttl_days: 7,
        };

        assert!(matches!(
            TokenIssuer::from_config(&config),
            Err(AuthError::MissingSecret)
        ));
    }

    #[test]
    fn from_config_uses_configured_secret() {
        let config = AuthConfig {
            secret: Some("configured-secret".to_string()),
            token_ttl_days: 7,
        };

        let issuer = TokenIssuer::from_config(&config).unwrap();
        let token = issuer.issue(&test_profile()).unwrap();
        assert!(issuer.verify(&token).is_ok());
    }
}
