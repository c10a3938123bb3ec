use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The user id the token was issued for.
    pub sub: i64,
    /// Expiry as a unix timestamp (validated by the decoder).
    pub exp: i64,
}

/// Issues an HS256 access token expiring `token_expire_minutes` from now.
pub fn issue(user_id: i64, cfg: &AuthConfig) -> AppResult<String> {
    let expire = Utc::now() + Duration::minutes(cfg.token_expire_minutes);
    let claims = Claims { sub: user_id, exp: expire.timestamp() };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(cfg.secret_key.as_bytes()))
        .map_err(|err| AppError::Internal(anyhow::anyhow!("failed to sign access token: {}", err)))
}

/// Decodes and validates an access token (signature + expiry).
pub fn verify(token: &str, cfg: &AuthConfig) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.secret_key.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid authentication credentials".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cfg() -> AuthConfig {
        AuthConfig { secret_key: "unit-test-secret-key".to_string(), token_expire_minutes: 30 }
    }

    #[test]
    fn issue_then_verify_roundtrip() {
        let cfg = test_cfg();
        let token = issue(42, &cfg).unwrap();
        let claims = verify(&token, &cfg).unwrap();
        assert_eq!(claims.sub, 42);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let cfg = test_cfg();
        let token = issue(7, &cfg).unwrap();
        let other =
            AuthConfig { secret_key: "a-different-secret".to_string(), token_expire_minutes: 30 };
        assert!(verify(&token, &other).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let cfg = test_cfg();
        let claims = Claims { sub: 7, exp: (Utc::now() - Duration::minutes(10)).timestamp() };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(cfg.secret_key.as_bytes()),
        )
        .unwrap();
        assert!(verify(&token, &cfg).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify("not.a.token", &test_cfg()).is_err());
    }
}
