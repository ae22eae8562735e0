use std::time::Duration;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use super::claims::Claims;
use crate::config::JwtConfig;
use crate::state::AppState;
use crate::store::models::{Role, User};

/// Holds JWT signing and verification keys with config data.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::from_config(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl: Duration::from_secs((cfg.ttl_minutes as u64) * 60),
        }
    }

    pub fn sign(&self, user: &User) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: user.id,
            role: user.role,
            class_code: user.class_code.clone(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user.id, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

/// Extracts and validates the bearer token, exposing the authenticated
/// identity to handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
    pub class_code: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Missing Authorization header".to_string(),
            ))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header".to_string(),
            ))?;

        let claims = match keys.verify(token) {
            Ok(c) => c,
            Err(_) => {
                warn!("invalid or expired token");
                return Err((
                    StatusCode::UNAUTHORIZED,
                    "Invalid or expired token".to_string(),
                ));
            }
        };

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
            class_code: claims.class_code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str, issuer: &str, audience: &str) -> JwtKeys {
        JwtKeys::from_config(&JwtConfig {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_minutes: 5,
        })
    }

    fn make_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "emma".into(),
            password_hash: "hash".into(),
            class_code: "klasA".into(),
            role: Role::Student,
            points: 0,
            level: 1,
            badges: vec![],
            streak_days: 0,
            last_entry_date: None,
            quiz_correct_answers: 0,
            food_history: vec![],
        }
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let keys = make_keys("dev-secret", "test-issuer", "test-aud");
        let user = make_user();
        let token = keys.sign(&user).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.class_code, "klasA");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
    }

    #[test]
    fn verify_rejects_wrong_issuer_or_audience() {
        let good = make_keys("same-secret", "good-iss", "good-aud");
        let bad = make_keys("same-secret", "bad-iss", "bad-aud");
        let token = good.sign(&make_user()).expect("sign");
        assert!(bad.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let good = make_keys("secret-a", "iss", "aud");
        let bad = make_keys("secret-b", "iss", "aud");
        let token = good.sign(&make_user()).expect("sign");
        assert!(bad.verify(&token).is_err());
    }
}
