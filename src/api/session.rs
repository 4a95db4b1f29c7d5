//! Signed session tokens and the cookie that carries them

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::constants::SESSION_COOKIE_NAME;
use crate::config::AuthConfig;
use crate::services::Principal;
use crate::utils::random_code;

const SESSION_TOKEN_TYPE: &str = "session";

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub token_type: String,
}

/// Issues and checks session tokens (HS256 JWT)
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
    cookie_secure: bool,
}

impl SessionService {
    pub fn new(secret: &str, ttl_secs: u64, cookie_secure: bool) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
            cookie_secure,
        }
    }

    /// Build from config. Without a configured secret a random one is used,
    /// so sessions will not survive a restart.
    pub fn from_config(auth: &AuthConfig) -> Self {
        let secret = match auth.configured_session_secret() {
            Some(secret) => secret.to_string(),
            None => {
                warn!("Session secret not configured, generating a random one; sessions end on restart");
                random_code(32)
            }
        };
        Self::new(&secret, auth.session_ttl_secs(), auth.cookie_secure)
    }

    pub fn issue(&self, principal: &Principal) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: principal.username.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_secs as i64)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: SESSION_TOKEN_TYPE.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    pub fn validate(&self, token: &str) -> Result<Principal, jsonwebtoken::errors::Error> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())?;

        if token_data.claims.token_type != SESSION_TOKEN_TYPE {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }

        Ok(Principal::new(token_data.claims.sub))
    }

    fn build_cookie(&self, value: String, max_age: CookieDuration) -> Cookie<'static> {
        let mut cookie = Cookie::new(SESSION_COOKIE_NAME, value);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.cookie_secure);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(max_age);
        cookie
    }

    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        self.build_cookie(token, CookieDuration::seconds(self.ttl_secs as i64))
    }

    /// Cookie that makes the browser drop the session
    pub fn expired_cookie(&self) -> Cookie<'static> {
        self.build_cookie(String::new(), CookieDuration::ZERO)
    }
}
