use std::env;

use axum_extra::extract::cookie::{Cookie, Key, SameSite};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha512};
use time::Duration;
use tracing::warn;

/// Name of the cookie carrying the signed user id.
pub const USER_ID_COOKIE: &str = "user_id";

#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    /// Lifetime of the cookie set by `POST /api/v1/users/login`.
    pub api_max_age: Duration,
    /// Lifetime of the cookie set by the web login and register pages.
    pub web_max_age: Duration,
}

impl CookieConfig {
    pub fn from_env() -> Self {
        let is_production = current_environment() == "production";

        if is_production {
            CookieConfig {
                secure: true,
                http_only: true,
                same_site: SameSite::Strict,
                api_max_age: Duration::hours(5),
                web_max_age: Duration::days(365),
            }
        } else {
            CookieConfig {
                secure: false,
                http_only: true,
                same_site: SameSite::Lax,
                api_max_age: Duration::hours(5),
                web_max_age: Duration::days(365),
            }
        }
    }

    pub fn session_cookie(&self, user_id: i64, max_age: Duration) -> Cookie<'static> {
        Cookie::build((USER_ID_COOKIE, user_id.to_string()))
            .path("/")
            .http_only(self.http_only)
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(max_age)
            .build()
    }

    /// Expired, empty `user_id` cookie. Sent unsigned since it carries nothing.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build((USER_ID_COOKIE, "")).path("/").build();
        cookie.make_removal();
        cookie
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        CookieConfig {
            secure: false,
            http_only: true,
            same_site: SameSite::Lax,
            api_max_age: Duration::hours(5),
            web_max_age: Duration::days(365),
        }
    }
}

pub fn validate_production_config() {
    if current_environment() != "production" {
        return;
    }

    let secret = match env::var("SESSION_SECRET") {
        Ok(secret) => secret,
        Err(_) => panic!("FATAL: SESSION_SECRET must be set in production"),
    };
    let decoded_secret = decode_secret_bytes(&secret);

    if decoded_secret.len() < 64 {
        panic!("FATAL: SESSION_SECRET must be at least 64 bytes in production");
    }

    let lowered = secret.to_ascii_lowercase();
    if lowered.contains("example") || lowered.contains("changeme") || lowered.contains("default") {
        panic!("FATAL: SESSION_SECRET appears to be a default value. Generate a secure secret!");
    }
}

fn current_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}

pub fn load_session_key() -> Key {
    match env::var("SESSION_SECRET") {
        Ok(secret) if !secret.is_empty() => {
            let bytes = decode_secret_bytes(&secret);
            key_from_secret_bytes(&bytes)
        }
        _ => {
            warn!("SESSION_SECRET not set; generating ephemeral key (development only)");
            Key::generate()
        }
    }
}

fn decode_secret_bytes(secret: &str) -> Vec<u8> {
    STANDARD
        .decode(secret.as_bytes())
        .unwrap_or_else(|_| secret.as_bytes().to_vec())
}

/// Inputs shorter than 64 bytes are stretched through SHA-512.
pub fn key_from_secret_bytes(bytes: &[u8]) -> Key {
    if bytes.len() >= 64 {
        Key::from(&bytes[..64])
    } else {
        let digest = Sha512::digest(bytes);
        Key::from(digest.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_is_stretched() {
        let a = key_from_secret_bytes(b"short");
        let b = key_from_secret_bytes(b"short");
        assert_eq!(a.master(), b.master());
        assert_eq!(a.master().len(), 64);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let config = CookieConfig::default();
        let cookie = config.session_cookie(42, config.api_max_age);

        assert_eq!(cookie.name(), USER_ID_COOKIE);
        assert_eq!(cookie.value(), "42");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::hours(5)));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = CookieConfig::default().removal_cookie();

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
