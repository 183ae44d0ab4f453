//! Application Configuration

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session lifetime (24 hours)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Reset token lifetime (1 hour)
    pub reset_token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            password_pepper: None,
            reset_token_ttl: Duration::from_secs(3600),
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Session TTL as a chrono duration (for expiry arithmetic)
    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_ttl)
            .unwrap_or_else(|_| chrono::Duration::hours(24))
    }

    /// Reset token TTL as a chrono duration
    pub fn reset_token_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.reset_token_ttl)
            .unwrap_or_else(|_| chrono::Duration::hours(1))
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Cookie configuration for the session cookie
    pub fn cookie_config(&self) -> platform::cookie::CookieConfig {
        platform::cookie::CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs() as i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_ttl, Duration::from_secs(86400));
        assert_eq!(config.cookie_same_site, SameSite::Strict);
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_development_has_random_secret() {
        let a = AuthConfig::development();
        let b = AuthConfig::development();
        assert!(!a.cookie_secure);
        assert_ne!(a.session_secret, b.session_secret);
    }

    #[test]
    fn test_cookie_config_attributes() {
        let config = AuthConfig::default();
        let cookie = config.cookie_config().build_set_cookie("tok");
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=86400"));
    }
}
