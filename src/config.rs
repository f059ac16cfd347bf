//! Runtime configuration read from the environment.

use std::{env, fmt, net::SocketAddr, str::FromStr, time::Duration};

use sha2::{Digest, Sha512};
use thiserror::Error;
use tower_sessions::cookie::Key;

/// Fallback used when `SESSION_SECRET_KEY` is unset. Anyone who knows it can
/// forge session cookies, so production deployments must set the variable.
pub const INSECURE_DEFAULT_SECRET: &str = "default_secret_key";

/// Sessions and saved carts both live this long.
pub const RETENTION_MINUTES: i64 = 4320;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {var}")]
    Invalid { var: &'static str, value: String },
}

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long a request waits for a free connection before giving up.
    /// Connections that are checked out and never returned show up here.
    pub acquire_timeout: Duration,
}

impl DatabaseSettings {
    /// A private in-memory database. One connection only: every SQLite
    /// `:memory:` connection is its own database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

/// Session cookie settings.
#[derive(Clone)]
pub struct SessionSettings {
    secret: String,
    pub secure: bool,
    pub lifetime: time::Duration,
}

impl SessionSettings {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            secure: false,
            lifetime: time::Duration::minutes(RETENTION_MINUTES),
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret == INSECURE_DEFAULT_SECRET
    }

    /// Cookie signing key. `Key` needs 64 bytes, so the secret is stretched
    /// through SHA-512.
    pub fn signing_key(&self) -> Key {
        let digest = Sha512::digest(self.secret.as_bytes());
        Key::from(digest.as_slice())
    }
}

impl fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSettings")
            .field("secret", &"<redacted>")
            .field("secure", &self.secure)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    /// Period of the task sweeping expired sessions and saved carts.
    pub cleanup_interval: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database = DatabaseSettings {
            url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://movies.db?mode=rwc".to_string()),
            max_connections: parse_nonzero("DATABASE_MAX_CONNECTIONS", 5)?,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(parse_nonzero("DATABASE_ACQUIRE_TIMEOUT_SECS", 10)?),
        };

        let mut session = SessionSettings::new(
            env::var("SESSION_SECRET_KEY").unwrap_or_else(|_| INSECURE_DEFAULT_SECRET.to_string()),
        );
        session.secure = parse_var("SESSION_SECURE_COOKIE", false)?;

        Ok(Self {
            bind_addr: parse_var("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
            database,
            session,
            cleanup_interval: Duration::from_secs(parse_nonzero("CLEANUP_INTERVAL_SECS", 3600)?),
        })
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

/// Pool sizes, timeouts and timer periods where zero is meaningless.
fn parse_nonzero<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Default + PartialEq + ToString,
{
    let value = parse_var(var, default)?;
    if value == T::default() {
        return Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_falls_back_when_unset() {
        let value: u32 = parse_var("MOVIE_REVIEWS_TEST_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn parse_var_rejects_garbage() {
        env::set_var("MOVIE_REVIEWS_TEST_BAD_VAR", "lots");
        let err = parse_var::<u32>("MOVIE_REVIEWS_TEST_BAD_VAR", 7).unwrap_err();
        assert!(err.to_string().contains("MOVIE_REVIEWS_TEST_BAD_VAR"));
    }

    #[test]
    fn zero_is_rejected_where_it_cannot_work() {
        env::set_var("MOVIE_REVIEWS_TEST_ZERO_VAR", "0");
        let err = parse_nonzero::<u64>("MOVIE_REVIEWS_TEST_ZERO_VAR", 3600).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { var: "MOVIE_REVIEWS_TEST_ZERO_VAR", ref value } if value == "0"
        ));

        env::set_var("MOVIE_REVIEWS_TEST_NONZERO_VAR", "30");
        assert_eq!(parse_nonzero::<u64>("MOVIE_REVIEWS_TEST_NONZERO_VAR", 3600).unwrap(), 30);
        assert_eq!(parse_nonzero::<u32>("MOVIE_REVIEWS_TEST_UNSET_VAR", 5).unwrap(), 5);
    }

    #[test]
    fn from_env_rejects_zero_cleanup_interval_and_pool_size() {
        env::set_var("CLEANUP_INTERVAL_SECS", "0");
        let err = AppConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("CLEANUP_INTERVAL_SECS"));
        env::remove_var("CLEANUP_INTERVAL_SECS");

        env::set_var("DATABASE_MAX_CONNECTIONS", "0");
        let err = AppConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("DATABASE_MAX_CONNECTIONS"));
        env::remove_var("DATABASE_MAX_CONNECTIONS");
    }

    #[test]
    fn signing_key_is_stable_per_secret() {
        let a = SessionSettings::new("alpha");
        let b = SessionSettings::new("alpha");
        let c = SessionSettings::new("beta");
        assert_eq!(a.signing_key().master(), b.signing_key().master());
        assert_ne!(a.signing_key().master(), c.signing_key().master());
    }

    #[test]
    fn default_secret_is_flagged_and_redacted() {
        let settings = SessionSettings::new(INSECURE_DEFAULT_SECRET);
        assert!(settings.uses_default_secret());
        assert!(!format!("{:?}", settings).contains(INSECURE_DEFAULT_SECRET));
        assert_eq!(settings.lifetime, time::Duration::hours(72));
    }
}
