//! Configuration management for the portfolio API
//!
//! Values are layered: defaults, then an optional TOML file, then
//! environment variables. CLI flags are applied on top by the binary.
//! [`Config::load`] validates the final result, so the server refuses to
//! start without a JWT secret.

use crate::core::error::{Error, Result};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Default config file probed when no `--config` flag is given
pub const DEFAULT_CONFIG_FILE: &str = "portfolio.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Metrics configuration
    pub metrics: MetricsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub http_addr: SocketAddr,

    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

/// Authentication configuration
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared HMAC secret for signing tokens. Required.
    pub jwt_secret: Option<String>,

    /// Token lifetime
    #[serde(deserialize_with = "deserialize_duration")]
    pub token_ttl: Duration,

    /// bcrypt work factor used for seeded password hashes
    pub bcrypt_cost: u32,

    /// Email of the seeded admin account
    pub admin_email: String,

    /// Plaintext password of the seeded admin account, hashed at startup
    pub admin_password: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, compact)
    pub format: String,
}

/// Metrics configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Expose Prometheus metrics on `/metrics`
    pub enable_prometheus: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl: Duration::from_secs(24 * 60 * 60),
            bcrypt_cost: 10,
            admin_email: "admin@example.com".to_string(),
            admin_password: "admin123".to_string(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"<redacted>")
            .finish()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enable_prometheus: true,
        }
    }
}

impl AuthConfig {
    /// The configured signing secret
    pub fn jwt_secret(&self) -> Result<&str> {
        self.jwt_secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| Error::config("JWT secret is not configured (set JWT_SECRET)"))
    }
}

impl Config {
    /// Load configuration from an optional file plus environment overrides.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// used when present in the working directory.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE)?,
            None => Config::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&contents)
            .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Used with the process
    /// environment in production and with plain maps in tests.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("PORTFOLIO_HTTP_ADDR") {
            self.server.http_addr = addr
                .parse()
                .map_err(|e| Error::config(format!("Invalid HTTP address: {}", e)))?;
        }

        if let Some(origins) = lookup("PORTFOLIO_CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = Some(secret);
        }

        if let Some(ttl) = lookup("PORTFOLIO_TOKEN_TTL") {
            self.auth.token_ttl = parse_duration(&ttl)
                .map_err(|e| Error::config(format!("Invalid token TTL: {}", e)))?;
        }

        if let Some(cost) = lookup("PORTFOLIO_BCRYPT_COST") {
            self.auth.bcrypt_cost = cost
                .parse()
                .map_err(|e| Error::config(format!("Invalid bcrypt cost: {}", e)))?;
        }

        if let Some(email) = lookup("PORTFOLIO_ADMIN_EMAIL") {
            self.auth.admin_email = email;
        }

        if let Some(password) = lookup("PORTFOLIO_ADMIN_PASSWORD") {
            self.auth.admin_password = password;
        }

        if let Some(level) = lookup("PORTFOLIO_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(format) = lookup("PORTFOLIO_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let secret = self.auth.jwt_secret()?;
        if secret.len() < 16 {
            return Err(Error::config("JWT secret too short (minimum 16 bytes)"));
        }

        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(Error::config("bcrypt cost must be between 4 and 31"));
        }

        if self.auth.token_ttl.is_zero() {
            return Err(Error::config("Token TTL must be greater than zero"));
        }

        if !self.auth.admin_email.contains('@') {
            return Err(Error::config("Admin email is not a valid address"));
        }

        if self.auth.admin_password.is_empty() {
            return Err(Error::config("Admin password must not be empty"));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(Error::config("Invalid log level")),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" => {}
            _ => return Err(Error::config("Invalid log format (expected pretty or compact)")),
        }

        Ok(())
    }
}

// Custom deserializer for Duration from string
fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    struct DurationVisitor;

    impl<'de> Visitor<'de> for DurationVisitor {
        type Value = Duration;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a duration string like '30s' or '24h', or a number of seconds")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Duration, E>
        where
            E: de::Error,
        {
            parse_duration(value).map_err(E::custom)
        }

        fn visit_u64<E>(self, value: u64) -> std::result::Result<Duration, E>
        where
            E: de::Error,
        {
            Ok(Duration::from_secs(value))
        }

        fn visit_i64<E>(self, value: i64) -> std::result::Result<Duration, E>
        where
            E: de::Error,
        {
            u64::try_from(value)
                .map(Duration::from_secs)
                .map_err(|_| E::custom("duration must not be negative"))
        }
    }

    deserializer.deserialize_any(DurationVisitor)
}

/// Parse `500ms`, `30s`, `5m`, `24h` or a raw number of seconds
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        let ms: u64 = ms.parse().map_err(|_| "Invalid milliseconds")?;
        Ok(Duration::from_millis(ms))
    } else if let Some(secs) = s.strip_suffix('s') {
        let secs: u64 = secs.parse().map_err(|_| "Invalid seconds")?;
        Ok(Duration::from_secs(secs))
    } else if let Some(mins) = s.strip_suffix('m') {
        let mins: u64 = mins.parse().map_err(|_| "Invalid minutes")?;
        let secs = mins.checked_mul(60).ok_or("Duration too large")?;
        Ok(Duration::from_secs(secs))
    } else if let Some(hours) = s.strip_suffix('h') {
        let hours: u64 = hours.parse().map_err(|_| "Invalid hours")?;
        let secs = hours.checked_mul(3600).ok_or("Duration too large")?;
        Ok(Duration::from_secs(secs))
    } else {
        let secs: u64 = s.parse().map_err(|_| "Invalid duration format")?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.auth.jwt_secret = Some("0123456789abcdef-test".to_string());
        config
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("500ms"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_duration("30s"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_duration("5m"), Ok(Duration::from_secs(300)));
        assert_eq!(parse_duration("24h"), Ok(Duration::from_secs(86_400)));
        assert_eq!(parse_duration("90"), Ok(Duration::from_secs(90)));
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn test_parse_duration_overflow_is_error() {
        assert_eq!(
            parse_duration(&format!("{}h", u64::MAX)),
            Err("Duration too large".to_string())
        );
        assert!(parse_duration(&format!("{}m", u64::MAX / 30)).is_err());
        assert!(parse_duration(&format!("{}m", u64::MAX / 60)).is_ok());
    }

    #[test]
    fn test_defaults_require_secret() {
        let config = Config::default();
        assert_eq!(config.auth.token_ttl, Duration::from_secs(86_400));
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = valid_config();
        config.auth.jwt_secret = Some("short".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = valid_config();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PORTFOLIO_HTTP_ADDR", "127.0.0.1:8088"),
            ("JWT_SECRET", "an-overridden-secret-value"),
            ("PORTFOLIO_TOKEN_TTL", "2h"),
            ("PORTFOLIO_CORS_ORIGINS", "https://a.dev, https://b.dev,"),
            ("PORTFOLIO_BCRYPT_COST", "6"),
        ]);

        let mut config = Config::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.http_addr.port(), 8088);
        assert_eq!(config.auth.jwt_secret().unwrap(), "an-overridden-secret-value");
        assert_eq!(config.auth.token_ttl, Duration::from_secs(7200));
        assert_eq!(config.server.cors_origins, vec!["https://a.dev", "https://b.dev"]);
        assert_eq!(config.auth.bcrypt_cost, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_env_override_is_reported() {
        let mut config = Config::default();
        let result = config.apply_overrides(|key| {
            (key == "PORTFOLIO_HTTP_ADDR").then(|| "not-an-address".to_string())
        });
        assert!(matches!(result, Err(Error::Config(_))));

        let huge = format!("{}h", u64::MAX);
        let result = config.apply_overrides(|key| (key == "PORTFOLIO_TOKEN_TTL").then(|| huge.clone()));
        assert!(matches!(result, Err(Error::Config(_))));
        assert_eq!(config.auth.token_ttl, Duration::from_secs(86_400));
    }

    #[test]
    fn test_from_file_with_partial_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
http_addr = "127.0.0.1:9000"

[auth]
jwt_secret = "file-secret-1234567890"
token_ttl = "30m"

[logging]
format = "compact"
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.server.http_addr.port(), 9000);
        assert_eq!(config.auth.token_ttl, Duration::from_secs(1800));
        assert_eq!(config.auth.admin_email, "admin@example.com");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "compact");
        assert!(config.metrics.enable_prometheus);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = Config::from_file("/definitely/not/here/portfolio.toml");
        assert!(matches!(result, Err(Error::Config(_))));

        let mut config = Config::default();
        let huge = format!("{}h", u64::MAX);
        let result = config.apply_overrides(|key| (key == "PORTFOLIO_TOKEN_TTL").then(|| huge.clone()));
        assert!(matches!(result, Err(Error::Config(_))));
        assert_eq!(config.auth.token_ttl, Duration::from_secs(86_400));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", valid_config().auth);
        assert!(!rendered.contains("0123456789abcdef-test"));
        assert!(!rendered.contains("admin123"));
        assert!(rendered.contains("<redacted>"));
    }
}
