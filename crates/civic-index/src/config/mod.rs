use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::icc::scoring::RatingPolicy;
use crate::workflows::icc::topics::{ContributionPolicy, MatchMode, SuggestionConfig};

const DEFAULT_TOPIC_STORE: &str = "temas_sugeridos_colaborativos.json";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub icc: IccConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            icc: IccConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Scoring and topic-bank settings shared by the CLI and the HTTP service.
#[derive(Debug, Clone, PartialEq)]
pub struct IccConfig {
    pub topic_store_path: PathBuf,
    pub rating_policy: RatingPolicy,
    pub suggestions: SuggestionConfig,
    pub contribution_policy: ContributionPolicy,
}

impl Default for IccConfig {
    fn default() -> Self {
        Self {
            topic_store_path: PathBuf::from(DEFAULT_TOPIC_STORE),
            rating_policy: RatingPolicy::default(),
            suggestions: SuggestionConfig::default(),
            contribution_policy: ContributionPolicy::default(),
        }
    }
}

impl IccConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let topic_store_path = env::var("ICC_TOPIC_STORE")
            .map(PathBuf::from)
            .unwrap_or(defaults.topic_store_path);

        let rating_policy = match env::var("ICC_RATING_POLICY") {
            Ok(raw) => RatingPolicy::parse(&raw).ok_or_else(|| invalid("ICC_RATING_POLICY", raw))?,
            Err(_) => defaults.rating_policy,
        };

        let mode = match env::var("ICC_MATCH_MODE") {
            Ok(raw) => MatchMode::parse(&raw).ok_or_else(|| invalid("ICC_MATCH_MODE", raw))?,
            Err(_) => defaults.suggestions.mode,
        };

        let fuzzy_cutoff = match env::var("ICC_FUZZY_CUTOFF") {
            Ok(raw) => match raw.trim().parse::<f64>() {
                Ok(value) if (0.0..=1.0).contains(&value) => value,
                _ => return Err(invalid("ICC_FUZZY_CUTOFF", raw)),
            },
            Err(_) => defaults.suggestions.fuzzy_cutoff,
        };

        let deduplicate = match env::var("ICC_DEDUPLICATE_SUGGESTIONS") {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| invalid("ICC_DEDUPLICATE_SUGGESTIONS", raw))?,
            Err(_) => defaults.suggestions.deduplicate,
        };

        let contribution_policy = match env::var("ICC_CONTRIBUTION_POLICY") {
            Ok(raw) => ContributionPolicy::parse(&raw)
                .ok_or_else(|| invalid("ICC_CONTRIBUTION_POLICY", raw))?,
            Err(_) => defaults.contribution_policy,
        };

        Ok(Self {
            topic_store_path,
            rating_policy,
            suggestions: SuggestionConfig {
                mode,
                fuzzy_cutoff,
                deduplicate,
                ..defaults.suggestions
            },
            contribution_policy,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(key: &'static str, value: String) -> ConfigError {
    ConfigError::InvalidValue { key, value }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "{key} has an unsupported value '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidValue { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "ICC_TOPIC_STORE",
            "ICC_RATING_POLICY",
            "ICC_MATCH_MODE",
            "ICC_FUZZY_CUTOFF",
            "ICC_DEDUPLICATE_SUGGESTIONS",
            "ICC_CONTRIBUTION_POLICY",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.icc, IccConfig::default());
        assert_eq!(
            config.icc.topic_store_path,
            PathBuf::from("temas_sugeridos_colaborativos.json")
        );
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn reads_icc_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ICC_TOPIC_STORE", "/tmp/bank.json");
        env::set_var("ICC_RATING_POLICY", "lenient");
        env::set_var("ICC_MATCH_MODE", "hybrid");
        env::set_var("ICC_FUZZY_CUTOFF", "0.45");
        env::set_var("ICC_DEDUPLICATE_SUGGESTIONS", "true");
        env::set_var("ICC_CONTRIBUTION_POLICY", "replace");

        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.icc.topic_store_path, PathBuf::from("/tmp/bank.json"));
        assert_eq!(config.icc.rating_policy, RatingPolicy::Lenient);
        assert_eq!(config.icc.suggestions.mode, MatchMode::Hybrid);
        assert_eq!(config.icc.suggestions.fuzzy_cutoff, 0.45);
        assert!(config.icc.suggestions.deduplicate);
        assert_eq!(config.icc.contribution_policy, ContributionPolicy::Replace);
    }

    #[test]
    fn rejects_cutoff_outside_unit_interval() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ICC_FUZZY_CUTOFF", "1.5");

        let result = AppConfig::load();
        reset_env();

        match result {
            Err(ConfigError::InvalidValue { key, value }) => {
                assert_eq!(key, "ICC_FUZZY_CUTOFF");
                assert_eq!(value, "1.5");
            }
            other => panic!("expected invalid cutoff, got {other:?}"),
        }
    }
}
