use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_ADVISORY_STAGE: &str = "Interview";
const DEFAULT_ADVISORY_DELAY_MS: u64 = 1000;

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
    pub pipeline: PipelineConfig,
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
            pipeline: PipelineConfig::from_env()?,
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Knobs for the pipeline board: which stage triggers the follow-up advisory, how long it
/// waits, and whether candidate scoring annotations are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub advisory_stage: String,
    pub advisory_delay: Duration,
    pub scoring_enabled: bool,
    pub scoring_seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            advisory_stage: DEFAULT_ADVISORY_STAGE.to_string(),
            advisory_delay: Duration::from_millis(DEFAULT_ADVISORY_DELAY_MS),
            scoring_enabled: false,
            scoring_seed: None,
        }
    }
}

impl PipelineConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let advisory_stage = env::var("PIPELINE_ADVISORY_STAGE")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ADVISORY_STAGE.to_string());

        let advisory_delay = match env::var("PIPELINE_ADVISORY_DELAY_MS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidAdvisoryDelay)?,
            Err(_) => Duration::from_millis(DEFAULT_ADVISORY_DELAY_MS),
        };

        let scoring_enabled = match env::var("PIPELINE_AI_SCORING") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidScoringFlag)?,
            Err(_) => false,
        };

        let scoring_seed = match env::var("PIPELINE_SCORING_SEED") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidScoringSeed)?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            advisory_stage,
            advisory_delay,
            scoring_enabled,
            scoring_seed,
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

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidAdvisoryDelay,
    InvalidScoringFlag,
    InvalidScoringSeed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidAdvisoryDelay => {
                write!(f, "PIPELINE_ADVISORY_DELAY_MS must be a whole number of milliseconds")
            }
            ConfigError::InvalidScoringFlag => {
                write!(f, "PIPELINE_AI_SCORING must be true/false")
            }
            ConfigError::InvalidScoringSeed => write!(f, "PIPELINE_SCORING_SEED must be a valid u64"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidAdvisoryDelay
            | ConfigError::InvalidScoringFlag
            | ConfigError::InvalidScoringSeed => None,
        }
    }
}

/// Serializes every test in this crate that reads or writes process environment.
#[cfg(test)]
pub(crate) fn env_guard() -> &'static std::sync::Mutex<()> {
    static GUARD: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    GUARD.get_or_init(|| std::sync::Mutex::new(()))
}
