use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::marketplace::WorkSchedulePolicy;

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
    pub schedule: WorkSchedulePolicy,
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

        let schedule = load_schedule_policy()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            schedule,
        })
    }
}

fn load_schedule_policy() -> Result<WorkSchedulePolicy, ConfigError> {
    let mut policy = WorkSchedulePolicy::default();

    if let Ok(raw) = env::var("FAIRWORK_HOURS_PER_DAY") {
        policy.hours_per_day = raw.parse::<f64>().map_err(|_| ConfigError::InvalidSchedule {
            variable: "FAIRWORK_HOURS_PER_DAY",
        })?;
    }
    if let Ok(raw) = env::var("FAIRWORK_OPEN_ENDED_HORIZON_DAYS") {
        policy.open_ended_horizon_days =
            raw.parse::<u32>().map_err(|_| ConfigError::InvalidSchedule {
                variable: "FAIRWORK_OPEN_ENDED_HORIZON_DAYS",
            })?;
    }
    if let Ok(raw) = env::var("FAIRWORK_DEFAULT_DURATION_DAYS") {
        policy.default_duration_days =
            raw.parse::<u32>().map_err(|_| ConfigError::InvalidSchedule {
                variable: "FAIRWORK_DEFAULT_DURATION_DAYS",
            })?;
    }

    if policy.hours_per_day <= 0.0
        || policy.open_ended_horizon_days == 0
        || policy.default_duration_days == 0
    {
        return Err(ConfigError::InvalidSchedule {
            variable: "FAIRWORK schedule overrides must be positive",
        });
    }

    Ok(policy)
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

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSchedule { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSchedule { variable } => {
                write!(f, "invalid schedule override: {variable}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidSchedule { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
