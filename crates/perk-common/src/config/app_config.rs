//! Application configuration structs
//!
//! Loads configuration from environment variables (with `.env` support).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub geofence: GeofenceConfig,
    pub loyalty: LoyaltyConfig,
    pub qr: QrConfig,
    pub admin: AdminConfig,
    pub notify: NotifyConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Store geofence configuration
///
/// One authoritative coordinate pair; client and server both read it from
/// here.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GeofenceConfig {
    #[serde(default = "default_store_latitude")]
    pub store_latitude: f64,
    #[serde(default = "default_store_longitude")]
    pub store_longitude: f64,
    #[serde(default = "default_radius_meters")]
    pub radius_meters: f64,
    /// When true, check-ins without coordinates are rejected; when false
    /// the location phase is skipped entirely.
    #[serde(default = "default_geofence_enforced")]
    pub enforced: bool,
}

/// Loyalty accrual policy
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LoyaltyConfig {
    #[serde(default = "default_reward_threshold")]
    pub reward_threshold: i32,
    #[serde(default = "default_points_per_visit")]
    pub points_per_visit: i32,
    /// Anti-replay cooldown between successful check-ins for one phone
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: i64,
}

/// QR token issuance configuration
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct QrConfig {
    #[serde(default = "default_token_validity_seconds")]
    pub default_validity_seconds: i64,
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,
}

/// Admin surface configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub api_key: String,
}

/// Notification channel configuration; unset channels report failure and
/// the dispatch chain falls through to the next one
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifyConfig {
    pub sms_webhook_url: Option<String>,
    pub alert_email: Option<String>,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "perk".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_store_latitude() -> f64 {
    40.7709
}

fn default_store_longitude() -> f64 {
    -73.9207
}

fn default_radius_meters() -> f64 {
    100.0
}

fn default_geofence_enforced() -> bool {
    true
}

fn default_reward_threshold() -> i32 {
    5
}

fn default_points_per_visit() -> i32 {
    1
}

fn default_cooldown_seconds() -> i64 {
    300 // 5 minutes
}

fn default_token_validity_seconds() -> i64 {
    60
}

fn default_sweep_interval_seconds() -> u64 {
    300
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn env_parse<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        Err(_) => Ok(None),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or
    /// unparseable
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: env_parse("API_PORT")?.ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env_parse("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: env_parse("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
            },
            geofence: GeofenceConfig {
                store_latitude: env_parse("STORE_LATITUDE")?.unwrap_or_else(default_store_latitude),
                store_longitude: env_parse("STORE_LONGITUDE")?
                    .unwrap_or_else(default_store_longitude),
                radius_meters: env_parse("GEOFENCE_RADIUS_METERS")?
                    .unwrap_or_else(default_radius_meters),
                enforced: env_parse("GEOFENCE_ENFORCED")?.unwrap_or_else(default_geofence_enforced),
            },
            loyalty: LoyaltyConfig {
                reward_threshold: env_parse("REWARD_THRESHOLD")?
                    .unwrap_or_else(default_reward_threshold),
                points_per_visit: env_parse("POINTS_PER_VISIT")?
                    .unwrap_or_else(default_points_per_visit),
                cooldown_seconds: env_parse("CHECKIN_COOLDOWN_SECONDS")?
                    .unwrap_or_else(default_cooldown_seconds),
            },
            qr: QrConfig {
                default_validity_seconds: env_parse("QR_DEFAULT_VALIDITY_SECONDS")?
                    .unwrap_or_else(default_token_validity_seconds),
                sweep_interval_seconds: env_parse("QR_SWEEP_INTERVAL_SECONDS")?
                    .unwrap_or_else(default_sweep_interval_seconds),
            },
            admin: AdminConfig {
                api_key: env::var("ADMIN_API_KEY")
                    .map_err(|_| ConfigError::MissingVar("ADMIN_API_KEY"))?,
            },
            notify: NotifyConfig {
                sms_webhook_url: env::var("SMS_WEBHOOK_URL").ok(),
                alert_email: env::var("ALERT_EMAIL").ok(),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: env_parse("RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .unwrap_or_else(default_requests_per_second),
                burst: env_parse("RATE_LIMIT_BURST")?.unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
