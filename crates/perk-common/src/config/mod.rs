//! Configuration loading

mod app_config;

pub use app_config::{
    AdminConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    GeofenceConfig, LoyaltyConfig, NotifyConfig, QrConfig, RateLimitConfig, ServerConfig,
};
