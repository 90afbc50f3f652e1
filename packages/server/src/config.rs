use std::time::Duration;

use common::LangMask;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    100
}
fn default_min_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Read-through metadata cache settings.
#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// How long a metadata read may be served from memory. This is also the
    /// longest a retired (defunct) contest or topic can still admit visitors.
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    /// Maximum number of entries kept per metadata kind.
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

fn default_cache_ttl_secs() -> u64 {
    60
}
fn default_cache_capacity() -> usize {
    4096
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
            capacity: default_cache_capacity(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubmissionConfig {
    /// Exclusion mask applied to standalone problems, and to contests or
    /// topics that do not define their own.
    #[serde(default)]
    pub default_langmask: u64,
    /// Maximum size of the submitted source in bytes.
    #[serde(default = "default_max_source_size")]
    pub max_source_size: usize,
}

fn default_max_source_size() -> usize {
    1_048_576
}

impl SubmissionConfig {
    pub fn default_mask(&self) -> LangMask {
        LangMask::from_bits(self.default_langmask)
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            default_langmask: 0,
            max_source_size: default_max_source_size(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., SUBMIT__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("SUBMIT").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
