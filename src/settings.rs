use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr, time::Duration};
use url::Url;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Origin of the REST backend; `/api/...` paths are resolved against it.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_deployment_poll")]
    pub deployment_poll_secs: u64,

    #[serde(default = "default_deployment_list_poll")]
    pub deployment_list_poll_secs: u64,

    #[serde(default = "default_tts_poll")]
    pub tts_poll_secs: u64,

    #[serde(default = "default_tts_max_attempts")]
    pub tts_max_attempts: u32,

    #[serde(default = "default_upload_max_bytes")]
    pub upload_max_bytes: usize,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-Frontend".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_api_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}
fn default_request_timeout() -> u64 {
    30
}
fn default_deployment_poll() -> u64 {
    3
}
fn default_deployment_list_poll() -> u64 {
    5
}
fn default_tts_poll() -> u64 {
    2
}
fn default_tts_max_attempts() -> u32 {
    60
}
fn default_upload_max_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
            deployment_poll_secs: default_deployment_poll(),
            deployment_list_poll_secs: default_deployment_list_poll(),
            tts_poll_secs: default_tts_poll(),
            tts_max_attempts: default_tts_max_attempts(),
            upload_max_bytes: default_upload_max_bytes(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(Environment::with_prefix("APP").prefix_separator("_").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        match Url::parse(&self.api_base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                if self.is_production() && url.scheme() == "http" {
                    errors.push("API_BASE_URL must use https in production");
                }
            }
            _ => errors.push("API_BASE_URL must be an http(s) URL"),
        }
        if self.request_timeout_secs == 0 {
            errors.push("REQUEST_TIMEOUT_SECS must be greater than zero");
        }
        if self.deployment_poll_secs == 0 || self.deployment_list_poll_secs == 0 {
            errors.push("Deployment poll intervals must be greater than zero");
        }
        if self.tts_poll_secs == 0 || self.tts_max_attempts == 0 {
            errors.push("TTS polling needs a positive interval and attempt count");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn deployment_poll_interval(&self) -> Duration {
        Duration::from_secs(self.deployment_poll_secs)
    }

    pub fn deployment_list_poll_interval(&self) -> Duration {
        Duration::from_secs(self.deployment_list_poll_secs)
    }

    pub fn tts_poll_interval(&self) -> Duration {
        Duration::from_secs(self.tts_poll_secs)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.deployment_poll_interval(), Duration::from_secs(3));
        assert_eq!(config.deployment_list_poll_interval(), Duration::from_secs(5));
        assert_eq!(config.tts_poll_interval(), Duration::from_secs(2));
        assert_eq!(config.tts_max_attempts, 60);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = AppConfig {
            api_base_url: "ftp://backend".into(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn production_requires_https_backend() {
        let config = AppConfig {
            env: AppEnvironment::Production,
            api_base_url: "http://backend.internal".into(),
            ..AppConfig::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("https"));
    }

    #[test]
    fn rejects_zero_intervals() {
        let config = AppConfig {
            tts_max_attempts: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
