//! # Server Configuration
//!
//! Settings are read from `COLLECTION_FORMS_*` environment variables. A `.env`
//! file in the working directory is loaded first when present. Unset variables
//! take their defaults; set but unparsable ones are rejected.
//!
//! | Variable                         | Default     |
//! |----------------------------------|-------------|
//! | `COLLECTION_FORMS_HOST`          | `127.0.0.1` |
//! | `COLLECTION_FORMS_PORT`          | `8080`      |
//! | `COLLECTION_FORMS_API_BASE_URL`  | `/api`      |
//! | `COLLECTION_FORMS_LOG_LEVEL`     | `info`      |
//! | `COLLECTION_FORMS_OPEN_BROWSER`  | `true`      |

use common::model::config::ClientConfig;
use log::LevelFilter;
use thiserror::Error;

const PREFIX: &str = "COLLECTION_FORMS_";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{variable} has an invalid value '{value}': {reason}")]
    Invalid {
        variable: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_base_url: String,
    pub log_level: LevelFilter,
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            api_base_url: "/api".to_string(),
            log_level: LevelFilter::Info,
            open_browser: true,
        }
    }
}

impl ServerConfig {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("loaded {}", path.display());
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from `lookup`, which maps a full variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(&format!("{PREFIX}{key}")).map(|v| (format!("{PREFIX}{key}"), v));

        let host = get("HOST").map_or(defaults.host, |(_, value)| value);
        let port = match get("PORT") {
            Some((variable, value)) => value
                .trim()
                .parse::<u16>()
                .map_err(|err| invalid(&variable, &value, err))?,
            None => defaults.port,
        };
        let api_base_url = get("API_BASE_URL").map_or(defaults.api_base_url, |(_, value)| value);
        let log_level = match get("LOG_LEVEL") {
            Some((variable, value)) => value
                .trim()
                .parse::<LevelFilter>()
                .map_err(|err| invalid(&variable, &value, err))?,
            None => defaults.log_level,
        };
        let open_browser = match get("OPEN_BROWSER") {
            Some((variable, value)) => parse_flag(&value)
                .ok_or_else(|| invalid(&variable, &value, "expected true or false"))?,
            None => defaults.open_browser,
        };

        Ok(Self {
            host,
            port,
            api_base_url,
            log_level,
            open_browser,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// The part of the configuration handed to the browser.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.api_base_url.clone(),
            log_level: self.log_level.to_string().to_lowercase(),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(variable: &str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        variable: variable.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn unset_variables_take_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn variables_override_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("COLLECTION_FORMS_HOST", "0.0.0.0"),
            ("COLLECTION_FORMS_PORT", "9000"),
            ("COLLECTION_FORMS_API_BASE_URL", "https://example.org/api"),
            ("COLLECTION_FORMS_LOG_LEVEL", "DEBUG"),
            ("COLLECTION_FORMS_OPEN_BROWSER", "no"),
        ]))
        .unwrap();

        assert_eq!(config.url(), "http://0.0.0.0:9000");
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert!(!config.open_browser);
        assert_eq!(
            config.client_config(),
            ClientConfig {
                api_base_url: "https://example.org/api".to_string(),
                log_level: "debug".to_string(),
            }
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[("COLLECTION_FORMS_PORT", "eighty")])).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::Invalid { variable, value, .. }
                if variable == "COLLECTION_FORMS_PORT" && value == "eighty"
        ));

        let err = ServerConfig::from_lookup(lookup(&[("COLLECTION_FORMS_OPEN_BROWSER", "maybe")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "COLLECTION_FORMS_OPEN_BROWSER has an invalid value 'maybe': expected true or false"
        );
    }
}
