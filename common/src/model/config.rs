use serde::{Deserialize, Serialize};

/// Runtime settings the backend hands to the browser application.
///
/// Served as JSON from `GET /api/client_config`. The frontend falls back to
/// `ClientConfig::default()` when the endpoint is unreachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the collection backend, without a trailing slash.
    pub api_base_url: String,
    /// Maximum log level for the browser console (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "/api".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Joins `path` onto the API base URL with exactly one separating slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Parses `log_level`, defaulting to `Info` for unknown values.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_with_single_slash() {
        let config = ClientConfig {
            api_base_url: "https://pine.example/api/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint("/collections/image/c1"),
            "https://pine.example/api/collections/image/c1"
        );
        assert_eq!(ClientConfig::default().endpoint("pipelines/"), "/api/pipelines/");
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = ClientConfig {
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        assert_eq!(config.level_filter(), log::LevelFilter::Info);

        let config = ClientConfig {
            log_level: "debug".to_string(),
            ..Default::default()
        };
        assert_eq!(config.level_filter(), log::LevelFilter::Debug);
    }
}
