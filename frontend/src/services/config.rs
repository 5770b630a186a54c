use common::model::config::ClientConfig;
use gloo_net::http::Request;

/// Path the host serves the runtime configuration on.
const CLIENT_CONFIG_PATH: &str = "/api/client_config";

/// Fetches the runtime configuration, falling back to the defaults when the
/// host does not provide one (e.g. when served by `trunk serve`).
pub async fn load_client_config() -> ClientConfig {
    let response = match Request::get(CLIENT_CONFIG_PATH).send().await {
        Ok(response) if response.ok() => response,
        Ok(response) => {
            log::warn!(
                "client config unavailable ({}), using defaults",
                response.status()
            );
            return ClientConfig::default();
        }
        Err(err) => {
            log::warn!("client config unavailable ({err}), using defaults");
            return ClientConfig::default();
        }
    };

    match response.json::<ClientConfig>().await {
        Ok(config) => config,
        Err(err) => {
            log::warn!("client config is malformed ({err}), using defaults");
            ClientConfig::default()
        }
    }
}
