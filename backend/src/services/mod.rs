//! HTTP services of the host.
//!
//! - `client_config`: runtime settings for the browser application.
//! - `static_files`: the embedded frontend build, with `index.html` fallback.

pub mod client_config;
pub mod static_files;

use actix_web::web;
use common::model::config::ClientConfig;

/// Registers every route of the host on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig, client: ClientConfig) {
    cfg.app_data(web::Data::new(client))
        .service(client_config::configure_routes())
        .default_service(web::route().to(static_files::serve_embedded));
}
