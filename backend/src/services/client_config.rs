//! # Client Configuration Service
//!
//! `GET /api/client_config` answers the `ClientConfig` the server was started
//! with, as JSON. The frontend requests it once on start.

use actix_web::web::{get, scope, Data};
use actix_web::{HttpResponse, Scope};
use common::model::config::ClientConfig;

const API_PATH: &str = "/api";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/client_config", get().to(process))
}

async fn process(config: Data<ClientConfig>) -> HttpResponse {
    log::debug!("serving client config");
    HttpResponse::Ok().json(config.get_ref())
}
