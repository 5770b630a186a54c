mod config;
mod services;

use std::thread;
use std::time::Duration;

use actix_web::{App, HttpServer};
use env_logger::Env;
use log::{error, info};

use crate::config::ServerConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            env_logger::init_from_env(Env::default().default_filter_or("info"));
            error!("invalid configuration: {err}");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, err));
        }
    };
    env_logger::init_from_env(Env::default().default_filter_or(config.log_level.as_str()));

    let url = config.url();
    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            if let Err(err) = webbrowser::open(&url) {
                log::warn!("could not open a browser at {url}: {err}");
            }
        });
    }

    info!("Server running at {}", url);
    let client = config.client_config();

    HttpServer::new(move || App::new().configure(|cfg| services::configure(cfg, client.clone())))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
