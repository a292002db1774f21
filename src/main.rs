#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]

use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};

mod chat;
mod config;
mod data;
mod game;
mod http;
mod lib;
mod tasks;
mod transport;

use chat::{register_default_commands, CommandSurface, LoggingClusterHandle};
use config::Config;
use data::DataService;
use http::AppState;
use lib::auth::Authenticator;
use tasks::{CommandRegistry, TaskManager};

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    std::env::set_var("RUST_LOG", "actix_web=info,cardforge_core=info");
    env_logger::init();

    let config = Config::from_env();

    let data = DataService::connect(&config.mongo_uri, &config.mongo_db)
        .await
        .expect("Could not connect to the document store");

    let authenticator = web::Data::new(Authenticator::new(config.jwt_secret.as_bytes()));

    let registry = Arc::new(CommandRegistry::new());
    register_default_commands(&registry);

    let tasks = TaskManager::new(config.worker_threads);
    let _command_surface = CommandSurface::new(tasks, registry, data.clone(), Arc::new(LoggingClusterHandle));

    let state = web::Data::new(AppState { data, card_image_base_url: config.card_image_base_url.clone() });

    log::info!("binding http surface on {}", config.listening_url);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(authenticator.clone())
            .configure(http::configure)
    })
    .bind(&config.listening_url)?
    .run()
    .await
}
