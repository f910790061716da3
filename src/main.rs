//! Main entry point for the backend server.
//!
//! Initializes the actor system, configures application state, and launches
//! the HTTP server with the WebSocket endpoint for matchmaking and rooms.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use server::matchmaking::server::MatchmakingServer;

pub mod config;
mod game;
mod server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::init();

    // Start the matchmaking server actor (registry, queues, rooms).
    let matchmaking_addr = MatchmakingServer::new().start();

    // Shared application state for the WebSocket handshake handler.
    let state = web::Data::new(server::state::AppState::new(matchmaking_addr));

    // Start the HTTP server with the WebSocket endpoint.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*")),
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
