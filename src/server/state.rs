// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the address of the matchmaking server actor, shared with the
//! WebSocket handshake handler.

use actix::Addr;
use crate::server::matchmaking::server::MatchmakingServer;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the matchmaking server actor (registry, queues, rooms).
    pub matchmaking_addr: Addr<MatchmakingServer>,
}

impl AppState {
    /// Create a new AppState with the given actor address.
    pub fn new(matchmaking_addr: Addr<MatchmakingServer>) -> Self {
        AppState { matchmaking_addr }
    }
}
