// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the main backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing
//! - The per-connection WebSocket session actor
//! - Matchmaking logic (registry, friend/random pairing, team formation)
//! - Room orchestration (the per-room round loop)

pub mod matchmaking;
pub mod messages;
pub mod room;
pub mod router;
pub mod session;
pub mod state;
