/// Matchmaking module: connection registry, friend/random pairing, team
/// formation, and session lifecycle unwinding.

pub mod messages;
pub mod server;
pub mod types;
