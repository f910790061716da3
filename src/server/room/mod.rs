/// Room module: one actor per active 2v2 match, running the round loop.

pub mod messages;
pub mod server;
