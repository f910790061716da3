/// Main configuration module.
///
/// Re-exports submodules for game and matchmaking configuration.
pub mod game;
pub mod matchmaking;
