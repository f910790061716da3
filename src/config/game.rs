/// Game configuration constants.
///
/// This module defines the main round-loop parameters: how long a round's
/// move-collection phase lasts, how often it is polled, and when a silent
/// room is considered dead.
pub const ROUND_DURATION_MS: u64 = 10_000; // Duration of a round's collection phase in milliseconds.

/// Number of sub-intervals the collection phase is divided into.
/// The round engine checks for submitted moves once per sub-interval.
pub const POLL_DIVISIONS: u32 = 20;

/// Pause (in milliseconds) between a round's result broadcast and the start
/// of the next round's input phase.
pub const POST_ROUND_PAUSE_MS: u64 = 3_000;

/// Number of consecutive rounds without a single submitted move after which
/// a room is torn down as inactive.
pub const MAX_IDLE_ROUNDS: u32 = 10;
