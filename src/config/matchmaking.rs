/// Matchmaking configuration constants.

/// Length of the public friend code handed to each player on connect.
pub const FRIEND_CODE_LEN: usize = 8;
