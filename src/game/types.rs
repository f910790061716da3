//! Core game types: moves and seat geometry.
//!
//! A room has four fixed seats in canonical order: team 1 leader, team 1
//! partner, team 2 leader, team 2 partner. Seats 0/1 face seats 2/3; the
//! direct opponent of a seat is the same position on the other side.

/// Number of seats in a room (two teams of two).
pub const SEATS: usize = 4;

/// A rock-paper-scissors move. Wire encoding is the decimal digit string
/// "0" | "1" | "2".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
}

impl Move {
    /// Parse the wire code. Anything outside "0".."2" is rejected.
    pub fn from_code(code: &str) -> Option<Move> {
        match code {
            "0" => Some(Move::Rock),
            "1" => Some(Move::Paper),
            "2" => Some(Move::Scissors),
            _ => None,
        }
    }

    /// The wire digit for this move.
    pub fn code(self) -> char {
        match self {
            Move::Rock => '0',
            Move::Paper => '1',
            Move::Scissors => '2',
        }
    }
}

/// The seat's teammate.
pub fn partner(seat: usize) -> usize {
    seat ^ 1
}

/// The seat directly facing this one on the other side.
pub fn direct_opponent(seat: usize) -> usize {
    seat ^ 2
}

/// Whether two seats belong to the same team.
pub fn same_side(a: usize, b: usize) -> bool {
    a / 2 == b / 2
}

/// Per-seat presentation order for room composition (`JoinRoom`):
/// self, teammate, direct opponent, teammate's opponent.
pub const JOIN_VIEW: [[usize; SEATS]; SEATS] = [
    [0, 1, 2, 3],
    [1, 0, 3, 2],
    [2, 3, 0, 1],
    [3, 2, 1, 0],
];

/// Per-seat presentation order for round results (`ReceiveMoves`):
/// own move, direct opponent's move, teammate's move, teammate's
/// opponent's move, so the recipient's own duel is always positions 1-2.
pub const MOVES_VIEW: [[usize; SEATS]; SEATS] = [
    [0, 2, 1, 3],
    [1, 3, 0, 2],
    [2, 0, 3, 1],
    [3, 1, 2, 0],
];
