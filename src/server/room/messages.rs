use actix::prelude::*;
use uuid::Uuid;

use crate::game::types::Move;

/// Message: a member's move for the current round. Overwrites any prior
/// value; a move arriving during the post-round pause counts for the next
/// round.
#[derive(Message)]
#[rtype(result = "()")]
pub struct RecordMove {
    pub player_id: Uuid,
    pub mv: Move,
}

/// Message: a member left the room (explicitly or by disconnect). The room
/// keeps running for the remaining members.
#[derive(Message)]
#[rtype(result = "()")]
pub struct MemberLeft {
    pub player_id: Uuid,
}

/// Message: sent from a room back to the matchmaking server when its round
/// loop terminates, so the room index entry and any remaining member
/// locations are released.
#[derive(Message)]
#[rtype(result = "()")]
pub struct RoomClosed {
    pub room_id: Uuid,
    pub members: Vec<Uuid>,
}
