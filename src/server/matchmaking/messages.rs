use actix::prelude::*;
use uuid::Uuid;

use crate::game::types::Move;
use crate::server::messages::ServerWsMessage;

/// Message: a new connection registers.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub player_id: Uuid,
    pub addr: Recipient<ServerWsMessage>,
}

/// Message: a connection closed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub player_id: Uuid,
}

/// Message: player requests matchmaking. Empty `friend_code` means the
/// random queue.
#[derive(Message)]
#[rtype(result = "()")]
pub struct StartMatchmaking {
    pub player_id: Uuid,
    pub friend_code: String,
    pub name: String,
}

/// Message: player submits this round's move; routed to their room.
#[derive(Message)]
#[rtype(result = "()")]
pub struct SubmitMove {
    pub player_id: Uuid,
    pub mv: Move,
}

/// Message: player leaves their current room.
#[derive(Message)]
#[rtype(result = "()")]
pub struct LeaveLobby {
    pub player_id: Uuid,
}
