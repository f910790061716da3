//! Wire protocol between clients and the server.
//!
//! Both directions are JSON with an `action` tag and a `data` payload.
//! Every push in `ServerWsMessage` is addressed to a single recipient and
//! already ordered for that recipient's seat where relevant.

use actix::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Message client -> server.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "action", content = "data")]
pub enum ClientWsMessage {
    /// Enter matchmaking. An empty `friend_code` means random pairing.
    StartMatchmaking { friend_code: String, name: String },
    /// Submit this round's move ("0" rock, "1" paper, "2" scissors).
    SubmitMove { action: String },
    /// Leave the current room.
    LeaveLobby,
    Ping,
}

/// Message server -> client.
#[derive(Message, Serialize, Deserialize, Clone, Debug)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    /// Sent once on connect: the friend code this player can share.
    Welcome { code: String },
    /// Room formed. Names and codes are in the recipient's seat-relative
    /// order: self, teammate, direct opponent, teammate's opponent.
    JoinRoom {
        self_name: String,
        teammate_name: String,
        opponent1_name: String,
        opponent2_name: String,
        self_code: String,
        teammate_code: String,
        opponent1_code: String,
        opponent2_code: String,
    },
    /// 1 = reverted to the random queue, 2 = paired into a waiting team.
    UpdateMatchmakingProgress { stage: u8 },
    /// A room member has submitted a move (value not disclosed).
    PlayerMoved { code: String },
    /// Round result: four move digits in the recipient's viewpoint order
    /// (own, direct opponent, teammate, teammate's opponent) plus the full
    /// alive map keyed by friend code.
    ReceiveMoves { moves: String, alive: HashMap<String, bool> },
    /// The next round accepts input from now on.
    StartRound,
    /// Terminal notice: the room or matchmaking pairing is being torn down.
    SetInactive { reason: String },
    Error { message: String },
}

impl ServerWsMessage {
    pub fn error(message: &str) -> Self {
        Self::Error { message: message.to_string() }
    }
}
