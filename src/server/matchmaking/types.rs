use actix::Recipient;
use uuid::Uuid;

use crate::server::messages::ServerWsMessage;

/// A live connection as tracked by the registry.
#[derive(Clone)]
pub struct ConnectedPlayer {
    /// Public friend code, unique among live connections.
    pub code: String,
    /// Display name, set by the matchmaking request.
    pub name: String,
    pub addr: Recipient<ServerWsMessage>,
    pub location: Location,
}

/// Which matchmaking structure currently holds a player.
/// A player occupies at most one of these at any instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    Idle,
    /// Waiting for a specific friend to request back.
    FriendWait,
    /// Queued for random pairing.
    RandomQueue,
    /// Half of a team-of-two waiting for an opposing team.
    WaitingPair,
    InRoom(Uuid),
}

/// How a waiting team-of-two was formed; decides what happens to the
/// partner when one member disconnects before a room exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairOrigin {
    Friend,
    Random,
}

/// A team-of-two waiting for an opposing team.
pub struct WaitingPair {
    pub p1: Uuid,
    pub p2: Uuid,
    pub origin: PairOrigin,
}
