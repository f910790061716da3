/// Matchmaking server actor.
///
/// Owns the connection registry and every matchmaking structure: the
/// friend-waiting map, the random FIFO queue, the waiting team-of-two slot,
/// and the index of active rooms. Converts two lone players into a team and
/// two teams into a room, and unwinds whichever structure holds a player
/// when their connection drops.
use actix::prelude::*;
use rand::distr::Alphanumeric;
use rand::Rng;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use uuid::Uuid;
use log::{debug, info, warn};

use super::messages::{Connect, Disconnect, LeaveLobby, StartMatchmaking, SubmitMove};
use super::types::{ConnectedPlayer, Location, PairOrigin, WaitingPair};
use crate::config::game::{POST_ROUND_PAUSE_MS, ROUND_DURATION_MS};
use crate::config::matchmaking::FRIEND_CODE_LEN;
use crate::server::messages::ServerWsMessage;
use crate::server::room::messages::{MemberLeft, RecordMove, RoomClosed};
use crate::server::room::server::{RoomSession, Seat};

/// Main matchmaking server actor.
pub struct MatchmakingServer {
    /// All live connections, keyed by player id.
    players: HashMap<Uuid, ConnectedPlayer>,
    /// Friend-code index into `players`.
    codes: HashMap<String, Uuid>,
    /// Players waiting for a specific friend: own code -> requested code.
    friend_waiting: HashMap<String, String>,
    /// FIFO queue for random pairing.
    random_queue: VecDeque<Uuid>,
    /// Teams-of-two waiting for an opposing team, oldest first.
    waiting_pairs: VecDeque<WaitingPair>,
    /// Active rooms.
    rooms: HashMap<Uuid, Addr<RoomSession>>,
}

impl MatchmakingServer {
    /// Create a new matchmaking server.
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
            codes: HashMap::new(),
            friend_waiting: HashMap::new(),
            random_queue: VecDeque::new(),
            waiting_pairs: VecDeque::new(),
            rooms: HashMap::new(),
        }
    }

    /// Mint a friend code that is unique among live connections. The uuid
    /// prefix is taken first; on a collision a random code is drawn instead,
    /// so codes are never disambiguated by prefix search.
    fn mint_code(&self, player_id: Uuid) -> String {
        let mut code: String = player_id.simple().to_string()[..FRIEND_CODE_LEN].to_string();
        while self.codes.contains_key(&code) {
            code = rand::rng()
                .sample_iter(Alphanumeric)
                .take(FRIEND_CODE_LEN)
                .map(char::from)
                .collect();
        }
        code
    }

    /// Exact-match lookup of a friend code that another matchmaking
    /// structure claims is live. A miss means the registry and the
    /// matchmaking structures diverged, which has no defined recovery.
    fn resolve(&self, code: &str) -> Uuid {
        match self.codes.get(code) {
            Some(id) => *id,
            None => panic!("registry out of sync: no live connection for code {code}"),
        }
    }

    /// Push a message to a player if they are still connected.
    fn send_to(&self, player_id: Uuid, msg: ServerWsMessage) {
        if let Some(player) = self.players.get(&player_id) {
            player.addr.do_send(msg);
        }
    }

    fn set_location(&mut self, player_id: Uuid, location: Location) {
        if let Some(player) = self.players.get_mut(&player_id) {
            player.location = location;
        }
    }

    /// Second matchmaking stage: a freshly formed team either fights the
    /// oldest waiting team or becomes the waiting team itself.
    fn match_teams(&mut self, p1: Uuid, p2: Uuid, origin: PairOrigin, ctx: &mut Context<Self>) {
        if let Some(waiting) = self.waiting_pairs.pop_front() {
            self.create_room([p1, p2, waiting.p1, waiting.p2], ctx);
        } else {
            for id in [p1, p2] {
                self.set_location(id, Location::WaitingPair);
                self.send_to(id, ServerWsMessage::UpdateMatchmakingProgress { stage: 2 });
            }
            self.waiting_pairs.push_back(WaitingPair { p1, p2, origin });
            debug!("[Matchmaking] team ({}, {}) waiting for an opposing team", p1, p2);
        }
    }

    /// Spawn a room for two teams. Seats are fixed in canonical order:
    /// the new team is side one, the dequeued waiting team side two. The
    /// room actor announces the composition and runs its own round loop.
    fn create_room(&mut self, ids: [Uuid; 4], ctx: &mut Context<Self>) {
        let room_id = Uuid::new_v4();
        let seats: [Seat; 4] = ids.map(|id| {
            let player = self
                .players
                .get(&id)
                .unwrap_or_else(|| panic!("registry out of sync: no live connection for player {id}"));
            Seat::new(id, player.code.clone(), player.name.clone(), player.addr.clone())
        });
        for id in ids {
            self.set_location(id, Location::InRoom(room_id));
        }
        let room = RoomSession::new(
            room_id,
            seats,
            ctx.address().recipient(),
            Duration::from_millis(ROUND_DURATION_MS),
            Duration::from_millis(POST_ROUND_PAUSE_MS),
        )
        .start();
        self.rooms.insert(room_id, room);
        info!("[Matchmaking] room {} created for players {:?}", room_id, ids);
    }

    /// Dissolve the waiting pair containing this player. A friend-formed
    /// pair is not re-queued; a random-formed partner goes to the back of
    /// the random queue and is told matchmaking reverted to stage 1.
    fn dissolve_waiting_pair(&mut self, player_id: Uuid) {
        let Some(pos) = self
            .waiting_pairs
            .iter()
            .position(|pair| pair.p1 == player_id || pair.p2 == player_id)
        else {
            return;
        };
        let pair = self.waiting_pairs.remove(pos).unwrap();
        let partner = if pair.p1 == player_id { pair.p2 } else { pair.p1 };
        match pair.origin {
            PairOrigin::Friend => {
                self.set_location(partner, Location::Idle);
                self.send_to(
                    partner,
                    ServerWsMessage::SetInactive {
                        reason: "Matchmaking failed: your partner disconnected".to_string(),
                    },
                );
                info!("[Matchmaking] friend pair dissolved, partner {} released", partner);
            }
            PairOrigin::Random => {
                self.random_queue.push_back(partner);
                self.set_location(partner, Location::RandomQueue);
                self.send_to(partner, ServerWsMessage::UpdateMatchmakingProgress { stage: 1 });
                info!("[Matchmaking] random pair dissolved, partner {} re-queued", partner);
            }
        }
    }
}

impl Actor for MatchmakingServer {
    type Context = Context<Self>;
}

impl Handler<Connect> for MatchmakingServer {
    type Result = ();

    /// Registers a new connection and pushes its minted friend code.
    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        let code = self.mint_code(msg.player_id);
        msg.addr.do_send(ServerWsMessage::Welcome { code: code.clone() });
        debug!("[Matchmaking] player {} connected with code {}", msg.player_id, code);
        self.codes.insert(code.clone(), msg.player_id);
        self.players.insert(
            msg.player_id,
            ConnectedPlayer {
                code,
                name: String::new(),
                addr: msg.addr,
                location: Location::Idle,
            },
        );
    }
}

impl Handler<Disconnect> for MatchmakingServer {
    type Result = ();

    /// Deregisters a connection, first unwinding whichever structure
    /// currently holds the player.
    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        let Some(player) = self.players.remove(&msg.player_id) else {
            return;
        };
        self.codes.remove(&player.code);
        match player.location {
            Location::Idle => {}
            Location::FriendWait => {
                self.friend_waiting.remove(&player.code);
            }
            Location::RandomQueue => {
                // Order of the remaining entries is preserved.
                self.random_queue.retain(|id| *id != msg.player_id);
            }
            Location::WaitingPair => {
                self.dissolve_waiting_pair(msg.player_id);
            }
            Location::InRoom(room_id) => {
                if let Some(room) = self.rooms.get(&room_id) {
                    room.do_send(MemberLeft { player_id: msg.player_id });
                }
            }
        }
        info!("[Matchmaking] player {} ({}) disconnected", msg.player_id, player.code);
    }
}

impl Handler<StartMatchmaking> for MatchmakingServer {
    type Result = ();

    /// Handles a matchmaking request: friend path when a code is named,
    /// random FIFO path otherwise.
    fn handle(&mut self, msg: StartMatchmaking, ctx: &mut Self::Context) -> Self::Result {
        let Some(player) = self.players.get_mut(&msg.player_id) else {
            return;
        };
        player.name = msg.name;
        let own_code = player.code.clone();
        let location = player.location.clone();

        match location {
            Location::WaitingPair | Location::InRoom(_) => {
                self.send_to(
                    msg.player_id,
                    ServerWsMessage::error("Already in a team or a room"),
                );
                return;
            }
            // Re-routing from a waiting state is allowed; the old entry is
            // removed first so the player stays in a single structure.
            Location::FriendWait => {
                self.friend_waiting.remove(&own_code);
            }
            Location::RandomQueue => {
                self.random_queue.retain(|id| *id != msg.player_id);
            }
            Location::Idle => {}
        }

        if msg.friend_code.is_empty() {
            // Random path: pair with the queue head or become the tail.
            if let Some(other) = self.random_queue.pop_front() {
                self.match_teams(other, msg.player_id, PairOrigin::Random, ctx);
            } else {
                self.random_queue.push_back(msg.player_id);
                self.set_location(msg.player_id, Location::RandomQueue);
                debug!("[Matchmaking] player {} queued for random pairing", msg.player_id);
            }
            return;
        }

        // Friend path.
        if msg.friend_code == own_code {
            self.send_to(
                msg.player_id,
                ServerWsMessage::error("Cannot request your own friend code"),
            );
            return;
        }
        let mutual = self
            .friend_waiting
            .get(&msg.friend_code)
            .is_some_and(|requested| *requested == own_code);
        if mutual {
            // Both requested each other; the earlier requester leads.
            self.friend_waiting.remove(&msg.friend_code);
            let friend = self.resolve(&msg.friend_code);
            self.match_teams(friend, msg.player_id, PairOrigin::Friend, ctx);
        } else {
            self.friend_waiting.insert(own_code, msg.friend_code);
            self.set_location(msg.player_id, Location::FriendWait);
            debug!("[Matchmaking] player {} waiting for a friend", msg.player_id);
        }
    }
}

impl Handler<SubmitMove> for MatchmakingServer {
    type Result = ();

    /// Routes a move to the player's room. Moves from players outside a
    /// room are dropped.
    fn handle(&mut self, msg: SubmitMove, _ctx: &mut Self::Context) -> Self::Result {
        let Some(player) = self.players.get(&msg.player_id) else {
            return;
        };
        match player.location {
            Location::InRoom(room_id) => {
                if let Some(room) = self.rooms.get(&room_id) {
                    room.do_send(RecordMove { player_id: msg.player_id, mv: msg.mv });
                }
            }
            _ => {
                warn!("[Matchmaking] move from player {} who is not in a room", msg.player_id);
            }
        }
    }
}

impl Handler<LeaveLobby> for MatchmakingServer {
    type Result = ();

    /// Handles an explicit room leave. The room keeps running for the
    /// remaining members.
    fn handle(&mut self, msg: LeaveLobby, _ctx: &mut Self::Context) -> Self::Result {
        let location = match self.players.get(&msg.player_id) {
            Some(player) => player.location.clone(),
            None => return,
        };
        if let Location::InRoom(room_id) = location {
            if let Some(room) = self.rooms.get(&room_id) {
                room.do_send(MemberLeft { player_id: msg.player_id });
            }
            self.set_location(msg.player_id, Location::Idle);
            debug!("[Matchmaking] player {} left room {}", msg.player_id, room_id);
        }
    }
}

impl Handler<RoomClosed> for MatchmakingServer {
    type Result = ();

    /// A room actor terminated: drop its index entry and release every
    /// member it still held.
    fn handle(&mut self, msg: RoomClosed, _ctx: &mut Self::Context) -> Self::Result {
        self.rooms.remove(&msg.room_id);
        for player_id in msg.members {
            if let Some(player) = self.players.get_mut(&player_id) {
                if player.location == Location::InRoom(msg.room_id) {
                    player.location = Location::Idle;
                }
            }
        }
        info!("[Matchmaking] room {} closed", msg.room_id);
    }
}
