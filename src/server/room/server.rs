/// Room actor: one per active 2v2 match.
///
/// Runs the repeating round loop with its own timers: collect moves for a
/// bounded window (polled in sub-intervals, exiting early once every alive
/// present member has moved), resolve combat, broadcast seat-relative
/// results, pause, and start over. The loop terminates itself on total
/// abandonment or sustained inactivity; nothing outside the actor cancels
/// it.
use actix::prelude::*;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use uuid::Uuid;
use log::{debug, info};

use super::messages::{MemberLeft, RecordMove, RoomClosed};
use crate::config::game::{MAX_IDLE_ROUNDS, POLL_DIVISIONS};
use crate::game::combat::resolve_round;
use crate::game::types::{Move, JOIN_VIEW, MOVES_VIEW, SEATS};
use crate::server::messages::ServerWsMessage;

/// One of the four fixed positions in a room.
pub struct Seat {
    pub player_id: Uuid,
    pub code: String,
    pub name: String,
    pub addr: Recipient<ServerWsMessage>,
    /// False once eliminated; restored by a team-wipe reset.
    pub alive: bool,
    /// False once the member left or disconnected. An absent seat stays in
    /// the room's geometry but receives nothing and defaults to rock.
    pub present: bool,
}

impl Seat {
    pub fn new(player_id: Uuid, code: String, name: String, addr: Recipient<ServerWsMessage>) -> Self {
        Seat {
            player_id,
            code,
            name,
            addr,
            alive: true,
            present: true,
        }
    }
}

pub struct RoomSession {
    pub room_id: Uuid,
    seats: [Seat; SEATS],
    matchmaking: Recipient<RoomClosed>,
    round_duration: Duration,
    post_round_pause: Duration,
    /// Moves submitted for the round currently being collected.
    pending: HashMap<Uuid, Move>,
    /// Members whose move has already been announced this round.
    announced: HashSet<Uuid>,
    /// Consecutive rounds without a single submitted move.
    idle_rounds: u32,
    polls_left: u32,
    collecting: bool,
}

impl RoomSession {
    pub fn new(
        room_id: Uuid,
        seats: [Seat; SEATS],
        matchmaking: Recipient<RoomClosed>,
        round_duration: Duration,
        post_round_pause: Duration,
    ) -> Self {
        RoomSession {
            room_id,
            seats,
            matchmaking,
            round_duration,
            post_round_pause,
            pending: HashMap::new(),
            announced: HashSet::new(),
            idle_rounds: 0,
            polls_left: 0,
            collecting: false,
        }
    }

    /// Push a message to every member still present.
    fn broadcast(&self, msg: ServerWsMessage) {
        for seat in self.seats.iter().filter(|s| s.present) {
            seat.addr.do_send(msg.clone());
        }
    }

    fn seat_index(&self, player_id: Uuid) -> Option<usize> {
        self.seats.iter().position(|s| s.player_id == player_id)
    }

    /// Announce the room composition, each member in their own
    /// seat-relative order: self, teammate, direct opponent, teammate's
    /// opponent.
    fn announce_composition(&self) {
        for (seat, view) in self.seats.iter().zip(JOIN_VIEW) {
            let [s, t, o1, o2] = view;
            seat.addr.do_send(ServerWsMessage::JoinRoom {
                self_name: self.seats[s].name.clone(),
                teammate_name: self.seats[t].name.clone(),
                opponent1_name: self.seats[o1].name.clone(),
                opponent2_name: self.seats[o2].name.clone(),
                self_code: self.seats[s].code.clone(),
                teammate_code: self.seats[t].code.clone(),
                opponent1_code: self.seats[o1].code.clone(),
                opponent2_code: self.seats[o2].code.clone(),
            });
        }
    }

    /// Begin a round: revive a fully dead side, then open the collection
    /// window. Pending moves are not cleared here; anything submitted
    /// during the pause already belongs to this round.
    fn start_round(&mut self, ctx: &mut Context<Self>) {
        let team1_wiped = !self.seats[0].alive && !self.seats[1].alive;
        let team2_wiped = !self.seats[2].alive && !self.seats[3].alive;
        if team1_wiped || team2_wiped {
            debug!("[Room {}] team wiped, reviving all seats", self.room_id);
            for seat in &mut self.seats {
                seat.alive = true;
            }
        }
        self.collecting = true;
        self.polls_left = POLL_DIVISIONS;
        self.schedule_poll(ctx);
    }

    fn schedule_poll(&mut self, ctx: &mut Context<Self>) {
        ctx.run_later(self.round_duration / POLL_DIVISIONS, |act, ctx| {
            act.poll(ctx);
        });
    }

    /// One collection sub-interval: detect abandonment, announce newly
    /// received moves, and resolve early once every alive present member
    /// has submitted.
    fn poll(&mut self, ctx: &mut Context<Self>) {
        if !self.collecting {
            return;
        }
        if !self.seats.iter().any(|s| s.present) {
            info!("[Room {}] abandoned, stopping round loop", self.room_id);
            self.matchmaking.do_send(RoomClosed {
                room_id: self.room_id,
                members: Vec::new(),
            });
            ctx.stop();
            return;
        }

        let newly_moved: Vec<(Uuid, String)> = self
            .seats
            .iter()
            .filter(|s| self.pending.contains_key(&s.player_id) && !self.announced.contains(&s.player_id))
            .map(|s| (s.player_id, s.code.clone()))
            .collect();
        for (player_id, code) in newly_moved {
            self.announced.insert(player_id);
            self.broadcast(ServerWsMessage::PlayerMoved { code });
        }

        let all_moved = self
            .seats
            .iter()
            .filter(|s| s.alive && s.present)
            .all(|s| self.pending.contains_key(&s.player_id));
        self.polls_left -= 1;
        if all_moved || self.polls_left == 0 {
            self.resolve(ctx);
        } else {
            self.schedule_poll(ctx);
        }
    }

    /// Close the collection window: handle inactivity, default missing
    /// moves to rock, run the combat resolver, broadcast viewpoint-ordered
    /// results, then pause before the next round.
    fn resolve(&mut self, ctx: &mut Context<Self>) {
        if !self.collecting {
            return;
        }
        self.collecting = false;

        if self.pending.is_empty() {
            self.idle_rounds += 1;
            if self.idle_rounds > MAX_IDLE_ROUNDS {
                info!(
                    "[Room {}] no moves for {} rounds, closing as inactive",
                    self.room_id, self.idle_rounds
                );
                self.broadcast(ServerWsMessage::SetInactive {
                    reason: "Room closed due to inactivity".to_string(),
                });
                self.matchmaking.do_send(RoomClosed {
                    room_id: self.room_id,
                    members: self.seats.iter().map(|s| s.player_id).collect(),
                });
                ctx.stop();
                return;
            }
        }

        let alive: [bool; SEATS] = std::array::from_fn(|i| self.seats[i].alive);
        let moves: [Move; SEATS] = std::array::from_fn(|i| {
            self.pending
                .get(&self.seats[i].player_id)
                .copied()
                .unwrap_or(Move::Rock)
        });
        let next = resolve_round(alive, moves);
        for (seat, live) in self.seats.iter_mut().zip(next) {
            seat.alive = live;
        }
        self.pending.clear();
        self.announced.clear();
        debug!(
            "[Room {}] round resolved: moves {:?} alive {:?} -> {:?}",
            self.room_id, moves, alive, next
        );

        // The full alive map guards against client/server desync.
        let alive_map: HashMap<String, bool> = self
            .seats
            .iter()
            .map(|s| (s.code.clone(), s.alive))
            .collect();
        for (i, seat) in self.seats.iter().enumerate() {
            if !seat.present {
                continue;
            }
            let viewpoint: String = MOVES_VIEW[i].iter().map(|&j| moves[j].code()).collect();
            seat.addr.do_send(ServerWsMessage::ReceiveMoves {
                moves: viewpoint,
                alive: alive_map.clone(),
            });
        }

        ctx.run_later(self.post_round_pause, |act, ctx| {
            act.broadcast(ServerWsMessage::StartRound);
            act.start_round(ctx);
        });
    }
}

impl Actor for RoomSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            "[Room {}] started with players {:?}",
            self.room_id,
            self.seats.iter().map(|s| s.code.as_str()).collect::<Vec<_>>()
        );
        self.announce_composition();
        self.start_round(ctx);
    }
}

impl Handler<RecordMove> for RoomSession {
    type Result = ();

    /// Records the member's move for the round being (or about to be)
    /// collected, overwriting any prior value. Any arrival resets the
    /// inactivity counter.
    fn handle(&mut self, msg: RecordMove, _ctx: &mut Self::Context) -> Self::Result {
        if self.seat_index(msg.player_id).is_none() {
            return;
        }
        self.pending.insert(msg.player_id, msg.mv);
        self.idle_rounds = 0;
        debug!("[Room {}] move recorded for player {}", self.room_id, msg.player_id);
    }
}

impl Handler<MemberLeft> for RoomSession {
    type Result = ();

    fn handle(&mut self, msg: MemberLeft, _ctx: &mut Self::Context) -> Self::Result {
        if let Some(index) = self.seat_index(msg.player_id) {
            self.seats[index].present = false;
            debug!("[Room {}] player {} left", self.room_id, msg.player_id);
        }
    }
}
