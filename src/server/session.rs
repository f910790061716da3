/// WebSocket session handler for a connected player.
///
/// This actor manages a single player's persistent connection: it registers
/// the player with the matchmaking server on start, deregisters on stop,
/// relays parsed client messages inward, and serializes server pushes back
/// to the client.
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use uuid::Uuid;

use crate::game::types::Move;
use crate::server::matchmaking::messages::{
    Connect, Disconnect, LeaveLobby, StartMatchmaking, SubmitMove,
};
use crate::server::matchmaking::server::MatchmakingServer;
use crate::server::messages::{ClientWsMessage, ServerWsMessage};

/// Represents a player's WebSocket session.
pub struct PlayerSession {
    pub player_id: Uuid,
    pub matchmaking_addr: Addr<MatchmakingServer>,
}

impl Actor for PlayerSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the session starts. Registers the player with the
    /// matchmaking server, which mints and pushes the friend code.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.matchmaking_addr.do_send(Connect {
            player_id: self.player_id,
            addr: ctx.address().recipient(),
        });
    }

    /// Called when the session stops. The matchmaking server unwinds
    /// whichever queue, pairing, or room currently holds the player.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.matchmaking_addr.do_send(Disconnect {
            player_id: self.player_id,
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlayerSession {
    /// Handles incoming WebSocket messages from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                match serde_json::from_str::<ClientWsMessage>(&text) {
                    Ok(ClientWsMessage::StartMatchmaking { friend_code, name }) => {
                        self.matchmaking_addr.do_send(StartMatchmaking {
                            player_id: self.player_id,
                            friend_code,
                            name,
                        });
                    }
                    Ok(ClientWsMessage::SubmitMove { action }) => {
                        // Only the three digit codes reach the room; anything
                        // else is rejected here.
                        match Move::from_code(&action) {
                            Some(mv) => self.matchmaking_addr.do_send(SubmitMove {
                                player_id: self.player_id,
                                mv,
                            }),
                            None => {
                                ctx.text(r#"{"action":"Error","data":{"message":"Invalid move code"}}"#);
                            }
                        }
                    }
                    Ok(ClientWsMessage::LeaveLobby) => {
                        self.matchmaking_addr.do_send(LeaveLobby {
                            player_id: self.player_id,
                        });
                    }
                    Ok(ClientWsMessage::Ping) => {
                        // Ping received; can be ignored or responded to.
                    }
                    Err(_e) => {
                        // Invalid client message format.
                        ctx.text(r#"{"action":"Error","data":{"message":"Invalid client message"}}"#);
                    }
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(_)) => ctx.stop(),
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for PlayerSession {
    type Result = ();

    /// Handles messages pushed from the server to this session.
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: notify client and close connection.
                log::error!("Failed to serialize ServerWsMessage: {}", e);
                ctx.text(r#"{"action":"Error","data":{"message":"Internal server error"}}"#);
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }
}

/// WebSocket endpoint. Each accepted connection gets a fresh player id;
/// the display name arrives later with the matchmaking request.
pub async fn ws_connect(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(
        PlayerSession {
            player_id: Uuid::new_v4(),
            matchmaking_addr: data.matchmaking_addr.clone(),
        },
        &req,
        stream,
    )
}
