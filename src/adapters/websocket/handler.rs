//! WebSocket upgrade handler for room connections.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Check the room exists and the token matches
//! 2. Upgrade to WebSocket
//! 3. Register a participant with a generated name
//! 4. Pump requests in and room updates out until either side stops
//! 5. Unregister the participant

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        ConnectInfo, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use futures::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::adapters::names;
use crate::adapters::registry::RoomRegistry;
use crate::domain::catalog::Catalog;
use crate::domain::session::{ErrorNotice, Game, SessionMessage};
use crate::ports::Participant;

use super::connection::{Connection, DEFAULT_OUTBOUND_CAPACITY};
use super::messages::{ClientAction, ClientRequest};

/// Largest inbound frame accepted, in bytes.
pub const READ_LIMIT: usize = 2048;

/// How long a single outbound write may take.
pub const WRITE_WAIT: Duration = Duration::from_secs(10);

/// How long the reader waits for any frame before giving up on the client.
pub const PONG_WAIT: Duration = Duration::from_secs(30);

/// Interval between pings. Shorter than `PONG_WAIT` so a healthy client
/// always answers in time.
pub const PING_PERIOD: Duration = Duration::from_secs(27);

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    pub registry: Arc<RoomRegistry>,
    pub outbound_capacity: usize,
}

impl WebSocketState {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self {
            registry,
            outbound_capacity: DEFAULT_OUTBOUND_CAPACITY,
        }
    }

    pub fn with_outbound_capacity(mut self, capacity: usize) -> Self {
        self.outbound_capacity = capacity;
        self
    }
}

/// Query string of the upgrade request.
#[derive(Debug, Deserialize)]
pub struct JoinParams {
    pub room: String,
    #[serde(default)]
    pub token: String,
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws?room=<name>&token=<token>`
///
/// Responds `404` for an unknown room and `403` for a stale token, before any
/// upgrade takes place.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<JoinParams>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<WebSocketState>,
) -> Response {
    let game = match authorize(&state.registry, &params).await {
        Ok(game) => game,
        Err(status) => {
            tracing::warn!(room = %params.room, client = %addr, status = %status, "rejected websocket upgrade");
            return status.into_response();
        }
    };

    let capacity = state.outbound_capacity;
    ws.max_message_size(READ_LIMIT)
        .on_upgrade(move |socket| handle_socket(socket, game, addr, capacity))
}

/// Finds the room a client wants to join and checks its token.
pub async fn authorize(
    registry: &RoomRegistry,
    params: &JoinParams,
) -> Result<Arc<Game>, StatusCode> {
    let game = registry.get(&params.room).await.ok_or(StatusCode::NOT_FOUND)?;
    if params.token != game.token() {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(game)
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection. Whichever pump stops first ends
/// the session; the participant is then unregistered, which closes the
/// outbound queue so the writer can say goodbye.
async fn handle_socket(socket: WebSocket, game: Arc<Game>, addr: SocketAddr, capacity: usize) {
    let (sender, receiver) = socket.split();

    let (connection, outbound) = Connection::new(
        game.clone(),
        game.next_participant_id(),
        names::generate(),
        addr.to_string(),
        capacity,
    );
    let connection = Arc::new(connection);

    game.register_participant(connection.clone()).await;

    let mut send_task = tokio::spawn(write_pump(sender, outbound, addr.to_string()));
    let mut recv_task = tokio::spawn(read_pump(receiver, connection.clone()));

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
            game.unregister_participant(connection.as_ref()).await;
        }
        _ = &mut recv_task => {
            // The writer keeps running until unregistering closes its queue.
            game.unregister_participant(connection.as_ref()).await;
        }
    }
}

/// Forwards queued room messages to the socket and keeps it alive with pings.
///
/// Sends a close frame once the queue is closed.
async fn write_pump(
    mut sender: SplitSink<WebSocket, Message>,
    mut outbound: mpsc::Receiver<SessionMessage>,
    client: String,
) {
    let mut ping = tokio::time::interval_at(tokio::time::Instant::now() + PING_PERIOD, PING_PERIOD);

    loop {
        tokio::select! {
            message = outbound.recv() => {
                let Some(message) = message else {
                    send_with_deadline(&mut sender, Message::Close(None), &client).await;
                    return;
                };

                let json = match serde_json::to_string(&message) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!(client = %client, "could not encode message: {}", e);
                        continue;
                    }
                };
                if !send_with_deadline(&mut sender, Message::Text(json), &client).await {
                    return;
                }
            }
            _ = ping.tick() => {
                if !send_with_deadline(&mut sender, Message::Ping(Vec::new()), &client).await {
                    return;
                }
            }
        }
    }
}

async fn send_with_deadline(
    sender: &mut SplitSink<WebSocket, Message>,
    message: Message,
    client: &str,
) -> bool {
    match tokio::time::timeout(WRITE_WAIT, sender.send(message)).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::debug!(client = %client, "send error, closing connection: {}", e);
            false
        }
        Err(_) => {
            tracing::warn!(client = %client, "write deadline exceeded");
            false
        }
    }
}

/// Reads client requests until the client leaves, errors, or goes quiet.
async fn read_pump(mut receiver: SplitStream<WebSocket>, connection: Arc<Connection>) {
    let client = connection.remote_address();

    loop {
        let next = match tokio::time::timeout(PONG_WAIT, receiver.next()).await {
            Ok(next) => next,
            Err(_) => {
                tracing::debug!(client = %client, "read deadline exceeded");
                break;
            }
        };

        match next {
            Some(Ok(Message::Text(text))) => match serde_json::from_str::<ClientRequest>(&text) {
                Ok(request) => dispatch_request(&connection, request).await,
                Err(e) => tracing::warn!(client = %client, "could not read JSON: {}", e),
            },
            Some(Ok(Message::Binary(_))) => {
                tracing::warn!(client = %client, "received unsupported binary message");
            }
            // Pings and pongs only refresh the read deadline.
            Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {}
            Some(Ok(Message::Close(_))) | None => {
                tracing::debug!(client = %client, "client closed connection");
                break;
            }
            Some(Err(e)) => {
                tracing::debug!(client = %client, "receive error: {}", e);
                break;
            }
        }
    }
}

/// Applies one client request to the connection's room.
///
/// Requests naming a different room or an old token are ignored.
pub async fn dispatch_request(connection: &Arc<Connection>, request: ClientRequest) {
    let game = connection.game();

    if request.room != game.room() || request.token != game.token() {
        tracing::warn!(
            client = %connection.remote_address(),
            room = %game.room(),
            requested_room = %request.room,
            "token is stale or does not belong to this room"
        );
        return;
    }

    match request.action {
        ClientAction::Select => match usize::try_from(request.card) {
            Ok(index) => {
                game.submit_value(connection.as_ref(), index, &request.deck)
                    .await;
            }
            Err(_) => {
                tracing::warn!(
                    client = %connection.remote_address(),
                    room = %game.room(),
                    "client submitted an invalid card ({})",
                    request.card
                );
                connection.deliver(SessionMessage::Error(ErrorNotice::invalid_value()));
            }
        },
        ClientAction::Reveal => game.reveal().await,
        ClientAction::Reset => game.reset().await,
        ClientAction::Deck => match Catalog::find(&request.deck) {
            Some(catalog) => game.set_catalog(catalog).await,
            None => tracing::warn!(deck = %request.deck, "unknown deck requested"),
        },
        ClientAction::Topic => game.set_topic(&request.value).await,
        ClientAction::Username => match connection.set_name(&request.value) {
            Ok(()) => game.broadcast_update().await,
            Err(e) => {
                tracing::debug!(client = %connection.remote_address(), "rename rejected: {}", e);
                // Puts the client's view back on the name the room still uses.
                game.send_update_to(connection.as_ref()).await;
            }
        },
        ClientAction::Unknown => {
            tracing::error!(client = %connection.remote_address(), "unknown action received");
        }
    }
}

/// Create axum router for the WebSocket endpoint.
pub fn websocket_router(state: WebSocketState) -> Router {
    Router::new().route("/ws", get(ws_handler)).with_state(state)
}
