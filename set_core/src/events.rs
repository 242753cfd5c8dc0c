use serde::{Deserialize, Serialize};

use crate::{
    game_state::DeckMode,
    player::{Player, PlayerId},
    room::{RoomId, RoomView},
};

/// Messages a client sends to the server, one JSON document per message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    CreateRoom {
        player_name: String,
    },
    JoinRoom {
        room_id: RoomId,
        player_name: String,
    },
    LeaveRoom {
        room_id: RoomId,
        player_id: PlayerId,
    },
    ClaimSet {
        room_id: RoomId,
        player_id: PlayerId,
        card_indices: Vec<usize>,
    },
    StartGame {
        room_id: RoomId,
        #[serde(default)]
        deck_mode: DeckMode,
    },
}

/// Messages the server sends back. Every room event carries the client view of
/// the room so clients simply replace their copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    PlayerJoined {
        player: Player,
        room: RoomView,
    },
    PlayerLeft {
        player_id: PlayerId,
        room: RoomView,
    },
    SetAttempted {
        player_id: PlayerId,
        card_indices: Vec<usize>,
        valid: bool,
        room: RoomView,
    },
    GameStarted {
        room: RoomView,
    },
    GameOver {
        winner: Option<Player>,
        room: RoomView,
    },
    Error {
        message: String,
    },
}
