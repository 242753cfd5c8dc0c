use std::collections::HashMap;

use log::{info, warn};
use rand::{distributions::Alphanumeric, rngs::StdRng, Rng, SeedableRng};
use set_core::{
    events::{ClientEvent, ServerEvent},
    DeckMode, GameError, PlayerId, Room, RoomId,
};

pub type ConnectionId = u64;

const ROOM_ID_LEN: usize = 6;

/// A message to deliver, together with the connections that should get it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing {
    pub recipients: Vec<ConnectionId>,
    pub event: ServerEvent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Seat {
    room_id: RoomId,
    player_id: PlayerId,
}

pub struct GameLobby {
    rooms: HashMap<RoomId, Room>,
    seats: HashMap<ConnectionId, Seat>,
    rng: StdRng,
}

impl GameLobby {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        GameLobby {
            rooms: HashMap::new(),
            seats: HashMap::new(),
            rng,
        }
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn handle(&mut self, conn: ConnectionId, event: ClientEvent) -> Vec<Outgoing> {
        let result = match event {
            ClientEvent::CreateRoom { player_name } => self.create_room(conn, &player_name),
            ClientEvent::JoinRoom {
                room_id,
                player_name,
            } => self.join_room(conn, &room_id, &player_name),
            ClientEvent::LeaveRoom { room_id, player_id } => self
                .own_seat(conn, &room_id, player_id)
                .and_then(|_| self.leave(conn)),
            ClientEvent::ClaimSet {
                room_id,
                player_id,
                card_indices,
            } => self.claim_set(conn, &room_id, player_id, card_indices),
            ClientEvent::StartGame { room_id, deck_mode } => {
                self.start_game(conn, &room_id, deck_mode)
            }
        };
        result.unwrap_or_else(|message| {
            warn!("rejected request from connection {conn}: {message}");
            vec![Outgoing {
                recipients: vec![conn],
                event: ServerEvent::Error { message },
            }]
        })
    }

    /// A dropped connection leaves its room.
    pub fn disconnect(&mut self, conn: ConnectionId) -> Vec<Outgoing> {
        if !self.seats.contains_key(&conn) {
            return vec![];
        }
        self.leave(conn).unwrap_or_default()
    }

    fn create_room(&mut self, conn: ConnectionId, name: &str) -> Result<Vec<Outgoing>, String> {
        self.ensure_unseated(conn)?;
        let room_id = self.fresh_room_id();
        let room = Room::new(room_id.clone(), name, &mut self.rng).map_err(describe)?;
        let host = room.players()[0].clone();
        self.seats.insert(
            conn,
            Seat {
                room_id: room_id.clone(),
                player_id: host.id(),
            },
        );
        let event = ServerEvent::PlayerJoined {
            player: host,
            room: room.view(),
        };
        self.rooms.insert(room_id, room);
        Ok(vec![Outgoing {
            recipients: vec![conn],
            event,
        }])
    }

    fn join_room(
        &mut self,
        conn: ConnectionId,
        room_id: &str,
        name: &str,
    ) -> Result<Vec<Outgoing>, String> {
        self.ensure_unseated(conn)?;
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| format!("unknown room {room_id}"))?;
        let player = room.join(name).map_err(describe)?;
        let room = room.view();
        self.seats.insert(
            conn,
            Seat {
                room_id: room_id.to_string(),
                player_id: player.id(),
            },
        );
        Ok(self.broadcast(room_id, ServerEvent::PlayerJoined { player, room }))
    }

    fn leave(&mut self, conn: ConnectionId) -> Result<Vec<Outgoing>, String> {
        let seat = self
            .seats
            .remove(&conn)
            .ok_or_else(|| "not seated in any room".to_string())?;
        let room = self
            .rooms
            .get_mut(&seat.room_id)
            .ok_or_else(|| format!("unknown room {}", seat.room_id))?;
        if !room.leave(seat.player_id).map_err(describe)? {
            self.rooms.remove(&seat.room_id);
            info!("room {} closed", seat.room_id);
            return Ok(vec![]);
        }
        let room = room.view();
        Ok(self.broadcast(
            &seat.room_id,
            ServerEvent::PlayerLeft {
                player_id: seat.player_id,
                room,
            },
        ))
    }

    fn start_game(
        &mut self,
        conn: ConnectionId,
        room_id: &str,
        mode: DeckMode,
    ) -> Result<Vec<Outgoing>, String> {
        let player_id = self.seat_in(conn, room_id)?;
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| format!("unknown room {room_id}"))?;
        room.start(player_id, mode, &mut self.rng).map_err(describe)?;
        let room = room.view();
        Ok(self.broadcast(room_id, ServerEvent::GameStarted { room }))
    }

    fn claim_set(
        &mut self,
        conn: ConnectionId,
        room_id: &str,
        player_id: PlayerId,
        card_indices: Vec<usize>,
    ) -> Result<Vec<Outgoing>, String> {
        self.own_seat(conn, room_id, player_id)?;
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| format!("unknown room {room_id}"))?;
        let valid = room
            .claim(player_id, &card_indices, &mut self.rng)
            .map_err(describe)?;
        let winner = room.is_over().then(|| room.winner().cloned());
        let room = room.view();

        let mut outgoing = self.broadcast(
            room_id,
            ServerEvent::SetAttempted {
                player_id,
                card_indices,
                valid,
                room: room.clone(),
            },
        );
        if let Some(winner) = winner {
            info!("game in room {room_id} is over");
            outgoing.extend(self.broadcast(room_id, ServerEvent::GameOver { winner, room }));
        }
        Ok(outgoing)
    }

    fn broadcast(&self, room_id: &str, event: ServerEvent) -> Vec<Outgoing> {
        let mut recipients: Vec<ConnectionId> = self
            .seats
            .iter()
            .filter(|(_, seat)| seat.room_id == room_id)
            .map(|(&conn, _)| conn)
            .collect();
        recipients.sort_unstable();
        vec![Outgoing { recipients, event }]
    }

    fn ensure_unseated(&self, conn: ConnectionId) -> Result<(), String> {
        match self.seats.get(&conn) {
            Some(seat) => Err(format!("already seated in room {}", seat.room_id)),
            None => Ok(()),
        }
    }

    fn seat_in(&self, conn: ConnectionId, room_id: &str) -> Result<PlayerId, String> {
        match self.seats.get(&conn) {
            Some(seat) if seat.room_id == room_id => Ok(seat.player_id),
            _ => Err(format!("not seated in room {room_id}")),
        }
    }

    fn own_seat(&self, conn: ConnectionId, room_id: &str, player_id: PlayerId) -> Result<(), String> {
        if self.seat_in(conn, room_id)? != player_id {
            return Err(format!("cannot act for player {player_id}"));
        }
        Ok(())
    }

    fn fresh_room_id(&mut self) -> RoomId {
        loop {
            let id: RoomId = (&mut self.rng)
                .sample_iter(&Alphanumeric)
                .take(ROOM_ID_LEN)
                .map(|b| char::from(b).to_ascii_lowercase())
                .collect();
            if !self.rooms.contains_key(&id) {
                return id;
            }
        }
    }
}

fn describe(err: GameError) -> String {
    err.to_string()
}
