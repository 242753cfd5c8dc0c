use itertools::Itertools;
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    card::Card,
    error::{GameError, IllegalTransition},
    game_state::{DeckMode, GameState, SELECTION_SIZE},
    player::{Player, PlayerId},
};

pub type RoomId = String;

/// A shared game on the server. The room owns the only authoritative copy of
/// the state; clients only ever propose claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    host: PlayerId,
    started: bool,
    state: GameState,
}

/// What clients get to see of a room. The deck only shows up as its size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub id: RoomId,
    pub host: PlayerId,
    pub started: bool,
    pub mode: DeckMode,
    pub board: Vec<Option<Card>>,
    pub deck_size: usize,
    pub players: Vec<Player>,
    pub set_present: bool,
    pub game_over: bool,
}

impl Room {
    pub fn new<R: Rng + ?Sized>(
        id: RoomId,
        host_name: &str,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let state = GameState::new_game(DeckMode::default(), rng)?.rename_player(0, host_name)?;
        info!("room {id} opened by {host_name}");
        Ok(Room {
            id,
            host: 0,
            started: false,
            state,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn host(&self) -> PlayerId {
        self.host
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn players(&self) -> &[Player] {
        self.state.players()
    }

    pub fn view(&self) -> RoomView {
        RoomView {
            id: self.id.clone(),
            host: self.host,
            started: self.started,
            mode: self.state.mode(),
            board: self.state.board().to_vec(),
            deck_size: self.state.deck().len(),
            players: self.state.players().to_vec(),
            set_present: self.state.set_present(),
            game_over: self.is_over(),
        }
    }

    pub fn join(&mut self, name: &str) -> Result<Player, GameError> {
        let seated = self.state.add_player()?;
        let id = seated.players().last().map_or(0, Player::id);
        self.state = seated.rename_player(id, name)?;
        info!("{name} joined room {} as player {id}", self.id);
        self.state
            .player(id)
            .cloned()
            .ok_or_else(|| IllegalTransition::UnknownPlayer(id).into())
    }

    /// Removes a player. Returns `false` when the last player left, in which
    /// case the room should be dropped.
    pub fn leave(&mut self, player_id: PlayerId) -> Result<bool, GameError> {
        if self.state.player(player_id).is_none() {
            return Err(IllegalTransition::UnknownPlayer(player_id).into());
        }
        if self.players().len() == 1 {
            info!("last player left room {}", self.id);
            return Ok(false);
        }
        self.state = self.state.delete_player(player_id)?;
        if self.host == player_id {
            self.host = self.players()[0].id();
            info!("player {} now hosts room {}", self.host, self.id);
        }
        Ok(true)
    }

    /// Deals a fresh game for everyone seated. Only the host may start, and
    /// starting again restarts.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        by: PlayerId,
        mode: DeckMode,
        rng: &mut R,
    ) -> Result<(), GameError> {
        if by != self.host {
            return Err(IllegalTransition::NotHost(by).into());
        }
        self.state = self.state.restart(mode, rng)?;
        self.started = true;
        info!(
            "room {} started a {mode} game with {} players",
            self.id,
            self.players().len()
        );
        Ok(())
    }

    /// Replays the claimant's selection on the server state.
    ///
    /// Returns whether the claim scored. A claim that does not hold up, including
    /// one that does not name exactly three distinct slots, costs the claimant a penalty.
    pub fn claim<R: Rng + ?Sized>(
        &mut self,
        player_id: PlayerId,
        indices: &[usize],
        rng: &mut R,
    ) -> Result<bool, GameError> {
        if !self.started {
            return Err(IllegalTransition::NotStarted.into());
        }
        if self.state.is_game_over() {
            return Err(IllegalTransition::GameOver.into());
        }
        if self.state.player(player_id).is_none() {
            return Err(IllegalTransition::UnknownPlayer(player_id).into());
        }

        if indices.len() != SELECTION_SIZE || !indices.iter().all_unique() {
            debug!(
                "rejected claim by player {player_id} in room {}: bad indices {indices:?}",
                self.id
            );
            self.state = self.state.add_penalty(player_id)?;
            return Ok(false);
        }

        let selected = indices
            .iter()
            .fold(self.state.clear_selection(), |state, &index| {
                state.select_card(index)
            });
        match selected.claim_set(Some(player_id), rng) {
            Ok(next) => {
                self.state = next.draw_until_set();
                Ok(true)
            }
            Err(GameError::IllegalTransition(reason)) => {
                debug!("rejected claim by player {player_id} in room {}: {reason}", self.id);
                self.state = self.state.add_penalty(player_id)?;
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    pub fn is_over(&self) -> bool {
        self.started && self.state.is_game_over()
    }

    pub fn winner(&self) -> Option<&Player> {
        self.state.leading_player()
    }
}
