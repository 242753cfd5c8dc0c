use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    card::Card,
    error::{GameError, InvariantViolation},
    player::{Player, PlayerId},
    set_logic::has_any_set,
};

/// Cards dealt at the start of a game.
pub const BOARD_SIZE: usize = 12;
/// Any 21 distinct cards contain a set, so the board never grows past this.
pub const MAX_BOARD_SIZE: usize = 21;
pub const SELECTION_SIZE: usize = 3;
pub const DRAW_COUNT: usize = 3;

#[derive(
    Debug, Default, PartialEq, Eq, Copy, Clone, Display, EnumIter, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "camelCase")]
pub enum DeckMode {
    /// One 81-card deck; the game ends once it is exhausted and no set is left.
    #[default]
    Finite,
    /// The deck is regenerated whenever it runs out.
    Infinite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) mode: DeckMode,
    pub(crate) deck: Vec<Card>,
    pub(crate) board: Vec<Option<Card>>,
    pub(crate) players: Vec<Player>,
    pub(crate) selection: Vec<usize>,
    pub(crate) set_present: bool,
}

impl GameState {
    /// Assembles a state from its parts, e.g. to restore a session.
    ///
    /// The top of the deck is its last card. Fails if a card shows up twice
    /// across deck and board or if there are no players.
    pub fn from_parts(
        mode: DeckMode,
        deck: Vec<Card>,
        board: Vec<Option<Card>>,
        players: Vec<Player>,
    ) -> Result<Self, GameError> {
        if players.is_empty() {
            return Err(InvariantViolation::NoPlayers.into());
        }
        let mut seen = HashSet::new();
        for card in deck.iter().chain(board.iter().flatten()) {
            if !seen.insert(card) {
                return Err(InvariantViolation::DuplicateCard(*card).into());
            }
        }
        let set_present = has_any_set(&board);
        Ok(GameState {
            mode,
            deck,
            board,
            players,
            selection: vec![],
            set_present,
        })
    }

    pub fn mode(&self) -> DeckMode {
        self.mode
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn board(&self) -> &[Option<Card>] {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn set_present(&self) -> bool {
        self.set_present
    }

    pub fn occupied_count(&self) -> usize {
        self.board.iter().flatten().count()
    }

    /// The selected cards, once exactly three occupied slots are selected.
    pub fn selected_cards(&self) -> Option<[Card; 3]> {
        match self.selection[..] {
            [i, j, k] => Some([
                self.board.get(i).copied().flatten()?,
                self.board.get(j).copied().flatten()?,
                self.board.get(k).copied().flatten()?,
            ]),
            _ => None,
        }
    }

    /// Finite deck exhausted and no set left on the board.
    pub fn is_game_over(&self) -> bool {
        self.mode == DeckMode::Finite && self.deck.is_empty() && !self.set_present
    }

    /// Highest score; ties go to the lowest player id.
    pub fn leading_player(&self) -> Option<&Player> {
        self.players
            .iter()
            .max_by(|a, b| a.score().cmp(&b.score()).then(b.id().cmp(&a.id())))
    }

    pub(crate) fn refresh_set_present(&mut self) {
        self.set_present = has_any_set(&self.board);
    }
}
