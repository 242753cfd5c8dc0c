use thiserror::Error;

use crate::{card::Card, player::PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invariant violated: {0}")]
    InvariantViolation(#[from] InvariantViolation),
    #[error("illegal transition: {0}")]
    IllegalTransition(#[from] IllegalTransition),
}

/// States the engine must never produce or accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("no board containing a set after {attempts} deals")]
    NoSetDealt { attempts: usize },
    #[error("a deck of {0} cards cannot fill a board")]
    DeckTooSmall(usize),
    #[error("card `{0}` appears more than once")]
    DuplicateCard(Card),
    #[error("a game needs at least one player")]
    NoPlayers,
}

/// Requests that are well-formed but not allowed from the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalTransition {
    #[error("a claim needs exactly 3 selected cards, found {0}")]
    SelectionSize(usize),
    #[error("slot {0} holds no card")]
    EmptySlot(usize),
    #[error("cards at {0:?} do not form a set")]
    NotASet([usize; 3]),
    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),
    #[error("at most {0} players can take part")]
    TooManyPlayers(usize),
    #[error("the last player cannot be removed")]
    LastPlayer,
    #[error("player names must be 1 to 64 characters")]
    InvalidName,
    #[error("player {0} is not the host")]
    NotHost(PlayerId),
    #[error("the game has not started")]
    NotStarted,
    #[error("the game is over")]
    GameOver,
}
