use serde::{Deserialize, Serialize};

use crate::card::Card;

pub type PlayerId = usize;

pub const MAX_PLAYERS: usize = 6;
pub const MAX_NAME_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    score: u32,
    found_sets: Vec<[Card; 3]>,
    penalties: u32,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Player {
            id,
            name: format!("Player {}", id + 1),
            score: 0,
            found_sets: vec![],
            penalties: 0,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn found_sets(&self) -> &[[Card; 3]] {
        &self.found_sets
    }

    pub fn penalties(&self) -> u32 {
        self.penalties
    }

    pub fn is_valid_name(name: &str) -> bool {
        !name.trim().is_empty() && name.trim().chars().count() <= MAX_NAME_LEN
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    pub(crate) fn record_set(&mut self, cards: [Card; 3]) {
        self.found_sets.push(cards);
        self.score += 1;
    }

    pub(crate) fn add_penalty(&mut self) {
        self.penalties += 1;
    }

    /// Same seat and name, fresh tallies.
    pub(crate) fn reset(&self) -> Self {
        Player {
            id: self.id,
            name: self.name.clone(),
            ..Player::new(self.id)
        }
    }
}
