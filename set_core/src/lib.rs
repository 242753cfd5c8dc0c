pub mod card;
pub mod error;
pub mod events;
mod game_logic;
pub mod game_state;
pub mod player;
pub mod room;
pub mod set_logic;

pub use card::Card;
pub use error::{GameError, IllegalTransition, InvariantViolation};
pub use game_logic::MAX_DEAL_ATTEMPTS;
pub use game_state::{DeckMode, GameState};
pub use player::{Player, PlayerId};
pub use room::{Room, RoomId, RoomView};
