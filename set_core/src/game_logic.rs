use log::{debug, trace};
use rand::{seq::SliceRandom, Rng};

use crate::{
    card::Card,
    error::{GameError, IllegalTransition, InvariantViolation},
    game_state::{DeckMode, GameState, BOARD_SIZE, DRAW_COUNT, MAX_BOARD_SIZE, SELECTION_SIZE},
    player::{Player, PlayerId, MAX_PLAYERS},
    set_logic::{generate_deck_excluding, has_any_set, is_set, no_set_cards},
};

/// Upper bound on redeals while looking for a board that contains a set.
pub const MAX_DEAL_ATTEMPTS: usize = 1_000;

impl GameState {
    /// A fresh single-player game.
    pub fn new_game<R: Rng + ?Sized>(mode: DeckMode, rng: &mut R) -> Result<Self, GameError> {
        Self::deal(mode, vec![Player::new(0)], Card::deck(), rng)
    }

    /// A fresh deal for the same roster; scores, found sets and penalties start over.
    pub fn restart<R: Rng + ?Sized>(&self, mode: DeckMode, rng: &mut R) -> Result<Self, GameError> {
        let players = self.players.iter().map(Player::reset).collect();
        Self::deal(mode, players, Card::deck(), rng)
    }

    /// Shuffles `cards` and deals a board, reshuffling until the board holds a set.
    pub(crate) fn deal<R: Rng + ?Sized>(
        mode: DeckMode,
        players: Vec<Player>,
        cards: Vec<Card>,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if players.is_empty() {
            return Err(InvariantViolation::NoPlayers.into());
        }
        if cards.len() < BOARD_SIZE {
            return Err(InvariantViolation::DeckTooSmall(cards.len()).into());
        }
        let mut deck = cards;
        for attempt in 1..=MAX_DEAL_ATTEMPTS {
            deck.shuffle(rng);
            let board = deck.split_off(deck.len() - BOARD_SIZE);
            if has_any_set(&board) {
                debug!("dealt a {mode} game after {attempt} attempt(s)");
                return Ok(GameState {
                    mode,
                    deck,
                    board: board.into_iter().map(Some).collect(),
                    players,
                    selection: vec![],
                    set_present: true,
                });
            }
            trace!("board without a set on attempt {attempt}, reshuffling");
            deck.extend(board);
        }
        Err(InvariantViolation::NoSetDealt {
            attempts: MAX_DEAL_ATTEMPTS,
        }
        .into())
    }

    /// Toggles `index` in the selection. Empty slots and a fourth pick are ignored.
    pub fn select_card(&self, index: usize) -> Self {
        let mut next = self.clone();
        if !matches!(self.board.get(index), Some(Some(_))) {
            return next;
        }
        if let Some(position) = next.selection.iter().position(|&i| i == index) {
            next.selection.remove(position);
        } else if next.selection.len() < SELECTION_SIZE {
            next.selection.push(index);
        }
        next
    }

    pub fn clear_selection(&self) -> Self {
        GameState {
            selection: vec![],
            ..self.clone()
        }
    }

    /// Scores the selected set for `player` (the first player when `None`) and
    /// refreshes the board.
    ///
    /// The selection is validated again here; a claim that is not exactly three
    /// occupied slots forming a set is rejected and the state is left untouched.
    /// When at least 12 cards remain the claimed slots are removed; otherwise
    /// they are refilled from the deck, or left empty once a finite deck runs out.
    pub fn claim_set<R: Rng + ?Sized>(
        &self,
        player: Option<PlayerId>,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let (indices, cards) = self.validated_selection()?;
        let seat = match player {
            Some(id) => self
                .players
                .iter()
                .position(|p| p.id() == id)
                .ok_or(IllegalTransition::UnknownPlayer(id))?,
            None => 0,
        };

        let mut next = self.clone();
        next.players[seat].record_set(cards);

        let mut descending = indices;
        descending.sort_unstable_by(|a, b| b.cmp(a));
        let remaining = next.occupied_count() - SELECTION_SIZE;
        if remaining >= BOARD_SIZE {
            for index in descending {
                next.board.remove(index);
            }
        } else {
            for &index in &descending {
                next.board[index] = None;
            }
            for index in descending {
                next.board[index] = next.next_card(rng);
            }
        }
        if next.mode == DeckMode::Infinite {
            next.fill_holes(rng);
            next.top_up_deck(rng);
        }

        next.selection.clear();
        next.refresh_set_present();
        debug!(
            "player {} claimed {:?}, {} cards on board, {} in deck",
            next.players[seat].id(),
            indices,
            next.occupied_count(),
            next.deck.len()
        );
        Ok(next)
    }

    /// Moves `n` cards from the deck onto the board.
    ///
    /// Does nothing once the board holds 21 cards or when the deck cannot supply `n` cards.
    /// Empty slots do not count towards the cap.
    pub fn draw_cards(&self, n: usize) -> Self {
        let mut next = self.clone();
        if next.occupied_count() >= MAX_BOARD_SIZE || next.deck.len() < n {
            return next;
        }
        let drawn = next.deck.split_off(next.deck.len() - n);
        next.board.extend(drawn.into_iter().map(Some));
        next.refresh_set_present();
        next
    }

    /// Keeps drawing until a set shows up, the board is full or the deck runs dry.
    pub fn draw_until_set(&self) -> Self {
        let mut next = self.clone();
        while !next.set_present
            && next.occupied_count() < MAX_BOARD_SIZE
            && next.deck.len() >= DRAW_COUNT
        {
            next = next.draw_cards(DRAW_COUNT);
        }
        next
    }

    /// Switching to the infinite deck regenerates a short deck at once and
    /// fills any holes on the board. Switching to the finite deck changes nothing else.
    pub fn set_game_mode<R: Rng + ?Sized>(&self, mode: DeckMode, rng: &mut R) -> Self {
        let mut next = self.clone();
        next.mode = mode;
        if mode == DeckMode::Infinite {
            next.top_up_deck(rng);
            next.fill_holes(rng);
            next.top_up_deck(rng);
            next.refresh_set_present();
        }
        next
    }

    pub fn add_player(&self) -> Result<Self, GameError> {
        if self.players.len() >= MAX_PLAYERS {
            return Err(IllegalTransition::TooManyPlayers(MAX_PLAYERS).into());
        }
        let id = self.players.iter().map(Player::id).max().map_or(0, |id| id + 1);
        let mut next = self.clone();
        next.players.push(Player::new(id));
        Ok(next)
    }

    pub fn rename_player(&self, id: PlayerId, name: &str) -> Result<Self, GameError> {
        if !Player::is_valid_name(name) {
            return Err(IllegalTransition::InvalidName.into());
        }
        let mut next = self.clone();
        next.player_mut(id)?.set_name(name);
        Ok(next)
    }

    pub fn delete_player(&self, id: PlayerId) -> Result<Self, GameError> {
        let position = self
            .players
            .iter()
            .position(|p| p.id() == id)
            .ok_or(IllegalTransition::UnknownPlayer(id))?;
        if self.players.len() == 1 {
            return Err(IllegalTransition::LastPlayer.into());
        }
        let mut next = self.clone();
        next.players.remove(position);
        Ok(next)
    }

    pub fn add_penalty(&self, id: PlayerId) -> Result<Self, GameError> {
        let mut next = self.clone();
        next.player_mut(id)?.add_penalty();
        Ok(next)
    }

    /// Replaces the board with 12 cards that contain no set; the rest becomes the deck.
    pub fn debug_no_set_board<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let board: Vec<Card> = no_set_cards().into_iter().take(BOARD_SIZE).collect();
        let mut deck: Vec<Card> = Card::deck()
            .into_iter()
            .filter(|card| !board.contains(card))
            .collect();
        deck.shuffle(rng);
        GameState {
            deck,
            board: board.into_iter().map(Some).collect(),
            selection: vec![],
            set_present: false,
            ..self.clone()
        }
    }

    fn validated_selection(&self) -> Result<([usize; 3], [Card; 3]), IllegalTransition> {
        let indices: [usize; 3] = match self.selection[..] {
            [i, j, k] => [i, j, k],
            _ => return Err(IllegalTransition::SelectionSize(self.selection.len())),
        };
        let cards = self
            .selected_cards()
            .ok_or_else(|| {
                let empty = indices
                    .iter()
                    .copied()
                    .find(|&i| !matches!(self.board.get(i), Some(Some(_))))
                    .unwrap_or(indices[0]);
                IllegalTransition::EmptySlot(empty)
            })?;
        if !is_set(&cards[0], &cards[1], &cards[2]) {
            return Err(IllegalTransition::NotASet(indices));
        }
        Ok((indices, cards))
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, IllegalTransition> {
        self.players
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(IllegalTransition::UnknownPlayer(id))
    }

    fn regenerate_deck<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.deck = generate_deck_excluding(rng, &self.board);
        debug!("regenerated deck with {} cards", self.deck.len());
    }

    // An infinite deck always keeps enough cards for one more draw.
    fn top_up_deck<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.deck.len() < DRAW_COUNT {
            self.regenerate_deck(rng);
        }
    }

    // Pops the top card, regenerating an exhausted infinite deck first.
    fn next_card<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if self.mode == DeckMode::Infinite && self.deck.is_empty() {
            self.regenerate_deck(rng);
        }
        self.deck.pop()
    }

    fn fill_holes<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for index in 0..self.board.len() {
            if self.board[index].is_none() {
                self.board[index] = self.next_card(rng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng};

    use crate::{
        card::{Card, Color, Count, Fill, Shape},
        error::{GameError, IllegalTransition, InvariantViolation},
        game_logic::MAX_DEAL_ATTEMPTS,
        game_state::{DeckMode, GameState, BOARD_SIZE, MAX_BOARD_SIZE},
        player::{Player, MAX_PLAYERS},
        set_logic::{find_one_set, has_any_set, is_set, no_set_cards},
    };

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn red_solid_ones() -> Vec<Card> {
        vec![
            Card::new(Shape::Diamond, Color::Red, Fill::Solid, Count::One),
            Card::new(Shape::Oval, Color::Red, Fill::Solid, Count::One),
            Card::new(Shape::Squiggle, Color::Red, Fill::Solid, Count::One),
        ]
    }

    /// Board starts with `first`, padded from the remaining cards to `board_len`
    /// slots; the next `deck_len` cards form the deck.
    fn state_with(mode: DeckMode, first: Vec<Card>, board_len: usize, deck_len: usize) -> GameState {
        let mut rest = Card::deck()
            .into_iter()
            .filter(|c| !first.contains(c))
            .collect::<Vec<_>>()
            .into_iter();
        let mut board: Vec<Option<Card>> = first.into_iter().map(Some).collect();
        while board.len() < board_len {
            board.push(rest.next());
        }
        let deck = rest.take(deck_len).collect();
        GameState::from_parts(mode, deck, board, vec![Player::new(0)]).unwrap()
    }

    fn select(state: &GameState, indices: &[usize]) -> GameState {
        indices
            .iter()
            .fold(state.clone(), |s, &index| s.select_card(index))
    }

    fn assert_no_duplicates(state: &GameState) {
        let cards: Vec<&Card> = state.deck().iter().chain(state.board().iter().flatten()).collect();
        let unique: HashSet<&Card> = cards.iter().copied().collect();
        assert_eq!(cards.len(), unique.len());
    }

    #[test]
    fn new_game_should_deal_12_cards_with_a_set() {
        let state = GameState::new_game(DeckMode::Finite, &mut rng()).unwrap();

        assert_eq!(state.board().len(), 12);
        assert_eq!(state.deck().len(), 69);
        assert_eq!(state.occupied_count(), 12);
        assert!(has_any_set(state.board()));
        assert!(state.set_present());
        assert!(state.selection().is_empty());
        assert_eq!(state.players().len(), 1);
        assert_eq!(state.players()[0].score(), 0);
        assert_no_duplicates(&state);
    }

    #[test]
    fn new_game_should_keep_requested_mode() {
        let state = GameState::new_game(DeckMode::Infinite, &mut rng()).unwrap();
        assert_eq!(state.mode(), DeckMode::Infinite);
    }

    #[test]
    fn deal_should_give_up_when_no_board_can_hold_a_set() {
        let result = GameState::deal(
            DeckMode::Finite,
            vec![Player::new(0)],
            no_set_cards(),
            &mut rng(),
        );

        assert_eq!(
            result,
            Err(GameError::from(InvariantViolation::NoSetDealt {
                attempts: MAX_DEAL_ATTEMPTS
            }))
        );
    }

    #[test]
    fn deal_should_reject_a_deck_smaller_than_the_board() {
        let cards = Card::deck().into_iter().take(BOARD_SIZE - 1).collect();
        let result = GameState::deal(DeckMode::Finite, vec![Player::new(0)], cards, &mut rng());
        assert_eq!(
            result,
            Err(GameError::from(InvariantViolation::DeckTooSmall(11)))
        );
    }

    #[test]
    fn select_card_should_toggle() {
        let state = state_with(DeckMode::Finite, red_solid_ones(), 12, 69);

        let selected = state.select_card(4);
        assert_eq!(selected.selection(), &[4]);

        let deselected = selected.select_card(4);
        assert!(deselected.selection().is_empty());
    }

    #[test]
    fn select_card_should_ignore_a_fourth_card() {
        let state = select(&state_with(DeckMode::Finite, red_solid_ones(), 12, 69), &[5, 1, 3]);

        let next = state.select_card(7);

        assert_eq!(next.selection(), &[5, 1, 3]);
    }

    #[test]
    fn select_card_should_ignore_empty_and_missing_slots() {
        let mut state = state_with(DeckMode::Finite, red_solid_ones(), 12, 0);
        state.board[6] = None;

        assert!(state.select_card(6).selection().is_empty());
        assert!(state.select_card(40).selection().is_empty());
    }

    #[test]
    fn select_card_should_leave_the_previous_state_untouched() {
        let state = state_with(DeckMode::Finite, red_solid_ones(), 12, 69);
        let _ = state.select_card(0);
        assert!(state.selection().is_empty());
    }

    #[test]
    fn clear_selection_should_be_idempotent() {
        let state = select(&state_with(DeckMode::Finite, red_solid_ones(), 12, 69), &[0, 1]);

        let once = state.clear_selection();

        assert!(once.selection().is_empty());
        assert_eq!(once.clear_selection(), once);
    }

    #[test]
    fn claim_set_should_refill_a_12_card_board() {
        let state = select(&state_with(DeckMode::Finite, red_solid_ones(), 12, 69), &[0, 1, 2]);
        assert!(state.selected_cards().is_some());

        let next = state.claim_set(None, &mut rng()).unwrap();

        assert_eq!(next.board().len(), 12);
        assert_eq!(next.occupied_count(), 12);
        assert_eq!(next.deck().len(), 66);
        assert_eq!(next.players()[0].score(), 1);
        assert_eq!(next.players()[0].found_sets().len(), 1);
        assert_eq!(next.players()[0].found_sets()[0].to_vec(), red_solid_ones());
        assert!(next.selection().is_empty());
        assert_eq!(next.set_present(), has_any_set(next.board()));
        for card in red_solid_ones() {
            assert!(!next.board().contains(&Some(card)));
        }
        assert_no_duplicates(&next);
    }

    #[test]
    fn claim_set_should_leave_holes_when_finite_deck_is_short() {
        let state = select(&state_with(DeckMode::Finite, red_solid_ones(), 12, 2), &[0, 1, 2]);

        let next = state.claim_set(None, &mut rng()).unwrap();

        assert_eq!(next.board().len(), 12);
        assert_eq!(next.occupied_count(), 11);
        assert!(next.deck().is_empty());
    }

    #[test]
    fn claim_set_should_leave_empty_slots_when_finite_deck_is_empty() {
        let state = select(&state_with(DeckMode::Finite, red_solid_ones(), 12, 0), &[0, 1, 2]);

        let next = state.claim_set(None, &mut rng()).unwrap();

        assert_eq!(next.board().len(), 12);
        assert_eq!(next.occupied_count(), 9);
        assert_eq!(&next.board()[..3], &[None, None, None]);
    }

    #[test]
    fn claim_set_should_shrink_a_board_above_12() {
        let state = select(&state_with(DeckMode::Finite, red_solid_ones(), 15, 66), &[0, 1, 2]);

        let next = state.claim_set(None, &mut rng()).unwrap();

        assert_eq!(next.board().len(), 12);
        assert_eq!(next.occupied_count(), 12);
        assert_eq!(next.deck().len(), 66);
        assert_eq!(next.board(), &state.board()[3..]);
    }

    #[test]
    fn claim_set_should_regenerate_an_empty_infinite_deck() {
        let state = select(&state_with(DeckMode::Infinite, red_solid_ones(), 12, 0), &[0, 1, 2]);

        let next = state.claim_set(None, &mut rng()).unwrap();

        assert_eq!(next.occupied_count(), 12);
        assert_eq!(next.deck().len(), 81 - 9 - 3);
        assert_no_duplicates(&next);
    }

    #[test]
    fn claim_set_should_credit_the_named_player() {
        let state = state_with(DeckMode::Finite, red_solid_ones(), 12, 69)
            .add_player()
            .unwrap();
        let state = select(&state, &[0, 1, 2]);

        let next = state.claim_set(Some(1), &mut rng()).unwrap();

        assert_eq!(next.player(0).unwrap().score(), 0);
        assert_eq!(next.player(1).unwrap().score(), 1);
    }

    #[test]
    fn claim_set_should_reject_incomplete_selection() {
        let state = select(&state_with(DeckMode::Finite, red_solid_ones(), 12, 69), &[0, 1]);

        let result = state.claim_set(None, &mut rng());

        assert_eq!(
            result,
            Err(GameError::from(IllegalTransition::SelectionSize(2)))
        );
    }

    #[test]
    fn claim_set_should_reject_a_non_set() {
        let mut first = red_solid_ones();
        first[2] = Card::new(Shape::Squiggle, Color::Green, Fill::Solid, Count::One);
        let state = select(&state_with(DeckMode::Finite, first, 12, 69), &[0, 1, 2]);
        let [a, b, c] = state.selected_cards().unwrap();
        assert!(!is_set(&a, &b, &c));

        let result = state.claim_set(None, &mut rng());

        assert_eq!(
            result,
            Err(GameError::from(IllegalTransition::NotASet([0, 1, 2])))
        );
    }

    #[test]
    fn claim_set_should_reject_an_unknown_player() {
        let state = select(&state_with(DeckMode::Finite, red_solid_ones(), 12, 69), &[0, 1, 2]);

        let result = state.claim_set(Some(3), &mut rng());

        assert_eq!(
            result,
            Err(GameError::from(IllegalTransition::UnknownPlayer(3)))
        );
    }

    #[test]
    fn draw_cards_should_move_cards_from_deck_to_board() {
        let state = state_with(DeckMode::Finite, red_solid_ones(), 12, 69);

        let next = state.draw_cards(3);

        assert_eq!(next.board().len(), 15);
        assert_eq!(next.deck().len(), 66);
        let drawn: Vec<Option<Card>> = state.deck()[66..].iter().copied().map(Some).collect();
        assert_eq!(next.board()[12..], drawn[..]);
    }

    #[test]
    fn draw_cards_should_not_grow_a_full_board() {
        let state = state_with(DeckMode::Finite, red_solid_ones(), MAX_BOARD_SIZE, 30);
        assert_eq!(state.draw_cards(3), state);
    }

    #[test]
    fn draw_cards_should_not_count_empty_slots_towards_the_cap() {
        let mut state = state_with(DeckMode::Finite, red_solid_ones(), MAX_BOARD_SIZE, 30);
        state.board[0] = None;
        state.board[1] = None;
        state.board[2] = None;

        let next = state.draw_cards(3);

        assert_eq!(next.occupied_count(), MAX_BOARD_SIZE);
        assert_eq!(next.board().len(), MAX_BOARD_SIZE + 3);
        assert_eq!(next.deck().len(), 27);
        assert_eq!(next.draw_cards(3), next);
    }

    #[test]
    fn draw_cards_should_not_draw_from_a_short_deck() {
        let state = state_with(DeckMode::Finite, red_solid_ones(), 12, 2);
        assert_eq!(state.draw_cards(3), state);
    }

    #[test]
    fn draw_until_set_should_stop_once_a_set_appears() {
        let board: Vec<Card> = no_set_cards().into_iter().take(BOARD_SIZE).collect();
        let state = state_with(DeckMode::Finite, board, 12, 69);
        assert!(!state.set_present());

        let next = state.draw_until_set();

        assert!(next.set_present());
        assert!(next.board().len() <= MAX_BOARD_SIZE);
        assert_eq!(next.board().len() + next.deck().len(), 81);
    }

    #[test]
    fn set_game_mode_to_infinite_should_fill_holes_from_a_fresh_deck() {
        let mut state = state_with(DeckMode::Finite, red_solid_ones(), 12, 0);
        state.board[0] = None;
        state.board[5] = None;

        let next = state.set_game_mode(DeckMode::Infinite, &mut rng());

        assert_eq!(next.mode(), DeckMode::Infinite);
        assert_eq!(next.occupied_count(), 12);
        assert_eq!(next.deck().len(), 81 - 10 - 2);
        assert_no_duplicates(&next);
        assert_eq!(next.set_present(), has_any_set(next.board()));
    }

    #[test]
    fn set_game_mode_to_finite_should_not_backfill() {
        let mut state = state_with(DeckMode::Infinite, red_solid_ones(), 12, 0);
        state.board[0] = None;

        let next = state.set_game_mode(DeckMode::Finite, &mut rng());

        assert_eq!(next.mode(), DeckMode::Finite);
        assert_eq!(next.occupied_count(), 11);
        assert!(next.deck().is_empty());
    }

    #[test]
    fn infinite_mode_should_never_leave_holes_after_a_claim() {
        let mut rng = rng();
        let mut state = GameState::new_game(DeckMode::Infinite, &mut rng).unwrap();
        for _ in 0..60 {
            state = state.draw_until_set();
            let Some(indices) = find_one_set(state.board()) else {
                break;
            };
            state = select(&state, &indices).claim_set(None, &mut rng).unwrap();
            assert_eq!(state.occupied_count(), state.board().len());
            assert!(state.deck().len() >= 3);
            assert_no_duplicates(&state);
        }
        assert!(state.players()[0].score() > 27);
    }

    #[test]
    fn finite_game_should_run_to_game_over() {
        let mut rng = rng();
        let mut state = GameState::new_game(DeckMode::Finite, &mut rng).unwrap();
        let mut claims = 0;
        while !state.is_game_over() {
            state = state.draw_until_set();
            match find_one_set(state.board()) {
                Some(indices) => {
                    state = select(&state, &indices).claim_set(None, &mut rng).unwrap();
                    claims += 1;
                }
                None => break,
            }
            assert!(claims <= 27);
        }
        assert!(state.is_game_over());
        assert_eq!(state.players()[0].score(), claims);
        assert_eq!(state.occupied_count() + 3 * claims as usize, 81);
    }

    #[test]
    fn restart_should_keep_roster_and_reset_scores() {
        let state = select(&state_with(DeckMode::Finite, red_solid_ones(), 12, 69), &[0, 1, 2])
            .rename_player(0, "Ada")
            .unwrap()
            .claim_set(None, &mut rng())
            .unwrap();

        let next = state.restart(DeckMode::Infinite, &mut rng()).unwrap();

        assert_eq!(next.mode(), DeckMode::Infinite);
        assert_eq!(next.players()[0].name(), "Ada");
        assert_eq!(next.players()[0].score(), 0);
        assert_eq!(next.deck().len(), 69);
    }

    #[test]
    fn roster_changes_should_follow_the_player_limits() {
        let mut state = GameState::new_game(DeckMode::Finite, &mut rng()).unwrap();
        for _ in 1..MAX_PLAYERS {
            state = state.add_player().unwrap();
        }
        assert_eq!(state.players().len(), MAX_PLAYERS);
        assert_eq!(state.players()[5].name(), "Player 6");
        assert_eq!(
            state.add_player(),
            Err(GameError::from(IllegalTransition::TooManyPlayers(MAX_PLAYERS)))
        );

        let state = state.delete_player(2).unwrap();
        assert!(state.player(2).is_none());
        assert_eq!(state.add_player().unwrap().players()[5].id(), 6);

        let solo = GameState::new_game(DeckMode::Finite, &mut rng()).unwrap();
        assert_eq!(
            solo.delete_player(0),
            Err(GameError::from(IllegalTransition::LastPlayer))
        );
        assert_eq!(
            solo.delete_player(9),
            Err(GameError::from(IllegalTransition::UnknownPlayer(9)))
        );
    }

    #[test]
    fn rename_and_penalty_should_target_one_player() {
        let state = GameState::new_game(DeckMode::Finite, &mut rng())
            .unwrap()
            .add_player()
            .unwrap();

        let next = state.rename_player(1, "Grace").unwrap().add_penalty(1).unwrap();

        assert_eq!(next.player(1).unwrap().name(), "Grace");
        assert_eq!(next.player(1).unwrap().penalties(), 1);
        assert_eq!(next.player(0).unwrap().penalties(), 0);
        assert_eq!(
            state.rename_player(1, "  "),
            Err(GameError::from(IllegalTransition::InvalidName))
        );
        assert_eq!(
            state.add_penalty(4),
            Err(GameError::from(IllegalTransition::UnknownPlayer(4)))
        );
    }

    #[test]
    fn debug_no_set_board_should_leave_no_set() {
        let state = GameState::new_game(DeckMode::Finite, &mut rng()).unwrap();

        let next = state.debug_no_set_board(&mut rng());

        assert_eq!(next.board().len(), 12);
        assert!(!next.set_present());
        assert!(!has_any_set(next.board()));
        assert_eq!(next.deck().len(), 69);
        assert_no_duplicates(&next);
    }
}
