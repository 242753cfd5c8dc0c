use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    str::FromStr,
};

use itertools::Itertools;
use log::debug;
use rand::Rng;
use set_core::{
    game_state::DRAW_COUNT,
    set_logic::{count_sets, find_one_set, is_set},
    DeckMode, GameState, PlayerId,
};

use crate::settings::{NoSetHandling, Settings};

static RULES: &str = "
*** Set ***
Every card has four attributes: shape, color, fill and count, each taking one of three values.
Three cards form a set when every attribute is either the same on all three cards or different on all three.
Twelve cards are dealt. Find a set, pick its three cards by their numbers and score it. If nobody can find one,
draw three more cards. With a finite deck the game ends when the deck is empty and no set is left on the board.
With an infinite deck the cards never run out.";

#[derive(Debug, PartialEq)]
enum CliAction {
    Quit,
    Rules,
    Draw,
    ToggleSetCount,
    ShowSet,
    Clear,
    NewGame,
    SwitchMode,
    AddPlayer,
    Card(usize),
}

#[derive(Debug, PartialEq, Eq)]
struct ParseActionError;

impl CliAction {
    fn info(&self) -> String {
        match self {
            CliAction::Quit => "quit".to_string(),
            CliAction::Rules => "display rules".to_string(),
            CliAction::Draw => format!("draw {DRAW_COUNT} cards"),
            CliAction::ToggleSetCount => "show or hide the number of sets".to_string(),
            CliAction::ShowSet => "show one set".to_string(),
            CliAction::Clear => "clear selection".to_string(),
            CliAction::NewGame => "new game".to_string(),
            CliAction::SwitchMode => "switch between finite and infinite deck".to_string(),
            CliAction::AddPlayer => "add a player".to_string(),
            CliAction::Card(_) => "select or deselect a card".to_string(),
        }
    }

    fn cmd_str(&self) -> String {
        match self {
            CliAction::Quit => "q".to_string(),
            CliAction::Rules => "r".to_string(),
            CliAction::Draw => "d".to_string(),
            CliAction::ToggleSetCount => "h".to_string(),
            CliAction::ShowSet => "s".to_string(),
            CliAction::Clear => "c".to_string(),
            CliAction::NewGame => "n".to_string(),
            CliAction::SwitchMode => "m".to_string(),
            CliAction::AddPlayer => "p".to_string(),
            CliAction::Card(_) => "0-20".to_string(),
        }
    }

    fn menu() -> Vec<CliAction> {
        vec![
            CliAction::Card(0),
            CliAction::Draw,
            CliAction::ToggleSetCount,
            CliAction::ShowSet,
            CliAction::Clear,
            CliAction::NewGame,
            CliAction::SwitchMode,
            CliAction::AddPlayer,
            CliAction::Rules,
            CliAction::Quit,
        ]
    }
}

impl FromStr for CliAction {
    type Err = ParseActionError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "q" => Ok(CliAction::Quit),
            "r" => Ok(CliAction::Rules),
            "d" => Ok(CliAction::Draw),
            "h" => Ok(CliAction::ToggleSetCount),
            "s" => Ok(CliAction::ShowSet),
            "c" => Ok(CliAction::Clear),
            "n" => Ok(CliAction::NewGame),
            "m" => Ok(CliAction::SwitchMode),
            "p" => Ok(CliAction::AddPlayer),
            other => usize::from_str(other)
                .map(CliAction::Card)
                .map_err(|_| ParseActionError),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Reply {
    Quit,
    Message(String),
    Silent,
    /// Three cards forming a set are selected and more than one player could claim them.
    ChooseClaimant,
}

pub struct CliGame<R: Rng> {
    state: GameState,
    settings: Settings,
    settings_path: PathBuf,
    show_set_count: bool,
    rng: R,
}

impl<R: Rng> CliGame<R> {
    pub fn new(settings: Settings, settings_path: PathBuf, mut rng: R) -> anyhow::Result<Self> {
        let state = GameState::new_game(settings.deck_mode, &mut rng)?;
        Ok(CliGame {
            show_set_count: settings.sticky_set_count,
            state,
            settings,
            settings_path,
            rng,
        })
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        println!("{RULES}");
        loop {
            self.print_board();
            let Some(action) = query_user(&CliAction::menu())? else {
                return Ok(());
            };
            match self.apply(action)? {
                Reply::Quit => return Ok(()),
                Reply::Message(text) => println!("{text}"),
                Reply::Silent => {}
                Reply::ChooseClaimant => {
                    let text = match self.prompt_claimant()? {
                        Some(id) => self.claim(Some(id))?,
                        None => {
                            self.state = self.state.clear_selection();
                            "Claim cancelled.".to_string()
                        }
                    };
                    println!("{text}");
                }
            }
        }
    }

    fn apply(&mut self, action: CliAction) -> anyhow::Result<Reply> {
        let reply = match action {
            CliAction::Quit => Reply::Quit,
            CliAction::Rules => Reply::Message(RULES.to_string()),
            CliAction::Draw => {
                let next = self.state.draw_cards(DRAW_COUNT);
                if next == self.state {
                    Reply::Message("No more cards can be drawn.".to_string())
                } else {
                    self.state = next;
                    Reply::Silent
                }
            }
            CliAction::ToggleSetCount => {
                self.show_set_count = !self.show_set_count;
                Reply::Silent
            }
            CliAction::ShowSet => match find_one_set(self.state.board()) {
                Some(indices) => Reply::Message(format!(
                    "Try {}.",
                    indices.iter().map(|i| i.to_string()).join(", ")
                )),
                None => Reply::Message("There is no set on the board.".to_string()),
            },
            CliAction::Clear => {
                self.state = self.state.clear_selection();
                Reply::Silent
            }
            CliAction::NewGame => {
                self.state = self.state.restart(self.settings.deck_mode, &mut self.rng)?;
                self.show_set_count = self.settings.sticky_set_count;
                Reply::Message(format!("New {} game.", self.settings.deck_mode))
            }
            CliAction::SwitchMode => {
                let mode = match self.state.mode() {
                    DeckMode::Finite => DeckMode::Infinite,
                    DeckMode::Infinite => DeckMode::Finite,
                };
                self.state = self.state.set_game_mode(mode, &mut self.rng);
                self.settings.deck_mode = mode;
                self.settings.save(&self.settings_path)?;
                Reply::Message(format!("Switched to the {mode} deck."))
            }
            CliAction::AddPlayer => match self.state.add_player() {
                Ok(next) => {
                    self.state = next;
                    Reply::Silent
                }
                Err(err) => Reply::Message(err.to_string()),
            },
            CliAction::Card(index) => self.select(index)?,
        };
        Ok(reply)
    }

    fn select(&mut self, index: usize) -> anyhow::Result<Reply> {
        self.state = self.state.select_card(index);
        let Some([a, b, c]) = self.state.selected_cards() else {
            return Ok(Reply::Silent);
        };
        if !is_set(&a, &b, &c) {
            self.state = self.state.clear_selection();
            return Ok(Reply::Message("Not a set!".to_string()));
        }
        if self.state.players().len() > 1 {
            return Ok(Reply::ChooseClaimant);
        }
        Ok(Reply::Message(self.claim(None)?))
    }

    fn claim(&mut self, player: Option<PlayerId>) -> anyhow::Result<String> {
        self.state = self.state.claim_set(player, &mut self.rng)?;
        if !self.settings.sticky_set_count {
            self.show_set_count = false;
        }
        let mut text = "Set!".to_string();
        if self.state.is_game_over() {
            if let Some(winner) = self.state.leading_player() {
                text = format!("Set! Game over, {} wins with {}.", winner.name(), winner.score());
            }
            return Ok(text);
        }
        if !self.state.set_present() {
            match self.settings.handle_no_sets {
                NoSetHandling::AutoAdd => {
                    self.state = self.state.draw_until_set();
                    debug!("drew up to {} cards", self.state.board().len());
                }
                NoSetHandling::Hint => {
                    text.push_str(" There is no set on the board, draw more cards with d.");
                }
                NoSetHandling::Off => {}
            }
        }
        Ok(text)
    }

    fn prompt_claimant(&self) -> anyhow::Result<Option<PlayerId>> {
        println!("\nWho found the set? [c] cancels");
        loop {
            for player in self.state.players() {
                println!("- [{}]: {}", player.id(), player.name());
            }
            print!(">");
            io::stdout().flush()?;
            let Some(line) = io::stdin().lock().lines().next() else {
                return Ok(None);
            };
            let line = line?;
            if line.trim() == "c" {
                return Ok(None);
            }
            if let Ok(id) = PlayerId::from_str(line.trim()) {
                if self.state.player(id).is_some() {
                    return Ok(Some(id));
                }
            }
        }
    }

    fn print_board(&self) {
        println!("================================================");
        for (index, slot) in self.state.board().iter().enumerate() {
            let marker = if self.state.selection().contains(&index) {
                '*'
            } else {
                ' '
            };
            match slot {
                Some(card) => println!("{marker}[{index:>2}] {card}"),
                None => println!(" [{index:>2}] ---"),
            }
        }
        let deck = match self.state.mode() {
            DeckMode::Finite => self.state.deck().len().to_string(),
            DeckMode::Infinite => "∞".to_string(),
        };
        println!("Deck: {deck}");
        if self.show_set_count {
            println!("Sets on board: {}", count_sets(self.state.board()));
        }
        let scores = self
            .state
            .players()
            .iter()
            .map(|p| format!("{}: {}", p.name(), p.score()))
            .join(" | ");
        println!("{scores}");
    }
}

fn query_user(cmds: &[CliAction]) -> anyhow::Result<Option<CliAction>> {
    loop {
        for cmd in cmds {
            println!("- [{}]: {}", cmd.cmd_str(), cmd.info());
        }
        print!(">");
        io::stdout().flush()?;
        let Some(line) = io::stdin().lock().lines().next() else {
            return Ok(None);
        };
        if let Ok(action) = CliAction::from_str(&line?) {
            return Ok(Some(action));
        }
    }
}
