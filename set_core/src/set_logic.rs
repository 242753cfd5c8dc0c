use std::collections::HashSet;

use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};

use crate::card::Card;

/// Anything a set search can scan: a plain card, or a board slot that may be empty.
pub trait CardSlot {
    fn card(&self) -> Option<&Card>;
}

impl CardSlot for Card {
    fn card(&self) -> Option<&Card> {
        Some(self)
    }
}

impl CardSlot for Option<Card> {
    fn card(&self) -> Option<&Card> {
        self.as_ref()
    }
}

/// Every attribute must be all the same or all different across the three cards.
pub fn is_set(a: &Card, b: &Card, c: &Card) -> bool {
    let (a, b, c) = (a.attributes(), b.attributes(), c.attributes());
    (0..4).all(|i| matches!([a[i], b[i], c[i]].iter().unique().count(), 1 | 3))
}

/// Like [`is_set`], but fails closed: fewer or more than three slots, or any
/// empty slot, is never a set.
pub fn is_set_slots<S: CardSlot>(slots: &[S]) -> bool {
    match slots {
        [a, b, c] => match (a.card(), b.card(), c.card()) {
            (Some(a), Some(b), Some(c)) => is_set(a, b, c),
            _ => false,
        },
        _ => false,
    }
}

// Triples i < j < k of occupied slots forming a set, in lexicographic order.
fn set_triples<'a, S: CardSlot>(cards: &'a [S]) -> impl Iterator<Item = [usize; 3]> + 'a {
    cards
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| slot.card().map(|card| (i, card)))
        .tuple_combinations()
        .filter(|((_, a), (_, b), (_, c))| is_set(a, b, c))
        .map(|((i, _), (j, _), (k, _))| [i, j, k])
}

pub fn count_sets<S: CardSlot>(cards: &[S]) -> usize {
    set_triples(cards).count()
}

pub fn find_one_set<S: CardSlot>(cards: &[S]) -> Option<[usize; 3]> {
    set_triples(cards).next()
}

pub fn find_all_sets<S: CardSlot>(cards: &[S]) -> Vec<[usize; 3]> {
    set_triples(cards).collect()
}

pub fn has_any_set<S: CardSlot>(cards: &[S]) -> bool {
    find_one_set(cards).is_some()
}

pub fn generate_shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut deck = Card::deck();
    deck.shuffle(rng);
    deck
}

/// A fresh shuffled deck without the cards currently lying on `board`.
pub fn generate_deck_excluding<R, S>(rng: &mut R, board: &[S]) -> Vec<Card>
where
    R: Rng + ?Sized,
    S: CardSlot,
{
    let on_board: HashSet<&Card> = board.iter().filter_map(CardSlot::card).collect();
    let mut deck = Card::deck()
        .into_iter()
        .filter(|card| !on_board.contains(card))
        .collect_vec();
    deck.shuffle(rng);
    deck
}

/// The 16 cards built only from the first two values of every attribute.
///
/// A set needs each attribute to be uniform or to use all three values, so
/// three distinct cards from this collection can never form one.
pub fn no_set_cards() -> Vec<Card> {
    Card::deck()
        .into_iter()
        .filter(|card| card.attributes().iter().all(|&value| value < 2))
        .collect()
}
