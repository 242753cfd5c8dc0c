use std::fmt;

use itertools::iproduct;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord, Display, EnumIter, EnumString,
    Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Diamond,
    Oval,
    Squiggle,
}

#[derive(
    Debug, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord, Display, EnumIter, EnumString,
    Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Purple,
}

#[derive(
    Debug, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord, Display, EnumIter, EnumString,
    Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    Solid,
    Striped,
    Open,
}

#[derive(
    Debug, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord, Display, EnumIter, EnumString,
    Serialize, Deserialize,
)]
pub enum Count {
    #[strum(serialize = "1")]
    One,
    #[strum(serialize = "2")]
    Two,
    #[strum(serialize = "3")]
    Three,
}

impl Count {
    pub fn value(&self) -> u8 {
        *self as u8 + 1
    }
}

/// A single card. Cards carry no identity beyond their four attributes.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct Card {
    pub shape: Shape,
    pub color: Color,
    pub fill: Fill,
    pub count: Count,
}

impl Card {
    pub const fn new(shape: Shape, color: Color, fill: Fill, count: Count) -> Self {
        Card {
            shape,
            color,
            fill,
            count,
        }
    }

    /// All 81 cards, ordered by shape, then color, then fill, then count.
    pub fn deck() -> Vec<Card> {
        iproduct!(Shape::iter(), Color::iter(), Fill::iter(), Count::iter())
            .map(|(shape, color, fill, count)| Card::new(shape, color, fill, count))
            .collect()
    }

    /// The four attribute values as indices into their domains (0..3).
    pub fn attributes(&self) -> [u8; 4] {
        [
            self.shape as u8,
            self.color as u8,
            self.fill as u8,
            self.count as u8,
        ]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.count == Count::One { "" } else { "s" };
        write!(
            f,
            "{} {} {} {}{}",
            self.count, self.color, self.fill, self.shape, plural
        )
    }
}
