// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use rand::{seq::SliceRandom, Rng};
use serde::{
    de::{self, Deserializer},
    ser::{SerializeStruct, Serializer},
    Deserialize, Serialize,
};
use std::{fmt, str::FromStr};

/// A Poker card.
///
/// A card is a rank and suit pair, displayed in the two character short form
/// used on the wire, rank first (`As`, `Kh`, `Td`, `2c`).
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a card given a rank and suit.
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(r), Some(u), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseCardError(s.to_string()));
        };

        let rank = Rank::ranks()
            .find(|rank| rank.letter() == r.to_ascii_uppercase())
            .ok_or_else(|| ParseCardError(s.to_string()))?;
        let suit = Suit::suits()
            .find(|suit| suit.letter() == u.to_ascii_lowercase())
            .ok_or_else(|| ParseCardError(s.to_string()))?;

        Ok(Card::new(rank, suit))
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Card", 3)?;
        st.serialize_field("rank", self.rank.name())?;
        st.serialize_field("suit", self.suit.name())?;
        st.serialize_field("display", &self.to_string())?;
        st.end()
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Repr {
            rank: String,
            suit: String,
        }

        let repr = Repr::deserialize(deserializer)?;
        let rank = Rank::ranks()
            .find(|r| r.name() == repr.rank)
            .ok_or_else(|| de::Error::custom(format!("invalid card rank {:?}", repr.rank)))?;
        let suit = Suit::suits()
            .find(|s| s.name() == repr.suit)
            .ok_or_else(|| de::Error::custom(format!("invalid card suit {:?}", repr.suit)))?;

        Ok(Card::new(rank, suit))
    }
}

/// Error returned when parsing an invalid card short form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid card {0:?}")]
pub struct ParseCardError(String);

/// Card rank.
///
/// Ranks are ordered by strength with the ace high; the ace also plays low in
/// the five high straight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Deuce
    Deuce = 2,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// The rank numeric value, 2 to 14 with the ace high.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// The rank short form letter.
    pub fn letter(&self) -> char {
        match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    /// The rank long name used in the wire encoding.
    pub fn name(&self) -> &'static str {
        match self {
            Rank::Deuce => "deuce",
            Rank::Trey => "trey",
            Rank::Four => "four",
            Rank::Five => "five",
            Rank::Six => "six",
            Rank::Seven => "seven",
            Rank::Eight => "eight",
            Rank::Nine => "nine",
            Rank::Ten => "ten",
            Rank::Jack => "jack",
            Rank::Queen => "queen",
            Rank::King => "king",
            Rank::Ace => "ace",
        }
    }

    /// The rank name used in hand descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            Rank::Deuce => "Deuce",
            Rank::Trey => "Trey",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Card suit.
///
/// Suits have no ordering, they only matter for flush detection and never
/// break ties.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Suit {
    /// Clubs suit.
    Clubs,
    /// Diamonds suit.
    Diamonds,
    /// Hearts suit.
    Hearts,
    /// Spades suit.
    Spades,
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }

    /// The suit short form letter.
    pub fn letter(&self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    /// The suit long name used in the wire encoding.
    pub fn name(&self) -> &'static str {
        match self {
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
            Suit::Hearts => "hearts",
            Suit::Spades => "spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A cards deck with a draw cursor.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.shuffle(rng);
        deck
    }

    /// Shuffles the deck and resets the draw cursor.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.next = 0;
    }

    /// Deals the next card from the deck.
    ///
    /// Panics if the deck is exhausted, a hand never deals more than
    /// seventeen cards.
    pub fn deal(&mut self) -> Card {
        let card = self.cards[self.next];
        self.next += 1;
        card
    }

    /// Number of cards left in the deck.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards, next: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn deck_has_all_cards() {
        let mut deck = Deck::new_and_shuffled(&mut rand::thread_rng());
        assert_eq!(deck.remaining(), Deck::SIZE);

        let mut cards = HashSet::default();
        while deck.remaining() > 0 {
            cards.insert(deck.deal());
        }

        // Check uniquness.
        assert_eq!(cards.len(), Deck::SIZE);
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn deck_determinism() {
        let mut d1 = Deck::new_and_shuffled(&mut StdRng::seed_from_u64(777));
        let mut d2 = Deck::new_and_shuffled(&mut StdRng::seed_from_u64(777));

        for _ in 0..Deck::SIZE {
            assert_eq!(d1.deal(), d2.deal());
        }
    }

    #[test]
    fn shuffle_resets_cursor() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut deck = Deck::new_and_shuffled(&mut rng);
        for _ in 0..17 {
            deck.deal();
        }
        assert_eq!(deck.remaining(), Deck::SIZE - 17);

        deck.shuffle(&mut rng);
        assert_eq!(deck.remaining(), Deck::SIZE);
    }

    #[test]
    fn card_to_string() {
        let c = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(c.to_string(), "Kd");

        let c = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(c.to_string(), "5s");

        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.to_string(), "Th");

        let c = Card::new(Rank::Ace, Suit::Clubs);
        assert_eq!(c.to_string(), "Ac");
    }

    #[test]
    fn card_from_str() {
        let c = "As".parse::<Card>().unwrap();
        assert_eq!(c, Card::new(Rank::Ace, Suit::Spades));

        let c = "2c".parse::<Card>().unwrap();
        assert_eq!(c, Card::new(Rank::Deuce, Suit::Clubs));

        // Case is forgiven both ways.
        let c = "tH".parse::<Card>().unwrap();
        assert_eq!(c, Card::new(Rank::Ten, Suit::Hearts));

        assert!("".parse::<Card>().is_err());
        assert!("A".parse::<Card>().is_err());
        assert!("1s".parse::<Card>().is_err());
        assert!("Ax".parse::<Card>().is_err());
        assert!("Ass".parse::<Card>().is_err());
    }

    #[test]
    fn card_json_encoding() {
        let c = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(
            serde_json::to_string(&c).unwrap(),
            r#"{"rank":"ace","suit":"spades","display":"As"}"#
        );

        let c = Card::new(Rank::Deuce, Suit::Hearts);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(serde_json::from_str::<Card>(&json).unwrap(), c);

        assert!(serde_json::from_str::<Card>(r#"{"rank":"one","suit":"spades"}"#).is_err());
    }
}
