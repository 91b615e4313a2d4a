// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator picks the best five card hand out of five to seven cards by
//! enumerating every five card subset, at most C(7,5) = 21, and keeping the
//! maximum under the hand rank key ordering. The key is the hand category
//! followed by the five card ranks in canonical order, so comparing two
//! [HandValue]s with `>` or `==` compares poker strength with full kicker
//! tie breaking. Suits never break ties.
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::cards::{Card, Rank};

/// The category of a five card poker hand, weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandRank {
    /// No pair, ranked by high cards.
    HighCard,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Five consecutive ranks, the ace plays low in the wheel.
    Straight,
    /// Five cards of one suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// A straight in one suit.
    StraightFlush,
    /// The ace high straight flush.
    RoyalFlush,
}

impl HandRank {
    /// The category display name.
    pub fn name(&self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        }
    }
}

/// The value of the best five card hand picked from five to seven cards.
#[derive(Debug, Clone)]
pub struct HandValue {
    rank: HandRank,
    hand: [Card; 5],
    key: [u8; 5],
}

impl HandValue {
    /// Evaluates the best five card hand out of the given cards.
    ///
    /// Panics unless given five to seven distinct cards, the engine deals
    /// from a single deck so duplicates cannot occur.
    pub fn eval(cards: &[Card]) -> HandValue {
        let n = cards.len();
        assert!((5..=7).contains(&n), "eval requires 5 to 7 cards");

        let mut best: Option<HandValue> = None;
        for c1 in 0..n - 4 {
            for c2 in c1 + 1..n - 3 {
                for c3 in c2 + 1..n - 2 {
                    for c4 in c3 + 1..n - 1 {
                        for c5 in c4 + 1..n {
                            let hv = Self::eval_five([
                                cards[c1], cards[c2], cards[c3], cards[c4], cards[c5],
                            ]);
                            if best.as_ref().map_or(true, |b| hv > *b) {
                                best = Some(hv);
                            }
                        }
                    }
                }
            }
        }

        best.expect("at least one five card subset")
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The five cards of the hand in canonical order.
    ///
    /// Made cards come first, quads then trips then pairs then kickers, each
    /// group by descending rank; straights run high to low with the wheel as
    /// `5 4 3 2 A`.
    pub fn hand(&self) -> &[Card; 5] {
        &self.hand
    }

    /// A display description of the hand ("Full House, Aces full of Kings").
    pub fn description(&self) -> String {
        let high = self.hand[0].rank().label();
        match self.rank {
            HandRank::HighCard => format!("High Card, {high}"),
            HandRank::OnePair => format!("One Pair, {}", plural(self.hand[0].rank())),
            HandRank::TwoPair => format!(
                "Two Pair, {} and {}",
                plural(self.hand[0].rank()),
                plural(self.hand[2].rank())
            ),
            HandRank::ThreeOfAKind => {
                format!("Three of a Kind, {}", plural(self.hand[0].rank()))
            }
            HandRank::Straight => format!("Straight, {high} high"),
            HandRank::Flush => format!("Flush, {high} high"),
            HandRank::FullHouse => format!(
                "Full House, {} full of {}",
                plural(self.hand[0].rank()),
                plural(self.hand[3].rank())
            ),
            HandRank::FourOfAKind => format!("Four of a Kind, {}", plural(self.hand[0].rank())),
            HandRank::StraightFlush => format!("Straight Flush, {high} high"),
            HandRank::RoyalFlush => "Royal Flush".to_string(),
        }
    }

    /// Evaluates exactly five cards.
    fn eval_five(mut hand: [Card; 5]) -> HandValue {
        hand.sort_by(|a, b| b.rank().cmp(&a.rank()));

        let flush = hand.iter().all(|c| c.suit() == hand[0].suit());

        let straight = hand
            .windows(2)
            .all(|w| w[0].rank().value() == w[1].rank().value() + 1);

        // The wheel A-5-4-3-2 reads 5-4-3-2-A with the ace low.
        let wheel = !straight
            && hand[0].rank() == Rank::Ace
            && hand[1].rank() == Rank::Five
            && hand[2].rank() == Rank::Four
            && hand[3].rank() == Rank::Trey
            && hand[4].rank() == Rank::Deuce;
        if wheel {
            hand = [hand[1], hand[2], hand[3], hand[4], hand[0]];
        }
        let straight = straight || wheel;

        // Rank frequencies indexed by rank value.
        let mut counts = [0u8; 15];
        for card in &hand {
            counts[card.rank().value() as usize] += 1;
        }

        let mut pairs = 0;
        let mut trips = false;
        let mut quads = false;
        for &n in counts.iter() {
            match n {
                2 => pairs += 1,
                3 => trips = true,
                4 => quads = true,
                _ => {}
            }
        }

        let rank = if flush && straight {
            if hand[0].rank() == Rank::Ace && hand[1].rank() == Rank::King {
                HandRank::RoyalFlush
            } else {
                HandRank::StraightFlush
            }
        } else if quads {
            HandRank::FourOfAKind
        } else if trips && pairs == 1 {
            HandRank::FullHouse
        } else if flush {
            HandRank::Flush
        } else if straight {
            HandRank::Straight
        } else if trips {
            HandRank::ThreeOfAKind
        } else if pairs == 2 {
            HandRank::TwoPair
        } else if pairs == 1 {
            HandRank::OnePair
        } else {
            HandRank::HighCard
        };

        // Canonical order groups made cards before kickers; for straights the
        // descending run is already canonical.
        if !straight {
            hand.sort_by(|a, b| {
                let ca = counts[a.rank().value() as usize];
                let cb = counts[b.rank().value() as usize];
                cb.cmp(&ca).then_with(|| b.rank().cmp(&a.rank()))
            });
        }

        let mut key = [0u8; 5];
        for (i, card) in hand.iter().enumerate() {
            key[i] = card.rank().value();
        }
        if wheel {
            key[4] = 1;
        }

        HandValue { rank, hand, key }
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.key == other.key
    }
}

impl Eq for HandValue {}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.key.cmp(&other.key))
    }
}

/// Pluralized rank name for descriptions.
fn plural(rank: Rank) -> String {
    match rank {
        Rank::Six => "Sixes".to_string(),
        _ => format!("{}s", rank.label()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;
    use rand::{rngs::StdRng, SeedableRng};

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn hand_str(hv: &HandValue) -> String {
        hv.hand()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn royal_flush() {
        let hv = HandValue::eval(&cards("Ah Kh Qh Jh Th 2c 3d"));
        assert_eq!(hv.rank(), HandRank::RoyalFlush);
        assert_eq!(hand_str(&hv), "Ah Kh Qh Jh Th");
        assert_eq!(hv.description(), "Royal Flush");
    }

    #[test]
    fn wheel_straight_flush() {
        let hv = HandValue::eval(&cards("As 2s 3s 4s 5s Kd Qd"));
        assert_eq!(hv.rank(), HandRank::StraightFlush);
        assert_eq!(hand_str(&hv), "5s 4s 3s 2s As");
        assert_eq!(hv.description(), "Straight Flush, Five high");
    }

    #[test]
    fn four_of_a_kind_kicker() {
        let hv = HandValue::eval(&cards("7h 7c 7d 7s 2h 3h Kh"));
        assert_eq!(hv.rank(), HandRank::FourOfAKind);
        assert_eq!(hand_str(&hv), "7h 7c 7d 7s Kh");
        assert_eq!(hv.description(), "Four of a Kind, Sevens");
    }

    #[test]
    fn full_house() {
        let hv = HandValue::eval(&cards("Ah Ad Ac Kh Kd 2s 3s"));
        assert_eq!(hv.rank(), HandRank::FullHouse);
        assert_eq!(hand_str(&hv), "Ah Ad Ac Kh Kd");
        assert_eq!(hv.description(), "Full House, Aces full of Kings");
    }

    #[test]
    fn wheel_straight() {
        let hv = HandValue::eval(&cards("Ah 2d 3c 4s 5h 9d Td"));
        assert_eq!(hv.rank(), HandRank::Straight);
        assert_eq!(hand_str(&hv), "5h 4s 3c 2d Ah");
        assert_eq!(hv.description(), "Straight, Five high");
    }

    #[test]
    fn two_pair_picks_best_pairs() {
        let hv = HandValue::eval(&cards("2h 2d 3c 3s 4h 4d 5s"));
        assert_eq!(hv.rank(), HandRank::TwoPair);
        assert_eq!(hand_str(&hv), "4h 4d 3c 3s 5s");
        assert_eq!(hv.description(), "Two Pair, Fours and Treys");

        // Any lower two pair selection from the same cards loses.
        let lower = HandValue::eval_five(cards("3c 3s 2h 2d 5s").try_into().unwrap());
        assert!(hv > lower);
    }

    #[test]
    fn wheel_is_the_lowest_straight() {
        let wheel = HandValue::eval(&cards("Ah 2d 3c 4s 5h 9d Td"));
        let six_high = HandValue::eval(&cards("2h 3d 4c 5s 6h 9d Td"));
        assert_eq!(wheel.rank(), HandRank::Straight);
        assert_eq!(six_high.rank(), HandRank::Straight);
        assert!(six_high > wheel);
    }

    #[test]
    fn kickers_break_ties() {
        let king = HandValue::eval(&cards("Ah Ad Kc 5s 3h"));
        let queen = HandValue::eval(&cards("As Ac Qd 5c 3d"));
        assert!(king > queen);

        // Suits never do.
        let a = HandValue::eval(&cards("Ah Ad Kc 5s 3h"));
        let b = HandValue::eval(&cards("As Ac Kd 5c 3d"));
        assert_eq!(a, b);
    }

    #[test]
    fn categories_are_monotone() {
        let hands = [
            "Ah Kd 9c 5s 3h",
            "2h 2d 5c 7s 9h",
            "2h 2d 3c 3s 9h",
            "2h 2d 2c 5s 7h",
            "6h 5d 4c 3s 2h",
            "2h 5h 7h 9h Jh",
            "2h 2d 2c 3s 3h",
            "2h 2d 2c 2s 3h",
            "6h 5h 4h 3h 2h",
            "Ah Kh Qh Jh Th",
        ];

        let values = hands
            .iter()
            .map(|h| HandValue::eval(&cards(h)))
            .collect::<Vec<_>>();

        for pair in values.windows(2) {
            assert!(pair[1].rank() > pair[0].rank());
            assert!(pair[1] > pair[0], "{:?} <= {:?}", pair[1], pair[0]);
        }
    }

    #[test]
    fn eval_is_max_over_subsets() {
        let mut rng = StdRng::seed_from_u64(2357);

        for _ in 0..200 {
            let mut deck = Deck::new_and_shuffled(&mut rng);
            let seven = (0..7).map(|_| deck.deal()).collect::<Vec<_>>();

            let best = HandValue::eval(&seven);

            let mut brute: Option<HandValue> = None;
            for c1 in 0..3 {
                for c2 in c1 + 1..4 {
                    for c3 in c2 + 1..5 {
                        for c4 in c3 + 1..6 {
                            for c5 in c4 + 1..7 {
                                let hv = HandValue::eval_five([
                                    seven[c1], seven[c2], seven[c3], seven[c4], seven[c5],
                                ]);
                                assert!(best >= hv);
                                if brute.as_ref().map_or(true, |b| hv > *b) {
                                    brute = Some(hv);
                                }
                            }
                        }
                    }
                }
            }

            assert_eq!(best, brute.unwrap());
        }
    }

    #[test]
    fn five_and_six_card_inputs() {
        let hv = HandValue::eval(&cards("2h 5d 7c 9s Jh"));
        assert_eq!(hv.rank(), HandRank::HighCard);
        assert_eq!(hand_str(&hv), "Jh 9s 7c 5d 2h");

        let hv = HandValue::eval(&cards("2h 5d 7c 9s Jh Jd"));
        assert_eq!(hv.rank(), HandRank::OnePair);
        assert_eq!(hand_str(&hv), "Jh Jd 9s 7c 5d");
    }
}
