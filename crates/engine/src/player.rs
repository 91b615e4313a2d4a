// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table player types.
use serde::{Deserialize, Serialize};
use std::fmt;

use offsuit_eval::Card;

use crate::chips::Chips;

/// A player identifier assigned by the integrator.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(u64);

impl PlayerId {
    /// Creates a player id with the given value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The integer value of this id.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A table player state.
#[derive(Debug, Clone)]
pub struct Player {
    /// The player id.
    pub player_id: PlayerId,
    /// The player display name.
    pub name: String,
    /// The player chips stack.
    pub chips: Chips,
    /// The seat index, stable for the lifetime of the table.
    pub seat: usize,
    /// The player hole cards, dealt at hand start.
    pub hole_cards: Option<(Card, Card)>,
    /// The player bet on the current street.
    pub street_bet: Chips,
    /// The player total bet in the current hand.
    pub hand_bet: Chips,
    /// The player has acted since the last full raise on this street.
    pub has_acted: bool,
    /// The player has acted at least once on this street.
    ///
    /// Unlike `has_acted` this is not cleared when a raise reopens the
    /// action; it decides whether a short all-in leaves the player with a
    /// call as their only way to stay in.
    pub acted_this_street: bool,
    /// The player has folded the current hand.
    pub folded: bool,
    /// The player has committed the whole stack.
    pub all_in: bool,
    /// The player was dealt into the current hand.
    pub in_hand: bool,
    /// The player sits out of the next hands.
    pub sitting_out: bool,
}

impl Player {
    /// Creates a new player at the given seat.
    pub(crate) fn new(player_id: PlayerId, name: String, chips: Chips, seat: usize) -> Self {
        Self {
            player_id,
            name,
            chips,
            seat,
            hole_cards: None,
            street_bet: Chips::ZERO,
            hand_bet: Chips::ZERO,
            has_acted: false,
            acted_this_street: false,
            folded: false,
            all_in: false,
            in_hand: false,
            sitting_out: false,
        }
    }

    /// Moves up to `amount` chips from the stack into the current bets.
    ///
    /// A player who pays the whole stack is all-in. Returns the chips
    /// actually paid.
    pub(crate) fn pay(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.street_bet += paid;
        self.hand_bet += paid;

        if self.chips == Chips::ZERO {
            self.all_in = true;
            self.has_acted = true;
        }

        paid
    }

    /// Sets this player in fold state.
    pub(crate) fn fold(&mut self) {
        self.folded = true;
        self.has_acted = true;
        self.hole_cards = None;
    }

    /// Resets state for a new hand, a player sits in with chips.
    pub(crate) fn start_hand(&mut self) {
        self.in_hand = self.chips > Chips::ZERO && !self.sitting_out;
        self.folded = false;
        self.all_in = false;
        self.has_acted = false;
        self.acted_this_street = false;
        self.street_bet = Chips::ZERO;
        self.hand_bet = Chips::ZERO;
        self.hole_cards = None;
    }

    /// Resets the per street state when a new street starts.
    pub(crate) fn start_street(&mut self) {
        self.street_bet = Chips::ZERO;
        self.has_acted = false;
        self.acted_this_street = false;
    }

    /// The player still contends for the pot.
    pub(crate) fn is_live(&self) -> bool {
        self.in_hand && !self.folded
    }

    /// The player can act on the current street.
    pub(crate) fn can_act(&self) -> bool {
        self.in_hand && !self.folded && !self.all_in
    }
}

/// The table seats, ordered by seat index.
#[derive(Debug, Default)]
pub(crate) struct Seats {
    players: Vec<Player>,
}

impl Seats {
    /// Seats a new player at the lowest free seat, returns the seat index.
    pub fn add(&mut self, player_id: PlayerId, name: String, chips: Chips) -> usize {
        let seat = (0..).find(|s| !self.players.iter().any(|p| p.seat == *s)).unwrap();
        let pos = self
            .players
            .iter()
            .position(|p| p.seat > seat)
            .unwrap_or(self.players.len());
        self.players.insert(pos, Player::new(player_id, name, chips, seat));
        seat
    }

    /// Removes a player from the table.
    pub fn remove(&mut self, player_id: PlayerId) -> Option<Player> {
        self.players
            .iter()
            .position(|p| p.player_id == player_id)
            .map(|pos| self.players.remove(pos))
    }

    /// Returns the player with the given id.
    pub fn get(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    /// Returns the mutable player with the given id.
    pub fn get_mut(&mut self, player_id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.player_id == player_id)
    }

    /// Returns the position of the given id in seat order.
    pub fn position(&self, player_id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.player_id == player_id)
    }

    /// Returns the player at the given position.
    pub fn player(&self, pos: usize) -> &Player {
        &self.players[pos]
    }

    /// Returns the mutable player at the given position.
    pub fn player_mut(&mut self, pos: usize) -> &mut Player {
        &mut self.players[pos]
    }

    /// Returns an iterator over the players in seat order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Returns a mutable iterator over the players in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// The number of seated players.
    pub fn count(&self) -> usize {
        self.players.len()
    }

    /// The number of players still contending for the pot.
    pub fn count_live(&self) -> usize {
        self.players.iter().filter(|p| p.is_live()).count()
    }

    /// The number of players who can act on the current street.
    pub fn count_can_act(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    /// The number of players who would be dealt into a new hand.
    pub fn count_ready(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.chips > Chips::ZERO && !p.sitting_out)
            .count()
    }

    /// Position of the first player matching `pred` seated clockwise after
    /// the given seat, wrapping around the table.
    pub fn next_from_seat<F>(&self, seat: usize, pred: F) -> Option<usize>
    where
        F: Fn(&Player) -> bool,
    {
        let n = self.players.len();
        if n == 0 {
            return None;
        }

        let start = self
            .players
            .iter()
            .position(|p| p.seat > seat)
            .unwrap_or(0);

        (0..n)
            .map(|i| (start + i) % n)
            .find(|&pos| pred(&self.players[pos]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(ids: &[u64]) -> Seats {
        let mut seats = Seats::default();
        for id in ids {
            seats.add(PlayerId::new(*id), format!("P{id}"), Chips::new(1_000));
        }
        seats
    }

    #[test]
    fn seats_are_stable() {
        let mut seats = seats(&[1, 2, 3]);
        assert_eq!(seats.get(PlayerId::new(2)).unwrap().seat, 1);

        // Removing a player leaves other seats untouched, the freed seat is
        // reused by the next player.
        seats.remove(PlayerId::new(2)).unwrap();
        assert_eq!(seats.get(PlayerId::new(3)).unwrap().seat, 2);

        let seat = seats.add(PlayerId::new(4), "P4".to_string(), Chips::new(1_000));
        assert_eq!(seat, 1);
        assert_eq!(seats.count(), 3);

        // Players iterate in seat order.
        let order = seats.iter().map(|p| p.seat).collect::<Vec<_>>();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn next_from_seat_wraps() {
        let mut seats = seats(&[1, 2, 3]);
        for p in seats.iter_mut() {
            p.start_hand();
        }

        assert_eq!(seats.next_from_seat(0, Player::can_act), Some(1));
        assert_eq!(seats.next_from_seat(2, Player::can_act), Some(0));

        seats.get_mut(PlayerId::new(1)).unwrap().fold();
        assert_eq!(seats.next_from_seat(2, Player::can_act), Some(1));
        assert_eq!(seats.player(1).player_id, PlayerId::new(2));
    }

    #[test]
    fn pay_caps_at_stack() {
        let mut player = Player::new(PlayerId::new(1), "P1".to_string(), Chips::new(100), 0);
        player.start_hand();

        assert_eq!(player.pay(Chips::new(60)), Chips::new(60));
        assert_eq!(player.chips, Chips::new(40));
        assert!(!player.all_in);

        // Paying past the stack goes all-in for the remainder.
        assert_eq!(player.pay(Chips::new(100)), Chips::new(40));
        assert_eq!(player.chips, Chips::ZERO);
        assert!(player.all_in);
        assert!(player.has_acted);
        assert_eq!(player.hand_bet, Chips::new(100));
    }
}
