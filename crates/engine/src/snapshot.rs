// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Public table state projections.
use serde::Serialize;

use offsuit_eval::{Card, HandRank};

use crate::{action::Street, chips::Chips, player::PlayerId};

/// A read-only projection of the table state.
///
/// The snapshot only carries public information, hole cards are queried
/// separately per identity. Field names serialize in camelCase, the table
/// wire format.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSnapshot {
    /// The seated players in seat order.
    pub players: Vec<PlayerSnapshot>,
    /// The player who must act, None when no hand is running.
    pub current_player_id: Option<PlayerId>,
    /// The dealer seat.
    pub dealer_seat: usize,
    /// The chips in the pot.
    pub pot: Chips,
    /// The bet to match on the current street.
    pub current_bet: Chips,
    /// The minimum raise increment.
    pub min_raise: Chips,
    /// The community cards.
    pub community_cards: Vec<Card>,
    /// The current betting round.
    pub betting_round: Street,
    /// The hand has finished.
    pub hand_complete: bool,
    /// The hand winners, set when the hand completes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub winners: Vec<Winner>,
    /// The hand number, starts at one.
    pub hand_number: u64,
    /// The side pots, present when a player is all-in.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub side_pots: Vec<SidePot>,
}

/// The public state of a seated player.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    /// The player id.
    pub id: PlayerId,
    /// The player display name.
    pub name: String,
    /// The player stack.
    pub chips: Chips,
    /// The player bet on the current street.
    pub current_bet: Chips,
    /// The player has folded.
    pub is_folded: bool,
    /// The player is all-in.
    pub is_all_in: bool,
    /// The player was dealt into the current hand.
    pub is_active: bool,
    /// The player seat.
    pub seat_position: usize,
    /// The player has acted on the current street.
    pub has_acted: bool,
}

/// A hand winner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    /// The winning player.
    pub player_id: PlayerId,
    /// The chips won.
    pub amount: Chips,
    /// The winning hand category, None when everyone else folded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand_rank: Option<HandRank>,
    /// The five winning cards, empty when everyone else folded.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub best_hand: Vec<Card>,
    /// A display description of the win.
    pub description: String,
}

/// A pot contested by a subset of the players.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidePot {
    /// The pot amount.
    pub amount: Chips,
    /// The players eligible for this pot, in id order.
    pub eligible_players: Vec<PlayerId>,
}
