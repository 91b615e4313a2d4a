// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pot construction.
//!
//! Pots are layered by contribution level. Every all-in level among the live
//! players caps a layer, the overall maximum contribution caps the last one.
//! Folded players fund the layers up to their contribution but are never
//! eligible to win them.
use ahash::AHashSet;

use crate::{chips::Chips, player::Player, player::PlayerId};

/// A pot and the players eligible to win it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pot {
    /// The pot amount.
    pub chips: Chips,
    /// The players contesting this pot.
    pub players: AHashSet<PlayerId>,
}

/// Builds the main pot and the ordered side pots from the players total hand
/// contributions.
///
/// The sum of the returned pots equals the sum of the contributions, and
/// eligibility sets never grow from one pot to the next.
pub(crate) fn build_pots<'a>(players: impl Iterator<Item = &'a Player>) -> Vec<Pot> {
    let entries = players
        .filter(|p| p.hand_bet > Chips::ZERO)
        .collect::<Vec<_>>();

    let max_bet = entries
        .iter()
        .map(|p| p.hand_bet)
        .max()
        .unwrap_or(Chips::ZERO);
    if max_bet == Chips::ZERO {
        return Vec::new();
    }

    // Contribution levels, one per live all-in stack plus the top level.
    let mut levels = entries
        .iter()
        .filter(|p| p.is_live() && p.all_in)
        .map(|p| p.hand_bet)
        .collect::<Vec<_>>();
    levels.push(max_bet);
    levels.sort_unstable();
    levels.dedup();

    let mut pots = Vec::new();
    let mut prev = Chips::ZERO;

    for level in levels {
        let mut pot = Pot::default();
        for p in &entries {
            pot.chips += p.hand_bet.min(level) - p.hand_bet.min(prev);
            if p.is_live() && p.hand_bet >= level {
                pot.players.insert(p.player_id);
            }
        }

        if pot.chips > Chips::ZERO {
            pots.push(pot);
        }

        prev = level;
    }

    pots
}
