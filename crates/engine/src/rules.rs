// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table rules configuration.
use serde::{Deserialize, Serialize};

use crate::{chips::Chips, error::TableError};

/// The hard cap on seats at a table.
pub const MAX_SEATS: usize = 6;

/// Configurable No-Limit Texas Hold'em table rules.
///
/// The timeouts are advisory, the engine has no clocks. The integrator
/// decides when a seat has timed out and submits a fold on its behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableRules {
    /// The small blind, posted by the seat left of the dealer.
    pub small_blind: Chips,
    /// The big blind, posted after the small blind.
    pub big_blind: Chips,
    /// The minimum buy-in.
    pub min_buy_in: Chips,
    /// The maximum buy-in.
    pub max_buy_in: Chips,
    /// The minimum number of players to start a hand.
    pub min_players: usize,
    /// The maximum number of seats, capped at [MAX_SEATS].
    pub max_players: usize,
    /// Seconds a player has to act, advisory.
    pub turn_timeout: u32,
    /// Seconds before a disconnected player is folded, advisory.
    pub disconnect_timeout: u32,
    /// Whether busted players may buy more chips between hands.
    pub allow_rebuy: bool,
    /// Whether players may sit out of hands without leaving.
    pub allow_sit_out: bool,
    /// Whether running the board twice is offered to the players.
    ///
    /// The engine always runs a single board, the flag is carried for
    /// integrators.
    pub allow_run_it_twice: bool,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            small_blind: Chips::new(10),
            big_blind: Chips::new(20),
            min_buy_in: Chips::new(1_000),
            max_buy_in: Chips::new(100_000),
            min_players: 2,
            max_players: MAX_SEATS,
            turn_timeout: 30,
            disconnect_timeout: 300,
            allow_rebuy: true,
            allow_sit_out: true,
            allow_run_it_twice: false,
        }
    }
}

impl TableRules {
    /// Checks the rules for consistency.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.small_blind == Chips::ZERO {
            return Err(TableError::InvalidRules("small blind must be positive"));
        }

        if self.big_blind < self.small_blind {
            return Err(TableError::InvalidRules(
                "big blind must be at least the small blind",
            ));
        }

        if self.min_players < 2 {
            return Err(TableError::InvalidRules("at least 2 players are required"));
        }

        if self.max_players < self.min_players || self.max_players > MAX_SEATS {
            return Err(TableError::InvalidRules("invalid seats range"));
        }

        if self.min_buy_in == Chips::ZERO || self.max_buy_in < self.min_buy_in {
            return Err(TableError::InvalidRules("invalid buy-in range"));
        }

        Ok(())
    }
}
