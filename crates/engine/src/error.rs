// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table error types.
use thiserror::Error;

use crate::{chips::Chips, player::PlayerId};

/// Errors returned by the table API.
///
/// Every call that returns an error leaves the table state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The acting seat belongs to another player.
    #[error("not your turn")]
    NotYourTurn,
    /// The player has folded or is all-in and cannot act.
    #[error("player cannot act")]
    CannotAct,
    /// A check is not available against an outstanding bet.
    #[error("cannot check, must call or fold")]
    CannotCheck,
    /// A call is not available without an outstanding bet.
    #[error("nothing to call")]
    NothingToCall,
    /// A bet is not available against an outstanding bet.
    #[error("cannot bet, must raise")]
    CannotBet,
    /// A raise is not available without an outstanding bet.
    #[error("cannot raise, must bet")]
    CannotRaise,
    /// A short all-in set the current bet and the player already acted
    /// this street, only a call or a fold is available.
    #[error("cannot raise, action is closed")]
    ActionClosed,
    /// The bet is below the big blind.
    #[error("bet must be at least {min}, got {got}")]
    BetTooSmall {
        /// The minimum legal bet.
        min: Chips,
        /// The submitted amount.
        got: Chips,
    },
    /// The raise increment is below the minimum raise.
    #[error("raise must be at least {min}, got {got}")]
    RaiseTooSmall {
        /// The minimum legal raise target.
        min: Chips,
        /// The submitted amount.
        got: Chips,
    },
    /// The amount exceeds the player stack.
    #[error("insufficient chips")]
    InsufficientChips,
    /// The player has no chips left.
    #[error("no chips remaining")]
    NoChips,
    /// Not enough seated players with chips to start a hand.
    #[error("need at least {min} players to start")]
    TooFewPlayers {
        /// The configured minimum.
        min: usize,
    },
    /// All seats are taken.
    #[error("table is full")]
    TableFull,
    /// The operation is not available while a hand is being played.
    #[error("hand in progress")]
    HandInProgress,
    /// The hand is over and accepts no more actions.
    #[error("hand is complete")]
    HandComplete,
    /// The player already has a seat at this table.
    #[error("player {0} already seated")]
    AlreadySeated(PlayerId),
    /// The buy-in is outside the table limits.
    #[error("buy-in must be between {min} and {max}, got {got}")]
    InvalidBuyIn {
        /// The table minimum buy-in.
        min: Chips,
        /// The table maximum buy-in.
        max: Chips,
        /// The submitted amount.
        got: Chips,
    },
    /// The table rules do not allow rebuys.
    #[error("rebuy not allowed")]
    RebuyNotAllowed,
    /// The table rules do not allow sitting out.
    #[error("sit out not allowed")]
    SitOutNotAllowed,
    /// The table rules are inconsistent.
    #[error("invalid rules: {0}")]
    InvalidRules(&'static str),
    /// No player with this id at the table.
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
}

/// Coarse classification of table errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Acting out of turn or from a dead seat.
    TurnViolation,
    /// The action kind is not available in this state.
    ActionIllegal,
    /// The action kind is available but the amount is not.
    SizeIllegal,
    /// The operation does not fit the table lifecycle.
    LifecycleViolation,
    /// An unknown identifier.
    NotFound,
}

impl TableError {
    /// The coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        use TableError::*;
        match self {
            NotYourTurn | CannotAct => ErrorKind::TurnViolation,
            CannotCheck | NothingToCall | CannotBet | CannotRaise | ActionClosed => {
                ErrorKind::ActionIllegal
            }
            BetTooSmall { .. }
            | RaiseTooSmall { .. }
            | InsufficientChips
            | NoChips
            | InvalidBuyIn { .. } => ErrorKind::SizeIllegal,
            TooFewPlayers { .. } | TableFull | HandInProgress | HandComplete
            | AlreadySeated(_) | RebuyNotAllowed | SitOutNotAllowed | InvalidRules(_) => {
                ErrorKind::LifecycleViolation
            }
            PlayerNotFound(_) => ErrorKind::NotFound,
        }
    }
}
