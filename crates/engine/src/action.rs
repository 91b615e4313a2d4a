// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Player actions and betting streets.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A player action submitted to the table.
///
/// The amount submitted along a [PlayerAction::Bet] or [PlayerAction::Raise]
/// is the target total bet for the street, it is ignored for every other
/// action.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerAction {
    /// Pass the action without betting.
    Check,
    /// Match the current bet.
    Call,
    /// Open the betting on this street.
    Bet,
    /// Raise the current bet.
    Raise,
    /// Give up the hand.
    Fold,
    /// Commit the whole stack.
    AllIn,
}

impl PlayerAction {
    /// The action label.
    pub fn label(&self) -> &'static str {
        match self {
            PlayerAction::Check => "CHECK",
            PlayerAction::Call => "CALL",
            PlayerAction::Bet => "BET",
            PlayerAction::Raise => "RAISE",
            PlayerAction::Fold => "FOLD",
            PlayerAction::AllIn => "ALL-IN",
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlayerAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check" => Ok(PlayerAction::Check),
            "call" => Ok(PlayerAction::Call),
            "bet" => Ok(PlayerAction::Bet),
            "raise" => Ok(PlayerAction::Raise),
            "fold" => Ok(PlayerAction::Fold),
            "allin" => Ok(PlayerAction::AllIn),
            _ => Err(ParseActionError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown action string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action {0:?}")]
pub struct ParseActionError(String);

/// A betting street.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    /// Betting before community cards.
    Preflop,
    /// Betting after the first three community cards.
    Flop,
    /// Betting after the fourth community card.
    Turn,
    /// Betting after the fifth community card.
    River,
    /// Hands are compared and pots awarded.
    Showdown,
}

impl Street {
    /// The street wire label.
    pub fn label(&self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_from_str() {
        assert_eq!("check".parse::<PlayerAction>().unwrap(), PlayerAction::Check);
        assert_eq!("allin".parse::<PlayerAction>().unwrap(), PlayerAction::AllIn);
        assert!("all-in".parse::<PlayerAction>().is_err());
        assert!("".parse::<PlayerAction>().is_err());
    }

    #[test]
    fn street_labels() {
        assert_eq!(Street::Preflop.to_string(), "preflop");
        assert_eq!(Street::Showdown.to_string(), "showdown");
        assert_eq!(serde_json::to_string(&Street::Flop).unwrap(), r#""flop""#);
    }
}
