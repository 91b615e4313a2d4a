// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Offsuit Poker cards and hand evaluator.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod cards;
pub mod eval;

pub use cards::{Card, Deck, Rank, Suit};
pub use eval::{HandRank, HandValue};
