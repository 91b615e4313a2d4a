// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Offsuit Poker table engine.
//!
//! A deterministic No-Limit Texas Hold'em state machine. The integrator
//! seats players at a [GameTable], starts hands and submits actions; the
//! engine enforces betting legality, deals the streets, evaluates the
//! showdown and distributes main and side pots. Transport, persistence,
//! timers and randomness sources all live outside, the table only owns an
//! injected generator.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod action;
pub mod chips;
pub mod error;
pub mod player;
mod pot;
pub mod rules;
pub mod snapshot;
pub mod table;

pub use action::{PlayerAction, Street};
pub use chips::Chips;
pub use error::{ErrorKind, TableError};
pub use player::PlayerId;
pub use rules::TableRules;
pub use snapshot::{PlayerSnapshot, SidePot, TableSnapshot, Winner};
pub use table::GameTable;
