// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Multi-hand table play tests.
//!
//! These tests drive whole games through the public API with seeded
//! randomness and check the table invariants after every action: chips are
//! conserved, the bet to match covers every live bet, and a running hand
//! always has exactly one acting seat.
use rand::{rngs::StdRng, Rng, SeedableRng};

use offsuit_engine::{Chips, GameTable, PlayerAction, PlayerId, Street, TableRules};

fn rules() -> TableRules {
    TableRules {
        min_buy_in: Chips::new(1),
        max_buy_in: Chips::new(1_000_000),
        ..TableRules::default()
    }
}

fn new_table(seed: u64, stacks: &[u64]) -> GameTable {
    let mut table = GameTable::with_rng(rules(), StdRng::seed_from_u64(seed)).unwrap();
    for (i, &stack) in stacks.iter().enumerate() {
        table
            .add_player(
                PlayerId::new(i as u64 + 1),
                &format!("P{}", i + 1),
                Chips::new(stack),
            )
            .unwrap();
    }
    table
}

fn assert_invariants(table: &GameTable, expected_total: u64) {
    let snap = table.snapshot();

    let stacks: u64 = snap.players.iter().map(|p| p.chips.amount()).sum();
    assert_eq!(stacks + snap.pot.amount(), expected_total, "chips are conserved");

    let max_bet = snap
        .players
        .iter()
        .filter(|p| !p.is_folded)
        .map(|p| p.current_bet.amount())
        .max()
        .unwrap_or(0);
    assert!(snap.current_bet.amount() >= max_bet);

    if !snap.hand_complete {
        let acting_id = snap.current_player_id.expect("a running hand has an acting seat");
        let acting = snap.players.iter().find(|p| p.id == acting_id).unwrap();
        assert!(acting.is_active && !acting.is_folded && !acting.is_all_in);
    }

    let layered: u64 = snap.side_pots.iter().map(|p| p.amount.amount()).sum();
    assert!(layered <= snap.pot.amount());
}

// Plays up to `hands` hands picking pseudo random legal actions, asserting
// the invariants after every action.
fn play_random_games(table: &mut GameTable, rng: &mut StdRng, hands: usize, expected_total: u64) {
    for _ in 0..hands {
        let ready = table
            .snapshot()
            .players
            .iter()
            .filter(|p| p.chips > Chips::ZERO)
            .count();
        if ready < 2 {
            break;
        }

        table.start_hand().unwrap();
        assert_invariants(table, expected_total);

        while !table.snapshot().hand_complete {
            let snap = table.snapshot();
            let player_id = snap.current_player_id.unwrap();
            let actions = table.legal_actions(player_id);
            assert!(!actions.is_empty());

            let player = snap.players.iter().find(|p| p.id == player_id).unwrap();

            // Mostly passive, with the occasional aggression or fold.
            let action = match rng.gen_range(0..10) {
                0 => PlayerAction::Fold,
                1 | 2 if actions.contains(&PlayerAction::Bet) => PlayerAction::Bet,
                1 | 2 if actions.contains(&PlayerAction::Raise) => PlayerAction::Raise,
                3 if actions.contains(&PlayerAction::AllIn) => PlayerAction::AllIn,
                _ if actions.contains(&PlayerAction::Check) => PlayerAction::Check,
                _ if actions.contains(&PlayerAction::Call) => PlayerAction::Call,
                _ => PlayerAction::Fold,
            };

            let amount = match action {
                PlayerAction::Bet => {
                    let bb = table.rules().big_blind.amount();
                    Chips::new((bb * rng.gen_range(1..=4)).min(player.chips.amount()))
                }
                PlayerAction::Raise => snap.current_bet + snap.min_raise,
                _ => Chips::ZERO,
            };

            table.apply(player_id, action, amount).unwrap();
            assert_invariants(table, expected_total);
        }

        let snap = table.snapshot();
        let won: u64 = snap.winners.iter().map(|w| w.amount.amount()).sum();
        assert!(won > 0, "every hand pays a winner");
    }
}

#[test]
fn chips_are_conserved_across_random_games() {
    let mut table = new_table(42, &[500, 500, 500, 500]);
    let mut rng = StdRng::seed_from_u64(99);
    play_random_games(&mut table, &mut rng, 40, 2_000);
}

#[test]
fn heads_up_random_games() {
    let mut table = new_table(7, &[300, 300]);
    let mut rng = StdRng::seed_from_u64(13);
    play_random_games(&mut table, &mut rng, 30, 600);
}

#[test]
fn six_handed_random_games() {
    let mut table = new_table(3, &[200, 400, 600, 800, 1_000, 1_200]);
    let mut rng = StdRng::seed_from_u64(77);
    play_random_games(&mut table, &mut rng, 40, 4_200);
}

#[test]
fn same_seed_plays_identical_hands() {
    let run = |seed: u64| {
        let mut table = new_table(seed, &[500, 500, 500]);
        let mut rng = StdRng::seed_from_u64(1_234);
        play_random_games(&mut table, &mut rng, 10, 1_500);
        serde_json::to_string(&table.snapshot()).unwrap()
    };

    assert_eq!(run(5), run(5));
}

#[test]
fn calling_station_game_reaches_showdown() {
    let mut table = new_table(11, &[1_000, 1_000, 1_000]);
    table.start_hand().unwrap();

    while !table.snapshot().hand_complete {
        let snap = table.snapshot();
        let player_id = snap.current_player_id.unwrap();
        let action = if table.legal_actions(player_id).contains(&PlayerAction::Check) {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        };
        table.apply(player_id, action, Chips::ZERO).unwrap();
    }

    let snap = table.snapshot();
    assert_eq!(snap.betting_round, Street::Showdown);
    assert_eq!(snap.community_cards.len(), 5);
    assert!(!snap.winners.is_empty());
    assert!(snap
        .winners
        .iter()
        .all(|w| w.hand_rank.is_some() && w.best_hand.len() == 5));

    let won: u64 = snap.winners.iter().map(|w| w.amount.amount()).sum();
    assert_eq!(won, 60);
    assert_invariants(&table, 3_000);
}
