// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game table state machine.
//!
//! A [GameTable] seats up to six players and plays No-Limit Texas Hold'em
//! hands. Every call is synchronous and atomic, a call that returns an error
//! leaves the table unchanged. The caller drives the table with
//! [GameTable::start_hand] and [GameTable::apply] and reads it back with
//! [GameTable::snapshot].
use ahash::AHashMap;
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use offsuit_eval::{Card, Deck, HandValue};

use crate::{
    action::{PlayerAction, Street},
    chips::Chips,
    error::TableError,
    player::{Player, PlayerId, Seats},
    pot::{build_pots, Pot},
    rules::TableRules,
    snapshot::{PlayerSnapshot, SidePot, TableSnapshot, Winner},
};

/// A No-Limit Texas Hold'em table.
#[derive(Debug)]
pub struct GameTable {
    rules: TableRules,
    seats: Seats,
    deck: Deck,
    board: Vec<Card>,
    street: Street,
    pot: Chips,
    side_pots: Vec<Pot>,
    current_bet: Chips,
    min_raise: Chips,
    last_aggressor: Option<PlayerId>,
    // False when a short all-in set the current bet; players who already
    // acted this street may then only call or fold until a full raise.
    bet_open: bool,
    dealer_seat: usize,
    acting: Option<usize>,
    hand_number: u64,
    hand_complete: bool,
    winners: Vec<Winner>,
    rng: StdRng,
}

impl GameTable {
    /// Creates a new table with entropy seeded randomness.
    pub fn new(rules: TableRules) -> Result<Self, TableError> {
        Self::with_rng(rules, StdRng::from_entropy())
    }

    /// Creates a new table with caller initialized randomness.
    ///
    /// Two tables built with equally seeded generators and driven with the
    /// same calls play identical hands.
    pub fn with_rng(rules: TableRules, mut rng: StdRng) -> Result<Self, TableError> {
        rules.validate()?;

        let deck = Deck::new_and_shuffled(&mut rng);
        Ok(Self {
            rules,
            seats: Seats::default(),
            deck,
            board: Vec::new(),
            street: Street::Preflop,
            pot: Chips::ZERO,
            side_pots: Vec::new(),
            current_bet: Chips::ZERO,
            min_raise: Chips::ZERO,
            last_aggressor: None,
            bet_open: true,
            dealer_seat: 0,
            acting: None,
            hand_number: 0,
            hand_complete: true,
            winners: Vec::new(),
            rng,
        })
    }

    /// The active table rules.
    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    /// The last player who bet or raised on the current street.
    pub fn last_aggressor(&self) -> Option<PlayerId> {
        self.last_aggressor
    }

    /// Seats a new player, returns the seat index.
    ///
    /// Players join between hands with a buy-in within the table limits.
    pub fn add_player(
        &mut self,
        player_id: PlayerId,
        name: &str,
        buy_in: Chips,
    ) -> Result<usize, TableError> {
        if !self.hand_complete {
            return Err(TableError::HandInProgress);
        }

        if self.seats.count() >= self.rules.max_players {
            return Err(TableError::TableFull);
        }

        if self.seats.get(player_id).is_some() {
            return Err(TableError::AlreadySeated(player_id));
        }

        if buy_in < self.rules.min_buy_in || buy_in > self.rules.max_buy_in {
            return Err(TableError::InvalidBuyIn {
                min: self.rules.min_buy_in,
                max: self.rules.max_buy_in,
                got: buy_in,
            });
        }

        let seat = self.seats.add(player_id, name.to_string(), buy_in);
        info!("Player {player_id} joined at seat {seat} with {buy_in}");

        Ok(seat)
    }

    /// Removes a player between hands, the stack goes back to the caller.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<Player, TableError> {
        if !self.hand_complete {
            return Err(TableError::HandInProgress);
        }

        let player = self
            .seats
            .remove(player_id)
            .ok_or(TableError::PlayerNotFound(player_id))?;
        info!("Player {player_id} left the table");

        Ok(player)
    }

    /// Adds chips to a player stack between hands.
    pub fn rebuy(&mut self, player_id: PlayerId, amount: Chips) -> Result<(), TableError> {
        if !self.rules.allow_rebuy {
            return Err(TableError::RebuyNotAllowed);
        }

        if !self.hand_complete {
            return Err(TableError::HandInProgress);
        }

        let pos = self
            .seats
            .position(player_id)
            .ok_or(TableError::PlayerNotFound(player_id))?;

        let total = self.seats.player(pos).chips + amount;
        if amount == Chips::ZERO || total > self.rules.max_buy_in {
            return Err(TableError::InvalidBuyIn {
                min: self.rules.min_buy_in,
                max: self.rules.max_buy_in,
                got: total,
            });
        }

        self.seats.player_mut(pos).chips = total;
        info!("Player {player_id} rebought for {amount}");

        Ok(())
    }

    /// Sits a player out, the player is not dealt into the next hands.
    pub fn sit_out(&mut self, player_id: PlayerId) -> Result<(), TableError> {
        if !self.rules.allow_sit_out {
            return Err(TableError::SitOutNotAllowed);
        }

        self.seats
            .get_mut(player_id)
            .ok_or(TableError::PlayerNotFound(player_id))?
            .sitting_out = true;

        Ok(())
    }

    /// Sits a player back in from the next hand.
    pub fn sit_in(&mut self, player_id: PlayerId) -> Result<(), TableError> {
        self.seats
            .get_mut(player_id)
            .ok_or(TableError::PlayerNotFound(player_id))?
            .sitting_out = false;

        Ok(())
    }

    /// Starts a new hand.
    ///
    /// Rotates the button, posts the blinds and deals the hole cards. In a
    /// heads-up hand the dealer posts the small blind and acts first
    /// pre-flop.
    pub fn start_hand(&mut self) -> Result<(), TableError> {
        if !self.hand_complete {
            return Err(TableError::HandInProgress);
        }

        let min = self.rules.min_players.max(2);
        if self.seats.count_ready() < min {
            return Err(TableError::TooFewPlayers { min });
        }

        self.hand_number += 1;
        self.hand_complete = false;
        self.street = Street::Preflop;
        self.board.clear();
        self.pot = Chips::ZERO;
        self.side_pots.clear();
        self.winners.clear();
        self.current_bet = Chips::ZERO;
        self.min_raise = self.rules.big_blind;
        self.last_aggressor = None;
        self.bet_open = true;

        for p in self.seats.iter_mut() {
            p.start_hand();
        }

        // Move the button to the next seat dealt in.
        let dealer_pos = self
            .seats
            .next_from_seat(self.dealer_seat, |p| p.in_hand)
            .expect("at least two players are dealt in");
        self.dealer_seat = self.seats.player(dealer_pos).seat;

        // Heads-up the dealer posts the small blind.
        let sb_pos = if self.seats.count_live() == 2 {
            dealer_pos
        } else {
            self.seats
                .next_from_seat(self.dealer_seat, |p| p.in_hand)
                .expect("at least two players are dealt in")
        };
        let bb_pos = self
            .seats
            .next_from_seat(self.seats.player(sb_pos).seat, |p| p.in_hand)
            .expect("at least two players are dealt in");

        // A short stack posts what it has and is all-in, the bet to match is
        // the big blind regardless.
        let paid = self.seats.player_mut(sb_pos).pay(self.rules.small_blind);
        self.pot += paid;
        let paid = self.seats.player_mut(bb_pos).pay(self.rules.big_blind);
        self.pot += paid;

        self.current_bet = self.rules.big_blind;
        self.last_aggressor = Some(self.seats.player(bb_pos).player_id);

        // Fresh deck for the hand.
        self.deck = Deck::new_and_shuffled(&mut self.rng);

        // Deal two hole cards one at a time starting left of the dealer.
        let first = self
            .seats
            .next_from_seat(self.dealer_seat, |p| p.in_hand)
            .expect("at least two players are dealt in");
        let n = self.seats.count();
        let mut order = Vec::new();
        let mut pos = first;
        loop {
            if self.seats.player(pos).in_hand {
                order.push(pos);
            }
            pos = (pos + 1) % n;
            if pos == first {
                break;
            }
        }

        let firsts = order.iter().map(|_| self.deck.deal()).collect::<Vec<_>>();
        let seconds = order.iter().map(|_| self.deck.deal()).collect::<Vec<_>>();
        for ((&pos, c1), c2) in order.iter().zip(firsts).zip(seconds) {
            self.seats.player_mut(pos).hole_cards = Some((c1, c2));
        }

        // Action starts left of the big blind. The big blind keeps the option
        // to raise when the action comes back unraised.
        self.acting = self
            .seats
            .next_from_seat(self.seats.player(bb_pos).seat, Player::can_act);

        info!(
            "Hand {} started, dealer seat {}, {} players",
            self.hand_number,
            self.dealer_seat,
            order.len()
        );

        // The blinds may have left nobody free to act.
        if self.is_round_complete() {
            self.advance_streets();
        }

        Ok(())
    }

    /// Applies an action from a player.
    ///
    /// For [PlayerAction::Bet] and [PlayerAction::Raise] the amount is the
    /// target total bet for the street; it is ignored for other actions.
    pub fn apply(
        &mut self,
        player_id: PlayerId,
        action: PlayerAction,
        amount: Chips,
    ) -> Result<(), TableError> {
        if self.hand_complete {
            return Err(TableError::HandComplete);
        }

        let pos = self
            .seats
            .position(player_id)
            .ok_or(TableError::PlayerNotFound(player_id))?;

        let acting = self.acting.expect("a running hand has an acting seat");
        if pos != acting {
            return Err(TableError::NotYourTurn);
        }

        let player = self.seats.player(pos);
        if !player.can_act() {
            return Err(TableError::CannotAct);
        }

        // Validate before any mutation, calls are atomic.
        match action {
            PlayerAction::Check => {
                if self.current_bet > player.street_bet {
                    return Err(TableError::CannotCheck);
                }
            }
            PlayerAction::Call => {
                if self.current_bet <= player.street_bet {
                    return Err(TableError::NothingToCall);
                }
            }
            PlayerAction::Bet => {
                if self.current_bet > Chips::ZERO {
                    return Err(TableError::CannotBet);
                }
                if amount < self.rules.big_blind {
                    return Err(TableError::BetTooSmall {
                        min: self.rules.big_blind,
                        got: amount,
                    });
                }
                if amount - player.street_bet > player.chips {
                    return Err(TableError::InsufficientChips);
                }
            }
            PlayerAction::Raise => {
                if self.current_bet == Chips::ZERO {
                    return Err(TableError::CannotRaise);
                }
                if !self.bet_open && player.acted_this_street {
                    return Err(TableError::ActionClosed);
                }
                if amount - self.current_bet < self.min_raise {
                    return Err(TableError::RaiseTooSmall {
                        min: self.current_bet + self.min_raise,
                        got: amount,
                    });
                }
                if amount - player.street_bet > player.chips {
                    return Err(TableError::InsufficientChips);
                }
            }
            PlayerAction::Fold => {}
            PlayerAction::AllIn => {
                if player.chips == Chips::ZERO {
                    return Err(TableError::NoChips);
                }
                // A stack big enough to raise needs the action open.
                if !self.bet_open
                    && player.acted_this_street
                    && player.street_bet + player.chips > self.current_bet
                {
                    return Err(TableError::ActionClosed);
                }
            }
        }

        debug!(
            "Hand {}: player {} {} {}",
            self.hand_number,
            player_id,
            action.label(),
            amount
        );

        self.seats.player_mut(pos).acted_this_street = true;

        match action {
            PlayerAction::Check => {
                self.seats.player_mut(pos).has_acted = true;
            }
            PlayerAction::Call => {
                let p = self.seats.player_mut(pos);
                let owe = self.current_bet - p.street_bet;
                let paid = p.pay(owe);
                p.has_acted = true;
                self.pot += paid;
            }
            PlayerAction::Bet => {
                let p = self.seats.player_mut(pos);
                let owe = amount - p.street_bet;
                let paid = p.pay(owe);
                p.has_acted = true;
                self.pot += paid;
                self.current_bet = amount;
                self.min_raise = amount;
                self.last_aggressor = Some(player_id);
                self.bet_open = true;
                self.reopen_action(pos);
            }
            PlayerAction::Raise => {
                let p = self.seats.player_mut(pos);
                let owe = amount - p.street_bet;
                let paid = p.pay(owe);
                p.has_acted = true;
                self.pot += paid;
                self.min_raise = amount - self.current_bet;
                self.current_bet = amount;
                self.last_aggressor = Some(player_id);
                self.bet_open = true;
                self.reopen_action(pos);
            }
            PlayerAction::Fold => {
                self.seats.player_mut(pos).fold();
            }
            PlayerAction::AllIn => {
                let p = self.seats.player_mut(pos);
                let stack = p.chips;
                let paid = p.pay(stack);
                let total = p.street_bet;
                self.pot += paid;

                if total > self.current_bet {
                    let increment = total - self.current_bet;
                    if increment >= self.min_raise {
                        // A full size all-in reopens the action.
                        self.min_raise = increment;
                        self.last_aggressor = Some(player_id);
                        self.bet_open = true;
                        self.reopen_action(pos);
                    } else {
                        self.bet_open = false;
                    }
                    self.current_bet = total;
                }
            }
        }

        if self.is_round_complete() {
            self.advance_streets();
        } else {
            self.acting = self
                .seats
                .next_from_seat(self.seats.player(pos).seat, Player::can_act);
        }

        Ok(())
    }

    /// The actions the given player may submit right now.
    ///
    /// Empty when it is not the player's turn. A raise is only offered when
    /// the action is open to the player and the stack covers a full raise;
    /// going all-in is offered either as an open raise or as a short call.
    pub fn legal_actions(&self, player_id: PlayerId) -> Vec<PlayerAction> {
        if self.hand_complete {
            return Vec::new();
        }

        let Some(pos) = self.seats.position(player_id) else {
            return Vec::new();
        };

        if self.acting != Some(pos) {
            return Vec::new();
        }

        let player = self.seats.player(pos);
        let mut actions = vec![PlayerAction::Fold];

        if player.street_bet == self.current_bet {
            actions.push(PlayerAction::Check);
        } else {
            actions.push(PlayerAction::Call);
        }

        if self.current_bet == Chips::ZERO && player.chips >= self.rules.big_blind {
            actions.push(PlayerAction::Bet);
        }

        let may_reraise = self.bet_open || !player.acted_this_street;

        if self.current_bet > Chips::ZERO
            && may_reraise
            && player.street_bet + player.chips >= self.current_bet + self.min_raise
        {
            actions.push(PlayerAction::Raise);
        }

        if player.chips > Chips::ZERO
            && (may_reraise || player.street_bet + player.chips <= self.current_bet)
        {
            actions.push(PlayerAction::AllIn);
        }

        actions
    }

    /// Returns a player's hole cards, None for folded players.
    pub fn hole_cards(&self, player_id: PlayerId) -> Option<(Card, Card)> {
        self.seats
            .get(player_id)
            .filter(|p| !p.folded)
            .and_then(|p| p.hole_cards)
    }

    /// Returns a read-only projection of the table state.
    pub fn snapshot(&self) -> TableSnapshot {
        let players = self
            .seats
            .iter()
            .map(|p| PlayerSnapshot {
                id: p.player_id,
                name: p.name.clone(),
                chips: p.chips,
                current_bet: p.street_bet,
                is_folded: p.folded,
                is_all_in: p.all_in,
                is_active: p.in_hand,
                seat_position: p.seat,
                has_acted: p.has_acted,
            })
            .collect();

        let side_pots = self
            .side_pots
            .iter()
            .map(|pot| {
                let mut ids = pot.players.iter().copied().collect::<Vec<_>>();
                ids.sort_unstable();
                SidePot {
                    amount: pot.chips,
                    eligible_players: ids,
                }
            })
            .collect();

        TableSnapshot {
            players,
            current_player_id: self.acting.map(|pos| self.seats.player(pos).player_id),
            dealer_seat: self.dealer_seat,
            pot: self.pot,
            current_bet: self.current_bet,
            min_raise: self.min_raise,
            community_cards: self.board.clone(),
            betting_round: self.street,
            hand_complete: self.hand_complete,
            winners: self.winners.clone(),
            hand_number: self.hand_number,
            side_pots,
        }
    }

    /// Clears acted flags so the other players face the new bet.
    fn reopen_action(&mut self, aggressor: usize) {
        for (pos, p) in self.seats.iter_mut().enumerate() {
            if pos != aggressor && p.can_act() {
                p.has_acted = false;
            }
        }
    }

    /// Checks if the betting round is over.
    fn is_round_complete(&self) -> bool {
        if self.seats.count_live() < 2 {
            return true;
        }

        // A live player short of the current bet still has to act, even if a
        // short all-in left the action closed.
        for p in self.seats.iter() {
            if p.can_act() && p.street_bet < self.current_bet {
                return false;
            }
        }

        // With fewer than two players free to bet there is nothing to bet
        // against and the hand runs out.
        if self.seats.count_can_act() < 2 {
            return true;
        }

        for p in self.seats.iter() {
            if p.can_act() && !p.has_acted {
                return false;
            }
        }

        true
    }

    /// Closes the street and deals the next one, running out all remaining
    /// streets when betting can no longer happen.
    fn advance_streets(&mut self) {
        self.acting = None;

        loop {
            self.collect_street();

            if self.seats.count_live() < 2 {
                self.finish_hand();
                return;
            }

            match self.street {
                Street::Preflop => {
                    for _ in 0..3 {
                        self.board.push(self.deck.deal());
                    }
                    self.street = Street::Flop;
                }
                Street::Flop => {
                    self.board.push(self.deck.deal());
                    self.street = Street::Turn;
                }
                Street::Turn => {
                    self.board.push(self.deck.deal());
                    self.street = Street::River;
                }
                Street::River | Street::Showdown => {
                    self.street = Street::Showdown;
                    self.finish_hand();
                    return;
                }
            }

            debug!(
                "Hand {}: {} dealt, {} community cards",
                self.hand_number,
                self.street,
                self.board.len()
            );

            if !self.is_round_complete() {
                // Post-flop action starts left of the dealer.
                self.acting = self.seats.next_from_seat(self.dealer_seat, Player::can_act);
                return;
            }
        }
    }

    /// Collects the street bets and resets the betting state.
    fn collect_street(&mut self) {
        for p in self.seats.iter_mut() {
            p.start_street();
        }

        self.current_bet = Chips::ZERO;
        self.min_raise = self.rules.big_blind;
        self.last_aggressor = None;
        self.bet_open = true;

        // Publish the pot layers once a live stack is all-in.
        if self.seats.iter().any(|p| p.is_live() && p.all_in) {
            self.side_pots = build_pots(self.seats.iter());
        }
    }

    /// Awards the pots and completes the hand.
    fn finish_hand(&mut self) {
        self.hand_complete = true;
        self.acting = None;

        match self.seats.count_live() {
            1 => {
                // The last player standing takes the pot, the hole cards are
                // not revealed.
                let pos = self
                    .seats
                    .next_from_seat(self.dealer_seat, Player::is_live)
                    .expect("one live player");
                let total = self.pot;
                let p = self.seats.player_mut(pos);
                p.chips += total;

                info!("Hand {}: {} wins {} uncontested", self.hand_number, p.player_id, total);
                self.winners = vec![Winner {
                    player_id: p.player_id,
                    amount: total,
                    hand_rank: None,
                    best_hand: Vec::new(),
                    description: "Last player standing".to_string(),
                }];
            }
            n if n > 1 => {
                self.winners = self.award_showdown();
            }
            _ => {}
        }

        self.pot = Chips::ZERO;
        self.side_pots.clear();
    }

    /// Compares the live hands and splits every pot among its winners.
    fn award_showdown(&mut self) -> Vec<Winner> {
        // Each live player evaluates once over hole and community cards.
        let mut values = AHashMap::new();
        for p in self.seats.iter().filter(|p| p.is_live()) {
            let (c1, c2) = p.hole_cards.expect("live players hold cards");
            let mut cards = vec![c1, c2];
            cards.extend_from_slice(&self.board);
            values.insert(p.player_id, HandValue::eval(&cards));
        }

        let pots = build_pots(self.seats.iter());
        let n = self.seats.count();
        let dealer_pos = self
            .seats
            .iter()
            .position(|p| p.seat == self.dealer_seat)
            .unwrap_or(0);

        // Distance clockwise from the seat after the dealer, used to place
        // the odd chip of a split pot.
        let clockwise = |pos: usize| (pos + 2 * n - dealer_pos - 1) % n;

        let mut won: AHashMap<PlayerId, Chips> = AHashMap::new();
        for pot in pots {
            let mut best: Option<&HandValue> = None;
            let mut tied: Vec<usize> = Vec::new();
            for (pos, p) in self.seats.iter().enumerate() {
                if !p.is_live() || !pot.players.contains(&p.player_id) {
                    continue;
                }

                let hv = &values[&p.player_id];
                match best {
                    Some(b) if hv < b => {}
                    Some(b) if hv == b => tied.push(pos),
                    _ => {
                        best = Some(hv);
                        tied.clear();
                        tied.push(pos);
                    }
                }
            }

            if tied.is_empty() {
                continue;
            }

            let share = pot.chips / tied.len() as u64;
            let remainder = pot.chips % tied.len() as u64;
            let first = *tied
                .iter()
                .min_by_key(|&&pos| clockwise(pos))
                .expect("tied winners");

            for &pos in &tied {
                let mut amount = share;
                if pos == first {
                    amount += remainder;
                }

                let p = self.seats.player_mut(pos);
                p.chips += amount;
                *won.entry(p.player_id).or_insert(Chips::ZERO) += amount;
            }
        }

        // One winner entry per player in seat order.
        let mut winners = Vec::new();
        for p in self.seats.iter() {
            if let Some(&amount) = won.get(&p.player_id) {
                let hv = &values[&p.player_id];
                info!(
                    "Hand {}: {} wins {} with {}",
                    self.hand_number,
                    p.player_id,
                    amount,
                    hv.description()
                );

                winners.push(Winner {
                    player_id: p.player_id,
                    amount,
                    hand_rank: Some(hv.rank()),
                    best_hand: hv.hand().to_vec(),
                    description: hv.description(),
                });
            }
        }

        winners
    }
}
