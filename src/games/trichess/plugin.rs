//! TriChessPlugin — implements TypedGamePlugin.
//!
//! All board mutation funnels through `apply_move`; everything else is
//! read-only over the state. Turn sequencing, elimination and the game-end
//! condition (two of three players out) live here, on top of the pure
//! move-legality core.

use std::collections::HashMap;

use crate::engine::models::*;
use crate::engine::plugin::{
    TypedGamePlugin, TypedTransitionResult, DISCONNECT_POLICY_FORFEIT_PLAYER,
};

use super::check;
use super::movegen;
use super::setup;
use super::types::{CandidateMove, Cell, PieceColor, PieceKind, TriChessState};
use super::validator;

pub struct TriChessPlugin;

impl TypedGamePlugin for TriChessPlugin {
    type State = TriChessState;

    fn game_id(&self) -> &str {
        "trichess"
    }
    fn display_name(&self) -> &str {
        "TriChess"
    }
    fn min_players(&self) -> u32 {
        3
    }
    fn max_players(&self) -> u32 {
        3
    }
    fn description(&self) -> &str {
        "Three-player chess on a hexagonally-arranged 96-cell board. \
         Checkmate eliminates; the last player standing wins."
    }
    fn disconnect_policy(&self) -> &str {
        DISCONNECT_POLICY_FORFEIT_PLAYER
    }

    fn decode_state(&self, game_data: &serde_json::Value) -> TriChessState {
        serde_json::from_value(game_data.clone())
            .unwrap_or_else(|e| panic!("Failed to decode TriChessState: {e}"))
    }

    fn encode_state(&self, state: &TriChessState) -> serde_json::Value {
        serde_json::to_value(state).expect("serialization should not fail")
    }

    fn create_initial_state(
        &self,
        players: &[Player],
        _config: &GameConfig,
    ) -> (TriChessState, Phase, Vec<Event>) {
        assert_eq!(players.len(), 3, "trichess is a three-player game");

        let state = TriChessState {
            board: setup::initial_occupancy(),
            current_player_index: 0,
            players: players.iter().map(|p| p.player_id.clone()).collect(),
            eliminated: Vec::new(),
            move_count: 0,
        };

        let first_player = &players[0];
        let phase = make_player_turn_phase(0, &first_player.player_id);

        let events = vec![Event {
            event_type: "game_started".into(),
            player_id: None,
            payload: serde_json::json!({
                "players": players.iter().map(|p| &p.player_id).collect::<Vec<_>>(),
                "colors": PieceColor::ALL.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
            }),
        }];

        (state, phase, events)
    }

    fn get_valid_actions(
        &self,
        state: &TriChessState,
        phase: &Phase,
        player_id: &str,
    ) -> Vec<serde_json::Value> {
        let expected_pid = phase
            .expected_actions
            .first()
            .map(|ea| ea.player_id.as_str());
        if expected_pid != Some(player_id) || phase.name != "player_turn" {
            return vec![];
        }

        let color = state.current_color();
        let mut actions = vec![];
        for (from, _) in state.board.pieces_of(color) {
            for mv in movegen::possible_moves(state, from) {
                let mut action = serde_json::json!({
                    "action_type": "move_piece",
                    "from": mv.from.to_string(),
                    "to": mv.to.to_string(),
                });
                if let Some(promo) = mv.promotion {
                    action["promotion"] = serde_json::json!(promo.to_string());
                }
                actions.push(action);
            }
        }
        actions
    }

    fn validate_action(
        &self,
        state: &TriChessState,
        phase: &Phase,
        action: &Action,
    ) -> Option<String> {
        match phase.name.as_str() {
            "player_turn" => match action.action_type.as_str() {
                "move_piece" => {
                    let expected = phase
                        .expected_actions
                        .first()
                        .map(|ea| ea.player_id.as_str());
                    if expected != Some(action.player_id.as_str()) {
                        return Some(format!("It is not {}'s turn", action.player_id));
                    }
                    match parse_move(state, action) {
                        Err(e) => Some(e),
                        Ok(mv) => {
                            if validator::is_valid_move(state, state.current_color(), &mv) {
                                None
                            } else {
                                Some(format!("Illegal move from {} to {}", mv.from, mv.to))
                            }
                        }
                    }
                }
                other => Some(format!("Unknown action type: {other}")),
            },
            _ => None,
        }
    }

    fn apply_action(
        &self,
        state: &TriChessState,
        phase: &Phase,
        action: &Action,
        players: &[Player],
    ) -> TypedTransitionResult<TriChessState> {
        match phase.name.as_str() {
            "player_turn" => match action.action_type.as_str() {
                "move_piece" => self.apply_move(state, action, players),
                other => panic!("Unknown action type in player_turn: {other}"),
            },
            other => panic!("Unknown phase: {other}"),
        }
    }

    fn get_player_view(
        &self,
        state: &TriChessState,
        _phase: &Phase,
        _player_id: Option<&str>,
        _players: &[Player],
    ) -> serde_json::Value {
        // No hidden information — return full state.
        self.encode_state(state)
    }

    fn get_scores(&self, state: &TriChessState) -> HashMap<String, f64> {
        PieceColor::ALL
            .into_iter()
            .map(|color| (state.player_id_for(color), state.material_score(color)))
            .collect()
    }

    fn on_player_forfeit(
        &self,
        state: &TriChessState,
        phase: &Phase,
        player_id: &str,
        players: &[Player],
    ) -> Option<TypedTransitionResult<TriChessState>> {
        if phase.name != "player_turn" {
            return None;
        }
        let color = state.color_of_player(player_id)?;
        if !state.is_active(color) {
            return None;
        }

        let mut s = state.clone();
        let mut events = vec![Event {
            event_type: "player_forfeited".into(),
            player_id: Some(player_id.into()),
            payload: serde_json::json!({ "color": color.to_string() }),
        }];
        eliminate(&mut s, color, &mut events);

        Some(self.finish_transition(s, color, events, players))
    }
}

// ── Private helpers ──

impl TriChessPlugin {
    fn apply_move(
        &self,
        state: &TriChessState,
        action: &Action,
        players: &[Player],
    ) -> TypedTransitionResult<TriChessState> {
        let mv = match parse_move(state, action) {
            Ok(mv) => mv,
            Err(e) => panic!("apply_action called with unvalidated payload: {e}"),
        };
        let mover = state.current_color();

        let mut s = state.clone();
        // The single commit point: the same simulation the validator used.
        s.board = validator::simulate(&state.board, &mv);
        s.move_count += 1;

        tracing::info!(from = %mv.from, to = %mv.to, color = %mover, "move committed");

        let mut events = vec![Event {
            event_type: "piece_moved".into(),
            player_id: Some(state.player_id_for(mover)),
            payload: serde_json::json!({
                "from": mv.from.to_string(),
                "to": mv.to.to_string(),
                "piece": mv.piece.kind.to_string(),
                "color": mover.to_string(),
            }),
        }];
        if let Some(captured) = mv.captured {
            events.push(Event {
                event_type: "piece_captured".into(),
                player_id: Some(state.player_id_for(captured.color)),
                payload: serde_json::json!({
                    "at": mv.to.to_string(),
                    "piece": captured.kind.to_string(),
                    "color": captured.color.to_string(),
                }),
            });
        }
        if let Some(promo) = mv.promotion {
            events.push(Event {
                event_type: "pawn_promoted".into(),
                player_id: Some(state.player_id_for(mover)),
                payload: serde_json::json!({
                    "at": mv.to.to_string(),
                    "promoted_to": promo.to_string(),
                }),
            });
        }

        // Downstream players: eliminate the checkmated, announce checks.
        for color in seats_after(mover) {
            if !s.is_active(color) {
                continue;
            }
            if check::is_checkmate(&s, color) {
                events.push(Event {
                    event_type: "player_eliminated".into(),
                    player_id: Some(s.player_id_for(color)),
                    payload: serde_json::json!({ "color": color.to_string() }),
                });
                eliminate(&mut s, color, &mut events);
            } else if check::is_in_check(&s.board, color) {
                events.push(Event {
                    event_type: "check".into(),
                    player_id: Some(s.player_id_for(color)),
                    payload: serde_json::json!({ "color": color.to_string() }),
                });
            }
        }

        self.finish_transition(s, mover, events, players)
    }

    /// Shared tail of a transition: detect game end, otherwise hand the
    /// turn to the next active player with a legal move.
    fn finish_transition(
        &self,
        mut s: TriChessState,
        from_color: PieceColor,
        mut events: Vec<Event>,
        _players: &[Player],
    ) -> TypedTransitionResult<TriChessState> {
        let active = s.active_colors();
        if active.len() <= 1 {
            let winners: Vec<String> = active.iter().map(|c| s.player_id_for(*c)).collect();
            return self.end_game(s, winners, "elimination", events);
        }

        // Advance the turn, skipping eliminated players and (with an
        // observable event) stalemated ones.
        let mut seat = from_color.seat();
        for _ in 0..3 {
            seat = (seat + 1) % 3;
            let Some(color) = PieceColor::from_seat(seat) else { break };
            if !s.is_active(color) {
                continue;
            }
            if movegen::has_any_legal_move(&s, color) {
                s.current_player_index = seat;
                let player_id = s.player_id_for(color);
                events.push(Event {
                    event_type: "turn_changed".into(),
                    player_id: Some(player_id.clone()),
                    payload: serde_json::json!({
                        "player_index": seat,
                        "color": color.to_string(),
                    }),
                });
                let scores = self.get_scores(&s);
                return TypedTransitionResult {
                    state: s,
                    events,
                    next_phase: make_player_turn_phase(seat, &player_id),
                    scores,
                    game_over: None,
                };
            }
            tracing::info!(color = %color, "no legal moves, turn skipped");
            events.push(Event {
                event_type: "turn_skipped".into(),
                player_id: Some(s.player_id_for(color)),
                payload: serde_json::json!({
                    "color": color.to_string(),
                    "reason": "stalemate",
                }),
            });
        }

        // No active player can move at all: a dead draw.
        self.end_game(s, Vec::new(), "stalemate", events)
    }

    fn end_game(
        &self,
        s: TriChessState,
        winners: Vec<String>,
        reason: &str,
        mut events: Vec<Event>,
    ) -> TypedTransitionResult<TriChessState> {
        let final_scores = self.get_scores(&s);
        tracing::info!(?winners, reason, "game over");
        events.push(Event {
            event_type: "game_ended".into(),
            player_id: None,
            payload: serde_json::json!({
                "winners": &winners,
                "reason": reason,
                "final_scores": &final_scores,
            }),
        });

        TypedTransitionResult {
            state: s,
            events,
            next_phase: Phase {
                name: "game_over".into(),
                expected_actions: vec![],
                auto_resolve: false,
                metadata: serde_json::json!({}),
            },
            scores: final_scores.clone(),
            game_over: Some(GameResult {
                winners,
                final_scores,
                reason: reason.into(),
            }),
        }
    }
}

/// Remove a player from the rotation along with their remaining pieces.
fn eliminate(s: &mut TriChessState, color: PieceColor, events: &mut Vec<Event>) {
    if !s.eliminated.contains(&color) {
        s.eliminated.push(color);
    }
    let cells: Vec<Cell> = s
        .board
        .pieces_of(color)
        .into_iter()
        .map(|(cell, _)| cell)
        .collect();
    for cell in &cells {
        s.board.remove(*cell);
    }
    events.push(Event {
        event_type: "pieces_removed".into(),
        player_id: Some(s.player_id_for(color)),
        payload: serde_json::json!({
            "color": color.to_string(),
            "cells": cells.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
        }),
    });
}

/// The other two seats, in rotation order after `color`.
fn seats_after(color: PieceColor) -> [PieceColor; 2] {
    let seat = color.seat();
    [
        PieceColor::from_seat((seat + 1) % 3).expect("seat arithmetic stays in range"),
        PieceColor::from_seat((seat + 2) % 3).expect("seat arithmetic stays in range"),
    ]
}

fn parse_move(state: &TriChessState, action: &Action) -> Result<CandidateMove, String> {
    let from: Cell = action
        .payload
        .get("from")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "Missing 'from' in payload".to_string())?
        .parse()?;
    let to: Cell = action
        .payload
        .get("to")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "Missing 'to' in payload".to_string())?
        .parse()?;
    let piece = *state
        .board
        .get(from)
        .ok_or_else(|| format!("No piece on {from}"))?;

    let mut promotion = match action.payload.get("promotion").and_then(|v| v.as_str()) {
        Some(s) => Some(s.parse::<PieceKind>()?),
        None => None,
    };
    let promotes = piece.kind == PieceKind::Pawn
        && movegen::promotion_rows(piece.color).contains(&to.row);
    match (promotion, promotes) {
        (Some(_), false) => return Err(format!("No promotion available on {to}")),
        (None, true) => promotion = Some(PieceKind::Queen),
        _ => {}
    }

    Ok(CandidateMove {
        from,
        to,
        piece,
        captured: state.board.get(to).copied(),
        promotion,
    })
}

fn make_player_turn_phase(player_index: usize, player_id: &str) -> Phase {
    Phase {
        name: "player_turn".into(),
        expected_actions: vec![ExpectedAction {
            player_id: player_id.into(),
            action_type: "move_piece".into(),
        }],
        auto_resolve: false,
        metadata: serde_json::json!({ "player_index": player_index }),
    }
}
