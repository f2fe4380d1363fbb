//! Check and checkmate detection.
//!
//! `is_in_check` scans enemy pseudo-legal moves (king-safety filtering
//! omitted, so the scan cannot recurse into itself). `is_checkmate` is the
//! three-player elimination test: a missing king is elimination outright,
//! a king out of check never is, and a checked player survives exactly
//! when some piece of theirs still has a fully legal move.

use super::board::Occupancy;
use super::movegen;
use super::types::{PieceColor, TriChessState};

/// True iff any enemy piece pseudo-attacks the king of `color`. A player
/// with no king on the board is not "in check" — they are already out.
pub fn is_in_check(occupancy: &Occupancy, color: PieceColor) -> bool {
    let Some(king_cell) = occupancy.find_king(color) else {
        return false;
    };
    PieceColor::ALL
        .into_iter()
        .filter(|c| *c != color)
        .any(|enemy| movegen::color_attacks(occupancy, enemy, king_cell))
}

/// Elimination test for `color`.
pub fn is_checkmate(state: &TriChessState, color: PieceColor) -> bool {
    if state.board.find_king(color).is_none() {
        return true;
    }
    if !is_in_check(&state.board, color) {
        return false;
    }
    !movegen::has_any_legal_move(state, color)
}

/// Stalemate: on the board, not in check, but without a single legal move.
/// Not an elimination in this variant — the turn sequencer skips the
/// player instead.
pub fn is_stalemated(state: &TriChessState, color: PieceColor) -> bool {
    state.board.find_king(color).is_some()
        && !is_in_check(&state.board, color)
        && !movegen::has_any_legal_move(state, color)
}
