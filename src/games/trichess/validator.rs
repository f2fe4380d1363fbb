//! Move legality: ordered checks, short-circuiting on the first failure.
//!
//! The check order is fixed for diagnosability: occupancy agreement, zero
//! displacement, movement shape, path, bounds, turn ownership, king
//! safety. Every failure returns `false` — the validator never panics and
//! never fails open.

use super::board::{self, Occupancy};
use super::check;
use super::directions::{self, Resolution};
use super::movegen;
use super::topology;
use super::types::{CandidateMove, Cell, Piece, PieceColor, PieceKind, TriChessState};

/// Validate a candidate move as if `as_color` were on turn. The live turn
/// surface passes `state.current_color()`; the checkmate detector passes
/// the color it is probing.
pub fn is_valid_move(state: &TriChessState, as_color: PieceColor, mv: &CandidateMove) -> bool {
    // 1. The named piece must actually stand on the source cell.
    match state.board.get(mv.from) {
        Some(p) if p.color == mv.piece.color && p.kind == mv.piece.kind => {}
        _ => {
            tracing::debug!(from = %mv.from, "rejected: no matching piece on source");
            return false;
        }
    }

    // 2. Moving to the current square is never a move.
    if mv.from == mv.to {
        return false;
    }

    // 3. Movement shape allowed for this piece kind.
    if !shape_allowed(&state.board, mv.piece, mv.from, mv.to) {
        tracing::debug!(from = %mv.from, to = %mv.to, kind = %mv.piece.kind, "rejected: shape");
        return false;
    }

    // 4. Sliding pieces need a clear path.
    if mv.piece.kind.is_sliding() {
        let blocked = topology::path_between(mv.from, mv.to)
            .iter()
            .any(|c| state.board.get(*c).is_some());
        if blocked {
            return false;
        }
    }

    // 5. Destination must be on the board.
    if !board::exists(mv.to) {
        return false;
    }

    // The destination may hold an enemy piece (a capture), never one's own.
    if let Some(occupant) = state.board.get(mv.to) {
        if occupant.color == mv.piece.color {
            return false;
        }
    }

    // 6. The mover must own the piece and still be in the game.
    if mv.piece.color != as_color || !state.is_active(as_color) {
        return false;
    }

    // 7. The move must not leave the mover's own king in check, judged on
    // a scratch copy — the live occupancy is never touched here.
    let scratch = simulate(&state.board, mv);
    if check::is_in_check(&scratch, mv.piece.color) {
        return false;
    }

    true
}

/// Apply a candidate move to a copy of the occupancy and return the copy.
/// Shared by the validator's king-safety check and by the commit path so
/// the two can never disagree about what a move does.
pub fn simulate(occupancy: &Occupancy, mv: &CandidateMove) -> Occupancy {
    let mut next = occupancy.clone();
    next.remove(mv.from);
    let mut piece = mv.piece;
    piece.has_moved = true;
    if let Some(promo) = mv.promotion {
        piece.kind = promo;
    }
    next.put(mv.to, piece);
    next
}

fn shape_allowed(occupancy: &Occupancy, piece: Piece, from: Cell, to: Cell) -> bool {
    match piece.kind {
        PieceKind::Rook => slider_allowed(from, to, &directions::STRAIGHT, topology::is_straight_line),
        PieceKind::Bishop => slider_allowed(from, to, &directions::DIAGONAL, topology::is_diagonal_line),
        PieceKind::Queen => {
            slider_allowed(from, to, &directions::STRAIGHT, topology::is_straight_line)
                || slider_allowed(from, to, &directions::DIAGONAL, topology::is_diagonal_line)
        }
        PieceKind::King => {
            let (dc, dr) = from.delta_to(to);
            movegen::KING_OFFSETS.contains(&(dc, dr)) && board::exists(to)
        }
        PieceKind::Knight => {
            let (dc, dr) = from.delta_to(to);
            movegen::KNIGHT_OFFSETS.contains(&(dc, dr)) && board::exists(to)
        }
        PieceKind::Pawn => pawn_shape_allowed(occupancy, piece, from, to),
    }
}

/// A slider move must read as one of the piece's named directions — or as
/// an unrecognized heading — *and* the topology must confirm the line. The
/// two conditions are independently necessary: a plausible heading over
/// cells that are not in line is rejected, and a confirmed line is accepted
/// even when its heading has no name (the seam bridges).
fn slider_allowed(
    from: Cell,
    to: Cell,
    named_set: &[directions::Named],
    in_line: fn(Cell, Cell) -> bool,
) -> bool {
    match directions::resolve(from, to) {
        Resolution::NoMove => false,
        Resolution::Named(d) if named_set.contains(&d) => in_line(from, to),
        _ => in_line(from, to),
    }
}

fn pawn_shape_allowed(occupancy: &Occupancy, piece: Piece, from: Cell, to: Cell) -> bool {
    match occupancy.get(to) {
        // Pushes only onto empty cells.
        None => movegen::pawn_pushes(piece.color, from).contains(&to),
        // Captures only onto enemy-occupied capture cells — never straight
        // ahead.
        Some(other) => {
            other.color != piece.color && movegen::pawn_captures(piece.color, from).contains(&to)
        }
    }
}
