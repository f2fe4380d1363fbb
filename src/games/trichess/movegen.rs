//! Per-piece-kind candidate generation.
//!
//! Sliders are generated by scanning the closed cell set against the
//! topology predicates. Pawns are driven by the per-color seam tables
//! below — the rule tables are authoritative data; the special cases at
//! the central rosette are not derivable from the regular row arithmetic.

use super::board::{self, Occupancy};
use super::topology;
use super::types::{CandidateMove, Cell, Piece, PieceColor, PieceKind, TriChessState};
use super::validator;

pub const KNIGHT_OFFSETS: [(i8, i8); 12] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 2),
    (2, -2),
    (-2, 2),
    (-2, -2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Rows on which a pawn of the given color promotes — the opponent home
/// ranks its push table can actually deliver it to.
pub fn promotion_rows(color: PieceColor) -> &'static [u8] {
    match color {
        PieceColor::White => &[1, 12],
        PieceColor::Gray => &[8, 12],
        PieceColor::Black => &[1],
    }
}

fn push_if_on_board(out: &mut Vec<Cell>, col: char, row: i8) {
    if !(1..=12).contains(&row) {
        return;
    }
    let cell = Cell::new(col, row as u8);
    if board::exists(cell) {
        out.push(cell);
    }
}

/// Forward push targets for a pawn of `color` standing on `from`.
///
/// White pawns descend through A–D and the I–L low rows, crossing at the
/// rosette; Gray pawns ascend; Black pawns descend from the high rows and
/// fan out at row 9. Targets off the board are dropped — a cell whose
/// every entry is dropped simply has no push move.
pub fn pawn_pushes(color: PieceColor, from: Cell) -> Vec<Cell> {
    let mut targets = Vec::new();
    let (col, row) = (from.col, from.row as i8);
    match color {
        PieceColor::White => match (col, row) {
            ('D', 5) => push_if_on_board(&mut targets, 'E', 9),
            ('I', 5) => push_if_on_board(&mut targets, 'E', 4),
            ('D', 4) => push_if_on_board(&mut targets, 'I', 9),
            ('E', 4) => push_if_on_board(&mut targets, 'I', 5),
            ('I'..='L', 5) => push_if_on_board(&mut targets, col, 9),
            ('I'..='L', 9..) => push_if_on_board(&mut targets, col, row + 1),
            _ => push_if_on_board(&mut targets, col, row - 1),
        },
        PieceColor::Gray => match (col, row) {
            ('D', 4) => push_if_on_board(&mut targets, 'I', 9),
            ('E', 4) => push_if_on_board(&mut targets, 'I', 5),
            _ => push_if_on_board(&mut targets, col, row + 1),
        },
        PieceColor::Black => match (col, row) {
            ('I', 9) => push_if_on_board(&mut targets, 'D', 4),
            ('E', 9) => push_if_on_board(&mut targets, 'D', 5),
            ('I'..='L', 9) => {
                let mapped = (b'E' + (col as u8 - b'I')) as char;
                push_if_on_board(&mut targets, mapped, 4);
                push_if_on_board(&mut targets, col, 5);
            }
            ('E'..='H', 9) => {
                let mapped = (b'I' + (col as u8 - b'E')) as char;
                push_if_on_board(&mut targets, mapped, 4);
                push_if_on_board(&mut targets, col, 5);
            }
            _ => push_if_on_board(&mut targets, col, row - 1),
        },
    }
    targets
}

/// Capture cells for a pawn of `color` on `from`: the lateral neighbors of
/// each push target. On plain cells this reduces to the two forward
/// diagonals; at the rosette it follows the same bridges the pushes do.
pub fn pawn_captures(color: PieceColor, from: Cell) -> Vec<Cell> {
    let mut cells = Vec::new();
    for target in pawn_pushes(color, from) {
        for dc in [-1i8, 1] {
            if let Some(lateral) = target.offset(dc, 0) {
                if board::exists(lateral) && !cells.contains(&lateral) {
                    cells.push(lateral);
                }
            }
        }
    }
    cells
}

/// Pseudo-legal moves: movement shape, blocking and capture rules, but no
/// turn or king-safety filtering. Check detection relies on this layer to
/// avoid recursing into itself.
pub fn pseudo_moves(occupancy: &Occupancy, from: Cell, piece: Piece) -> Vec<CandidateMove> {
    if !board::exists(from) {
        return Vec::new();
    }
    let mut moves = Vec::new();
    match piece.kind {
        PieceKind::King => step_moves(occupancy, from, piece, &KING_OFFSETS, &mut moves),
        PieceKind::Knight => step_moves(occupancy, from, piece, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Rook => slider_moves(occupancy, from, piece, topology::is_straight_line, &mut moves),
        PieceKind::Bishop => slider_moves(occupancy, from, piece, topology::is_diagonal_line, &mut moves),
        PieceKind::Queen => {
            slider_moves(occupancy, from, piece, topology::is_straight_line, &mut moves);
            slider_moves(occupancy, from, piece, topology::is_diagonal_line, &mut moves);
        }
        PieceKind::Pawn => pawn_moves(occupancy, from, piece, &mut moves),
    }
    moves
}

fn step_moves(
    occupancy: &Occupancy,
    from: Cell,
    piece: Piece,
    offsets: &[(i8, i8)],
    out: &mut Vec<CandidateMove>,
) {
    for &(dc, dr) in offsets {
        let Some(to) = from.offset(dc, dr) else { continue };
        if !board::exists(to) {
            continue;
        }
        match occupancy.get(to) {
            Some(other) if other.color == piece.color => {}
            other => out.push(CandidateMove {
                from,
                to,
                piece,
                captured: other.copied(),
                promotion: None,
            }),
        }
    }
}

fn slider_moves(
    occupancy: &Occupancy,
    from: Cell,
    piece: Piece,
    in_line: fn(Cell, Cell) -> bool,
    out: &mut Vec<CandidateMove>,
) {
    for &to in board::all_cells() {
        if to == from || !in_line(from, to) {
            continue;
        }
        if out.iter().any(|m| m.to == to) {
            continue;
        }
        let blocked = topology::path_between(from, to)
            .iter()
            .any(|c| occupancy.get(*c).is_some());
        if blocked {
            continue;
        }
        match occupancy.get(to) {
            Some(other) if other.color == piece.color => {}
            other => out.push(CandidateMove {
                from,
                to,
                piece,
                captured: other.copied(),
                promotion: None,
            }),
        }
    }
}

fn pawn_moves(occupancy: &Occupancy, from: Cell, piece: Piece, out: &mut Vec<CandidateMove>) {
    for to in pawn_pushes(piece.color, from) {
        if occupancy.get(to).is_none() {
            push_pawn_candidates(from, to, piece, None, out);
        }
    }
    for to in pawn_captures(piece.color, from) {
        match occupancy.get(to) {
            Some(other) if other.color != piece.color => {
                push_pawn_candidates(from, to, piece, Some(*other), out);
            }
            _ => {}
        }
    }
}

fn push_pawn_candidates(
    from: Cell,
    to: Cell,
    piece: Piece,
    captured: Option<Piece>,
    out: &mut Vec<CandidateMove>,
) {
    if promotion_rows(piece.color).contains(&to.row) {
        for promo in [
            PieceKind::Queen,
            PieceKind::Rook,
            PieceKind::Bishop,
            PieceKind::Knight,
        ] {
            out.push(CandidateMove {
                from,
                to,
                piece,
                captured,
                promotion: Some(promo),
            });
        }
    } else {
        out.push(CandidateMove {
            from,
            to,
            piece,
            captured,
            promotion: None,
        });
    }
}

/// Fully legal moves for the piece on `from`, evaluated as if `as_color`
/// were on turn. Every candidate passes the validator, so generated lists
/// and validator verdicts never disagree.
pub fn legal_moves_as(state: &TriChessState, as_color: PieceColor, from: Cell) -> Vec<CandidateMove> {
    let Some(piece) = state.board.get(from).copied() else {
        return Vec::new();
    };
    if piece.color != as_color {
        return Vec::new();
    }
    pseudo_moves(&state.board, from, piece)
        .into_iter()
        .filter(|mv| validator::is_valid_move(state, as_color, mv))
        .collect()
}

/// Legal moves for the piece on `from` under the live turn order.
pub fn possible_moves(state: &TriChessState, from: Cell) -> Vec<CandidateMove> {
    legal_moves_as(state, state.current_color(), from)
}

/// True iff `color` has at least one fully legal move anywhere.
pub fn has_any_legal_move(state: &TriChessState, color: PieceColor) -> bool {
    state
        .board
        .pieces_of(color)
        .iter()
        .any(|(cell, _)| !legal_moves_as(state, color, *cell).is_empty())
}

/// Destination check used by the detectors: whether any piece of `color`
/// pseudo-attacks `target`.
pub fn color_attacks(occupancy: &Occupancy, color: PieceColor, target: Cell) -> bool {
    occupancy
        .all_occupied()
        .filter(|(_, p)| p.color == color)
        .any(|(cell, piece)| {
            pseudo_moves(occupancy, cell, *piece)
                .iter()
                .any(|m| m.to == target)
        })
}
