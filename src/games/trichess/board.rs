//! The closed cell set and the occupancy store.
//!
//! The board is six 4×4 blocks with non-contiguous labels; existence is a
//! set-membership question, not a bounds check. `Occupancy` is the single
//! source of truth for which piece stands where, and its `put` is the only
//! commit point for a move.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::types::{Cell, Piece, PieceColor, PieceKind};

/// The six quadrant blocks: (first column, last column, first row, last row).
const BLOCKS: [(char, char, u8, u8); 6] = [
    ('A', 'D', 1, 4),
    ('A', 'D', 5, 8),
    ('E', 'H', 1, 4),
    ('E', 'H', 9, 12),
    ('I', 'L', 5, 8),
    ('I', 'L', 9, 12),
];

static CELLS: Lazy<Vec<Cell>> = Lazy::new(|| {
    let mut cells = Vec::with_capacity(96);
    for (c0, c1, r0, r1) in BLOCKS {
        for col in c0..=c1 {
            for row in r0..=r1 {
                cells.push(Cell::new(col, row));
            }
        }
    }
    cells
});

static CELL_SET: Lazy<BTreeSet<Cell>> = Lazy::new(|| CELLS.iter().copied().collect());

/// True iff the label names a square on the board. Stable for the life of
/// the process; the cell set never changes.
pub fn exists(cell: Cell) -> bool {
    CELL_SET.contains(&cell)
}

/// All 96 valid cells, in a stable order.
pub fn all_cells() -> &'static [Cell] {
    &CELLS
}

/// Piece placement. At most one piece per cell, enforced by construction:
/// `put` on an occupied cell returns the displaced piece so the caller can
/// surface the capture — it is never a silent overwrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Occupancy {
    pieces: super::types::PieceMap,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: Cell) -> Option<&Piece> {
        self.pieces.get(&cell)
    }

    /// Places a piece and returns the previous occupant, if any — an
    /// implicit capture the caller must account for. Placement on a
    /// non-board cell is refused.
    pub fn put(&mut self, cell: Cell, piece: Piece) -> Option<Piece> {
        if !exists(cell) {
            tracing::warn!(%cell, "refusing to place a piece on a non-board cell");
            return None;
        }
        self.pieces.insert(cell, piece)
    }

    pub fn remove(&mut self, cell: Cell) -> Option<Piece> {
        self.pieces.remove(&cell)
    }

    pub fn all_occupied(&self) -> impl Iterator<Item = (Cell, &Piece)> {
        self.pieces.iter().map(|(cell, piece)| (*cell, piece))
    }

    pub fn pieces_of(&self, color: PieceColor) -> Vec<(Cell, Piece)> {
        self.pieces
            .iter()
            .filter(|(_, p)| p.color == color)
            .map(|(cell, piece)| (*cell, *piece))
            .collect()
    }

    pub fn find_king(&self, color: PieceColor) -> Option<Cell> {
        self.pieces
            .iter()
            .find(|(_, p)| p.color == color && p.kind == PieceKind::King)
            .map(|(cell, _)| *cell)
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_has_96_cells() {
        assert_eq!(all_cells().len(), 96);
    }

    #[test]
    fn existence_is_set_membership() {
        for label in ["A1", "D8", "E4", "H12", "I5", "L12", "E9", "A5"] {
            assert!(exists(label.parse().unwrap()), "{label} should exist");
        }
        // The label space is larger than the board: these parse but are holes.
        for label in ["E5", "F6", "G7", "H8", "A9", "D12", "I4", "L1"] {
            assert!(!exists(label.parse().unwrap()), "{label} should not exist");
        }
    }

    #[test]
    fn put_reports_capture() {
        let mut occ = Occupancy::new();
        let cell: Cell = "C3".parse().unwrap();
        let white = Piece::new(PieceColor::White, PieceKind::Rook);
        let gray = Piece::new(PieceColor::Gray, PieceKind::Pawn);
        assert_eq!(occ.put(cell, gray), None);
        let captured = occ.put(cell, white);
        assert_eq!(captured, Some(gray));
        assert_eq!(occ.get(cell), Some(&white));
    }

    #[test]
    fn put_refuses_non_board_cells() {
        let mut occ = Occupancy::new();
        occ.put("E5".parse().unwrap(), Piece::new(PieceColor::White, PieceKind::Pawn));
        assert_eq!(occ.piece_count(), 0);
    }

    #[test]
    fn find_king_by_color() {
        let mut occ = Occupancy::new();
        occ.put("E1".parse().unwrap(), Piece::new(PieceColor::Gray, PieceKind::King));
        occ.put("I8".parse().unwrap(), Piece::new(PieceColor::White, PieceKind::King));
        assert_eq!(occ.find_king(PieceColor::Gray), Some("E1".parse().unwrap()));
        assert_eq!(occ.find_king(PieceColor::White), Some("I8".parse().unwrap()));
        assert_eq!(occ.find_king(PieceColor::Black), None);
    }
}
