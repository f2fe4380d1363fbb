//! Domain types for TriChess.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A board coordinate: column letter A–L plus row 1–12.
///
/// A `Cell` is only a label. Whether it names a square that is actually on
/// the board is decided by the enumerated set in [`super::board`], never by
/// arithmetic bounds — the board has holes (e.g. `E5` or `A9` parse fine but
/// do not exist).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub col: char,
    pub row: u8,
}

impl Cell {
    pub const fn new(col: char, row: u8) -> Self {
        Self { col, row }
    }

    /// Zero-based column index (A = 0 … L = 11), for delta arithmetic.
    pub fn col_index(&self) -> i8 {
        self.col as i8 - 'A' as i8
    }

    /// (Δcolumn, Δrow) from `self` to `other`.
    pub fn delta_to(&self, other: Cell) -> (i8, i8) {
        (
            other.col_index() - self.col_index(),
            other.row as i8 - self.row as i8,
        )
    }

    /// The cell displaced by (dc, dr), if the label stays within A–L / 1–12.
    /// Existence on the board is a separate question.
    pub fn offset(&self, dc: i8, dr: i8) -> Option<Cell> {
        let col = self.col_index() + dc;
        let row = self.row as i8 + dr;
        if (0..12).contains(&col) && (1..=12).contains(&row) {
            Some(Cell::new((b'A' + col as u8) as char, row as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col, self.row)
    }
}

impl FromStr for Cell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let col = chars
            .next()
            .ok_or_else(|| format!("empty cell label: {s:?}"))?
            .to_ascii_uppercase();
        if !('A'..='L').contains(&col) {
            return Err(format!("column out of range in cell label {s:?}"));
        }
        let row: u8 = chars
            .as_str()
            .parse()
            .map_err(|_| format!("bad row in cell label {s:?}"))?;
        if !(1..=12).contains(&row) {
            return Err(format!("row out of range in cell label {s:?}"));
        }
        Ok(Cell::new(col, row))
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct CellVisitor;

impl Visitor<'_> for CellVisitor {
    type Value = Cell;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a cell label like \"A8\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Cell, E> {
        v.parse().map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(CellVisitor)
    }
}

/// The three players, identified by piece color. Seat order is the turn
/// order: White → Gray → Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    White,
    Gray,
    Black,
}

impl PieceColor {
    pub const ALL: [PieceColor; 3] = [PieceColor::White, PieceColor::Gray, PieceColor::Black];

    pub fn seat(self) -> usize {
        match self {
            PieceColor::White => 0,
            PieceColor::Gray => 1,
            PieceColor::Black => 2,
        }
    }

    pub fn from_seat(seat: usize) -> Option<PieceColor> {
        PieceColor::ALL.get(seat).copied()
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceColor::White => "white",
            PieceColor::Gray => "gray",
            PieceColor::Black => "black",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Sliding pieces extend their range until blocked.
    pub fn is_sliding(self) -> bool {
        matches!(self, PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop)
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            PieceKind::King => "K",
            PieceKind::Queen => "Q",
            PieceKind::Rook => "R",
            PieceKind::Bishop => "B",
            PieceKind::Knight => "N",
            PieceKind::Pawn => "P",
        }
    }

    /// Conventional material value, used for scores. The king carries none.
    pub fn material_value(self) -> f64 {
        match self {
            PieceKind::King => 0.0,
            PieceKind::Queen => 9.0,
            PieceKind::Rook => 5.0,
            PieceKind::Bishop => 3.0,
            PieceKind::Knight => 3.0,
            PieceKind::Pawn => 1.0,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::King => "king",
            PieceKind::Queen => "queen",
            PieceKind::Rook => "rook",
            PieceKind::Bishop => "bishop",
            PieceKind::Knight => "knight",
            PieceKind::Pawn => "pawn",
        };
        f.write_str(name)
    }
}

impl FromStr for PieceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "king" => Ok(PieceKind::King),
            "queen" => Ok(PieceKind::Queen),
            "rook" => Ok(PieceKind::Rook),
            "bishop" => Ok(PieceKind::Bishop),
            "knight" => Ok(PieceKind::Knight),
            "pawn" => Ok(PieceKind::Pawn),
            _ => Err(format!("unknown piece kind {s:?}")),
        }
    }
}

/// One chess unit. Position is not stored here — the occupancy store is the
/// single source of truth for where a piece stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub color: PieceColor,
    pub kind: PieceKind,
    /// Tracked for completeness; nothing consumes it yet (no castling or
    /// double-step rules in this variant).
    #[serde(default)]
    pub has_moved: bool,
}

impl Piece {
    pub fn new(color: PieceColor, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            has_moved: false,
        }
    }
}

/// An ephemeral candidate move, built per attempt and discarded after
/// validation or application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateMove {
    pub from: Cell,
    pub to: Cell,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: Option<PieceKind>,
}

/// Full TriChess game state as carried across the plugin boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriChessState {
    pub board: super::board::Occupancy,
    pub current_player_index: usize,
    /// Player ids in seat order: seat 0 plays White, 1 Gray, 2 Black.
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub eliminated: Vec<PieceColor>,
    #[serde(default)]
    pub move_count: u32,
}

impl TriChessState {
    pub fn current_color(&self) -> PieceColor {
        PieceColor::from_seat(self.current_player_index).unwrap_or(PieceColor::White)
    }

    /// Player id seated as `color`; falls back to the color name when the
    /// state predates the seat list.
    pub fn player_id_for(&self, color: PieceColor) -> String {
        self.players
            .get(color.seat())
            .cloned()
            .unwrap_or_else(|| color.to_string())
    }

    pub fn color_of_player(&self, player_id: &str) -> Option<PieceColor> {
        self.players
            .iter()
            .position(|p| p == player_id)
            .and_then(PieceColor::from_seat)
    }

    pub fn is_active(&self, color: PieceColor) -> bool {
        !self.eliminated.contains(&color)
    }

    pub fn active_colors(&self) -> Vec<PieceColor> {
        PieceColor::ALL
            .into_iter()
            .filter(|c| self.is_active(*c))
            .collect()
    }

    pub fn material_score(&self, color: PieceColor) -> f64 {
        self.board
            .all_occupied()
            .filter(|(_, p)| p.color == color)
            .map(|(_, p)| p.kind.material_value())
            .sum()
    }
}

/// Keyed piece map used inside [`TriChessState`]; re-exported here so the
/// state type reads naturally at the plugin layer.
pub type PieceMap = BTreeMap<Cell, Piece>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_label_roundtrip() {
        for label in ["A1", "D5", "I9", "L12"] {
            let cell: Cell = label.parse().unwrap();
            assert_eq!(cell.to_string(), label);
        }
    }

    #[test]
    fn cell_rejects_bad_labels() {
        assert!("M1".parse::<Cell>().is_err());
        assert!("A0".parse::<Cell>().is_err());
        assert!("A13".parse::<Cell>().is_err());
        assert!("".parse::<Cell>().is_err());
        assert!("7A".parse::<Cell>().is_err());
    }

    #[test]
    fn cell_offset_stays_in_label_space() {
        let a1 = Cell::new('A', 1);
        assert_eq!(a1.offset(1, 1), Some(Cell::new('B', 2)));
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
        assert_eq!(Cell::new('L', 12).offset(1, 0), None);
    }

    #[test]
    fn cell_serializes_as_string() {
        let cell = Cell::new('J', 10);
        assert_eq!(serde_json::to_value(cell).unwrap(), serde_json::json!("J10"));
        let back: Cell = serde_json::from_value(serde_json::json!("J10")).unwrap();
        assert_eq!(back, cell);
    }

    #[test]
    fn seat_order_is_turn_order() {
        assert_eq!(PieceColor::from_seat(0), Some(PieceColor::White));
        assert_eq!(PieceColor::from_seat(1), Some(PieceColor::Gray));
        assert_eq!(PieceColor::from_seat(2), Some(PieceColor::Black));
        assert_eq!(PieceColor::from_seat(3), None);
    }
}
