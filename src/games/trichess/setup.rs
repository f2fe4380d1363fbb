//! Initial layout, kept as static configuration rather than code.
//!
//! Each player fields eight pieces and eight pawns on their two home
//! ranks: White on rows 8/7 (columns A–D and I–L), Gray on rows 1/2
//! (columns A–H), Black on rows 12/11 (columns E–L).

use serde::Deserialize;

use super::board::Occupancy;
use super::types::{Cell, Piece, PieceColor, PieceKind};

const INITIAL_LAYOUT: &str = r#"
[[players]]
color = "white"
king = "I8"
queen = "D8"
rooks = ["A8", "L8"]
bishops = ["C8", "J8"]
knights = ["B8", "K8"]
pawns = ["A7", "B7", "C7", "D7", "I7", "J7", "K7", "L7"]

[[players]]
color = "gray"
king = "E1"
queen = "D1"
rooks = ["A1", "H1"]
bishops = ["C1", "F1"]
knights = ["B1", "G1"]
pawns = ["A2", "B2", "C2", "D2", "E2", "F2", "G2", "H2"]

[[players]]
color = "black"
king = "I12"
queen = "H12"
rooks = ["E12", "L12"]
bishops = ["G12", "J12"]
knights = ["F12", "K12"]
pawns = ["E11", "F11", "G11", "H11", "I11", "J11", "K11", "L11"]
"#;

#[derive(Debug, Deserialize)]
struct Layout {
    players: Vec<PlayerLayout>,
}

#[derive(Debug, Deserialize)]
struct PlayerLayout {
    color: PieceColor,
    king: Cell,
    queen: Cell,
    rooks: Vec<Cell>,
    bishops: Vec<Cell>,
    knights: Vec<Cell>,
    pawns: Vec<Cell>,
}

/// Build the 48-piece starting occupancy from the embedded layout.
pub fn initial_occupancy() -> Occupancy {
    let layout: Layout =
        toml::from_str(INITIAL_LAYOUT).expect("embedded initial layout must parse");
    let mut occupancy = Occupancy::new();
    for player in &layout.players {
        let mut place = |cell: Cell, kind: PieceKind| {
            let displaced = occupancy.put(cell, Piece::new(player.color, kind));
            debug_assert!(displaced.is_none(), "layout places two pieces on {cell}");
        };
        place(player.king, PieceKind::King);
        place(player.queen, PieceKind::Queen);
        for &cell in &player.rooks {
            place(cell, PieceKind::Rook);
        }
        for &cell in &player.bishops {
            place(cell, PieceKind::Bishop);
        }
        for &cell in &player.knights {
            place(cell, PieceKind::Knight);
        }
        for &cell in &player.pawns {
            place(cell, PieceKind::Pawn);
        }
    }
    occupancy
}
