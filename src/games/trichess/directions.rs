//! Per-color displacement vocabulary and direction resolution.
//!
//! Eighteen named directions, six per color, expressed in (Δcolumn, Δrow)
//! space. The names are semantic labels: resolution tells a caller *which*
//! direction a move reads as, while the topology module independently
//! decides whether the cells are actually in line — the two checks are not
//! substitutes.

use super::types::{Cell, PieceColor, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dc: i8,
    pub dr: i8,
}

impl Direction {
    pub const fn new(dc: i8, dr: i8) -> Self {
        Self { dc, dr }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Named {
    WhiteForward,
    WhiteForwardRight,
    WhiteForwardLeft,
    WhiteBackward,
    WhiteBackwardRight,
    WhiteBackwardLeft,
    BlackForward,
    BlackForwardRight,
    BlackForwardLeft,
    BlackBackward,
    BlackBackwardRight,
    BlackBackwardLeft,
    GrayForward,
    GrayForwardRight,
    GrayForwardLeft,
    GrayBackward,
    GrayBackwardRight,
    GrayBackwardLeft,
}

impl Named {
    pub const ALL: [Named; 18] = [
        Named::WhiteForward,
        Named::WhiteForwardRight,
        Named::WhiteForwardLeft,
        Named::WhiteBackward,
        Named::WhiteBackwardRight,
        Named::WhiteBackwardLeft,
        Named::BlackForward,
        Named::BlackForwardRight,
        Named::BlackForwardLeft,
        Named::BlackBackward,
        Named::BlackBackwardRight,
        Named::BlackBackwardLeft,
        Named::GrayForward,
        Named::GrayForwardRight,
        Named::GrayForwardLeft,
        Named::GrayBackward,
        Named::GrayBackwardRight,
        Named::GrayBackwardLeft,
    ];

    pub fn vector(self) -> Direction {
        match self {
            Named::WhiteForward => Direction::new(1, -1),
            Named::WhiteForwardRight => Direction::new(1, 0),
            Named::WhiteForwardLeft => Direction::new(0, -1),
            Named::WhiteBackward => Direction::new(-1, 1),
            Named::WhiteBackwardRight => Direction::new(-1, 0),
            Named::WhiteBackwardLeft => Direction::new(0, 1),
            Named::BlackForward => Direction::new(-1, -1),
            Named::BlackForwardRight => Direction::new(0, -1),
            Named::BlackForwardLeft => Direction::new(-1, 0),
            Named::BlackBackward => Direction::new(1, 1),
            Named::BlackBackwardRight => Direction::new(1, 0),
            Named::BlackBackwardLeft => Direction::new(0, 1),
            Named::GrayForward => Direction::new(0, 1),
            Named::GrayForwardRight => Direction::new(1, 1),
            Named::GrayForwardLeft => Direction::new(-1, 1),
            Named::GrayBackward => Direction::new(0, -1),
            Named::GrayBackwardRight => Direction::new(1, -1),
            Named::GrayBackwardLeft => Direction::new(-1, -1),
        }
    }

    pub fn color(self) -> PieceColor {
        match self {
            Named::WhiteForward
            | Named::WhiteForwardRight
            | Named::WhiteForwardLeft
            | Named::WhiteBackward
            | Named::WhiteBackwardRight
            | Named::WhiteBackwardLeft => PieceColor::White,
            Named::BlackForward
            | Named::BlackForwardRight
            | Named::BlackForwardLeft
            | Named::BlackBackward
            | Named::BlackBackwardRight
            | Named::BlackBackwardLeft => PieceColor::Black,
            _ => PieceColor::Gray,
        }
    }
}

/// The straight-slider vocabulary: each color's forward and backward.
pub const STRAIGHT: [Named; 6] = [
    Named::WhiteForward,
    Named::WhiteBackward,
    Named::BlackForward,
    Named::BlackBackward,
    Named::GrayForward,
    Named::GrayBackward,
];

/// The diagonal-slider vocabulary: each color's four oblique directions.
pub const DIAGONAL: [Named; 12] = [
    Named::WhiteForwardRight,
    Named::WhiteForwardLeft,
    Named::WhiteBackwardRight,
    Named::WhiteBackwardLeft,
    Named::BlackForwardRight,
    Named::BlackForwardLeft,
    Named::BlackBackwardRight,
    Named::BlackBackwardLeft,
    Named::GrayForwardRight,
    Named::GrayForwardLeft,
    Named::GrayBackwardRight,
    Named::GrayBackwardLeft,
];

/// How a (source, destination) pair reads as a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Zero displacement — always illegal.
    NoMove,
    Named(Named),
    /// No named direction fits; sliders may still traverse it when the
    /// board topology confirms the line.
    Custom(Direction),
}

/// Similarity tolerance for matching a long slide to a named direction.
const COSINE_TOLERANCE: f64 = 0.3;

/// Resolve a displacement to a semantic direction. Single steps must match
/// a named vector exactly; longer slides accept the nearest named direction
/// within the cosine-similarity tolerance; anything else is `Custom`.
pub fn resolve(source: Cell, destination: Cell) -> Resolution {
    let (dc, dr) = source.delta_to(destination);
    if dc == 0 && dr == 0 {
        return Resolution::NoMove;
    }

    let len = f64::from(i32::from(dc).pow(2) + i32::from(dr).pow(2)).sqrt();
    if len > 1.5 {
        let mut best: Option<(f64, Named)> = None;
        for named in Named::ALL {
            let v = named.vector();
            let dot = f64::from(i32::from(dc) * i32::from(v.dc) + i32::from(dr) * i32::from(v.dr));
            let vlen = f64::from(i32::from(v.dc).pow(2) + i32::from(v.dr).pow(2)).sqrt();
            let gap = (dot / (len * vlen) - 1.0).abs();
            if best.map_or(true, |(b, _)| gap < b) {
                best = Some((gap, named));
            }
        }
        match best {
            Some((gap, named)) if gap < COSINE_TOLERANCE => Resolution::Named(named),
            _ => Resolution::Custom(Direction::new(dc, dr)),
        }
    } else {
        for named in Named::ALL {
            let v = named.vector();
            if v.dc == dc && v.dr == dr {
                return Resolution::Named(named);
            }
        }
        Resolution::Custom(Direction::new(dc, dr))
    }
}

/// The named-direction set a piece kind slides or steps along. Knights are
/// offset-jumpers and pawns are table-driven; both return an empty set here
/// and are resolved against their own tables in move generation.
pub fn directions_for(kind: PieceKind, color: PieceColor) -> Vec<Named> {
    match kind {
        PieceKind::Rook => STRAIGHT.to_vec(),
        PieceKind::Bishop => DIAGONAL.to_vec(),
        PieceKind::Queen | PieceKind::King => {
            let mut all = STRAIGHT.to_vec();
            all.extend_from_slice(&DIAGONAL);
            all
        }
        PieceKind::Pawn => Named::ALL
            .into_iter()
            .filter(|n| n.color() == color)
            .collect(),
        PieceKind::Knight => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(label: &str) -> Cell {
        label.parse().unwrap()
    }

    #[test]
    fn zero_displacement_is_no_move() {
        assert_eq!(resolve(cell("D5"), cell("D5")), Resolution::NoMove);
    }

    #[test]
    fn single_steps_match_exactly() {
        match resolve(cell("B2"), cell("C3")) {
            Resolution::Named(n) => assert_eq!(n.vector(), Direction::new(1, 1)),
            other => panic!("expected a named direction, got {other:?}"),
        }
    }

    #[test]
    fn long_slides_match_by_similarity() {
        // A pure column slide of length 4 still reads as a column direction.
        match resolve(cell("A8"), cell("A4")) {
            Resolution::Named(n) => assert_eq!(n.vector(), Direction::new(0, -1)),
            other => panic!("expected a named direction, got {other:?}"),
        }
    }

    #[test]
    fn skew_slides_resolve_to_nearest_heading() {
        // The eight named vectors are 45° apart, so with the 0.3 tolerance
        // every long slide reads as the nearest of them — (4, 2) leans (1, 1).
        match resolve(cell("B2"), cell("F4")) {
            Resolution::Named(n) => assert_eq!(n.vector(), Direction::new(1, 1)),
            other => panic!("expected a named direction, got {other:?}"),
        }
    }

    #[test]
    fn piece_direction_sets() {
        assert_eq!(directions_for(PieceKind::Rook, PieceColor::White).len(), 6);
        assert_eq!(directions_for(PieceKind::Bishop, PieceColor::White).len(), 12);
        assert_eq!(directions_for(PieceKind::Queen, PieceColor::White).len(), 18);
        assert_eq!(directions_for(PieceKind::Pawn, PieceColor::Gray).len(), 6);
        assert!(directions_for(PieceKind::Knight, PieceColor::Black).is_empty());
    }
}
