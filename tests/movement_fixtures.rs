//! Board-position fixtures for the seam tables.
//!
//! The diagonal pairs below were settled against visual reference boards;
//! they are the acceptance data for `topology::is_diagonal_line` and
//! friends. Every pair is checked in both directions — the tables must be
//! symmetric.

use trichess_engine::games::trichess::board;
use trichess_engine::games::trichess::topology::{
    is_diagonal_line, is_straight_line, path_between,
};
use trichess_engine::games::trichess::types::Cell;

fn cell(label: &str) -> Cell {
    label.parse().unwrap()
}

/// Cell pairs accepted as diagonal, restricted to pairs where both labels
/// are actual board cells.
const DIAGONAL_PAIRS: &[(&str, &str)] = &[
    // Plain ±45° relations.
    ("A1", "C3"),
    ("E9", "H12"),
    ("I5", "L8"),
    ("B2", "D4"),
    ("J6", "L8"),
    ("I5", "K7"),
    ("A5", "E9"),
    ("E4", "I8"),
    ("F3", "J7"),
    ("G2", "K6"),
    ("A6", "C4"),
    ("L7", "J5"),
    ("L7", "K6"),
    ("K6", "J5"),
    ("E9", "F10"),
    ("I10", "J9"),
    // The long diagonal and its cross-seam segments.
    ("A1", "L8"),
    ("B2", "K7"),
    ("C3", "J6"),
    ("D4", "I5"),
    // Cross-rosette lines with on-board waypoints.
    ("C5", "D5"),
    ("C5", "I7"),
    ("K9", "J7"),
    ("K9", "J5"),
    ("J7", "J5"),
    ("J6", "E9"),
    ("F9", "E9"),
    // Cross-rosette bridges.
    ("B4", "F10"),
    ("C3", "G9"),
    ("D3", "I9"),
    ("E4", "J10"),
    ("E3", "H9"),
    ("G4", "J10"),
    ("F4", "H10"),
    ("J12", "F9"),
    ("L10", "I6"),
    ("F12", "K5"),
    ("G9", "H4"),
    ("F9", "G4"),
    ("D7", "L10"),
    ("L10", "J5"),
    ("J9", "D6"),
    ("J12", "G4"),
    ("E9", "I10"),
    ("H10", "E3"),
    ("F12", "I10"),
];

#[test]
fn every_fixture_pair_is_diagonal_both_ways() {
    for (a, b) in DIAGONAL_PAIRS {
        assert!(
            is_diagonal_line(cell(a), cell(b)),
            "{a} -> {b} should be a diagonal"
        );
        assert!(
            is_diagonal_line(cell(b), cell(a)),
            "{b} -> {a} should be a diagonal"
        );
    }
}

#[test]
fn rejected_non_diagonals() {
    for (a, b) in [("A1", "A2"), ("A1", "B1"), ("A1", "D5")] {
        assert!(
            !is_diagonal_line(cell(a), cell(b)),
            "{a} -> {b} must not be a diagonal"
        );
    }
}

#[test]
fn straight_seam_fixtures() {
    for (a, b) in [
        ("E4", "I5"),
        ("E1", "I8"),
        ("F2", "J6"),
        ("D5", "E9"),
        ("C8", "F12"),
        ("A8", "H12"),
        ("I5", "I9"),
        ("A4", "A5"),
        ("D5", "I5"),
        ("A8", "L8"),
    ] {
        assert!(
            is_straight_line(cell(a), cell(b)) && is_straight_line(cell(b), cell(a)),
            "{a} <-> {b} should be straight"
        );
    }
    assert!(!is_straight_line(cell("E4"), cell("J5")));
    assert!(!is_straight_line(cell("B3"), cell("I12")));
}

#[test]
fn paths_stay_on_their_line() {
    // Every intermediate cell reported for a fixture pair must itself be in
    // line with both endpoints, and must exist.
    for (a, b) in DIAGONAL_PAIRS {
        let (a, b) = (cell(a), cell(b));
        for mid in path_between(a, b) {
            assert!(board::exists(mid), "{a}->{b} path names non-cell {mid}");
            assert!(
                is_diagonal_line(a, mid) || is_straight_line(a, mid),
                "{a}->{b} waypoint {mid} is unrelated to {a}"
            );
        }
    }
}

#[test]
fn path_is_symmetric_reversed() {
    for (a, b) in DIAGONAL_PAIRS {
        let forward = path_between(cell(a), cell(b));
        let mut backward = path_between(cell(b), cell(a));
        backward.reverse();
        assert_eq!(forward, backward, "path {a}<->{b} must mirror");
    }
}

#[test]
fn line_predicates_never_accept_holes() {
    for hole in ["E5", "F6", "G7", "H8"] {
        let hole = cell(hole);
        for &other in board::all_cells() {
            assert!(!is_diagonal_line(hole, other));
            assert!(!is_straight_line(hole, other));
        }
    }
}

#[test]
fn existence_is_stable() {
    // The valid cell set never changes across queries.
    let first: Vec<Cell> = board::all_cells().to_vec();
    for _ in 0..3 {
        assert_eq!(board::all_cells(), first.as_slice());
        for &c in &first {
            assert!(board::exists(c));
        }
    }
}
