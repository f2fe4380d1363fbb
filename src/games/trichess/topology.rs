//! Board topology: line predicates, seam tables, and path resolution.
//!
//! The cross-quadrant tables below are domain data, settled against visual
//! reference boards cell pair by cell pair. They are deliberately *not*
//! derived from coordinate arithmetic — the three board seams bend lines in
//! ways no delta formula reproduces. Edit them only together with
//! `tests/movement_fixtures.rs`.

use once_cell::sync::Lazy;

use super::board;
use super::types::Cell;

/// Straight seam files: each row is one physical file of the board read end
/// to end, crossing a seam where the labels jump. Within-block columns
/// (A1..A8 etc.) need no table — plain column arithmetic covers them.
///
/// Three families:
/// - E–H files (rows 1–4) continue as I–L files (rows 5–8),
/// - A–D files (rows 8–5) continue as E–H files (rows 9–12), letters
///   mirrored (D↔E … A↔H),
/// - I–L files: rows 8–5 continue as rows 9–12 of the same letter; note
///   row 5 is spatially adjacent to row 9.
const STRAIGHT_SEAM_FILES: [[(char, u8); 8]; 12] = [
    [('E', 1), ('E', 2), ('E', 3), ('E', 4), ('I', 5), ('I', 6), ('I', 7), ('I', 8)],
    [('F', 1), ('F', 2), ('F', 3), ('F', 4), ('J', 5), ('J', 6), ('J', 7), ('J', 8)],
    [('G', 1), ('G', 2), ('G', 3), ('G', 4), ('K', 5), ('K', 6), ('K', 7), ('K', 8)],
    [('H', 1), ('H', 2), ('H', 3), ('H', 4), ('L', 5), ('L', 6), ('L', 7), ('L', 8)],
    [('D', 8), ('D', 7), ('D', 6), ('D', 5), ('E', 9), ('E', 10), ('E', 11), ('E', 12)],
    [('C', 8), ('C', 7), ('C', 6), ('C', 5), ('F', 9), ('F', 10), ('F', 11), ('F', 12)],
    [('B', 8), ('B', 7), ('B', 6), ('B', 5), ('G', 9), ('G', 10), ('G', 11), ('G', 12)],
    [('A', 8), ('A', 7), ('A', 6), ('A', 5), ('H', 9), ('H', 10), ('H', 11), ('H', 12)],
    [('I', 8), ('I', 7), ('I', 6), ('I', 5), ('I', 9), ('I', 10), ('I', 11), ('I', 12)],
    [('J', 8), ('J', 7), ('J', 6), ('J', 5), ('J', 9), ('J', 10), ('J', 11), ('J', 12)],
    [('K', 8), ('K', 7), ('K', 6), ('K', 5), ('K', 9), ('K', 10), ('K', 11), ('K', 12)],
    [('L', 8), ('L', 7), ('L', 6), ('L', 5), ('L', 9), ('L', 10), ('L', 11), ('L', 12)],
];

/// Diagonal seam lines: diagonals that cross the central rosette. Each row
/// is an ordered cell sequence; cells the conceptual line passes through
/// that are not on the board (the missing E5–H8 band) are simply absent, so
/// a two-cell entry is a bridge with nothing between to block on.
const DIAGONAL_SEAM_LINES: [&[(char, u8)]; 23] = [
    // The long diagonal, bending at the D4/I5 seam.
    &[('A', 1), ('B', 2), ('C', 3), ('D', 4), ('I', 5), ('J', 6), ('K', 7), ('L', 8)],
    &[('C', 5), ('D', 5), ('I', 7)],
    &[('K', 9), ('J', 7), ('J', 5)],
    &[('J', 6), ('F', 9), ('E', 9)],
    &[('F', 4), ('H', 10)],
    &[('B', 4), ('F', 10)],
    &[('C', 3), ('G', 9)],
    &[('D', 3), ('I', 9)],
    &[('E', 4), ('J', 10)],
    &[('E', 3), ('H', 9)],
    &[('G', 4), ('J', 10)],
    &[('J', 12), ('F', 9)],
    &[('L', 10), ('I', 6)],
    &[('F', 12), ('K', 5)],
    &[('G', 9), ('H', 4)],
    &[('F', 9), ('G', 4)],
    &[('D', 7), ('L', 10)],
    &[('L', 10), ('J', 5)],
    &[('J', 9), ('D', 6)],
    &[('J', 12), ('G', 4)],
    &[('E', 9), ('I', 10)],
    &[('H', 10), ('E', 3)],
    &[('F', 12), ('I', 10)],
];

static STRAIGHT_LINES: Lazy<Vec<Vec<Cell>>> = Lazy::new(|| {
    STRAIGHT_SEAM_FILES
        .iter()
        .map(|line| line.iter().map(|&(c, r)| Cell::new(c, r)).collect())
        .collect()
});

static DIAGONAL_LINES: Lazy<Vec<Vec<Cell>>> = Lazy::new(|| {
    DIAGONAL_SEAM_LINES
        .iter()
        .map(|line| line.iter().map(|&(c, r)| Cell::new(c, r)).collect())
        .collect()
});

fn line_containing(lines: &'static [Vec<Cell>], a: Cell, b: Cell) -> Option<&'static [Cell]> {
    lines
        .iter()
        .find(|line| line.contains(&a) && line.contains(&b))
        .map(|line| line.as_slice())
}

fn straight_seam(a: Cell, b: Cell) -> Option<&'static [Cell]> {
    line_containing(&STRAIGHT_LINES, a, b)
}

fn diagonal_seam(a: Cell, b: Cell) -> Option<&'static [Cell]> {
    line_containing(&DIAGONAL_LINES, a, b)
}

/// True iff `a` and `b` are both on the board and lie on a straight line:
/// same column, same row, the hex third diagonal (|Δcol| == |Δrow|), or a
/// straight seam file.
pub fn is_straight_line(a: Cell, b: Cell) -> bool {
    if a == b || !board::exists(a) || !board::exists(b) {
        return false;
    }
    let (dc, dr) = a.delta_to(b);
    if dc == 0 || dr == 0 || dc.abs() == dr.abs() {
        return true;
    }
    straight_seam(a, b).is_some()
}

/// True iff `a` and `b` are both on the board and lie on a diagonal: the
/// two ±45° relations or a diagonal seam line.
pub fn is_diagonal_line(a: Cell, b: Cell) -> bool {
    if a == b || !board::exists(a) || !board::exists(b) {
        return false;
    }
    let (dc, dr) = a.delta_to(b);
    if dc == dr || dc == -dr {
        return true;
    }
    diagonal_seam(a, b).is_some()
}

/// Ordered intermediate cells between `a` and `b`, endpoints excluded.
///
/// Resolution order: straight seam file, plain column/row/diagonal walk,
/// diagonal seam line. Arithmetic walks keep only cells that exist — the
/// holes a line crosses cannot block anything. A pair not on any line
/// yields an empty path, never an error.
pub fn path_between(a: Cell, b: Cell) -> Vec<Cell> {
    if a == b || !board::exists(a) || !board::exists(b) {
        return Vec::new();
    }
    if let Some(line) = straight_seam(a, b) {
        return between_on(line, a, b);
    }
    let (dc, dr) = a.delta_to(b);
    if dc == 0 || dr == 0 || dc.abs() == dr.abs() {
        return walk_between(a, b, dc.signum(), dr.signum());
    }
    if let Some(line) = diagonal_seam(a, b) {
        return between_on(line, a, b);
    }
    Vec::new()
}

fn between_on(line: &[Cell], a: Cell, b: Cell) -> Vec<Cell> {
    let ia = line.iter().position(|&c| c == a);
    let ib = line.iter().position(|&c| c == b);
    match (ia, ib) {
        (Some(ia), Some(ib)) if ia < ib => line[ia + 1..ib].to_vec(),
        (Some(ia), Some(ib)) if ib < ia => {
            let mut cells = line[ib + 1..ia].to_vec();
            cells.reverse();
            cells
        }
        _ => Vec::new(),
    }
}

fn walk_between(a: Cell, b: Cell, step_c: i8, step_r: i8) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut cur = a;
    loop {
        cur = match cur.offset(step_c, step_r) {
            Some(next) => next,
            None => break,
        };
        if cur == b {
            break;
        }
        if board::exists(cur) {
            cells.push(cur);
        }
    }
    cells
}
