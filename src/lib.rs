//! TriChess rules engine: move legality for a three-player chess variant
//! on a hexagonally-arranged 96-cell board.
//!
//! The crate exposes the engine plugin surface (`engine::plugin`) and the
//! TriChess game module (`games::trichess`). Callers drive a game entirely
//! through the plugin: list legal actions, validate a candidate, apply it,
//! observe the emitted events.

pub mod engine;
pub mod games;
