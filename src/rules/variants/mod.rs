//! Variant-specific rules.
//!
//! Each module holds what one variant changes: its catch side effect,
//! step overrides and, for variants that pick creatures up front, the
//! helpers the creation wizard uses.

pub mod unique;
pub mod wrap;
pub mod wed;
pub mod chess;
pub mod star;
pub mod family;

pub use chess::{ChessRole, CHESS_PIECE_LIMIT};
pub use star::Representatives;
pub use wed::WED_PAIR_SLOTS;
pub use wrap::WRAP_PINNED;
