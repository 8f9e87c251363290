/// All things related to Bitboards.
pub mod bitboard;
/// Diagonal and anti-diagonal masks for every square, in closed form and as lookup tables.
///
/// You probably want to look here.
pub mod masks;
/// Text rendering of a [`Bitboard`] as an `8x8` grid.
pub mod printer;
/// Squares on a chessboard (including files and ranks).
pub mod square;

pub use bitboard::*;
pub use masks::*;
pub use printer::*;
pub use square::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::bitboard::*;
    pub use crate::masks::*;
    pub use crate::printer::*;
    pub use crate::square::*;
}
