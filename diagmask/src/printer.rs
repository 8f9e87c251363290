use std::{fmt, str::FromStr};

use anyhow::bail;

use super::{Bitboard, File, Rank, Square};

/// Order in which a [`BitboardPrinter`] emits the ranks of the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Layout {
    /// Square index order: a1..h1 on the first line, a8..h8 on the last.
    #[default]
    Index,
    /// Rank 8 on the first line, as the board is seen from White's side.
    Board,
}

impl FromStr for Layout {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "index" => Ok(Self::Index),
            "board" => Ok(Self::Board),
            _ => bail!("Invalid layout: Expected `index` or `board`. Got {s:?}"),
        }
    }
}

/// Renders a [`Bitboard`] as an `8x8` grid of symbols, eight per line.
///
/// By default every set square is printed as `1` and every unset square as `0`,
/// in [`Layout::Index`] order.
///
/// # Example
/// ```
/// # use diagmask::{BitboardPrinter, Layout, Square};
/// let printer = BitboardPrinter::new(Square::B1.bitboard()).layout(Layout::Index);
/// assert!(printer.to_string().starts_with("0 1 0 0 0 0 0 0 \n"));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BitboardPrinter {
    bitboard: Bitboard,
    layout: Layout,
    on: char,
    off: char,
    highlight: Option<(Square, char)>,
}

impl BitboardPrinter {
    pub const fn new(bitboard: Bitboard) -> Self {
        Self {
            bitboard,
            layout: Layout::Index,
            on: '1',
            off: '0',
            highlight: None,
        }
    }

    /// Sets the rank order of the output.
    pub const fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the symbols used for set (`on`) and unset (`off`) squares.
    pub const fn symbols(mut self, on: char, off: char) -> Self {
        self.on = on;
        self.off = off;
        self
    }

    /// Prints `square` as `*`, regardless of whether it is set.
    pub const fn highlight(self, square: Square) -> Self {
        self.highlight_with(square, '*')
    }

    /// Prints `square` as `symbol`, regardless of whether it is set.
    pub const fn highlight_with(mut self, square: Square, symbol: char) -> Self {
        self.highlight = Some((square, symbol));
        self
    }

    /// The symbol this printer will emit for `square`.
    pub fn symbol(&self, square: Square) -> char {
        match self.highlight {
            Some((highlighted, symbol)) if highlighted == square => symbol,
            _ if self.bitboard.get(square) => self.on,
            _ => self.off,
        }
    }

    /// The ranks of the board, in the order they will be printed.
    pub fn ranks(&self) -> impl Iterator<Item = Rank> {
        let layout = self.layout;
        (Rank::MIN..=Rank::MAX).map(move |i| match layout {
            Layout::Index => Rank::new_unchecked(i),
            Layout::Board => Rank::new_unchecked(Rank::MAX - i),
        })
    }
}

impl From<Bitboard> for BitboardPrinter {
    fn from(value: Bitboard) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for BitboardPrinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in self.ranks() {
            for file in File::iter() {
                write!(f, "{} ", self.symbol(Square::new(file, rank)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anti_diagonal_mask_ex;

    #[test]
    fn test_index_layout_matches_bit_order() {
        let board = anti_diagonal_mask_ex(Square::A8);
        let expected = "0 0 0 0 0 0 0 1 \n\
                        0 0 0 0 0 0 1 0 \n\
                        0 0 0 0 0 1 0 0 \n\
                        0 0 0 0 1 0 0 0 \n\
                        0 0 0 1 0 0 0 0 \n\
                        0 0 1 0 0 0 0 0 \n\
                        0 1 0 0 0 0 0 0 \n\
                        0 0 0 0 0 0 0 0 \n";
        assert_eq!(BitboardPrinter::new(board).to_string(), expected);
    }

    #[test]
    fn test_board_layout_matches_display() {
        let board = Bitboard::A1_H8_DIAG | Bitboard::RANK_8;
        let printer = BitboardPrinter::new(board)
            .layout(Layout::Board)
            .symbols('X', '.');
        assert_eq!(printer.to_string(), board.to_string());
    }

    #[test]
    fn test_highlight_overrides_occupancy() {
        let printer = BitboardPrinter::new(Bitboard::EMPTY_BOARD).highlight(Square::H1);
        let first_line = printer.to_string().lines().next().unwrap().to_string();
        assert_eq!(first_line, "0 0 0 0 0 0 0 * ");

        let printer = BitboardPrinter::new(Bitboard::FULL_BOARD).highlight_with(Square::A1, '@');
        assert_eq!(printer.symbol(Square::A1), '@');
        assert_eq!(printer.symbol(Square::B1), '1');
    }

    #[test]
    fn test_layout_parsing() {
        assert_eq!("index".parse::<Layout>().unwrap(), Layout::Index);
        assert_eq!("Board".parse::<Layout>().unwrap(), Layout::Board);
        assert!("sideways".parse::<Layout>().is_err());
    }
}
