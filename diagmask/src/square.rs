use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Context, Result};

use super::{anti_diagonal_mask, diagonal_mask, Bitboard};

/// Represents a single square on an `8x8` chess board.
///
/// Internally encoded using the following bit pattern:
/// ```text
///     00 000 000
///      |  |   |
///      |  |   +- Represents the File.
///      |  +- Represents the Rank.
///      +- Unused.
/// ```
///
/// This bit pattern is also known as [Least Significant File Mapping](https://www.chessprogramming.org/Square_Mapping_Considerations#Deduction_on_Files_and_Ranks),
/// so `square = file + rank * 8`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    pub const A1: Self = Self::new(File::A, Rank::ONE);
    pub const A2: Self = Self::new(File::A, Rank::TWO);
    pub const A3: Self = Self::new(File::A, Rank::THREE);
    pub const A4: Self = Self::new(File::A, Rank::FOUR);
    pub const A5: Self = Self::new(File::A, Rank::FIVE);
    pub const A6: Self = Self::new(File::A, Rank::SIX);
    pub const A7: Self = Self::new(File::A, Rank::SEVEN);
    pub const A8: Self = Self::new(File::A, Rank::EIGHT);

    pub const B1: Self = Self::new(File::B, Rank::ONE);
    pub const B2: Self = Self::new(File::B, Rank::TWO);
    pub const B3: Self = Self::new(File::B, Rank::THREE);
    pub const B4: Self = Self::new(File::B, Rank::FOUR);
    pub const B5: Self = Self::new(File::B, Rank::FIVE);
    pub const B6: Self = Self::new(File::B, Rank::SIX);
    pub const B7: Self = Self::new(File::B, Rank::SEVEN);
    pub const B8: Self = Self::new(File::B, Rank::EIGHT);

    pub const C1: Self = Self::new(File::C, Rank::ONE);
    pub const C2: Self = Self::new(File::C, Rank::TWO);
    pub const C3: Self = Self::new(File::C, Rank::THREE);
    pub const C4: Self = Self::new(File::C, Rank::FOUR);
    pub const C5: Self = Self::new(File::C, Rank::FIVE);
    pub const C6: Self = Self::new(File::C, Rank::SIX);
    pub const C7: Self = Self::new(File::C, Rank::SEVEN);
    pub const C8: Self = Self::new(File::C, Rank::EIGHT);

    pub const D1: Self = Self::new(File::D, Rank::ONE);
    pub const D2: Self = Self::new(File::D, Rank::TWO);
    pub const D3: Self = Self::new(File::D, Rank::THREE);
    pub const D4: Self = Self::new(File::D, Rank::FOUR);
    pub const D5: Self = Self::new(File::D, Rank::FIVE);
    pub const D6: Self = Self::new(File::D, Rank::SIX);
    pub const D7: Self = Self::new(File::D, Rank::SEVEN);
    pub const D8: Self = Self::new(File::D, Rank::EIGHT);

    pub const E1: Self = Self::new(File::E, Rank::ONE);
    pub const E2: Self = Self::new(File::E, Rank::TWO);
    pub const E3: Self = Self::new(File::E, Rank::THREE);
    pub const E4: Self = Self::new(File::E, Rank::FOUR);
    pub const E5: Self = Self::new(File::E, Rank::FIVE);
    pub const E6: Self = Self::new(File::E, Rank::SIX);
    pub const E7: Self = Self::new(File::E, Rank::SEVEN);
    pub const E8: Self = Self::new(File::E, Rank::EIGHT);

    pub const F1: Self = Self::new(File::F, Rank::ONE);
    pub const F2: Self = Self::new(File::F, Rank::TWO);
    pub const F3: Self = Self::new(File::F, Rank::THREE);
    pub const F4: Self = Self::new(File::F, Rank::FOUR);
    pub const F5: Self = Self::new(File::F, Rank::FIVE);
    pub const F6: Self = Self::new(File::F, Rank::SIX);
    pub const F7: Self = Self::new(File::F, Rank::SEVEN);
    pub const F8: Self = Self::new(File::F, Rank::EIGHT);

    pub const G1: Self = Self::new(File::G, Rank::ONE);
    pub const G2: Self = Self::new(File::G, Rank::TWO);
    pub const G3: Self = Self::new(File::G, Rank::THREE);
    pub const G4: Self = Self::new(File::G, Rank::FOUR);
    pub const G5: Self = Self::new(File::G, Rank::FIVE);
    pub const G6: Self = Self::new(File::G, Rank::SIX);
    pub const G7: Self = Self::new(File::G, Rank::SEVEN);
    pub const G8: Self = Self::new(File::G, Rank::EIGHT);

    pub const H1: Self = Self::new(File::H, Rank::ONE);
    pub const H2: Self = Self::new(File::H, Rank::TWO);
    pub const H3: Self = Self::new(File::H, Rank::THREE);
    pub const H4: Self = Self::new(File::H, Rank::FOUR);
    pub const H5: Self = Self::new(File::H, Rank::FIVE);
    pub const H6: Self = Self::new(File::H, Rank::SIX);
    pub const H7: Self = Self::new(File::H, Rank::SEVEN);
    pub const H8: Self = Self::new(File::H, Rank::EIGHT);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 63;
    pub const COUNT: usize = 64;

    const FILE_MASK: u8 = 0b0000_0111;

    /// Returns an iterator over all available squares, in index order.
    ///
    /// # Example
    /// ```
    /// # use diagmask::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap(), Square::A1);
    /// assert_eq!(iter.last().unwrap(), Square::H8);
    /// ```
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Creates a new [`Square`] from the provided [`File`] and [`Rank`].
    ///
    /// # Example
    /// ```
    /// # use diagmask::{Square, File, Rank};
    /// let c4 = Square::new(File::C, Rank::FOUR);
    /// assert_eq!(c4, Square::C4);
    /// ```
    pub const fn new(file: File, rank: Rank) -> Self {
        // least-significant file mapping
        Self(file.0 | (rank.0 << 3))
    }

    /// Creates a new [`Square`] from the provided index value.
    ///
    /// The provided `index` must be `[0, 63]` or else an error is returned.
    ///
    /// # Example
    /// ```
    /// # use diagmask::Square;
    /// let c4 = Square::from_index(26);
    /// assert!(c4.is_ok());
    /// assert_eq!(c4.unwrap(), Square::C4);
    ///
    /// assert!(Square::from_index(64).is_err());
    /// ```
    pub fn from_index(index: usize) -> Result<Self> {
        if index > Self::MAX as usize {
            bail!(
                "Invalid index for Square: Must be between [{}, {}]. Got {index}",
                Self::MIN,
                Self::MAX
            );
        }
        Ok(Self(index as u8))
    }

    /// Creates a new [`Square`] from the provided `u8` value.
    ///
    /// The provided `int` must be `[0, 63]` or else an error is returned.
    ///
    /// # Example
    /// ```
    /// # use diagmask::Square;
    /// assert_eq!(Square::from_int(63).unwrap(), Square::H8);
    /// assert!(Square::from_int(200).is_err());
    /// ```
    pub fn from_int(int: u8) -> Result<Self> {
        Self::from_index(int as usize)
    }

    /// Creates a new [`Square`] from the provided index value, without error checking.
    ///
    /// # Panics
    ///
    /// If `index` is greater than `63` and debug assertions are enabled.
    ///
    /// # Example
    /// ```
    /// # use diagmask::Square;
    /// let c4 = Square::from_index_unchecked(26);
    /// assert_eq!(c4, Square::C4);
    /// ```
    pub const fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < Self::COUNT, "Index must be between [0,64)");
        Self(index as u8)
    }

    /// Fetches the inner index value of the [`Square`], which represented as a [`u8`].
    ///
    /// # Example
    /// ```
    /// # use diagmask::Square;
    /// assert_eq!(Square::C4.inner(), 26);
    /// ```
    pub const fn inner(&self) -> u8 {
        self.0
    }

    /// Fetches the inner index value of the [`Square`], casted to a [`usize`].
    ///
    /// Useful when using a [`Square`] to index into things.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Fetches the [`File`] of this [`Square`].
    ///
    /// # Example
    /// ```
    /// # use diagmask::{Square, File};
    /// assert_eq!(Square::C4.file(), File::C);
    /// ```
    pub const fn file(&self) -> File {
        File(self.0 & Self::FILE_MASK) // Same as % 8
    }

    /// Fetches the [`Rank`] of this [`Square`].
    ///
    /// # Example
    /// ```
    /// # use diagmask::{Square, Rank};
    /// assert_eq!(Square::C4.rank(), Rank::FOUR);
    /// ```
    pub const fn rank(&self) -> Rank {
        Rank(self.0 >> 3) // Same as / 8
    }

    /// Swaps the file and rank of this [`Square`], mirroring it across the a1-h8 diagonal.
    ///
    /// # Example
    /// ```
    /// # use diagmask::Square;
    /// assert_eq!(Square::H1.transposed(), Square::A8);
    /// assert_eq!(Square::C4.transposed(), Square::D3);
    /// assert_eq!(Square::E5.transposed(), Square::E5);
    /// ```
    pub const fn transposed(&self) -> Self {
        Self(((self.0 & Self::FILE_MASK) << 3) | (self.0 >> 3))
    }

    /// Moves this [`Square`] by `df` files and `dr` ranks, if the destination is on the board.
    ///
    /// # Example
    /// ```
    /// # use diagmask::Square;
    /// assert_eq!(Square::C4.offset(1, 1), Some(Square::D5));
    /// assert_eq!(Square::C4.offset(-2, -3), Some(Square::A1));
    /// assert_eq!(Square::H8.offset(1, 0), None);
    /// ```
    pub const fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file().0 as i16 + df as i16;
        let rank = self.rank().0 as i16 + dr as i16;

        if file < 0 || file > File::MAX as i16 || rank < 0 || rank > Rank::MAX as i16 {
            None
        } else {
            Some(Self::new(File(file as u8), Rank(rank as u8)))
        }
    }

    /// Creates a [`Square`] from a string, according to the [Universal Chess Interface](https://en.wikipedia.org//wiki/Universal_Chess_Interface) notation.
    ///
    /// # Example
    /// ```
    /// # use diagmask::Square;
    /// let c4 = Square::from_uci("c4");
    /// assert!(c4.is_ok());
    /// assert_eq!(c4.unwrap(), Square::C4);
    ///
    /// let err = Square::from_uci("z0");
    /// assert!(err.is_err());
    /// ```
    pub fn from_uci(square: &str) -> Result<Self> {
        let mut chars = square.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Invalid Square string: String must contain exactly 2 characters. Got {square:?}")
        };

        Ok(Self::new(File::from_char(file)?, Rank::from_char(rank)?))
    }

    /// Converts this [`Square`] to a string, according to the [Universal Chess Interface](https://en.wikipedia.org//wiki/Universal_Chess_Interface) notation.
    ///
    /// # Example
    /// ```
    /// # use diagmask::Square;
    /// assert_eq!("c4", Square::C4.to_uci());
    /// ```
    pub fn to_uci(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// Alias for [`Bitboard::from_square`].
    pub const fn bitboard(&self) -> Bitboard {
        Bitboard::from_square(*self)
    }

    /// Alias for [`diagonal_mask`].
    ///
    /// # Example
    /// ```
    /// # use diagmask::{Bitboard, Square};
    /// assert_eq!(Square::A1.diagonal(), Bitboard::A1_H8_DIAG);
    /// ```
    pub const fn diagonal(&self) -> Bitboard {
        diagonal_mask(*self)
    }

    /// Alias for [`anti_diagonal_mask`].
    ///
    /// # Example
    /// ```
    /// # use diagmask::{Bitboard, Square};
    /// assert_eq!(Square::A8.anti_diagonal(), Bitboard::H1_A8_DIAG);
    /// ```
    pub const fn anti_diagonal(&self) -> Bitboard {
        anti_diagonal_mask(*self)
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;

    /// Parses either UCI notation (`"e4"`) or a raw index (`"28"`).
    ///
    /// An index must be plain ASCII digits, so signs like `"+5"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Self::from_uci(s);
        }

        let index = s
            .parse::<usize>()
            .with_context(|| format!("Invalid index for Square: Got {s:?}"))?;
        Self::from_index(index)
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

macro_rules! impl_try_from_num {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Square {
                type Error = anyhow::Error;
                fn try_from(value: $t) -> Result<Self, Self::Error> {
                    match usize::try_from(value) {
                        Ok(index) => Self::from_index(index),
                        Err(_) => bail!(
                            "Invalid index for Square: Must be between [{}, {}]. Got {value}",
                            Self::MIN,
                            Self::MAX
                        ),
                    }
                }
            }
        )*
    };
}

impl_try_from_num!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self, self.0)
    }
}

/// A horizontal row of the board, `1` through `8`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Rank(pub(crate) u8);

impl Rank {
    pub const ONE: Self = Self(0);
    pub const TWO: Self = Self(1);
    pub const THREE: Self = Self(2);
    pub const FOUR: Self = Self(3);
    pub const FIVE: Self = Self(4);
    pub const SIX: Self = Self(5);
    pub const SEVEN: Self = Self(6);
    pub const EIGHT: Self = Self(7);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 7;

    pub const COUNT: usize = 8;

    /// Returns an iterator over all available ranks
    ///
    /// # Example
    /// ```
    /// # use diagmask::Rank;
    /// let mut iter = Rank::iter();
    /// assert_eq!(iter.len(), 8);
    /// assert_eq!(iter.next().unwrap(), Rank::ONE);
    /// assert_eq!(iter.last().unwrap(), Rank::EIGHT);
    /// ```
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    pub fn new(rank: u8) -> Result<Self> {
        if rank > Self::MAX {
            bail!(
                "Invalid int for Rank: Must be between [{}, {}]. Got {rank}",
                Self::MIN,
                Self::MAX
            );
        }

        Ok(Self(rank))
    }

    pub const fn new_unchecked(rank: u8) -> Self {
        debug_assert!(rank <= Self::MAX, "Rank must be between [0,7]");
        Self(rank)
    }

    pub fn from_char(rank: char) -> Result<Self> {
        match rank {
            '1'..='8' => Ok(Self(rank as u8 - b'1')),
            _ => bail!("Invalid char for Rank: Must be between [1, 8]. Got {rank:?}"),
        }
    }

    pub const fn inner(&self) -> u8 {
        self.0
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn char(&self) -> char {
        (self.0 + b'1') as char
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;
    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::from_char(value)
    }
}

impl From<Square> for Rank {
    fn from(value: Square) -> Self {
        value.rank()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.char(), self.0)
    }
}

/// A vertical column of the board, `a` through `h`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct File(pub(crate) u8);

impl File {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const G: Self = Self(6);
    pub const H: Self = Self(7);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 7;

    pub const COUNT: usize = 8;

    /// Returns an iterator over all available files.
    ///
    /// # Example
    /// ```
    /// # use diagmask::File;
    /// let mut iter = File::iter();
    /// assert_eq!(iter.len(), 8);
    /// assert_eq!(iter.next().unwrap(), File::A);
    /// assert_eq!(iter.last().unwrap(), File::H);
    /// ```
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    pub fn new(file: u8) -> Result<Self> {
        if file > Self::MAX {
            bail!(
                "Invalid int for File: Must be between [{}, {}]. Got {file}",
                Self::MIN,
                Self::MAX
            );
        }
        Ok(Self(file))
    }

    pub fn from_char(file: char) -> Result<Self> {
        match file.to_ascii_lowercase() {
            lower @ 'a'..='h' => Ok(Self(lower as u8 - b'a')),
            _ => bail!("Invalid char for File: Must be between [a, h]. Got {file:?}"),
        }
    }

    pub const fn inner(&self) -> u8 {
        self.0
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn char(&self) -> char {
        (self.0 + b'a') as char
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;
    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::from_char(value)
    }
}

impl From<Square> for File {
    fn from(value: Square) -> Self {
        value.file()
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.char(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squares() {
        // Test the four corners
        let a1 = Square::new(File(0), Rank(0));
        assert_eq!(a1.to_string(), "a1");

        let h1 = Square::new(File(7), Rank(0));
        assert_eq!(h1.to_string(), "h1");

        let a8 = Square::new(File(0), Rank(7));
        assert_eq!(a8.to_string(), "a8");

        let h8 = Square::new(File(7), Rank(7));
        assert_eq!(h8.to_string(), "h8");

        // And some arbitrary location near the middle
        let d4 = Square::new(File(3), Rank(3));
        assert_eq!(d4.to_string(), "d4");
        assert_eq!(d4.index(), 27);
    }

    #[test]
    fn test_parsing() {
        assert_eq!(Rank::ONE, Rank::try_from('1').unwrap());
        assert_eq!(Rank::EIGHT, Rank::try_from('8').unwrap());
        assert_eq!(Rank::ONE, Rank::try_from(0u8).unwrap());
        assert_eq!(Rank::EIGHT, Rank::try_from(7u8).unwrap());

        assert_eq!(File::A, File::try_from('a').unwrap());
        assert_eq!(File::H, File::try_from('H').unwrap());
        assert_eq!(File::A, File::try_from(0u8).unwrap());
        assert_eq!(File::H, File::try_from(7u8).unwrap());

        assert!(Rank::try_from('0').is_err());
        assert!(Rank::try_from('9').is_err());
        assert!(File::try_from('z').is_err());
        assert!(File::try_from('`').is_err());

        // Now test squares as a whole
        assert_eq!(Square::try_from("a1").unwrap(), Square::A1);
        assert_eq!(Square::try_from("h8").unwrap(), Square::H8);
        assert_eq!(Square::try_from("d4").unwrap(), Square::D4);
        assert_eq!(Square::try_from("56").unwrap(), Square::A8);
        assert_eq!(Square::try_from(0).unwrap(), Square::A1);
        assert_eq!(Square::try_from(63).unwrap(), Square::H8);

        assert!(Square::try_from("a").is_err());
        assert!(Square::try_from("1").is_ok());
        assert!(Square::try_from("a10").is_err());
        assert!(Square::try_from("").is_err());
        assert!(Square::try_from("64").is_err());
        assert!(Square::try_from(-1).is_err());
        assert!(Square::try_from(64).is_err());
        assert!(Square::try_from(256u16).is_err());
    }

    #[test]
    fn test_index_strings_are_plain_digits() {
        assert_eq!("5".parse::<Square>().unwrap(), Square::F1);
        assert_eq!(" 05 ".parse::<Square>().unwrap(), Square::F1);
        assert_eq!("63".parse::<Square>().unwrap(), Square::H8);

        assert!("+5".parse::<Square>().is_err());
        assert!("-5".parse::<Square>().is_err());
        assert!("1_0".parse::<Square>().is_err());
        assert!("99999999999999999999999".parse::<Square>().is_err());
    }

    #[test]
    fn test_transpose_swaps_file_and_rank() {
        for square in Square::iter() {
            let transposed = square.transposed();
            assert_eq!(transposed.file().inner(), square.rank().inner());
            assert_eq!(transposed.rank().inner(), square.file().inner());
            assert_eq!(transposed.transposed(), square);
        }
    }

    #[test]
    fn test_offset_stays_on_board() {
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::A1.offset(0, -1), None);
        assert_eq!(Square::A1.offset(7, 7), Some(Square::H8));
        assert_eq!(Square::H1.offset(-7, 7), Some(Square::A8));
        assert_eq!(Square::E4.offset(i8::MAX, 0), None);
        assert_eq!(Square::E4.offset(0, i8::MIN), None);
    }

    #[test]
    fn test_indexing() {
        let mut board = [0; 64];
        board[Square::D5] = u8::MAX;
        assert_eq!(board[35], u8::MAX);
    }
}
