use std::{
    fmt,
    ops::{Index, Not, Shl, ShlAssign, Shr, ShrAssign},
    str::FromStr,
};

use anyhow::{anyhow, bail, Result};

use super::{File, Rank, Square};

/// A [`Bitboard`] represents the game board as a set of bits.
///
/// The internal representation is a 64-bit binary number, so the values will represent the entire board.
/// They are color-agnostic, with the low order bits representing the "lower" half of the board.
///
/// Bit index 0 is the least-significant bit (LSB = 2^0)
/// Bit index 63 is the most-significant bit (MSB = 2^63)
///
/// The internal encoding uses [Little-Endian Rank-File Mapping (LERF)](https://www.chessprogramming.org/Square_Mapping_Considerations#Little-Endian_Rank-File_Mapping),
/// so a bitboard of first Rank would look like this in binary:
/// ```text
/// 00000000
/// 00000000
/// 00000000
/// 00000000
/// 00000000
/// 00000000
/// 00000000
/// 11111111
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const FILE_A: Self = Self(0x0101010101010101);
    pub const FILE_H: Self = Self(0x8080808080808080);
    pub const RANK_1: Self = Self(0x00000000000000FF);
    pub const RANK_8: Self = Self(0xFF00000000000000);
    /// Every square where `file == rank`.
    pub const A1_H8_DIAG: Self = Self(0x8040201008040201);
    /// Every square where `file + rank == 7`.
    pub const H1_A8_DIAG: Self = Self(0x0102040810204080);
    pub const EMPTY_BOARD: Self = Self(0x0000000000000000);
    pub const FULL_BOARD: Self = Self(0xFFFFFFFFFFFFFFFF);
    pub const EDGES: Self = Self(0xFF818181818181FF);

    /// Constructs a new [`Bitboard`] from the provided bit pattern.
    ///
    /// # Example
    /// ```
    /// # use diagmask::Bitboard;
    /// let board = Bitboard::new(255);
    /// assert_eq!(board, Bitboard::RANK_1);
    /// ```
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// Constructs a new [`Bitboard`] from the provided [`Square`].
    ///
    /// The resulting [`Bitboard`] will have only a single bit toggled on.
    ///
    /// # Example
    /// ```
    /// # use diagmask::{Bitboard, Square};
    /// let board = Bitboard::from_square(Square::H8);
    /// assert_eq!(board.to_hex_string(), "0x8000000000000000");
    /// ```
    pub const fn from_square(square: Square) -> Self {
        Self(1 << square.index())
    }

    /// Constructs a new [`Bitboard`] from the provided [`File`].
    ///
    /// The resulting [`Bitboard`] will have an entire column of bits toggled on.
    ///
    /// # Example
    /// ```
    /// # use diagmask::{Bitboard, File};
    /// let board = Bitboard::from_file(File::F);
    /// assert_eq!(board.to_hex_string(), "0x2020202020202020");
    /// ```
    pub const fn from_file(file: File) -> Self {
        Self(Self::FILE_A.0 << file.0)
    }

    /// Constructs a new [`Bitboard`] from the provided [`Rank`].
    ///
    /// The resulting [`Bitboard`] will have an entire row of bits toggled on.
    ///
    /// # Example
    /// ```
    /// # use diagmask::{Bitboard, Rank};
    /// let board = Bitboard::from_rank(Rank::SEVEN);
    /// assert_eq!(board.to_hex_string(), "0x00FF000000000000");
    /// ```
    pub const fn from_rank(rank: Rank) -> Self {
        Self(Self::RANK_1.0 << (rank.0 * 8))
    }

    /// Returns the inner `u64` of this [`Bitboard`].
    pub const fn inner(&self) -> u64 {
        self.0
    }

    /// Checks if this [`Bitboard`] is empty, or all zeros.
    ///
    /// # Example
    /// ```
    /// # use diagmask::Bitboard;
    /// let board = Bitboard::new(0x0);
    /// assert!(board.is_empty());
    /// ```
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Checks if this [`Bitboard`] shares any set bits with `other`.
    ///
    /// # Example
    /// ```
    /// # use diagmask::Bitboard;
    /// assert!(Bitboard::RANK_1.intersects(&Bitboard::FILE_A));
    /// assert!(!Bitboard::RANK_1.intersects(&Bitboard::RANK_8));
    /// ```
    pub const fn intersects(&self, other: &Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Yields the total number of `1`s in this [`Bitboard`].
    ///
    /// # Example
    /// ```
    /// # use diagmask::Bitboard;
    /// assert_eq!(Bitboard::RANK_1.population(), 8);
    /// ```
    pub const fn population(&self) -> u32 {
        self.0.count_ones()
    }

    /// Gets the value of the bit corresponding to the location of the provided [`Square`].
    ///
    /// # Example
    /// ```
    /// # use diagmask::{Bitboard, Square};
    /// let board = Bitboard::FILE_A;
    /// assert!(board.get(Square::A3));
    /// assert!(!board.get(Square::B3));
    /// ```
    pub const fn get(&self, square: Square) -> bool {
        self.0 & (1 << square.index()) != 0
    }

    /// Toggles the bit corresponding to the location of the provided [`Square`] to `1` (on).
    ///
    /// # Example
    /// ```
    /// # use diagmask::{Bitboard, Square};
    /// let mut board = Bitboard::default();
    /// board.set(Square::G2);
    /// assert_eq!(board.to_hex_string(), "0x0000000000004000");
    /// ```
    pub fn set(&mut self, square: Square) {
        self.0 |= 1 << square.index();
    }

    /// Toggles the bit corresponding to the location of the provided [`Square`] to `0` (off).
    ///
    /// # Example
    /// ```
    /// # use diagmask::{Bitboard, Square};
    /// let mut board = Bitboard::RANK_1;
    /// board.clear(Square::C1);
    /// assert_eq!(board.to_hex_string(), "0x00000000000000FB");
    /// ```
    pub fn clear(&mut self, square: Square) {
        self.0 &= !(1 << square.index());
    }

    /// Returns the lowest set square of this [`Bitboard`], if any.
    pub const fn lsb(&self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Some(Square(self.0.trailing_zeros() as u8))
        }
    }

    /// Clears the lowest non-zero bit from `self`, if there is a square to clear.
    pub fn clear_lsb(&mut self) {
        self.0 &= self.0.wrapping_sub(1);
    }

    /// Returns a [`BitboardIter`] to iterate over all of the set bits as [`Square`]s.
    pub const fn iter(&self) -> BitboardIter {
        BitboardIter { bb: *self }
    }

    /// Shifts this [`Bitboard`] up by `n` ranks.
    ///
    /// Bits pushed beyond the eighth rank are discarded.
    ///
    /// # Example
    /// ```
    /// # use diagmask::Bitboard;
    /// assert_eq!(Bitboard::RANK_1.north_by(7), Bitboard::RANK_8);
    /// assert_eq!(Bitboard::RANK_8.north_by(1), Bitboard::EMPTY_BOARD);
    /// ```
    pub const fn north_by(self, n: u32) -> Self {
        debug_assert!(n < 8, "Cannot shift by more than 7 ranks");
        Self(self.0 << (n * 8))
    }

    /// Shifts this [`Bitboard`] down by `n` ranks.
    ///
    /// Bits pushed beyond the first rank are discarded.
    ///
    /// # Example
    /// ```
    /// # use diagmask::Bitboard;
    /// assert_eq!(Bitboard::RANK_8.south_by(7), Bitboard::RANK_1);
    /// assert_eq!(Bitboard::RANK_1.south_by(1), Bitboard::EMPTY_BOARD);
    /// ```
    pub const fn south_by(self, n: u32) -> Self {
        debug_assert!(n < 8, "Cannot shift by more than 7 ranks");
        Self(self.0 >> (n * 8))
    }

    /// Mirrors this [`Bitboard`] across the a1-h8 diagonal, swapping every square's file and rank.
    ///
    /// # Example
    /// ```
    /// # use diagmask::Bitboard;
    /// assert_eq!(Bitboard::RANK_1.transposed(), Bitboard::FILE_A);
    /// assert_eq!(Bitboard::A1_H8_DIAG.transposed(), Bitboard::A1_H8_DIAG);
    /// ```
    pub fn transposed(self) -> Self {
        self.iter()
            .fold(Self::EMPTY_BOARD, |bb, square| bb | square.transposed().bitboard())
    }

    /// `const` analog of [`std::ops::BitAnd::bitand`].
    pub const fn and(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// `const` analog of [`std::ops::BitOr::bitor`].
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// `const` analog of [`std::ops::BitXor::bitxor`].
    pub const fn xor(self, other: Self) -> Self {
        Self(self.0 ^ other.0)
    }

    /// `const` analog of [`Not::not`].
    pub const fn not(self) -> Self {
        Self(!self.0)
    }

    /// Formats this [`Bitboard`] as a hexadecimal string.
    pub fn to_hex_string(&self) -> String {
        format!("0x{:0>16X}", self.0)
    }
}

impl FromStr for Bitboard {
    type Err = anyhow::Error;

    /// Constructs a new [`Bitboard`] from the provided string.
    ///
    /// The string may be a binary or hexadecimal number, and may be proceeded with `0b` or `0x`.
    ///
    /// # Example
    /// ```
    /// # use diagmask::Bitboard;
    /// let board1: Bitboard = "0x00FF000000000000".parse().unwrap();
    /// let board2: Bitboard = "00FF000000000000".parse().unwrap();
    /// let board3: Bitboard = "0b0000000011111111000000000000000000000000000000000000000000000000".parse().unwrap();
    /// assert_eq!(board1, board2);
    /// assert_eq!(board1, board3);
    /// assert_eq!(board1.to_hex_string(), "0x00FF000000000000");
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s.trim().to_lowercase();

        if let Some(hex) = bits.strip_prefix("0x") {
            let bits = u64::from_str_radix(hex, 16)
                .map_err(|_| anyhow!("Invalid Bitboard string: Expected hexadecimal digits, got {hex:?}"))?;
            Ok(Self(bits))
        } else if let Some(binary) = bits.strip_prefix("0b") {
            let bits = u64::from_str_radix(binary, 2)
                .map_err(|_| anyhow!("Invalid Bitboard string: Expected binary digits, got {binary:?}"))?;
            Ok(Self(bits))
        } else if bits.len() == 64 {
            let bits = u64::from_str_radix(&bits, 2)
                .map_err(|_| anyhow!("Invalid Bitboard string: Expected binary digits, got {bits:?}"))?;
            Ok(Self(bits))
        } else if bits.len() == 16 {
            let bits = u64::from_str_radix(&bits, 16).map_err(|_| {
                anyhow!("Invalid Bitboard string: Expected hexadecimal digits, got {bits:?}")
            })?;
            Ok(Self(bits))
        } else {
            bail!("Invalid Bitboard string: Invalid length {}. Length must be either 64 (binary) or 16 (hexadecimal), or carry a 0b/0x prefix", bits.len())
        }
    }
}

macro_rules! impl_bitwise_op {
    // Impl op and op_assign for Self
    ($op:tt, $op_assign:tt, $func:ident, $func_assign:ident, $op_tok:tt) => {
        impl std::ops::$op for Bitboard {
            type Output = Self;
            fn $func(self, rhs: Self) -> Self::Output {
                Self(self.0 $op_tok rhs.0)
            }
        }

        impl std::ops::$op_assign for Bitboard {
            fn $func_assign(&mut self, rhs: Self) {
                *self = *self $op_tok rhs;
            }
        }
    };
}

impl_bitwise_op!(BitAnd, BitAndAssign, bitand, bitand_assign, &);
impl_bitwise_op!(BitOr, BitOrAssign, bitor, bitor_assign, |);
impl_bitwise_op!(BitXor, BitXorAssign, bitxor, bitxor_assign, ^);

impl Not for Bitboard {
    type Output = Self;
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// Shifts by a raw number of bits. Bits shifted off either end are lost.
impl Shl<usize> for Bitboard {
    type Output = Self;
    fn shl(self, rhs: usize) -> Self::Output {
        Self(self.0 << rhs)
    }
}

impl ShlAssign<usize> for Bitboard {
    fn shl_assign(&mut self, rhs: usize) {
        *self = *self << rhs;
    }
}

impl Shr<usize> for Bitboard {
    type Output = Self;
    fn shr(self, rhs: usize) -> Self::Output {
        Self(self.0 >> rhs)
    }
}

impl ShrAssign<usize> for Bitboard {
    fn shr_assign(&mut self, rhs: usize) {
        *self = *self >> rhs;
    }
}

/// Shifts north by as many ranks as `rhs` is above the first rank.
impl Shl<Rank> for Bitboard {
    type Output = Self;
    fn shl(self, rhs: Rank) -> Self::Output {
        self.north_by(rhs.inner() as u32)
    }
}

/// Shifts south by as many ranks as `rhs` is above the first rank.
impl Shr<Rank> for Bitboard {
    type Output = Self;
    fn shr(self, rhs: Rank) -> Self::Output {
        self.south_by(rhs.inner() as u32)
    }
}

impl Index<Square> for Bitboard {
    type Output = bool;
    /// A [`Bitboard`] can be indexed by a [`Square`] to yield `true` or `false`, if the bit at that index is set.
    fn index(&self, index: Square) -> &Self::Output {
        if self.get(index) {
            &true
        } else {
            &false
        }
    }
}

impl From<Square> for Bitboard {
    fn from(value: Square) -> Self {
        Self::from_square(value)
    }
}

impl From<u64> for Bitboard {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Bitboard> for u64 {
    fn from(value: Bitboard) -> Self {
        value.0
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::EMPTY_BOARD, |bb, square| bb | square.bitboard())
    }
}

impl fmt::UpperHex for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::Binary for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Allocate just enough capacity
        let mut board = String::with_capacity(136);

        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let square = Square::new(file, rank);
                let occupant = if self.get(square) { 'X' } else { '.' };

                board.push(occupant);
                board.push(' ');
            }
            board.push('\n');
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Allocate just enough capacity
        let mut board = String::with_capacity(198);

        for rank in Rank::iter().rev() {
            board += &format!("{rank}| ");

            for file in File::iter() {
                let square = Square::new(file, rank);
                let occupant = if self.get(square) { 'X' } else { '.' };

                board += &format!("{occupant} ");
            }
            board += "\n";
        }
        board += " +";
        for _ in File::iter() {
            board += "--";
        }
        board += "\n   ";
        for file in File::iter() {
            board += &format!("{file} ");
        }

        write!(f, "{board}")
    }
}

/// Iterates over the set squares of a [`Bitboard`], lowest index first.
pub struct BitboardIter {
    bb: Bitboard,
}

impl Iterator for BitboardIter {
    type Item = Square;
    fn next(&mut self) -> Option<Self::Item> {
        let next = self.bb.lsb()?;
        self.bb.clear_lsb();
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bb.population() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter { bb: self }
    }
}

impl IntoIterator for &Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter { bb: *self }
    }
}
