use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};
use log::trace;

use super::{Bitboard, Square};

/// Every square where `file == rank`, running from a1 to h8.
///
/// All other diagonals are this pattern shifted up or down by whole ranks.
pub const MAIN_DIAGONAL: Bitboard = Bitboard::A1_H8_DIAG;

/// Every square where `file + rank == 7`, running from h1 to a8.
///
/// All other anti-diagonals are this pattern shifted up or down by whole ranks.
pub const MAIN_ANTIDIAGONAL: Bitboard = Bitboard::H1_A8_DIAG;

/// Number of diagonals (or anti-diagonals) on an `8x8` board.
pub const NUM_DIAGONALS: usize = 15;

/// Diagonal masks for every square, indexed by [`Square`].
pub const DIAGONAL_MASKS: [Bitboard; Square::COUNT] = generate_diagonal_masks();

/// Anti-diagonal masks for every square, indexed by [`Square`].
pub const ANTI_DIAGONAL_MASKS: [Bitboard; Square::COUNT] = generate_anti_diagonal_masks();

/// Signed distance, in ranks, between the diagonal through `square` and [`MAIN_DIAGONAL`].
///
/// This is `file - rank`, in `[-7, 7]`.
///
/// # Example
/// ```
/// # use diagmask::{diagonal_offset, Square};
/// assert_eq!(diagonal_offset(Square::A1), 0);
/// assert_eq!(diagonal_offset(Square::H1), 7);
/// assert_eq!(diagonal_offset(Square::A8), -7);
/// ```
pub const fn diagonal_offset(square: Square) -> i8 {
    square.file().inner() as i8 - square.rank().inner() as i8
}

/// Signed distance, in ranks, between the anti-diagonal through `square` and [`MAIN_ANTIDIAGONAL`].
///
/// This is `7 - file - rank`, in `[-7, 7]`.
///
/// # Example
/// ```
/// # use diagmask::{anti_diagonal_offset, Square};
/// assert_eq!(anti_diagonal_offset(Square::A8), 0);
/// assert_eq!(anti_diagonal_offset(Square::A1), 7);
/// assert_eq!(anti_diagonal_offset(Square::H8), -7);
/// ```
pub const fn anti_diagonal_offset(square: Square) -> i8 {
    7 - square.file().inner() as i8 - square.rank().inner() as i8
}

/// Shifts `main` down by `offset` ranks when `offset` is positive, or up by `-offset` ranks otherwise.
///
/// Shifting by whole ranks keeps every bit on its file-to-rank stride, so the shifted
/// pattern is exactly the parallel line `offset` steps away.
const fn shift_main_line(main: Bitboard, offset: i8) -> Bitboard {
    if offset >= 0 {
        main.south_by(offset as u32)
    } else {
        main.north_by(offset.unsigned_abs() as u32)
    }
}

/// Computes a [`Bitboard`] of every square on the same diagonal (constant `file - rank`) as `square`, including `square` itself.
///
/// # Example
/// ```
/// # use diagmask::{diagonal_mask, Bitboard, Square};
/// assert_eq!(diagonal_mask(Square::A1), Bitboard::A1_H8_DIAG);
/// assert_eq!(diagonal_mask(Square::H1), Bitboard::new(0x0000000000000080));
/// assert_eq!(diagonal_mask(Square::A8), Bitboard::new(0x0100000000000000));
/// assert_eq!(diagonal_mask(Square::E4), Bitboard::new(0x0080402010080402));
/// ```
pub const fn diagonal_mask(square: Square) -> Bitboard {
    shift_main_line(MAIN_DIAGONAL, diagonal_offset(square))
}

/// Computes a [`Bitboard`] of every square on the same anti-diagonal (constant `file + rank`) as `square`, including `square` itself.
///
/// # Example
/// ```
/// # use diagmask::{anti_diagonal_mask, Bitboard, Square};
/// assert_eq!(anti_diagonal_mask(Square::A8), Bitboard::H1_A8_DIAG);
/// assert_eq!(anti_diagonal_mask(Square::A1), Bitboard::new(0x0000000000000001));
/// assert_eq!(anti_diagonal_mask(Square::H8), Bitboard::new(0x8000000000000000));
/// ```
pub const fn anti_diagonal_mask(square: Square) -> Bitboard {
    shift_main_line(MAIN_ANTIDIAGONAL, anti_diagonal_offset(square))
}

/// Same as [`diagonal_mask`], but without `square` itself.
///
/// # Example
/// ```
/// # use diagmask::{diagonal_mask_ex, Bitboard, Square};
/// assert_eq!(diagonal_mask_ex(Square::A1), Bitboard::new(0x8040201008040200));
/// assert_eq!(diagonal_mask_ex(Square::H1), Bitboard::EMPTY_BOARD);
/// ```
pub const fn diagonal_mask_ex(square: Square) -> Bitboard {
    // The diagonal always contains `square`, so XOR clears exactly that bit
    diagonal_mask(square).xor(square.bitboard())
}

/// Same as [`anti_diagonal_mask`], but without `square` itself.
///
/// # Example
/// ```
/// # use diagmask::{anti_diagonal_mask_ex, Bitboard, Square};
/// assert_eq!(anti_diagonal_mask_ex(Square::A8), Bitboard::new(0x0002040810204080));
/// ```
pub const fn anti_diagonal_mask_ex(square: Square) -> Bitboard {
    anti_diagonal_mask(square).xor(square.bitboard())
}

/// All squares a bishop on `square` could reach on an empty board.
///
/// # Example
/// ```
/// # use diagmask::{bishop_rays, Bitboard, Square};
/// assert_eq!(bishop_rays(Square::E4), Bitboard::new(0x0182442800284482));
/// assert!(!bishop_rays(Square::E4).get(Square::E4));
/// ```
pub const fn bishop_rays(square: Square) -> Bitboard {
    diagonal_mask_ex(square).or(anti_diagonal_mask_ex(square))
}

/// Which of the [`NUM_DIAGONALS`] diagonals `square` lies on, in `[0, 14]`.
///
/// Diagonal `0` is a8 alone, `7` is a1-h8, and `14` is h1 alone.
pub const fn diagonal_index(square: Square) -> usize {
    (diagonal_offset(square) + 7) as usize
}

/// Which of the [`NUM_DIAGONALS`] anti-diagonals `square` lies on, in `[0, 14]`.
///
/// Anti-diagonal `0` is a1 alone, `7` is h1-a8, and `14` is h8 alone.
pub const fn anti_diagonal_index(square: Square) -> usize {
    square.file().index() + square.rank().index()
}

const fn generate_diagonal_masks() -> [Bitboard; Square::COUNT] {
    let mut masks = [Bitboard::EMPTY_BOARD; Square::COUNT];
    let mut i = 0;
    while i < Square::COUNT {
        masks[i] = diagonal_mask(Square::from_index_unchecked(i));
        i += 1;
    }
    masks
}

const fn generate_anti_diagonal_masks() -> [Bitboard; Square::COUNT] {
    let mut masks = [Bitboard::EMPTY_BOARD; Square::COUNT];
    let mut i = 0;
    while i < Square::COUNT {
        masks[i] = anti_diagonal_mask(Square::from_index_unchecked(i));
        i += 1;
    }
    masks
}

/// The two families of diagonal lines on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum MaskKind {
    /// Lines of constant `file - rank`, parallel to a1-h8.
    #[default]
    Diagonal,
    /// Lines of constant `file + rank`, parallel to h1-a8.
    AntiDiagonal,
}

impl MaskKind {
    /// Computes the mask of this kind through `square`, optionally keeping `square` in the result.
    ///
    /// # Example
    /// ```
    /// # use diagmask::{Bitboard, MaskKind, Square};
    /// assert_eq!(MaskKind::Diagonal.mask(Square::A1, true), Bitboard::A1_H8_DIAG);
    /// assert!(!MaskKind::AntiDiagonal.mask(Square::E4, false).get(Square::E4));
    /// ```
    pub const fn mask(&self, square: Square, include_self: bool) -> Bitboard {
        match (*self, include_self) {
            (Self::Diagonal, true) => diagonal_mask(square),
            (Self::Diagonal, false) => diagonal_mask_ex(square),
            (Self::AntiDiagonal, true) => anti_diagonal_mask(square),
            (Self::AntiDiagonal, false) => anti_diagonal_mask_ex(square),
        }
    }

    /// Signed offset between the line through `square` and this kind's main line.
    pub const fn offset(&self, square: Square) -> i8 {
        match self {
            Self::Diagonal => diagonal_offset(square),
            Self::AntiDiagonal => anti_diagonal_offset(square),
        }
    }
}

impl FromStr for MaskKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "diagonal" | "diag" | "d" => Ok(Self::Diagonal),
            "anti-diagonal" | "antidiagonal" | "anti_diagonal" | "anti" | "a" => {
                Ok(Self::AntiDiagonal)
            }
            _ => bail!("Invalid mask kind: Expected `diagonal` or `anti-diagonal`. Got {s:?}"),
        }
    }
}

impl fmt::Display for MaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diagonal => write!(f, "diagonal"),
            Self::AntiDiagonal => write!(f, "anti-diagonal"),
        }
    }
}

/// Computes a mask for a raw square index, rejecting anything outside of `[0, 63]`.
///
/// # Example
/// ```
/// # use diagmask::{mask_for_index, MaskKind};
/// let mask = mask_for_index(MaskKind::AntiDiagonal, 56, false).unwrap();
/// assert_eq!(mask.inner(), 0x0002040810204080);
///
/// assert!(mask_for_index(MaskKind::Diagonal, 64, true).is_err());
/// ```
pub fn mask_for_index(kind: MaskKind, index: usize, include_self: bool) -> Result<Bitboard> {
    let square = Square::from_index(index)
        .with_context(|| format!("Cannot compute {kind} mask"))?;

    trace!(
        "{kind} mask for {square}: offset {} from main line",
        kind.offset(square)
    );

    Ok(kind.mask(square, include_self))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walks outward from `square` one step at a time in each of `directions`.
    fn walk_rays(square: Square, directions: &[(i8, i8)]) -> Bitboard {
        let mut rays = Bitboard::EMPTY_BOARD;
        for &(df, dr) in directions {
            let mut ray = square;
            while let Some(shifted) = ray.offset(df, dr) {
                rays.set(shifted);
                ray = shifted;
            }
        }
        rays
    }

    #[test]
    fn test_masks_contain_source_square() {
        for square in Square::iter() {
            assert!(diagonal_mask(square).get(square), "{square:?}");
            assert!(anti_diagonal_mask(square).get(square), "{square:?}");
        }
    }

    #[test]
    fn test_ex_masks_drop_exactly_the_source_square() {
        for square in Square::iter() {
            let diag = diagonal_mask(square);
            let diag_ex = diagonal_mask_ex(square);
            assert!(!diag_ex.get(square));
            assert_eq!(diag_ex.population() + 1, diag.population());
            assert_eq!(diag_ex | square.bitboard(), diag);

            let anti = anti_diagonal_mask(square);
            let anti_ex = anti_diagonal_mask_ex(square);
            assert!(!anti_ex.get(square));
            assert_eq!(anti_ex.population() + 1, anti.population());
            assert_eq!(anti_ex | square.bitboard(), anti);
        }
    }

    #[test]
    fn test_masks_match_ray_walking() {
        for square in Square::iter() {
            let diag = walk_rays(square, &[(1, 1), (-1, -1)]);
            let anti = walk_rays(square, &[(-1, 1), (1, -1)]);

            assert_eq!(diagonal_mask_ex(square), diag, "{square:?}");
            assert_eq!(anti_diagonal_mask_ex(square), anti, "{square:?}");
            assert_eq!(bishop_rays(square), diag | anti, "{square:?}");
        }
    }

    #[test]
    fn test_tables_match_closed_form() {
        for square in Square::iter() {
            assert_eq!(DIAGONAL_MASKS[square], diagonal_mask(square));
            assert_eq!(ANTI_DIAGONAL_MASKS[square], anti_diagonal_mask(square));
        }
    }

    #[test]
    fn test_line_indices() {
        let mut diagonals = [Bitboard::EMPTY_BOARD; NUM_DIAGONALS];
        let mut anti_diagonals = [Bitboard::EMPTY_BOARD; NUM_DIAGONALS];

        for square in Square::iter() {
            diagonals[diagonal_index(square)].set(square);
            anti_diagonals[anti_diagonal_index(square)].set(square);
        }

        // Every square on a line shares that line's mask
        for square in Square::iter() {
            assert_eq!(diagonals[diagonal_index(square)], diagonal_mask(square));
            assert_eq!(
                anti_diagonals[anti_diagonal_index(square)],
                anti_diagonal_mask(square)
            );
        }

        assert_eq!(diagonals[7], MAIN_DIAGONAL);
        assert_eq!(anti_diagonals[7], MAIN_ANTIDIAGONAL);
        assert_eq!(diagonals[0], Square::A8.bitboard());
        assert_eq!(diagonals[14], Square::H1.bitboard());
    }

    #[test]
    fn test_mask_kind_parsing() {
        assert_eq!("diagonal".parse::<MaskKind>().unwrap(), MaskKind::Diagonal);
        assert_eq!("D".parse::<MaskKind>().unwrap(), MaskKind::Diagonal);
        assert_eq!(
            "anti-diagonal".parse::<MaskKind>().unwrap(),
            MaskKind::AntiDiagonal
        );
        assert_eq!("anti".parse::<MaskKind>().unwrap(), MaskKind::AntiDiagonal);
        assert!("rank".parse::<MaskKind>().is_err());

        for kind in [MaskKind::Diagonal, MaskKind::AntiDiagonal] {
            assert_eq!(kind.to_string().parse::<MaskKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_mask_for_index_rejects_out_of_range() {
        for kind in [MaskKind::Diagonal, MaskKind::AntiDiagonal] {
            assert!(mask_for_index(kind, 63, true).is_ok());
            assert!(mask_for_index(kind, 64, true).is_err());
            assert!(mask_for_index(kind, usize::MAX, false).is_err());
        }

        let err = mask_for_index(MaskKind::Diagonal, 100, true).unwrap_err();
        assert!(format!("{err:#}").contains("100"));
    }
}
