use anyhow::{bail, Result};
use diagmask::{
    anti_diagonal_mask, anti_diagonal_mask_ex, bishop_rays, diagonal_mask, diagonal_mask_ex,
    Bitboard, Square, ANTI_DIAGONAL_MASKS, DIAGONAL_MASKS,
};
use log::{debug, error, info};

/// Builds a mask by walking outward from `square` in each of `directions` until falling off the board.
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

/// Fetches the empty-board bishop rays for `square` from the `chess` crate.
fn reference_bishop_rays(square: Square) -> Bitboard {
    let reference = chess::ALL_SQUARES[square.index()];
    Bitboard::new(chess::get_bishop_rays(reference).0)
}

/// Compares `generated` against `expected`, returning a description of the difference if they differ.
fn compare(name: &str, square: Square, expected: Bitboard, generated: Bitboard) -> Option<String> {
    if expected == generated {
        return None;
    }

    let missing = expected & !generated;
    let extra = generated & !expected;
    Some(format!(
        "{name}({square}) is wrong\nExpected: {:#018x}\nGot:      {:#018x}\nMissing squares: {:?}\nExtra squares:   {:?}",
        expected,
        generated,
        missing.iter().collect::<Vec<_>>(),
        extra.iter().collect::<Vec<_>>(),
    ))
}

/// Runs every check on `square`, collecting all failures.
fn check_square(square: Square) -> Vec<String> {
    let diagonal = walk_rays(square, &[(1, 1), (-1, -1)]);
    let anti_diagonal = walk_rays(square, &[(-1, 1), (1, -1)]);

    [
        compare(
            "diagonal_mask",
            square,
            diagonal | square.bitboard(),
            diagonal_mask(square),
        ),
        compare(
            "anti_diagonal_mask",
            square,
            anti_diagonal | square.bitboard(),
            anti_diagonal_mask(square),
        ),
        compare("diagonal_mask_ex", square, diagonal, diagonal_mask_ex(square)),
        compare(
            "anti_diagonal_mask_ex",
            square,
            anti_diagonal,
            anti_diagonal_mask_ex(square),
        ),
        compare(
            "DIAGONAL_MASKS",
            square,
            diagonal_mask(square),
            DIAGONAL_MASKS[square],
        ),
        compare(
            "ANTI_DIAGONAL_MASKS",
            square,
            anti_diagonal_mask(square),
            ANTI_DIAGONAL_MASKS[square],
        ),
        compare(
            "bishop_rays",
            square,
            reference_bishop_rays(square),
            bishop_rays(square),
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let mut failures = 0;
    for square in Square::iter() {
        debug!("Checking masks for {square}");

        for failure in check_square(square) {
            error!("{failure}");
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{failures} mask check(s) failed");
    }

    info!("All masks match the reference for {} squares", Square::COUNT);
    println!("All masks are correct");

    Ok(())
}
