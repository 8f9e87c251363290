use diagmask::*;

fn file_minus_rank(square: Square) -> i8 {
    square.file().inner() as i8 - square.rank().inner() as i8
}

fn file_plus_rank(square: Square) -> u8 {
    square.file().inner() + square.rank().inner()
}

fn test_mask_value(mask: Bitboard, expected: u64) {
    assert_eq!(
        mask.inner(),
        expected,
        "\nExpected: {:#018x}\nGot:      {mask:#018x}\n{mask:?}",
        expected
    );
}

#[test]
fn test_diagonal_members_share_file_minus_rank() {
    for square in Square::iter() {
        let mask = diagonal_mask(square);
        for other in Square::iter() {
            assert_eq!(
                mask.get(other),
                file_minus_rank(other) == file_minus_rank(square),
                "diagonal_mask({square}) disagrees on {other}"
            );
        }
    }
}

#[test]
fn test_anti_diagonal_members_share_file_plus_rank() {
    for square in Square::iter() {
        let mask = anti_diagonal_mask(square);
        for other in Square::iter() {
            assert_eq!(
                mask.get(other),
                file_plus_rank(other) == file_plus_rank(square),
                "anti_diagonal_mask({square}) disagrees on {other}"
            );
        }
    }
}

#[test]
fn test_masks_are_consistent_along_their_line() {
    for square in Square::iter() {
        for other in diagonal_mask(square) {
            assert_eq!(diagonal_mask(other), diagonal_mask(square));
        }
        for other in anti_diagonal_mask(square) {
            assert_eq!(anti_diagonal_mask(other), anti_diagonal_mask(square));
        }
    }
}

#[test]
fn test_transpose_symmetry() {
    for square in Square::iter() {
        let transposed = square.transposed();

        // file + rank is unchanged by swapping them
        assert_eq!(anti_diagonal_mask(square), anti_diagonal_mask(transposed));

        // file - rank is negated, which mirrors the whole diagonal
        assert_eq!(diagonal_mask(transposed), diagonal_mask(square).transposed());
    }
}

#[test]
fn test_mask_sizes() {
    let total_diagonal: u32 = Square::iter()
        .map(|square| diagonal_mask(square).population())
        .sum();
    // Sum over diagonals of (length squared): 2 * (1 + 4 + ... + 49) + 64
    assert_eq!(total_diagonal, 344);

    for square in Square::iter() {
        let expected = 8 - file_minus_rank(square).unsigned_abs() as u32;
        assert_eq!(diagonal_mask(square).population(), expected);

        let anti = file_plus_rank(square) as i32 - 7;
        let expected = 8 - anti.unsigned_abs();
        assert_eq!(anti_diagonal_mask(square).population(), expected);
    }
}

#[cfg(test)]
mod corner_masks {
    use super::*;

    #[test]
    fn diagonal_of_a1_is_main_diagonal() {
        test_mask_value(diagonal_mask(Square::A1), 0x8040201008040201);
        test_mask_value(diagonal_mask(Square::A1), MAIN_DIAGONAL.inner());
    }

    #[test]
    fn diagonal_of_h1_is_h1_alone() {
        test_mask_value(diagonal_mask(Square::H1), MAIN_DIAGONAL.inner() >> 56);
        test_mask_value(diagonal_mask(Square::H1), 0x0000000000000080);
    }

    #[test]
    fn diagonal_of_a8_is_a8_alone() {
        test_mask_value(diagonal_mask(Square::A8), MAIN_DIAGONAL.inner() << 56);
        test_mask_value(diagonal_mask(Square::A8), 0x0100000000000000);
    }

    #[test]
    fn anti_diagonal_of_a8_is_main_anti_diagonal() {
        test_mask_value(anti_diagonal_mask(Square::A8), 0x0102040810204080);
        test_mask_value(anti_diagonal_mask(Square::A8), MAIN_ANTIDIAGONAL.inner());
    }

    #[test]
    fn anti_diagonal_ex_of_a8() {
        test_mask_value(anti_diagonal_mask_ex(Square::A8), 0x0002040810204080);
    }

    #[test]
    fn diagonal_ex_of_a1() {
        test_mask_value(diagonal_mask_ex(Square::A1), 0x8040201008040200);
    }

    #[test]
    fn corners_alone_on_their_lines() {
        test_mask_value(anti_diagonal_mask(Square::A1), 0x0000000000000001);
        test_mask_value(anti_diagonal_mask(Square::H8), 0x8000000000000000);
        test_mask_value(anti_diagonal_mask_ex(Square::A1), 0);
        test_mask_value(diagonal_mask_ex(Square::H1), 0);
    }
}

#[cfg(test)]
mod index_masks {
    use super::*;

    #[test]
    fn harness_square_56() {
        let mask = mask_for_index(MaskKind::AntiDiagonal, 56, false).unwrap();
        test_mask_value(mask, 0x0002040810204080);

        let expected = "0 0 0 0 0 0 0 1 \n\
                        0 0 0 0 0 0 1 0 \n\
                        0 0 0 0 0 1 0 0 \n\
                        0 0 0 0 1 0 0 0 \n\
                        0 0 0 1 0 0 0 0 \n\
                        0 0 1 0 0 0 0 0 \n\
                        0 1 0 0 0 0 0 0 \n\
                        0 0 0 0 0 0 0 0 \n";
        assert_eq!(BitboardPrinter::new(mask).to_string(), expected);
    }

    #[test]
    fn every_valid_index_agrees_with_square_api() {
        for index in 0..Square::COUNT {
            let square = Square::from_index(index).unwrap();
            for kind in [MaskKind::Diagonal, MaskKind::AntiDiagonal] {
                for include_self in [true, false] {
                    assert_eq!(
                        mask_for_index(kind, index, include_self).unwrap(),
                        kind.mask(square, include_self)
                    );
                }
            }
        }
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        for index in [64, 65, 127, 128, 1000, usize::MAX] {
            assert!(mask_for_index(MaskKind::Diagonal, index, true).is_err());
            assert!(mask_for_index(MaskKind::AntiDiagonal, index, false).is_err());
            assert!(Square::from_index(index).is_err());
        }
    }

    #[test]
    fn masks_are_usable_across_threads() {
        let expected: Vec<(Square, Bitboard, Bitboard)> = Square::iter()
            .map(|square| (square, bishop_rays(square), DIAGONAL_MASKS[square]))
            .collect();

        let handles = (0..4)
            .map(|offset| {
                std::thread::spawn(move || {
                    Square::iter()
                        .skip(offset)
                        .step_by(4)
                        .map(|square| {
                            let index = square.index();
                            (
                                square,
                                mask_for_index(MaskKind::Diagonal, index, false).unwrap()
                                    | mask_for_index(MaskKind::AntiDiagonal, index, false)
                                        .unwrap(),
                                DIAGONAL_MASKS[square],
                            )
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();

        let mut computed = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>();
        computed.sort_by_key(|(square, _, _)| square.index());

        assert_eq!(computed.len(), Square::COUNT);
        for ((square, rays, table), (expected_square, expected_rays, expected_table)) in
            computed.into_iter().zip(expected)
        {
            assert_eq!(square, expected_square);
            assert_eq!(rays, expected_rays, "bishop rays differ for {square}");
            assert_eq!(table, expected_table, "diagonal table differs for {square}");
        }
    }
}
