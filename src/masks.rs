//! Geometry masks for the 8x8 board.
//!
//! Board indexing is row-major with bit 0 at the top-left: bit `i` sits on
//! row `i / 8`, column `i % 8`. Only dark squares, where `(row + col)` is
//! odd, are playable. The file masks exist to keep diagonal moves expressed
//! as bit shifts from wrapping around the board edges: a `+9` step from file
//! H would otherwise land on file A of the next row.

use std::sync::LazyLock;

/// Precomputed file, row and parity masks. Built once by iterating the 64
/// squares; read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Masks {
    pub file_a: u64,
    pub file_b: u64,
    pub file_g: u64,
    pub file_h: u64,
    /// Files A and B combined, for two-square jumps toward lower columns.
    pub file_ab: u64,
    /// Files G and H combined, for two-square jumps toward higher columns.
    pub file_gh: u64,
    pub row_0: u64,
    pub row_7: u64,
    /// Squares where `(row + col)` is odd.
    pub dark_squares: u64,
}

impl Masks {
    pub fn new() -> Self {
        let mut m = Masks {
            file_a: 0,
            file_b: 0,
            file_g: 0,
            file_h: 0,
            file_ab: 0,
            file_gh: 0,
            row_0: 0,
            row_7: 0,
            dark_squares: 0,
        };
        for row in 0..8u64 {
            for col in 0..8u64 {
                let bit = 1u64 << (row * 8 + col);
                match col {
                    0 => m.file_a |= bit,
                    1 => m.file_b |= bit,
                    6 => m.file_g |= bit,
                    7 => m.file_h |= bit,
                    _ => {}
                }
                if row == 0 {
                    m.row_0 |= bit;
                }
                if row == 7 {
                    m.row_7 |= bit;
                }
                if (row + col) % 2 == 1 {
                    m.dark_squares |= bit;
                }
            }
        }
        m.file_ab = m.file_a | m.file_b;
        m.file_gh = m.file_g | m.file_h;
        m
    }
}

impl Default for Masks {
    fn default() -> Self {
        Self::new()
    }
}

static MASKS: LazyLock<Masks> = LazyLock::new(Masks::new);

/// The process-wide mask table.
pub fn masks() -> &'static Masks {
    &MASKS
}

/// Single-square bitboard for `square` (0..=63).
pub fn bit(square: u8) -> u64 {
    1u64 << square
}

/// True iff `square` is playable, i.e. `(row + col)` is odd.
pub fn square_is_dark(square: u8) -> bool {
    let row = square / 8;
    let col = square % 8;
    (row + col) % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_mask_matches_parity_predicate() {
        let m = masks();
        for sq in 0..64u8 {
            let in_mask = m.dark_squares & bit(sq) != 0;
            assert_eq!(in_mask, square_is_dark(sq), "square {sq}");
        }
        assert_eq!(m.dark_squares.count_ones(), 32);
    }

    #[test]
    fn file_masks_cover_their_columns() {
        let m = masks();
        for sq in 0..64u8 {
            let col = sq % 8;
            assert_eq!(m.file_a & bit(sq) != 0, col == 0);
            assert_eq!(m.file_h & bit(sq) != 0, col == 7);
            assert_eq!(m.file_ab & bit(sq) != 0, col <= 1);
            assert_eq!(m.file_gh & bit(sq) != 0, col >= 6);
        }
        assert_eq!(m.file_ab, m.file_a | m.file_b);
        assert_eq!(m.file_gh, m.file_g | m.file_h);
    }

    #[test]
    fn row_masks() {
        let m = masks();
        assert_eq!(m.row_0, 0xFF);
        assert_eq!(m.row_7, 0xFF << 56);
    }

    #[test]
    fn construction_is_idempotent() {
        assert_eq!(Masks::new(), Masks::new());
        assert_eq!(&Masks::new(), masks());
    }
}
