//! 5x7 bitmap digits for numeral dice without a font.

/// Glyph width in cells.
pub const GLYPH_WIDTH: u32 = 5;
/// Glyph height in cells.
pub const GLYPH_HEIGHT: u32 = 7;

const DIGITS: [[u8; 7]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

/// Lit cells of a digit as `(column, row)`, top-left origin.
pub fn cells(digit: u8) -> impl Iterator<Item = (u32, u32)> {
    let rows = DIGITS.get(digit as usize).copied().unwrap_or([0; 7]);
    (0..GLYPH_HEIGHT).flat_map(move |row| {
        (0..GLYPH_WIDTH).filter_map(move |col| {
            let bit = 1 << (GLYPH_WIDTH - 1 - col);
            (rows[row as usize] & bit != 0).then_some((col, row))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_is_a_column() {
        let lit: Vec<_> = cells(1).collect();
        assert!(lit.contains(&(2, 0)));
        assert!(lit.contains(&(2, 6)));
        assert!(!lit.contains(&(0, 0)));
    }

    #[test]
    fn test_digits_are_distinct() {
        let shapes: Vec<Vec<_>> = (0..10).map(|d| cells(d).collect()).collect();
        for i in 0..10 {
            assert!(!shapes[i].is_empty());
            for j in (i + 1)..10 {
                assert_ne!(shapes[i], shapes[j], "{} and {}", i, j);
            }
        }
    }

    #[test]
    fn test_out_of_range_is_blank() {
        assert_eq!(cells(42).count(), 0);
    }
}
