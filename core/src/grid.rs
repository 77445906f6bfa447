//! Board geometry for knight's isolation.
//!
//! The board is a fixed 11x9 grid addressed through a flat, padded index
//! space: every row occupies `PADDED_WIDTH` slots, the last two of which
//! are sentinels so that index arithmetic never wraps a move from one row
//! edge onto the next row. A flat index is playable exactly when
//! `index % PADDED_WIDTH < WIDTH`.

use crate::types::Square;

/// The width of the board in playable cells.
pub const WIDTH: u8 = 11;

/// The height of the board in playable cells.
pub const HEIGHT: u8 = 9;

/// The stride of one row in the flat index space.
pub const PADDED_WIDTH: u8 = WIDTH + 2;

/// The size of the flat index space: (W+2)*H - 2.
pub const SIZE: usize = PADDED_WIDTH as usize * HEIGHT as usize - 2;

/// The eight knight-move offsets as (column, row) deltas.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Converts a flat index to (column, row) coordinates.
pub const fn to_coords(index: u8) -> (u8, u8) {
    (index % PADDED_WIDTH, index / PADDED_WIDTH)
}

/// Converts (column, row) coordinates to a flat index.
pub const fn to_index(col: u8, row: u8) -> u8 {
    row * PADDED_WIDTH + col
}

/// Returns the three mirror images of a cell: across the vertical axis,
/// across the horizontal axis, and across both.
pub fn reflections(square: Square) -> [Square; 3] {
    let col = square.col();
    let row = square.row();
    let mirror_col = WIDTH - col - 1;
    let mirror_row = HEIGHT - row - 1;

    [
        Square::new(mirror_col, row).unwrap(),
        Square::new(col, mirror_row).unwrap(),
        Square::new(mirror_col, mirror_row).unwrap(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_round_trip() {
        for row in 0..HEIGHT {
            for col in 0..WIDTH {
                let index = to_index(col, row);
                assert_eq!(to_coords(index), (col, row));
                assert_eq!(Square::from_index(index), Square::new(col, row));
            }
        }
    }

    #[test]
    fn test_playable_index_invariant() {
        for index in 0..SIZE as u8 {
            let playable = index % PADDED_WIDTH < WIDTH;
            assert_eq!(Square::from_index(index).is_some(), playable);
        }
    }

    #[test]
    fn test_mirror_involution() {
        for row in 0..HEIGHT {
            for col in 0..WIDTH {
                let square = Square::new(col, row).unwrap();
                let [horizontal, vertical, both] = reflections(square);

                assert_eq!(reflections(horizontal)[0], square);
                assert_eq!(reflections(vertical)[1], square);
                assert_eq!(reflections(both)[2], square);
            }
        }
    }

    #[test]
    fn test_mirror_of_center_is_center() {
        let center = Square::new(WIDTH / 2, HEIGHT / 2).unwrap();
        assert_eq!(reflections(center), [center, center, center]);
    }
}
