use crate::grid::{HEIGHT, PADDED_WIDTH, SIZE, WIDTH};
use std::fmt;

/// Represents one of the two players in knight's isolation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Returns the other player.
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Returns the array index for this player (0 or 1).
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "player 1"),
            Player::Two => write!(f, "player 2"),
        }
    }
}

/// A playable cell on the board.
///
/// Stored as the flat index into the padded index space: each row spans
/// `PADDED_WIDTH` slots, of which the last two are sentinels that no
/// `Square` can ever name. Using a validated newtype keeps sentinel and
/// out-of-range indices unrepresentable.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    /// Creates a square from column and row coordinates.
    /// Returns None if either coordinate is off the board.
    pub const fn new(col: u8, row: u8) -> Option<Self> {
        if col < WIDTH && row < HEIGHT {
            Some(Square(row * PADDED_WIDTH + col))
        } else {
            None
        }
    }

    /// Creates a square from a flat index.
    /// Returns None for sentinel slots and out-of-range indices.
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < SIZE && index % PADDED_WIDTH < WIDTH {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from a cell name such as "f5" (files a-k, ranks 1-9).
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !file.is_ascii_lowercase() || !rank.is_ascii_digit() {
            return None;
        }
        let col = file as u8 - b'a';
        let row = rank as u8 - b'1';
        Square::new(col, row)
    }

    /// Returns the column of this square (0-10).
    pub const fn col(self) -> u8 {
        self.0 % PADDED_WIDTH
    }

    /// Returns the row of this square (0-8).
    pub const fn row(self) -> u8 {
        self.0 / PADDED_WIDTH
    }

    /// Returns the flat index of this square.
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the square displaced by the given column and row deltas,
    /// if it is still on the board.
    pub const fn offset(self, dcol: i8, drow: i8) -> Option<Self> {
        let col = self.col() as i8 + dcol;
        let row = self.row() as i8 + drow;
        if col >= 0 && col < WIDTH as i8 && row >= 0 && row < HEIGHT as i8 {
            Square::new(col as u8, row as u8)
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.col()) as char,
            (b'1' + self.row()) as char
        )
    }
}

/// A set of cells represented as a bitboard over the padded index space.
/// Each bit corresponds to one flat index; sentinel bits are never set.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct CellSet(pub u128);

impl CellSet {
    /// An empty cell set.
    pub const EMPTY: Self = CellSet(0);

    /// The set of all 99 playable cells.
    pub const FULL: Self = CellSet(Self::full_bits());

    const fn full_bits() -> u128 {
        let mut bits = 0u128;
        let mut i = 0;
        while i < SIZE {
            if (i as u8) % PADDED_WIDTH < WIDTH {
                bits |= 1 << i;
            }
            i += 1;
        }
        bits
    }

    /// Creates a cell set with a single square set.
    pub const fn from_square(square: Square) -> Self {
        CellSet(1u128 << square.index())
    }

    /// Returns true if the given square is in the set.
    pub const fn contains(self, square: Square) -> bool {
        (self.0 & (1u128 << square.index())) != 0
    }

    /// Adds the given square.
    pub const fn set(self, square: Square) -> Self {
        CellSet(self.0 | (1u128 << square.index()))
    }

    /// Removes the given square.
    pub const fn clear(self, square: Square) -> Self {
        CellSet(self.0 & !(1u128 << square.index()))
    }

    /// Returns the number of cells in the set.
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if the set is empty.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the union of two cell sets.
    pub const fn union(self, other: Self) -> Self {
        CellSet(self.0 | other.0)
    }

    /// Returns the intersection of two cell sets.
    pub const fn intersection(self, other: Self) -> Self {
        CellSet(self.0 & other.0)
    }

    /// Returns the cells of this set that are not in `other`.
    pub const fn difference(self, other: Self) -> Self {
        CellSet(self.0 & !other.0)
    }
}

/// Iterator over the squares of a cell set, in ascending index order.
pub struct CellSetIterator {
    bits: u128,
}

impl Iterator for CellSetIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let index = self.bits.trailing_zeros() as u8;
            self.bits &= self.bits - 1; // Clear lowest set bit
            Square::from_index(index)
        }
    }
}

impl CellSet {
    /// Returns an iterator over the squares in the set.
    pub fn iter(self) -> CellSetIterator {
        CellSetIterator { bits: self.0 }
    }
}

/// A legal action: place the token on an open cell (each player's first
/// turn) or move it a knight's jump to an open cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Action {
    Place(Square),
    Move(Square),
}

impl Action {
    /// Returns the destination cell of this action.
    pub const fn target(self) -> Square {
        match self {
            Action::Place(square) | Action::Move(square) => square,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target())
    }
}
