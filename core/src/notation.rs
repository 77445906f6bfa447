//! Position notation parsing and serialization.
//!
//! A position is written as four whitespace-separated fields:
//! `<board> <loc1> <loc2> <turn>`. The board is nine '/'-separated rows
//! from the top row (rank 9) down, with run-length digits for open cells
//! and one 'x' per visited cell; locations are cell names like "f5" or
//! "-" for a player that has not placed; turn is "1" or "2".
//! The starting position is "11/11/11/11/11/11/11/11/11 - - 1".

use crate::game_state::GameState;
use crate::grid::{HEIGHT, WIDTH};
use crate::types::{CellSet, Player, Square};
use std::fmt;

/// Position parsing error types.
#[derive(Debug, Clone, PartialEq)]
pub enum NotationError {
    InvalidFormat(String),
    InvalidRow(String),
    InvalidCell(String),
    InvalidPlayer(String),
    LocationNotVisited(String),
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::InvalidFormat(s) => write!(f, "Invalid position format: {s}"),
            NotationError::InvalidRow(s) => write!(f, "Invalid board row: {s}"),
            NotationError::InvalidCell(s) => write!(f, "Invalid cell: {s}"),
            NotationError::InvalidPlayer(s) => write!(f, "Invalid player to move: {s}"),
            NotationError::LocationNotVisited(s) => {
                write!(f, "Token location is not a visited cell: {s}")
            }
        }
    }
}

impl std::error::Error for NotationError {}

impl GameState {
    /// Parses a position string into a game state.
    pub fn from_notation(notation: &str) -> Result<Self, NotationError> {
        let parts: Vec<&str> = notation.split_whitespace().collect();

        if parts.len() != 4 {
            return Err(NotationError::InvalidFormat(format!(
                "Expected 4 fields, got {}",
                parts.len()
            )));
        }

        let visited = parse_board(parts[0])?;
        let one = parse_location(parts[1], visited)?;
        let two = parse_location(parts[2], visited)?;

        let turn = match parts[3] {
            "1" => Player::One,
            "2" => Player::Two,
            _ => return Err(NotationError::InvalidPlayer(parts[3].to_string())),
        };

        Ok(GameState {
            visited,
            locs: [one, two],
            turn,
            // Every action visits exactly one cell.
            ply: visited.count() as u16,
        })
    }

    /// Converts the game state to a position string.
    pub fn to_notation(&self) -> String {
        format!(
            "{} {} {} {}",
            board_to_notation(self.visited),
            location_to_notation(self.locs[0]),
            location_to_notation(self.locs[1]),
            match self.turn {
                Player::One => "1",
                Player::Two => "2",
            }
        )
    }
}

/// Parses the board field into the visited-cell set.
fn parse_board(board_str: &str) -> Result<CellSet, NotationError> {
    let rows: Vec<&str> = board_str.split('/').collect();

    if rows.len() != HEIGHT as usize {
        return Err(NotationError::InvalidFormat(format!(
            "Expected {} rows, got {}",
            HEIGHT,
            rows.len()
        )));
    }

    let mut visited = CellSet::EMPTY;

    for (row_idx, row_str) in rows.iter().enumerate() {
        // The first row in the string is the top row of the board.
        let row = HEIGHT - 1 - row_idx as u8;
        let mut col = 0u8;
        let mut open_run = 0u8;

        for ch in row_str.chars() {
            match ch {
                '0'..='9' => {
                    // No legal run exceeds WIDTH; reject instead of
                    // letting the accumulator wrap on crafted input.
                    open_run = open_run
                        .checked_mul(10)
                        .and_then(|n| n.checked_add(ch as u8 - b'0'))
                        .filter(|&n| n <= WIDTH)
                        .ok_or_else(|| NotationError::InvalidRow(row_str.to_string()))?;
                }
                'x' => {
                    col += open_run;
                    open_run = 0;
                    match Square::new(col, row) {
                        Some(square) => visited = visited.set(square),
                        None => return Err(NotationError::InvalidRow(row_str.to_string())),
                    }
                    col += 1;
                }
                _ => return Err(NotationError::InvalidRow(row_str.to_string())),
            }
        }
        col += open_run;

        if col != WIDTH {
            return Err(NotationError::InvalidRow(format!(
                "'{}' covers {} cells, expected {}",
                row_str, col, WIDTH
            )));
        }
    }

    Ok(visited)
}

/// Parses a token location field ("-" or a cell name).
fn parse_location(loc_str: &str, visited: CellSet) -> Result<Option<Square>, NotationError> {
    if loc_str == "-" {
        return Ok(None);
    }

    let square =
        Square::from_name(loc_str).ok_or_else(|| NotationError::InvalidCell(loc_str.to_string()))?;

    // The cell a token stands on was closed when the token entered it.
    if !visited.contains(square) {
        return Err(NotationError::LocationNotVisited(loc_str.to_string()));
    }

    Ok(Some(square))
}

/// Serializes the visited-cell set to the board field.
fn board_to_notation(visited: CellSet) -> String {
    let mut board = String::new();

    for row_idx in 0..HEIGHT {
        let row = HEIGHT - 1 - row_idx;
        if row_idx > 0 {
            board.push('/');
        }

        let mut open_run = 0u8;
        for col in 0..WIDTH {
            let square = Square::new(col, row).unwrap();
            if visited.contains(square) {
                if open_run > 0 {
                    board.push_str(&open_run.to_string());
                    open_run = 0;
                }
                board.push('x');
            } else {
                open_run += 1;
            }
        }
        if open_run > 0 {
            board.push_str(&open_run.to_string());
        }
    }

    board
}

fn location_to_notation(loc: Option<Square>) -> String {
    match loc {
        Some(square) => square.to_string(),
        None => "-".to_string(),
    }
}

/// Named example positions.
pub mod positions {
    /// The empty starting board, both players off-board.
    pub const STARTING: &str = "11/11/11/11/11/11/11/11/11 - - 1";

    /// A quiet early-middlegame position, player 1 to move.
    pub const MIDGAME: &str =
        "11/11/8x2/11/3x7/5x5/2x8/11/11 c3 i7 1";

    /// A finished game: every cell is visited and player 2, to move, is
    /// stuck and has lost.
    pub const STUCK: &str = "xxxxxxxxxxx/xxxxxxxxxxx/xxxxxxxxxxx/xxxxxxxxxxx/xxxxxxxxxxx/xxxxxxxxxxx/xxxxxxxxxxx/xxxxxxxxxxx/xxxxxxxxxxx a1 e5 2";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_round_trip() {
        let state = GameState::from_notation(positions::STARTING).unwrap();

        assert_eq!(state, GameState::new());
        assert_eq!(state.to_notation(), positions::STARTING);
    }

    #[test]
    fn test_midgame_fields() {
        let state = GameState::from_notation(positions::MIDGAME).unwrap();

        assert_eq!(state.location(Player::One), Square::new(2, 2));
        assert_eq!(state.location(Player::Two), Square::new(8, 6));
        assert_eq!(state.to_move(), Player::One);
        assert_eq!(state.visited().count(), 4);
        assert_eq!(state.ply(), 4);
        assert_eq!(state.to_notation(), positions::MIDGAME);
    }

    #[test]
    fn test_play_round_trips() {
        let mut state = GameState::new();
        for _ in 0..10 {
            let action = state.actions()[0];
            state = state.apply(action);

            let notation = state.to_notation();
            let parsed = GameState::from_notation(&notation).unwrap();
            assert_eq!(parsed, state);
            assert_eq!(parsed.to_notation(), notation);
        }
    }

    #[test]
    fn test_wrong_row_count() {
        let result = GameState::from_notation("11/11/11 - - 1");
        assert!(matches!(result, Err(NotationError::InvalidFormat(_))));
    }

    #[test]
    fn test_row_cell_count_checked() {
        let result = GameState::from_notation("10/11/11/11/11/11/11/11/11 - - 1");
        assert!(matches!(result, Err(NotationError::InvalidRow(_))));
    }

    #[test]
    fn test_overlong_run_length_rejected() {
        let result = GameState::from_notation("999/11/11/11/11/11/11/11/11 - - 1");
        assert!(matches!(result, Err(NotationError::InvalidRow(_))));

        // A wrapping accumulator must not let a bad row masquerade as a
        // short run.
        let result = GameState::from_notation("260/11/11/11/11/11/11/11/11 - - 1");
        assert!(matches!(result, Err(NotationError::InvalidRow(_))));
    }

    #[test]
    fn test_invalid_cell_name() {
        let result = GameState::from_notation("11/11/11/11/11/11/11/11/11 z9 - 1");
        assert!(matches!(result, Err(NotationError::InvalidCell(_))));
    }

    #[test]
    fn test_location_must_be_visited() {
        let result = GameState::from_notation("11/11/11/11/11/11/11/11/11 e5 - 1");
        assert!(matches!(result, Err(NotationError::LocationNotVisited(_))));
    }

    #[test]
    fn test_invalid_turn_field() {
        let result = GameState::from_notation("11/11/11/11/11/11/11/11/11 - - 3");
        assert!(matches!(result, Err(NotationError::InvalidPlayer(_))));
    }
}
