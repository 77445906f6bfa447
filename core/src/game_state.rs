use crate::grid::KNIGHT_OFFSETS;
use crate::types::{Action, CellSet, Player, Square};

/// Complete state of a knight's isolation game.
///
/// Both players start off the board; each player's first action places
/// their token on any open cell, and every later action is a knight's
/// move to an open cell. Every cell a token enters stays visited for the
/// rest of the game. The player to move with no legal action loses.
///
/// The state is immutable from a search's point of view: `apply` returns
/// a fresh successor and never touches the receiver.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameState {
    /// Cells that have been entered by either token and are closed forever.
    pub(crate) visited: CellSet,
    /// Current token locations; None before the player has placed.
    pub(crate) locs: [Option<Square>; 2],
    /// The player to move.
    pub(crate) turn: Player,
    /// Number of actions applied so far.
    pub(crate) ply: u16,
}

impl GameState {
    /// Creates a new game with an empty board and both players off-board.
    pub fn new() -> Self {
        Self {
            visited: CellSet::EMPTY,
            locs: [None, None],
            turn: Player::One,
            ply: 0,
        }
    }

    /// Returns the given player's token location, or None pre-placement.
    pub fn location(&self, player: Player) -> Option<Square> {
        self.locs[player.index()]
    }

    /// Returns the player to move.
    pub fn to_move(&self) -> Player {
        self.turn
    }

    /// Returns the number of actions applied so far.
    pub fn ply(&self) -> u16 {
        self.ply
    }

    /// Returns the set of visited cells.
    pub fn visited(&self) -> CellSet {
        self.visited
    }

    /// Returns the set of open (never visited) cells.
    pub fn open_cells(&self) -> CellSet {
        CellSet::FULL.difference(self.visited)
    }

    /// Returns true if the given cell has never been visited.
    pub fn is_open(&self, square: Square) -> bool {
        !self.visited.contains(square)
    }

    /// Returns the liberties of a location as a cell set: the open cells a
    /// knight's move away, or every open cell for a `None` (pre-placement)
    /// location.
    pub fn liberty_set(&self, loc: Option<Square>) -> CellSet {
        match loc {
            None => self.open_cells(),
            Some(square) => {
                let mut liberties = CellSet::EMPTY;
                for &(dcol, drow) in &KNIGHT_OFFSETS {
                    if let Some(target) = square.offset(dcol, drow) {
                        if self.is_open(target) {
                            liberties = liberties.set(target);
                        }
                    }
                }
                liberties
            }
        }
    }

    /// Returns the liberties of a location in ascending cell-index order.
    pub fn liberties(&self, loc: Option<Square>) -> Vec<Square> {
        self.liberty_set(loc).iter().collect()
    }

    /// Returns the legal actions for the player to move, in ascending
    /// cell-index order of their destination.
    pub fn actions(&self) -> Vec<Action> {
        let loc = self.locs[self.turn.index()];
        let targets = self.liberty_set(loc);

        match loc {
            None => targets.iter().map(Action::Place).collect(),
            Some(_) => targets.iter().map(Action::Move).collect(),
        }
    }

    /// Applies an action, returning the successor state.
    /// This does NOT check that the action is legal.
    pub fn apply(&self, action: Action) -> Self {
        let target = action.target();
        let mut next = self.clone();

        next.locs[self.turn.index()] = Some(target);
        next.visited = next.visited.set(target);
        next.turn = self.turn.opponent();
        next.ply = self.ply + 1;

        next
    }

    /// Returns true if the game is over: the player to move has no legal
    /// action and loses.
    pub fn is_terminal(&self) -> bool {
        self.liberty_set(self.locs[self.turn.index()]).is_empty()
    }

    /// Returns the game value from `player`'s perspective: +1 for a win,
    /// -1 for a loss. Only meaningful when `is_terminal()` holds; the
    /// player to move is the one who is stuck and loses.
    pub fn utility(&self, player: Player) -> i32 {
        if self.turn == player {
            -1
        } else {
            1
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{HEIGHT, WIDTH};

    #[test]
    fn test_new_game() {
        let state = GameState::new();
        assert_eq!(state.to_move(), Player::One);
        assert_eq!(state.location(Player::One), None);
        assert_eq!(state.location(Player::Two), None);
        assert_eq!(state.ply(), 0);
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_initial_actions_are_placements() {
        let state = GameState::new();
        let actions = state.actions();

        assert_eq!(actions.len(), WIDTH as usize * HEIGHT as usize);
        assert!(actions.iter().all(|a| matches!(a, Action::Place(_))));
    }

    #[test]
    fn test_apply_placement() {
        let state = GameState::new();
        let c3 = Square::new(2, 2).unwrap();
        let next = state.apply(Action::Place(c3));

        assert_eq!(next.location(Player::One), Some(c3));
        assert!(!next.is_open(c3));
        assert_eq!(next.to_move(), Player::Two);
        assert_eq!(next.ply(), 1);

        // The original state is untouched.
        assert_eq!(state.location(Player::One), None);
        assert!(state.is_open(c3));
    }

    #[test]
    fn test_knight_liberties_from_center() {
        let state = GameState::new()
            .apply(Action::Place(Square::new(5, 4).unwrap()))
            .apply(Action::Place(Square::new(0, 0).unwrap()));

        // A centrally placed knight has all eight destinations open.
        let liberties = state.liberties(state.location(Player::One));
        assert_eq!(liberties.len(), 8);
        assert!(liberties.iter().all(|&sq| state.is_open(sq)));
    }

    #[test]
    fn test_corner_liberties_shrink_as_cells_close() {
        let a1 = Square::new(0, 0).unwrap();
        let b3 = Square::new(1, 2).unwrap();
        let c2 = Square::new(2, 1).unwrap();

        let state = GameState::new()
            .apply(Action::Place(a1))
            .apply(Action::Place(b3));

        // a1 reaches b3 and c2; b3 is occupied, so only c2 remains.
        assert_eq!(state.to_move(), Player::One);
        let actions = state.actions();
        assert_eq!(actions, vec![Action::Move(c2)]);
    }

    #[test]
    fn test_moves_close_cells_permanently() {
        let mut state = GameState::new();
        let mut visited_counts = Vec::new();

        for _ in 0..6 {
            let action = state.actions()[0];
            state = state.apply(action);
            visited_counts.push(state.visited().count());
        }

        // One new visited cell per ply, never reopened.
        assert_eq!(visited_counts, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(state.ply(), 6);
    }

    #[test]
    fn test_pre_placement_liberties_are_open_cells() {
        let state = GameState::new().apply(Action::Place(Square::new(5, 4).unwrap()));

        // Player two has not placed; their liberties are every open cell.
        assert_eq!(
            state.liberty_set(state.location(Player::Two)),
            state.open_cells()
        );
    }

    #[test]
    fn test_terminal_and_utility() {
        let state = GameState::from_notation(crate::notation::positions::STUCK).unwrap();

        assert!(state.is_terminal());
        assert_eq!(state.utility(state.to_move()), -1);
        assert_eq!(state.utility(state.to_move().opponent()), 1);
    }
}
