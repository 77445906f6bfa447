pub mod game_state;
pub mod grid;
pub mod notation;
pub mod perft;
pub mod types;

pub use game_state::*;
pub use grid::*;
pub use notation::{positions, NotationError};
pub use perft::{perft, perft_divide};
pub use types::*;
