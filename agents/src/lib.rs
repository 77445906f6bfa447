pub mod evaluation;
pub mod greedy;
pub mod minimax;
pub mod random;
pub mod reporting;
pub mod search;

use isolation_core::{Action, GameState};

/// Core trait for isolation agents.
pub trait Agent {
    /// Choose an action for the player to move in `state`.
    ///
    /// The agent reports its current choice through `sink` as soon as it
    /// has one and may keep replacing it until it returns or the sink's
    /// stop flag is raised. Returning `None` from a state with legal
    /// actions is a contract violation and forfeits the game.
    fn choose_action(&mut self, state: &GameState, sink: &ActionSink) -> Option<Action>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

pub use evaluation::liberty_steal_score;
pub use greedy::GreedyAgent;
pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
pub use reporting::ActionSink;
pub use search::*;
