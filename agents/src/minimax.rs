use crate::reporting::ActionSink;
use crate::search::{search_with_sink, SearchLimits};
use crate::Agent;
use isolation_core::{Action, GameState};

/// State the agent keeps between turns.
#[derive(Debug, Clone, Default)]
pub struct SearchMemory {
    /// Depth the last completed search reached.
    pub last_depth: u8,
    /// Nodes searched over the whole game so far.
    pub total_nodes: u64,
}

pub struct MinimaxAgent {
    name: String,
    limits: SearchLimits,
    memory: SearchMemory,
}

impl MinimaxAgent {
    pub fn new(depth: u8) -> Self {
        MinimaxAgent {
            name: format!("Minimax(depth={})", depth),
            limits: SearchLimits::depth(depth),
            memory: SearchMemory::default(),
        }
    }

    pub fn with_time_limit(time_ms: u64) -> Self {
        MinimaxAgent {
            name: format!("Minimax(time={}ms)", time_ms),
            limits: SearchLimits::move_time(time_ms),
            memory: SearchMemory::default(),
        }
    }

    /// An agent that solves each position outright. Only sensible once
    /// the board has thinned out.
    pub fn exhaustive() -> Self {
        MinimaxAgent {
            name: "Minimax(exhaustive)".to_string(),
            limits: SearchLimits::exhaustive(),
            memory: SearchMemory::default(),
        }
    }

    pub fn memory(&self) -> &SearchMemory {
        &self.memory
    }
}

impl Agent for MinimaxAgent {
    fn choose_action(&mut self, state: &GameState, sink: &ActionSink) -> Option<Action> {
        let result = search_with_sink(state, self.limits.clone(), sink);

        self.memory.last_depth = result.depth;
        self.memory.total_nodes += result.nodes;

        result.best_action
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isolation_core::Square;

    #[test]
    fn test_takes_the_winning_move() {
        let state = GameState::from_notation(
            "xxxxxxxxxxx/xxxxxxxxxxx/xxxxxxxxxxx/xxxxxxxxxxx/xxxxxxxxxxx/xxxxxxxxxxx/x1xxxxxxxxx/xxxxxxxxxxx/xxxxxxxxxxx a1 e5 1",
        )
        .unwrap();
        let sink = ActionSink::new();
        let mut agent = MinimaxAgent::exhaustive();

        let action = agent.choose_action(&state, &sink);

        let b3 = Square::new(1, 2).unwrap();
        assert_eq!(action, Some(Action::Move(b3)));
        assert_eq!(sink.latest(), action);
    }

    #[test]
    fn test_memory_accumulates_across_turns() {
        let mut state = GameState::from_notation(isolation_core::positions::MIDGAME).unwrap();
        let mut agent = MinimaxAgent::new(2);

        let sink = ActionSink::new();
        let first = agent.choose_action(&state, &sink).unwrap();
        let nodes_after_first = agent.memory().total_nodes;
        assert!(nodes_after_first > 0);
        assert_eq!(agent.memory().last_depth, 2);

        state = state.apply(first);
        state = state.apply(state.actions()[0]);
        agent.choose_action(&state, &sink).unwrap();
        assert!(agent.memory().total_nodes > nodes_after_first);
    }

    #[test]
    fn test_agent_names() {
        assert_eq!(MinimaxAgent::new(4).name(), "Minimax(depth=4)");
        assert_eq!(
            MinimaxAgent::with_time_limit(500).name(),
            "Minimax(time=500ms)"
        );
    }
}
