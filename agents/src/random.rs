use crate::reporting::ActionSink;
use crate::Agent;
use isolation_core::{Action, GameState};
use rand::seq::SliceRandom;
use rand::thread_rng;

pub struct RandomAgent {
    name: String,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            name: "Random".to_string(),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn choose_action(&mut self, state: &GameState, sink: &ActionSink) -> Option<Action> {
        let actions = state.actions();
        let mut rng = thread_rng();

        let chosen = actions.choose(&mut rng).copied();
        if let Some(action) = chosen {
            sink.report(action);
        }

        chosen
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chosen_action_is_legal() {
        let mut state = GameState::new();
        let mut agent = RandomAgent::new();

        while !state.is_terminal() {
            let sink = ActionSink::new();
            let action = agent.choose_action(&state, &sink).unwrap();
            assert!(state.actions().contains(&action));
            assert_eq!(sink.latest(), Some(action));
            state = state.apply(action);
        }
    }

    #[test]
    fn test_returns_none_when_stuck() {
        let state = GameState::from_notation(isolation_core::positions::STUCK).unwrap();
        let sink = ActionSink::new();

        assert_eq!(RandomAgent::new().choose_action(&state, &sink), None);
    }
}
