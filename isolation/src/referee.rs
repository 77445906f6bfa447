use isolation_agents::{ActionSink, Agent};
use isolation_core::{Action, GameState, Player};
use std::thread;
use std::time::{Duration, Instant};

/// How a match was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    /// The loser had no legal action on their turn.
    Isolation,
    /// The loser produced no action within the turn budget.
    Timeout,
    /// The loser produced an action that is not legal in the position.
    Illegal,
}

#[derive(Debug)]
pub struct MatchOutcome {
    pub winner: Player,
    pub reason: WinReason,
    pub plies: u16,
    pub history: Vec<Action>,
}

/// Plays one match between two agents under a fixed per-turn budget.
///
/// Each turn the mover's agent runs on its own thread with a fresh
/// action sink. At the deadline the referee raises the sink's stop flag
/// and waits for the agent to wind down; whatever the agent returned,
/// or failing that the last action it reported, is its answer. An empty
/// sink at that point forfeits the game, as does an illegal action.
/// There is no fallback move on the agent's behalf.
pub fn play_match(
    one: &mut (dyn Agent + Send),
    two: &mut (dyn Agent + Send),
    budget: Duration,
) -> MatchOutcome {
    let mut state = GameState::new();
    let mut history = Vec::new();

    loop {
        if state.is_terminal() {
            return MatchOutcome {
                winner: state.to_move().opponent(),
                reason: WinReason::Isolation,
                plies: state.ply(),
                history,
            };
        }

        let mover = state.to_move();
        let agent: &mut (dyn Agent + Send) = match mover {
            Player::One => &mut *one,
            Player::Two => &mut *two,
        };

        let sink = ActionSink::new();
        let returned = run_turn(agent, &state, &sink, budget);
        let action = returned.or_else(|| sink.latest());

        let Some(action) = action else {
            return MatchOutcome {
                winner: mover.opponent(),
                reason: WinReason::Timeout,
                plies: state.ply(),
                history,
            };
        };

        if !state.actions().contains(&action) {
            return MatchOutcome {
                winner: mover.opponent(),
                reason: WinReason::Illegal,
                plies: state.ply(),
                history,
            };
        }

        state = state.apply(action);
        history.push(action);
    }
}

/// Runs one agent turn on its own thread and enforces the budget.
fn run_turn(
    agent: &mut (dyn Agent + Send),
    state: &GameState,
    sink: &ActionSink,
    budget: Duration,
) -> Option<Action> {
    let deadline = Instant::now() + budget;

    thread::scope(|scope| {
        let handle = scope.spawn(|| agent.choose_action(state, sink));

        while !handle.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }

        // Past the deadline the agent is told to stop; the join then
        // only waits for it to notice the flag. A panicking agent
        // counts as having produced nothing.
        sink.request_stop();
        handle.join().unwrap_or(None)
    })
}
