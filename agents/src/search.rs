use crate::evaluation::liberty_steal_score;
use crate::reporting::ActionSink;
use isolation_core::{Action, GameState, Player};
use std::time::{Duration, Instant};

/// Sentinel for the alpha/beta window bounds.
pub const INFINITY: i32 = 1_000_000;
/// Score of a proven win for the searching player. Proven results sit
/// far above any liberty count, so a heuristic estimate can never
/// outrank one.
pub const WIN_SCORE: i32 = 100_000;

const STOP_CHECK_INTERVAL: u64 = 1024; // Check time/stop every 1024 nodes

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_action: Option<Action>,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub stopped: bool,
}

#[derive(Debug, Clone)]
pub struct SearchProgress {
    pub depth: u8,
    pub score: i32,
    pub nodes: u64,
    pub time_ms: u64,
}

pub type InfoCallback = Box<dyn Fn(&SearchProgress) + Send>;

/// Bounds on a single search invocation.
///
/// With a depth limit, one fixed-depth pass is run. With a time limit,
/// iterative deepening runs until the clock or a proven result stops it.
/// With neither, the search is exhaustive: every action closes a cell,
/// so the game tree is finite and the recursion bottoms out on terminal
/// states without ever consulting the heuristic.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    pub max_depth: Option<u8>,
    pub move_time: Option<Duration>,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self {
            max_depth: Some(depth),
            move_time: None,
        }
    }

    pub fn move_time(millis: u64) -> Self {
        Self {
            max_depth: None,
            move_time: Some(Duration::from_millis(millis)),
        }
    }

    pub fn exhaustive() -> Self {
        Self {
            max_depth: None,
            move_time: None,
        }
    }
}

struct SearchInfo<'a> {
    start_time: Instant,
    limits: SearchLimits,
    /// The player the root search was invoked for. Every utility and
    /// heuristic value in the recursion is taken from this one
    /// perspective; max and min levels alternate over the same axis
    /// rather than negating per ply.
    perspective: Player,
    nodes: u64,
    stopped: bool,
    sink: Option<&'a ActionSink>,
    info_callback: Option<InfoCallback>,
}

impl<'a> SearchInfo<'a> {
    fn new(state: &GameState, limits: SearchLimits, sink: Option<&'a ActionSink>) -> Self {
        Self {
            start_time: Instant::now(),
            limits,
            perspective: state.to_move(),
            nodes: 0,
            stopped: false,
            sink,
            info_callback: None,
        }
    }

    fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }

        // Check the clock and the external stop request periodically.
        if self.nodes % STOP_CHECK_INTERVAL == 0 {
            if let Some(sink) = self.sink {
                if sink.stop_requested() {
                    self.stopped = true;
                    return true;
                }
            }
            if let Some(move_time) = self.limits.move_time {
                if self.start_time.elapsed() >= move_time {
                    self.stopped = true;
                    return true;
                }
            }
        }

        false
    }
}

/// Searches to a fixed depth.
pub fn search(state: &GameState, depth: u8) -> SearchResult {
    search_with_limits(state, SearchLimits::depth(depth))
}

/// Searches under the given limits without a reporting sink.
pub fn search_with_limits(state: &GameState, limits: SearchLimits) -> SearchResult {
    let mut info = SearchInfo::new(state, limits, None);
    search_internal(state, &mut info)
}

/// Searches under the given limits, reporting the best action found so
/// far through `sink` as the search deepens.
pub fn search_with_sink(state: &GameState, limits: SearchLimits, sink: &ActionSink) -> SearchResult {
    let mut info = SearchInfo::new(state, limits, Some(sink));
    search_internal(state, &mut info)
}

/// Searches with a per-depth progress callback in addition to the sink.
pub fn search_with_callback(
    state: &GameState,
    limits: SearchLimits,
    sink: &ActionSink,
    callback: InfoCallback,
) -> SearchResult {
    let mut info = SearchInfo::new(state, limits, Some(sink));
    info.info_callback = Some(callback);
    search_internal(state, &mut info)
}

/// The deepest any line from `state` can run: one ply per open cell.
/// A search given this depth only ever ends lines at terminal states.
fn remaining_depth(state: &GameState) -> u8 {
    (state.open_cells().count() + 1).min(u8::MAX as u32) as u8
}

fn search_internal(state: &GameState, info: &mut SearchInfo) -> SearchResult {
    if info.limits.move_time.is_some() {
        // Iterative deepening under a clock
        return iterative_deepening(state, info);
    }

    // Fixed-depth search, or an exhaustive one at a depth no line reaches.
    let depth = match info.limits.max_depth {
        Some(max_depth) => max_depth.max(1),
        None => remaining_depth(state),
    };

    let (score, best_action) = alpha_beta_root(state, depth, info);

    if let (Some(sink), Some(action)) = (info.sink, best_action) {
        sink.report(action);
    }

    SearchResult {
        best_action,
        score,
        depth,
        nodes: info.nodes,
        stopped: info.stopped,
    }
}

/// Root of the alpha-beta search.
///
/// Walks the legal actions in their enumeration order with a strict
/// comparison, so the first action wins ties. Alpha is tightened after
/// every action even though the root itself never prunes.
///
/// A state with no legal actions yields no action and a meaningless
/// score; the referee never asks a stuck player for an action.
fn alpha_beta_root(state: &GameState, depth: u8, info: &mut SearchInfo) -> (i32, Option<Action>) {
    let mut alpha = -INFINITY;
    let beta = INFINITY;

    let mut best_score = -INFINITY;
    let mut best_action = None;

    for action in state.actions() {
        let v = min_value(&state.apply(action), depth - 1, alpha, beta, info);

        if info.stopped {
            break;
        }

        if v > best_score {
            best_score = v;
            best_action = Some(action);
        }

        if v > alpha {
            alpha = v;
        }
    }

    (best_score, best_action)
}

/// Value of a state where the searching player is to move.
fn max_value(state: &GameState, depth: u8, mut alpha: i32, beta: i32, info: &mut SearchInfo) -> i32 {
    info.nodes += 1;

    if info.should_stop() {
        return 0;
    }

    // Terminal states are exact regardless of the depth left.
    if state.is_terminal() {
        return WIN_SCORE * state.utility(info.perspective);
    }

    if depth == 0 {
        return liberty_steal_score(state, info.perspective);
    }

    let mut v = -INFINITY;
    for action in state.actions() {
        v = v.max(min_value(&state.apply(action), depth - 1, alpha, beta, info));

        // Beta cutoff: the minimizing parent will not allow this branch.
        if v >= beta {
            return v;
        }
        if v > alpha {
            alpha = v;
        }
    }

    v
}

/// Value of a state where the opponent is to move.
fn min_value(state: &GameState, depth: u8, alpha: i32, mut beta: i32, info: &mut SearchInfo) -> i32 {
    info.nodes += 1;

    if info.should_stop() {
        return 0;
    }

    if state.is_terminal() {
        return WIN_SCORE * state.utility(info.perspective);
    }

    if depth == 0 {
        return liberty_steal_score(state, info.perspective);
    }

    let mut v = INFINITY;
    for action in state.actions() {
        v = v.min(max_value(&state.apply(action), depth - 1, alpha, beta, info));

        // Alpha cutoff: the maximizing parent already has at least alpha.
        if v <= alpha {
            return v;
        }
        if v < beta {
            beta = v;
        }
    }

    v
}

fn iterative_deepening(state: &GameState, info: &mut SearchInfo) -> SearchResult {
    let mut best_result = SearchResult {
        best_action: None,
        score: 0,
        depth: 0,
        nodes: 0,
        stopped: false,
    };

    // Search to increasing depths until the clock runs out. Each
    // completed depth replaces the reported action, so an interruption
    // still leaves the best action of the deepest finished pass behind.
    let horizon = remaining_depth(state);
    for depth in 1..=horizon {
        let (score, best_action) = alpha_beta_root(state, depth, info);

        // Only keep the result if this depth completed.
        if info.stopped || best_action.is_none() {
            break;
        }

        best_result.best_action = best_action;
        best_result.score = score;
        best_result.depth = depth;
        best_result.nodes = info.nodes;

        if let (Some(sink), Some(action)) = (info.sink, best_action) {
            sink.report(action);
        }

        if let Some(ref callback) = info.info_callback {
            callback(&SearchProgress {
                depth,
                score,
                nodes: info.nodes,
                time_ms: info.start_time.elapsed().as_millis() as u64,
            });
        }

        // A proven win or loss cannot change at deeper depths.
        if score.abs() >= WIN_SCORE {
            break;
        }
    }

    best_result.nodes = info.nodes;
    best_result.stopped = info.stopped;
    best_result
}
