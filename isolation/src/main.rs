mod interactive;
mod referee;

use isolation_agents::{
    liberty_steal_score, search, search_with_callback, ActionSink, Agent, GreedyAgent,
    MinimaxAgent, RandomAgent, SearchLimits,
};
use isolation_core::{perft, perft_divide, positions, GameState, Player, Square, HEIGHT, WIDTH};
use referee::{play_match, WinReason};
use std::env;
use std::time::Duration;

fn display_board(state: &GameState) {
    println!("\n  a b c d e f g h i j k");
    println!("  ----------------------");

    for row in (0..HEIGHT).rev() {
        print!("{} ", row + 1);

        for col in 0..WIDTH {
            let square = Square::new(col, row).unwrap();

            if state.location(Player::One) == Some(square) {
                print!("1 ");
            } else if state.location(Player::Two) == Some(square) {
                print!("2 ");
            } else if state.is_open(square) {
                print!(". ");
            } else {
                print!("x ");
            }
        }

        println!("| {}", row + 1);
    }

    println!("  ----------------------");
    println!("  a b c d e f g h i j k\n");

    println!("{} to move, ply {}", state.to_move(), state.ply());
    println!("{} cells open", state.open_cells().count());
}

fn parse_position(notation: &str) -> Option<GameState> {
    match GameState::from_notation(notation) {
        Ok(state) => Some(state),
        Err(e) => {
            eprintln!("Error parsing position: {}", e);
            None
        }
    }
}

/// Builds an agent from a command-line name like "greedy", "random",
/// "depth=4", "time=2000" or "exhaustive".
fn make_agent(spec: &str) -> Option<Box<dyn Agent + Send>> {
    if spec == "greedy" {
        return Some(Box::new(GreedyAgent::new()));
    }
    if spec == "random" {
        return Some(Box::new(RandomAgent::new()));
    }
    if spec == "exhaustive" {
        return Some(Box::new(MinimaxAgent::exhaustive()));
    }
    if let Some(depth) = spec.strip_prefix("depth=") {
        return depth.parse().ok().map(|d| {
            Box::new(MinimaxAgent::new(d)) as Box<dyn Agent + Send>
        });
    }
    if let Some(millis) = spec.strip_prefix("time=") {
        return millis.parse().ok().map(|ms| {
            Box::new(MinimaxAgent::with_time_limit(ms)) as Box<dyn Agent + Send>
        });
    }
    None
}

fn run_match(args: &[String]) {
    let budget_ms: u64 = args
        .get(2)
        .and_then(|a| a.parse().ok())
        .unwrap_or(1000);
    let one_spec = args.get(3).map(String::as_str).unwrap_or("time=1000");
    let two_spec = args.get(4).map(String::as_str).unwrap_or("greedy");

    let (Some(mut one), Some(mut two)) = (make_agent(one_spec), make_agent(two_spec)) else {
        eprintln!("Unknown agent; use greedy, random, exhaustive, depth=N or time=MS");
        return;
    };

    println!(
        "{} (player 1) vs {} (player 2), {} ms per turn",
        one.name(),
        two.name(),
        budget_ms
    );

    let outcome = play_match(&mut *one, &mut *two, Duration::from_millis(budget_ms));

    let mut state = GameState::new();
    for action in &outcome.history {
        state = state.apply(*action);
    }
    display_board(&state);

    let reason = match outcome.reason {
        WinReason::Isolation => "opponent isolated",
        WinReason::Timeout => "opponent produced no action in time",
        WinReason::Illegal => "opponent played an illegal action",
    };
    println!("{} wins after {} plies ({})", outcome.winner, outcome.plies, reason);
}

fn run_search(state: &GameState, limits: SearchLimits) {
    println!("Position: {}", state.to_notation());

    let start = std::time::Instant::now();
    let sink = ActionSink::new();
    let result = search_with_callback(
        state,
        limits,
        &sink,
        Box::new(|progress| {
            println!(
                "depth {:2}  score {:7}  nodes {:10}  time {} ms",
                progress.depth, progress.score, progress.nodes, progress.time_ms
            );
        }),
    );
    let elapsed = start.elapsed();

    if let Some(best_action) = result.best_action {
        println!("\nBest action: {}", best_action);
        println!("Score: {}", result.score);
        println!("Depth: {}", result.depth);
        println!("Nodes: {}", result.nodes);
        println!("Time: {:.2}s", elapsed.as_secs_f64());
        println!("NPS: {:.0}", result.nodes as f64 / elapsed.as_secs_f64());
        if result.stopped {
            println!("(search stopped by time limit)");
        }
    } else {
        println!("No legal actions available");
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "play" {
        let mut game = interactive::InteractiveGame::new();
        if let Err(e) = game.run() {
            eprintln!("Terminal error: {}", e);
        }
    } else if args.len() > 1 && args[1] == "match" {
        run_match(&args);
    } else if args.len() > 1 && args[1] == "perft" {
        if args.len() < 3 {
            println!("Usage: {} perft <depth> [position]", args[0]);
            return;
        }

        let depth: u8 = args[2].parse().unwrap_or(1);

        let state = if args.len() > 3 {
            match parse_position(&args[3]) {
                Some(s) => s,
                None => return,
            }
        } else {
            GameState::new()
        };

        println!("Running perft({})...", depth);
        println!("Position: {}", state.to_notation());

        if depth <= 2 {
            // Show action breakdown for shallow depths
            let results = perft_divide(&state, depth);
            let mut total = 0;

            for (action, count) in &results {
                println!("{}: {}", action, count);
                total += count;
            }

            println!("\nTotal: {}", total);
        } else {
            // Just show total for deeper depths
            let start = std::time::Instant::now();
            let nodes = perft(&state, depth);
            let elapsed = start.elapsed();

            println!("Nodes: {}", nodes);
            println!("Time: {:.2}s", elapsed.as_secs_f64());
            println!("NPS: {:.0}", nodes as f64 / elapsed.as_secs_f64());
        }
    } else if args.len() > 1 && args[1] == "pos" {
        // Display a position string
        if args.len() < 3 {
            println!("Usage: {} pos <position>", args[0]);
            return;
        }

        if let Some(state) = parse_position(&args[2]) {
            display_board(&state);
            println!("Position: {}", state.to_notation());
        }
    } else if args.len() > 1 && args[1] == "eval" {
        // Evaluate position
        let state = if args.len() > 2 {
            match parse_position(&args[2]) {
                Some(s) => s,
                None => return,
            }
        } else {
            GameState::new()
        };

        display_board(&state);
        for player in [Player::One, Player::Two] {
            println!(
                "Evaluation for {}: {}",
                player,
                liberty_steal_score(&state, player)
            );
        }
    } else if args.len() > 1 && args[1] == "search" {
        // Search to a fixed depth
        let (state, depth) = if args.len() > 2 {
            // The second arg is either a depth or a position
            if let Ok(d) = args[2].parse::<u8>() {
                (GameState::new(), d)
            } else {
                match parse_position(&args[2]) {
                    Some(s) => {
                        let d = if args.len() > 3 {
                            args[3].parse().unwrap_or(4)
                        } else {
                            4
                        };
                        (s, d)
                    }
                    None => return,
                }
            }
        } else {
            (GameState::new(), 4)
        };

        println!("Searching to depth {}...", depth);
        let start = std::time::Instant::now();
        let result = search(&state, depth);
        let elapsed = start.elapsed();

        if let Some(best_action) = result.best_action {
            println!("Position: {}", state.to_notation());
            println!("\nBest action: {}", best_action);
            println!("Score: {}", result.score);
            println!("Nodes: {}", result.nodes);
            println!("Time: {:.2}s", elapsed.as_secs_f64());
        } else {
            println!("No legal actions available");
        }
    } else if args.len() > 1 && args[1] == "movetime" {
        // Iterative deepening under a time limit
        let (state, millis) = if args.len() > 2 {
            // The second arg is either a time or a position
            if let Ok(ms) = args[2].parse::<u64>() {
                (GameState::new(), ms)
            } else {
                match parse_position(&args[2]) {
                    Some(s) => {
                        let ms = if args.len() > 3 {
                            args[3].parse().unwrap_or(1000)
                        } else {
                            1000
                        };
                        (s, ms)
                    }
                    None => return,
                }
            }
        } else {
            (GameState::new(), 1000)
        };

        println!("Searching for {} ms...", millis);
        run_search(&state, SearchLimits::move_time(millis));
    } else if args.len() > 1 && args[1] == "solve" {
        // Exhaustive search; only practical on thinned-out boards
        if args.len() < 3 {
            println!("Usage: {} solve <position>", args[0]);
            return;
        }

        if let Some(state) = parse_position(&args[2]) {
            run_search(&state, SearchLimits::exhaustive());
        }
    } else {
        println!("Knight's isolation engine");
        println!("Commands:");
        println!("  play                    - Play against the engine");
        println!("  match [ms] [a1] [a2]    - Referee a match between two agents");
        println!("  perft <depth> [pos]     - Run perft test");
        println!("  pos <position>          - Parse and display a position");
        println!("  eval [pos]              - Evaluate a position");
        println!("  search [depth|pos] [depth] - Search to a fixed depth");
        println!("  movetime [ms|pos] [ms]  - Search with a time limit (ms)");
        println!("  solve <pos>             - Search a position exhaustively");
        println!("\nAgents: greedy, random, exhaustive, depth=N, time=MS");
        println!("\nExample positions:");
        println!("  Starting: {}", positions::STARTING);
        println!("  Midgame:  {}", positions::MIDGAME);
    }
}
