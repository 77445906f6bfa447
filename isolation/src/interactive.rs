use isolation_agents::{ActionSink, Agent, MinimaxAgent};
use isolation_core::{Action, GameState, Player, Square, HEIGHT, WIDTH};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent},
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
    ExecutableCommand,
};
use std::io::{self, Write};

pub struct InteractiveGame {
    state: GameState,
    cursor_pos: (u8, u8), // (col, row)
    legal_targets: Vec<Square>,
    message: String,
    history: Vec<Action>,
    engine: MinimaxAgent,
}

impl InteractiveGame {
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
            cursor_pos: (WIDTH / 2, HEIGHT / 2),
            legal_targets: Vec::new(),
            message: String::from("Use hjkl to move, Enter to play a cell, q to quit"),
            history: Vec::new(),
            engine: MinimaxAgent::with_time_limit(2000),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(Hide)?;
        stdout.execute(Clear(ClearType::All))?;

        let result = self.game_loop();

        // Cleanup
        stdout.execute(Show)?;
        terminal::disable_raw_mode()?;
        stdout.execute(Clear(ClearType::All))?;
        stdout.execute(MoveTo(0, 0))?;

        result
    }

    fn game_loop(&mut self) -> io::Result<()> {
        loop {
            self.refresh_targets();
            self.draw_board()?;

            if self.state.is_terminal() {
                self.message = format!(
                    "Game over: {} is isolated, {} wins!",
                    self.state.to_move(),
                    self.state.to_move().opponent()
                );
                self.draw_board()?;
                event::read()?; // Wait for any key
                break;
            }

            // Handle input
            if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1, 0),
                    KeyCode::Char('j') | KeyCode::Down => self.move_cursor(0, -1),
                    KeyCode::Char('k') | KeyCode::Up => self.move_cursor(0, 1),
                    KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1, 0),
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        if self.handle_selection() {
                            // Player acted, now the engine replies
                            self.engine_move()?;
                        }
                    }
                    KeyCode::Char('u') => self.undo_move(),
                    KeyCode::Char('n') => self.new_game(),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn refresh_targets(&mut self) {
        self.legal_targets = self
            .state
            .actions()
            .into_iter()
            .map(|a| a.target())
            .collect();
    }

    fn move_cursor(&mut self, dx: i8, dy: i8) {
        let new_col = self.cursor_pos.0 as i8 + dx;
        let new_row = self.cursor_pos.1 as i8 + dy;

        if new_col >= 0 && new_col < WIDTH as i8 && new_row >= 0 && new_row < HEIGHT as i8 {
            self.cursor_pos = (new_col as u8, new_row as u8);
        }
    }

    fn handle_selection(&mut self) -> bool {
        let cursor = match Square::new(self.cursor_pos.0, self.cursor_pos.1) {
            Some(square) => square,
            None => return false,
        };

        match self
            .state
            .actions()
            .into_iter()
            .find(|a| a.target() == cursor)
        {
            Some(action) => {
                self.state = self.state.apply(action);
                self.history.push(action);
                self.message = format!("You played: {}", action);
                true
            }
            None => {
                self.message = format!("{} is not a legal cell", cursor);
                false
            }
        }
    }

    fn engine_move(&mut self) -> io::Result<()> {
        if self.state.is_terminal() {
            return Ok(());
        }

        self.message = String::from("Engine thinking...");
        self.refresh_targets();
        self.draw_board()?;

        let sink = ActionSink::new();
        let reply = self.engine.choose_action(&self.state, &sink);
        self.apply_engine_reply(reply);

        Ok(())
    }

    fn apply_engine_reply(&mut self, reply: Option<Action>) {
        match reply {
            Some(action) => {
                self.state = self.state.apply(action);
                self.history.push(action);
                self.message = format!("Engine played: {}", action);
            }
            None => {
                // A non-terminal state always has a legal action; an
                // empty reply is the engine breaking its contract.
                self.message =
                    String::from("Engine produced no action and forfeits the game (n=new)");
            }
        }
    }

    fn undo_move(&mut self) {
        if self.history.len() >= 2 {
            // Undo both the player's and the engine's actions
            self.history.pop();
            self.history.pop();

            // Rebuild position
            self.state = GameState::new();
            for action in &self.history {
                self.state = self.state.apply(*action);
            }

            self.message = String::from("Undid last move");
        } else {
            self.message = String::from("Nothing to undo");
        }
    }

    fn new_game(&mut self) {
        self.state = GameState::new();
        self.history.clear();
        self.cursor_pos = (WIDTH / 2, HEIGHT / 2);
        self.message = String::from("New game started!");
    }

    fn draw_board(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.execute(MoveTo(0, 0))?;

        // Title
        println!("Isolation - Interactive Mode (vim keys: hjkl)\r");
        println!("Commands: Enter=play cell, u=undo, n=new, q=quit\r");
        println!("\r");

        // Board with coordinates
        println!("  a b c d e f g h i j k  \r");
        println!(" ┌───────────────────────┐\r");

        for row in (0..HEIGHT).rev() {
            print!("{}│ ", row + 1);

            for col in 0..WIDTH {
                let square = Square::new(col, row).unwrap();

                let is_cursor = self.cursor_pos == (col, row);
                let is_legal = self.legal_targets.contains(&square);

                // Set background color
                if is_cursor {
                    stdout.execute(SetBackgroundColor(TermColor::Yellow))?;
                } else if is_legal {
                    stdout.execute(SetBackgroundColor(TermColor::Blue))?;
                } else if !self.state.is_open(square) {
                    stdout.execute(SetBackgroundColor(TermColor::DarkGrey))?;
                }

                if self.state.location(Player::One) == Some(square) {
                    stdout.execute(SetForegroundColor(TermColor::White))?;
                    stdout.execute(Print("♞ "))?;
                } else if self.state.location(Player::Two) == Some(square) {
                    stdout.execute(SetForegroundColor(TermColor::Magenta))?;
                    stdout.execute(Print("♞ "))?;
                } else if self.state.is_open(square) {
                    stdout.execute(Print(". "))?;
                } else {
                    stdout.execute(Print("  "))?;
                }

                stdout.execute(ResetColor)?;
            }

            println!("│{}\r", row + 1);
        }

        println!(" └───────────────────────┘\r");
        println!("  a b c d e f g h i j k  \r");
        println!("\r");

        // Game info
        println!(
            "{} to move | Ply {} | {} cells open\r",
            self.state.to_move(),
            self.state.ply(),
            self.state.open_cells().count()
        );

        // Status message
        println!("\r");
        println!("{}\r", self.message);

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_reply_is_applied() {
        let mut game = InteractiveGame::new();
        let c3 = Square::new(2, 2).unwrap();

        game.apply_engine_reply(Some(Action::Place(c3)));

        assert_eq!(game.state.ply(), 1);
        assert_eq!(game.history, vec![Action::Place(c3)]);
        assert!(game.message.contains("Engine played"));
    }

    #[test]
    fn test_empty_engine_reply_is_surfaced() {
        let mut game = InteractiveGame::new();
        let before = game.state.clone();

        game.apply_engine_reply(None);

        // The position is untouched and the violation is shown rather
        // than silently ignored.
        assert_eq!(game.state, before);
        assert!(game.history.is_empty());
        assert!(game.message.contains("forfeits"));
    }
}
