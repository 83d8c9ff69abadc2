use crate::config::{check_depth, Difficulty, EngineConfig};
use crate::game::Game;
use crate::movegen::{GameState, Move};
use crate::search::Search;
use anyhow::{anyhow, bail, Result};
use log::{debug, warn};
use std::io::{self, BufRead, Write};

/// Line-oriented engine protocol in the spirit of UCCI, the Xiangqi
/// counterpart of UCI. One command per line, replies on stdout.
pub struct UcciHandler {
    game: Game,
    search: Search,
    config: EngineConfig,
}

impl Default for UcciHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl UcciHandler {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        UcciHandler {
            game: Game::new(),
            search: Search::from_config(&config),
            config,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut reader = stdin.lock();
        let mut line = String::new();

        while reader.read_line(&mut line)? > 0 {
            let command = line.trim();
            if command == "quit" {
                break;
            }

            match self.handle_command(command) {
                Ok(response) => print!("{}", response),
                Err(err) => {
                    warn!("`{}` failed: {}", command, err);
                    println!("error {}", err);
                }
            }

            stdout.flush()?;
            line.clear();
        }
        Ok(())
    }

    pub fn handle_command(&mut self, command: &str) -> Result<String> {
        let parts: Vec<&str> = command.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(String::new());
        }

        match parts[0] {
            "ucci" => Ok(self.handle_ucci()),
            "isready" => Ok("readyok\n".to_string()),
            "setoption" => self.handle_setoption(&parts[1..]),
            "position" => self.handle_position(&parts[1..]),
            "go" => self.handle_go(&parts[1..]),
            "hint" => Ok(self.handle_hint()),
            "play" => self.handle_play(&parts[1..]),
            "undo" => {
                let mv = self.game.undo()?;
                Ok(format!("undone {}\n", mv))
            }
            "legalmoves" => Ok(self.handle_legalmoves()),
            "status" => Ok(self.status_line()),
            "d" => Ok(format!("{}\nfen {}\n", self.game.board(), self.game.to_fen())),
            "quit" => Ok(String::new()),
            other => {
                warn!("ignoring unknown command `{}`", other);
                Ok(String::new())
            }
        }
    }

    fn handle_ucci(&self) -> String {
        format!(
            "id name Xiangqi Engine\n\
             option difficulty type combo default {} var entry var advance\n\
             ucciok\n",
            self.config.difficulty
        )
    }

    fn handle_setoption(&mut self, parts: &[&str]) -> Result<String> {
        match parts {
            ["difficulty", value] => {
                self.config.difficulty = value.parse::<Difficulty>()?;
                debug!("difficulty set to {}", self.config.difficulty);
                Ok(String::new())
            }
            _ => bail!("unsupported option `{}`", parts.join(" ")),
        }
    }

    fn handle_position(&mut self, parts: &[&str]) -> Result<String> {
        let moves_at = parts.iter().position(|&p| p == "moves").unwrap_or(parts.len());
        let (setup, moves) = parts.split_at(moves_at);

        let mut game = match setup {
            ["startpos"] => Game::new(),
            ["fen", fen @ ..] if !fen.is_empty() => Game::from_fen(&fen.join(" "))?,
            _ => bail!("expected `startpos` or `fen <fen>`"),
        };

        for text in moves.iter().skip(1) {
            game.play(text.parse::<Move>()?)?;
        }

        self.game = game;
        Ok(String::new())
    }

    fn handle_go(&mut self, parts: &[&str]) -> Result<String> {
        let mut depth = self.config.difficulty.depth();

        for i in 0..parts.len() {
            if parts[i] == "depth" {
                depth = parts
                    .get(i + 1)
                    .and_then(|s| s.parse::<u32>().ok())
                    .ok_or_else(|| anyhow!("`depth` needs a number"))?;
                depth = check_depth("depth", depth)?;
            }
        }

        Ok(self.best_move_reply("bestmove", depth))
    }

    fn handle_hint(&mut self) -> String {
        self.best_move_reply("hint", self.config.hint_depth)
    }

    fn best_move_reply(&mut self, keyword: &str, depth: u32) -> String {
        let result = self
            .search
            .analyse(self.game.board(), self.game.side_to_move(), depth);
        match result.best_move {
            Some(mv) => format!("{} {}\n", keyword, mv),
            None => "nobestmove\n".to_string(),
        }
    }

    fn handle_play(&mut self, parts: &[&str]) -> Result<String> {
        let text = parts.first().ok_or_else(|| anyhow!("`play` needs a move"))?;
        self.game.play(text.parse::<Move>()?)?;
        Ok(self.status_line())
    }

    fn handle_legalmoves(&self) -> String {
        let moves: Vec<String> = self.game.legal_moves().iter().map(|mv| mv.to_string()).collect();
        format!("legalmoves {}\n", moves.join(" "))
    }

    fn status_line(&self) -> String {
        if let Some(outcome) = self.game.outcome() {
            return format!("gameover {}\n", outcome);
        }
        match self.game.status() {
            GameState::Check => format!("check {} to move\n", self.game.side_to_move()),
            _ => format!("ongoing {} to move\n", self.game.side_to_move()),
        }
    }
}
