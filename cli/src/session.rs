// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text command loop over a [`Game`]

use crate::render::render_board;
use anyhow::{bail, Context, Result};
use goban_core::{Color, FirstLegalMove, Game, GameConfig, Move, Phase};

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(String),
    Pass,
    Resign,
    Score,
    Show,
    New,
    Quit,
}

impl Command {
    /// Parse one line of input; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "play" | "p" => {
                let target = words.next().context("Usage: play <point>, e.g. play D4")?;
                Command::Play(target.to_string())
            }
            "pass" => Command::Pass,
            "resign" => Command::Resign,
            "score" => Command::Score,
            "show" => Command::Show,
            "new" => Command::New,
            "quit" | "exit" => Command::Quit,
            other => bail!("Unknown command: {}", other),
        };

        if words.next().is_some() {
            bail!("Too many arguments for {}", verb);
        }
        Ok(Some(command))
    }
}

/// What the loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// One interactive game, optionally with the engine playing White
pub struct Session {
    game: Game,
    engine: Option<FirstLegalMove>,
}

impl Session {
    pub fn new(config: GameConfig, engine_white: bool) -> Result<Self> {
        let mut game = Game::new(config).context("Failed to create game")?;
        game.start()?;
        Ok(Self {
            game,
            engine: engine_white.then_some(FirstLegalMove),
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        match command {
            Command::Play(notation) => {
                let point = self.game.board().notation_to_point(&notation)?;
                self.play(Move::Place(point))?;
            }
            Command::Pass => self.play(Move::Pass)?,
            Command::Resign => {
                self.game.resign()?;
            }
            Command::Score => {
                let text = match self.game.result() {
                    Ok(result) => format!("Result: {}", result),
                    Err(_) => format!("Current score: {}", self.game.score()),
                };
                return Ok(Reply::Text(text));
            }
            Command::Show => {}
            Command::New => {
                self.game.reset()?;
                self.game.start()?;
            }
            Command::Quit => return Ok(Reply::Quit),
        }
        Ok(Reply::Text(self.status()))
    }

    fn play(&mut self, mv: Move) -> Result<()> {
        self.game.play_move(mv)?;

        if let Some(engine) = self.engine.as_mut() {
            if self.game.phase() == Phase::PlayHuman && self.game.current_player() == Color::White {
                self.game
                    .play_engine_move(engine)
                    .context("Engine produced an illegal move")?;
            }
        }
        Ok(())
    }

    /// Board plus a one-line summary
    pub fn status(&self) -> String {
        let mut text = render_board(&self.game);
        text.push_str(&format!("Last move: {}", self.game.last_move_label()));
        match self.game.result() {
            Ok(result) => text.push_str(&format!("\nGame over: {}", result)),
            Err(_) => text.push_str(&format!("\n{:?} to play", self.game.current_player())),
        }
        text
    }
}
