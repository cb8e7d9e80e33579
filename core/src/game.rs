// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game session: phases, turn flow and final results
//!
//! A [`Game`] owns a [`Board`] and drives it through
//! `Init -> PlayHuman -> Finished`. Every mutating call returns the events
//! it produced and also pushes them, in order, to subscribed observers.

use crate::board::Board;
use crate::config::GameConfig;
use crate::engine::MoveGenerator;
use crate::scoring::{AreaScore, PointState};
use crate::{Color, GameError, GameEvent, Move};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Created, not started
    Init,
    /// Waiting for a human move
    PlayHuman,
    /// Waiting for a [`MoveGenerator`] move
    PlayEngine,
    /// Game over; terminal
    Finished,
}

impl Phase {
    /// Whether moves are accepted in this phase
    pub fn is_playing(&self) -> bool {
        matches!(self, Phase::PlayHuman | Phase::PlayEngine)
    }
}

/// How a finished game ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Two consecutive passes; scored on the final position
    Points(AreaScore),
    /// The player to move resigned
    Resignation {
        /// The player who did not resign
        winner: Color,
    },
}

impl GameResult {
    /// Winning color, `None` for a jigo
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameResult::Points(score) => score.winner(),
            GameResult::Resignation { winner } => Some(*winner),
        }
    }

    /// The final score for games decided on points
    pub fn score(&self) -> Option<&AreaScore> {
        match self {
            GameResult::Points(score) => Some(score),
            GameResult::Resignation { .. } => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Points(score) => write!(f, "{}", score),
            GameResult::Resignation {
                winner: Color::Black,
            } => write!(f, "B+R"),
            GameResult::Resignation {
                winner: Color::White,
            } => write!(f, "W+R"),
        }
    }
}

type Observer = Box<dyn FnMut(&Game, GameEvent)>;

/// A single game session
pub struct Game {
    config: GameConfig,
    phase: Phase,
    board: Board,
    result: Option<GameResult>,
    observers: Vec<Observer>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("board", &self.board)
            .field("result", &self.result)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Game {
    /// Create a session in [`Phase::Init`] with an empty board
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            phase: Phase::Init,
            board: Board::new(config.board_size)?,
            result: None,
            observers: Vec::new(),
        })
    }

    /// Register a callback invoked synchronously for every event.
    ///
    /// The callback sees the session after the change has been applied.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&Game, GameEvent) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> u8 {
        self.board.size()
    }

    pub fn current_player(&self) -> Color {
        self.board.current_player()
    }

    pub fn move_count(&self) -> usize {
        self.board.move_count()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.board.last_move()
    }

    /// Live score of the current position
    pub fn score(&self) -> AreaScore {
        self.board.score()
    }

    /// The final result; only available once the game is finished
    pub fn result(&self) -> Result<&GameResult, GameError> {
        self.result.as_ref().ok_or(GameError::NoResult)
    }

    /// Legality of a placement; always false outside the playing phases
    pub fn is_move_legal(&self, point: usize) -> Result<bool, GameError> {
        if self.phase.is_playing() {
            self.board.is_move_legal(point)
        } else {
            self.board.color_at(point).map(|_| false)
        }
    }

    /// What to draw on a point: the territory map after a scored finish,
    /// the live stones otherwise
    pub fn point_state(&self, point: usize) -> Result<PointState, GameError> {
        if let Some(GameResult::Points(score)) = &self.result {
            return score
                .points
                .get(point)
                .copied()
                .ok_or(GameError::InvalidPoint {
                    point,
                    size: self.size(),
                });
        }
        self.board.color_at(point).map(PointState::from)
    }

    /// Short description of the last move, e.g. `"12. D4"` or `"3. Pass"`
    pub fn last_move_label(&self) -> String {
        match self.last_move() {
            None => "-".to_string(),
            Some(Move::Pass) => format!("{}. Pass", self.move_count()),
            Some(Move::Place(point)) => {
                let notation = self
                    .board
                    .point_to_notation(point)
                    .unwrap_or_else(|_| point.to_string());
                format!("{}. {}", self.move_count(), notation)
            }
        }
    }

    /// `Init -> PlayHuman`
    pub fn start(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.expect_phase(Phase::Init)?;
        self.phase = Phase::PlayHuman;
        tracing::info!(size = self.size(), "Game started");
        Ok(self.dispatch(vec![GameEvent::PhaseChanged]))
    }

    /// Play a move for the player to move.
    ///
    /// Placements must pass [`Board::is_move_legal`]; passes always do. A
    /// second consecutive pass ends the game on points.
    pub fn play_move(&mut self, mv: Move) -> Result<Vec<GameEvent>, GameError> {
        let events = self.apply_move(mv)?;
        Ok(self.dispatch(events))
    }

    /// The player to move resigns; the opponent wins
    pub fn resign(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_playing()?;
        let winner = self.current_player().opposite();
        let events = self.finish(GameResult::Resignation { winner });
        Ok(self.dispatch(events))
    }

    /// Ask `generator` for the next move and play it.
    ///
    /// The session passes through [`Phase::PlayEngine`] while the generator
    /// runs. An illegal proposal is rejected and the turn goes back to the
    /// human side unchanged.
    pub fn play_engine_move(
        &mut self,
        generator: &mut dyn MoveGenerator,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.expect_phase(Phase::PlayHuman)?;
        self.phase = Phase::PlayEngine;
        let mut events = vec![GameEvent::PhaseChanged];

        let mv = generator.generate_move(&self.board);
        match self.apply_move(mv) {
            Ok(more) => events.extend(more),
            Err(err) => {
                self.phase = Phase::PlayHuman;
                events.push(GameEvent::PhaseChanged);
                self.dispatch(events);
                return Err(err);
            }
        }

        if self.phase == Phase::PlayEngine {
            self.phase = Phase::PlayHuman;
            events.push(GameEvent::PhaseChanged);
        }
        Ok(self.dispatch(events))
    }

    /// Throw the board away and return to [`Phase::Init`] with a fresh one.
    ///
    /// Observers stay subscribed.
    pub fn reset(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.board = Board::new(self.config.board_size)?;
        self.phase = Phase::Init;
        self.result = None;
        tracing::info!("Game reset");
        Ok(self.dispatch(vec![GameEvent::BoardChanged, GameEvent::PhaseChanged]))
    }

    fn apply_move(&mut self, mv: Move) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_playing()?;

        if let Move::Place(point) = mv {
            if !self.board.is_move_legal(point)? {
                let notation = self.board.point_to_notation(point)?;
                tracing::debug!(%notation, player = ?self.current_player(), "Illegal move rejected");
                return Err(GameError::IllegalMove(notation));
            }
        }

        self.board.play_move(mv)?;

        let mut events = Vec::new();
        if self.ended_by_passes() {
            let score = self.board.score();
            events.extend(self.finish(GameResult::Points(score)));
        }
        events.push(GameEvent::BoardChanged);
        Ok(events)
    }

    fn ended_by_passes(&self) -> bool {
        let history = self.board.history();
        history.len() >= 3
            && history[history.len() - 2..]
                .iter()
                .all(|entry| entry.last_move == Some(Move::Pass))
    }

    fn finish(&mut self, result: GameResult) -> Vec<GameEvent> {
        tracing::info!(result = %result, moves = self.move_count(), "Game finished");
        self.phase = Phase::Finished;
        self.result = Some(result);
        vec![GameEvent::PhaseChanged, GameEvent::ResultChanged]
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn ensure_playing(&self) -> Result<(), GameError> {
        if self.phase.is_playing() {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                expected: Phase::PlayHuman,
                actual: self.phase,
            })
        }
    }

    fn dispatch(&mut self, events: Vec<GameEvent>) -> Vec<GameEvent> {
        if !self.observers.is_empty() {
            let mut observers = std::mem::take(&mut self.observers);
            for &event in &events {
                for observer in observers.iter_mut() {
                    observer(&*self, event);
                }
            }
            self.observers = observers;
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(size: u8) -> Game {
        let mut game = Game::new(GameConfig::new(size)).unwrap();
        game.start().unwrap();
        game
    }

    #[test]
    fn test_new_game_is_init() {
        let game = Game::new(GameConfig::default()).unwrap();
        assert_eq!(game.phase(), Phase::Init);
        assert_eq!(game.size(), 9);
        assert_eq!(game.last_move_label(), "-");
        assert_eq!(game.result().unwrap_err(), GameError::NoResult);
    }

    #[test]
    fn test_start_twice_fails() {
        let mut game = started(9);
        assert_eq!(
            game.start().unwrap_err(),
            GameError::WrongPhase {
                expected: Phase::Init,
                actual: Phase::PlayHuman
            }
        );
    }

    #[test]
    fn test_moves_rejected_before_start() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        assert!(matches!(
            game.play_move(Move::Pass),
            Err(GameError::WrongPhase { .. })
        ));
        assert!(!game.is_move_legal(40).unwrap());
        assert!(game.is_move_legal(81).is_err());
    }

    #[test]
    fn test_last_move_label() {
        let mut game = started(9);
        game.play_move(Move::Place(30)).unwrap();
        assert_eq!(game.last_move_label(), "1. D6");
        game.play_move(Move::Pass).unwrap();
        assert_eq!(game.last_move_label(), "2. Pass");
    }

    #[test]
    fn test_result_display() {
        assert_eq!(
            GameResult::Resignation {
                winner: Color::Black
            }
            .to_string(),
            "B+R"
        );
        assert_eq!(
            GameResult::Resignation {
                winner: Color::White
            }
            .to_string(),
            "W+R"
        );
    }

    #[test]
    fn test_reset_keeps_observers() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut game = started(9);
        let sink = Rc::clone(&seen);
        game.subscribe(move |_, event| sink.borrow_mut().push(event));

        game.play_move(Move::Place(0)).unwrap();
        game.reset().unwrap();
        game.start().unwrap();

        assert_eq!(game.move_count(), 0);
        assert_eq!(
            *seen.borrow(),
            vec![
                GameEvent::BoardChanged,
                GameEvent::BoardChanged,
                GameEvent::PhaseChanged,
                GameEvent::PhaseChanged,
            ]
        );
    }
}
