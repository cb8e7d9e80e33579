// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goban Core - Go rules engine
//!
//! This crate provides the game logic behind a Go board:
//! - Board topology and the append-only position history
//! - Move legality with positional superko
//! - Capture resolution
//! - Area scoring with a per-point territory map
//! - A session state machine with synchronous change notifications

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod config;
pub mod engine;
pub mod game;
pub mod scoring;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use board::{Board, HistoryEntry, Position, PositionKey};
pub use config::GameConfig;
pub use engine::{FirstLegalMove, MoveGenerator};
pub use game::{Game, GameResult, Phase};
pub use scoring::{AreaScore, PointState};

/// Player color in a Go game (Black or White)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Black player (moves first)
    Black,
    /// White player
    White,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// Board coordinate: `x` is the column from the left, `y` the row from the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column)
    pub x: u8,
    /// Y coordinate (row)
    pub y: u8,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Check if coordinate is valid for a board of given size
    pub fn is_valid(&self, board_size: u8) -> bool {
        self.x < board_size && self.y < board_size
    }
}

/// A move as recorded in the position history.
///
/// Points are row-major indices into the board, `row * size + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Place a stone on the given point
    Place(usize),
    /// Pass the turn
    Pass,
}

/// Change notifications emitted by a [`Game`].
///
/// Events carry no payload: they mean "re-read the current state".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    /// The position on the board changed
    BoardChanged,
    /// The session moved to another phase
    PhaseChanged,
    /// A final result became available
    ResultChanged,
}

/// Errors that can occur during game play
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The point is outside the board
    #[error("Point {point} is outside a {size}x{size} board")]
    InvalidPoint {
        /// The offending point index
        point: usize,
        /// Side length of the board
        size: u8,
    },

    /// Board sizes must lie in 1..=25
    #[error("Invalid board size {0}")]
    InvalidBoardSize(u8),

    /// A coordinate string could not be parsed
    #[error("Invalid notation: {0}")]
    InvalidNotation(String),

    /// The move is occupied, suicidal, or repeats an earlier position
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    /// The session is not in a phase that allows the operation
    #[error("Operation requires phase {expected:?}, but the game is in {actual:?}")]
    WrongPhase {
        /// Phase the operation needs
        expected: Phase,
        /// Phase the session is in
        actual: Phase,
    },

    /// The game has not finished yet
    #[error("No result available before the game is finished")]
    NoResult,
}
