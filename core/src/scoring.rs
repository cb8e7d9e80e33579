// SPDX-License-Identifier: MIT OR Apache-2.0

//! Area scoring: stones plus surrounded empty regions

use crate::board::{Board, Position};
use crate::{Color, GameError};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Classification of a single point in a scored position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointState {
    /// Empty and owned by nobody (dame, or an empty point of a live board)
    Neutral,
    /// Occupied by a stone
    Stone(Color),
    /// Empty and enclosed by a single color
    Territory(Color),
}

impl PointState {
    /// The color credited with this point, if any
    pub fn owner(&self) -> Option<Color> {
        match self {
            PointState::Neutral => None,
            PointState::Stone(c) | PointState::Territory(c) => Some(*c),
        }
    }
}

impl From<Option<Color>> for PointState {
    fn from(stone: Option<Color>) -> Self {
        stone.map_or(PointState::Neutral, PointState::Stone)
    }
}

/// Result of scoring a position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaScore {
    /// Black area minus White area; positive favors Black
    pub score: i32,
    /// Per-point classification, row-major
    pub points: Vec<PointState>,
    pub black_stones: u16,
    pub white_stones: u16,
    pub black_territory: u16,
    pub white_territory: u16,
}

impl AreaScore {
    /// The leading color, `None` for a tie
    pub fn winner(&self) -> Option<Color> {
        match self.score {
            s if s > 0 => Some(Color::Black),
            s if s < 0 => Some(Color::White),
            _ => None,
        }
    }

    /// Absolute point difference
    pub fn margin(&self) -> u32 {
        self.score.unsigned_abs()
    }

    /// Total area credited to a color
    pub fn area(&self, color: Color) -> u16 {
        match color {
            Color::Black => self.black_stones + self.black_territory,
            Color::White => self.white_stones + self.white_territory,
        }
    }
}

impl fmt::Display for AreaScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(Color::Black) => write!(f, "B+{}", self.margin()),
            Some(Color::White) => write!(f, "W+{}", self.margin()),
            None => write!(f, "Jigo"),
        }
    }
}

/// A maximal connected set of empty points and the colors bordering it
struct Region {
    points: Vec<usize>,
    reaches_black: bool,
    reaches_white: bool,
}

impl Region {
    fn owner(&self) -> Option<Color> {
        match (self.reaches_black, self.reaches_white) {
            (true, false) => Some(Color::Black),
            (false, true) => Some(Color::White),
            _ => None,
        }
    }
}

/// Score an arbitrary position using the topology of `board`
pub fn score_position(board: &Board, position: &Position) -> Result<AreaScore, GameError> {
    if position.size() != board.size() {
        return Err(GameError::InvalidBoardSize(position.size()));
    }
    if position.len() != board.point_count() {
        return Err(GameError::InvalidPoint {
            point: position.len(),
            size: board.size(),
        });
    }
    Ok(tally(board, position))
}

pub(crate) fn tally(board: &Board, position: &Position) -> AreaScore {
    let mut points: Vec<PointState> = position
        .stones()
        .iter()
        .map(|&stone| PointState::from(stone))
        .collect();
    let mut classified = vec![false; position.len()];

    for (start, stone) in position.stones().iter().enumerate() {
        if stone.is_some() || classified[start] {
            continue;
        }

        let region = empty_region(board, position, start, &mut classified);
        let state = region
            .owner()
            .map_or(PointState::Neutral, PointState::Territory);
        for &p in &region.points {
            points[p] = state;
        }
    }

    let mut result = AreaScore {
        score: 0,
        points,
        black_stones: 0,
        white_stones: 0,
        black_territory: 0,
        white_territory: 0,
    };

    for state in &result.points {
        match state {
            PointState::Stone(Color::Black) => result.black_stones += 1,
            PointState::Stone(Color::White) => result.white_stones += 1,
            PointState::Territory(Color::Black) => result.black_territory += 1,
            PointState::Territory(Color::White) => result.white_territory += 1,
            PointState::Neutral => {}
        }
    }
    result.score = i32::from(result.area(Color::Black)) - i32::from(result.area(Color::White));
    result
}

/// BFS over empty points from `start`, marking each visited point classified
fn empty_region(
    board: &Board,
    position: &Position,
    start: usize,
    classified: &mut [bool],
) -> Region {
    let mut queue = VecDeque::from([start]);
    let mut region = Region {
        points: vec![start],
        reaches_black: false,
        reaches_white: false,
    };
    classified[start] = true;

    while let Some(p) = queue.pop_front() {
        for &n in board.adjacent(p) {
            match position.get(n) {
                Some(Color::Black) => region.reaches_black = true,
                Some(Color::White) => region.reaches_white = true,
                None if !classified[n] => {
                    classified[n] = true;
                    region.points.push(n);
                    queue.push_back(n);
                }
                None => {}
            }
        }
    }
    region
}
