// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation, position history and move legality

use crate::scoring::{self, AreaScore};
use crate::{Color, Coord, GameError, Move};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Largest supported board; one column per notation letter
pub const MAX_BOARD_SIZE: u8 = 25;

/// Column letters used in Go notation ('I' is skipped)
const COLUMN_LETTERS: &[u8; 25] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// Notation letter for a column index
pub fn column_letter(col: u8) -> Option<char> {
    COLUMN_LETTERS.get(col as usize).map(|&b| b as char)
}

/// Content digest of a [`Position`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey([u8; 32]);

/// A full snapshot of the board: one optional stone per point
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    size: u8,
    points: Vec<Option<Color>>,
}

/// Unchecked wire form of a [`Position`]
#[derive(Deserialize)]
struct RawPosition {
    size: u8,
    points: Vec<Option<Color>>,
}

impl TryFrom<RawPosition> for Position {
    type Error = GameError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        if raw.size == 0 || raw.size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidBoardSize(raw.size));
        }
        let cells = (raw.size as usize) * (raw.size as usize);
        if raw.points.len() != cells {
            return Err(GameError::InvalidPoint {
                point: raw.points.len(),
                size: raw.size,
            });
        }
        Ok(Self {
            size: raw.size,
            points: raw.points,
        })
    }
}

impl Position {
    /// The empty position for a board of the given size
    pub fn empty(size: u8) -> Self {
        let cells = (size as usize) * (size as usize);
        Self {
            size,
            points: vec![None; cells],
        }
    }

    /// Side length of the board this position belongs to
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Stone at the given point, `None` when empty
    pub fn color_at(&self, point: usize) -> Result<Option<Color>, GameError> {
        self.points
            .get(point)
            .copied()
            .ok_or(GameError::InvalidPoint {
                point,
                size: self.size,
            })
    }

    /// All points in row-major order
    pub fn stones(&self) -> &[Option<Color>] {
        &self.points
    }

    /// Number of stones of the given color
    pub fn count(&self, color: Color) -> usize {
        self.points.iter().filter(|p| **p == Some(color)).count()
    }

    /// Blake3 digest of the position contents
    pub fn key(&self) -> PositionKey {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&[self.size]);
        for point in &self.points {
            let tag = match point {
                None => 0u8,
                Some(Color::Black) => 1,
                Some(Color::White) => 2,
            };
            hasher.update(&[tag]);
        }
        PositionKey(*hasher.finalize().as_bytes())
    }

    pub(crate) fn get(&self, point: usize) -> Option<Color> {
        self.points[point]
    }

    pub(crate) fn set(&mut self, point: usize, stone: Option<Color>) {
        self.points[point] = stone;
    }
}

/// One entry of the position history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Board after the move
    pub position: Position,
    /// The move that produced it; `None` for the initial empty board
    pub last_move: Option<Move>,
    key: PositionKey,
}

impl HistoryEntry {
    fn new(position: Position, last_move: Option<Move>) -> Self {
        let key = position.key();
        Self {
            position,
            last_move,
            key,
        }
    }

    /// Digest of `position`
    pub fn key(&self) -> PositionKey {
        self.key
    }
}

/// Legality answers for a single position, identified by its digest and the
/// history length at which it was on top.
#[derive(Debug, Clone, Default)]
struct LegalityCache {
    scope: Option<(PositionKey, usize)>,
    entries: HashMap<usize, bool>,
}

impl LegalityCache {
    fn lookup(&self, scope: (PositionKey, usize), point: usize) -> Option<bool> {
        if self.scope == Some(scope) {
            self.entries.get(&point).copied()
        } else {
            None
        }
    }

    fn store(&mut self, scope: (PositionKey, usize), point: usize, legal: bool) {
        if self.scope != Some(scope) {
            self.entries.clear();
            self.scope = Some(scope);
        }
        self.entries.insert(point, legal);
    }

    fn clear(&mut self) {
        self.scope = None;
        self.entries.clear();
    }
}

/// Outcome of resolving a placement on a copy of a position
struct Placement {
    position: Position,
    captured: usize,
    self_captured: bool,
}

/// Go board with its complete position history
#[derive(Debug, Clone)]
pub struct Board {
    /// Side length of the board
    size: u8,
    /// Orthogonal neighbors of every point, computed once
    neighbors: Vec<Vec<usize>>,
    /// Append-only history; the last entry is the current position
    history: Vec<HistoryEntry>,
    /// History indices of every position, grouped by digest
    seen: HashMap<PositionKey, Vec<usize>>,
    legality: RefCell<LegalityCache>,
}

impl Board {
    /// Create a new empty board with the specified size
    pub fn new(size: u8) -> Result<Self, GameError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidBoardSize(size));
        }

        let start = HistoryEntry::new(Position::empty(size), None);
        let seen = HashMap::from([(start.key(), vec![0])]);

        Ok(Self {
            size,
            neighbors: Self::build_neighbors(size),
            history: vec![start],
            seen,
            legality: RefCell::new(LegalityCache::default()),
        })
    }

    fn build_neighbors(size: u8) -> Vec<Vec<usize>> {
        let n = size as usize;
        (0..n * n)
            .map(|point| {
                let (row, col) = (point / n, point % n);
                let mut result = Vec::with_capacity(4);

                // Up
                if row > 0 {
                    result.push(point - n);
                }

                // Down
                if row + 1 < n {
                    result.push(point + n);
                }

                // Left
                if col > 0 {
                    result.push(point - 1);
                }

                // Right
                if col + 1 < n {
                    result.push(point + 1);
                }

                result
            })
            .collect()
    }

    /// Get the size of the board
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Number of points on the board
    pub fn point_count(&self) -> usize {
        (self.size as usize) * (self.size as usize)
    }

    fn ensure_on_board(&self, point: usize) -> Result<(), GameError> {
        if point < self.point_count() {
            Ok(())
        } else {
            Err(GameError::InvalidPoint {
                point,
                size: self.size,
            })
        }
    }

    /// Orthogonally adjacent points (two to four of them)
    pub fn neighbors(&self, point: usize) -> Result<&[usize], GameError> {
        self.ensure_on_board(point)?;
        Ok(&self.neighbors[point])
    }

    pub(crate) fn adjacent(&self, point: usize) -> &[usize] {
        &self.neighbors[point]
    }

    /// Number of moves played so far, passes included
    pub fn move_count(&self) -> usize {
        self.history.len() - 1
    }

    /// Player to move: Black after an even number of moves
    pub fn current_player(&self) -> Color {
        if self.move_count() % 2 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    fn current(&self) -> &HistoryEntry {
        // history starts with the empty position and never shrinks
        &self.history[self.history.len() - 1]
    }

    /// The position on top of the history
    pub fn position(&self) -> &Position {
        &self.current().position
    }

    /// The move that produced the current position
    pub fn last_move(&self) -> Option<Move> {
        self.current().last_move
    }

    /// The whole history, oldest first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Stone at the given point of the current position
    pub fn color_at(&self, point: usize) -> Result<Option<Color>, GameError> {
        self.position().color_at(point)
    }

    /// Convert a point index to a coordinate
    pub fn point_to_coord(&self, point: usize) -> Result<Coord, GameError> {
        self.ensure_on_board(point)?;
        let n = self.size as usize;
        Ok(Coord::new((point % n) as u8, (point / n) as u8))
    }

    /// Convert a coordinate to a point index
    pub fn coord_to_point(&self, coord: Coord) -> Result<usize, GameError> {
        if !coord.is_valid(self.size) {
            return Err(GameError::InvalidNotation(format!(
                "({}, {}) is off a {}x{} board",
                coord.x, coord.y, self.size, self.size
            )));
        }
        Ok((coord.y as usize) * (self.size as usize) + (coord.x as usize))
    }

    /// Go notation for a point, e.g. `A9` for the top-left of a 9x9 board
    pub fn point_to_notation(&self, point: usize) -> Result<String, GameError> {
        let coord = self.point_to_coord(point)?;
        let letter = column_letter(coord.x).ok_or(GameError::InvalidPoint {
            point,
            size: self.size,
        })?;
        Ok(format!("{}{}", letter, self.size - coord.y))
    }

    /// Parse Go notation such as `d4` or `J1` into a point index
    pub fn notation_to_point(&self, notation: &str) -> Result<usize, GameError> {
        let invalid = || GameError::InvalidNotation(notation.to_string());
        let text = notation.trim().to_ascii_uppercase();
        let mut chars = text.chars();

        let letter = chars.next().ok_or_else(invalid)?;
        let col = COLUMN_LETTERS
            .iter()
            .position(|&b| b as char == letter)
            .ok_or_else(invalid)?;

        let digits = chars.as_str();
        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let row_number: u8 = digits.parse().map_err(|_| invalid())?;
        if row_number == 0 || row_number > self.size || col >= self.size as usize {
            return Err(invalid());
        }

        self.coord_to_point(Coord::new(col as u8, self.size - row_number))
    }

    /// Whether the player to move may place a stone on `point`.
    ///
    /// A placement is illegal when the point is occupied, when the placed
    /// stone would be removed by its own capture, or when the resulting
    /// position already occurred anywhere in the history (positional superko).
    pub fn is_move_legal(&self, point: usize) -> Result<bool, GameError> {
        self.ensure_on_board(point)?;

        let scope = (self.current().key(), self.history.len());
        if let Some(legal) = self.legality.borrow().lookup(scope, point) {
            return Ok(legal);
        }

        let legal = self.evaluate_legality(point);
        self.legality.borrow_mut().store(scope, point, legal);
        Ok(legal)
    }

    /// Like [`Board::is_move_legal`], with passes always legal
    pub fn is_legal(&self, mv: Move) -> Result<bool, GameError> {
        match mv {
            Move::Pass => Ok(true),
            Move::Place(point) => self.is_move_legal(point),
        }
    }

    /// Every point the player to move may legally play, in index order
    pub fn legal_points(&self) -> Vec<usize> {
        (0..self.point_count())
            .filter(|&point| self.is_move_legal(point).unwrap_or(false))
            .collect()
    }

    fn evaluate_legality(&self, point: usize) -> bool {
        let current = self.position();
        if current.get(point).is_some() {
            return false;
        }

        let color = self.current_player();
        let placement = self.resolve_placement(current, point, color);

        if placement.self_captured {
            tracing::debug!(point, ?color, "Suicide rejected");
            return false;
        }

        if self.has_occurred(&placement.position) {
            tracing::debug!(point, ?color, "Superko violation");
            return false;
        }

        true
    }

    /// Append the result of `mv` to the history.
    ///
    /// Legality is not checked here; callers gate placements behind
    /// [`Board::is_move_legal`].
    pub fn play_move(&mut self, mv: Move) -> Result<(), GameError> {
        let position = match mv {
            Move::Pass => self.position().clone(),
            Move::Place(point) => {
                self.ensure_on_board(point)?;
                let color = self.current_player();
                let placement = self.resolve_placement(self.position(), point, color);
                if placement.captured > 0 {
                    tracing::debug!(
                        point,
                        ?color,
                        captured = placement.captured,
                        "Stones captured"
                    );
                }
                placement.position
            }
        };

        self.legality.get_mut().clear();
        let entry = HistoryEntry::new(position, Some(mv));
        self.seen
            .entry(entry.key())
            .or_default()
            .push(self.history.len());
        self.history.push(entry);
        Ok(())
    }

    /// Whether `position` appears anywhere in the history.
    ///
    /// A digest hit is confirmed against the stored position.
    fn has_occurred(&self, position: &Position) -> bool {
        self.seen.get(&position.key()).is_some_and(|indices| {
            indices
                .iter()
                .any(|&i| self.history[i].position == *position)
        })
    }

    fn resolve_placement(&self, from: &Position, point: usize, color: Color) -> Placement {
        let opponent = color.opposite();
        let mut position = from.clone();
        position.set(point, Some(color));

        let mut captured = 0;
        for &n in self.adjacent(point) {
            if position.get(n) == Some(opponent) {
                captured += self.remove_if_dead(&mut position, n);
            }
        }

        let self_captured = self.remove_if_dead(&mut position, point) > 0;

        Placement {
            position,
            captured,
            self_captured,
        }
    }

    /// Remove the group containing `seed` if it has no liberties.
    ///
    /// Returns the number of stones removed; zero when the group is alive or
    /// `seed` is empty.
    pub(crate) fn remove_if_dead(&self, position: &mut Position, seed: usize) -> usize {
        let color = match position.get(seed) {
            Some(color) => color,
            None => return 0,
        };

        let mut stack = vec![seed];
        let mut group = HashSet::from([seed]);

        while let Some(current) = stack.pop() {
            for &n in self.adjacent(current) {
                match position.get(n) {
                    None => return 0,
                    Some(c) if c == color && group.insert(n) => stack.push(n),
                    _ => {}
                }
            }
        }

        for &p in &group {
            position.set(p, None);
        }
        group.len()
    }

    /// Area score of the current position
    pub fn score(&self) -> AreaScore {
        scoring::tally(self, self.position())
    }
}
