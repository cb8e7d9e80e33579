// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move generation interface for non-human players

use crate::{board::Board, Move};

/// Source of moves for the engine side of a [`crate::Game`]
pub trait MoveGenerator {
    /// Choose a move for the player to move on `board`
    fn generate_move(&mut self, board: &Board) -> Move;
}

/// Plays the lowest-indexed legal point, passing when none is left
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMove;

impl MoveGenerator for FirstLegalMove {
    fn generate_move(&mut self, board: &Board) -> Move {
        board
            .legal_points()
            .first()
            .map_or(Move::Pass, |&point| Move::Place(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_legal_move_on_empty_board() {
        let board = Board::new(9).unwrap();
        assert_eq!(FirstLegalMove.generate_move(&board), Move::Place(0));
    }

    #[test]
    fn test_first_legal_move_skips_occupied() {
        let mut board = Board::new(9).unwrap();
        board.play_move(Move::Place(0)).unwrap();
        assert_eq!(FirstLegalMove.generate_move(&board), Move::Place(1));
    }

    #[test]
    fn test_passes_without_legal_points() {
        // The only point of a 1x1 board is suicide
        let board = Board::new(1).unwrap();
        assert_eq!(FirstLegalMove.generate_move(&board), Move::Pass);
    }
}
