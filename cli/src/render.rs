// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use goban_core::board::column_letter;
use goban_core::{Color, Coord, Game, PointState};

/// Render the board as text, with the territory overlay once scored
pub fn render_board(game: &Game) -> String {
    let size = game.size();
    let mut output = String::new();

    let labels = column_labels(size);
    output.push_str(&labels);

    for row in 0..size {
        let number = size - row;
        output.push_str(&format!("{:2} ", number));

        for col in 0..size {
            let point = (row as usize) * (size as usize) + (col as usize);
            let symbol = match game.point_state(point) {
                Ok(PointState::Stone(Color::Black)) => "●",
                Ok(PointState::Stone(Color::White)) => "○",
                Ok(PointState::Territory(Color::Black)) => "b",
                Ok(PointState::Territory(Color::White)) => "w",
                _ if is_star_point(Coord::new(col, row), size) => "*",
                _ => "+",
            };
            output.push_str(&format!(" {}", symbol));
        }

        output.push_str(&format!(" {}", number));
        output.push('\n');
    }

    output.push_str(&labels);
    output
}

fn column_labels(size: u8) -> String {
    let mut labels = String::from("   ");
    for col in 0..size {
        labels.push(' ');
        labels.push(column_letter(col).unwrap_or('?'));
    }
    labels.push('\n');
    labels
}

/// Check if a coordinate is a star point on the board
fn is_star_point(coord: Coord, board_size: u8) -> bool {
    let (x, y) = (coord.x, coord.y);

    match board_size {
        9 => matches!((x, y), (2, 2) | (2, 6) | (4, 4) | (6, 2) | (6, 6)),
        13 => matches!((x, y), (3, 3) | (3, 9) | (6, 6) | (9, 3) | (9, 9)),
        19 => {
            let lines = [3, 9, 15];
            lines.contains(&x) && lines.contains(&y)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goban_core::{GameConfig, Move};

    fn started(size: u8) -> Game {
        let mut game = Game::new(GameConfig::new(size)).unwrap();
        game.start().unwrap();
        game
    }

    #[test]
    fn test_render_empty_9x9_board() {
        let output = render_board(&started(9));

        // Column labels skip I
        assert!(output.contains("A B C D E F G H J"));

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 11); // 2 label rows + 9 board rows
        assert!(lines[1].starts_with(" 9 "));
        assert!(lines[9].starts_with(" 1 "));
        assert_eq!(lines[5], " 5  + + + + * + + + + 5");
    }

    #[test]
    fn test_render_board_with_stones() {
        let mut game = started(9);
        game.play_move(Move::Place(0)).unwrap(); // Black at A9
        game.play_move(Move::Place(80)).unwrap(); // White at J1

        let output = render_board(&game);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].starts_with(" 9  ●"));
        assert!(lines[9].ends_with("○ 1"));
    }

    #[test]
    fn test_render_territory_after_finish() {
        let mut game = started(5);
        game.play_move(Move::Place(12)).unwrap();
        game.play_move(Move::Pass).unwrap();
        game.play_move(Move::Pass).unwrap();

        let output = render_board(&game);
        assert!(output.contains("●"));
        assert_eq!(output.matches('b').count(), 24);
    }

    #[test]
    fn test_star_points() {
        assert!(is_star_point(Coord::new(4, 4), 9));
        assert!(is_star_point(Coord::new(2, 2), 9));
        assert!(!is_star_point(Coord::new(0, 0), 9));
        assert!(is_star_point(Coord::new(9, 9), 19));
        assert!(is_star_point(Coord::new(3, 15), 19));
        assert!(!is_star_point(Coord::new(0, 0), 19));
        assert!(!is_star_point(Coord::new(2, 2), 7));
    }
}
