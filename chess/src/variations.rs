//! Module for counting the number of variations from a given position
//!
//! Counting every variation to a fixed depth (often called "perft") is the usual way to verify a
//! move generator, since the correct totals for many positions are well known.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

/// Count the number of variations of the given `depth` from the current position of `board`
///
/// The moves are played and taken back on `board`, which is left as it was found.
///
/// ```rust
/// use chess::{Board, variations};
///
/// let mut board = Board::new();
/// assert_eq!(variations::count(&mut board, 3), 8902);
/// assert_eq!(board, Board::new());
/// ```
pub fn count(board: &mut Board, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let moves = board.legal_moves();
    if depth == 1 {
        return moves.len();
    }

    let mut total = 0;
    for mv in moves {
        board.apply_move(mv).expect("INFALLIBLE");
        total += count(board, depth - 1);
        board.undo_move().expect("INFALLIBLE");
    }

    total
}

/// Count the number of variations of the given `depth` below each legal move from `board`
///
/// The counts sum to `count(board, depth)`.
pub fn divide(board: &mut Board, depth: usize) -> Vec<(Move, usize)> {
    if depth < 1 {
        return Vec::new();
    }

    let mut counts = Vec::new();
    for mv in board.legal_moves() {
        board.apply_move(mv).expect("INFALLIBLE");
        counts.push((mv, count(board, depth - 1)));
        board.undo_move().expect("INFALLIBLE");
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_is_one_variation() {
        assert_eq!(count(&mut Board::new(), 0), 1);
        assert!(divide(&mut Board::new(), 0).is_empty());
    }

    #[test]
    fn divide_sums_to_count() {
        let mut board = Board::new();
        let counts = divide(&mut board, 3);

        assert_eq!(counts.len(), 20);
        assert_eq!(counts.iter().map(|&(_, n)| n).sum::<usize>(), 8902);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn mated_positions_have_no_variations() {
        let mut board = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .expect("valid fen");
        assert_eq!(count(&mut board, 1), 0);
        assert_eq!(count(&mut board, 4), 0);
    }
}
