//! Perft (performance test) for move generator validation.
//!
//! Perft counts the turns reachable at a given depth, rotating through the
//! seated corners one turn per ply. A jump counts once per final landing,
//! however many hops it takes.

use super::player_moves;
use crate::Board;
use sternhalma_core::Corner;

/// Counts the leaf turns at the given depth.
///
/// `seats` lists the corners in turn order; `seats[0]` moves first.
pub fn perft(board: &Board, seats: &[Corner], depth: u32) -> u64 {
    if depth == 0 || seats.is_empty() {
        return 1;
    }

    let moves = player_moves(board, seats[0]);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut rotated = seats.to_vec();
    rotated.rotate_left(1);

    let mut nodes = 0u64;
    for m in &moves {
        let next = board.with_move(m);
        nodes += perft(&next, &rotated, depth - 1);
    }
    nodes
}

/// Perft with divide: node count below each first move, sorted by move text.
pub fn perft_divide(board: &Board, seats: &[Corner], depth: u32) -> Vec<(String, u64)> {
    if seats.is_empty() {
        return Vec::new();
    }
    let mut rotated = seats.to_vec();
    rotated.rotate_left(1);

    let mut results: Vec<(String, u64)> = player_moves(board, seats[0])
        .iter()
        .map(|m| {
            let nodes = if depth > 1 {
                perft(&board.with_move(m), &rotated, depth - 1)
            } else {
                1
            };
            (m.to_string(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use sternhalma_core::PlayerCount;

    #[test]
    fn perft_two_players() {
        let board = Board::starting(PlayerCount::TWO);
        let seats = PlayerCount::TWO.corners();
        assert_eq!(perft(&board, seats, 0), 1);
        assert_eq!(perft(&board, seats, 1), 14);
        assert_eq!(perft(&board, seats, 2), 196);
    }

    #[test]
    fn perft_six_players() {
        // NorthWest sits next to North's exits, so some opening moves open a
        // jump for it and one blocks a step.
        let board = Board::starting(PlayerCount::SIX);
        let seats = PlayerCount::SIX.corners();
        assert_eq!(perft(&board, seats, 1), 14);
        assert_eq!(perft(&board, seats, 2), 199);
    }

    #[test]
    fn divide_sums_to_perft() {
        let board = Board::starting(PlayerCount::THREE);
        let seats = PlayerCount::THREE.corners();
        let divided = perft_divide(&board, seats, 2);
        assert_eq!(divided.len(), 14);
        let total: u64 = divided.iter().map(|(_, n)| n).sum();
        assert_eq!(total, perft(&board, seats, 2));
    }
}
