use super::*;
use crate::difficulty::Difficulty;
use checkers_core::{Piece, Square};

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

fn red() -> Piece {
    Piece::man(Color::Red)
}

fn black() -> Piece {
    Piece::man(Color::Black)
}

fn run_root(board: &Board, difficulty: Difficulty, depth: u8) -> SearchOutcome {
    let config = VariantConfig::american();
    let profile = difficulty.profile();
    let mut tt = TTable::from_capacity(1024);
    let mut history = HistoryTable::new();
    let tc = TimeControl::new(None);
    tc.start();
    let mut searcher = Searcher::new(&config, &profile, Some(&mut tt), &mut history, &tc, None);
    searcher.search_root(board, Color::Red, depth, None)
}

#[test]
fn test_no_legal_moves_gives_no_move() {
    // Red's man is wedged against the edge by a piece it cannot jump
    let blocked = Board::from_pieces(8, &[(sq(1, 0), red()), (sq(0, 1), black())]).unwrap();
    let outcome = run_root(&blocked, Difficulty::Hard, 3);
    assert!(outcome.best_move.is_none());
    assert!(!outcome.stopped);
}

#[test]
fn test_immediate_win_is_scored_as_win() {
    let board = Board::from_pieces(8, &[(sq(5, 0), red()), (sq(4, 1), black())]).unwrap();
    let outcome = run_root(&board, Difficulty::Hard, 3);
    let (mv, score) = outcome.best_move.unwrap();
    assert_eq!(mv.captures, vec![sq(4, 1)]);
    assert_eq!(score, WIN_SCORE - 1);
}

#[test]
fn test_avoids_stepping_into_capture() {
    let board = Board::from_pieces(8, &[(sq(5, 2), red()), (sq(3, 0), black())]).unwrap();
    for difficulty in Difficulty::ALL {
        let outcome = run_root(&board, difficulty, 2);
        let (mv, _) = outcome.best_move.unwrap();
        assert_eq!(mv.to, sq(4, 3), "{difficulty}");
    }
}

#[test]
fn test_capture_extension_sees_recapture() {
    let board = Board::from_pieces(
        8,
        &[
            (sq(5, 2), red()),
            (sq(7, 0), red()),
            (sq(4, 3), black()),
            (sq(2, 5), black()),
            (sq(1, 6), black()),
        ],
    )
    .unwrap();
    let outcome = run_root(&board, Difficulty::Easy, 1);
    let (mv, score) = outcome.best_move.unwrap();
    assert_eq!(mv.captures, vec![sq(4, 3)]);
    assert_eq!(score, -100);
}

#[test]
fn test_root_search_is_deterministic() {
    let config = VariantConfig::american();
    let board = Board::initial(&config);
    let first = run_root(&board, Difficulty::Hard, 4).best_move.unwrap();
    let second = run_root(&board, Difficulty::Hard, 4).best_move.unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_stop_flag_aborts_search() {
    let config = VariantConfig::american();
    let board = Board::initial(&config);
    let profile = Difficulty::Hard.profile();
    let mut history = HistoryTable::new();
    let tc = TimeControl::new(None);
    tc.stop();
    let mut searcher = Searcher::new(&config, &profile, None, &mut history, &tc, None);
    let outcome = searcher.search_root(&board, Color::Red, 5, None);
    assert!(outcome.stopped);
    assert!(outcome.best_move.is_none());
}

#[test]
fn test_uninterruptible_pass_ignores_stop_flag() {
    let config = VariantConfig::american();
    let board = Board::initial(&config);
    let profile = Difficulty::Hard.profile();
    let mut history = HistoryTable::new();
    let tc = TimeControl::new(None);
    tc.stop();
    let mut searcher = Searcher::new(&config, &profile, None, &mut history, &tc, None);
    searcher.interruptible = false;
    let outcome = searcher.search_root(&board, Color::Red, 1, None);
    assert!(!outcome.stopped);
    assert!(outcome.best_move.is_some());
}

#[test]
fn test_score_root_moves_covers_every_move() {
    let config = VariantConfig::american();
    let board = Board::from_pieces(8, &[(sq(5, 2), red()), (sq(3, 0), black())]).unwrap();
    let profile = Difficulty::Expert.profile();
    let mut history = HistoryTable::new();
    let tc = TimeControl::new(None);
    let mut searcher = Searcher::new(&config, &profile, None, &mut history, &tc, None);
    let scored = searcher.score_root_moves(&board, Color::Red, 2);
    assert_eq!(scored.len(), 2);
    assert_eq!(scored[0].0.to, sq(4, 1));
    assert!(scored[0].1 < -WIN_BOUND);
    assert!(scored[1].1 > -WIN_BOUND);
}
