use super::*;
use crate::board::make_move;
use crate::variant::VariantConfig;

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

fn red() -> Piece {
    Piece::man(Color::Red)
}
fn black() -> Piece {
    Piece::man(Color::Black)
}

#[test]
fn test_initial_red_edge_man_has_single_step() {
    let config = VariantConfig::american();
    let board = Board::initial(&config);
    let moves = get_valid_moves(&board, sq(5, 0), Color::Red, &config);
    assert_eq!(moves, vec![Move::step(sq(5, 0), sq(4, 1))]);
    assert!(moves.iter().all(|m| !m.is_capture()));
}

#[test]
fn test_empty_square_and_wrong_color_yield_nothing() {
    let config = VariantConfig::american();
    let board = Board::initial(&config);
    assert!(get_valid_moves(&board, sq(4, 1), Color::Red, &config).is_empty());
    assert!(get_valid_moves(&board, sq(2, 1), Color::Red, &config).is_empty());
    assert!(piece_moves(&board, sq(4, 1), &config).is_empty());
}

#[test]
fn test_multi_jump_is_one_move() {
    let config = VariantConfig::american();
    let board = Board::from_pieces(
        8,
        &[(sq(5, 0), red()), (sq(4, 1), black()), (sq(2, 3), black())],
    )
    .unwrap();

    let moves = get_valid_moves(&board, sq(5, 0), Color::Red, &config);
    assert_eq!(moves.len(), 1);
    let mv = &moves[0];
    assert_eq!(mv.captures, vec![sq(4, 1), sq(2, 3)]);
    assert_eq!(mv.path, vec![sq(5, 0), sq(3, 2), sq(1, 4)]);
    assert_eq!(mv.from, sq(5, 0));
    assert_eq!(mv.to, sq(1, 4));
}

#[test]
fn test_american_man_cannot_capture_backward() {
    let config = VariantConfig::american();
    let board = Board::from_pieces(8, &[(sq(4, 3), red()), (sq(5, 4), black())]).unwrap();
    let moves = piece_moves(&board, sq(4, 3), &config);
    assert_eq!(moves.len(), 2);
    assert!(moves.iter().all(|m| !m.is_capture()));
}

#[test]
fn test_international_man_captures_backward() {
    let config = VariantConfig::international();
    let board = Board::from_pieces(10, &[(sq(4, 3), red()), (sq(5, 4), black())]).unwrap();

    // Raw generation lists both the forward steps and the capture
    assert_eq!(piece_moves(&board, sq(4, 3), &config).len(), 3);

    let moves = get_valid_moves(&board, sq(4, 3), Color::Red, &config);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].captures, vec![sq(5, 4)]);
    assert_eq!(moves[0].to, sq(6, 5));
}

#[test]
fn test_plain_king_steps_in_four_directions() {
    let config = VariantConfig::american();
    let board = Board::from_pieces(
        8,
        &[(sq(4, 3), Piece::king(Color::Red)), (sq(0, 1), black())],
    )
    .unwrap();
    let moves = get_valid_moves(&board, sq(4, 3), Color::Red, &config);
    let mut targets: Vec<Square> = moves.iter().map(|m| m.to).collect();
    targets.sort();
    assert_eq!(targets, vec![sq(3, 2), sq(3, 4), sq(5, 2), sq(5, 4)]);
}

#[test]
fn test_flying_king_slides() {
    let config = VariantConfig::international();
    let board = Board::from_pieces(
        10,
        &[(sq(9, 0), Piece::king(Color::Red)), (sq(0, 1), black())],
    )
    .unwrap();
    let moves = get_valid_moves(&board, sq(9, 0), Color::Red, &config);
    assert_eq!(moves.len(), 9);
    assert!(moves.iter().any(|m| m.to == sq(0, 9)));
}

#[test]
fn test_flying_king_capture_lists_every_landing_square() {
    let config = VariantConfig::international();
    let board = Board::from_pieces(
        10,
        &[(sq(9, 0), Piece::king(Color::Red)), (sq(6, 3), black())],
    )
    .unwrap();
    let moves = get_valid_moves(&board, sq(9, 0), Color::Red, &config);
    assert_eq!(moves.len(), 6);
    for mv in &moves {
        assert_eq!(mv.captures, vec![sq(6, 3)]);
    }
    let mut landings: Vec<Square> = moves.iter().map(|m| m.to).collect();
    landings.sort();
    assert_eq!(
        landings,
        vec![sq(0, 9), sq(1, 8), sq(2, 7), sq(3, 6), sq(4, 5), sq(5, 4)]
    );
}

#[test]
fn test_flying_king_cannot_jump_two_in_a_row() {
    let config = VariantConfig::international();
    let board = Board::from_pieces(
        10,
        &[
            (sq(9, 0), Piece::king(Color::Red)),
            (sq(7, 2), black()),
            (sq(6, 3), black()),
        ],
    )
    .unwrap();
    let moves = piece_moves(&board, sq(9, 0), &config);
    assert!(moves.iter().all(|m| !m.is_capture()));
    assert_eq!(moves, vec![Move::step(sq(9, 0), sq(8, 1))]);
}

#[test]
fn test_king_chain_returns_to_origin() {
    let config = VariantConfig::american();
    let board = Board::from_pieces(
        8,
        &[
            (sq(6, 3), Piece::king(Color::Red)),
            (sq(5, 2), black()),
            (sq(3, 2), black()),
            (sq(3, 4), black()),
            (sq(5, 4), black()),
        ],
    )
    .unwrap();
    let moves = get_valid_moves(&board, sq(6, 3), Color::Red, &config);
    assert_eq!(moves.len(), 2);
    for mv in &moves {
        assert_eq!(mv.capture_count(), 4);
        assert_eq!(mv.to, sq(6, 3));
        assert_eq!(mv.path.len(), 5);
        let after = make_move(&board, mv, &config).unwrap();
        assert_eq!(after.count(Color::Black), 0);
        assert_eq!(after.piece_at(sq(6, 3)), Some(Piece::king(Color::Red)));
    }
}

#[test]
fn test_chain_never_revisits_captured_squares() {
    let config = VariantConfig::international();
    let board = Board::from_pieces(
        10,
        &[
            (sq(9, 0), Piece::king(Color::Red)),
            (sq(7, 2), black()),
            (sq(4, 3), black()),
            (sq(3, 6), black()),
            (sq(2, 3), black()),
            (sq(6, 7), black()),
        ],
    )
    .unwrap();
    let moves = get_valid_moves(&board, sq(9, 0), Color::Red, &config);
    assert!(!moves.is_empty());
    for mv in &moves {
        let mut caps = mv.captures.clone();
        caps.sort();
        caps.dedup();
        assert_eq!(caps.len(), mv.captures.len(), "piece captured twice in {mv}");
        for landing in &mv.path[1..] {
            assert!(!mv.captures.contains(landing), "landed on captured square in {mv}");
        }
        let after = make_move(&board, mv, &config).unwrap();
        assert_eq!(after.piece_count(), board.piece_count() - mv.capture_count());
    }
}

#[test]
fn test_man_passing_promotion_row_stays_man() {
    let config = VariantConfig::international();
    let board = Board::from_pieces(
        10,
        &[(sq(2, 1), red()), (sq(1, 2), black()), (sq(1, 4), black())],
    )
    .unwrap();
    let moves = get_valid_moves(&board, sq(2, 1), Color::Red, &config);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].path, vec![sq(2, 1), sq(0, 3), sq(2, 5)]);

    let after = make_move(&board, &moves[0], &config).unwrap();
    assert_eq!(after.piece_at(sq(2, 5)), Some(red()));
}

#[test]
fn test_capture_ending_on_promotion_row_crowns() {
    let config = VariantConfig::american();
    let board = Board::from_pieces(8, &[(sq(2, 1), red()), (sq(1, 2), black())]).unwrap();
    let moves = get_valid_moves(&board, sq(2, 1), Color::Red, &config);
    assert_eq!(moves.len(), 1);
    let after = make_move(&board, &moves[0], &config).unwrap();
    assert_eq!(after.piece_at(sq(0, 3)), Some(Piece::king(Color::Red)));
}

#[test]
fn test_piece_without_capture_is_frozen_when_another_can_capture() {
    let config = VariantConfig::american();
    let board = Board::from_pieces(
        8,
        &[
            (sq(5, 0), red()),
            (sq(4, 1), black()),
            (sq(6, 5), red()),
        ],
    )
    .unwrap();
    assert!(get_valid_moves(&board, sq(6, 5), Color::Red, &config).is_empty());
    assert_eq!(piece_moves(&board, sq(6, 5), &config).len(), 2);
}

#[test]
fn test_optional_capture_keeps_quiet_moves() {
    let mut config = VariantConfig::american();
    config.mandatory_capture = false;
    let board = Board::from_pieces(
        8,
        &[(sq(5, 2), red()), (sq(4, 1), black()), (sq(6, 5), red())],
    )
    .unwrap();
    let moves = get_valid_moves(&board, sq(5, 2), Color::Red, &config);
    assert_eq!(moves.len(), 2);
    assert_eq!(moves.iter().filter(|m| m.is_capture()).count(), 1);
    assert_eq!(get_valid_moves(&board, sq(6, 5), Color::Red, &config).len(), 2);
}
