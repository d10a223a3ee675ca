//! Properties that must hold along any game, checked over deterministic
//! playouts in every built-in variant.

use checkers_core::{
    check_winner_to_move, get_must_capture_positions, get_valid_moves, legal_moves, make_move,
    Board, Color, GameState, Move, Piece, Square, Variant, VariantConfig,
};

const MAX_PLIES: usize = 160;

/// Board turned half a circle with the colours swapped.
fn mirrored(board: &Board) -> Board {
    let n = board.size();
    let pieces: Vec<(Square, Piece)> = board
        .occupied()
        .map(|(sq, pc)| {
            (
                Square::new(n - 1 - sq.row, n - 1 - sq.col),
                Piece {
                    color: pc.color.other(),
                    rank: pc.rank,
                },
            )
        })
        .collect();
    Board::from_pieces(n, &pieces).unwrap()
}

/// Plays a game picking moves by a fixed index pattern, handing every
/// position and the chosen move to `check`.
fn playout(config: &VariantConfig, seed: usize, mut check: impl FnMut(&GameState, &[Move], &Move)) -> GameState {
    let mut state = GameState::new(config);
    for ply in 0..MAX_PLIES {
        if state.is_over() {
            break;
        }
        let moves = state.legal_moves(config);
        assert!(!moves.is_empty(), "undecided game without moves");
        let mv = moves[(ply * 7 + seed) % moves.len()].clone();
        check(&state, &moves, &mv);
        state.play(&mv, config).unwrap();
    }
    state
}

#[test]
fn test_mirrored_positions_have_matching_moves() {
    for variant in Variant::ALL {
        let config = variant.config();
        for seed in 0..3 {
            playout(&config, seed, |state, moves, _| {
                let mirror = mirrored(&state.board);
                let mirror_moves = legal_moves(&mirror, state.to_move.other(), &config);
                assert_eq!(moves.len(), mirror_moves.len(), "{}", config.name);
            });
        }
    }
}

#[test]
fn test_generated_moves_always_apply() {
    for variant in Variant::ALL {
        let config = variant.config();
        for seed in 0..4 {
            playout(&config, seed, |state, moves, _| {
                for mv in moves {
                    let piece = state.board.piece_at(mv.from).unwrap();
                    assert_eq!(piece.color, state.to_move);
                    let after = make_move(&state.board, mv, &config).unwrap();
                    assert_eq!(
                        after.piece_count(),
                        state.board.piece_count() - mv.capture_count(),
                        "captures must remove exactly the listed pieces"
                    );
                    assert_eq!(after.count(state.to_move), state.board.count(state.to_move));
                    for &cap in &mv.captures {
                        assert!(after.is_empty_at(cap));
                    }
                }
            });
        }
    }
}

#[test]
fn test_mandatory_capture_holds() {
    for variant in Variant::ALL {
        let config = variant.config();
        for seed in 0..4 {
            playout(&config, seed, |state, moves, _| {
                let forced = get_must_capture_positions(&state.board, state.to_move, &config);
                let any_capture = moves.iter().any(Move::is_capture);
                assert_eq!(!forced.is_empty(), any_capture);
                if any_capture {
                    assert!(moves.iter().all(Move::is_capture));
                    for mv in moves {
                        assert!(forced.contains(&mv.from));
                    }
                    if config.maximum_capture {
                        let most = moves.iter().map(Move::capture_count).max().unwrap();
                        assert!(moves.iter().all(|m| m.capture_count() == most));
                    }
                }
                let mut per_piece: Vec<Move> = state
                    .board
                    .pieces(state.to_move)
                    .into_iter()
                    .flat_map(|sq| get_valid_moves(&state.board, sq, state.to_move, &config))
                    .collect();
                per_piece.sort_by_key(|m| (m.from, m.to, m.path.clone()));
                let mut all = moves.to_vec();
                all.sort_by_key(|m| (m.from, m.to, m.path.clone()));
                assert_eq!(per_piece, all);
            });
        }
    }
}

#[test]
fn test_promotion_only_on_far_row() {
    for variant in Variant::ALL {
        let config = variant.config();
        for seed in 0..4 {
            playout(&config, seed, |state, _, mv| {
                let before = state.board.piece_at(mv.from).unwrap();
                let after = make_move(&state.board, mv, &config).unwrap();
                let landed = after.piece_at(mv.to).unwrap();
                let far_row = before.color.promotion_row(config.size);
                let expect_king = before.is_king() || mv.to.row == far_row;
                assert_eq!(landed.is_king(), expect_king);
            });
        }
    }
}

#[test]
fn test_finished_games_agree_with_winner_check() {
    for variant in Variant::ALL {
        let mut config = variant.config();
        config.draw.max_moves = Some(MAX_PLIES as u32);
        for seed in 0..4 {
            let state = playout(&config, seed, |_, _, _| {});
            assert!(state.is_over(), "{} seed {seed} did not finish", config.name);
            if let Some(checkers_core::Outcome::Win(winner)) = state.outcome {
                assert_eq!(
                    check_winner_to_move(&state.board, state.to_move, &config),
                    Some(winner.into())
                );
                assert_eq!(winner, state.to_move.other());
            }
        }
    }
}

#[test]
fn test_initial_board_never_changes() {
    let config = VariantConfig::american();
    let board = Board::initial(&config);
    let snapshot = board.clone();
    for mv in legal_moves(&board, Color::Black, &config) {
        let _ = make_move(&board, &mv, &config).unwrap();
    }
    assert_eq!(board, snapshot);
}
