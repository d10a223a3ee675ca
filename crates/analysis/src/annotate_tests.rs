use super::*;
use checkers_core::{parse_move, GameState, Piece, Square};

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

/// Red to move can sacrifice a man on 15 and then take two for one.
fn shot_record() -> GameRecord {
    let config = VariantConfig::american();
    let initial = Board::from_pieces(
        8,
        &[
            (sq(4, 3), Piece::man(Color::Red)),
            (sq(5, 4), Piece::man(Color::Red)),
            (sq(2, 3), Piece::man(Color::Black)),
            (sq(2, 5), Piece::man(Color::Black)),
        ],
    )
    .unwrap();
    let mut state = GameState::from_position(initial.clone(), Color::Red, &config);
    for text in ["18-15", "10x19", "23x16x7"] {
        let mv = parse_move(&state.board, state.to_move, text, &config).unwrap();
        state.play(&mv, &config).unwrap();
    }
    assert!(state.is_over());
    GameRecord::from_game(&config, initial, Color::Red, &state)
}

#[test]
fn test_grades_follow_thresholds() {
    let t = ClassifyThresholds::default();
    assert_eq!(t.grade(0), MoveClass::Best);
    assert_eq!(t.grade(30), MoveClass::Good);
    assert_eq!(t.grade(31), MoveClass::Inaccuracy);
    assert_eq!(t.grade(80), MoveClass::Inaccuracy);
    assert_eq!(t.grade(81), MoveClass::Mistake);
    assert_eq!(t.grade(200), MoveClass::Mistake);
    assert_eq!(t.grade(201), MoveClass::Blunder);
}

#[test]
fn test_sacrifice_shot_is_brilliant() {
    let record = shot_record();
    assert_eq!(record.result, Some(checkers_core::Winner::Red));
    let annotations = annotate_game(&record, 4).unwrap();
    let classes: Vec<MoveClass> = annotations.iter().map(|a| a.class).collect();
    assert_eq!(
        classes,
        vec![MoveClass::Brilliant, MoveClass::Best, MoveClass::Forced]
    );
    assert_eq!(annotations[0].notation, "18-15");
    assert_eq!(annotations[0].loss, 0);
    assert_eq!(annotations[1].player, Color::Black);
    assert_eq!(annotations[2].ply, 2);
}

#[test]
fn test_hanging_the_last_man_is_a_blunder() {
    let config = VariantConfig::american();
    let board = Board::from_pieces(
        8,
        &[
            (sq(5, 2), Piece::man(Color::Red)),
            (sq(3, 0), Piece::man(Color::Black)),
        ],
    )
    .unwrap();
    let thresholds = ClassifyThresholds::default();

    let bad = Move::step(sq(5, 2), sq(4, 1));
    let a = annotate_move(&board, Color::Red, &bad, &config, 2, &thresholds).unwrap();
    assert_eq!(a.class, MoveClass::Blunder);
    assert_eq!(a.best_move, Move::step(sq(5, 2), sq(4, 3)));
    assert_eq!(a.legal_moves, 2);

    let good = Move::step(sq(5, 2), sq(4, 3));
    let a = annotate_move(&board, Color::Red, &good, &config, 2, &thresholds).unwrap();
    assert_eq!(a.class, MoveClass::Best);
}

#[test]
fn test_illegal_move_is_rejected() {
    let config = VariantConfig::american();
    let mut record = GameRecord::new(&config);
    record.moves.push(Move::step(sq(2, 1), sq(4, 3)));
    assert!(annotate_game(&record, 2).is_err());
}

#[test]
fn test_summary_counts_each_side() {
    let record = shot_record();
    let annotations = annotate_game(&record, 4).unwrap();
    let summary = summarize(&annotations);
    assert_eq!(summary.red.moves, 2);
    assert_eq!(summary.red.count(MoveClass::Brilliant), 1);
    assert_eq!(summary.red.count(MoveClass::Forced), 1);
    assert_eq!(summary.black.moves, 1);
    assert!((summary.red.accuracy() - 100.0).abs() < f64::EPSILON);
    assert_eq!(summary.side(Color::Black).average_loss(), 0.0);

    let report = render_annotations(&record, &annotations);
    assert!(report.contains("18-15"));
    assert!(report.contains("!!"));
    assert!(report.contains("accuracy 100.0%"));
}
