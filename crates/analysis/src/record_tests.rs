use super::*;
use checkers_core::{Outcome, Square};

fn short_game() -> (VariantConfig, GameState) {
    let config = VariantConfig::american();
    let mut state = GameState::new(&config);
    for _ in 0..6 {
        let mv = state.legal_moves(&config)[0].clone();
        state.play(&mv, &config).unwrap();
    }
    (config, state)
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("checkers-{}-{name}.json", std::process::id()))
}

#[test]
fn test_record_replays_to_same_state() {
    let (config, state) = short_game();
    let record = GameRecord::from_game(&config, Board::initial(&config), config.first_to_move, &state);
    assert_eq!(record.moves.len(), 6);
    assert_eq!(record.replay().unwrap(), state);

    let positions = record.positions().unwrap();
    assert_eq!(positions.len(), 6);
    assert_eq!(positions[0], (Board::initial(&config), Color::Black));
    assert_eq!(positions[1].1, Color::Red);
}

#[test]
fn test_illegal_record_fails_replay() {
    let config = VariantConfig::american();
    let mut record = GameRecord::new(&config);
    record.moves.push(Move::step(Square::new(5, 0), Square::new(4, 1)));
    assert!(matches!(record.replay(), Err(EngineError::WrongColor { .. })));
    assert!(record.positions().is_err());
}

#[test]
fn test_movetext_numbers_move_pairs() {
    let config = VariantConfig::american();
    let mut record = GameRecord::new(&config);
    record.moves.push(Move::step(Square::new(2, 1), Square::new(3, 0)));
    record.moves.push(Move::step(Square::new(5, 2), Square::new(4, 3)));
    record.moves.push(Move::step(Square::new(2, 3), Square::new(3, 2)));
    assert_eq!(record.movetext(), "1. 9-13 22-18 2. 10-14");
}

#[test]
fn test_save_and_load_round_trip() {
    let (config, state) = short_game();
    let record = GameRecord::from_game(&config, Board::initial(&config), config.first_to_move, &state)
        .with_players("classical:hard", "random");
    let path = temp_path("single");
    record.save(&path).unwrap();
    let loaded = GameRecord::load(&path).unwrap();
    assert_eq!(loaded, record);

    let many = load_records(&path).unwrap();
    assert_eq!(many, vec![record.clone()]);
    std::fs::remove_file(&path).unwrap();

    let path = temp_path("many");
    save_records(&path, &[record.clone(), record.clone()]).unwrap();
    assert_eq!(load_records(&path).unwrap().len(), 2);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_reports_bad_files() {
    let missing = temp_path("missing");
    assert!(matches!(GameRecord::load(&missing), Err(RecordError::Io(_))));

    let path = temp_path("garbage");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(GameRecord::load(&path), Err(RecordError::Json(_))));
    std::fs::remove_file(&path).unwrap();
}

fn write_edited(name: &str, edit: impl FnOnce(&mut serde_json::Value)) -> std::path::PathBuf {
    let (config, state) = short_game();
    let record = GameRecord::from_game(&config, Board::initial(&config), config.first_to_move, &state);
    let mut value = serde_json::to_value(&record).unwrap();
    edit(&mut value);
    let path = temp_path(name);
    std::fs::write(&path, value.to_string()).unwrap();
    path
}

#[test]
fn test_load_rejects_board_with_wrong_cell_count() {
    let path = write_edited("cells", |v| v["initial"]["size"] = serde_json::json!(10));
    assert!(matches!(GameRecord::load(&path), Err(RecordError::Json(_))));
    assert!(matches!(load_records(&path), Err(RecordError::Json(_))));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_rejects_invalid_variant() {
    let path = write_edited("variant", |v| v["variant"]["size"] = serde_json::json!(18));
    assert!(matches!(GameRecord::load(&path), Err(RecordError::Variant(_))));
    assert!(matches!(load_records(&path), Err(RecordError::Variant(_))));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_rejects_board_of_another_size() {
    let path = write_edited("mismatch", |v| {
        v["variant"] = serde_json::to_value(VariantConfig::international()).unwrap();
    });
    assert!(matches!(
        GameRecord::load(&path),
        Err(RecordError::SizeMismatch { board: 8, variant: 10 })
    ));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_finished_game_keeps_result() {
    let config = VariantConfig::american();
    let board = Board::from_pieces(
        8,
        &[
            (Square::new(5, 0), checkers_core::Piece::man(Color::Red)),
            (Square::new(4, 1), checkers_core::Piece::man(Color::Black)),
        ],
    )
    .unwrap();
    let mut state = GameState::from_position(board.clone(), Color::Red, &config);
    let mv = state.legal_moves(&config)[0].clone();
    state.play(&mv, &config).unwrap();
    assert_eq!(state.outcome, Some(Outcome::Win(Color::Red)));

    let record = GameRecord::from_game(&config, board, Color::Red, &state);
    assert_eq!(record.result, Some(Winner::Red));
    assert_eq!(record.movetext(), "1. 21x14");
}
