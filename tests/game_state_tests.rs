//! Game loop scenarios driven through key codes and elapsed time

use stackfall::core::{drop_to_rest, Board, GameConfig, GameState, KeyBindings};
use stackfall::input::default_bindings;
use stackfall::input::map::{KEY_DOWN, KEY_LEFT, KEY_SPACE, KEY_UP};
use stackfall::types::{GameStatus, EMPTY};

fn game_with(width: u8, height: u8, seed: u32) -> GameState {
    let config = GameConfig {
        board_width: width,
        board_height: height,
        ..GameConfig::with_seed(seed)
    };
    GameState::with_config(config, default_bindings()).unwrap()
}

/// Board with rows `from..height` filled except column 0.
fn stacked_board(width: u8, height: u8, from: u8) -> Board {
    let mut cells = vec![EMPTY; width as usize * height as usize];
    for y in from as usize..height as usize {
        for x in 1..width as usize {
            cells[y * width as usize + x] = 8;
        }
    }
    Board::with_cells(width, height, cells).unwrap()
}

#[test]
fn test_held_left_moves_four_columns_in_five_steps() {
    let mut game = game_with(16, 32, 5);
    let start = *game.current();

    assert!(game.key_pressed(KEY_LEFT));
    game.update(500);

    assert_eq!(game.current().x, start.x - 4);
    assert_eq!(game.current().y, start.y);
}

#[test]
fn test_held_left_same_result_with_small_frames() {
    let mut game = game_with(16, 32, 5);
    let start = *game.current();

    game.key_pressed(KEY_LEFT);
    for _ in 0..10 {
        game.update(50);
    }

    assert_eq!(game.current().x, start.x - 4);
}

#[test]
fn test_tap_moves_exactly_once() {
    let mut game = game_with(16, 32, 5);
    let start = *game.current();

    game.key_pressed(KEY_LEFT);
    game.update(100);
    game.key_released(KEY_LEFT);
    game.update(400);

    assert_eq!(game.current().x, start.x - 1);
}

#[test]
fn test_left_stops_at_wall() {
    let mut game = game_with(10, 20, 5);
    game.key_pressed(KEY_LEFT);
    game.update(900);

    let min_x = game.current().board_cells().map(|(x, _)| x).min().unwrap();
    assert_eq!(min_x, 0);
}

#[test]
fn test_gravity_lock_spawns_former_next() {
    let config = GameConfig::with_seed(9);
    let mut game =
        GameState::with_board(config, default_bindings(), stacked_board(10, 20, 10)).unwrap();

    let mut guard = 0;
    while game.ghost().map(|g| g.y) != Some(game.current().y) {
        game.update(1000);
        guard += 1;
        assert!(guard < 20, "piece never came to rest");
    }
    assert_eq!(game.pieces_locked(), 0);

    let resting = *game.current();
    let expected = *game.next();
    game.update(1000);

    assert_eq!(game.pieces_locked(), 1);
    assert_eq!(game.drop_timer_ms(), 0);
    assert_eq!(game.current().kind, expected.kind);
    assert_eq!(game.current().x, expected.x);
    assert_eq!(game.status(), GameStatus::Playing);
    for (x, y) in resting.board_cells() {
        assert_eq!(game.board().get(x, y), Some(resting.color));
    }

    let event = game.take_last_event().unwrap();
    assert!(!event.hard_drop);
    assert_eq!(event.rows_cleared, 0);
}

#[test]
fn test_soft_drop_adds_gravity_credit() {
    let mut game = game_with(10, 20, 3);
    let y = game.current().y;

    game.key_pressed(KEY_DOWN);
    game.update(100);
    assert_eq!(game.current().y, y + 1);
    assert_eq!(game.drop_timer_ms(), 100);

    game.key_released(KEY_DOWN);
    game.update(100);
    assert_eq!(game.current().y, y + 1);
}

#[test]
fn test_hard_drop_lands_on_ghost() {
    let mut game = game_with(10, 20, 3);
    let ghost = *game.ghost().unwrap();

    game.key_pressed(KEY_SPACE);
    game.update(100);

    assert_eq!(game.pieces_locked(), 1);
    for (x, y) in ghost.board_cells() {
        assert_eq!(game.board().get(x, y), Some(ghost.color));
    }
    assert!(game.take_last_event().unwrap().hard_drop);
}

#[test]
fn test_rotate_fires_once_per_press() {
    let mut game = game_with(10, 20, 3);
    let rotation = game.current().rotation;

    game.key_pressed(KEY_UP);
    game.update(500);
    assert_eq!(game.current().rotation, (rotation + 1) % 4);

    game.key_released(KEY_UP);
    game.key_pressed(KEY_UP);
    game.update(100);
    assert_eq!(game.current().rotation, (rotation + 2) % 4);
}

#[test]
fn test_blocked_spawn_is_game_over() {
    let game = GameState::with_board(
        GameConfig::with_seed(1),
        KeyBindings::default(),
        stacked_board(10, 20, 0),
    )
    .unwrap();

    assert_eq!(game.status(), GameStatus::GameOver);
    assert!(game.ghost().is_none());
}

#[test]
fn test_game_over_freezes_updates() {
    let mut game = GameState::with_board(
        GameConfig::with_seed(1),
        default_bindings(),
        stacked_board(10, 20, 0),
    )
    .unwrap();
    let board = game.board().clone();

    game.key_pressed(KEY_SPACE);
    game.update(60_000);

    assert_eq!(game.board(), &board);
    assert_eq!(game.pieces_locked(), 0);
}

#[test]
fn test_frame_size_does_not_change_outcome() {
    let mut coarse = game_with(10, 20, 42);
    let mut fine = game_with(10, 20, 42);

    for _ in 0..64 {
        coarse.update(1000);
    }
    // 8ms divides both quanta, so every step lands on the same total time.
    for _ in 0..8000 {
        fine.update(8);
    }

    assert_eq!(coarse.board(), fine.board());
    assert_eq!(coarse.current(), fine.current());
    assert_eq!(coarse.pieces_locked(), fine.pieces_locked());
}

#[test]
fn test_bindings_are_host_owned() {
    let game = GameState::new(1);
    assert!(!game.capture_key(KEY_LEFT));

    let game = game_with(10, 20, 1);
    assert!(game.capture_key(KEY_LEFT));
    assert!(!game.capture_key(80));
}

#[test]
fn test_restart_keeps_bindings() {
    let mut game = game_with(10, 20, 8);
    game.key_pressed(KEY_SPACE);
    game.update(100);
    assert_eq!(game.pieces_locked(), 1);

    game.restart();
    assert_eq!(game.board().filled_count(), 0);
    assert!(game.capture_key(KEY_SPACE));
    assert_eq!(game.status(), GameStatus::Playing);
}

#[test]
fn test_ghost_matches_drop_to_rest() {
    let game = GameState::with_board(
        GameConfig::with_seed(4),
        default_bindings(),
        stacked_board(10, 20, 12),
    )
    .unwrap();

    let expected = drop_to_rest(game.board(), game.current());
    assert_eq!(game.ghost().copied(), expected);
}
