use stackfall::core::{Board, GameConfig, GameState, KeyBindings, Layer, Surface};
use stackfall::term::{palette, AnchorY, GameView, Viewport};
use stackfall::types::Action;

fn paint(game: &GameState, view: &mut GameView, viewport: Viewport) {
    view.set_viewport(viewport);
    game.render(view);
}

fn screen_text(view: &GameView) -> String {
    let fb = view.framebuffer();
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let game = GameState::new(1);
    let mut view = GameView::default().with_anchor_y(AnchorY::Top);

    // 10x20 board, 2 columns per cell: 20x20 plus border => 22x22.
    paint(&game, &mut view, Viewport::new(22, 22));
    let fb = view.framebuffer();

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut cells = vec![0; 200];
    cells[19 * 10] = 3;
    let board = Board::with_cells(10, 20, cells).unwrap();
    let game =
        GameState::with_board(GameConfig::with_seed(1), KeyBindings::default(), board).unwrap();

    let mut view = GameView::default().with_anchor_y(AnchorY::Top);
    paint(&game, &mut view, Viewport::new(22, 22));
    let fb = view.framebuffer();

    let (x0, y0) = (1, 1 + 19);
    for x in [x0, x0 + 1] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, palette(3));
    }
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_sizes_to_board_dimensions() {
    let config = GameConfig {
        board_width: 16,
        board_height: 32,
        ..GameConfig::with_seed(1)
    };
    let game = GameState::with_config(config, KeyBindings::default()).unwrap();
    let mut view = GameView::default().with_anchor_y(AnchorY::Top);
    paint(&game, &mut view, Viewport::new(34, 34));
    let fb = view.framebuffer();

    assert_eq!(fb.get(33, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 33).unwrap().ch, '└');
}

#[test]
fn term_view_shows_hold_panel_after_hold() {
    let mut game = GameState::new(5);
    let mut view = GameView::default();

    paint(&game, &mut view, Viewport::new(80, 24));
    let before = view.framebuffer().cells().iter().filter(|c| c.ch == '█').count();
    assert!(screen_text(&view).contains("HOLD"));
    assert!(screen_text(&view).contains("NEXT"));

    game.press_action(Action::Hold);
    game.update(100);
    paint(&game, &mut view, Viewport::new(80, 24));
    let after = view.framebuffer().cells().iter().filter(|c| c.ch == '█').count();

    // The held piece adds four preview cells, two columns each.
    assert!(after > before);
}

#[test]
fn term_view_game_over_overlay() {
    let mut cells = vec![0; 200];
    for (i, cell) in cells.iter_mut().enumerate() {
        if i % 10 != 0 {
            *cell = 1;
        }
    }
    let board = Board::with_cells(10, 20, cells).unwrap();
    let game =
        GameState::with_board(GameConfig::with_seed(1), KeyBindings::default(), board).unwrap();

    let mut view = GameView::default();
    paint(&game, &mut view, Viewport::new(80, 24));
    assert!(screen_text(&view).contains("GAME OVER"));
}

#[test]
fn term_view_reuses_framebuffer_across_resizes() {
    let game = GameState::new(1);
    let mut view = GameView::default();

    paint(&game, &mut view, Viewport::new(80, 24));
    paint(&game, &mut view, Viewport::new(40, 30));
    assert_eq!(view.framebuffer().width(), 40);
    assert_eq!(view.framebuffer().height(), 30);

    // Cells outside the board are dropped.
    view.draw_cell(Layer::Board, -1, 0, 1);
    view.draw_cell(Layer::Board, 0, 20, 1);
    view.draw_cell(Layer::Next, 4, 0, 1);
}
