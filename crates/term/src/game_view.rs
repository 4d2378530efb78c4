//! GameView: a [`Surface`] that paints the game into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{FrameInfo, Layer, Surface};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{ColorId, GameStatus};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 10;
/// Preview boxes hold up to a 4x4 shape.
const PREVIEW_SIDE: u16 = 4;

const PALETTE: [Rgb; 8] = [
    Rgb::new(255, 165, 0),
    Rgb::new(80, 120, 220),
    Rgb::new(220, 80, 80),
    Rgb::new(100, 220, 120),
    Rgb::new(200, 120, 220),
    Rgb::new(240, 220, 80),
    Rgb::new(80, 220, 220),
    Rgb::new(230, 230, 230),
];

/// Display color for a non-empty color id
pub fn palette(color: ColorId) -> Rgb {
    PALETTE[(color.saturating_sub(1) as usize) % PALETTE.len()]
}

/// Screen positions of the play field and side panel for one frame.
#[derive(Debug, Clone, Copy, Default)]
struct Layout {
    frame_x: u16,
    frame_y: u16,
    frame_w: u16,
    frame_h: u16,
    /// Left edge of the side panel, absent when the viewport is too narrow
    panel_x: Option<u16>,
}

impl Layout {
    fn hold_origin(&self) -> Option<(u16, u16)> {
        self.panel_x.map(|x| (x, self.frame_y + 1))
    }

    fn next_origin(&self) -> Option<(u16, u16)> {
        self.panel_x.map(|x| (x, self.frame_y + PREVIEW_SIDE + 3))
    }
}

/// Terminal view of the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    viewport: Viewport,
    fb: FrameBuffer,
    layout: Layout,
    frame: Option<FrameInfo>,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            viewport: Viewport::new(0, 0),
            fb: FrameBuffer::new(0, 0),
            layout: Layout::default(),
            frame: None,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size used from the next frame on.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Mutable access for renderers that swap buffers.
    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.fb
    }

    fn compute_layout(&self, frame: FrameInfo) -> Layout {
        let frame_w = frame.board_width as u16 * self.cell_w + 2;
        let frame_h = frame.board_height as u16 * self.cell_h + 2;
        let panel_w = PREVIEW_SIDE * self.cell_w + 2;

        let total_w = frame_w + 2 + panel_w;
        let frame_x = self.viewport.width.saturating_sub(total_w) / 2;
        let frame_y = match self.anchor_y {
            AnchorY::Center => self.viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let panel_x = frame_x + frame_w + 2;
        let panel_fits = self.viewport.width.saturating_sub(panel_x) >= PANEL_MIN_WIDTH;

        Layout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            panel_x: panel_fits.then_some(panel_x),
        }
    }

    fn draw_border(&mut self) {
        let Layout {
            frame_x: x,
            frame_y: y,
            frame_w: w,
            frame_h: h,
            ..
        } = self.layout;
        let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        self.fb.set(x, y, style.cell('┌'));
        self.fb.set(x + w - 1, y, style.cell('┐'));
        self.fb.set(x, y + h - 1, style.cell('└'));
        self.fb.set(x + w - 1, y + h - 1, style.cell('┘'));
        for dx in 1..w - 1 {
            self.fb.set(x + dx, y, style.cell('─'));
            self.fb.set(x + dx, y + h - 1, style.cell('─'));
        }
        for dy in 1..h - 1 {
            self.fb.set(x, y + dy, style.cell('│'));
            self.fb.set(x + w - 1, y + dy, style.cell('│'));
        }
    }

    fn draw_panel_labels(&mut self) {
        let label = CellStyle::default().bold();
        let hint = CellStyle::default().dim();
        let frame_y = self.layout.frame_y;
        let frame_h = self.layout.frame_h;

        if let Some((x, y)) = self.layout.hold_origin() {
            self.fb.put_str(x, y - 1, "HOLD", label);
        }
        if let Some((x, y)) = self.layout.next_origin() {
            self.fb.put_str(x, y - 1, "NEXT", label);
        }
        // Key hints go under the previews when the field is tall enough.
        if let Some(x) = self.layout.panel_x.filter(|_| frame_h >= 2 * PREVIEW_SIDE + 8) {
            let bottom = frame_y + frame_h;
            self.fb.put_str(x, bottom.saturating_sub(3), "P pause", hint);
            self.fb.put_str(x, bottom.saturating_sub(2), "R restart", hint);
            self.fb.put_str(x, bottom.saturating_sub(1), "Q quit", hint);
        }
    }

    /// Fill one board cell (`cell_w` x `cell_h` terminal cells).
    fn fill_board_cell(&mut self, x: i8, y: i8, cell: Cell) {
        let Some(frame) = self.frame else {
            return;
        };
        if x < 0 || y < 0 || x as u8 >= frame.board_width || y as u8 >= frame.board_height {
            return;
        }
        let px = self.layout.frame_x + 1 + x as u16 * self.cell_w;
        let py = self.layout.frame_y + 1 + y as u16 * self.cell_h;
        self.fb.fill_rect(px, py, self.cell_w, self.cell_h, cell);
    }

    /// Fill one preview cell; previews are always one terminal row per cell.
    fn fill_preview_cell(&mut self, origin: Option<(u16, u16)>, x: i8, y: i8, cell: Cell) {
        let Some((ox, oy)) = origin else {
            return;
        };
        if !(0..PREVIEW_SIDE as i8).contains(&x) || !(0..PREVIEW_SIDE as i8).contains(&y) {
            return;
        }
        let px = ox + x as u16 * self.cell_w;
        self.fb.fill_rect(px, oy + y as u16, self.cell_w, 1, cell);
    }

    fn draw_overlay_text(&mut self, text: &str) {
        let Layout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            ..
        } = self.layout;
        let text_w = text.chars().count() as u16;
        let x = frame_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let y = frame_y.saturating_add(frame_h / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        self.fb.put_str(x, y, text, style);
    }
}

impl Surface for GameView {
    fn begin_frame(&mut self, frame: FrameInfo) {
        self.frame = Some(frame);
        self.layout = self.compute_layout(frame);
        self.fb.resize(self.viewport.width, self.viewport.height);
        self.fb.clear(Cell::default());

        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim().cell('·');
        for y in 0..frame.board_height as i8 {
            for x in 0..frame.board_width as i8 {
                self.fill_board_cell(x, y, empty);
            }
        }
        self.draw_border();
        self.draw_panel_labels();
    }

    fn draw_cell(&mut self, layer: Layer, x: i8, y: i8, color: ColorId) {
        let block = CellStyle::new(palette(color), PLAY_BG);
        let preview = CellStyle::new(palette(color), Rgb::new(0, 0, 0)).cell('█');
        match layer {
            Layer::Board => self.fill_board_cell(x, y, block.cell('█')),
            Layer::Current => self.fill_board_cell(x, y, block.bold().cell('█')),
            Layer::Ghost => {
                let ghost = CellStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
                self.fill_board_cell(x, y, ghost.cell('░'));
            }
            Layer::Next => {
                let origin = self.layout.next_origin();
                self.fill_preview_cell(origin, x, y, preview);
            }
            Layer::Hold => {
                let origin = self.layout.hold_origin();
                self.fill_preview_cell(origin, x, y, preview);
            }
        }
    }

    fn end_frame(&mut self) {
        match self.frame.map(|f| f.status) {
            Some(GameStatus::Paused) => self.draw_overlay_text("PAUSED"),
            Some(GameStatus::GameOver) => self.draw_overlay_text("GAME OVER"),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    fn render(game: &GameState, viewport: Viewport) -> GameView {
        let mut view = GameView::default();
        view.set_viewport(viewport);
        game.render(&mut view);
        view
    }

    fn count(view: &GameView, ch: char) -> usize {
        view.framebuffer().cells().iter().filter(|c| c.ch == ch).count()
    }

    #[test]
    fn test_frame_fills_viewport() {
        let game = GameState::new(1);
        let view = render(&game, Viewport::new(60, 24));
        assert_eq!(view.framebuffer().width(), 60);
        assert_eq!(view.framebuffer().height(), 24);
        assert_eq!(count(&view, '┌'), 1);
    }

    #[test]
    fn test_pieces_and_previews_drawn() {
        let game = GameState::new(1);
        let view = render(&game, Viewport::new(60, 24));

        // Next preview: 4 cells, 2 columns each. The current piece may still
        // be partly above the top row.
        let blocks = count(&view, '█');
        assert!(blocks >= 4 * 2);
        assert!(blocks <= 8 * 2);
        assert!(count(&view, '░') > 0 || game.ghost().is_none());
    }

    #[test]
    fn test_narrow_viewport_skips_panel() {
        let game = GameState::new(1);
        let view = render(&game, Viewport::new(22, 24));
        let text: String = (0..24).map(|y| view.framebuffer().row_text(y)).collect();
        assert!(!text.contains("NEXT"));
    }

    #[test]
    fn test_pause_overlay() {
        let mut game = GameState::new(1);
        game.toggle_pause();
        let view = render(&game, Viewport::new(60, 24));
        let text: String = (0..24).map(|y| view.framebuffer().row_text(y)).collect();
        assert!(text.contains("PAUSED"));
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(palette(1), palette(9));
        assert_ne!(palette(1), palette(2));
    }
}
