//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::controls::{Button, ControlLayout, BUTTON_ROWS};
use crate::core::{GameSnapshot, PieceMatrix};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::surface::{CellScale, Surface};
use crate::types::{GameAction, PieceKind, RunState, BOARD_HEIGHT, BOARD_WIDTH};

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

/// Fill colors by cell value (index 0 is empty).
pub const PALETTE: [Rgb; 8] = [
    Rgb::new(0, 0, 0),
    Rgb::new(128, 0, 128),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 165, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(0, 128, 0),
    Rgb::new(255, 0, 0),
];

const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
const CELL_STROKE: Rgb = Rgb::new(255, 255, 255);
const BORDER: Rgb = Rgb::new(200, 200, 200);

/// Side length of the next/hold preview areas, in cells.
const PREVIEW_CELLS: u16 = 4;

/// Narrowest side panel that still fits the button rows.
const MIN_PANEL_W: u16 = 16;

/// Color for a raw cell value; out-of-range values draw as empty.
pub fn cell_color(value: u8) -> Rgb {
    PALETTE.get(value as usize).copied().unwrap_or(BACKGROUND)
}

/// Draw every filled cell of `matrix` as a filled, outlined block.
///
/// (`ox`, `oy`) is the device position of matrix cell (0, 0). Cells left or
/// above the origin are skipped.
pub fn draw_matrix<S: Surface>(
    surface: &mut S,
    scale: CellScale,
    matrix: &PieceMatrix,
    ox: i32,
    oy: i32,
) {
    for (dx, dy, kind) in matrix.filled() {
        let x = ox + dx as i32 * scale.w as i32;
        let y = oy + dy as i32 * scale.h as i32;
        if x < 0 || y < 0 {
            continue;
        }
        draw_block(surface, scale, x as u16, y as u16, kind.color_index());
    }
}

fn draw_block<S: Surface>(surface: &mut S, scale: CellScale, x: u16, y: u16, value: u8) {
    surface.fill_rect(x, y, scale.w, scale.h, cell_color(value));
    surface.stroke_rect(x, y, scale.w, scale.h, CELL_STROKE);
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameView {
    /// Fixed cell scale; `None` picks one from the viewport.
    scale: Option<CellScale>,
}

impl GameView {
    /// A view with a fixed cell scale.
    pub fn new(scale: CellScale) -> Self {
        Self { scale: Some(scale) }
    }

    pub fn scale_for(&self, viewport: Viewport) -> CellScale {
        self.scale
            .unwrap_or_else(|| CellScale::for_viewport(viewport))
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Button positions are written to `controls` for click hit-testing.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        viewport: Viewport,
        fb: &mut FrameBuffer,
        controls: &mut ControlLayout,
    ) {
        fb.resize(viewport.width, viewport.height);
        Surface::clear(fb, BACKGROUND);
        controls.clear();

        let scale = self.scale_for(viewport);
        let board_w = BOARD_WIDTH as u16 * scale.w;
        let board_h = BOARD_HEIGHT as u16 * scale.h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;
        let origin_x = start_x + 1;
        let origin_y = start_y + 1;

        Surface::fill_rect(fb, origin_x, origin_y, board_w, board_h, BACKGROUND);
        fb.stroke_rect(start_x, start_y, frame_w, frame_h, BORDER);

        // Locked cells.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                let (px, py) = scale.to_device(origin_x, origin_y, x as u16, y as u16);
                draw_block(fb, scale, px, py, value);
            }
        }

        // Active piece; rows above the board are not drawn.
        if let Some(active) = snap.active {
            draw_matrix(
                fb,
                scale,
                &active.matrix,
                origin_x as i32 + active.x as i32 * scale.w as i32,
                origin_y as i32 + active.y as i32 * scale.h as i32,
            );
        }

        self.draw_side_panel(fb, controls, snap, viewport, start_x, start_y, frame_w);

        match snap.run_state {
            RunState::Paused => {
                self.draw_banner(fb, start_x, start_y, frame_w, frame_h, "PAUSED", None)
            }
            RunState::GameOver => {
                self.draw_banner(fb, start_x, start_y, frame_w, frame_h, "GAME OVER", None)
            }
            RunState::NotRunning => match snap.final_score {
                Some(score) => self.draw_banner(
                    fb,
                    start_x,
                    start_y,
                    frame_w,
                    frame_h,
                    "GAME OVER",
                    Some(score),
                ),
                None => self.draw_banner(
                    fb,
                    start_x,
                    start_y,
                    frame_w,
                    frame_h,
                    "PRESS ENTER",
                    None,
                ),
            },
            RunState::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer and layout.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> (FrameBuffer, ControlLayout) {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        let mut controls = ControlLayout::new();
        self.render_into(snap, viewport, &mut fb, &mut controls);
        (fb, controls)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        controls: &mut ControlLayout,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < MIN_PANEL_W {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        draw_preview(fb, panel_x, y, Some(snap.next));
        y = y.saturating_add(PREVIEW_CELLS + 1);

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        draw_preview(fb, panel_x, y, snap.hold.map(|h| h.kind));
        y = y.saturating_add(PREVIEW_CELLS + 1);

        for row in BUTTON_ROWS {
            let mut x = panel_x;
            for &(action, text) in row {
                let (text, enabled) = match action {
                    GameAction::Pause => (snap.pause.label, snap.pause.enabled),
                    _ => (text, true),
                };
                let w = text.chars().count() as u16 + 2;
                let style = if enabled { value } else { value.dim() };
                fb.put_char(x, y, '[', style);
                fb.put_str(x + 1, y, text, style);
                fb.put_char(x + w - 1, y, ']', style);
                controls.push(Button {
                    x,
                    y,
                    w,
                    label: text,
                    action,
                    enabled,
                });
                x = x.saturating_add(w + 1);
            }
            y = y.saturating_add(1);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_banner(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
        score: Option<u32>,
    ) {
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y, text, style);

        if let Some(score) = score {
            const PREFIX: &str = "SCORE ";
            let digits = digit_count(score);
            let line_w = PREFIX.len() as u16 + digits;
            let x = start_x.saturating_add(frame_w.saturating_sub(line_w) / 2);
            let y = mid_y.saturating_add(1);
            fb.put_str(x, y, PREFIX, style);
            fb.put_u32(x + PREFIX.len() as u16, y, score, style);
        }
    }
}

/// Clear a preview area and draw `kind` in its spawn orientation.
fn draw_preview(fb: &mut FrameBuffer, x: u16, y: u16, kind: Option<PieceKind>) {
    let scale = CellScale::COMPACT;
    Surface::fill_rect(
        fb,
        x,
        y,
        PREVIEW_CELLS * scale.w,
        PREVIEW_CELLS * scale.h,
        BACKGROUND,
    );
    if let Some(kind) = kind {
        draw_matrix(fb, scale, &PieceMatrix::template(kind), x as i32, y as i32);
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
