//! Drawing surface abstraction and the cell-to-device scale.
//!
//! The game view draws every board cell and preview cell through [`Surface`],
//! in device units (terminal characters). [`CellScale`] maps one game cell to a
//! block of device units.

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;

/// Minimal rectangle-drawing target.
pub trait Surface {
    /// Paint the whole surface with `color`.
    fn clear(&mut self, color: Rgb);

    /// Solid rectangle.
    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb);

    /// Rectangle outline in `color`, drawn over the existing fill.
    fn stroke_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb);
}

/// Size of one game cell in device units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellScale {
    pub w: u16,
    pub h: u16,
}

impl CellScale {
    /// 2x1 characters per cell; fits a standard 80x24 terminal.
    pub const COMPACT: CellScale = CellScale { w: 2, h: 1 };
    /// 4x2 characters per cell for large terminals.
    pub const WIDE: CellScale = CellScale { w: 4, h: 2 };

    /// Minimum viewport that selects [`CellScale::WIDE`].
    pub const WIDE_MIN_COLS: u16 = 80;
    pub const WIDE_MIN_ROWS: u16 = 44;

    pub fn for_viewport(viewport: Viewport) -> Self {
        if viewport.width >= Self::WIDE_MIN_COLS && viewport.height >= Self::WIDE_MIN_ROWS {
            Self::WIDE
        } else {
            Self::COMPACT
        }
    }

    /// Device origin of game cell (`cx`, `cy`) relative to an origin.
    pub fn to_device(self, origin_x: u16, origin_y: u16, cx: u16, cy: u16) -> (u16, u16) {
        (
            origin_x.saturating_add(cx.saturating_mul(self.w)),
            origin_y.saturating_add(cy.saturating_mul(self.h)),
        )
    }
}

impl Default for CellScale {
    fn default() -> Self {
        Self::COMPACT
    }
}

impl Surface for FrameBuffer {
    fn clear(&mut self, color: Rgb) {
        self.fill(Cell {
            ch: ' ',
            style: CellStyle {
                bg: color,
                ..CellStyle::default()
            },
        });
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb) {
        let style = CellStyle {
            bg: color,
            ..CellStyle::default()
        };
        FrameBuffer::fill_rect(self, x, y, w, h, ' ', style);
    }

    fn stroke_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb) {
        if w < 2 || h == 0 {
            return;
        }
        let right = x.saturating_add(w - 1);
        if h == 1 {
            self.overlay_char(x, y, '[', color);
            self.overlay_char(right, y, ']', color);
            return;
        }

        let bottom = y.saturating_add(h - 1);
        self.overlay_char(x, y, '┌', color);
        self.overlay_char(right, y, '┐', color);
        self.overlay_char(x, bottom, '└', color);
        self.overlay_char(right, bottom, '┘', color);
        for dx in 1..w - 1 {
            self.overlay_char(x + dx, y, '─', color);
            self.overlay_char(x + dx, bottom, '─', color);
        }
        for dy in 1..h - 1 {
            self.overlay_char(x, y + dy, '│', color);
            self.overlay_char(right, y + dy, '│', color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_threshold() {
        assert_eq!(CellScale::for_viewport(Viewport::new(80, 24)), CellScale::COMPACT);
        assert_eq!(CellScale::for_viewport(Viewport::new(79, 60)), CellScale::COMPACT);
        assert_eq!(CellScale::for_viewport(Viewport::new(80, 44)), CellScale::WIDE);
    }

    #[test]
    fn stroke_one_row_uses_brackets() {
        let mut fb = FrameBuffer::new(4, 1);
        let fill = Rgb::new(128, 0, 128);
        Surface::fill_rect(&mut fb, 0, 0, 2, 1, fill);
        fb.stroke_rect(0, 0, 2, 1, Rgb::new(255, 255, 255));
        assert_eq!(fb.row_text(0), "[]  ");
        assert_eq!(fb.get(0, 0).unwrap().style.bg, fill);
    }

    #[test]
    fn stroke_tall_rect_uses_box_corners() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.stroke_rect(0, 0, 4, 2, Rgb::new(255, 255, 255));
        assert_eq!(fb.row_text(0), "┌──┐");
        assert_eq!(fb.row_text(1), "└──┘");
    }

    #[test]
    fn clear_paints_background() {
        let mut fb = FrameBuffer::new(2, 2);
        let color = Rgb::new(1, 2, 3);
        Surface::clear(&mut fb, color);
        assert!(fb.cells().iter().all(|c| c.style.bg == color && c.ch == ' '));
    }
}
