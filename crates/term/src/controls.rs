//! On-screen click controls.
//!
//! The game view lays out one button per command and records where it drew
//! them; a mouse press is hit-tested against that layout.

use arrayvec::ArrayVec;

use crate::types::GameAction;

/// Maximum number of buttons in one layout.
pub const MAX_BUTTONS: usize = 8;

/// A rendered button: one terminal row, `w` columns wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub label: &'static str,
    pub action: GameAction,
    /// Disabled buttons are drawn dimmed and ignore clicks.
    pub enabled: bool,
}

impl Button {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        row == self.y && col >= self.x && col < self.x.saturating_add(self.w)
    }
}

/// Button positions from the most recent render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlLayout {
    buttons: ArrayVec<Button, MAX_BUTTONS>,
}

impl ControlLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.buttons.clear();
    }

    /// Extra buttons beyond [`MAX_BUTTONS`] are not registered.
    pub fn push(&mut self, button: Button) {
        let _ = self.buttons.try_push(button);
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Command bound to the enabled button under (`col`, `row`), if any.
    pub fn action_at(&self, col: u16, row: u16) -> Option<GameAction> {
        self.buttons
            .iter()
            .find(|b| b.enabled && b.contains(col, row))
            .map(|b| b.action)
    }
}

/// Button rows drawn under the side panel, in reading order.
pub const BUTTON_ROWS: [&[(GameAction, &str)]; 3] = [
    &[
        (GameAction::MoveLeft, "<"),
        (GameAction::MoveRight, ">"),
        (GameAction::SoftDrop, "Drop"),
    ],
    &[(GameAction::Rotate, "Rotate"), (GameAction::Hold, "Hold")],
    &[(GameAction::Start, "Start"), (GameAction::Pause, "Pause")],
];

#[cfg(test)]
mod tests {
    use super::*;

    fn button(x: u16, y: u16, w: u16, action: GameAction, enabled: bool) -> Button {
        Button {
            x,
            y,
            w,
            label: "",
            action,
            enabled,
        }
    }

    #[test]
    fn hit_test_matches_columns_on_the_button_row() {
        let mut layout = ControlLayout::new();
        layout.push(button(10, 5, 3, GameAction::MoveLeft, true));
        layout.push(button(14, 5, 3, GameAction::MoveRight, true));

        assert_eq!(layout.action_at(10, 5), Some(GameAction::MoveLeft));
        assert_eq!(layout.action_at(12, 5), Some(GameAction::MoveLeft));
        assert_eq!(layout.action_at(13, 5), None);
        assert_eq!(layout.action_at(14, 5), Some(GameAction::MoveRight));
        assert_eq!(layout.action_at(10, 6), None);
    }

    #[test]
    fn disabled_buttons_ignore_clicks() {
        let mut layout = ControlLayout::new();
        layout.push(button(0, 0, 7, GameAction::Pause, false));
        assert_eq!(layout.action_at(2, 0), None);
    }

    #[test]
    fn overflow_is_dropped() {
        let mut layout = ControlLayout::new();
        for i in 0..(MAX_BUTTONS as u16 + 3) {
            layout.push(button(i * 4, 0, 3, GameAction::Hold, true));
        }
        assert_eq!(layout.buttons().len(), MAX_BUTTONS);
    }
}
