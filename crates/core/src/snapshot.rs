use crate::game_state::{HeldPiece, Tetromino};
use crate::pieces::PieceMatrix;
use crate::types::{PieceKind, RunState, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub matrix: PieceMatrix,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            x: value.x,
            y: value.y,
        }
    }
}

/// Display state of the pause/resume control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PauseControl {
    pub label: &'static str,
    pub enabled: bool,
}

impl Default for PauseControl {
    fn default() -> Self {
        Self {
            label: "Pause",
            enabled: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Raw cell values: 0 empty, 1-7 color index.
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub hold: Option<HeldPiece>,
    pub score: u32,
    pub final_score: Option<u32>,
    pub run_state: RunState,
    pub pause: PauseControl,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: PieceKind::I,
            hold: None,
            score: 0,
            final_score: None,
            run_state: RunState::NotRunning,
            pause: PauseControl::default(),
        }
    }
}
