//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no external dependencies, so they can be
//! shared by the simulation, the renderer and the input layer alike.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `DROP_INTERVAL_MS` | 1000 | Gravity: one row per second |
//! | `GAME_OVER_DELAY_MS` | 300 | Delay before the board is wiped after game over |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, Sound, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color_index(), 1);
//!
//! assert_eq!(GameAction::from_str("hold"), Some(GameAction::Hold));
//! assert_eq!(Sound::LineClear.id(), "clear-sound");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval: the active piece falls one row once this much time
/// has accumulated (strictly exceeded).
pub const DROP_INTERVAL_MS: u32 = 1000;

/// One-shot delay between entering game over and wiping the board.
pub const GAME_OVER_DELAY_MS: u32 = 300;

/// Line clear scoring table, indexed by rows cleared in a single placement.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
///
/// Each kind has a fixed color index (1-7) used when the grid is exported
/// as raw cell values:
/// - **T**: 1, purple
/// - **O**: 2, yellow
/// - **L**: 3, orange
/// - **J**: 4, blue
/// - **I**: 5, cyan
/// - **S**: 6, green
/// - **Z**: 7, red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in the order used by the random piece draw.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Color index of this kind (1-7). Index 0 is reserved for empty cells.
    pub fn color_index(&self) -> u8 {
        match self {
            PieceKind::T => 1,
            PieceKind::O => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::I => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::color_index`].
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_color_index(5), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_color_index(0), None);
    /// assert_eq!(PieceKind::from_color_index(8), None);
    /// ```
    pub fn from_color_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(PieceKind::T),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::J),
            5 => Some(PieceKind::I),
            6 => Some(PieceKind::S),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// A cell on the game board or in a piece matrix
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the color of the specified piece kind
pub type Cell = Option<PieceKind>;

/// Raw exported value of a cell: 0 for empty, otherwise the color index.
pub fn cell_value(cell: Cell) -> u8 {
    cell.map_or(0, |kind| kind.color_index())
}

/// Commands accepted by the simulation
///
/// Keyboard keys and on-screen click controls both map onto this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (locks it if it cannot move)
    SoftDrop,
    /// Rotate piece a quarter turn, kicking sideways if needed
    Rotate,
    /// Put the active piece aside, or swap it with the held one
    Hold,
    /// Start a new game
    Start,
    /// Toggle pause state
    Pause,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "hold" => Some(GameAction::Hold),
            "start" => Some(GameAction::Start),
            "pause" => Some(GameAction::Pause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::Hold => "hold",
            GameAction::Start => "start",
            GameAction::Pause => "pause",
        }
    }

    /// Whether this command manipulates the active piece.
    ///
    /// Only a running game accepts these.
    pub fn is_piece_command(&self) -> bool {
        matches!(
            self,
            GameAction::MoveLeft
                | GameAction::MoveRight
                | GameAction::SoftDrop
                | GameAction::Rotate
                | GameAction::Hold
        )
    }
}

/// Sound cues emitted by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Move,
    Rotate,
    Drop,
    LineClear,
    GameOver,
}

impl Sound {
    /// Stable identifier of the cue.
    pub fn id(&self) -> &'static str {
        match self {
            Sound::Move => "move-sound",
            Sound::Rotate => "rotate-sound",
            Sound::Drop => "drop-sound",
            Sound::LineClear => "clear-sound",
            Sound::GameOver => "gameover-sound",
        }
    }
}

/// Fire-and-forget notifications recorded by the simulation.
///
/// The front-end drains these after each command or tick and forwards them
/// to the audio and display boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Play a sound cue.
    Cue(Sound),
    /// A placement cleared `count` rows worth `points`.
    LinesCleared { count: u32, points: u32 },
    /// The game-over delay elapsed; the board was wiped and this was the final score.
    FinalScore(u32),
}

/// Lifecycle of a game session.
///
/// ```text
/// NotRunning --start--> Running <--pause--> Paused
/// Running --spawn collision--> GameOver --(delay)--> NotRunning
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    #[default]
    NotRunning,
    Running,
    Paused,
    GameOver,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::NotRunning => "not-running",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::GameOver => "game-over",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_score_table() {
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
    }

    #[test]
    fn color_indices_are_distinct_and_invertible() {
        let mut seen = [false; 8];
        for kind in PieceKind::ALL {
            let idx = kind.color_index();
            assert!((1..=7).contains(&idx));
            assert!(!seen[idx as usize], "duplicate color index {}", idx);
            seen[idx as usize] = true;
            assert_eq!(PieceKind::from_color_index(idx), Some(kind));
        }
    }

    #[test]
    fn cell_value_uses_zero_for_empty() {
        assert_eq!(cell_value(None), 0);
        assert_eq!(cell_value(Some(PieceKind::Z)), 7);
    }

    #[test]
    fn action_string_round_trip() {
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::Rotate,
            GameAction::Hold,
            GameAction::Start,
            GameAction::Pause,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn piece_commands() {
        assert!(GameAction::Hold.is_piece_command());
        assert!(!GameAction::Start.is_piece_command());
        assert!(!GameAction::Pause.is_piece_command());
    }
}
