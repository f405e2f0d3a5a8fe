//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and the session state machine. It has
//! no dependency on rendering, input devices or audio, so it runs the same in
//! a terminal, in tests, or headless.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision, merge and line clearing
//! - [`pieces`]: tetromino templates and matrix rotation
//! - [`rng`]: seedable uniform piece generator with one piece of lookahead
//! - [`scoring`]: line clear score table
//! - [`game_state`]: the session (active/next/held piece, score, run state, timers)
//! - [`snapshot`]: plain-data view consumed by renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, RunState};
//!
//! let mut game = GameState::new(12345);
//! assert!(game.apply_action(GameAction::Start));
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::SoftDrop);
//!
//! assert_eq!(game.run_state(), RunState::Running);
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed time. Gravity drops the piece once a second; after a game over the
//! board is wiped 300ms later.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameState, HeldPiece, Tetromino, Timing};
pub use pieces::{spawn_column, PieceMatrix};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::calculate_line_score;
pub use snapshot::{ActiveSnapshot, GameSnapshot, PauseControl};
