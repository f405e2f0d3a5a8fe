//! Terminal front-end: framebuffer rendering, click controls and sound cues.
//!
//! Rendering is split in two halves. [`GameView`] is pure and turns a
//! `GameSnapshot` into a [`FrameBuffer`]; [`TerminalRenderer`] flushes that
//! buffer to the real terminal, rewriting only changed cells.

pub mod controls;
pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod sound;
pub mod surface;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use controls::{Button, ControlLayout};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{cell_color, draw_matrix, GameView, Viewport, PALETTE};
pub use renderer::{write_frame_diff, write_full_frame, TerminalRenderer};
pub use sound::{BellSink, LogSink, MuteSink, SoundSink};
pub use surface::{CellScale, Surface};
