//! Game state module - owns one complete game session
//!
//! Ties together the board, the piece queue and scoring, and runs the
//! `NotRunning -> Running <-> Paused -> GameOver -> NotRunning` lifecycle.
//! All mutable game data lives here, so independent sessions can coexist and
//! `start` re-initializes everything at once.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::{
    calculate_line_score,
    pieces::{spawn_column, PieceMatrix},
    snapshot::{ActiveSnapshot, GameSnapshot, PauseControl},
    Board, PieceQueue,
};
use crate::types::*;

/// Maximum number of pending events between drains.
pub const EVENT_CAPACITY: usize = 16;

/// Active falling piece: a working copy of a template plus its offset on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub matrix: PieceMatrix,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino in spawn orientation, centered on row 0
    pub fn new(kind: PieceKind) -> Self {
        Self::from_matrix(kind, PieceMatrix::template(kind))
    }

    /// Place an existing matrix (in whatever orientation) at the spawn position
    pub fn from_matrix(kind: PieceKind, matrix: PieceMatrix) -> Self {
        Self {
            kind,
            x: spawn_column(BOARD_WIDTH, &matrix),
            y: 0,
            matrix,
        }
    }

    /// Whether the piece overlaps occupied cells or leaves the board sideways/below
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.matrix, self.x, self.y)
    }
}

/// A piece set aside by the hold command, kept in the orientation it had.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeldPiece {
    pub kind: PieceKind,
    pub matrix: PieceMatrix,
}

/// Timer settings for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Gravity fires once the accumulator strictly exceeds this.
    pub drop_interval_ms: u32,
    /// One-shot delay between game over and the board wipe.
    pub game_over_delay_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            drop_interval_ms: DROP_INTERVAL_MS,
            game_over_delay_ms: GAME_OVER_DELAY_MS,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    hold: Option<HeldPiece>,
    piece_queue: PieceQueue,
    run_state: RunState,
    timing: Timing,
    score: u32,
    /// Score reported when the last game ended (shown until the next start).
    final_score: Option<u32>,
    /// Monotonic episode id (increments on every start).
    episode_id: u32,
    /// Monotonic id for spawned pieces.
    piece_id: u32,
    drop_timer_ms: u32,
    game_over_timer_ms: u32,
    events: ArrayVec<GameEvent, EVENT_CAPACITY>,
}

impl GameState {
    /// Create a new, not yet started game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_timing(seed, Timing::default())
    }

    pub fn with_timing(seed: u32, timing: Timing) -> Self {
        Self {
            board: Board::new(),
            active: None,
            hold: None,
            piece_queue: PieceQueue::new(seed),
            run_state: RunState::NotRunning,
            timing,
            score: 0,
            final_score: None,
            episode_id: 0,
            piece_id: 0,
            drop_timer_ms: 0,
            game_over_timer_ms: 0,
            events: ArrayVec::new(),
        }
    }

    /// Start a fresh game.
    ///
    /// Accepted while not running, running or paused; ignored while the
    /// game-over delay is pending. The piece queue carries over so the
    /// previewed next piece is the first to fall.
    pub fn start(&mut self) -> bool {
        if self.run_state == RunState::GameOver {
            return false;
        }

        self.board.clear();
        self.active = None;
        self.hold = None;
        self.score = 0;
        self.final_score = None;
        self.drop_timer_ms = 0;
        self.game_over_timer_ms = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.run_state = RunState::Running;
        info!(
            episode = self.episode_id,
            seed = self.piece_queue.seed(),
            "game started"
        );

        self.spawn_piece();
        true
    }

    /// Toggle between running and paused. Other states ignore it.
    pub fn toggle_pause(&mut self) -> bool {
        self.run_state = match self.run_state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            _ => return false,
        };
        debug!(state = self.run_state.as_str(), "pause toggled");
        true
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.run_state == RunState::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn hold_piece(&self) -> Option<HeldPiece> {
        self.hold
    }

    pub fn next_piece(&self) -> PieceKind {
        self.piece_queue.peek()
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions (tests, benches, puzzles).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the active piece (tests and puzzle setups).
    pub fn set_active(&mut self, piece: Option<Tetromino>) {
        self.active = piece;
    }

    /// Label and enabled state of the pause/resume control.
    pub fn pause_control(&self) -> PauseControl {
        match self.run_state {
            RunState::Running => PauseControl {
                label: "Pause",
                enabled: true,
            },
            RunState::Paused => PauseControl {
                label: "Resume",
                enabled: true,
            },
            RunState::NotRunning | RunState::GameOver => PauseControl {
                label: "Pause",
                enabled: false,
            },
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.piece_queue.peek();
        out.hold = self.hold;
        out.score = self.score;
        out.final_score = self.final_score;
        out.run_state = self.run_state;
        out.pause = self.pause_control();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take all events recorded since the last call.
    pub fn take_events(&mut self) -> ArrayVec<GameEvent, EVENT_CAPACITY> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GameEvent) {
        // Events are fire-and-forget; overflow between drains is dropped.
        let _ = self.events.try_push(event);
    }

    /// Whether the active piece collides at its current position
    pub fn collides(&self) -> bool {
        match self.active {
            Some(ref piece) => piece.collides(&self.board),
            None => false,
        }
    }

    /// Make the queued next piece active and queue a new one.
    ///
    /// Returns false (and enters game over) when the fresh piece collides.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.piece_queue.draw();
        let piece = Tetromino::new(kind);
        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);

        if piece.collides(&self.board) {
            self.enter_game_over();
            return false;
        }
        true
    }

    fn enter_game_over(&mut self) {
        self.run_state = RunState::GameOver;
        self.game_over_timer_ms = self.timing.game_over_delay_ms;
        self.emit(GameEvent::Cue(Sound::GameOver));
        info!(
            episode = self.episode_id,
            score = self.score,
            "game over"
        );
    }

    /// The deferred game-over action: wipe the board and report the score.
    fn finish_game_over(&mut self) {
        let final_score = self.score;
        self.board.clear();
        self.active = None;
        self.final_score = Some(final_score);
        self.score = 0;
        self.run_state = RunState::NotRunning;
        self.emit(GameEvent::FinalScore(final_score));
        info!(episode = self.episode_id, final_score, "final score");
    }

    /// Try to shift the active piece horizontally; reverts on collision
    pub(crate) fn try_move(&mut self, dx: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = Tetromino {
            x: active.x + dx,
            ..active
        };
        if moved.collides(&self.board) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Rotate the active piece a quarter turn, kicking sideways if needed.
    ///
    /// Shifts by steps +1, -2, +3, ... and gives up as soon as the next step
    /// exceeds the piece width, so 3- and 4-wide pieces test offsets +1, -1
    /// and +2. A failed rotation leaves the piece exactly as it was.
    pub(crate) fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let mut candidate = Tetromino {
            matrix: active.matrix.rotated(),
            ..active
        };
        let width = candidate.matrix.width() as i8;
        let mut step: i8 = 1;

        while candidate.collides(&self.board) {
            candidate.x += step;
            step = -(step + step.signum());
            if step > width {
                return false;
            }
        }

        self.active = Some(candidate);
        true
    }

    /// Move the active piece down one row, locking it if it cannot move.
    ///
    /// Returns true if the piece locked.
    pub fn drop_piece(&mut self) -> bool {
        self.drop_timer_ms = 0;
        self.emit(GameEvent::Cue(Sound::Drop));

        let Some(active) = self.active else {
            return false;
        };

        let lowered = Tetromino {
            y: active.y + 1,
            ..active
        };
        if !lowered.collides(&self.board) {
            self.active = Some(lowered);
            return false;
        }

        self.lock_piece();
        true
    }

    /// Merge the active piece into the board, clear lines, and spawn the next one
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.merge(&active.matrix, active.x, active.y);

        let lines_cleared = self.board.clear_full_rows();
        if lines_cleared > 0 {
            let points = calculate_line_score(lines_cleared);
            self.score = self.score.saturating_add(points);
            self.emit(GameEvent::Cue(Sound::LineClear));
            self.emit(GameEvent::LinesCleared {
                count: lines_cleared as u32,
                points,
            });
            debug!(lines = lines_cleared, points, score = self.score, "lines cleared");
        }

        self.spawn_piece();
    }

    /// Put the active piece aside, or swap it with the held one.
    ///
    /// A swapped-in piece restarts at the spawn position; if it collides there
    /// the game ends, exactly as for a blocked spawn.
    pub fn hold(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let current = HeldPiece {
            kind: active.kind,
            matrix: active.matrix,
        };

        match self.hold.replace(current) {
            Some(held) => {
                let piece = Tetromino::from_matrix(held.kind, held.matrix);
                self.active = Some(piece);
                if piece.collides(&self.board) {
                    self.enter_game_over();
                }
            }
            None => {
                self.spawn_piece();
            }
        }

        true
    }

    /// Advance timers.
    ///
    /// While running, gravity drops the piece once the accumulated time
    /// exceeds the drop interval. While in game over, the one-shot delay
    /// counts down. Returns true if the state changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        match self.run_state {
            RunState::Running => {
                self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
                if self.drop_timer_ms > self.timing.drop_interval_ms {
                    self.drop_piece();
                    return true;
                }
                false
            }
            RunState::GameOver => {
                self.game_over_timer_ms = self.game_over_timer_ms.saturating_sub(elapsed_ms);
                if self.game_over_timer_ms == 0 {
                    self.finish_game_over();
                    return true;
                }
                false
            }
            RunState::NotRunning | RunState::Paused => false,
        }
    }

    /// Apply a game action. Returns true if the action was accepted.
    ///
    /// Piece commands are only accepted while running.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => self.start(),
            GameAction::Pause => self.toggle_pause(),
            _ if !self.running() => false,
            GameAction::MoveLeft => {
                self.try_move(-1);
                self.emit(GameEvent::Cue(Sound::Move));
                true
            }
            GameAction::MoveRight => {
                self.try_move(1);
                self.emit(GameEvent::Cue(Sound::Move));
                true
            }
            GameAction::SoftDrop => {
                self.drop_piece();
                true
            }
            GameAction::Rotate => {
                self.emit(GameEvent::Cue(Sound::Rotate));
                self.try_rotate();
                true
            }
            GameAction::Hold => self.hold(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
