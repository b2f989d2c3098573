use std::mem;

use crate::core::{
    board::Board,
    collision::fits,
    piece::{Piece, PieceKind},
};

use super::{
    controller::ActivePieceController,
    lock::{self, CompletedRows},
    piece_generator::{PieceGenerator, PieceSeed},
    progression::Progression,
    snapshot::UndoSnapshot,
};

/// Kind of the first falling piece of every game.
const FIRST_PIECE: PieceKind = PieceKind::I;

/// How pieces are chosen.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::FromStr,
    derive_more::IsVariant,
)]
pub enum GameMode {
    /// The falling piece keeps its kind until it locks.
    #[default]
    Default,
    /// On every forced-down tick the falling piece changes to a freshly drawn
    /// kind, provided the new shape fits where the piece is.
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// Player commands to apply on one tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[expect(clippy::struct_excessive_bools)]
pub struct InputCommands {
    pub move_left: bool,
    pub move_right: bool,
    pub soft_drop: bool,
    /// Current state of the rotate input; rotation happens when it turns on.
    pub rotate: bool,
    pub hard_drop: bool,
    pub undo: bool,
}

/// Outcome of [`GameSession::tick`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickResult {
    /// Rows completed by a lock on this tick, top to bottom.
    ///
    /// They are marked on the board; call
    /// [`GameSession::collapse_completed_rows`] once they have been shown.
    pub lines_just_completed: CompletedRows,
    pub is_game_over: bool,
}

/// A single game: board, falling piece, progression and undo history.
///
/// The caller drives the game by feeding [`InputCommands`] and calling
/// [`tick`](Self::tick) at a fixed rate. Each tick advances a drop counter; when
/// it reaches the current speed, or a hard drop was requested, the piece moves
/// down one row or locks.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameMode, GameSession, InputCommands};
///
/// let mut session = GameSession::new(GameMode::Default);
/// session.apply_input(InputCommands {
///     hard_drop: true,
///     ..InputCommands::default()
/// });
/// let result = session.tick();
///
/// assert!(result.lines_just_completed.is_empty());
/// assert!(!result.is_game_over);
/// assert_eq!(session.score(), 25);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    mode: GameMode,
    board: Board,
    controller: ActivePieceController,
    generator: PieceGenerator,
    progression: Progression,
    undo: UndoSnapshot,
    pending_rows: CompletedRows,
    session_state: SessionState,
    drop_counter: usize,
    drop_requested: bool,
    high_score: usize,
}

impl GameSession {
    #[must_use]
    pub fn new(mode: GameMode) -> Self {
        Self::with_generator(mode, PieceGenerator::new())
    }

    /// Like [`Self::new`], but with a reproducible piece sequence.
    #[must_use]
    pub fn with_seed(mode: GameMode, seed: PieceSeed) -> Self {
        Self::with_generator(mode, PieceGenerator::with_seed(seed))
    }

    fn with_generator(mode: GameMode, mut generator: PieceGenerator) -> Self {
        let next = generator.draw();
        Self {
            mode,
            board: Board::INITIAL,
            controller: ActivePieceController::new(FIRST_PIECE, next),
            generator,
            progression: Progression::new(),
            undo: UndoSnapshot::new(),
            pending_rows: CompletedRows::new(),
            session_state: SessionState::Playing,
            drop_counter: 0,
            drop_requested: false,
            high_score: 0,
        }
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> Piece {
        self.controller.piece()
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.controller.next_piece()
    }

    #[must_use]
    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.progression.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.progression.level()
    }

    /// Ticks between automatic drops.
    #[must_use]
    pub fn speed(&self) -> usize {
        self.progression.speed()
    }

    #[must_use]
    pub fn placed_pieces(&self) -> usize {
        self.progression.placed_pieces()
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    /// Rows marked as completed and not yet collapsed.
    #[must_use]
    pub fn pending_rows(&self) -> &[usize] {
        &self.pending_rows
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.session_state.is_playing() && !self.undo.is_empty()
    }

    /// Sets the best score recorded before this session.
    pub fn set_high_score(&mut self, high_score: usize) {
        self.high_score = high_score;
    }

    /// Returns the best of the recorded high score and the current score.
    #[must_use]
    pub fn high_score(&self) -> usize {
        self.high_score.max(self.score())
    }

    #[must_use]
    pub fn is_new_high_score(&self) -> bool {
        self.score() > self.high_score
    }

    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Starts a new game in the same mode.
    ///
    /// The piece sequence continues from the current generator state and the
    /// high score carries over, including this game's score.
    pub fn restart(&mut self) {
        let high_score = self.high_score();
        *self = Self::with_generator(self.mode, self.generator.clone());
        self.high_score = high_score;
    }

    /// Applies the player's commands for this tick.
    ///
    /// Rows still pending from the previous lock are collapsed first, so the
    /// piece moves on the board it will lock into. Then undo runs, then
    /// move-right, move-left, soft drop and rotate, and finally hard drop.
    /// Blocked moves are ignored. Nothing happens unless the game is being
    /// played.
    pub fn apply_input(&mut self, input: InputCommands) {
        if !self.session_state.is_playing() {
            return;
        }
        if !self.pending_rows.is_empty() {
            self.collapse_completed_rows();
        }
        if input.undo {
            self.undo();
            if !self.session_state.is_playing() {
                return;
            }
        }

        let board = &self.board;
        let controller = &mut self.controller;
        if input.move_right {
            controller.try_shift(board, 1, 0);
        }
        if input.move_left {
            controller.try_shift(board, -1, 0);
        }
        if input.soft_drop {
            controller.try_shift(board, 0, 1);
        }
        controller.update_rotation(board, input.rotate);
        if input.hard_drop {
            controller.hard_drop(board);
            self.drop_requested = true;
        }
    }

    /// Reverts the most recent lock.
    ///
    /// Board and score go back to their values before the lock and the locked
    /// piece returns to the spawn position with its rotation. Only one lock
    /// can be undone; returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.session_state.is_playing() {
            return false;
        }
        let Some((piece, score)) = self.undo.restore(&mut self.board) else {
            return false;
        };
        self.pending_rows.clear();
        self.drop_requested = false;
        self.progression.restore_score(score);
        self.controller.set_piece_unchecked(piece);
        if !fits(&self.board, piece) {
            self.session_state = SessionState::GameOver;
        }
        true
    }

    /// Advances the game by one tick.
    ///
    /// Rows still pending from the previous lock are collapsed first.
    pub fn tick(&mut self) -> TickResult {
        if !self.session_state.is_playing() {
            return TickResult {
                is_game_over: self.session_state.is_game_over(),
                ..TickResult::default()
            };
        }
        if !self.pending_rows.is_empty() {
            self.collapse_completed_rows();
        }

        self.drop_counter += 1;
        if !self.drop_requested && self.drop_counter < self.progression.speed() {
            return TickResult::default();
        }
        self.drop_requested = false;
        self.drop_counter = 0;
        self.force_down()
    }

    /// Removes the rows reported by the last lock.
    pub fn collapse_completed_rows(&mut self) {
        let rows = mem::take(&mut self.pending_rows);
        lock::collapse_rows(&mut self.board, &rows);
    }

    fn force_down(&mut self) -> TickResult {
        if self.mode.is_random() {
            let kind = self.generator.draw();
            self.controller.try_replace_kind(&self.board, kind);
        }
        if self.controller.try_shift(&self.board, 0, 1) {
            return TickResult::default();
        }

        let piece = self.controller.piece();
        self.undo.capture(&self.board, piece, self.progression.score());
        let completed = lock::lock_piece(&mut self.board, piece);
        self.progression.complete_lock(completed.len());

        self.controller.advance(&mut self.generator);
        let is_game_over = !fits(&self.board, self.controller.piece());
        if is_game_over {
            self.session_state = SessionState::GameOver;
        }

        self.pending_rows.clone_from(&completed);
        TickResult {
            lines_just_completed: completed,
            is_game_over,
        }
    }
}
