//! Game rules built on top of the core board and piece types.
//!
//! - [`GameSession`] - One game: input, ticks, locking, undo and game over
//! - [`ActivePieceController`] - The falling piece and its next-piece lookahead
//! - [`Progression`] - Score, level and drop speed
//! - [`UndoSnapshot`] - Single-level undo of the last lock
//! - [`PieceGenerator`] - Uniform random piece kinds from a [`PieceSeed`]
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`]; the first piece spawns at the top center
//! 2. Every tick, feed the player's [`InputCommands`] and call [`GameSession::tick`]
//! 3. When the drop counter reaches the current speed the piece moves down,
//!    or locks if it cannot
//! 4. Completed rows are reported in [`TickResult`] and collapsed with
//!    [`GameSession::collapse_completed_rows`]
//! 5. The game is over when a newly spawned piece does not fit
//!
//! ```
//! use blockfall_engine::{GameMode, GameSession, InputCommands};
//!
//! let mut session = GameSession::new(GameMode::Default);
//! while !session.session_state().is_game_over() {
//!     session.apply_input(InputCommands {
//!         hard_drop: true,
//!         ..InputCommands::default()
//!     });
//!     let result = session.tick();
//!     if !result.lines_just_completed.is_empty() {
//!         session.collapse_completed_rows();
//!     }
//! }
//! assert!(session.score() > 0);
//! ```

pub use self::{
    controller::*, game_session::*, lock::*, piece_generator::*, progression::*, snapshot::*,
};

mod controller;
mod game_session;
mod lock;
mod piece_generator;
mod progression;
mod snapshot;
