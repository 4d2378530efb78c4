//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of a falling-block puzzle: a board of locked
//! cells, a catalog of rotatable pieces, a per-action input state machine and
//! the fixed-step timing that drives them. It does no I/O; a host feeds it key
//! codes and elapsed milliseconds and asks it to render into a [`Surface`].
//!
//! # Module Structure
//!
//! - [`board`]: grid of locked cells, collision and row clearing
//! - [`piece`]: a piece in flight (shape set, rotation, position)
//! - [`pieces`]: shape parsing and the piece catalog
//! - [`ghost`]: resting-position projection
//! - [`input`]: press/hold/repeat state per action
//! - [`bindings`]: host key code to action table
//! - [`game_state`]: the update and render entry points
//! - [`clock`]: time sources for hosts and tests
//! - [`config`]: tunables and construction errors
//! - [`render`]: the drawing boundary
//! - [`rng`]: deterministic piece selection
//!
//! # Example
//!
//! ```
//! use stackfall_core::{GameState, KeyBindings};
//! use stackfall_core::types::Action;
//!
//! let bindings = KeyBindings::new().with(Action::HardDrop, 32);
//! let mut game = GameState::with_config(Default::default(), bindings).unwrap();
//!
//! game.key_pressed(32);
//! game.update(100);
//! assert_eq!(game.pieces_locked(), 1);
//! ```
//!
//! # Timing
//!
//! - **Move step**: every 100ms; shifts, rotation, hold, hard and soft drop
//! - **Gravity step**: every 1000ms; one row down or lock
//! - **Soft drop**: each move step while held adds 1000ms of gravity credit
//!
//! Call [`GameState::update`] every frame with the elapsed time.

pub mod bindings;
pub mod board;
pub mod clock;
pub mod config;
pub mod game_state;
pub mod ghost;
pub mod input;
pub mod piece;
pub mod pieces;
pub mod render;
pub mod rng;

pub use stackfall_types as types;

// Re-export commonly used types for convenience
pub use bindings::KeyBindings;
pub use board::Board;
pub use clock::{Clock, FrameTimer, ManualClock, SystemClock};
pub use config::{ConfigError, GameConfig};
pub use game_state::{GameState, LockEvent};
pub use ghost::{drop_distance, drop_to_rest};
pub use input::InputState;
pub use piece::PieceInstance;
pub use pieces::{PieceCatalog, PieceDefinition, PieceTemplate, Shape, STANDARD_TEMPLATES};
pub use render::{FrameInfo, Layer, Surface};
pub use rng::SimpleRng;
