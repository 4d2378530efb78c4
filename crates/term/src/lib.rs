//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. The core reports
//! cells through its `Surface` trait; [`GameView`] paints them into a
//! [`FrameBuffer`] and [`TerminalRenderer`] flushes that to the terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use stackfall_core as core;
pub use stackfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{palette, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
