//! Terminal input module (host-facing).
//!
//! The core only understands numeric key codes bound to actions. This crate
//! turns `crossterm` key events into those codes, ships the default binding
//! table, filters the host's own keys (quit, pause, restart) and covers for
//! terminals that never report key releases.

pub mod config;
pub mod map;
pub mod release;

pub use stackfall_core as core;
pub use stackfall_types as types;

pub use config::{HostConfig, CONFIG_ENV_VAR};
pub use map::{default_bindings, host_command, key_code, should_quit, HostCommand};
pub use release::ReleaseTracker;
