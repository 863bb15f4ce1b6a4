//! Skyward - Terminal Arcade Game Library
//!
//! This module exposes the simulation core for testing and external use.

// Allow dead code in library - some functions are only used by the binary
#![allow(dead_code)]

pub mod constants;
pub mod game_logic;
pub mod game_state;
pub mod persistence;

// Audio and UI are not exposed as they are tightly coupled to the terminal
mod audio;
mod ui;
