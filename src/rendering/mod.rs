//! # Rendering Module
//!
//! macroquad frontend. A read-only consumer of the game session.

pub mod display;

pub use display::*;
