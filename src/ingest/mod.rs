//! # Ingest
//!
//! Turns level text and trajectory files into the data the world is built
//! from. Both formats are line based and plain text.

pub mod layout;
pub mod waypoints;

pub use layout::*;
pub use waypoints::*;
