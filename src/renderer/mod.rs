//! Terminal rendering
//!
//! Pixel-space entities are projected onto a character grid and written with
//! crossterm. Nothing here feeds back into the simulation.

pub mod canvas;
pub mod terminal;

pub use canvas::{Canvas, Cell};
pub use terminal::TerminalRenderer;
