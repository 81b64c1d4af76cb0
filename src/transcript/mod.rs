//! The hero section's scripted terminal.

pub mod player;
pub mod script;
