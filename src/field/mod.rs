//! Animated particle background: drifting points linked by proximity lines,
//! gently pulled toward the pointer.

pub mod config;
pub mod particle;
pub mod pointer;
pub mod renderer;
