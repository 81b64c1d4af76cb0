//! Small time-based helpers used around the page.

pub mod counter;
pub mod ease;
pub mod scroll;
pub mod stagger;
