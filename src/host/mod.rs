//! Page integration: host events, the frame-callback loop, and the session
//! that owns every mounted effect.

/// Headless driver used for offline rendering.
pub mod offline;
pub mod page;
pub mod scheduler;
pub mod session;
