//! Kokuban meeting server library.
//!
//! Implements the meeting lifecycle, presence tracking, and real-time
//! broadcast relay for the collaborative whiteboard.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
