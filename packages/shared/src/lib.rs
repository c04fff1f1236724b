//! Shared library for the Kokuban whiteboard application.
//!
//! Holds the pieces both binaries need: the WebSocket wire protocol,
//! time utilities, and logger setup.

pub mod logger;
pub mod protocol;
pub mod time;
