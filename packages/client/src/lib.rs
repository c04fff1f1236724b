//! CLI whiteboard client for Kokuban.

pub mod board;
pub mod command;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod history;
pub mod runner;
pub mod session;
mod ui;

pub use runner::run_client;
