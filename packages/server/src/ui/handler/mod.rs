//! HTTP and WebSocket endpoint handlers.

mod http;
mod websocket;

pub use http::{get_meeting_detail, get_meetings, health_check};
pub use websocket::websocket_handler;
