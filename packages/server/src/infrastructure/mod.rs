//! Infrastructure layer: concrete implementations of the domain interfaces
//! plus DTO conversion.

pub mod dto;
pub mod pusher;
pub mod registry;

pub use pusher::WebSocketEventPusher;
pub use registry::InMemorySessionRegistry;
