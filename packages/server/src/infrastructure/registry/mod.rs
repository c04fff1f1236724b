//! Session registry implementations.
//!
//! Only the in-memory implementation exists: all meeting state is lost on
//! process restart. Scaling beyond one process would require a shared store
//! with per-meeting mutual exclusion behind the same trait.

pub mod inmemory;

pub use inmemory::InMemorySessionRegistry;
