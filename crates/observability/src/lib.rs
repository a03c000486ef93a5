//! Process-wide tracing setup shared by the binaries.

pub mod subscriber;

pub use subscriber::{init, init_with_default};
