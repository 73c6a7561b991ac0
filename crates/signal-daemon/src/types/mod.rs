//! Wire types for the signal-cli JSON-RPC API.

mod link;
mod send;

pub use link::*;
pub use send::*;
