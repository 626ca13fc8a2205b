//! Model Components
//!
//! Agent records, the agent store and the mutable social topology.

pub mod agent;
pub mod topology;

pub use agent::*;
pub use topology::*;
