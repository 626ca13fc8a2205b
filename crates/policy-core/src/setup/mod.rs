//! Model Setup
//!
//! Graph generation and population initialization.

pub mod graph;
pub mod population;

pub use graph::*;
pub use population::*;
