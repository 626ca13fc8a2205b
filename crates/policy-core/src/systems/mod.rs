//! Simulation Systems
//!
//! The per-step rules: opinion update, network rewiring, policy allocation
//! and connection counting.

pub mod connections;
pub mod opinion;
pub mod policy;
pub mod rewire;

pub use connections::refresh_degrees;
pub use opinion::{logistic_opinion, update_opinions};
pub use policy::{allocate_policy, allocation_targets, AllocationOutcome, AllocationTargets};
pub use rewire::{rewire_agent, rewire_network, RewireOutcome};
