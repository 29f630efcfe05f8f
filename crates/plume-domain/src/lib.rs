//! Domain types for the Plume newsletter schedule engine.
//!
//! This crate contains only pure types and date arithmetic with no
//! framework dependencies. It sits at the bottom of the workspace
//! dependency graph, so every layer may import it; nothing here may
//! depend back on a service crate.

pub mod delivery;
pub mod frequency;
pub mod schedule;

pub use delivery::DeliveryStatus;
pub use frequency::Frequency;
pub use schedule::{Occurrence, advance};
