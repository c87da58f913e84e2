//! Predator/prey simulation engine.
//!
//! This crate implements the bounded 2D grid the organisms live on, the rules
//! each organism follows, and the tick loop that applies them.

pub mod grid;
pub mod organism;
pub mod behavior;
pub mod world;
pub mod view;

pub use grid::{Grid, Target};
pub use organism::{Behavior, Counter, Occupant, OccupantIds};
pub use behavior::Outcome;
pub use world::{RunTotals, TickReport, World};
pub use view::{Renderer, WorldView};
