extern crate self as slot_ecs;

mod data_structures;
pub mod components;
pub mod diagnostics;
pub mod entities;
pub mod systems;
mod config;
mod error;
mod world;

pub use config::{WorldConfig, DEFAULT_CAPACITY};
pub use error::{EcsError, EcsResult};
pub use world::{TickReport, World};

pub mod prelude {
	pub use crate::systems::*;
	pub use crate::components::*;
	pub use crate::diagnostics::{EntityDump, WorldStats};
	pub use crate::entities::{EntityId, EntityRegistry, View};
	pub use crate::{EcsError, EcsResult, TickReport, World, WorldConfig};
}

#[cfg(test)]
mod tests;
