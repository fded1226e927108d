//! [Systems](System) provide the logic for modifying the state of [Entities](crate::entities::EntityId)
//! and their associated [Components](crate::components::Component).
//!
//! A [System] must be added to a [World](crate::World) for it to run during [`World::tick`](crate::World::tick).

mod system;
mod commands;
mod system_context;
mod system_registry;

pub use system::*;
pub use commands::{CommandBuffer, EntityBuilder};
pub use system_context::*;
pub use system_registry::*;
