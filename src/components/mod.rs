//! [Components](Component) are plain data attached to [entities](crate::entities::EntityId).
//!
//! Each component type gets a [ComponentId] the first time it is registered with a
//! [ComponentStore], and a pool sized for every possible entity slot.
//! Which slots actually hold a component is recorded by the per-entity [Signature].

mod component_id;
mod component_set;
mod component_type;
mod component_store;
mod component_registry;

pub use component_id::*;
pub use component_set::*;
pub use component_type::*;
pub use component_store::*;
pub use component_registry::*;
pub use slot_ecs_derive::Component;
