//! [Entities](EntityId) represent the individual "things" in a world.
//!
//! An entity doesn't store any data and has no associated behaviour;
//! it identifies which pieces of data ([Components](crate::components::Component)) belong together.

mod entity_view;
mod entity_registry;
mod entity_instance;

pub use entity_view::*;
pub use entity_registry::*;
pub use entity_instance::*;
