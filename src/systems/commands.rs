//! Deferred structural changes.
//!
//! A handler only ever sees the world through a [SystemContext](crate::systems::SystemContext),
//! which cannot create or destroy entities or change their tags directly. Those requests are
//! recorded here and applied in recording order once every system has finished its pass,
//! so a view never observes the set of entities changing under its cursor.

use crate::components::{Component, ComponentId, ComponentStore};
use crate::entities::{EntityId, EntityRegistry};
use crate::error::{EcsError, EcsResult};

type BuildFn = Box<dyn FnOnce(&mut EntityBuilder<'_>) -> EcsResult<()>>;
type AssignFn = Box<dyn FnOnce(&mut EntityRegistry, &mut ComponentStore) -> EcsResult<()>>;

pub(crate) enum Command {
	Create(BuildFn),
	Destroy(EntityId),
	Assign(AssignFn),
	Remove { entity: EntityId, kind: ComponentId },
}

/// An ordered queue of structural changes waiting to be applied.
#[derive(Default)]
pub struct CommandBuffer {
	commands: Vec<Command>,
}

impl CommandBuffer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues the creation of an entity, initialised by `build` once it exists.
	pub fn create(&mut self, build: impl FnOnce(&mut EntityBuilder<'_>) -> EcsResult<()> + 'static) {
		self.commands.push(Command::Create(Box::new(build)));
	}

	pub fn destroy(&mut self, entity: EntityId) {
		self.commands.push(Command::Destroy(entity));
	}

	pub fn assign<T: Component>(&mut self, entity: EntityId, value: T) {
		self.commands.push(Command::Assign(Box::new(move |entities, components| {
			components.assign(entities, entity, value).map(|_| ())
		})));
	}

	pub(crate) fn remove_kind(&mut self, entity: EntityId, kind: ComponentId) {
		self.commands.push(Command::Remove { entity, kind });
	}

	pub fn len(&self) -> usize {
		self.commands.len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	/// Applies and drains every queued command, in order.
	///
	/// Commands aimed at entities that are no longer alive are skipped; an entity destroyed
	/// earlier in the same batch is simply gone. Capacity and configuration errors abort the
	/// batch and are returned; the commands after the failing one are discarded.
	///
	/// Returns the number of commands that took effect.
	pub(crate) fn apply(&mut self, entities: &mut EntityRegistry, components: &mut ComponentStore) -> EcsResult<usize> {
		let mut applied = 0;

		for command in self.commands.drain(..) {
			let took_effect = match command {
				Command::Create(build) => {
					let id = entities.create()?;
					build(&mut EntityBuilder::new(id, entities, components))?;
					true
				},
				Command::Destroy(entity) => entities.destroy(entity),
				Command::Assign(assign) => match assign(entities, components) {
					Ok(()) => true,
					Err(EcsError::InvalidEntity(entity)) => {
						tracing::trace!(entity = %entity, "skipped deferred assign to a dead entity");
						false
					},
					Err(e) => return Err(e),
				},
				Command::Remove { entity, kind } => entities.clear_tag(entity, kind),
			};

			if took_effect {
				applied += 1;
			}
		}

		Ok(applied)
	}
}

/// A freshly created entity together with mutable access to the stores, for attaching its components.
pub struct EntityBuilder<'w> {
	id: EntityId,
	entities: &'w mut EntityRegistry,
	components: &'w mut ComponentStore,
}

impl<'w> EntityBuilder<'w> {
	pub(crate) fn new(id: EntityId, entities: &'w mut EntityRegistry, components: &'w mut ComponentStore) -> Self {
		Self { id, entities, components }
	}

	pub fn id(&self) -> EntityId {
		self.id
	}

	/// Attaches `value` to the entity being built.
	pub fn assign<T: Component>(&mut self, value: T) -> EcsResult<&mut Self> {
		self.components.assign(self.entities, self.id, value)?;
		Ok(self)
	}
}
