use crate::components::{Component, ComponentStore, ComponentTypeRegistry, FetchMut, Signature};
use crate::systems::{CommandBuffer, EntityBuilder};
use crate::entities::{EntityId, EntityRegistry, View};
use crate::error::EcsResult;

/// What a [System](crate::systems::System) handler can see and do during a tick.
///
/// Component values can be read and written in place. Anything that changes which entities
/// exist or which components they carry is queued and applied after the tick.
pub struct SystemContext<'w> {
	entities: &'w EntityRegistry,
	components: &'w mut ComponentStore,
	commands: &'w mut CommandBuffer,
}

impl<'w> SystemContext<'w> {
	pub(crate) fn new(
		entities: &'w EntityRegistry, components: &'w mut ComponentStore, commands: &'w mut CommandBuffer,
	) -> Self {
		Self {
			entities,
			components,
			commands,
		}
	}

	pub fn get<T: Component>(&self, entity: EntityId) -> Option<&T> {
		self.components.get(self.entities, entity)
	}

	pub fn get_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
		self.components.get_mut(self.entities, entity)
	}

	/// Borrows several distinct components of `entity` mutably at once. See [`World::get_many_mut`](crate::World::get_many_mut).
	pub fn get_many_mut<S: FetchMut>(&mut self, entity: EntityId) -> Option<S::Output<'_>> {
		self.components.get_many_mut::<S>(self.entities, entity)
	}

	pub fn has<T: Component>(&self, entity: EntityId) -> bool {
		self.components.has::<T>(self.entities, entity)
	}

	pub fn is_alive(&self, entity: EntityId) -> bool {
		self.entities.is_alive(entity)
	}

	pub fn tags(&self, entity: EntityId) -> Option<Signature> {
		self.entities.tags(entity)
	}

	/// A view over the entities as they were when the tick started.
	pub fn view(&self, signature: Signature) -> View<'w> {
		self.entities.view(signature)
	}

	pub fn kinds(&self) -> &ComponentTypeRegistry {
		self.components.kinds()
	}

	/// Queues the creation of an entity once the tick is over.
	pub fn create(&mut self, build: impl FnOnce(&mut EntityBuilder<'_>) -> EcsResult<()> + 'static) {
		self.commands.create(build);
	}

	/// Queues the destruction of `entity` once the tick is over.
	pub fn destroy(&mut self, entity: EntityId) {
		self.commands.destroy(entity);
	}

	/// Queues attaching `value` to `entity` once the tick is over.
	pub fn assign<T: Component>(&mut self, entity: EntityId, value: T) {
		self.commands.assign(entity, value);
	}

	/// Queues detaching `T` from `entity` once the tick is over.
	pub fn remove<T: Component>(&mut self, entity: EntityId) {
		// A kind that was never registered can't be attached to anything.
		if let Some(kind) = self.components.kinds().lookup::<T>() {
			self.commands.remove_kind(entity, kind);
		}
	}

	/// Number of structural changes queued so far this tick.
	pub fn pending(&self) -> usize {
		self.commands.len()
	}
}
