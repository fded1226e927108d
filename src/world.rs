use crate::components::{Component, ComponentId, ComponentSet, ComponentStore, FetchMut, Signature};
use crate::systems::{CommandBuffer, EntityBuilder, FnSystem, System, SystemContext, SystemRegistry};
use crate::diagnostics::{EntityDump, WorldStats};
use crate::entities::{EntityId, EntityRegistry, View};
use crate::error::EcsResult;
use crate::config::WorldConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A container for entities, their components and the systems that update them.
///
/// The world is the single owner of all ECS state and the only thing that mutates it.
/// Structural changes (creating and destroying entities, attaching and detaching components)
/// happen either directly between ticks, or are queued by system handlers during a tick and
/// applied once every system has run.
pub struct World {
	config: WorldConfig,
	entities: EntityRegistry,
	components: ComponentStore,
	systems: SystemRegistry,
	commands: CommandBuffer,
	rng: StdRng,
	ticks: u64,
}

/// Summary of a single [`World::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
	/// Number of ticks completed, this one included.
	pub tick: u64,
	/// Handler invocations across all systems.
	pub visits: usize,
	/// Deferred commands that took effect after the systems ran.
	pub commands: usize,
}

impl World {
	/// Creates a world with the [default configuration](WorldConfig::default).
	pub fn new() -> Self {
		Self::build(WorldConfig::default())
	}

	pub fn with_config(config: WorldConfig) -> EcsResult<Self> {
		config.validate()?;
		Ok(Self::build(config))
	}

	fn build(config: WorldConfig) -> Self {
		let rng = match config.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};

		Self {
			entities: EntityRegistry::with_capacity(config.capacity),
			components: ComponentStore::with_capacity(config.capacity),
			systems: SystemRegistry::new(),
			commands: CommandBuffer::new(),
			ticks: 0,
			config,
			rng,
		}
	}

	pub fn config(&self) -> &WorldConfig {
		&self.config
	}

	pub fn entities(&self) -> &EntityRegistry {
		&self.entities
	}

	pub fn components(&self) -> &ComponentStore {
		&self.components
	}

	/// Creates an [entity](EntityId) with no components.
	pub fn create_entity(&mut self) -> EcsResult<EntityId> {
		self.entities.create()
	}

	/// Creates an entity and returns a builder for attaching its components.
	pub fn build_entity(&mut self) -> EcsResult<EntityBuilder<'_>> {
		let id = self.entities.create()?;
		Ok(EntityBuilder::new(id, &mut self.entities, &mut self.components))
	}

	/// Destroys `entity`. Stale or invalid ids are ignored.
	pub fn destroy_entity(&mut self, entity: EntityId) -> bool {
		self.entities.destroy(entity)
	}

	pub fn is_alive(&self, entity: EntityId) -> bool {
		self.entities.is_alive(entity)
	}

	/// Registers a component type up front. [`World::assign`] does this on first use anyway.
	pub fn register_component<T: Component>(&mut self) -> EcsResult<ComponentId> {
		self.components.register::<T>()
	}

	/// The [Signature] of a tuple of component types, registering them as needed.
	///
	/// ```
	/// # use slot_ecs::prelude::*;
	/// # #[derive(Copy, Clone, Debug, Component)] struct Position(f64);
	/// # #[derive(Copy, Clone, Debug, Component)] struct Velocity(f64);
	/// let mut world = World::new();
	/// let signature = world.signature::<(Position, Velocity)>().unwrap();
	/// assert_eq!(signature.len(), 2);
	/// ```
	pub fn signature<S: ComponentSet>(&mut self) -> EcsResult<Signature> {
		self.components.signature_of::<S>()
	}

	/// Attaches `value` to `entity`, overwriting any previous `T`.
	pub fn assign<T: Component>(&mut self, entity: EntityId, value: T) -> EcsResult<&mut T> {
		self.components.assign(&mut self.entities, entity, value)
	}

	pub fn get<T: Component>(&self, entity: EntityId) -> Option<&T> {
		self.components.get(&self.entities, entity)
	}

	pub fn get_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
		self.components.get_mut(&self.entities, entity)
	}

	/// Gets mutable references to several distinct components of one entity at once.
	///
	/// ```
	/// # use slot_ecs::prelude::*;
	/// # #[derive(Copy, Clone, Debug, Component)] struct Position(f64);
	/// # #[derive(Copy, Clone, Debug, Component)] struct Velocity(f64);
	/// let mut world = World::new();
	/// let e = world.create_entity().unwrap();
	/// world.assign(e, Position(0.0)).unwrap();
	/// world.assign(e, Velocity(2.0)).unwrap();
	///
	/// let (p, v) = world.get_many_mut::<(Position, Velocity)>(e).unwrap();
	/// p.0 += v.0;
	/// assert_eq!(world.get::<Position>(e).unwrap().0, 2.0);
	/// ```
	///
	/// # Panics
	/// If the same component type appears more than once in `S`.
	pub fn get_many_mut<S: FetchMut>(&mut self, entity: EntityId) -> Option<S::Output<'_>> {
		self.components.get_many_mut::<S>(&self.entities, entity)
	}

	/// Detaches `T` from `entity`. Returns whether it was attached.
	pub fn remove<T: Component>(&mut self, entity: EntityId) -> bool {
		self.components.remove::<T>(&mut self.entities, entity)
	}

	/// Live entities carrying every kind in `signature`, in ascending index order.
	pub fn view(&self, signature: Signature) -> View<'_> {
		self.entities.view(signature)
	}

	/// Samples a slot uniformly, live or not. Check [`World::is_alive`] before using the result.
	pub fn pick_random_slot(&mut self) -> Option<EntityId> {
		self.entities.pick_random_slot(&mut self.rng)
	}

	/// Adds a system to the end of the run order.
	pub fn add_system<T: 'static + System>(&mut self, system: T) {
		self.systems.add(system);
	}

	/// Adds a closure-backed system to the end of the run order.
	pub fn register_system<F>(&mut self, name: impl Into<String>, signature: Signature, handler: F)
	where
		F: 'static + FnMut(EntityId, &mut SystemContext<'_>),
	{
		self.systems.add(FnSystem::new(name, signature, handler));
	}

	/// Like [`World::register_system`], with the signature taken from a tuple of component types.
	pub fn register_system_for<S, F>(&mut self, name: impl Into<String>, handler: F) -> EcsResult<Signature>
	where
		S: ComponentSet,
		F: 'static + FnMut(EntityId, &mut SystemContext<'_>),
	{
		let signature = self.signature::<S>()?;
		self.register_system(name, signature, handler);
		Ok(signature)
	}

	/// Queues structural changes to be applied at the end of the next tick.
	pub fn commands(&mut self) -> &mut CommandBuffer {
		&mut self.commands
	}

	/// Runs every system once, then applies the changes they queued.
	///
	/// # Errors
	/// If a queued change fails (a creation past capacity, a kind past the limit), the systems
	/// have already run and the commands before the failing one have taken effect. The tick is
	/// still counted and the rest of the queue is discarded.
	pub fn tick(&mut self) -> EcsResult<TickReport> {
		let visits = self.systems.run_tick(&self.entities, &mut self.components, &mut self.commands);
		self.ticks += 1;
		let commands = self.commands.apply(&mut self.entities, &mut self.components)?;

		tracing::trace!(tick = self.ticks, visits, commands, "tick complete");
		Ok(TickReport {
			tick: self.ticks,
			visits,
			commands,
		})
	}

	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	/// A structured dump of one entity.
	pub fn inspect(&self, entity: EntityId) -> EntityDump {
		EntityDump::capture(&self.entities, &self.components, entity)
	}

	/// Occupancy of the registry, the pools and the system list.
	pub fn stats(&self) -> WorldStats {
		WorldStats::capture(&self.entities, &self.components, &self.systems, self.ticks)
	}
}

impl Default for World {
	fn default() -> Self {
		Self::new()
	}
}
