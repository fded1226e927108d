use crate::systems::{CommandBuffer, System, SystemContext};
use crate::components::{ComponentStore, Signature};
use crate::entities::EntityRegistry;

/// An ordered list of [systems](System).
#[derive(Default)]
pub struct SystemRegistry {
	systems: Vec<Box<dyn System>>,
}

impl SystemRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a system. Systems run in the order they were added;
	/// the same logic may be added more than once.
	pub fn add<T: 'static + System>(&mut self, system: T) {
		tracing::debug!(system = system.name(), signature = %system.signature(), "registered system");
		self.systems.push(Box::new(system));
	}

	pub fn len(&self) -> usize {
		self.systems.len()
	}

	pub fn is_empty(&self) -> bool {
		self.systems.is_empty()
	}

	/// The name and signature of every system, in run order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, Signature)> + '_ {
		self.systems.iter().map(|s| (s.name(), s.signature()))
	}

	/// Runs every system once over its matching entities.
	///
	/// Systems run one after another in registration order, each over a fresh view in
	/// ascending index order. Structural changes requested by handlers are recorded in
	/// `commands` and left for the caller to apply once the pass is over.
	///
	/// Returns the total number of handler invocations.
	pub(crate) fn run_tick(
		&mut self, entities: &EntityRegistry, components: &mut ComponentStore, commands: &mut CommandBuffer,
	) -> usize {
		let mut visits = 0;

		for system in self.systems.iter_mut() {
			let mut ctx = SystemContext::new(entities, components, commands);
			let mut visited = 0;

			for entity in entities.view(system.signature()) {
				system.run(entity, &mut ctx);
				visited += 1;
			}

			tracing::trace!(system = system.name(), visited, "system pass complete");
			visits += visited;
		}

		visits
	}
}
