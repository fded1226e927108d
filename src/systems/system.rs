use crate::systems::SystemContext;
use crate::entities::EntityId;
use crate::components::Signature;

/// Per-entity logic run once per tick over every live entity matching [`System::signature`].
pub trait System {
	fn name(&self) -> &str;

	/// The component kinds an entity must carry to be visited.
	fn signature(&self) -> Signature;

	/// Handles a single matching entity.
	///
	/// Every kind in [`System::signature`] is guaranteed to be present on `entity`.
	fn run(&mut self, entity: EntityId, ctx: &mut SystemContext<'_>);
}

/// A [System] backed by a closure.
pub struct FnSystem<F> {
	name: String,
	signature: Signature,
	handler: F,
}

impl<F> FnSystem<F>
where
	F: FnMut(EntityId, &mut SystemContext<'_>),
{
	pub fn new(name: impl Into<String>, signature: Signature, handler: F) -> Self {
		Self {
			name: name.into(),
			signature,
			handler,
		}
	}
}

impl<F> System for FnSystem<F>
where
	F: FnMut(EntityId, &mut SystemContext<'_>),
{
	fn name(&self) -> &str {
		&self.name
	}

	fn signature(&self) -> Signature {
		self.signature
	}

	fn run(&mut self, entity: EntityId, ctx: &mut SystemContext<'_>) {
		(self.handler)(entity, ctx)
	}
}
