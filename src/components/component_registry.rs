use crate::components::{Component, ComponentId, ComponentKind, Signature, MAX_COMPONENT_KINDS};
use crate::error::{EcsError, EcsResult};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use std::any::TypeId;

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

/// Maps [Component] types to their [ComponentId] and [ComponentKind] metadata.
///
/// Ids are assigned once per type, in registration order, and never change for the
/// lifetime of the registry. The registry owns no component data.
#[derive(Default)]
pub struct ComponentTypeRegistry {
	kinds: Vec<ComponentKind>,
	by_type: HashMap<TypeId, ComponentId, Hasher>,
}

impl ComponentTypeRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `T`, or returns its existing id if it's already known.
	pub fn register<T: Component>(&mut self) -> EcsResult<ComponentId> {
		match self.lookup::<T>() {
			Some(id) => Ok(id),
			None => {
				let kind = self.prepare::<T>()?;
				Ok(self.insert(kind))
			},
		}
	}

	/// Get the [ComponentId] of `T` without registering it.
	#[inline(always)]
	pub fn lookup<T: Component>(&self) -> Option<ComponentId> {
		self.by_type.get(&TypeId::of::<T>()).copied()
	}

	pub fn get(&self, id: ComponentId) -> Option<&ComponentKind> {
		self.kinds.get(id.index())
	}

	pub fn len(&self) -> usize {
		self.kinds.len()
	}

	pub fn is_empty(&self) -> bool {
		self.kinds.is_empty()
	}

	/// Iterate over the registered kinds in id order.
	pub fn iter(&self) -> impl Iterator<Item = &ComponentKind> + '_ {
		self.kinds.iter()
	}

	/// The names of the registered kinds present in `signature`.
	pub fn names(&self, signature: Signature) -> impl Iterator<Item = &'static str> + '_ {
		signature.iter().filter_map(|id| self.get(id)).map(|kind| kind.name())
	}

	/// The signature containing every registered kind.
	pub fn all(&self) -> Signature {
		self.kinds.iter().fold(Signature::EMPTY, |signature, kind| signature.with(kind.id()))
	}

	/// Builds the metadata the next registration of `T` would receive, without committing it.
	pub(crate) fn prepare<T: Component>(&self) -> EcsResult<ComponentKind> {
		let index = self.kinds.len();
		if index >= MAX_COMPONENT_KINDS {
			return Err(EcsError::UnknownComponentKind {
				name: T::NAME,
				max: MAX_COMPONENT_KINDS,
			});
		}
		Ok(ComponentKind::of::<T>(ComponentId::new(index as u8)))
	}

	pub(crate) fn insert(&mut self, kind: ComponentKind) -> ComponentId {
		debug_assert_eq!(kind.id().index(), self.kinds.len());
		let id = kind.id();

		self.by_type.insert(kind.type_id(), id);
		self.kinds.push(kind);

		tracing::debug!(component = kind.name(), id = id.index(), tag = %id.tag(), "registered component kind");
		id
	}
}
