use crate::components::Signature;
use std::fmt;

/// A handle to an entity: a slot index plus the generation the slot had when the entity was created.
///
/// Once the entity is destroyed its slot's generation moves on, so every outstanding copy
/// of the handle stops resolving, even after the slot is reused.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub struct EntityId {
	index: u32,
	generation: u32,
}

impl EntityId {
	/// A handle that never refers to an entity.
	pub const NONE: EntityId = EntityId {
		index: u32::MAX,
		generation: 0,
	};

	#[inline(always)]
	pub const fn new(index: u32, generation: u32) -> Self {
		Self { index, generation }
	}

	#[inline(always)]
	pub const fn index(self) -> u32 {
		self.index
	}

	#[inline(always)]
	pub const fn generation(self) -> u32 {
		self.generation
	}

	/// False only for [EntityId::NONE]. A valid id may still be stale.
	#[inline(always)]
	pub const fn is_valid(self) -> bool {
		self.index != u32::MAX
	}
}

impl Default for EntityId {
	fn default() -> Self {
		Self::NONE
	}
}

impl fmt::Display for EntityId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.is_valid() {
			true => write!(f, "Entity{{{}:{}}}", self.index, self.generation),
			false => f.write_str("Entity{none}"),
		}
	}
}

/// Per-index bookkeeping owned by the [EntityRegistry](crate::entities::EntityRegistry).
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntitySlot {
	pub(crate) generation: u32,
	pub(crate) tags: Signature,
	pub(crate) alive: bool,
}

impl EntitySlot {
	pub const fn generation(&self) -> u32 {
		self.generation
	}

	/// The kinds currently attached. Always empty for a free slot.
	pub const fn tags(&self) -> Signature {
		self.tags
	}

	pub const fn is_alive(&self) -> bool {
		self.alive
	}
}
