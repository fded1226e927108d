use crate::entities::{EntityId, EntitySlot, View};
use crate::components::{ComponentId, Signature};
use crate::error::{EcsError, EcsResult};
use rand::Rng;

/// The authoritative list of entity slots.
///
/// Identities are an index into the slot list plus a generation. Destroyed indices go on a
/// free list (a stack) and are handed out again, most recently freed first, with the
/// generation already moved on so stale handles stop resolving.
#[derive(Debug)]
pub struct EntityRegistry {
	capacity: usize,
	slots: Vec<EntitySlot>,
	free: Vec<u32>,
	live: usize,
}

impl EntityRegistry {
	/// Creates an empty registry that can hold up to `capacity` entities at once.
	pub(crate) fn with_capacity(capacity: usize) -> Self {
		Self {
			capacity,
			slots: Vec::new(),
			free: Vec::new(),
			live: 0,
		}
	}

	/// Creates a single [entity](EntityId) with an empty tag bitmask.
	///
	/// Fails with [EcsError::CapacityExceeded] when every slot is live.
	pub fn create(&mut self) -> EcsResult<EntityId> {
		let index = match self.free.pop() {
			Some(index) => index,
			None => {
				let index = self.slots.len();
				if index >= self.capacity {
					return Err(EcsError::CapacityExceeded {
						index,
						capacity: self.capacity,
					});
				}
				self.slots.push(EntitySlot::default());
				index as u32
			},
		};

		let slot = &mut self.slots[index as usize];
		slot.alive = true;
		slot.tags = Signature::EMPTY;
		self.live += 1;

		let id = EntityId::new(index, slot.generation);
		tracing::debug!(entity = %id, live = self.live, "created entity");
		Ok(id)
	}

	/// Destroys an [entity](EntityId): clears its tags, bumps the slot's generation
	/// and returns the index to the free list.
	///
	/// Invalid or stale ids are ignored. Returns whether anything was destroyed.
	pub fn destroy(&mut self, id: EntityId) -> bool {
		let slot = match self.resolve_mut(id) {
			None => return false,
			Some(slot) => slot,
		};

		slot.tags = Signature::EMPTY;
		slot.alive = false;
		slot.generation = slot.generation.wrapping_add(1);

		self.free.push(id.index());
		self.live -= 1;

		tracing::debug!(entity = %id, live = self.live, free = self.free.len(), "destroyed entity");
		true
	}

	/// The slot `id` refers to, or `None` if `id` is out of range, dead or stale.
	///
	/// This is the one liveness check every other lookup goes through.
	#[inline(always)]
	pub fn resolve(&self, id: EntityId) -> Option<&EntitySlot> {
		if !id.is_valid() {
			return None;
		}
		let slot = self.slots.get(id.index() as usize)?;
		(slot.alive && slot.generation == id.generation()).then_some(slot)
	}

	#[inline(always)]
	pub fn is_alive(&self, id: EntityId) -> bool {
		self.resolve(id).is_some()
	}

	/// The tag bitmask of a live entity.
	pub fn tags(&self, id: EntityId) -> Option<Signature> {
		self.resolve(id).map(|slot| slot.tags())
	}

	/// Every live entity whose tags contain `signature`, in ascending index order.
	pub fn view(&self, signature: Signature) -> View<'_> {
		View::new(&self.slots, signature)
	}

	/// Every live entity, in ascending index order.
	pub fn iter_live(&self) -> View<'_> {
		self.view(Signature::EMPTY)
	}

	/// Samples a slot index uniformly from the slots allocated so far.
	///
	/// The slot is **not** filtered by liveness: the returned id carries the slot's current
	/// generation, and callers must check [`is_alive`](Self::is_alive) before using it.
	/// Returns `None` only if no slot has ever been allocated.
	pub fn pick_random_slot<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<EntityId> {
		if self.slots.is_empty() {
			return None;
		}
		let index = rng.gen_range(0..self.slots.len());
		Some(EntityId::new(index as u32, self.slots[index].generation))
	}

	/// The raw slot at `index`, live or not.
	pub fn slot(&self, index: u32) -> Option<&EntitySlot> {
		self.slots.get(index as usize)
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Number of slots allocated so far, live or free.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	pub fn live_count(&self) -> usize {
		self.live
	}

	/// Number of indices waiting on the free list.
	pub fn free_count(&self) -> usize {
		self.free.len()
	}

	pub(crate) fn set_tag(&mut self, id: EntityId, kind: ComponentId) -> bool {
		match self.resolve_mut(id) {
			None => false,
			Some(slot) => {
				slot.tags = slot.tags.with(kind);
				true
			},
		}
	}

	pub(crate) fn clear_tag(&mut self, id: EntityId, kind: ComponentId) -> bool {
		match self.resolve_mut(id) {
			Some(slot) if slot.tags.has(kind) => {
				slot.tags = slot.tags.without(kind);
				true
			},
			_ => false,
		}
	}

	fn resolve_mut(&mut self, id: EntityId) -> Option<&mut EntitySlot> {
		if !id.is_valid() {
			return None;
		}
		let slot = self.slots.get_mut(id.index() as usize)?;
		(slot.alive && slot.generation == id.generation()).then_some(slot)
	}
}
