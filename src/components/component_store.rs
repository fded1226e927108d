use crate::components::{Component, ComponentId, ComponentKind, ComponentSet, ComponentTypeRegistry, Signature};
use crate::error::{EcsError, EcsResult};
use crate::entities::{EntityId, EntityRegistry};
use crate::data_structures::AnyBuffer;
use std::fmt;
use paste::paste;

/// Owns one fixed-capacity pool per registered [component](Component) type.
///
/// A pool is addressed by [`EntityId::index`] only. Whether the bytes at that index are a
/// live component is decided by the entity's tag bitmask in the [EntityRegistry]:
/// the pools themselves track nothing.
/// The registry-taking operations are crate-private, so a store is only ever read through the
/// registry it was paired with by its [World](crate::World).
pub struct ComponentStore {
	capacity: usize,
	kinds: ComponentTypeRegistry,
	pools: Vec<AnyBuffer>,
}

impl ComponentStore {
	/// Creates an empty store whose pools will each hold `capacity` components.
	pub(crate) fn with_capacity(capacity: usize) -> Self {
		Self {
			capacity,
			kinds: ComponentTypeRegistry::new(),
			pools: Vec::new(),
		}
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// The registry mapping component types to ids.
	pub fn kinds(&self) -> &ComponentTypeRegistry {
		&self.kinds
	}

	/// Registers `T` and allocates its pool at full capacity.
	/// Does nothing but return the id if `T` is already registered.
	pub fn register<T: Component>(&mut self) -> EcsResult<ComponentId> {
		if let Some(id) = self.kinds.lookup::<T>() {
			return Ok(id);
		}

		let kind = self.kinds.prepare::<T>()?;
		let pool = AnyBuffer::with_capacity(&kind, self.capacity)?;

		tracing::debug!(
			component = kind.name(),
			bytes = pool.byte_len(),
			tag = %kind.id().tag(),
			"allocated component pool"
		);

		self.pools.push(pool);
		Ok(self.kinds.insert(kind))
	}

	/// The combined [Signature] of a tuple of component types, registering them as needed.
	pub fn signature_of<S: ComponentSet>(&mut self) -> EcsResult<Signature> {
		S::register(self)
	}

	/// Writes `value` into `T`'s pool at the entity's slot and sets `T`'s bit on the entity.
	///
	/// Any previous `T` at that slot is overwritten in place.
	/// Fails with [EcsError::InvalidEntity] if `id` is not alive and with
	/// [EcsError::CapacityExceeded] if its index does not fit in the pool.
	pub(crate) fn assign<T: Component>(
		&mut self, entities: &mut EntityRegistry, id: EntityId, value: T,
	) -> EcsResult<&mut T> {
		if !entities.is_alive(id) {
			return Err(EcsError::InvalidEntity(id));
		}

		let index = id.index() as usize;
		if index >= self.capacity {
			return Err(EcsError::CapacityExceeded {
				index,
				capacity: self.capacity,
			});
		}

		// Only registered once the write is known to go through.
		let kind = self.register::<T>()?;
		entities.set_tag(id, kind);
		tracing::trace!(entity = %id, component = T::NAME, "assigned component");

		// SAFETY: the pool at `kind` was created for `T` and `index` is below its capacity.
		unsafe { Ok(self.pools[kind.index()].write(index, value)) }
	}

	/// Gets a reference to the `T` attached to `id`.
	///
	/// Returns `None` if the entity is not alive or doesn't carry `T`.
	pub(crate) fn get<T: Component>(&self, entities: &EntityRegistry, id: EntityId) -> Option<&T> {
		let kind = self.present::<T>(entities, id)?;
		// SAFETY: the bit is only ever set by `assign`, which wrote a `T` at this in-bounds index.
		unsafe { Some(self.pools[kind.index()].get::<T>(id.index() as usize)) }
	}

	/// Gets a mutable reference to the `T` attached to `id`.
	pub(crate) fn get_mut<T: Component>(&mut self, entities: &EntityRegistry, id: EntityId) -> Option<&mut T> {
		let kind = self.present::<T>(entities, id)?;
		// SAFETY: see `get`.
		unsafe { Some(self.pools[kind.index()].get_mut::<T>(id.index() as usize)) }
	}

	/// Gets mutable references to several distinct components of one entity at once.
	///
	/// # Panics
	/// If the same component type appears more than once in `S`.
	pub(crate) fn get_many_mut<S: FetchMut>(&mut self, entities: &EntityRegistry, id: EntityId) -> Option<S::Output<'_>> {
		let tags = entities.resolve(id)?.tags();
		let index = id.index() as usize;
		if index >= self.capacity {
			return None;
		}
		S::fetch_mut(self, index, tags)
	}

	/// Whether the live entity `id` carries a `T`.
	pub(crate) fn has<T: Component>(&self, entities: &EntityRegistry, id: EntityId) -> bool {
		self.present::<T>(entities, id).is_some()
	}

	/// Detaches `T` from `id` by clearing its bit. The pool bytes are left as they are.
	///
	/// Returns whether a component was actually detached.
	pub(crate) fn remove<T: Component>(&mut self, entities: &mut EntityRegistry, id: EntityId) -> bool {
		match self.kinds.lookup::<T>() {
			None => false,
			Some(kind) => entities.clear_tag(id, kind),
		}
	}

	/// Debug representation of the component of kind `kind` at the entity's slot,
	/// or `None` if the entity is not alive or doesn't carry that kind.
	pub(crate) fn debug_value(&self, entities: &EntityRegistry, id: EntityId, kind: ComponentId) -> Option<String> {
		let slot = entities.resolve(id)?;
		if !slot.tags().has(kind) {
			return None;
		}

		let ptr = self.pools.get(kind.index())?.item_ptr(id.index() as usize)?;
		let kind = self.kinds.get(kind)?;
		Some(format!("{:?}", ErasedValue { kind, ptr }))
	}

	/// Total bytes reserved by the pool of `kind`.
	pub fn pool_bytes(&self, kind: ComponentId) -> Option<usize> {
		self.pools.get(kind.index()).map(|pool| pool.byte_len())
	}

	#[inline(always)]
	fn present<T: Component>(&self, entities: &EntityRegistry, id: EntityId) -> Option<ComponentId> {
		if id.index() as usize >= self.capacity {
			return None;
		}
		let slot = entities.resolve(id)?;
		let kind = self.kinds.lookup::<T>()?;
		slot.tags().has(kind).then_some(kind)
	}
}

impl fmt::Debug for ComponentStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentStore")
			.field("capacity", &self.capacity)
			.field("kinds", &self.kinds.iter().collect::<Vec<_>>())
			.finish()
	}
}

struct ErasedValue<'l> {
	kind: &'l ComponentKind,
	ptr: *const u8,
}

impl fmt::Debug for ErasedValue<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// SAFETY: constructed only for slots whose tag bit is set, so the value is initialized.
		unsafe { self.kind.fmt_value(self.ptr, f) }
	}
}

/// A tuple of distinct [Component] types that can be borrowed mutably together.
///
/// Implemented for tuples of up to eight components.
pub trait FetchMut {
	type Output<'a>;

	/// Borrows every member at `index`, or returns `None` if `tags` lacks one of them.
	fn fetch_mut(store: &mut ComponentStore, index: usize, tags: Signature) -> Option<Self::Output<'_>>;
}

macro_rules! impl_fetch_mut {
    ($($t: ident),*) => {
        paste! {
            impl<$($t: Component),*> FetchMut for ($($t,)*) {
                type Output<'a> = ($(&'a mut $t,)*);

                fn fetch_mut(store: &mut ComponentStore, index: usize, tags: Signature) -> Option<Self::Output<'_>> {
                    $(let [<$t:lower _id>] = store.kinds.lookup::<$t>()?;)*

                    let ids = [$([<$t:lower _id>]),*];
                    for (i, id) in ids.iter().enumerate() {
                        assert!(!ids[..i].contains(id), "A component type can only be fetched once per call");
                    }

                    $(
                        if !tags.has([<$t:lower _id>]) {
                            return None;
                        }
                    )*

                    // SAFETY: every id is distinct, so each pointer targets a different pool,
                    // and every tag bit is set, so each slot holds an initialized value.
                    unsafe {
                        $(let [<$t:lower>] = store.pools[[<$t:lower _id>].index()].as_mut_ptr::<$t>(index);)*
                        Some(($(&mut *[<$t:lower>],)*))
                    }
                }
            }
        }
    };
}

impl_fetch_mut!(T0);
impl_fetch_mut!(T0, T1);
impl_fetch_mut!(T0, T1, T2);
impl_fetch_mut!(T0, T1, T2, T3);
impl_fetch_mut!(T0, T1, T2, T3, T4);
impl_fetch_mut!(T0, T1, T2, T3, T4, T5);
impl_fetch_mut!(T0, T1, T2, T3, T4, T5, T6);
impl_fetch_mut!(T0, T1, T2, T3, T4, T5, T6, T7);
