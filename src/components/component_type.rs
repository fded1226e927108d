use crate::components::ComponentId;
use std::hash::{Hash, Hasher};
use std::alloc::Layout;
use std::any::TypeId;
use std::fmt;

/// Plain data that can be attached to an [entity](crate::entities::EntityId).
///
/// Components are stored by value in untyped pools and overwritten without running any
/// destructor, hence the `Copy` bound. `Debug` is used by the world's inspection dumps.
/// Implement it with #\[derive([`Component`])], which uses the type's name as [`Component::NAME`].
pub trait Component
where
	Self: 'static + Copy + fmt::Debug,
{
	/// Display name used in diagnostics.
	const NAME: &'static str;
}

/// Runtime metadata describing a registered [Component] type.
#[derive(Clone, Copy)]
pub struct ComponentKind {
	id: ComponentId,
	name: &'static str,
	layout: Layout,
	type_id: TypeId,
	debug: unsafe fn(*const u8, &mut fmt::Formatter<'_>) -> fmt::Result,
}

impl ComponentKind {
	pub(crate) fn of<T: Component>(id: ComponentId) -> Self {
		Self {
			id,
			name: T::NAME,
			layout: Layout::new::<T>(),
			type_id: TypeId::of::<T>(),
			debug: debug_erased::<T>,
		}
	}

	pub const fn id(&self) -> ComponentId {
		self.id
	}

	pub const fn name(&self) -> &'static str {
		self.name
	}

	/// Size in bytes of one instance.
	pub const fn size(&self) -> usize {
		self.layout.size()
	}

	pub const fn layout(&self) -> Layout {
		self.layout
	}

	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	/// # Safety
	/// `ptr` must point to an initialized value of this kind's type.
	pub(crate) unsafe fn fmt_value(&self, ptr: *const u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		(self.debug)(ptr, f)
	}
}

unsafe fn debug_erased<T: Component>(ptr: *const u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	fmt::Debug::fmt(&*(ptr as *const T), f)
}

impl Eq for ComponentKind {}

impl PartialEq<Self> for ComponentKind {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id && self.type_id == other.type_id
	}
}

impl Hash for ComponentKind {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state)
	}
}

impl fmt::Debug for ComponentKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentKind")
			.field("id", &self.id.index())
			.field("name", &self.name)
			.field("size", &self.layout.size())
			.finish()
	}
}
