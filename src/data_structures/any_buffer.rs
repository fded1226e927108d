use crate::components::ComponentKind;
use crate::error::{EcsError, EcsResult};
use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::ptr::NonNull;
use std::any::TypeId;
use std::fmt;

/// A fixed-capacity, untyped buffer holding items of a single component type.
///
/// The buffer is allocated once and never moves, so addresses into it stay valid for its whole lifetime.
/// It does not keep track of which slots have been initialized: callers must only read slots
/// they have previously written. Items are never dropped, which is sound because components are `Copy`.
pub(crate) struct AnyBuffer {
	ptr: NonNull<u8>,
	layout: Layout,
	type_id: TypeId,
	type_size: usize,
	capacity: usize,
}

impl AnyBuffer {
	pub fn with_capacity(kind: &ComponentKind, capacity: usize) -> EcsResult<Self> {
		let item = kind.layout();
		let layout = item
			.size()
			.checked_mul(capacity)
			.and_then(|bytes| Layout::from_size_align(bytes, item.align()).ok())
			.ok_or_else(|| {
				EcsError::InvalidConfig(format!(
					"a pool of {} x {} ({} bytes each) does not fit in memory",
					capacity,
					kind.name(),
					item.size()
				))
			})?;

		let ptr = if layout.size() == 0 {
			dangling(item.align())
		} else {
			// SAFETY: `layout` has a non-zero size.
			let ptr = unsafe { alloc(layout) };
			NonNull::new(ptr).unwrap_or_else(|| handle_alloc_error(layout))
		};

		Ok(Self {
			ptr,
			layout,
			capacity,
			type_id: kind.type_id(),
			type_size: item.size(),
		})
	}

	/// Overwrites the item at `index` without reading or dropping the previous bytes.
	///
	/// # Safety
	/// - `T` must match the buffer's internal type.
	/// - `index` must be within the bounds of the buffer.
	pub unsafe fn write<T: 'static>(&mut self, index: usize, value: T) -> &mut T {
		let ptr = self.as_mut_ptr::<T>(index);
		std::ptr::write(ptr, value);
		&mut *ptr
	}

	/// # Safety
	/// - `T` must match the buffer's internal type.
	/// - `index` must be within the bounds of the buffer and hold an initialized value.
	pub unsafe fn get<T: 'static>(&self, index: usize) -> &T {
		debug_assert_eq!(self.type_id, TypeId::of::<T>(), "Buffer does not contain elements of type T");
		debug_assert!(index < self.capacity);
		&*(self.ptr.as_ptr() as *const T).add(index)
	}

	/// # Safety
	/// - `T` must match the buffer's internal type.
	/// - `index` must be within the bounds of the buffer and hold an initialized value.
	pub unsafe fn get_mut<T: 'static>(&mut self, index: usize) -> &mut T {
		&mut *self.as_mut_ptr::<T>(index)
	}

	/// # Safety
	/// - `T` must match the buffer's internal type.
	/// - `index` must be within the bounds of the buffer.
	pub unsafe fn as_mut_ptr<T: 'static>(&mut self, index: usize) -> *mut T {
		debug_assert_eq!(self.type_id, TypeId::of::<T>(), "Buffer does not contain elements of type T");
		debug_assert!(index < self.capacity);
		(self.ptr.as_ptr() as *mut T).add(index)
	}

	/// Untyped address of the item at `index`, or `None` if out of bounds.
	pub fn item_ptr(&self, index: usize) -> Option<*const u8> {
		if index >= self.capacity {
			return None;
		}
		// SAFETY: `index` is in bounds, so the offset stays inside the allocation.
		Some(unsafe { self.ptr.as_ptr().add(index * self.type_size) as *const u8 })
	}

	/// Total bytes reserved by the buffer.
	pub fn byte_len(&self) -> usize {
		self.layout.size()
	}
}

impl Drop for AnyBuffer {
	fn drop(&mut self) {
		if self.layout.size() != 0 {
			// SAFETY: allocated in `with_capacity` with this exact layout.
			unsafe { dealloc(self.ptr.as_ptr(), self.layout) }
		}
	}
}

impl fmt::Debug for AnyBuffer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AnyBuffer")
			.field("capacity", &self.capacity)
			.field("type_size", &self.type_size)
			.finish()
	}
}

fn dangling(align: usize) -> NonNull<u8> {
	NonNull::new(align as *mut u8).unwrap_or(NonNull::dangling())
}
