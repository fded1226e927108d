//! Runtime identifiers for [Component](crate::components::Component) types and the
//! [signatures](Signature) built from them.
//!
//! [Component ids](ComponentId) are handed out by a
//! [ComponentTypeRegistry](crate::components::ComponentTypeRegistry) in registration order.
//! They are stable for the lifetime of a world but not between program runs.

use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::iter::FusedIterator;
use std::fmt;

/// The number of distinct component kinds a [Signature] can describe.
pub const MAX_COMPONENT_KINDS: usize = u32::BITS as usize;

/// A small integer identifying a registered component type.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct ComponentId {
	value: u8,
}

impl ComponentId {
	#[inline(always)]
	pub(crate) const fn new(value: u8) -> Self {
		Self { value }
	}

	#[inline(always)]
	pub const fn index(self) -> usize {
		self.value as usize
	}

	/// The single-bit [Signature] of this kind.
	#[inline(always)]
	pub const fn tag(self) -> Signature {
		Signature { bits: 1 << self.value }
	}
}

/// A set of component kinds, one bit per [ComponentId].
///
/// Used both as the per-entity tag bitmask and as the required set of a system or view.
#[derive(Default, Hash, Eq, PartialEq, Copy, Clone)]
pub struct Signature {
	bits: u32,
}

impl Signature {
	pub const EMPTY: Signature = Signature { bits: 0 };

	#[inline(always)]
	pub const fn from_bits(bits: u32) -> Self {
		Self { bits }
	}

	#[inline(always)]
	pub const fn bits(self) -> u32 {
		self.bits
	}

	#[must_use]
	pub const fn with(self, id: ComponentId) -> Self {
		Self { bits: self.bits | id.tag().bits }
	}

	#[must_use]
	pub const fn without(self, id: ComponentId) -> Self {
		Self { bits: self.bits & !id.tag().bits }
	}

	#[inline(always)]
	pub const fn has(self, id: ComponentId) -> bool {
		self.bits & id.tag().bits != 0
	}

	/// Whether every kind in `required` is also in `self`.
	#[inline(always)]
	pub const fn contains(self, required: Signature) -> bool {
		self.bits & required.bits == required.bits
	}

	pub const fn is_empty(self) -> bool {
		self.bits == 0
	}

	pub const fn len(self) -> usize {
		self.bits.count_ones() as usize
	}

	/// Iterate over the kinds in the set, lowest id first.
	pub fn iter(self) -> SignatureIter {
		SignatureIter { bits: self.bits }
	}
}

impl From<&[ComponentId]> for Signature {
	fn from(ids: &[ComponentId]) -> Self {
		ids.iter().fold(Signature::EMPTY, |signature, id| signature.with(*id))
	}
}

impl From<ComponentId> for Signature {
	fn from(id: ComponentId) -> Self {
		id.tag()
	}
}

impl BitOr for Signature {
	type Output = Signature;
	fn bitor(self, rhs: Self) -> Self::Output {
		Self { bits: self.bits | rhs.bits }
	}
}

impl BitOrAssign for Signature {
	fn bitor_assign(&mut self, rhs: Self) {
		self.bits |= rhs.bits;
	}
}

impl BitAnd for Signature {
	type Output = Signature;
	fn bitand(self, rhs: Self) -> Self::Output {
		Self { bits: self.bits & rhs.bits }
	}
}

impl IntoIterator for Signature {
	type Item = ComponentId;
	type IntoIter = SignatureIter;
	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl fmt::Debug for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Signature({:#b})", self.bits)
	}
}

/// Binary form, lowest kind rightmost, padded to at least eight digits.
impl fmt::Display for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:08b}", self.bits)
	}
}

/// Iterates over the [ComponentIds](ComponentId) of a [Signature].
#[derive(Clone)]
pub struct SignatureIter {
	bits: u32,
}

impl Iterator for SignatureIter {
	type Item = ComponentId;

	fn next(&mut self) -> Option<Self::Item> {
		if self.bits == 0 {
			return None;
		}
		let value = self.bits.trailing_zeros();
		self.bits &= self.bits - 1;
		Some(ComponentId::new(value as u8))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let len = self.bits.count_ones() as usize;
		(len, Some(len))
	}
}

impl ExactSizeIterator for SignatureIter {}
impl FusedIterator for SignatureIter {}
