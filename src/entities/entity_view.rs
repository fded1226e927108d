use crate::entities::{EntityId, EntitySlot};
use crate::components::Signature;
use std::iter::FusedIterator;

/// A lazy, ascending-index traversal of the live entities whose tags contain a [Signature].
///
/// The slots are checked as the cursor reaches them, so a view reflects every creation and
/// destruction that happened before it was obtained. Obtain a fresh view to restart.
#[derive(Clone)]
pub struct View<'l> {
	slots: &'l [EntitySlot],
	signature: Signature,
	cursor: usize,
}

impl<'l> View<'l> {
	pub(crate) fn new(slots: &'l [EntitySlot], signature: Signature) -> Self {
		Self {
			slots,
			signature,
			cursor: 0,
		}
	}

	pub fn signature(&self) -> Signature {
		self.signature
	}
}

impl Iterator for View<'_> {
	type Item = EntityId;

	fn next(&mut self) -> Option<Self::Item> {
		while let Some(slot) = self.slots.get(self.cursor) {
			let index = self.cursor;
			self.cursor += 1;

			if slot.alive && slot.tags.contains(self.signature) {
				return Some(EntityId::new(index as u32, slot.generation));
			}
		}
		None
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(0, Some(self.slots.len().saturating_sub(self.cursor)))
	}
}

impl FusedIterator for View<'_> {}
