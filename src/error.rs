//! Errors raised by the world.
//!
//! Only capacity and configuration problems are errors. A stale [entity](crate::entities::EntityId)
//! or a missing [component](crate::components::Component) is reported as `None` by read operations,
//! since entities routinely disappear between the moment an id is captured and the moment it is used.

use crate::entities::EntityId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
	/// A slot index at or past the preallocated capacity was requested.
	#[error("capacity exceeded: slot {index} requested, capacity is {capacity}")]
	CapacityExceeded {
		/// The offending slot index.
		index: usize,
		/// The fixed capacity of the registry or pool.
		capacity: usize,
	},

	/// More distinct component types were registered than the signature bitmask can hold.
	#[error("cannot register component kind {name}: at most {max} kinds are supported")]
	UnknownComponentKind {
		/// Name of the component type that did not fit.
		name: &'static str,
		/// The bitmask width.
		max: usize,
	},

	/// A write targeted an entity that is not alive.
	#[error("{0} is not alive")]
	InvalidEntity(EntityId),

	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
}

pub type EcsResult<T> = Result<T, EcsError>;
