//! Plain-data snapshots of a [World](crate::World) for debugging and logging.
//!
//! Snapshots copy everything they need, so they can outlive the borrow they were taken from.
//! Their `Display` output is one line per item:
//!
//! ```text
//! Entity{3:1 00000011}
//! 	|Position { x: 1.0, y: 0.0, z: 0.0 }
//! 	|Velocity { x: 1.0, y: 0.0, z: 0.0 }
//! 	*----------
//! ```

use crate::components::{ComponentId, ComponentStore, Signature};
use crate::entities::{EntityId, EntityRegistry};
use crate::systems::SystemRegistry;
use std::fmt;

/// One attached component, formatted with its `Debug` implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDump {
	pub name: &'static str,
	pub value: String,
}

/// The state of a single entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDump {
	pub id: EntityId,
	pub alive: bool,
	pub tags: Signature,
	/// Attached components, lowest kind first.
	pub components: Vec<ComponentDump>,
}

impl EntityDump {
	pub(crate) fn capture(entities: &EntityRegistry, store: &ComponentStore, id: EntityId) -> Self {
		let tags = match entities.tags(id) {
			None => {
				return Self {
					id,
					alive: false,
					tags: Signature::EMPTY,
					components: Vec::new(),
				}
			},
			Some(tags) => tags,
		};

		let components = tags
			.iter()
			.filter_map(|kind| {
				let name = store.kinds().get(kind)?.name();
				let value = store.debug_value(entities, id, kind)?;
				Some(ComponentDump { name, value })
			})
			.collect();

		Self {
			id,
			alive: true,
			tags,
			components,
		}
	}

	pub fn component(&self, name: &str) -> Option<&ComponentDump> {
		self.components.iter().find(|c| c.name == name)
	}
}

impl fmt::Display for EntityDump {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if !self.alive {
			return writeln!(f, "{} dead", self.id);
		}

		writeln!(f, "Entity{{{}:{} {}}}", self.id.index(), self.id.generation(), self.tags)?;
		for component in &self.components {
			writeln!(f, "\t|{}", component.value)?;
		}
		writeln!(f, "\t*----------")
	}
}

/// Occupancy of one component pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolInfo {
	pub id: ComponentId,
	pub name: &'static str,
	pub tag: Signature,
	pub component_size: usize,
	pub total_bytes: usize,
	/// Live entities currently carrying this kind.
	pub occupancy: usize,
}

impl PoolInfo {
	/// Reserved size in megabytes (10^6 bytes).
	pub fn megabytes(&self) -> f64 {
		self.total_bytes as f64 / 1_000_000.0
	}
}

impl fmt::Display for PoolInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ComponentPool{{{} {:.1}MB {}}}", self.name, self.megabytes(), self.tag)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
	pub capacity: usize,
	/// Slots allocated so far, live or free.
	pub slots: usize,
	pub live: usize,
	pub free: usize,
}

impl fmt::Display for RegistryStats {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Entities{{{} live {} free {} slots / {}}}",
			self.live, self.free, self.slots, self.capacity
		)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
	pub name: String,
	pub signature: Signature,
}

impl fmt::Display for SystemInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "System{{{} {}}}", self.name, self.signature)
	}
}

/// A snapshot of the whole world.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldStats {
	pub entities: RegistryStats,
	/// One entry per registered kind, in id order.
	pub pools: Vec<PoolInfo>,
	/// In run order.
	pub systems: Vec<SystemInfo>,
	pub ticks: u64,
}

impl WorldStats {
	pub(crate) fn capture(
		entities: &EntityRegistry, store: &ComponentStore, systems: &SystemRegistry, ticks: u64,
	) -> Self {
		let mut occupancy = vec![0usize; store.kinds().len()];
		for id in entities.iter_live() {
			let tags = entities.tags(id).unwrap_or_default();
			for kind in tags {
				if let Some(count) = occupancy.get_mut(kind.index()) {
					*count += 1;
				}
			}
		}

		let pools = store
			.kinds()
			.iter()
			.map(|kind| PoolInfo {
				id: kind.id(),
				name: kind.name(),
				tag: kind.id().tag(),
				component_size: kind.size(),
				total_bytes: store.pool_bytes(kind.id()).unwrap_or(0),
				occupancy: occupancy[kind.id().index()],
			})
			.collect();

		let systems = systems
			.iter()
			.map(|(name, signature)| SystemInfo {
				name: name.to_owned(),
				signature,
			})
			.collect();

		Self {
			entities: RegistryStats {
				capacity: entities.capacity(),
				slots: entities.len(),
				live: entities.live_count(),
				free: entities.free_count(),
			},
			pools,
			systems,
			ticks,
		}
	}

	/// Bytes reserved across every pool.
	pub fn total_bytes(&self) -> usize {
		self.pools.iter().map(|pool| pool.total_bytes).sum()
	}
}

impl fmt::Display for WorldStats {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "{}", self.entities)?;
		for pool in &self.pools {
			writeln!(f, "{}", pool)?;
		}
		for system in &self.systems {
			writeln!(f, "{}", system)?;
		}
		writeln!(f, "Ticks{{{}}}", self.ticks)
	}
}
