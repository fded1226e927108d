use crate::error::{EcsError, EcsResult};
use serde::{Deserialize, Serialize};

/// Number of entity slots preallocated when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 100_000;

/// Construction parameters for a [World](crate::World).
///
/// Capacity is fixed for the lifetime of the world: every component pool is allocated
/// with exactly this many slots the first time its type is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
	pub capacity: usize,
	/// Seed for the world's random slot sampler. Seeded from entropy when absent.
	pub seed: Option<u64>,
}

impl WorldConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(mut self, capacity: usize) -> Self {
		self.capacity = capacity;
		self
	}

	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Parses and validates a configuration from TOML text.
	///
	/// ```
	/// let config = slot_ecs::WorldConfig::from_toml_str("capacity = 64\nseed = 7").unwrap();
	/// assert_eq!(config.capacity, 64);
	/// ```
	pub fn from_toml_str(text: &str) -> EcsResult<Self> {
		let config: Self = toml::from_str(text).map_err(|e| EcsError::InvalidConfig(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> EcsResult<()> {
		if self.capacity == 0 {
			return Err(EcsError::InvalidConfig("capacity must be greater than zero".into()));
		}
		// Slot indices are u32 and u32::MAX is the "none" sentinel.
		if self.capacity >= u32::MAX as usize {
			return Err(EcsError::InvalidConfig(format!(
				"capacity {} does not fit in a 32-bit entity index",
				self.capacity
			)));
		}
		Ok(())
	}
}

impl Default for WorldConfig {
	fn default() -> Self {
		Self {
			capacity: DEFAULT_CAPACITY,
			seed: None,
		}
	}
}
