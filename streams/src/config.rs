use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::memory::DEFAULT_CAPACITY;

/// Emitted when a `.toml` stream configuration cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Could not load the configuration file
	#[error("could not read configuration file: {0}")]
	File(#[from] std::io::Error),
	/// Configuration TOML contents could not be deserialized
	#[error("could not parse configuration: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("initial capacity must be positive, got {0}")]
	InvalidCapacity(usize),
}

/// Tunables for the memory streams, read from TOML:
///
/// ```toml
/// initial_capacity = 4096
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StreamConfig {
	/// Bytes a `MemoryWriteStream` allocates up front. Growth doubles from here.
	pub initial_capacity: usize,
}

impl Default for StreamConfig {
	fn default() -> Self {
		StreamConfig {
			initial_capacity: DEFAULT_CAPACITY,
		}
	}
}

impl StreamConfig {
	pub fn read_file<P: AsRef<Path>>(file_name: P) -> Result<StreamConfig, ConfigError> {
		std::fs::read_to_string(file_name)?.parse()
	}

	fn validate(self) -> Result<StreamConfig, ConfigError> {
		if self.initial_capacity == 0 {
			Err(ConfigError::InvalidCapacity(self.initial_capacity))
		} else {
			Ok(self)
		}
	}
}

impl FromStr for StreamConfig {
	type Err = ConfigError;

	fn from_str(contents: &str) -> Result<Self, Self::Err> {
		toml::from_str::<StreamConfig>(contents)?.validate()
	}
}
