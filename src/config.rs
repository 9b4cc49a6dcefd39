use crate::error::{Result, TraitSystemError};
use crate::data_structures::DEFAULT_BLOCK_LEN;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sizing parameters of a [TraitSystem](crate::TraitSystem).
///
/// Every field is optional when loaded from TOML:
/// ```toml
/// object_block_len = 256
/// trait_block_len = 64
/// dense_capacity = 1024
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitSystemConfig {
	/// Slots per block of the object pool.
	pub object_block_len: usize,
	/// Slots per block of every trait pool.
	pub trait_block_len: usize,
	/// Dense entries reserved up front by every trait store.
	pub dense_capacity: usize,
}

impl TraitSystemConfig {
	/// Parse and validate a configuration from a TOML document.
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let config: Self = toml::from_str(source).map_err(|error| {
			log::error!("failed to parse trait system configuration: {}", error);
			TraitSystemError::InvalidConfig(error.to_string())
		})?;

		config.validate()?;
		Ok(config)
	}

	/// Read, parse and validate a TOML configuration file.
	pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|error| {
			log::error!("failed to read {}: {}", path.display(), error);
			TraitSystemError::InvalidConfig(format!("{}: {}", path.display(), error))
		})?;

		Self::from_toml_str(&source)
	}

	/// Reject block lengths the pools cannot work with.
	pub fn validate(&self) -> Result<()> {
		let fields = [
			("object_block_len", self.object_block_len),
			("trait_block_len", self.trait_block_len),
		];

		for (name, value) in fields {
			if value < 2 {
				log::error!("invalid trait system configuration: {} = {}", name, value);
				return Err(TraitSystemError::InvalidConfig(format!(
					"`{}` must be at least 2, got {}",
					name, value
				)));
			}
		}
		Ok(())
	}
}

impl Default for TraitSystemConfig {
	fn default() -> Self {
		Self {
			object_block_len: DEFAULT_BLOCK_LEN,
			trait_block_len: DEFAULT_BLOCK_LEN,
			dense_capacity: 0,
		}
	}
}
