extern crate self as prototype_traits;

pub mod data_structures;
pub mod external;
pub mod objects;
pub mod traits;
mod context;
mod config;
mod error;

pub use context::{TraitSystem, TraitSystemHandle};
pub use error::{Result, TraitSystemError};
pub use config::TraitSystemConfig;

pub mod prelude {
	pub use crate::traits::*;
	pub use crate::config::TraitSystemConfig;
	pub use crate::external::{ExternalRef, ExternalTrait};
	pub use crate::context::{TraitSystem, TraitSystemHandle};
	pub use crate::error::TraitSystemError;
	pub use crate::objects::{NodeRef, Object, ObjectId, ObjectMut, ObjectRef, ObjectStore};
}

#[cfg(test)]
mod tests;
