//! Errors surfaced by the trait system.
//!
//! Misuse of the object API (double add, removing an absent trait, touching a
//! destroyed object) is not an error: those calls are no-ops. The variants below
//! are the terminal conditions, after which the caller should not retry.

use thiserror::Error;

/// Errors that can occur in the trait system.
#[derive(Error, Debug)]
pub enum TraitSystemError {
	/// A pool could not reserve a new block.
	#[error("out of memory while reserving a block of {slots} `{type_name}` slots")]
	OutOfMemory {
		/// The element type of the pool.
		type_name: &'static str,
		/// The number of slots in the block that failed.
		slots: usize,
	},

	/// A collider record named a shape outside the known set.
	#[error("unknown collider shape: {0}")]
	UnknownShape(String),

	/// An external record named a trait that is not registered.
	#[error("unknown trait: {0}")]
	UnknownTrait(String),

	/// An external record has no `name` field.
	#[error("external record has no trait name")]
	MissingName,

	/// An external record could not be decoded.
	#[error("malformed external record: {0}")]
	Malformed(#[from] serde_json::Error),

	/// The configuration is unusable.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Result type for trait system operations.
pub type Result<T> = std::result::Result<T, TraitSystemError>;
