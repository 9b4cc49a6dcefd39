//! Conversion between trait payloads and the records exchanged with the
//! persistence layer.
//!
//! A record is a flat JSON object whose field names follow the scene files
//! (`fov`, `shapeType`, `lockLinearX`, ...). When an object is written out
//! every record is tagged with a `name` field holding the trait name, which
//! is how [`TraitSystem::load_external`](crate::TraitSystem::load_external)
//! finds the store to load it into.

use serde::de::DeserializeOwned;
use crate::traits::Trait;
use crate::objects::ObjectId;
use serde_json::{Map, Value};
use crate::error::Result;
use serde::Serialize;

/// The field carrying the trait name in a tagged record.
pub const NAME_FIELD: &str = "name";

/// An opaque, non-owning reference to a resource held by an external
/// collaborator: a physics shape or body, a mesh, a material, a vehicle.
///
/// The trait system stores it and hands it back, nothing more. It is never
/// written to a record.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct ExternalRef(pub u64);

/// A payload that can be written to and read from an external record.
pub trait ExternalTrait: Sized {
	type Record: Serialize + DeserializeOwned;

	/// Describe the payload as a record.
	fn to_external(&self) -> Self::Record;

	/// Build a payload owned by `object` from a record.
	fn from_external(record: Self::Record, object: ObjectId) -> Result<Self>;
}

/// Serialize the record of `value` and tag it with the trait name.
pub fn to_tagged_value<T: Trait + ExternalTrait>(value: &T) -> Result<Value> {
	let record = serde_json::to_value(value.to_external())?;
	let mut map = match record {
		Value::Object(map) => map,
		Value::Null => Map::new(),
		other => {
			let mut map = Map::new();
			map.insert("value".to_string(), other);
			map
		},
	};

	map.insert(NAME_FIELD.to_string(), Value::String(T::NAME.to_string()));
	Ok(Value::Object(map))
}

/// The trait name of a tagged record.
pub fn record_name(record: &Value) -> Option<&str> {
	record.get(NAME_FIELD)?.as_str()
}
