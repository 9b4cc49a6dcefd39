//! [Objects](Object) are the identities traits get attached to.
//!
//! An [Object] holds no trait data: it carries an id, the mask of attached
//! traits and an optional reference to its scene-graph node. [ObjectRef] and
//! [ObjectMut] are the borrowed views through which an object and its traits
//! are read and changed.

mod object;
mod object_store;
mod object_view;

pub use object::*;
pub use object_store::*;
pub use object_view::*;

use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;

/// A map keyed by [ObjectId] that skips hashing.
pub type ObjectIdMap<V> = HashMap<ObjectId, V, BuildHasherDefault<NoHashHasher<u32>>>;
