//! [Traits](Trait) are the behaviours that can be attached to an
//! [object](crate::objects::Object): cameras, transforms, colliders and so on.
//!
//! Each trait type lives in its own [TraitStore], which keeps the payloads in
//! a block pool, resolves an object id to a dense index, and defers the
//! compaction of removed payloads until [`TraitStore::garbage_collect`] runs.
//! Lifecycle [hooks](TraitHooks) let the host observe every transition.

mod hooks;
mod registry;
mod trait_store;

mod camera;
mod collider;
mod mesh_renderer;
mod rigidbody;
mod script;
mod transform;
mod vehicle_chasis;

pub use hooks::*;
pub use registry::*;
pub use trait_store::*;

pub use camera::*;
pub use collider::*;
pub use mesh_renderer::*;
pub use rigidbody::*;
pub use script::*;
pub use transform::*;
pub use vehicle_chasis::*;

pub use prototype_traits_derive::Trait;

use crate::objects::ObjectId;

/// A payload type that can be attached to an [object](crate::objects::Object).
///
/// Implemented through #\[derive([`Trait`](derive@Trait))], which reads the
/// `#[trait_index(N)]` attribute and the `object` owner field.
pub trait Trait: 'static + Default {
	/// The bit position of this trait in an object's mask.
	const INDEX: u32;
	/// The name used in external records.
	const NAME: &'static str;
	/// The single-bit mask of this trait.
	const MASK: u64 = 1 << Self::INDEX;

	/// The [object](crate::objects::Object) this payload is attached to.
	fn object(&self) -> ObjectId;

	/// **Should not be called from user code.** Set by the trait store on attach.
	fn set_object(&mut self, object: ObjectId);
}
