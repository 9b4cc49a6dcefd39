use crate::traits::{
	Camera, Collider, MeshRenderer, Rigidbody, Script, Transform, VehicleChasis, for_each_trait,
	RegisteredTrait, TraitEvent, TraitHandle, TraitStores,
};
use crate::objects::{NodeRef, Object, ObjectId};
use crate::error::Result;
use serde_json::Value;
use paste::paste;

/// A read-only view of an [Object] and its traits.
#[derive(Copy, Clone)]
pub struct ObjectRef<'a> {
	object: &'a Object,
	stores: &'a TraitStores,
}

impl<'a> ObjectRef<'a> {
	pub(crate) fn new(object: &'a Object, stores: &'a TraitStores) -> Self {
		Self { object, stores }
	}

	#[inline(always)]
	pub fn id(&self) -> ObjectId {
		self.object.id()
	}

	/// The raw mask of attached traits.
	#[inline(always)]
	pub fn traits(&self) -> u64 {
		self.object.traits()
	}

	/// Whether every trait in `mask` is attached.
	#[inline(always)]
	pub fn has(&self, mask: u64) -> bool {
		self.object.has(mask)
	}

	pub fn has_any(&self, mask: u64) -> bool {
		self.object.has_any(mask)
	}

	pub fn parent_node(&self) -> Option<NodeRef> {
		self.object.parent_node()
	}

	pub fn has_trait<T: RegisteredTrait>(&self) -> bool {
		self.object.has(T::MASK)
	}

	pub fn get<T: RegisteredTrait>(&self) -> Option<&'a T> {
		if !self.object.has(T::MASK) {
			return None;
		}
		T::store(self.stores).get(self.object.id())
	}

	pub fn handle<T: RegisteredTrait>(&self) -> Option<TraitHandle<T>> {
		T::store(self.stores).handle(self.object.id())
	}

	/// One tagged record per attached trait.
	pub fn to_external(&self) -> Result<Vec<Value>> {
		self.stores.to_external(self.object)
	}
}

/// A mutable view of an [Object] and its traits.
///
/// Adding and removing traits through this view keeps the object's mask and
/// the trait stores in step and fires the registered hooks.
pub struct ObjectMut<'a> {
	object: &'a mut Object,
	stores: &'a mut TraitStores,
}

impl<'a> ObjectMut<'a> {
	pub(crate) fn new(object: &'a mut Object, stores: &'a mut TraitStores) -> Self {
		Self { object, stores }
	}

	/// Reborrow as a read-only [ObjectRef].
	pub fn view(&self) -> ObjectRef<'_> {
		ObjectRef::new(self.object, self.stores)
	}

	#[inline(always)]
	pub fn id(&self) -> ObjectId {
		self.object.id()
	}

	#[inline(always)]
	pub fn traits(&self) -> u64 {
		self.object.traits()
	}

	#[inline(always)]
	pub fn has(&self, mask: u64) -> bool {
		self.object.has(mask)
	}

	pub fn has_any(&self, mask: u64) -> bool {
		self.object.has_any(mask)
	}

	/// Attach every trait in `mask` that is not attached yet.
	/// Returns the mask of the traits that were attached.
	pub fn add(&mut self, mask: u64) -> Result<u64> {
		self.stores.attach_mask(self.object, mask)
	}

	/// Detach every trait in `mask` that is attached.
	/// Returns the mask of the traits that were detached.
	pub fn remove(&mut self, mask: u64) -> u64 {
		self.stores.detach_mask(self.object, mask)
	}

	/// Attach `T`. Returns `false` if it was already attached.
	pub fn add_trait<T: RegisteredTrait>(&mut self) -> Result<bool> {
		self.stores.attach::<T>(self.object)
	}

	/// Detach `T`. Returns `false` if it was not attached.
	pub fn remove_trait<T: RegisteredTrait>(&mut self) -> bool {
		self.stores.detach::<T>(self.object)
	}

	pub fn has_trait<T: RegisteredTrait>(&self) -> bool {
		self.object.has(T::MASK)
	}

	pub fn get<T: RegisteredTrait>(&self) -> Option<&T> {
		if !self.object.has(T::MASK) {
			return None;
		}
		T::store(self.stores).get(self.object.id())
	}

	pub fn get_mut<T: RegisteredTrait>(&mut self) -> Option<&mut T> {
		if !self.object.has(T::MASK) {
			return None;
		}
		T::store_mut(self.stores).get_mut(self.object.id())
	}

	pub fn handle<T: RegisteredTrait>(&self) -> Option<TraitHandle<T>> {
		T::store(self.stores).handle(self.object.id())
	}

	/// Compact the store of `T`. This reclaims the detached payloads of every
	/// object, not only this one.
	pub fn garbage_collect<T: RegisteredTrait>(&mut self) -> usize {
		T::store_mut(self.stores).garbage_collect()
	}

	/// Fire the [log](TraitEvent::Log) hook of every attached trait.
	pub fn log(&mut self) {
		self.stores.dispatch_all(TraitEvent::Log, self.object);
	}

	/// Fire the [edit](TraitEvent::Edit) hook of every attached trait.
	pub fn on_edit(&mut self) {
		self.stores.dispatch_all(TraitEvent::Edit, self.object);
	}

	pub fn parent_node(&self) -> Option<NodeRef> {
		self.object.parent_node()
	}

	pub fn set_parent_node(&mut self, parent: Option<NodeRef>) {
		self.object.set_parent_node(parent);
	}

	/// Attach the trait named by the record's `name` field and fill it from the record.
	pub fn load_external(&mut self, name: &str, record: &Value) -> Result<()> {
		self.stores.load_external(self.object, name, record)
	}

	pub fn to_external(&self) -> Result<Vec<Value>> {
		self.stores.to_external(self.object)
	}
}

macro_rules! named_accessors {
	($($ty: ident $field: ident),*) => {
		paste! {
			impl<'a> ObjectRef<'a> {
				$(
					pub fn [<has_ $field _trait>](&self) -> bool {
						self.has_trait::<$ty>()
					}

					pub fn [<get_ $field _trait>](&self) -> Option<&'a $ty> {
						self.get::<$ty>()
					}
				)*
			}

			impl<'a> ObjectMut<'a> {
				$(
					pub fn [<add_ $field _trait>](&mut self) -> Result<bool> {
						self.add_trait::<$ty>()
					}

					pub fn [<remove_ $field _trait>](&mut self) -> bool {
						self.remove_trait::<$ty>()
					}

					pub fn [<has_ $field _trait>](&self) -> bool {
						self.has_trait::<$ty>()
					}

					pub fn [<get_ $field _trait>](&self) -> Option<&$ty> {
						self.get::<$ty>()
					}

					pub fn [<get_ $field _trait_mut>](&mut self) -> Option<&mut $ty> {
						self.get_mut::<$ty>()
					}

					pub fn [<garbage_collect_ $field _trait_memory>](&mut self) -> usize {
						self.garbage_collect::<$ty>()
					}

					pub fn [<$field _handle>](&self) -> Option<TraitHandle<$ty>> {
						self.handle::<$ty>()
					}
				)*
			}
		}
	};
}

for_each_trait!(named_accessors);
