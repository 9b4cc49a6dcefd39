use crate::traits::{RegisteredTrait, TraitEvent, TraitHandle, TraitStore, TraitStores, ALL_TRAITS};
use crate::objects::{NodeRef, Object, ObjectId, ObjectMut, ObjectRef, ObjectStore};
use crate::error::{Result, TraitSystemError};
use crate::config::TraitSystemConfig;
use crate::external::record_name;
use serde_json::Value;
use paste::paste;

/// A container for [objects](Object) and the [traits](crate::traits::Trait) attached to them.
///
/// Every object is referenced through a unique [ObjectId]. Each trait type is
/// kept in its own [TraitStore]; the system keeps an object's mask and the
/// stores in step, routes lifecycle events to the registered hooks and
/// reclaims detached payloads when objects are destroyed.
pub struct TraitSystem {
	config: TraitSystemConfig,
	objects: ObjectStore,
	stores: TraitStores,
}

/// An owned, opaque [TraitSystem] that a host keeps while plugin code is reloaded.
pub struct TraitSystemHandle(Box<TraitSystem>);

impl TraitSystemHandle {
	/// Leak the handle into a raw pointer that can cross a library boundary.
	pub fn into_raw(self) -> *mut TraitSystem {
		Box::into_raw(self.0)
	}

	/// Rebuild a handle from [`into_raw`](TraitSystemHandle::into_raw).
	///
	/// # Safety
	/// `raw` must come from [`into_raw`](TraitSystemHandle::into_raw) and must
	/// not be used again after this call.
	pub unsafe fn from_raw(raw: *mut TraitSystem) -> Self {
		Self(Box::from_raw(raw))
	}
}

impl TraitSystem {
	/// Create a new [TraitSystem] with the default configuration.
	pub fn new() -> Self {
		let config = TraitSystemConfig::default();
		Self {
			objects: ObjectStore::new(config.object_block_len),
			stores: TraitStores::new(&config),
			config,
		}
	}

	/// Create a new [TraitSystem] with the specified configuration.
	pub fn with_config(config: TraitSystemConfig) -> Result<Self> {
		config.validate()?;
		Ok(Self {
			objects: ObjectStore::new(config.object_block_len),
			stores: TraitStores::new(&config),
			config,
		})
	}

	pub fn config(&self) -> &TraitSystemConfig {
		&self.config
	}

	/// Give up ownership of the system for the duration of a plugin reload.
	pub fn into_handle(self) -> TraitSystemHandle {
		TraitSystemHandle(Box::new(self))
	}

	/// Take back a system handed off with [`into_handle`](TraitSystem::into_handle).
	pub fn from_handle(handle: TraitSystemHandle) -> Self {
		*handle.0
	}

	/// Creates a single [object](Object) with no traits attached.
	pub fn create_object(&mut self) -> Result<ObjectId> {
		self.objects.create()
	}

	/// Destroy an [object](Object): detach all of its traits, compact every
	/// trait store and release the object.
	/// Returns `false` if the object does not exist.
	pub fn destroy(&mut self, id: ObjectId) -> bool {
		let object = match self.objects.get_mut(id) {
			Some(object) => object,
			None => return false,
		};

		self.stores.detach_mask(object, ALL_TRAITS);
		self.stores.garbage_collect_all();
		self.objects.remove(id).is_some()
	}

	/// Destroy every [object](Object). Remove hooks fire for each attached trait.
	pub fn clear_objects(&mut self) {
		for id in self.objects.ids() {
			if let Some(object) = self.objects.get_mut(id) {
				self.stores.detach_mask(object, ALL_TRAITS);
			}
		}

		let reclaimed = self.stores.garbage_collect_all();
		log::debug!("cleared {} objects, reclaimed {} payloads", self.objects.len(), reclaimed);
		self.objects.clear();
	}

	pub fn objects(&self) -> &ObjectStore {
		&self.objects
	}

	pub fn contains(&self, id: ObjectId) -> bool {
		self.objects.contains(id)
	}

	pub fn object(&self, id: ObjectId) -> Option<ObjectRef<'_>> {
		let object = self.objects.get(id)?;
		Some(ObjectRef::new(object, &self.stores))
	}

	pub fn object_mut(&mut self, id: ObjectId) -> Option<ObjectMut<'_>> {
		let object = self.objects.get_mut(id)?;
		Some(ObjectMut::new(object, &mut self.stores))
	}

	/// The raw trait mask of an object.
	pub fn traits(&self, id: ObjectId) -> Option<u64> {
		self.objects.get(id).map(Object::traits)
	}

	/// Attach every trait in `mask` that the object does not have yet.
	/// Returns the mask of the traits that were attached, `0` if the object does not exist.
	pub fn add(&mut self, id: ObjectId, mask: u64) -> Result<u64> {
		match self.object_mut(id) {
			Some(mut object) => object.add(mask),
			None => Ok(0),
		}
	}

	/// Detach every trait in `mask` that the object has.
	/// Returns the mask of the traits that were detached.
	pub fn remove(&mut self, id: ObjectId, mask: u64) -> u64 {
		self.object_mut(id).map_or(0, |mut object| object.remove(mask))
	}

	/// Whether the object has every trait in `mask`.
	pub fn has(&self, id: ObjectId, mask: u64) -> bool {
		self.objects.get(id).map_or(false, |object| object.has(mask))
	}

	pub fn add_trait<T: RegisteredTrait>(&mut self, id: ObjectId) -> Result<bool> {
		match self.object_mut(id) {
			Some(mut object) => object.add_trait::<T>(),
			None => Ok(false),
		}
	}

	pub fn remove_trait<T: RegisteredTrait>(&mut self, id: ObjectId) -> bool {
		self.object_mut(id).map_or(false, |mut object| object.remove_trait::<T>())
	}

	pub fn has_trait<T: RegisteredTrait>(&self, id: ObjectId) -> bool {
		self.has(id, T::MASK)
	}

	pub fn get_trait<T: RegisteredTrait>(&self, id: ObjectId) -> Option<&T> {
		T::store(&self.stores).get(id)
	}

	pub fn get_trait_mut<T: RegisteredTrait>(&mut self, id: ObjectId) -> Option<&mut T> {
		T::store_mut(&mut self.stores).get_mut(id)
	}

	/// Compact the store of `T`, returning the number of payloads reclaimed.
	pub fn garbage_collect<T: RegisteredTrait>(&mut self) -> usize {
		T::store_mut(&mut self.stores).garbage_collect()
	}

	/// Compact every trait store.
	pub fn garbage_collect_all(&mut self) -> usize {
		self.stores.garbage_collect_all()
	}

	/// Read-only access to the store of `T`.
	pub fn store<T: RegisteredTrait>(&self) -> &TraitStore<T> {
		T::store(&self.stores)
	}

	pub fn handle<T: RegisteredTrait>(&self, id: ObjectId) -> Option<TraitHandle<T>> {
		T::store(&self.stores).handle(id)
	}

	/// Resolve a [TraitHandle]. Yields `None` once its payload has been reclaimed.
	pub fn resolve<T: RegisteredTrait>(&self, handle: TraitHandle<T>) -> Option<&T> {
		T::store(&self.stores).resolve(handle)
	}

	pub fn resolve_mut<T: RegisteredTrait>(&mut self, handle: TraitHandle<T>) -> Option<&mut T> {
		T::store_mut(&mut self.stores).resolve_mut(handle)
	}

	/// Register the hook of `T` for `event`, replacing the previous one.
	/// Returns `true` if a hook was replaced.
	pub fn set_hook<T: RegisteredTrait>(
		&mut self, event: TraitEvent, hook: impl FnMut(&Object, &mut T) + 'static,
	) -> bool {
		T::store_mut(&mut self.stores).set_hook(event, Box::new(hook)).is_some()
	}

	/// Unregister the hook of `T` for `event`. Returns `true` if one was set.
	pub fn clear_hook<T: RegisteredTrait>(&mut self, event: TraitEvent) -> bool {
		T::store_mut(&mut self.stores).clear_hook(event).is_some()
	}

	/// Fire the log hook of every trait attached to the object.
	pub fn log(&mut self, id: ObjectId) -> bool {
		match self.object_mut(id) {
			Some(mut object) => {
				object.log();
				true
			},
			None => false,
		}
	}

	/// Fire the edit hook of every trait attached to the object.
	pub fn on_edit(&mut self, id: ObjectId) -> bool {
		match self.object_mut(id) {
			Some(mut object) => {
				object.on_edit();
				true
			},
			None => false,
		}
	}

	pub fn parent_node(&self, id: ObjectId) -> Option<NodeRef> {
		self.objects.get(id)?.parent_node()
	}

	pub fn set_parent_node(&mut self, id: ObjectId, parent: Option<NodeRef>) -> bool {
		match self.object_mut(id) {
			Some(mut object) => {
				object.set_parent_node(parent);
				true
			},
			None => false,
		}
	}

	/// One record per trait attached to the object, each tagged with the trait name.
	pub fn to_external(&self, id: ObjectId) -> Result<Vec<Value>> {
		match self.object(id) {
			Some(object) => object.to_external(),
			None => Ok(Vec::new()),
		}
	}

	/// Attach the trait named by the record's `name` field and fill it from the record.
	///
	/// The trait is attached before the record is decoded, so it stays attached
	/// with its default payload if decoding fails.
	/// Returns `false` if the object does not exist.
	pub fn load_external(&mut self, id: ObjectId, record: &Value) -> Result<bool> {
		let name = match record_name(record) {
			Some(name) => name,
			None => {
				log::error!("object {}: external record has no trait name", id.value());
				return Err(TraitSystemError::MissingName);
			},
		};

		match self.object_mut(id) {
			Some(mut object) => object.load_external(name, record).map(|_| true),
			None => Ok(false),
		}
	}
}

macro_rules! event_hooks {
	($($event: ident $variant: ident),*) => {
		paste! {
			impl TraitSystem {
				$(
					pub fn [<set_ $event _hook>]<T: RegisteredTrait>(
						&mut self, hook: impl FnMut(&Object, &mut T) + 'static,
					) -> bool {
						self.set_hook::<T>(TraitEvent::$variant, hook)
					}

					pub fn [<clear_ $event _hook>]<T: RegisteredTrait>(&mut self) -> bool {
						self.clear_hook::<T>(TraitEvent::$variant)
					}
				)*
			}
		}
	};
}

event_hooks!(add Add, reuse Reuse, remove Remove, log Log, edit Edit);

impl Default for TraitSystem {
	fn default() -> Self {
		Self::new()
	}
}
