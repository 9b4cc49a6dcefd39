use crate::traits::{
	Camera, Collider, MeshRenderer, Rigidbody, Script, Trait, TraitEvent, TraitStore, Transform,
	VehicleChasis,
};
use crate::error::{Result, TraitSystemError};
use crate::config::TraitSystemConfig;
use crate::external::ExternalTrait;
use std::collections::HashMap;
use crate::objects::Object;
use lazy_static::lazy_static;
use serde::Deserialize;
use serde_json::Value;

/// Invoke `$mac!` with every registered trait as a `Type field` pair, in index order.
macro_rules! for_each_trait {
	($mac: ident) => {
		$mac! {
			Camera camera,
			Collider collider,
			MeshRenderer mesh_renderer,
			Rigidbody rigidbody,
			Script script,
			Transform transform,
			VehicleChasis vehicle_chasis
		}
	};
}

pub(crate) use for_each_trait;

/// A [Trait] that has a store in [TraitStores] and an external record format.
pub trait RegisteredTrait: Trait + ExternalTrait {
	fn store(stores: &TraitStores) -> &TraitStore<Self>;
	fn store_mut(stores: &mut TraitStores) -> &mut TraitStore<Self>;
}

macro_rules! trait_stores {
	($($ty: ident $field: ident),*) => {
		/// One [TraitStore] per registered trait.
		pub struct TraitStores {
			$(pub(crate) $field: TraitStore<$ty>,)*
		}

		impl TraitStores {
			pub(crate) fn new(config: &TraitSystemConfig) -> Self {
				Self {
					$($field: TraitStore::new(config.trait_block_len, config.dense_capacity),)*
				}
			}

			/// Attach every trait in `mask` that `object` does not have yet.
			/// Returns the mask of the traits that were attached.
			///
			/// If any trait fails to attach, the ones attached by this call are
			/// detached again before the error is returned.
			pub(crate) fn attach_mask(&mut self, object: &mut Object, mask: u64) -> Result<u64> {
				let mut attached = 0;
				$(
					if (mask & $ty::MASK) != 0 {
						match self.attach::<$ty>(object) {
							Ok(true) => attached |= $ty::MASK,
							Ok(false) => {},
							Err(error) => {
								self.detach_mask(object, attached);
								return Err(error);
							},
						}
					}
				)*
				Ok(attached)
			}

			/// Detach every trait in `mask` that `object` has.
			/// Returns the mask of the traits that were detached.
			pub(crate) fn detach_mask(&mut self, object: &mut Object, mask: u64) -> u64 {
				let mut detached = 0;
				$(
					if (mask & $ty::MASK) != 0 && self.detach::<$ty>(object) {
						detached |= $ty::MASK;
					}
				)*
				detached
			}

			/// Fire `event` on every trait attached to `object`, in index order.
			pub(crate) fn dispatch_all(&mut self, event: TraitEvent, object: &Object) {
				$(
					if object.has($ty::MASK) {
						self.$field.dispatch(event, object);
					}
				)*
			}

			pub(crate) fn garbage_collect_all(&mut self) -> usize {
				0 $(+ self.$field.garbage_collect())*
			}

			/// One tagged record per trait attached to `object`, in index order.
			pub(crate) fn to_external(&self, object: &Object) -> Result<Vec<Value>> {
				let mut records = Vec::new();
				$(
					if object.has($ty::MASK) {
						if let Some(value) = self.$field.get(object.id()) {
							records.push(crate::external::to_tagged_value(value)?);
						}
					}
				)*
				Ok(records)
			}

			pub(crate) fn load_external(&mut self, object: &mut Object, name: &str, record: &Value) -> Result<()> {
				$(
					if name == $ty::NAME {
						return self.load::<$ty>(object, record);
					}
				)*

				log::error!("object {}: unknown trait `{}`", object.id().value(), name);
				Err(TraitSystemError::UnknownTrait(name.to_string()))
			}
		}

		$(
			impl RegisteredTrait for $ty {
				#[inline(always)]
				fn store(stores: &TraitStores) -> &TraitStore<Self> {
					&stores.$field
				}

				#[inline(always)]
				fn store_mut(stores: &mut TraitStores) -> &mut TraitStore<Self> {
					&mut stores.$field
				}
			}
		)*

		/// The number of registered traits.
		pub const TRAIT_COUNT: usize = [$($ty::NAME),*].len();

		/// The names of the registered traits, in index order.
		pub const TRAIT_NAMES: [&str; TRAIT_COUNT] = [$($ty::NAME),*];

		/// The mask with every registered trait set.
		pub const ALL_TRAITS: u64 = 0 $(| $ty::MASK)*;

		lazy_static! {
			static ref MASKS_BY_NAME: HashMap<&'static str, u64> = {
				let mut masks = HashMap::with_capacity(TRAIT_COUNT);
				$(masks.insert($ty::NAME, $ty::MASK);)*
				masks
			};
		}
	};
}

for_each_trait!(trait_stores);

/// The mask of the trait with the given name, as it appears in external records.
pub fn mask_from_name(name: &str) -> Option<u64> {
	MASKS_BY_NAME.get(name).copied()
}

impl TraitStores {
	/// Attach `T` to `object` unless it is already attached.
	///
	/// The mask bit is set before the store runs the add or reuse hook and is
	/// rolled back if the store could not allocate.
	pub(crate) fn attach<T: RegisteredTrait>(&mut self, object: &mut Object) -> Result<bool> {
		if object.has(T::MASK) {
			return Ok(false);
		}

		object.flag_mut().add(T::MASK);
		if let Err(error) = T::store_mut(self).attach(object) {
			object.flag_mut().remove(T::MASK);
			return Err(error);
		}
		Ok(true)
	}

	/// Detach `T` from `object` if it is attached.
	/// The remove hook runs while the mask bit is still set.
	pub(crate) fn detach<T: RegisteredTrait>(&mut self, object: &mut Object) -> bool {
		if !object.has(T::MASK) {
			return false;
		}

		T::store_mut(self).detach(object);
		object.flag_mut().remove(T::MASK);
		true
	}

	/// Attach `T` and overwrite its payload with the decoded `record`.
	///
	/// The trait stays attached if the record turns out to be unusable.
	pub(crate) fn load<T: RegisteredTrait>(&mut self, object: &mut Object, record: &Value) -> Result<()> {
		self.attach::<T>(object)?;

		let id = object.id();
		let value = T::Record::deserialize(record)
			.map_err(TraitSystemError::from)
			.and_then(|record| T::from_external(record, id))
			.map_err(|error| {
				log::error!("object {}: failed to load {} record: {}", id.value(), T::NAME, error);
				error
			})?;

		if let Some(payload) = T::store_mut(self).get_mut(id) {
			*payload = value;
			payload.set_object(id);
		}
		Ok(())
	}
}
