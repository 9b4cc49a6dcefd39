use crate::traits::{Trait, TraitEvent, TraitHook, TraitHooks};
use crate::data_structures::{BlockPool, SlotKey};
use crate::objects::{Object, ObjectId, ObjectIdMap};
use std::marker::PhantomData;
use crate::error::Result;
use std::fmt;

/// A checked reference to a payload in a [TraitStore].
///
/// A handle stays valid while the payload it was taken from is attached,
/// including across a remove/re-add that recycles the same payload. Once the
/// payload has been compacted away by [`TraitStore::garbage_collect`] the
/// handle resolves to `None`, even if the slot has been given to another object.
pub struct TraitHandle<T> {
	object: ObjectId,
	slot: SlotKey,
	marker: PhantomData<fn() -> T>,
}

impl<T> TraitHandle<T> {
	pub fn object(&self) -> ObjectId {
		self.object
	}
}

impl<T> Clone for TraitHandle<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for TraitHandle<T> {}

impl<T> PartialEq for TraitHandle<T> {
	fn eq(&self, other: &Self) -> bool {
		(self.object == other.object) & (self.slot == other.slot)
	}
}

impl<T> Eq for TraitHandle<T> {}

impl<T> fmt::Debug for TraitHandle<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TraitHandle")
			.field("object", &self.object)
			.field("slot", &self.slot)
			.finish()
	}
}

/// Storage for every payload of one [Trait] type.
///
/// Payloads are allocated from a [BlockPool] and referenced from `dense` in
/// allocation order, each entry paired with the owning object. The store is
/// the authority on ownership: a payload overwritten through a mutable
/// reference gets its owner stamped back on the next mutable access. `live` maps each object that has the trait attached to its
/// dense index. Removing a trait only moves the entry to `garbage`; the dense
/// slot is erased by the next [`garbage_collect`](TraitStore::garbage_collect).
/// A live and a pending entry never share an object id.
pub struct TraitStore<T: Trait> {
	pool: BlockPool<T>,
	dense: Vec<(ObjectId, SlotKey)>,
	live: ObjectIdMap<usize>,
	garbage: ObjectIdMap<usize>,
	hooks: TraitHooks<T>,
	scratch: Vec<usize>,
}

impl<T: Trait> TraitStore<T> {
	/// Create a new [TraitStore].
	///
	/// # Arguments
	/// * `block_len` - The number of payloads per pool block
	/// * `dense_capacity` - The number of dense entries to reserve up front
	pub(crate) fn new(block_len: usize, dense_capacity: usize) -> Self {
		Self {
			pool: BlockPool::with_block_len(block_len),
			dense: Vec::with_capacity(dense_capacity),
			live: ObjectIdMap::default(),
			garbage: ObjectIdMap::default(),
			hooks: TraitHooks::new(),
			scratch: Vec::new(),
		}
	}

	/// Attach a payload to `object`, whose mask bit must already be set.
	///
	/// A payload still pending compaction for the same object is handed back
	/// without allocating and the [reuse](TraitEvent::Reuse) hook fires.
	/// Otherwise a default payload is allocated and the [add](TraitEvent::Add) hook fires.
	pub(crate) fn attach(&mut self, object: &Object) -> Result<TraitEvent> {
		let id = object.id();
		debug_assert!(!self.live.contains_key(&id), "{} attached twice to object {}", T::NAME, id.0);

		if let Some(index) = self.garbage.remove(&id) {
			self.live.insert(id, index);
			if let Some(value) = self.pool.get_mut(self.dense[index].1) {
				value.set_object(id);
				self.hooks.fire(TraitEvent::Reuse, object, value);
				value.set_object(id);
			}
			return Ok(TraitEvent::Reuse);
		}

		let mut value = T::default();
		value.set_object(id);

		let key = self.pool.new_element(value)?;
		self.dense.push((id, key));
		self.live.insert(id, self.dense.len() - 1);

		if let Some(value) = self.pool.get_mut(key) {
			self.hooks.fire(TraitEvent::Add, object, value);
			value.set_object(id);
		}
		Ok(TraitEvent::Add)
	}

	/// Detach the payload of `object`, whose mask bit must still be set.
	///
	/// The [remove](TraitEvent::Remove) hook sees the payload before anything
	/// changes. The payload stays in `dense` until the next compaction.
	pub(crate) fn detach(&mut self, object: &Object) -> bool {
		let id = object.id();
		let index = match self.live.get(&id) {
			Some(index) => *index,
			None => return false,
		};

		if let Some(value) = self.pool.get_mut(self.dense[index].1) {
			value.set_object(id);
			self.hooks.fire(TraitEvent::Remove, object, value);
			value.set_object(id);
		}

		self.live.remove(&id);
		self.garbage.insert(id, index);
		true
	}

	/// Release every payload pending compaction and close the gaps in `dense`.
	///
	/// Pending entries are erased from the highest dense index down, so each
	/// recorded index is still accurate when its turn comes. Every live index
	/// above an erased one is shifted down by one. Returns the number of
	/// payloads released.
	pub fn garbage_collect(&mut self) -> usize {
		if self.garbage.is_empty() {
			return 0;
		}

		let mut pending = std::mem::take(&mut self.scratch);
		pending.clear();
		pending.extend(self.garbage.drain().map(|(_, index)| index));
		pending.sort_unstable_by(|a, b| b.cmp(a));

		for &index in pending.iter() {
			for value in self.live.values_mut() {
				if *value > index {
					*value -= 1;
				}
			}

			let (_, key) = self.dense.remove(index);
			self.pool.delete_element(key);
		}

		let count = pending.len();
		self.scratch = pending;

		log::debug!("{}: compacted {} payloads, {} live", T::NAME, count, self.live.len());
		count
	}

	/// Gets a reference to the payload attached to `object`.
	pub fn get(&self, object: ObjectId) -> Option<&T> {
		let index = self.live.get(&object)?;
		self.pool.get(self.dense[*index].1)
	}

	/// Gets a mutable reference to the payload attached to `object`.
	pub fn get_mut(&mut self, object: ObjectId) -> Option<&mut T> {
		let index = self.live.get(&object)?;
		let value = self.pool.get_mut(self.dense[*index].1)?;
		value.set_object(object);
		Some(value)
	}

	/// Whether a payload is attached to `object`.
	pub fn contains(&self, object: ObjectId) -> bool {
		self.live.contains_key(&object)
	}

	/// Whether `object` has a detached payload awaiting compaction.
	pub fn is_pending(&self, object: ObjectId) -> bool {
		self.garbage.contains_key(&object)
	}

	/// Take a [TraitHandle] to the payload attached to `object`.
	pub fn handle(&self, object: ObjectId) -> Option<TraitHandle<T>> {
		let index = self.live.get(&object)?;
		Some(TraitHandle {
			object,
			slot: self.dense[*index].1,
			marker: PhantomData,
		})
	}

	/// Resolve a [TraitHandle], failing if its payload is no longer attached.
	pub fn resolve(&self, handle: TraitHandle<T>) -> Option<&T> {
		let index = self.live.get(&handle.object)?;
		if self.dense[*index].1 != handle.slot {
			return None;
		}
		self.pool.get(handle.slot)
	}

	/// Resolve a [TraitHandle] mutably, failing if its payload is no longer attached.
	pub fn resolve_mut(&mut self, handle: TraitHandle<T>) -> Option<&mut T> {
		let index = self.live.get(&handle.object)?;
		if self.dense[*index].1 != handle.slot {
			return None;
		}
		let value = self.pool.get_mut(handle.slot)?;
		value.set_object(handle.object);
		Some(value)
	}

	/// Iterate over the attached payloads in dense order.
	pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &T)> + '_ {
		self.dense
			.iter()
			.filter(|(object, _)| self.live.contains_key(object))
			.filter_map(|(object, key)| Some((*object, self.pool.get(*key)?)))
	}

	/// The number of attached payloads.
	pub fn len(&self) -> usize {
		self.live.len()
	}

	pub fn is_empty(&self) -> bool {
		self.live.is_empty()
	}

	/// The number of dense entries, pending ones included.
	pub fn dense_len(&self) -> usize {
		self.dense.len()
	}

	/// The dense entries in order, pending ones included, each with its owner.
	pub fn dense(&self) -> &[(ObjectId, SlotKey)] {
		&self.dense
	}

	/// The number of payloads awaiting compaction.
	pub fn garbage_len(&self) -> usize {
		self.garbage.len()
	}

	/// The object id to dense index map of attached payloads.
	pub fn live_index(&self) -> &ObjectIdMap<usize> {
		&self.live
	}

	/// The object id to dense index map of payloads awaiting compaction.
	pub fn garbage_index(&self) -> &ObjectIdMap<usize> {
		&self.garbage
	}

	pub fn pool(&self) -> &BlockPool<T> {
		&self.pool
	}

	pub(crate) fn set_hook(&mut self, event: TraitEvent, hook: TraitHook<T>) -> Option<TraitHook<T>> {
		self.hooks.set(event, hook)
	}

	pub(crate) fn clear_hook(&mut self, event: TraitEvent) -> Option<TraitHook<T>> {
		self.hooks.clear(event)
	}

	pub fn has_hook(&self, event: TraitEvent) -> bool {
		self.hooks.is_set(event)
	}

	/// Fire `event` for the payload attached to `object`, if any.
	pub(crate) fn dispatch(&mut self, event: TraitEvent, object: &Object) {
		let index = match self.live.get(&object.id()) {
			Some(index) => *index,
			None => return,
		};

		if let Some(value) = self.pool.get_mut(self.dense[index].1) {
			value.set_object(object.id());
			self.hooks.fire(event, object, value);
			value.set_object(object.id());
		}
	}
}
