use crate::data_structures::{BlockPool, SlotKey};
use crate::objects::{Object, ObjectId, ObjectIdMap};
use crate::error::Result;

/// Owns every live [Object].
///
/// Objects are allocated from a [BlockPool]; `dense` keeps them in creation
/// order and `index` resolves an [ObjectId] to its slot.
pub struct ObjectStore {
	next_id: u32,
	pool: BlockPool<Object>,
	dense: Vec<SlotKey>,
	index: ObjectIdMap<SlotKey>,
}

impl ObjectStore {
	pub(crate) fn new(block_len: usize) -> Self {
		Self {
			next_id: 0,
			pool: BlockPool::with_block_len(block_len),
			dense: Vec::new(),
			index: ObjectIdMap::default(),
		}
	}

	/// Creates a single [object](Object) with no traits attached.
	pub(crate) fn create(&mut self) -> Result<ObjectId> {
		let id = ObjectId(self.next_id + 1);
		let key = self.pool.new_element(Object::new(id))?;

		self.next_id = id.0;
		self.dense.push(key);
		self.index.insert(id, key);

		log::debug!("created object {}", id.0);
		Ok(id)
	}

	/// Releases the [object](Object) with the given id, keeping the creation order of the rest.
	pub(crate) fn remove(&mut self, id: ObjectId) -> Option<Object> {
		let key = self.index.remove(&id)?;
		if let Some(position) = self.dense.iter().position(|k| *k == key) {
			self.dense.remove(position);
		}

		let object = self.pool.delete_element(key);
		log::debug!("destroyed object {}", id.0);
		object
	}

	/// Drops every [object](Object). Ids keep counting from where they were.
	pub(crate) fn clear(&mut self) {
		self.pool.clear();
		self.dense.clear();
		self.index.clear();
	}

	pub fn get(&self, id: ObjectId) -> Option<&Object> {
		let key = self.index.get(&id)?;
		self.pool.get(*key)
	}

	pub(crate) fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
		let key = self.index.get(&id)?;
		self.pool.get_mut(*key)
	}

	pub fn contains(&self, id: ObjectId) -> bool {
		self.index.contains_key(&id)
	}

	/// Iterate over the live [objects](Object) in creation order.
	pub fn iter(&self) -> impl Iterator<Item = &Object> + '_ {
		self.dense.iter().filter_map(|key| self.pool.get(*key))
	}

	/// The ids of the live [objects](Object) in creation order.
	pub fn ids(&self) -> Vec<ObjectId> {
		self.iter().map(Object::id).collect()
	}

	pub fn len(&self) -> usize {
		self.dense.len()
	}

	pub fn is_empty(&self) -> bool {
		self.dense.is_empty()
	}

	/// The id the next created [object](Object) will receive.
	pub fn next_id(&self) -> ObjectId {
		ObjectId(self.next_id + 1)
	}

	pub fn pool(&self) -> &BlockPool<Object> {
		&self.pool
	}
}
