use crate::error::{Result, TraitSystemError};
use std::any::type_name;

/// Default number of slots per block.
pub const DEFAULT_BLOCK_LEN: usize = 100;

/// A generation-checked reference to a slot of a [BlockPool].
///
/// The generation is bumped every time the slot is returned to the pool,
/// so a key kept past [`BlockPool::delete_element`] never resolves to
/// whatever value later reuses the slot.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct SlotKey {
	index: u32,
	generation: u32,
}

impl SlotKey {
	#[inline(always)]
	pub const fn index(&self) -> u32 {
		self.index
	}

	#[inline(always)]
	pub const fn generation(&self) -> u32 {
		self.generation
	}
}

struct Slot<T> {
	generation: u32,
	state: SlotState<T>,
}

enum SlotState<T> {
	/// Handed out by `allocate` but not constructed yet, or destroyed but not deallocated yet.
	Reserved,
	Occupied(T),
	/// Member of the free list.
	Vacant { next: Option<u32> },
}

/// A typed fixed-block allocator.
///
/// Slots are carved out of blocks of `block_len` elements. A freed slot is
/// pushed onto an intrusive free list stored inside the vacant slot itself and
/// is handed out again before any new block is requested. Blocks are only
/// released by [`clear`](BlockPool::clear) or when the pool is dropped.
pub struct BlockPool<T> {
	block_len: usize,
	blocks: Vec<Vec<Slot<T>>>,
	free: Option<u32>,
	live: usize,
}

impl<T> BlockPool<T> {
	/// Create a new [BlockPool] using blocks of [DEFAULT_BLOCK_LEN] slots.
	pub fn new() -> Self {
		Self::with_block_len(DEFAULT_BLOCK_LEN)
	}

	/// Create a new [BlockPool] with the specified block length.
	/// Callers validate the length through [TraitSystemConfig](crate::TraitSystemConfig).
	///
	/// # Arguments
	/// * `block_len` - The number of slots per block, at least 2
	pub(crate) fn with_block_len(block_len: usize) -> Self {
		assert!(block_len >= 2, "Block length must be at least 2");
		Self {
			block_len,
			blocks: Vec::new(),
			free: None,
			live: 0,
		}
	}

	/// Reserve a slot.
	/// Recycles the most recently freed slot if there is one, otherwise bumps the
	/// cursor of the current block, allocating a new block when it is exhausted.
	pub fn allocate(&mut self) -> Result<SlotKey> {
		if let Some(index) = self.free {
			let slot = self.slot_mut(index).expect("free list points outside the pool");
			let next = match slot.state {
				SlotState::Vacant { next } => next,
				_ => unreachable!("free list points to a slot in use"),
			};

			slot.state = SlotState::Reserved;
			let key = SlotKey {
				index,
				generation: slot.generation,
			};

			self.free = next;
			log::trace!("{}: recycled slot {}", type_name::<T>(), index);
			return Ok(key);
		}

		let exhausted = self.blocks.last().map_or(true, |block| block.len() == self.block_len);
		if exhausted {
			self.allocate_block()?;
		}

		let block_index = self.blocks.len() - 1;
		let block = &mut self.blocks[block_index];
		let index = block_index * self.block_len + block.len();
		block.push(Slot {
			generation: 0,
			state: SlotState::Reserved,
		});

		Ok(SlotKey {
			index: index as u32,
			generation: 0,
		})
	}

	/// Return a reserved slot to the free list.
	/// The call is ignored if `key` is stale or still holds a value.
	pub fn deallocate(&mut self, key: SlotKey) {
		let next = self.free;
		let slot = match self.slot_mut(key.index) {
			Some(slot) if slot.generation == key.generation => slot,
			_ => return,
		};

		if !matches!(slot.state, SlotState::Reserved) {
			return;
		}

		slot.generation = slot.generation.wrapping_add(1);
		slot.state = SlotState::Vacant { next };
		self.free = Some(key.index);
	}

	/// Place `value` into a reserved slot.
	/// Returns the value back if the slot is not reserved under `key`.
	pub fn construct(&mut self, key: SlotKey, value: T) -> std::result::Result<(), T> {
		let slot = match self.slot_mut(key.index) {
			Some(slot) if slot.generation == key.generation => slot,
			_ => return Err(value),
		};

		match slot.state {
			SlotState::Reserved => {
				slot.state = SlotState::Occupied(value);
				self.live += 1;
				Ok(())
			},
			_ => Err(value),
		}
	}

	/// Move the value out of an occupied slot, leaving it reserved.
	pub fn destroy(&mut self, key: SlotKey) -> Option<T> {
		let slot = match self.slot_mut(key.index) {
			Some(slot) if slot.generation == key.generation => slot,
			_ => return None,
		};

		match std::mem::replace(&mut slot.state, SlotState::Reserved) {
			SlotState::Occupied(value) => {
				self.live -= 1;
				Some(value)
			},
			state => {
				slot.state = state;
				None
			},
		}
	}

	/// Allocate a slot and move `value` into it.
	pub fn new_element(&mut self, value: T) -> Result<SlotKey> {
		let key = self.allocate()?;
		if self.construct(key, value).is_err() {
			unreachable!("freshly allocated slot was not reserved");
		}
		Ok(key)
	}

	/// Move the value out of its slot and return the slot to the free list.
	pub fn delete_element(&mut self, key: SlotKey) -> Option<T> {
		let value = self.destroy(key)?;
		self.deallocate(key);
		Some(value)
	}

	pub fn get(&self, key: SlotKey) -> Option<&T> {
		match self.slot(key.index)? {
			Slot {
				generation,
				state: SlotState::Occupied(value),
			} if *generation == key.generation => Some(value),
			_ => None,
		}
	}

	pub fn get_mut(&mut self, key: SlotKey) -> Option<&mut T> {
		match self.slot_mut(key.index)? {
			Slot {
				generation,
				state: SlotState::Occupied(value),
			} if *generation == key.generation => Some(value),
			_ => None,
		}
	}

	/// Drop every value and release every block.
	pub fn clear(&mut self) {
		self.blocks.clear();
		self.free = None;
		self.live = 0;
	}

	/// The number of blocks currently held.
	pub fn block_count(&self) -> usize {
		self.blocks.len()
	}

	/// The number of slots per block.
	pub fn block_len(&self) -> usize {
		self.block_len
	}

	/// The number of constructed values.
	pub fn live_count(&self) -> usize {
		self.live
	}

	/// The total number of slots across all blocks.
	pub fn capacity(&self) -> usize {
		self.blocks.len() * self.block_len
	}

	#[inline(never)]
	fn allocate_block(&mut self) -> Result<()> {
		let out_of_memory = || {
			log::error!(
				"{}: failed to reserve a block of {} slots",
				type_name::<T>(),
				self.block_len
			);
			TraitSystemError::OutOfMemory {
				type_name: type_name::<T>(),
				slots: self.block_len,
			}
		};

		let end = (self.blocks.len() + 1).checked_mul(self.block_len);
		if end.map_or(true, |end| end > u32::MAX as usize) {
			return Err(out_of_memory());
		}

		let mut block = Vec::new();
		block.try_reserve_exact(self.block_len).map_err(|_| out_of_memory())?;
		self.blocks.try_reserve(1).map_err(|_| out_of_memory())?;
		self.blocks.push(block);

		log::debug!("{}: allocated block {}", type_name::<T>(), self.blocks.len());
		Ok(())
	}

	#[inline(always)]
	fn slot(&self, index: u32) -> Option<&Slot<T>> {
		let index = index as usize;
		self.blocks.get(index / self.block_len)?.get(index % self.block_len)
	}

	#[inline(always)]
	fn slot_mut(&mut self, index: u32) -> Option<&mut Slot<T>> {
		let index = index as usize;
		self.blocks.get_mut(index / self.block_len)?.get_mut(index % self.block_len)
	}
}

impl<T> Default for BlockPool<T> {
	fn default() -> Self {
		Self::new()
	}
}
