use crate::data_structures::{BlockPool, DEFAULT_BLOCK_LEN};

#[test]
pub fn sequential_allocation() {
	let mut pool = BlockPool::with_block_len(4);

	for i in 0..10u32 {
		let key = pool.new_element(i).unwrap();
		assert_eq!(key.index(), i, "Slots are not handed out in order");
		assert_eq!(key.generation(), 0, "Fresh slot has a non-zero generation");
	}

	assert_eq!(pool.block_count(), 3, "Block count does not match expected count");
	assert_eq!(pool.capacity(), 12, "Capacity does not match expected capacity");
	assert_eq!(pool.live_count(), 10, "Live count does not match expected count");
}

#[test]
pub fn default_block_len() {
	let pool = BlockPool::<u8>::new();
	assert_eq!(pool.block_len(), DEFAULT_BLOCK_LEN);
	assert_eq!(pool.block_count(), 0, "Blocks must be allocated lazily");
}

#[test]
pub fn free_list_is_lifo() {
	let mut pool = BlockPool::with_block_len(8);
	let a = pool.new_element('a').unwrap();
	let b = pool.new_element('b').unwrap();
	let _c = pool.new_element('c').unwrap();

	assert_eq!(pool.delete_element(b), Some('b'));
	assert_eq!(pool.delete_element(a), Some('a'));

	let first = pool.allocate().unwrap();
	let second = pool.allocate().unwrap();
	assert_eq!(first.index(), a.index(), "Most recently freed slot was not reused first");
	assert_eq!(second.index(), b.index(), "Free list lost a slot");
	assert_eq!(pool.block_count(), 1, "Recycling slots allocated a new block");
}

#[test]
pub fn stale_keys_do_not_resolve() {
	let mut pool = BlockPool::with_block_len(2);
	let old = pool.new_element(1).unwrap();
	pool.delete_element(old);

	let new = pool.new_element(2).unwrap();
	assert_eq!(old.index(), new.index(), "Freed slot was not recycled");
	assert_ne!(old.generation(), new.generation(), "Generation was not bumped");
	assert_eq!(pool.get(old), None, "Stale key resolved to a recycled slot");
	assert_eq!(pool.get(new), Some(&2));
	assert_eq!(pool.delete_element(old), None, "Stale key deleted a live value");
	assert_eq!(pool.live_count(), 1);
}

#[test]
pub fn construct_and_destroy() {
	let mut pool = BlockPool::with_block_len(2);
	let key = pool.allocate().unwrap();

	assert_eq!(pool.get(key), None, "Reserved slot resolved to a value");
	assert_eq!(pool.construct(key, 7), Ok(()));
	assert_eq!(pool.construct(key, 8), Err(8), "Occupied slot was constructed twice");

	pool.deallocate(key);
	assert_eq!(pool.get(key), Some(&7), "Occupied slot was returned to the free list");

	assert_eq!(pool.destroy(key), Some(7));
	assert_eq!(pool.destroy(key), None);
	pool.deallocate(key);
	assert_eq!(pool.live_count(), 0);
}

#[test]
pub fn clear_releases_blocks() {
	let mut pool = BlockPool::with_block_len(2);
	let keys: Vec<_> = (0..5).map(|i| pool.new_element(i).unwrap()).collect();
	pool.clear();

	assert_eq!(pool.block_count(), 0);
	assert_eq!(pool.live_count(), 0);
	assert!(keys.iter().all(|key| pool.get(*key).is_none()), "Cleared pool still resolves keys");

	let key = pool.new_element(42).unwrap();
	assert_eq!(key.index(), 0, "Cursor was not reset");
}

#[test]
#[should_panic]
pub fn block_len_too_small() {
	BlockPool::<u32>::with_block_len(1);
}
