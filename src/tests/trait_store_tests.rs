use crate::traits::{Camera, Trait, TraitEvent, TraitStore, TraitStores, Transform};
use crate::{TraitSystem, TraitSystemConfig, TraitSystemError};
use crate::objects::{Object, ObjectId};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn counter() -> Rc<Cell<usize>> {
	Rc::new(Cell::new(0))
}

fn objects_with_transform(system: &mut TraitSystem, count: usize) -> Vec<ObjectId> {
	(0..count)
		.map(|_| {
			let id = system.create_object().unwrap();
			assert!(system.add_trait::<Transform>(id).unwrap());
			id
		})
		.collect()
}

fn sorted_live_indices(system: &TraitSystem) -> Vec<usize> {
	let mut indices: Vec<_> = system.store::<Transform>().live_index().values().copied().collect();
	indices.sort_unstable();
	indices
}

#[test]
pub fn add_is_idempotent() {
	let mut system = TraitSystem::new();
	let id = system.create_object().unwrap();

	let adds = counter();
	let hook_adds = adds.clone();
	system.set_add_hook::<Camera>(move |_, _| hook_adds.set(hook_adds.get() + 1));

	assert!(system.add_trait::<Camera>(id).unwrap(), "First add did not attach");
	assert!(!system.add_trait::<Camera>(id).unwrap(), "Second add attached again");
	assert_eq!(system.add(id, Camera::MASK).unwrap(), 0, "Mask add attached an attached trait");

	let store = system.store::<Camera>();
	assert_eq!(store.len(), 1);
	assert_eq!(store.dense_len(), 1, "Double add grew the dense vector");
	assert_eq!(store.pool().live_count(), 1, "Double add allocated twice");
	assert_eq!(adds.get(), 1, "Add hook fired more than once");
}

#[test]
pub fn readd_reuses_pending_payload() {
	let mut system = TraitSystem::new();
	let id = system.create_object().unwrap();

	let adds = counter();
	let reuses = counter();
	let (hook_adds, hook_reuses) = (adds.clone(), reuses.clone());
	system.set_add_hook::<Transform>(move |_, _| hook_adds.set(hook_adds.get() + 1));
	system.set_reuse_hook::<Transform>(move |_, _| hook_reuses.set(hook_reuses.get() + 1));

	system.add_trait::<Transform>(id).unwrap();
	system.get_trait_mut::<Transform>(id).unwrap().set_needs_physics_sync(true);
	assert!(system.remove_trait::<Transform>(id));

	let store = system.store::<Transform>();
	assert!(store.is_pending(id), "Removed payload is not pending compaction");
	assert!(!store.contains(id), "Removed payload is still reachable");
	assert!(system.get_trait::<Transform>(id).is_none(), "Removed payload is still reachable");
	let (live_before, blocks_before) = (store.pool().live_count(), store.pool().block_count());

	system.add_trait::<Transform>(id).unwrap();

	let store = system.store::<Transform>();
	assert_eq!(reuses.get(), 1, "Reuse hook did not fire");
	assert_eq!(adds.get(), 1, "Add hook fired on reuse");
	assert_eq!(store.pool().live_count(), live_before, "Reuse allocated a new payload");
	assert_eq!(store.pool().block_count(), blocks_before);
	assert_eq!(store.garbage_len(), 0);
	assert_eq!(store.dense_len(), 1);
	assert!(
		system.get_trait::<Transform>(id).unwrap().needs_physics_sync(),
		"Reused payload lost its state"
	);
}

#[test]
pub fn compaction_keeps_indices_contiguous() {
	const COUNT: usize = 10;

	let mut system = TraitSystem::new();
	let ids = objects_with_transform(&mut system, COUNT);

	system.remove_trait::<Transform>(ids[3]);
	assert_eq!(system.garbage_collect::<Transform>(), 1);

	assert_eq!(sorted_live_indices(&system), (0..COUNT - 1).collect::<Vec<_>>());
	for id in ids.iter().filter(|id| **id != ids[3]) {
		let transform = system.get_trait::<Transform>(*id).unwrap();
		assert_eq!(transform.object(), *id, "Live index points to another object's payload");
	}

	let store = system.store::<Transform>();
	assert_eq!(store.dense_len(), COUNT - 1);
	assert_eq!(store.pool().live_count(), COUNT - 1, "Compacted payload was not released");
}

#[test]
pub fn compaction_with_several_pending_entries() {
	const COUNT: usize = 10;

	let mut system = TraitSystem::new();
	let ids = objects_with_transform(&mut system, COUNT);
	let removed = [ids[1], ids[9], ids[4], ids[0]];

	for id in removed {
		system.remove_trait::<Transform>(id);
	}
	assert_eq!(system.garbage_collect::<Transform>(), removed.len());
	assert_eq!(system.garbage_collect::<Transform>(), 0, "Second pass found pending entries");

	assert_eq!(sorted_live_indices(&system), (0..COUNT - removed.len()).collect::<Vec<_>>());
	for id in ids.iter().filter(|id| !removed.contains(*id)) {
		let transform = system.get_trait::<Transform>(*id).unwrap();
		assert_eq!(transform.object(), *id, "Live index points to another object's payload");
	}

	let order: Vec<_> = system.store::<Transform>().iter().map(|(id, _)| id).collect();
	let expected: Vec<_> = ids.iter().copied().filter(|id| !removed.contains(id)).collect();
	assert_eq!(order, expected, "Compaction did not keep the dense order");
}

#[test]
pub fn iteration_skips_pending_payloads() {
	let mut system = TraitSystem::new();
	let ids = objects_with_transform(&mut system, 3);
	system.remove_trait::<Transform>(ids[1]);

	let visited: Vec<_> = system.store::<Transform>().iter().map(|(id, _)| id).collect();
	assert_eq!(visited, vec![ids[0], ids[2]]);
}

#[test]
pub fn stale_handles_do_not_resolve() {
	let mut system = TraitSystem::new();
	let id = system.create_object().unwrap();
	system.add_trait::<Camera>(id).unwrap();

	let handle = system.handle::<Camera>(id).unwrap();
	assert_eq!(handle.object(), id);
	assert!(system.resolve(handle).is_some());

	system.remove_trait::<Camera>(id);
	assert!(system.resolve(handle).is_none(), "Detached payload resolved");

	system.add_trait::<Camera>(id).unwrap();
	assert!(system.resolve(handle).is_some(), "Reused payload did not resolve");

	system.remove_trait::<Camera>(id);
	system.garbage_collect::<Camera>();
	system.add_trait::<Camera>(id).unwrap();
	assert!(system.resolve(handle).is_none(), "Handle to a compacted payload resolved");
	assert!(system.resolve_mut(handle).is_none());

	let fresh = system.handle::<Camera>(id).unwrap();
	assert_ne!(fresh, handle);
	assert!(system.resolve(fresh).is_some());
}

#[test]
pub fn hooks_are_last_write_wins() {
	let mut system = TraitSystem::new();
	let id = system.create_object().unwrap();

	let first = counter();
	let second = counter();
	let (hook_first, hook_second) = (first.clone(), second.clone());

	assert!(!system.set_add_hook::<Camera>(move |_, _| hook_first.set(hook_first.get() + 1)));
	assert!(system.set_add_hook::<Camera>(move |_, _| hook_second.set(hook_second.get() + 1)));
	assert!(system.store::<Camera>().has_hook(TraitEvent::Add));

	system.add_trait::<Camera>(id).unwrap();
	assert_eq!(first.get(), 0, "Replaced hook fired");
	assert_eq!(second.get(), 1, "Replacing hook did not fire");

	assert!(system.clear_add_hook::<Camera>());
	assert!(!system.clear_add_hook::<Camera>());
	system.remove_trait::<Camera>(id);
	system.garbage_collect::<Camera>();
	system.add_trait::<Camera>(id).unwrap();
	assert_eq!(second.get(), 1, "Cleared hook fired");
}

#[test]
pub fn hooks_see_the_payload_and_its_object() {
	let mut system = TraitSystem::new();
	let id = system.create_object().unwrap();

	system.set_add_hook::<Camera>(|object, camera| {
		assert_eq!(camera.object(), object.id(), "Owner was not set before the add hook");
		assert!(object.has(Camera::MASK), "Mask bit was not set before the add hook");
		camera.set_fov(60.0);
	});

	let removed_with_bit = Rc::new(Cell::new(false));
	let hook_removed = removed_with_bit.clone();
	system.set_remove_hook::<Camera>(move |object, _| hook_removed.set(object.has(Camera::MASK)));

	system.add_trait::<Camera>(id).unwrap();
	assert_eq!(system.get_trait::<Camera>(id).unwrap().fov(), 60.0, "Add hook changes were lost");

	system.remove_trait::<Camera>(id);
	assert!(removed_with_bit.get(), "Remove hook fired after the mask bit was cleared");
	assert!(!system.has_trait::<Camera>(id));
}

#[test]
pub fn log_and_edit_visit_attached_traits() {
	let mut system = TraitSystem::new();
	let id = system.create_object().unwrap();
	let bare = system.create_object().unwrap();
	system.add(id, Camera::MASK | Transform::MASK).unwrap();

	let events = Rc::new(RefCell::new(Vec::new()));
	let (camera_log, transform_log, camera_edit) = (events.clone(), events.clone(), events.clone());
	system.set_log_hook::<Camera>(move |object, _| camera_log.borrow_mut().push(("camera", object.id())));
	system.set_log_hook::<Transform>(move |object, _| transform_log.borrow_mut().push(("transform", object.id())));
	system.set_edit_hook::<Camera>(move |object, _| camera_edit.borrow_mut().push(("edit", object.id())));

	assert!(system.log(id));
	assert!(system.log(bare));
	assert!(system.on_edit(id));
	assert!(!system.log(ObjectId::NONE), "Logged an object that does not exist");

	assert_eq!(
		*events.borrow(),
		vec![("camera", id), ("transform", id), ("edit", id)],
		"Hooks were not dispatched in trait order"
	);
}

#[test]
pub fn overwritten_payload_keeps_its_owner() {
	let mut system = TraitSystem::new();
	let id = system.create_object().unwrap();
	let hooked = system.create_object().unwrap();
	system.add_trait::<Camera>(id).unwrap();

	*system.get_trait_mut::<Camera>(id).unwrap() = Camera::default();

	let store = system.store::<Camera>();
	let owners: Vec<_> = store.iter().map(|(owner, _)| owner).collect();
	assert_eq!(owners, vec![id], "Overwritten payload dropped out of iteration");
	assert_eq!(store.dense()[0].0, id, "Dense entry lost its owner");
	assert_eq!(system.get_trait_mut::<Camera>(id).unwrap().object(), id, "Owner was not restored");

	system.set_add_hook::<Camera>(|_, camera| *camera = Camera::default());
	system.add_trait::<Camera>(hooked).unwrap();
	assert_eq!(system.get_trait::<Camera>(hooked).unwrap().object(), hooked, "Add hook cleared the owner");
	assert_eq!(system.store::<Camera>().iter().count(), 2);
}

#[cfg(target_pointer_width = "64")]
#[test]
pub fn exhausted_pool_leaves_object_untouched() {
	let config = TraitSystemConfig {
		trait_block_len: 1 << 32,
		..TraitSystemConfig::default()
	};
	let mut system = TraitSystem::with_config(config).unwrap();
	let id = system.create_object().unwrap();

	let result = system.add_trait::<Transform>(id);
	assert!(
		matches!(result, Err(TraitSystemError::OutOfMemory { .. })),
		"Oversized block did not report exhaustion"
	);
	assert_eq!(system.traits(id), Some(0), "Mask bit was not rolled back");

	let store = system.store::<Transform>();
	assert_eq!(store.dense_len(), 0, "Failed attach left a dense entry");
	assert_eq!(store.garbage_len(), 0, "Failed attach left a pending entry");
	assert_eq!(store.len(), 0);
	assert_eq!(store.pool().live_count(), 0);
}

#[cfg(target_pointer_width = "64")]
#[test]
pub fn failed_mask_add_detaches_earlier_traits() {
	let mut stores = TraitStores::new(&TraitSystemConfig::default());
	stores.transform = TraitStore::new(1 << 32, 0);

	let removals = counter();
	let hook_removals = removals.clone();
	stores.camera.set_hook(
		TraitEvent::Remove,
		Box::new(move |_: &Object, _: &mut Camera| hook_removals.set(hook_removals.get() + 1)),
	);

	let id = ObjectId(1);
	let mut object = Object::new(id);
	let result = stores.attach_mask(&mut object, Camera::MASK | Transform::MASK);

	assert!(matches!(result, Err(TraitSystemError::OutOfMemory { .. })));
	assert_eq!(object.traits(), 0, "Earlier traits stayed attached after a failed add");
	assert!(!stores.camera.contains(id), "Camera payload is still live");
	assert!(stores.camera.is_pending(id), "Camera payload was not detached");
	assert_eq!(removals.get(), 1, "Remove hook did not fire for the rolled back trait");
	assert_eq!(stores.transform.dense_len(), 0);
}
