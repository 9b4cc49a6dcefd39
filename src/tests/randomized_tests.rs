use crate::traits::{
	Camera, Collider, MeshRenderer, RegisteredTrait, Rigidbody, Script, Transform, VehicleChasis,
	TRAIT_COUNT,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;
use crate::objects::ObjectId;
use crate::TraitSystem;

fn check_store<T: RegisteredTrait>(system: &TraitSystem) {
	let store = system.store::<T>();
	let live = store.live_index();
	let garbage = store.garbage_index();

	for id in live.keys() {
		assert!(!garbage.contains_key(id), "{:?} is both live and pending", id);
	}

	assert_eq!(
		store.dense_len(),
		live.len() + garbage.len(),
		"Dense entries are neither live nor pending"
	);

	let indices: HashSet<_> = live.values().chain(garbage.values()).copied().collect();
	assert_eq!(indices.len(), store.dense_len(), "Two entries share a dense index");
	assert!(indices.iter().all(|index| *index < store.dense_len()), "Dense index out of range");

	for object in system.objects().iter() {
		assert_eq!(
			object.has(T::MASK),
			store.contains(object.id()),
			"Mask bit and live index disagree for {:?}",
			object.id()
		);
		if let Some(value) = store.get(object.id()) {
			assert_eq!(value.object(), object.id(), "Payload owned by another object");
		}
	}

	for id in live.keys() {
		assert!(system.contains(*id), "Live entry for a destroyed object");
	}
}

fn check_invariants(system: &TraitSystem) {
	check_store::<Camera>(system);
	check_store::<Collider>(system);
	check_store::<MeshRenderer>(system);
	check_store::<Rigidbody>(system);
	check_store::<Script>(system);
	check_store::<Transform>(system);
	check_store::<VehicleChasis>(system);
}

#[test]
pub fn random_operations_keep_invariants() {
	let mut rng = StdRng::seed_from_u64(0x7261_6974);
	let mut system = TraitSystem::new();
	let mut ids: Vec<ObjectId> = (0..32).map(|_| system.create_object().unwrap()).collect();

	for _ in 0..4000 {
		let slot = rng.gen_range(0..ids.len());
		let id = ids[slot];
		let mask = 1u64 << rng.gen_range(0..TRAIT_COUNT);

		match rng.gen_range(0..100) {
			0..=44 => {
				let had = system.has(id, mask);
				let attached = system.add(id, mask).unwrap();
				assert_eq!(attached == mask, !had, "Add result does not match the previous state");
			},
			45..=84 => {
				let had = system.has(id, mask);
				let detached = system.remove(id, mask);
				assert_eq!(detached == mask, had, "Remove result does not match the previous state");
			},
			85..=94 => {
				system.garbage_collect_all();
			},
			_ => {
				assert!(system.destroy(id));
				ids[slot] = system.create_object().unwrap();
			},
		}

		check_invariants(&system);
	}

	system.clear_objects();
	check_invariants(&system);
}
