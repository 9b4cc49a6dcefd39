use crate::objects::Object;

/// A lifecycle callback. It sees the originating [Object] and the payload.
pub type TraitHook<T> = Box<dyn FnMut(&Object, &mut T)>;

/// The points at which a [TraitStore](crate::traits::TraitStore) invokes its hooks.
#[repr(usize)]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum TraitEvent {
	/// A fresh payload was allocated for the object.
	Add = 0,
	/// A payload pending compaction was handed back to the same object.
	Reuse = 1,
	/// The payload is about to be detached. Fired before any state changes.
	Remove = 2,
	/// `log` was requested on the object.
	Log = 3,
	/// `on_edit` was requested on the object.
	Edit = 4,
}

const EVENT_COUNT: usize = 5;

/// One optional handler per [TraitEvent].
///
/// There is no multicast: registering a hook replaces the previous one.
pub struct TraitHooks<T> {
	hooks: [Option<TraitHook<T>>; EVENT_COUNT],
}

impl<T> TraitHooks<T> {
	pub fn new() -> Self {
		Self {
			hooks: [None, None, None, None, None],
		}
	}

	/// Register `hook` for `event`, returning the handler it replaces.
	pub fn set(&mut self, event: TraitEvent, hook: TraitHook<T>) -> Option<TraitHook<T>> {
		self.hooks[event as usize].replace(hook)
	}

	/// Unregister the handler for `event`.
	pub fn clear(&mut self, event: TraitEvent) -> Option<TraitHook<T>> {
		self.hooks[event as usize].take()
	}

	pub fn is_set(&self, event: TraitEvent) -> bool {
		self.hooks[event as usize].is_some()
	}

	pub(crate) fn fire(&mut self, event: TraitEvent, object: &Object, value: &mut T) {
		if let Some(hook) = self.hooks[event as usize].as_mut() {
			log::trace!("{:?} hook for object {}", event, object.id().value());
			hook(object, value);
		}
	}
}

impl<T> Default for TraitHooks<T> {
	fn default() -> Self {
		Self::new()
	}
}
