use crate::data_structures::BitFlag;

/// A unique identifier of an [Object].
///
/// Ids start at 1 and grow monotonically; they are never reused while the
/// [TraitSystem](crate::TraitSystem) that issued them is alive.
/// [`ObjectId::NONE`] marks a payload that is not attached to anything.
#[derive(Default, Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ObjectId(pub(crate) u32);

impl ObjectId {
	pub const NONE: ObjectId = ObjectId(0);

	#[inline(always)]
	pub const fn value(&self) -> u32 {
		self.0
	}

	#[inline(always)]
	pub const fn is_none(&self) -> bool {
		self.0 == 0
	}
}

/// An opaque, non-owning reference to the scene-graph node that hosts an [Object].
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct NodeRef(pub u64);

/// An identity with a set of attached traits.
///
/// An object stores no trait data itself, only the [BitFlag] of the traits
/// attached to it. The payloads live in their trait stores and are looked up
/// through the object's id.
#[derive(Debug, Clone)]
pub struct Object {
	id: ObjectId,
	traits: BitFlag,
	parent: Option<NodeRef>,
}

impl Object {
	pub(crate) fn new(id: ObjectId) -> Self {
		Self {
			id,
			traits: BitFlag::new(),
			parent: None,
		}
	}

	#[inline(always)]
	pub fn id(&self) -> ObjectId {
		self.id
	}

	/// The raw mask of attached traits.
	#[inline(always)]
	pub fn traits(&self) -> u64 {
		self.traits.features()
	}

	/// Whether every trait in `mask` is attached.
	#[inline(always)]
	pub fn has(&self, mask: u64) -> bool {
		self.traits.has(mask)
	}

	/// Whether any trait in `mask` is attached.
	#[inline(always)]
	pub fn has_any(&self, mask: u64) -> bool {
		self.traits.has_any(mask)
	}

	pub fn parent_node(&self) -> Option<NodeRef> {
		self.parent
	}

	pub(crate) fn set_parent_node(&mut self, parent: Option<NodeRef>) {
		self.parent = parent;
	}

	#[inline(always)]
	pub(crate) fn flag_mut(&mut self) -> &mut BitFlag {
		&mut self.traits
	}
}
