use std::ops::{BitAnd, BitOr};
use std::fmt;

const BITS: u32 = u64::BITS;

/// A fixed 64-bit feature mask.
///
/// Every [object](crate::objects::Object) carries one to record which
/// [traits](crate::traits::Trait) are attached to it, and mask arguments to
/// `add`/`remove`/`has` are tested against it.
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BitFlag {
	features: u64,
}

impl BitFlag {
	/// Create an empty [BitFlag].
	pub const fn new() -> Self {
		Self { features: 0 }
	}

	/// Create a [BitFlag] holding exactly `features`.
	pub const fn from(features: u64) -> Self {
		Self { features }
	}

	/// The raw mask.
	#[inline(always)]
	pub const fn features(&self) -> u64 {
		self.features
	}

	/// Exact equality with `mask`.
	#[inline(always)]
	pub const fn is(&self, mask: u64) -> bool {
		self.features == mask
	}

	/// Whether every bit of `mask` is set.
	#[inline(always)]
	pub const fn has(&self, mask: u64) -> bool {
		(self.features & mask) == mask
	}

	/// Whether at least one bit of `mask` is set.
	#[inline(always)]
	pub const fn has_any(&self, mask: u64) -> bool {
		(self.features & mask) != 0
	}

	/// Set every bit of `mask`.
	#[inline(always)]
	pub fn add(&mut self, mask: u64) {
		self.features |= mask;
	}

	/// Clear every bit of `mask`.
	#[inline(always)]
	pub fn remove(&mut self, mask: u64) {
		self.features &= !mask;
	}

	pub const fn is_empty(&self) -> bool {
		self.features == 0
	}

	/// Iterate over the positions of the set bits, lowest first.
	pub fn iter_indices(&self) -> BitFlagIndexIterator {
		BitFlagIndexIterator { remaining: self.features }
	}
}

impl From<u64> for BitFlag {
	fn from(features: u64) -> Self {
		Self { features }
	}
}

impl From<BitFlag> for u64 {
	fn from(flag: BitFlag) -> Self {
		flag.features
	}
}

impl BitOr for BitFlag {
	type Output = BitFlag;

	fn bitor(self, rhs: Self) -> Self::Output {
		BitFlag::from(self.features | rhs.features)
	}
}

impl BitAnd for BitFlag {
	type Output = BitFlag;

	fn bitand(self, rhs: Self) -> Self::Output {
		BitFlag::from(self.features & rhs.features)
	}
}

impl fmt::Debug for BitFlag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "BitFlag({:#018x})", self.features)
	}
}

/// Iterates over the set bit positions of a [BitFlag].
pub struct BitFlagIndexIterator {
	remaining: u64,
}

impl Iterator for BitFlagIndexIterator {
	type Item = u32;

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}

		let index = self.remaining.trailing_zeros();
		debug_assert!(index < BITS);
		self.remaining &= self.remaining - 1;
		Some(index)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let count = self.remaining.count_ones() as usize;
		(count, Some(count))
	}
}

impl ExactSizeIterator for BitFlagIndexIterator {}
