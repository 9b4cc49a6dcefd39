//! Low-level storage shared by the object store and every trait store.

mod bit_flag;
mod block_pool;

pub use bit_flag::*;
pub use block_pool::*;
