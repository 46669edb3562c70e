//! Field-name canonicalization.
//!
//! A factory owns one root table per input flavor. Each tokenizer works on a
//! session table created with `child()`: it reads the root's published
//! snapshot without copying, copies the bucket array on its first insertion,
//! and offers its names back to the root when released. The root publishes a
//! session's table only if it is larger than what is already published and
//! not above [`StreamLimits::max_entries_for_reuse`].
//!
//! [`StreamLimits::max_entries_for_reuse`]: crate::StreamLimits::max_entries_for_reuse

mod bytes;
mod chars;
mod name;
mod table;

pub use bytes::{ByteNameTable, ByteSymbolTable, pack_quads, pack_quads_into};
pub use chars::{CharNameTable, CharSymbolTable};
pub use name::Name;
pub use table::{MAX_COLLISION_CHAIN, PROMOTION_THRESHOLD};
