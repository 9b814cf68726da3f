//! Storage slot backends
//!
//! Three implementations of the core's `SlotBackend` port:
//!
//! - [`FileSlot`]: one file per key under a shared data directory; the
//!   durable backend contexts use to share state
//! - [`MemorySlot`]: a plain in-process map, durable for nothing
//! - [`FallbackSlot`]: durable-first with a silent per-key degrade to
//!   memory when the durable backend fails (quota, permissions, missing
//!   volume)

pub mod fallback;
pub mod file;
pub mod memory;

pub use fallback::FallbackSlot;
pub use file::FileSlot;
pub use memory::MemorySlot;
