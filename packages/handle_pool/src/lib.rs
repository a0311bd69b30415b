#![cfg_attr(docsrs, feature(doc_cfg))]

//! Fixed-capacity object pools that hand out generation-checked handles instead of references.
//!
//! A pool owns a fixed number of slots, allocated once. Creating an object stores it in a free
//! slot and returns a [`Handle`]: a small `Copy` value made of the slot index and the slot's
//! generation. Handles are resolved back into references through the pool. Destroying an object
//! advances its slot's generation, so stale handles are detected and resolve to nothing rather
//! than to whatever object later reuses the slot.
//!
//! Two pool types are provided:
//!
//! * [`SlotPool`] - single-threaded, resolves handles into plain references.
//! * [`SyncSlotPool`] - shareable between threads, resolves handles into [`View`]s that keep the
//!   object alive (by holding a shared lock on the pool) for as long as the view exists.
//!
//! # Failure is a value
//!
//! A full pool does not grow or panic: creation returns [`Handle::invalid()`]. Stale, foreign
//! and invalid handles never panic either: lookups return `None` and destruction returns
//! `false`. Fallible constructors are supported via [`SlotPool::try_create_with()`], which
//! reports the constructor's error through [`CreateError`] and leaves the pool untouched.
//!
//! # Examples
//!
//! ```
//! use handle_pool::{Handle, SlotPool};
//!
//! #[derive(Debug, PartialEq)]
//! struct Particle {
//!     energy: u32,
//! }
//!
//! let mut pool = SlotPool::<Particle, 2>::new();
//!
//! let h1 = pool.create(Particle { energy: 10 });
//! let h2 = pool.create(Particle { energy: 20 });
//! assert_eq!(pool.free_count(), 0);
//!
//! // The pool is full; this is reported, not fatal.
//! assert_eq!(pool.create(Particle { energy: 30 }), Handle::invalid());
//!
//! assert!(pool.destroy(h1));
//! assert!(!pool.is_valid(h1));
//!
//! // The freed slot is reused under the next generation.
//! let h3 = pool.create(Particle { energy: 30 });
//! assert_eq!(h3.index(), h1.index());
//! assert_eq!(h3.generation(), h1.generation() + 1);
//!
//! assert_eq!(pool.get(h2), Some(&Particle { energy: 20 }));
//! assert!(pool.get(h1).is_none());
//! ```
//!
//! Sharing a pool between threads:
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use handle_pool::SyncSlotPool;
//!
//! let pool = Arc::new(SyncSlotPool::<u64, 8>::new());
//! let handle = pool.create(1234);
//!
//! let worker = thread::spawn({
//!     let pool = Arc::clone(&pool);
//!     move || {
//!         // The object cannot be destroyed while `view` is alive.
//!         let view = pool.get(handle).unwrap();
//!         *view * 2
//!     }
//! });
//!
//! assert_eq!(worker.join().unwrap(), 2468);
//! assert!(pool.destroy(handle));
//! ```
//!
//! # Logging
//!
//! Pools emit [`tracing`] events at `trace` level when objects are created or destroyed and at
//! `debug` level when a pool is full. Stale handles are an expected input and are never reported
//! above `trace` level.

mod builder;
mod drop_policy;
mod error;
mod handle;
mod slot;
mod slot_pool;
mod sync_slot_pool;
mod view;

pub use builder::*;
pub use drop_policy::*;
pub use error::*;
pub use handle::*;
pub(crate) use slot::*;
pub use slot_pool::*;
pub use sync_slot_pool::*;
pub use view::*;
