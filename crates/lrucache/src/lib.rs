//! # lrucache
//!
//! Fixed-capacity in-memory key-value cache with least-recently-used eviction.
//!
//! ## Architecture
//! - **Index**: AHash map from key to arena slot (O(1) lookup)
//! - **Recency list**: doubly-linked list threaded through the arena by slot
//!   index, bracketed by head/tail sentinel slots (O(1) promote and evict)
//! - **Shared handle**: one mutex around the whole cache for callers that
//!   need to share it across threads
//!
//! ```
//! use lrucache::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3); // evicts "b"
//!
//! assert_eq!(cache.get(&"b"), None);
//! assert_eq!(cache.snapshot(), vec![("c", 3), ("a", 1)]);
//! # Ok::<(), lrucache::Error>(())
//! ```

#![warn(missing_docs)]

mod error;
mod iter;
mod lru;
mod shared;

pub use error::{Error, Result};
pub use iter::Iter;
pub use lru::LruCache;
pub use shared::SharedLruCache;
