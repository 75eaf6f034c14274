//! Fixed-capacity bump arena for Ember tensor allocation.
//!
//! One [`Arena`] is created per model load. Tensor payloads and dimension
//! arrays are carved from it in order; nothing is ever freed individually.
//!
//! # Architecture
//!
//! ```text
//! Arena<S> (Box<[u8]> | Vec<u8> | &mut [u8])
//! ├── used          monotonic cursor, padding included
//! ├── allocate()    align_up(address) → atomic commit-or-reject
//! └── ArenaRegion   (offset, len, align) handle, never invalidated
//! ```
//!
//! Allocations are returned as offsets rather than pointers, so ownership
//! stays with the arena and every bounds check lives in one place.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod align;
pub mod arena;
pub mod config;
pub mod error;
pub mod handle;

// Public re-exports for the primary API surface.
pub use align::{align_up, is_aligned};
pub use arena::{Arena, ArenaStorage, ArenaUsage};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use handle::ArenaRegion;
