//! TList Core Library - Ordered transformation lists
//!
//! This library keeps an ordered list of tagged affine transformations,
//! composes them (entry 0 applied first), caches the complete composite and
//! notifies observers whenever the list changes. The list can be turned into
//! plain `(kind, matrix)` pairs for persistence and restored from them.

pub mod composer;
pub mod entry;
pub mod error;
pub mod observer;
pub mod portable;
pub mod transform;

// Re-export commonly used types
pub use composer::TransformComposer;
pub use entry::{TaggedTransform, TransformKind};
pub use error::{ComposerError, Result};
pub use observer::{ChangeObserver, ObserverId};
pub use portable::PortableTransform;
pub use transform::{EulerRotation, Transform};
