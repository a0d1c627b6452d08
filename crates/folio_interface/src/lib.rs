//! Trait definitions for the seams of the Folio client.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{Fetch, StoryLookup};
