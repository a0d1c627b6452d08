//! Resolution of cross references in fetched content trees.
//!
//! Content arrives as JSON where relation fields hold story identifiers.
//! The [`Resolver`] collects those identifiers for the configured
//! `component.field` patterns, fetches the referenced stories in chunks of
//! at most [`UUID_CHUNK_SIZE`], and substitutes them back into the tree.
//! Substituted stories carry the [`STOP_MARKER`] so no later pass expands
//! them again, which keeps resolution finite on cyclic references.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod node;
mod options;
mod resolver;

pub use assets::inline_assets;
pub use node::{STOP_MARKER, is_content_node, is_stopped, mark_stopped};
pub use options::{LOOKUP_PARAMS, ResolveOptions};
pub use resolver::{Resolver, UUID_CHUNK_SIZE};
