//! Core data types for the Folio content API client.
//!
//! This crate provides the request, response and option types shared by
//! every Folio crate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod method;
mod options;
mod params;
mod path;
mod pattern;
mod request;

pub use method::Method;
pub use options::{CacheClear, Region, ResolveLinks, Version};
pub use params::{ParamValue, Params};
pub use path::{entity_key, is_cdn_path, normalize_path};
pub use pattern::RelationPattern;
pub use request::{ApiResponse, FetchRequest, FetchResponse};
