//! Folio - rate governed client for headless content APIs
//!
//! Folio reads and writes content through a delivery API (`cdn/...` paths,
//! authenticated with an access token) and a management API (authenticated
//! with an oauth token). Every request is:
//!
//! 1. classified into a requests-per-second ceiling from its shape, the
//!    configured override and the ceiling the server last advertised;
//! 2. admitted through the throttle queue owning that ceiling;
//! 3. executed by the transport, with a deadline and retries on HTTP 429;
//! 4. for published reads, cached per access token and content version;
//! 5. post-processed: relations, links and assets are resolved in place.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use folio::{ClientConfig, FolioClient, Params};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FolioClient::new(ClientConfig::load()?);
//!     let story = client
//!         .get_story("home", Params::new().with("resolve_relations", "page.featured"))
//!         .await?;
//!     println!("{}", story.data["story"]["name"]);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `folio_error` - Error types
//! - `folio_core` - Request, response and option types
//! - `folio_interface` - `Fetch` and `StoryLookup` traits
//! - `folio_rate_limit` - Classification and throttle queues
//! - `folio_cache` - Versioned response cache
//! - `folio_transport` - URL composition, deadlines and decoding
//! - `folio_resolve` - Relation, link and asset resolution
//!
//! This crate (`folio`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod observability;
mod pagination;
mod params;
mod retry;

pub use client::FolioClient;
pub use config::{ClientConfig, ClientConfigBuilder, ClientConfigBuilderError};
pub use observability::{ObservabilityConfig, init_observability};
pub use pagination::{fetch_all_pages, page_count, page_entities};
pub use params::prepare_cdn_params;

pub use folio_cache::*;
pub use folio_core::*;
pub use folio_error::*;
pub use folio_interface::*;
pub use folio_rate_limit::*;
pub use folio_resolve::*;
pub use folio_transport::*;
