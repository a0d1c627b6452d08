//! Capabilities the client consumes.

use async_trait::async_trait;
use folio_core::{FetchRequest, FetchResponse, Params};
use folio_error::{FolioResult, TransportError};
use serde_json::Value;

/// Raw request execution.
///
/// Implementations return `Ok` for any response that reached the server,
/// whatever its status, and `Err` only when no response was produced.
/// Dropping the returned future must cancel the underlying call.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Execute one request.
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, TransportError>;
}

/// Entity lookups used while resolving references.
#[async_trait]
pub trait StoryLookup: Send + Sync {
    /// Fetch the stories with the given identifiers in a single request.
    ///
    /// `params` carries the read options of the originating request
    /// (version, language and so on). Identifiers without a match are
    /// simply absent from the result.
    async fn stories_by_uuids(&self, uuids: &[String], params: &Params) -> FolioResult<Vec<Value>>;
}
