//! Transport adapter for the content API.
//!
//! [`Transport`] composes URLs, attaches headers, serializes parameters,
//! enforces the request deadline and turns raw responses into
//! [`ApiResponse`](folio_core::ApiResponse) values or typed errors. The raw
//! request itself is delegated to a [`Fetch`](folio_interface::Fetch)
//! implementation, [`ReqwestFetch`] by default.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod query;
mod reqwest_fetch;
mod transport;

pub use query::{join_url, to_query_string};
pub use reqwest_fetch::ReqwestFetch;
pub use transport::{ResponseInterceptor, Transport, is_ok_status};
