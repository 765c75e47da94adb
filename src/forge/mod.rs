//! Forge (hosted git) REST API access
//!
//! The [ForgeApi] trait is the seam between release logic and HTTP. The
//! implementations are:
//!
//! - [client::HttpForge]: blocking `reqwest` client against a real forge
//! - [mock::MockForge]: canned responses for tests
//!
//! [github::GitHubRepo] builds the repository endpoints on top of any
//! [ForgeApi], and [paginate::Paginator] walks page-numbered listings lazily.

pub mod client;
pub mod github;
pub mod mock;
pub mod paginate;

pub use client::HttpForge;
pub use github::{GitHubRepo, PullRequestRef};
pub use mock::MockForge;
pub use paginate::{Paginator, PAGE_SIZE};

use crate::error::Result;
use serde_json::Value;

/// Query string parameters, in the order they are sent
pub type Query = Vec<(String, String)>;

/// Minimal JSON-over-HTTP surface of a forge.
///
/// Any non-2xx response must surface as [crate::error::ReleaseMakerError::Http]
/// carrying the response body; callers never see partial data.
pub trait ForgeApi {
    /// GET `url` with query parameters and decode the JSON body
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value>;

    /// POST a JSON body to `url` and decode the JSON response
    fn post(&self, url: &str, body: &Value) -> Result<Value>;
}

impl<T: ForgeApi + ?Sized> ForgeApi for &T {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value> {
        (**self).get(url, query)
    }

    fn post(&self, url: &str, body: &Value) -> Result<Value> {
        (**self).post(url, body)
    }
}

/// Build a [Query] from string pairs
pub fn query<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Query {
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
