use crate::error::{ReleaseMakerError, Result};
use crate::forge::ForgeApi;
use serde_json::Value;
use std::collections::VecDeque;
use tracing::debug;

/// Items requested per page
pub const PAGE_SIZE: u32 = 100;

/// Lazy walk over a page-numbered listing endpoint.
///
/// Requests page 1, 2, ... with `per_page=100` until a page comes back empty,
/// yielding the decoded items one by one. Pages are only fetched when the
/// consumer asks for more items, so stopping early saves requests. The first
/// error is yielded once and ends the iteration.
pub struct Paginator<'a, A: ForgeApi + ?Sized> {
    api: &'a A,
    endpoint: String,
    query: Vec<(String, String)>,
    page: u32,
    buffer: VecDeque<Value>,
    exhausted: bool,
}

impl<'a, A: ForgeApi + ?Sized> Paginator<'a, A> {
    pub fn new(api: &'a A, endpoint: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Paginator {
            api,
            endpoint: endpoint.into(),
            query,
            page: 1,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Number of the next page to be requested
    pub fn next_page(&self) -> u32 {
        self.page
    }

    fn fetch_page(&mut self) -> Result<Vec<Value>> {
        let mut query = self.query.clone();
        query.push(("page".to_string(), self.page.to_string()));
        query.push(("per_page".to_string(), PAGE_SIZE.to_string()));

        debug!(endpoint = %self.endpoint, page = self.page, "Fetching page");
        let body = self.api.get(&self.endpoint, &query)?;
        self.page += 1;

        match body {
            Value::Array(items) => Ok(items),
            other => Err(ReleaseMakerError::forge(format!(
                "Expected a JSON array from {}, got: {}",
                self.endpoint, other
            ))),
        }
    }
}

impl<A: ForgeApi + ?Sized> Iterator for Paginator<'_, A> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.exhausted {
                return None;
            }

            match self.fetch_page() {
                Ok(items) if items.is_empty() => {
                    self.exhausted = true;
                    return None;
                }
                Ok(items) => self.buffer.extend(items),
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
