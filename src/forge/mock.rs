use crate::error::{ReleaseMakerError, Result};
use crate::forge::paginate::PAGE_SIZE;
use crate::forge::ForgeApi;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;

/// Mock forge for testing without network access.
///
/// Responses are keyed by URL plus the sorted query string. Unknown GETs fail
/// with a 404 like a real forge would.
#[derive(Default)]
pub struct MockForge {
    responses: RefCell<HashMap<String, Value>>,
    failures: RefCell<HashMap<String, (u16, String)>>,
    post_responses: RefCell<HashMap<String, Value>>,
    requests: RefCell<Vec<String>>,
    posts: RefCell<Vec<(String, Value)>>,
}

fn request_key(url: &str, query: &[(String, String)]) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let mut pairs: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    pairs.sort();
    format!("{}?{}", url, pairs.join("&"))
}

impl MockForge {
    /// Create a new mock forge with no responses
    pub fn new() -> Self {
        MockForge::default()
    }

    /// Register a plain response for a GET
    pub fn add_response(&self, url: &str, query: Vec<(String, String)>, body: Value) {
        self.responses
            .borrow_mut()
            .insert(request_key(url, &query), body);
    }

    /// Register a paginated listing; the page after the last one is empty
    pub fn add_pages(&self, url: &str, query: Vec<(String, String)>, pages: Vec<Value>) {
        let pages = pages.into_iter().chain(std::iter::once(json!([])));
        for (index, body) in pages.enumerate() {
            let mut paged = query.clone();
            paged.push(("page".to_string(), (index + 1).to_string()));
            paged.push(("per_page".to_string(), PAGE_SIZE.to_string()));
            self.add_response(url, paged, body);
        }
    }

    /// Make every GET to `url` fail with the given status and body
    pub fn fail(&self, url: &str, status: u16, body: &str) {
        self.failures
            .borrow_mut()
            .insert(url.to_string(), (status, body.to_string()));
    }

    /// Register the response for a POST to `url`
    pub fn on_post(&self, url: &str, body: Value) {
        self.post_responses
            .borrow_mut()
            .insert(url.to_string(), body);
    }

    /// Every GET issued so far, as `url?sorted-query`
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    /// Number of GETs issued to `url`, any query
    pub fn get_count(&self, url: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|key| key.as_str() == url || key.starts_with(&format!("{}?", url)))
            .count()
    }

    /// Every POST issued so far with its body
    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.borrow().clone()
    }
}

impl ForgeApi for MockForge {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value> {
        let key = request_key(url, query);
        self.requests.borrow_mut().push(key.clone());

        if let Some((status, body)) = self.failures.borrow().get(url) {
            return Err(ReleaseMakerError::http(url, *status, body.clone()));
        }

        self.responses
            .borrow()
            .get(&key)
            .cloned()
            .ok_or_else(|| ReleaseMakerError::http(key, 404, r#"{"message":"Not Found"}"#))
    }

    fn post(&self, url: &str, body: &Value) -> Result<Value> {
        self.posts
            .borrow_mut()
            .push((url.to_string(), body.clone()));

        self.post_responses
            .borrow()
            .get(url)
            .cloned()
            .ok_or_else(|| ReleaseMakerError::http(url, 404, r#"{"message":"Not Found"}"#))
    }
}
