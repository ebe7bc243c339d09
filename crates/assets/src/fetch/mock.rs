//! Canned-response fetcher for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{ErrorKind, Result};
use crate::fetch::Fetcher;

/// Answers from a fixed table of URLs and records every request.
///
/// Unknown URLs fail with [`ErrorKind::Fetch`], the same as an unreachable
/// host would.
#[derive(Default)]
pub struct MockFetcher {
    responses: HashMap<String, Vec<u8>>,
    calls: Mutex<Vec<String>>,
}
impl MockFetcher {
    pub fn with_responses(responses: impl IntoIterator<Item = (impl Into<String>, impl Into<Vec<u8>>)>) -> Self {
        Self {
            responses: responses.into_iter().map(|(url, body)| (url.into(), body.into())).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every URL requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }
}

impl Fetcher for MockFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).push(url.to_string());
        match self.responses.get(url) {
            Some(body) => Ok(body.clone()),
            None => exn::bail!(ErrorKind::Fetch(url.to_string())),
        }
    }
}
