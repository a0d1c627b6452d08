//! Test utilities for resolver tests.

use async_trait::async_trait;
use folio_core::Params;
use folio_error::{FolioResult, TransportError};
use folio_interface::StoryLookup;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory story store that records every lookup.
#[derive(Default)]
pub struct MockLookup {
    stories: HashMap<String, Value>,
    calls: Mutex<Vec<(Vec<String>, Params)>>,
    fail: bool,
}

impl MockLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup that fails every request.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_story(mut self, story: Value) -> Self {
        let uuid = story["uuid"].as_str().unwrap().to_string();
        self.stories.insert(uuid, story);
        self
    }

    /// Story with the given uuid and content.
    pub fn story(uuid: &str, content: Value) -> Value {
        json!({"uuid": uuid, "name": format!("Story {uuid}"), "content": content})
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(Vec<String>, Params)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryLookup for MockLookup {
    async fn stories_by_uuids(&self, uuids: &[String], params: &Params) -> FolioResult<Vec<Value>> {
        self.calls.lock().unwrap().push((uuids.to_vec(), params.clone()));
        if self.fail {
            return Err(TransportError::network("lookup failed").into());
        }
        Ok(uuids.iter().filter_map(|id| self.stories.get(id).cloned()).collect())
    }
}
