//! Shared fixtures for unit and HTTP tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::assistant::DesignAssistant;
use crate::llm_client::{ChatBackend, LlmError};
use crate::state::AppState;
use crate::store::MemoryStore;

/// Chat backend that replays canned replies in order and records every prompt.
/// Once the replies run out each call fails like an unavailable endpoint.
#[derive(Default)]
pub struct StubChat {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl StubChat {
    pub fn replying<I, S>(replies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for StubChat {
    async fn complete(&self, _system: &str, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            })
    }
}

pub fn failing_assistant() -> DesignAssistant {
    DesignAssistant::new(StubChat::failing())
}

/// App state over an empty in-memory store.
pub fn test_state(chat: Arc<StubChat>) -> AppState {
    AppState {
        store: Arc::new(MemoryStore::new()),
        assistant: DesignAssistant::new(chat),
    }
}
