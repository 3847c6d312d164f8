//! Scripted provider fake shared by the use case tests.

use crate::ports::text_generation::{ProviderError, TextGenerationProvider};
use async_trait::async_trait;
use peer_review_domain::ProviderIdentity;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

pub(crate) type Reply = Result<Option<String>, ProviderError>;

pub(crate) fn ok(text: &str) -> Reply {
    Ok(Some(text.to_string()))
}

/// Replies are scripted per system instruction. The last reply of a script
/// repeats once the earlier ones are used up.
pub(crate) struct ScriptedProvider {
    identity: ProviderIdentity,
    scripts: Mutex<HashMap<String, VecDeque<Reply>>>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(String, String, String)>>,
    started_at: Mutex<Vec<(String, Instant)>>,
    finished: AtomicUsize,
}

impl ScriptedProvider {
    pub(crate) fn new(identity: &str) -> Self {
        Self {
            identity: ProviderIdentity::new(identity),
            scripts: Mutex::new(HashMap::new()),
            delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            started_at: Mutex::new(Vec::new()),
            finished: AtomicUsize::new(0),
        }
    }

    pub(crate) fn on(self, system: &str, replies: Vec<Reply>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(system.to_string(), replies.into());
        self
    }

    pub(crate) fn delayed(mut self, system: &str, delay: Duration) -> Self {
        self.delays.insert(system.to_string(), delay);
        self
    }

    /// Every call as (model, system, user), in start order.
    pub(crate) fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls_with_system(&self, system: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(_, s, _)| s == system)
            .map(|(_, _, user)| user)
            .collect()
    }

    /// Start instants of calls made with `system`.
    pub(crate) fn started_at(&self, system: &str) -> Vec<Instant> {
        self.started_at
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| s == system)
            .map(|(_, at)| *at)
            .collect()
    }

    /// Calls that ran to completion (not cancelled mid-flight).
    pub(crate) fn finished_count(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    fn next_reply(&self, system: &str) -> Reply {
        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(system) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(ProviderError::Other("empty script".into()))),
            None => Err(ProviderError::Other(format!(
                "no script for system instruction: {system}"
            ))),
        }
    }
}

#[async_trait]
impl TextGenerationProvider for ScriptedProvider {
    fn identity(&self) -> &ProviderIdentity {
        &self.identity
    }

    async fn generate(
        &self,
        model: &str,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<Option<String>, ProviderError> {
        self.calls.lock().unwrap().push((
            model.to_string(),
            system_instruction.to_string(),
            user_message.to_string(),
        ));
        self.started_at
            .lock()
            .unwrap()
            .push((system_instruction.to_string(), Instant::now()));
        if let Some(delay) = self.delays.get(system_instruction) {
            tokio::time::sleep(*delay).await;
        }
        let reply = self.next_reply(system_instruction);
        self.finished.fetch_add(1, Ordering::SeqCst);
        reply
    }
}
