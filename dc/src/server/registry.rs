//! Live sessions, keyed by id
//!
//! A session stays until it is deleted, sits idle past the TTL, or is the
//! least recently used one when the registry is full. Eviction runs on insert.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::orchestrator::Orchestrator;

struct Entry {
    orchestrator: Arc<Orchestrator>,
    last_used: Instant,
}

/// Maps session ids to their orchestrators
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, Entry>>,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(idle_ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.session_idle_ttl(), config.max_sessions)
    }

    pub async fn insert(&self, orchestrator: Arc<Orchestrator>) -> Uuid {
        let id = orchestrator.id();
        let mut sessions = self.sessions.lock().await;

        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_used.elapsed() < self.idle_ttl);
        let expired = before - sessions.len();
        if expired > 0 {
            info!(expired, "Idle sessions evicted");
        }

        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(id, _)| *id)
            else {
                break;
            };
            sessions.remove(&oldest);
            info!(id = %oldest, "Least recently used session evicted");
        }

        sessions.insert(
            id,
            Entry {
                orchestrator,
                last_used: Instant::now(),
            },
        );
        info!(%id, live = sessions.len(), "Session registered");
        id
    }

    /// Look up a session and mark it as used
    pub async fn get(&self, id: &Uuid) -> Option<Arc<Orchestrator>> {
        debug!(%id, "SessionRegistry::get: called");
        let mut sessions = self.sessions.lock().await;
        let entry = sessions.get_mut(id)?;
        entry.last_used = Instant::now();
        Some(entry.orchestrator.clone())
    }

    pub async fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.lock().await.remove(id).is_some();
        if removed {
            info!(%id, "Session removed");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::llm::client::mock::MockLlmClient;
    use crate::orchestrator::Generator;
    use crate::prompts::{PromptComposer, PromptLoader};

    fn orchestrator() -> Arc<Orchestrator> {
        let composer = PromptComposer::new(PromptLoader::embedded_only().unwrap(), &GenerationConfig::default());
        let generator = Generator::new(
            Arc::new(MockLlmClient::new(vec![])),
            Arc::new(composer),
            Duration::from_secs(5),
        );
        Arc::new(Orchestrator::start(generator, "Initech", None, None).unwrap())
    }

    #[tokio::test]
    async fn test_idle_sessions_evicted_on_insert() {
        let registry = SessionRegistry::new(Duration::from_millis(20), 100);
        let stale = registry.insert(orchestrator()).await;
        tokio::time::sleep(Duration::from_millis(40)).await;

        let fresh = registry.insert(orchestrator()).await;
        assert!(registry.get(&stale).await.is_none());
        assert!(registry.get(&fresh).await.is_some());
    }

    #[tokio::test]
    async fn test_full_registry_evicts_least_recently_used() {
        let registry = SessionRegistry::new(Duration::from_secs(3600), 2);
        let first = registry.insert(orchestrator()).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = registry.insert(orchestrator()).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(registry.get(&first).await.is_some());
        tokio::time::sleep(Duration::from_millis(5)).await;

        let third = registry.insert(orchestrator()).await;
        assert!(registry.get(&second).await.is_none());
        assert!(registry.get(&first).await.is_some());
        assert!(registry.get(&third).await.is_some());
    }

    #[tokio::test]
    async fn test_remove() {
        let registry = SessionRegistry::new(Duration::from_secs(3600), 10);
        let id = registry.insert(orchestrator()).await;
        assert!(registry.remove(&id).await);
        assert!(!registry.remove(&id).await);
        assert!(registry.get(&id).await.is_none());
    }
}
