use bdr_core::ID;
use bdr_core::Unique;
use bdr_state::GameState;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// One stored wargame: the goal it optimizes for and its latest state.
#[derive(Debug, Clone)]
pub struct Session {
    id: ID<Session>,
    pub goal: String,
    pub state: GameState,
    created: Instant,
    touched: Instant,
}

impl Session {
    pub fn age(&self) -> Duration {
        self.created.elapsed()
    }
    pub fn idle(&self) -> Duration {
        self.touched.elapsed()
    }
}

impl Unique for Session {
    fn id(&self) -> ID<Session> {
        self.id
    }
}

/// Explicit session registry with a TTL lifecycle.
///
/// Created on start, touched on every access, removed by an explicit reset
/// or an expiry sweep. This is the only cross-request state in the system,
/// and it is handed to callers; the search engine itself never sees it.
pub struct SessionStore {
    ttl: Duration,
    inner: Mutex<HashMap<ID<Session>, Session>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(HashMap::new()),
        }
    }
    pub fn with_defaults() -> Self {
        Self::new(bdr_core::SESSION_TTL)
    }
    /// Registers a new session and returns its id.
    pub fn start(&self, goal: impl Into<String>, state: GameState) -> ID<Session> {
        let now = Instant::now();
        let session = Session {
            id: ID::default(),
            goal: goal.into(),
            state,
            created: now,
            touched: now,
        };
        let id = session.id();
        log::info!("[sessions] started {}", id);
        self.inner.lock().unwrap().insert(id, session);
        id
    }
    /// Fetches a session snapshot, refreshing its idle clock.
    pub fn get(&self, id: ID<Session>) -> Option<Session> {
        let mut inner = self.inner.lock().unwrap();
        let session = inner.get_mut(&id)?;
        session.touched = Instant::now();
        Some(session.clone())
    }
    /// Replaces a session's state, refreshing its idle clock.
    pub fn update(&self, id: ID<Session>, state: GameState) -> bool {
        let mut inner = self.inner.lock().unwrap();
        match inner.get_mut(&id) {
            Some(session) => {
                session.state = state;
                session.touched = Instant::now();
                true
            }
            None => false,
        }
    }
    /// Explicit removal; true when the session existed.
    pub fn reset(&self, id: ID<Session>) -> bool {
        let removed = self.inner.lock().unwrap().remove(&id).is_some();
        if removed {
            log::info!("[sessions] reset {}", id);
        }
        removed
    }
    /// Removes every session idle past the TTL; returns how many went.
    pub fn sweep(&self) -> usize {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.len();
        inner.retain(|_, session| session.touched.elapsed() < self.ttl);
        let removed = before - inner.len();
        if removed > 0 {
            log::info!("[sessions] swept {} expired", removed);
        }
        removed
    }
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bdr_state::PlayerMetrics;

    fn state() -> GameState {
        GameState::new(100.0, vec![PlayerMetrics::new("Us", 1.0)])
    }

    #[tokio::test]
    async fn start_get_update_reset() {
        let store = SessionStore::with_defaults();
        let id = store.start("grow", state());
        assert_eq!(store.len(), 1);
        let session = store.get(id).unwrap();
        assert_eq!(session.goal, "grow");
        let mut advanced = state();
        advanced.advance_period();
        assert!(store.update(id, advanced));
        assert_eq!(store.get(id).unwrap().state.period, 1);
        assert!(store.reset(id));
        assert!(!store.reset(id));
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_removes_only_idle_sessions() {
        let store = SessionStore::new(Duration::from_secs(60));
        let stale = store.start("old", state());
        tokio::time::advance(Duration::from_secs(45)).await;
        let fresh = store.start("new", state());
        tokio::time::advance(Duration::from_secs(30)).await;
        // stale idle 75s, fresh idle 30s
        assert_eq!(store.sweep(), 1);
        assert!(store.get(stale).is_none());
        assert!(store.get(fresh).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn touch_defers_expiry() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.start("busy", state());
        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(store.get(id).is_some()); // touch
        tokio::time::advance(Duration::from_secs(45)).await;
        assert_eq!(store.sweep(), 0);
        assert!(store.get(id).is_some());
    }
}
