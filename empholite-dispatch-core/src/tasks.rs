//! Keyed async tasks whose results are published on the action bus
//!
//! At most one task runs per [`TaskKey`]. Spawning under a key that is
//! already running aborts the old task first, so a superseded request never
//! publishes its result.
//!
//! ```ignore
//! let mut tasks = TaskManager::new(bus.clone());
//!
//! tasks.spawn("responses", async move {
//!     match client.list().await {
//!         Ok(payload) => Action::ResponsesDidLoad { generation, payload },
//!         Err(e) => Action::ResponsesDidFail { generation, failure: e.into() },
//!     }
//! });
//!
//! tasks.debounce("dialog.hide", Duration::from_millis(100), async { Action::DialogHide });
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::debug;

use crate::bus::ActionBus;
use crate::Action;

/// Identifies a task for cancellation and replacement
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Runs async work and publishes the resulting action
pub struct TaskManager<A: Action> {
    tasks: HashMap<TaskKey, AbortHandle>,
    bus: ActionBus<A>,
}

impl<A: Action> TaskManager<A> {
    pub fn new(bus: ActionBus<A>) -> Self {
        Self {
            tasks: HashMap::new(),
            bus,
        }
    }

    /// Spawn a task, aborting any task already running under `key`
    ///
    /// The action the future resolves to is published on the bus. An
    /// aborted task publishes nothing.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        self.spawn_after(key.into(), None, future)
    }

    /// Like [`spawn`](Self::spawn), but wait `delay` first
    ///
    /// Calling again with the same key before the delay expires restarts
    /// the timer.
    pub fn debounce<F>(&mut self, key: impl Into<TaskKey>, delay: Duration, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        self.spawn_after(key.into(), Some(delay), future)
    }

    fn spawn_after<F>(&mut self, key: TaskKey, delay: Option<Duration>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        self.cancel(&key);

        let bus = self.bus.clone();
        let handle = tokio::spawn(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let action = future.await;
            bus.publish(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Abort the task under `key`, if any
    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(handle) = self.tasks.remove(key) {
            if !handle.is_finished() {
                debug!(task = %key, "Aborting task");
            }
            handle.abort();
        }
    }

    /// Abort every task
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    /// Whether a task under `key` is still in flight
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks.get(key).is_some_and(|h| !h.is_finished())
    }

    pub fn len(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<A: Action> Drop for TaskManager<A> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Done(usize),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "Done"
        }
    }

    #[test]
    fn test_task_key() {
        let k1 = TaskKey::new("responses");
        let k2: TaskKey = "responses".into();
        assert_eq!(k1, k2);
        assert_eq!(k1.name(), "responses");
        assert_eq!(k1.to_string(), "responses");
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_publishes_result() {
        let bus = ActionBus::new();
        let mut sub = bus.subscribe();
        let mut tasks = TaskManager::new(bus.clone());

        tasks.spawn("test", async { TestAction::Done(42) });

        let action = tokio::time::timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout");
        assert_eq!(action, Some(TestAction::Done(42)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_aborts_previous() {
        let bus = ActionBus::new();
        let mut sub = bus.subscribe();
        let mut tasks = TaskManager::new(bus.clone());
        let counter = Arc::new(AtomicUsize::new(0));

        let c1 = counter.clone();
        tasks.spawn("test", async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            c1.fetch_add(1, Ordering::SeqCst);
            TestAction::Done(1)
        });

        let c2 = counter.clone();
        tasks.spawn("test", async move {
            c2.fetch_add(10, Ordering::SeqCst);
            TestAction::Done(2)
        });

        let action = tokio::time::timeout(Duration::from_millis(50), sub.recv())
            .await
            .expect("timeout");
        assert_eq!(action, Some(TestAction::Done(2)));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 10);
        assert!(sub.try_recv().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_waits() {
        let bus = ActionBus::new();
        let mut sub = bus.subscribe();
        let mut tasks = TaskManager::new(bus.clone());

        tasks.debounce("hide", Duration::from_millis(100), async {
            TestAction::Done(1)
        });

        let early = tokio::time::timeout(Duration::from_millis(60), sub.recv()).await;
        assert!(early.is_err());

        let action = tokio::time::timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout");
        assert_eq!(action, Some(TestAction::Done(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_restarts_timer() {
        let bus = ActionBus::new();
        let mut sub = bus.subscribe();
        let mut tasks = TaskManager::new(bus.clone());

        tasks.debounce("hide", Duration::from_millis(100), async {
            TestAction::Done(1)
        });
        tokio::time::sleep(Duration::from_millis(60)).await;
        tasks.debounce("hide", Duration::from_millis(100), async {
            TestAction::Done(2)
        });

        let action = tokio::time::timeout(Duration::from_millis(200), sub.recv())
            .await
            .expect("timeout");
        assert_eq!(action, Some(TestAction::Done(2)));
        assert!(sub.try_recv().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let bus = ActionBus::new();
        let mut sub = bus.subscribe();
        let mut tasks = TaskManager::new(bus.clone());
        let key = TaskKey::new("test");

        tasks.spawn(key.clone(), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            TestAction::Done(1)
        });
        assert!(tasks.is_running(&key));

        tasks.cancel(&key);
        assert!(!tasks.is_running(&key));

        let result = tokio::time::timeout(Duration::from_millis(200), sub.recv()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all() {
        let bus = ActionBus::<TestAction>::new();
        let mut tasks = TaskManager::new(bus);

        tasks.spawn("a", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            TestAction::Done(1)
        });
        tasks.spawn("b", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            TestAction::Done(2)
        });
        assert_eq!(tasks.len(), 2);

        tasks.cancel_all();
        assert!(tasks.is_empty());
    }
}
