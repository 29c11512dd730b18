//! Request-scoped context inserted by middleware.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

pub type Task = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Work queued by a handler (or one of its dependencies) to run once the
/// response has been produced.
///
/// Tasks run sequentially, in the order they were added.
#[derive(Clone, Default)]
pub struct BackgroundTasks {
    inner: Arc<Mutex<Vec<Task>>>,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_task<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.lock().push(Box::pin(task));
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain the queue.
    pub fn take(&self) -> Vec<Task> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Task>> {
        // A panic while pushing cannot leave the Vec half-updated.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl core::fmt::Debug for BackgroundTasks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BackgroundTasks")
            .field("pending", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tasks_run_in_insertion_order() {
        let tasks = BackgroundTasks::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for i in 0..3 {
            let seen = seen.clone();
            tasks.add_task(async move { seen.lock().unwrap().push(i) });
        }
        assert_eq!(tasks.len(), 3);

        for task in tasks.take() {
            task.await;
        }
        assert!(tasks.is_empty());
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }
}
