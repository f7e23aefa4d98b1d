use super::actions::Action;
use log::{info, warn};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

/// Runs async work off the UI thread.
///
/// Tasks never touch the overlay store; they report back by sending an
/// [`Action`] that the UI thread applies.
pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
            },
            rx,
        )
    }

    /// Sender for actions produced outside of background tasks (overlay callbacks)
    pub fn sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_sender.clone()
    }

    /// Spawn a background operation whose result is delivered as an action
    pub fn spawn_operation<F, Fut>(&mut self, description: String, operation: F) -> TaskId
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: std::future::Future<Output = anyhow::Result<Action>> + Send + 'static,
    {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let action_sender = self.action_sender.clone();
        let desc_for_task = description.clone();

        info!("Starting background task {}: {}", task_id, description);
        let handle = tokio::spawn(async move {
            let action = match operation().await {
                Ok(action) => action,
                Err(e) => {
                    warn!("Background task '{}' failed: {}", desc_for_task, e);
                    Action::OperationFailed(format!("{} failed: {}", desc_for_task, e))
                }
            };
            let _ = action_sender.send(action);
        });

        let task = BackgroundTask {
            id: task_id,
            handle,
            description,
            started_at: std::time::Instant::now(),
        };

        self.tasks.insert(task_id, task);
        task_id
    }

    /// Drop finished tasks and return their ids
    pub fn cleanup_finished_tasks(&mut self) -> Vec<TaskId> {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(task_id, _)| *task_id)
            .collect();

        finished
            .into_iter()
            .filter_map(|task_id| self.tasks.remove(&task_id))
            .map(|task| {
                info!(
                    "Background task {} finished after {:?}: {}",
                    task.id,
                    task.started_at.elapsed(),
                    task.description
                );
                task.id
            })
            .collect()
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        // Cancel all tasks when the manager is dropped
        self.cancel_all_tasks();
    }
}
