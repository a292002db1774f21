use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::tasks::queue::TaskQueue;
use crate::tasks::task::{Task, TaskPriority};

const SLEEP_ON_EMPTY: Duration = Duration::from_millis(10);
const HIGH_ATTEMPTS: u32 = 5;
const STANDARD_ATTEMPTS: u32 = 3;
const LOW_ATTEMPTS: u32 = 1;

struct Inner {
    high: TaskQueue<Task>,
    standard: TaskQueue<Task>,
    low: TaskQueue<Task>,
    done: AtomicBool,
}

/// The process-wide weighted-priority worker pool. Three FIFO queues feed a
/// fixed set of worker tasks under a 5:3:1 polling discipline: five attempts
/// against `High`, then three against `Standard`, then one against `Low`,
/// falling back to a 10ms sleep when all nine attempts miss. This statistical
/// discipline bounds `Standard`/`Low` starvation without giving either queue
/// a hard priority inversion over `High`.
#[derive(Clone)]
pub struct TaskManager {
    inner: Arc<Inner>,
}

impl TaskManager {
    /// Spawns `num_workers` tokio tasks, each running the polling loop until
    /// `shutdown` is called. Workers run on whatever runtime `new` is called
    /// from; this crate always calls it from the `actix-web`/tokio
    /// multi-threaded runtime set up in `main`.
    pub fn new(num_workers: usize) -> Self {
        let inner =
            Arc::new(Inner { high: TaskQueue::new(), standard: TaskQueue::new(), low: TaskQueue::new(), done: AtomicBool::new(false) });

        for worker_id in 0..num_workers {
            let inner = inner.clone();
            tokio::spawn(Self::worker_loop(worker_id, inner));
        }

        Self { inner }
    }

    pub fn submit(&self, task: Task) {
        match task.priority() {
            TaskPriority::High => self.inner.high.push(task),
            TaskPriority::Standard => self.inner.standard.push(task),
            TaskPriority::Low => self.inner.low.push(task),
        }
    }

    /// Transitions every worker to exit at its next poll cycle boundary.
    /// In-flight tasks complete normally; anything still queued is dropped.
    pub fn shutdown(&self) {
        self.inner.done.store(true, Ordering::SeqCst);
    }

    async fn worker_loop(worker_id: usize, inner: Arc<Inner>) {
        while !inner.done.load(Ordering::SeqCst) {
            match Self::try_pop_weighted(&inner) {
                Some(task) => task.process(worker_id).await,
                None => tokio::time::sleep(SLEEP_ON_EMPTY).await,
            }
        }
    }

    fn try_pop_weighted(inner: &Inner) -> Option<Task> {
        for _ in 0..HIGH_ATTEMPTS {
            if let Some(task) = inner.high.try_pop() {
                return Some(task);
            }
        }
        for _ in 0..STANDARD_ATTEMPTS {
            if let Some(task) = inner.standard.try_pop() {
                return Some(task);
            }
        }
        for _ in 0..LOW_ATTEMPTS {
            if let Some(task) = inner.low.try_pop() {
                return Some(task);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reproduces the polling policy against pre-seeded queues directly,
    /// without a worker thread, so FIFO-per-class and the 5:3:1 weighting
    /// can be asserted deterministically.
    fn seeded(high: usize, standard: usize, low: usize) -> Inner {
        let inner = Inner { high: TaskQueue::new(), standard: TaskQueue::new(), low: TaskQueue::new(), done: AtomicBool::new(false) };
        for i in 0..high {
            inner.high.push(Task::Message(format!("h{i}")));
        }
        for i in 0..standard {
            inner.standard.push(Task::Message(format!("s{i}")));
        }
        for i in 0..low {
            inner.low.push(Task::Message(format!("l{i}")));
        }
        inner
    }

    fn label(task: &Task) -> &str {
        match task {
            Task::Message(text) => text.as_str(),
            _ => "other",
        }
    }

    #[test]
    fn one_of_each_priority_drains_high_then_standard_then_low() {
        let inner = seeded(1, 1, 1);
        let first = TaskManager::try_pop_weighted(&inner).unwrap();
        let second = TaskManager::try_pop_weighted(&inner).unwrap();
        let third = TaskManager::try_pop_weighted(&inner).unwrap();
        assert_eq!(label(&first), "h0");
        assert_eq!(label(&second), "s0");
        assert_eq!(label(&third), "l0");
        assert!(TaskManager::try_pop_weighted(&inner).is_none());
    }

    /// Once a success is found within the 5 `High` attempts, the policy
    /// restarts the cycle at `High` rather than moving on — so a saturated
    /// `High` queue fully drains before `Standard` is ever attempted. This is
    /// the design notes' explicit caveat: "do not interpret 5 attempts as
    /// execute up to 5 tasks before dropping to Standard".
    #[test]
    fn saturated_high_queue_drains_completely_before_standard_is_tried() {
        let inner = seeded(100, 100, 100);
        let drained: Vec<String> = (0..300).map(|_| label(&TaskManager::try_pop_weighted(&inner).unwrap()).to_string()).collect();
        assert!(drained[..100].iter().all(|t| t.starts_with('h')));
        assert!(drained[100..200].iter().all(|t| t.starts_with('s')));
        assert!(drained[200..].iter().all(|t| t.starts_with('l')));
    }

    /// Once `High` and `Standard` are both empty, every cycle still attempts
    /// `Low` exactly once — this is the source of starvation resistance: a
    /// refilled `High` queue can never prevent a already-queued `Low` task
    /// from eventually being tried.
    #[test]
    fn empty_high_and_standard_queues_do_not_block_low_attempts() {
        let inner = seeded(0, 0, 3);
        assert!(TaskManager::try_pop_weighted(&inner).is_some());
        assert!(TaskManager::try_pop_weighted(&inner).is_some());
        assert!(TaskManager::try_pop_weighted(&inner).is_some());
        assert!(TaskManager::try_pop_weighted(&inner).is_none());
    }

    #[test]
    fn high_priority_tasks_stay_fifo_within_one_worker() {
        let inner = seeded(5, 0, 0);
        let order: Vec<String> = (0..5).map(|_| label(&TaskManager::try_pop_weighted(&inner).unwrap()).to_string()).collect();
        assert_eq!(order, vec!["h0", "h1", "h2", "h3", "h4"]);
    }
}
