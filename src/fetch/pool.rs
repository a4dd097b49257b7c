use std::future::Future;

use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};

use super::FetchResult;

/// Result of one pool task, tagged with the index of its input.
#[derive(Debug)]
pub struct TaskOutcome<O> {
    pub index: usize,
    pub result: FetchResult<O>,
}

/// Runs independent tasks on at most `workers` concurrent tokio tasks.
///
/// Outcomes come back in input order regardless of completion order. Task
/// failures, panics included, stay inside their own outcome.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(AppError::message(
                "worker pool requires at least one worker",
            ));
        }
        Ok(Self { workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub async fn run<I, O, F, Fut>(&self, inputs: Vec<I>, task: F) -> Result<Vec<TaskOutcome<O>>>
    where
        I: Send + 'static,
        O: Send + 'static,
        F: Fn(I) -> Fut,
        Fut: Future<Output = FetchResult<O>> + Send + 'static,
    {
        let total = inputs.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let mut slots: Vec<Option<FetchResult<O>>> = (0..total).map(|_| None).collect();

        // Spawning happens lazily as buffer_unordered pulls, so at most `workers` run at once.
        let mut completed = stream::iter(inputs.into_iter().enumerate())
            .map(|(index, input)| {
                let handle = tokio::spawn(task(input));
                async move { (index, handle.await) }
            })
            .buffer_unordered(self.workers);

        while let Some((index, joined)) = completed.next().await {
            slots[index] = Some(joined.unwrap_or_else(|err| Err(AppError::Join(err))));
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.map(|result| TaskOutcome { index, result }).ok_or_else(|| {
                    AppError::message(format!("worker pool lost the outcome for input {index}"))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::{sleep, Duration};

    #[test]
    fn zero_workers_is_a_construction_error() {
        assert!(WorkerPool::new(0).is_err());
        assert_eq!(WorkerPool::new(3).unwrap().workers(), 3);
    }

    #[tokio::test]
    async fn empty_input_yields_no_outcomes() {
        let pool = WorkerPool::new(2).unwrap();
        let outcomes = pool
            .run(Vec::<usize>::new(), |n| async move { Ok::<_, AppError>(n) })
            .await
            .unwrap();
        assert!(outcomes.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn preserves_input_order_when_completion_is_reversed() {
        let pool = WorkerPool::new(4).unwrap();
        let inputs: Vec<usize> = (0..12).collect();

        let outcomes = pool
            .run(inputs.clone(), |n| async move {
                // Later inputs finish first.
                sleep(Duration::from_millis(((12 - n) * 5) as u64)).await;
                Ok::<_, AppError>(n * 10)
            })
            .await
            .unwrap();

        assert_eq!(outcomes.len(), inputs.len());
        for (i, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.index, i);
            assert_eq!(*outcome.result.as_ref().unwrap(), inputs[i] * 10);
        }
    }

    #[tokio::test]
    async fn task_errors_do_not_cancel_siblings() {
        let pool = WorkerPool::new(2).unwrap();
        let outcomes = pool
            .run(vec![1, 2, 3, 4, 5], |n| async move {
                if n % 2 == 0 {
                    Err(AppError::message(format!("even {n}")))
                } else {
                    Ok(n)
                }
            })
            .await
            .unwrap();

        let ok: Vec<bool> = outcomes.iter().map(|outcome| outcome.result.is_ok()).collect();
        assert_eq!(ok, vec![true, false, true, false, true]);
        assert!(outcomes[1]
            .result
            .as_ref()
            .unwrap_err()
            .to_string()
            .contains("even 2"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrency_never_exceeds_worker_count() {
        let pool = WorkerPool::new(3).unwrap();
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let task_active = Arc::clone(&active);
        let task_peak = Arc::clone(&peak);
        let outcomes = pool
            .run((0..10).collect::<Vec<u32>>(), move |n| {
                let active = Arc::clone(&task_active);
                let peak = Arc::clone(&task_peak);
                async move {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    sleep(Duration::from_millis(10)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                    Ok::<_, AppError>(n)
                }
            })
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 10);
        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert!(peak.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn panicking_task_is_confined_to_its_slot() {
        let pool = WorkerPool::new(3).unwrap();
        let finished = Arc::new(AtomicUsize::new(0));

        let task_finished = Arc::clone(&finished);
        let outcomes = pool
            .run(vec![0u8, 1, 2], move |n| {
                let finished = Arc::clone(&task_finished);
                async move {
                    if n == 1 {
                        panic!("boom");
                    }
                    sleep(Duration::from_millis(50)).await;
                    finished.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, AppError>(n)
                }
            })
            .await
            .unwrap();

        // Siblings complete before run returns and keep their own slots.
        assert_eq!(finished.load(Ordering::SeqCst), 2);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(*outcomes[0].result.as_ref().unwrap(), 0);
        assert!(matches!(outcomes[1].result, Err(AppError::Join(_))));
        assert_eq!(*outcomes[2].result.as_ref().unwrap(), 2);
    }
}
