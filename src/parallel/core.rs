use anyhow::{Result, bail};
use crossbeam::channel::{Receiver, Sender, bounded};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Work item tagged with its submission index
type Indexed<T> = (usize, T);

/// Generic parallel execution framework for processing work items.
///
/// Results come back in submission order regardless of which worker
/// finishes first. The first failing item stops workers from picking up
/// anything new; items already running are allowed to finish.
pub struct ParallelExecutor<T, R> {
    max_workers: usize,
    buffer_size: usize,
    _phantom: std::marker::PhantomData<(T, R)>,
}

/// Context for worker threads to avoid too many function parameters
struct WorkerContext<'a, T, R, F, P> {
    worker_id: usize,
    work_rx: Receiver<Indexed<T>>,
    result_tx: Sender<Indexed<Result<R>>>,
    progress_counter: &'a AtomicUsize,
    cancelled: &'a AtomicBool,
    total_items: usize,
    processor: &'a F,
    progress_reporter: Option<&'a P>,
}

impl<T, R> ParallelExecutor<T, R>
where
    T: Send,
    R: Send,
{
    pub fn new(max_workers: usize) -> Self {
        let max_workers = max_workers.max(1);
        Self {
            max_workers,
            buffer_size: max_workers * 2,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Execute work items in parallel using a producer-consumer pattern
    pub fn execute<F, P>(
        &self,
        work_items: Vec<T>,
        processor: F,
        progress_reporter: Option<P>,
    ) -> Result<Vec<R>>
    where
        F: Fn(&T, usize) -> Result<R> + Sync, // (item, worker_id)
        P: Fn(usize, usize, usize) + Sync,    // (current, total, worker_id)
    {
        if work_items.is_empty() {
            return Ok(Vec::new());
        }

        let total_items = work_items.len();
        let actual_workers = std::cmp::min(self.max_workers, total_items);
        let (work_tx, work_rx) = bounded::<Indexed<T>>(self.buffer_size);
        let (result_tx, result_rx) = bounded::<Indexed<Result<R>>>(self.buffer_size);

        let progress_counter = AtomicUsize::new(0);
        let cancelled = AtomicBool::new(false);

        let collected = crossbeam::thread::scope(|s| {
            // Spawn worker threads
            for worker_id in 0..actual_workers {
                let ctx = WorkerContext {
                    worker_id,
                    work_rx: work_rx.clone(),
                    result_tx: result_tx.clone(),
                    progress_counter: &progress_counter,
                    cancelled: &cancelled,
                    total_items,
                    processor: &processor,
                    progress_reporter: progress_reporter.as_ref(),
                };

                s.spawn(move |_| Self::worker_thread(ctx));
            }

            // Producer thread: send work to workers
            s.spawn(move |_| {
                for indexed in work_items.into_iter().enumerate() {
                    if work_tx.send(indexed).is_err() {
                        break; // Workers dropped
                    }
                }
            });

            // Drop our handles so the channels close when the threads finish
            drop(work_rx);
            drop(result_tx);

            Self::collect_results(result_rx, total_items)
        })
        .map_err(|_| anyhow::anyhow!("Thread panic occurred during parallel execution"))?;

        Self::into_ordered(collected, total_items)
    }

    fn worker_thread<F, P>(ctx: WorkerContext<'_, T, R, F, P>)
    where
        F: Fn(&T, usize) -> Result<R>,
        P: Fn(usize, usize, usize),
    {
        while let Ok((index, work_item)) = ctx.work_rx.recv() {
            // Keep draining so the producer never blocks, but do no more work
            if ctx.cancelled.load(Ordering::Acquire) {
                continue;
            }

            let result = (ctx.processor)(&work_item, ctx.worker_id);
            if result.is_err() {
                ctx.cancelled.store(true, Ordering::Release);
            }

            if ctx.result_tx.send((index, result)).is_err() {
                break; // Receiver dropped
            }

            let current = ctx.progress_counter.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(reporter) = ctx.progress_reporter {
                reporter(current, ctx.total_items, ctx.worker_id);
            }
        }
    }

    /// Gather results until every worker has hung up
    fn collect_results(
        result_rx: Receiver<Indexed<Result<R>>>,
        total_items: usize,
    ) -> Vec<Option<Result<R>>> {
        let mut slots: Vec<Option<Result<R>>> = (0..total_items).map(|_| None).collect();

        while let Ok((index, result)) = result_rx.recv() {
            if let Some(slot) = slots.get_mut(index) {
                *slot = Some(result);
            }
        }

        slots
    }

    /// Restore submission order; the earliest failure wins
    fn into_ordered(slots: Vec<Option<Result<R>>>, total_items: usize) -> Result<Vec<R>> {
        let mut ordered = Vec::with_capacity(total_items);
        let mut first_error = None;

        for slot in slots {
            match slot {
                Some(Ok(result)) => ordered.push(result),
                Some(Err(e)) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
                None => {} // Skipped after cancellation
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }
        if ordered.len() != total_items {
            bail!(
                "Only {} of {} work items were processed",
                ordered.len(),
                total_items
            );
        }
        Ok(ordered)
    }
}

/// Sequential execution strategy for small workloads and single-worker runs
pub struct SequentialExecutor;

impl SequentialExecutor {
    pub fn execute<T, R, F, P>(
        work_items: Vec<T>,
        processor: F,
        progress_reporter: Option<P>,
    ) -> Result<Vec<R>>
    where
        F: Fn(&T, usize) -> Result<R>, // Sequential uses worker_id 0
        P: Fn(usize, usize, usize),
    {
        let total_items = work_items.len();
        let mut results = Vec::with_capacity(total_items);

        for (index, work_item) in work_items.iter().enumerate() {
            results.push(processor(work_item, 0)?);

            if let Some(reporter) = &progress_reporter {
                reporter(index + 1, total_items, 0);
            }
        }

        Ok(results)
    }
}

/// Execution strategy enum for choosing between parallel and sequential
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStrategy {
    Sequential,
    Parallel { workers: usize },
}

impl ExecutionStrategy {
    pub fn execute<T, R, F, P>(
        &self,
        work_items: Vec<T>,
        processor: F,
        progress_reporter: Option<P>,
    ) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(&T, usize) -> Result<R> + Sync,
        P: Fn(usize, usize, usize) + Sync,
    {
        match self {
            ExecutionStrategy::Sequential => {
                SequentialExecutor::execute(work_items, processor, progress_reporter)
            }
            ExecutionStrategy::Parallel { workers } => {
                let executor = ParallelExecutor::new(*workers);
                executor.execute(work_items, processor, progress_reporter)
            }
        }
    }

    /// Threshold-based choice between sequential and parallel execution.
    ///
    /// Parallel needs at least `min_items_for_parallel` items and more than
    /// one worker; the worker count is capped at the number of items.
    ///
    /// ```rust
    /// use cppfmt::parallel::ExecutionStrategy;
    ///
    /// assert_eq!(ExecutionStrategy::auto(1, 2, 8), ExecutionStrategy::Sequential);
    /// assert_eq!(ExecutionStrategy::auto(3, 2, 1), ExecutionStrategy::Sequential);
    /// assert_eq!(
    ///     ExecutionStrategy::auto(3, 2, 8),
    ///     ExecutionStrategy::Parallel { workers: 3 }
    /// );
    /// ```
    pub fn auto(
        work_items_count: usize,
        min_items_for_parallel: usize,
        optimal_workers: usize,
    ) -> Self {
        let workers = std::cmp::min(optimal_workers, work_items_count);
        if work_items_count >= min_items_for_parallel && workers > 1 {
            ExecutionStrategy::Parallel { workers }
        } else {
            ExecutionStrategy::Sequential
        }
    }

    /// Worker count from configuration: 0 means one per logical CPU.
    ///
    /// ```rust
    /// use cppfmt::parallel::ExecutionStrategy;
    ///
    /// assert!(ExecutionStrategy::calculate_optimal_workers(0) >= 1);
    /// assert_eq!(ExecutionStrategy::calculate_optimal_workers(3), 3);
    /// ```
    pub fn calculate_optimal_workers(max_threads_config: usize) -> usize {
        if max_threads_config > 0 {
            max_threads_config
        } else {
            std::cmp::max(1, num_cpus::get())
        }
    }
}
