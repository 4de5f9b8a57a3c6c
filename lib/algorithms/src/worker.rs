// Dedicated clustering worker
// A single background thread drains a FIFO queue of pipeline runs so callers
// stay responsive; each job can be cancelled between algorithm rounds.

use crate::pipeline::{ClusteringOutcome, ClusteringPipeline};
use clusterx_core::{CancelFlag, Error, Record, Result};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

pub type JobId = u64;

struct ClusteringJob {
    id: JobId,
    pipeline: ClusteringPipeline,
    records: Vec<Record>,
    cancel: CancelFlag,
    reply: mpsc::Sender<Result<ClusteringOutcome>>,
}

impl ClusteringJob {
    fn execute(self, completed: &AtomicU64) {
        let ClusteringJob {
            id,
            pipeline,
            records,
            cancel,
            reply,
        } = self;

        let result = if cancel.is_cancelled() {
            Err(Error::Cancelled { round: 0 })
        } else {
            catch_unwind(AssertUnwindSafe(|| pipeline.run_with_cancel(records, &cancel)))
                .unwrap_or_else(|_| Err(Error::Worker(format!("job {} panicked", id))))
        };

        if let Err(e) = &result {
            warn!(job = id, error = %e, "clustering job failed");
        } else {
            debug!(job = id, "clustering job finished");
        }
        completed.fetch_add(1, Ordering::Relaxed);
        // The caller may have dropped its handle; nothing left to do then.
        let _ = reply.send(result);
    }
}

/// Handle to a submitted job
#[derive(Debug)]
pub struct JobHandle {
    id: JobId,
    cancel: CancelFlag,
    receiver: mpsc::Receiver<Result<ClusteringOutcome>>,
}

impl JobHandle {
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Ask the job to stop. A queued job is skipped; a running one stops
    /// before its next round.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Block until the job finishes
    pub fn wait(self) -> Result<ClusteringOutcome> {
        self.receiver
            .recv()
            .map_err(|_| Error::Worker(format!("job {} was dropped before completing", self.id)))?
    }

    /// The result if the job already finished
    pub fn try_result(&self) -> Option<Result<ClusteringOutcome>> {
        self.receiver.try_recv().ok()
    }
}

struct JobQueue {
    jobs: Mutex<VecDeque<ClusteringJob>>,
    condvar: Condvar,
    running: AtomicBool,
}

/// Background thread running clustering pipelines one at a time
pub struct ClusteringWorker {
    queue: Arc<JobQueue>,
    thread: Option<JoinHandle<()>>,
    next_id: AtomicU64,
    completed: Arc<AtomicU64>,
}

impl ClusteringWorker {
    /// Start the worker thread
    pub fn spawn() -> Result<Self> {
        let queue = Arc::new(JobQueue {
            jobs: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
            running: AtomicBool::new(true),
        });
        let completed = Arc::new(AtomicU64::new(0));

        let thread_queue = queue.clone();
        let thread_completed = completed.clone();
        let thread = thread::Builder::new()
            .name("clusterx-worker".to_string())
            .spawn(move || loop {
                let job = {
                    let mut jobs = thread_queue.jobs.lock();

                    // Wait for jobs or shutdown signal
                    while jobs.is_empty() && thread_queue.running.load(Ordering::Acquire) {
                        thread_queue.condvar.wait(&mut jobs);
                    }

                    // Queued jobs are drained even after shutdown
                    match jobs.pop_front() {
                        Some(job) => job,
                        None => break,
                    }
                };

                job.execute(&thread_completed);
            })?;

        Ok(Self {
            queue,
            thread: Some(thread),
            next_id: AtomicU64::new(1),
            completed,
        })
    }

    /// Queue a pipeline run on `records`
    pub fn submit(&self, pipeline: ClusteringPipeline, records: Vec<Record>) -> Result<JobHandle> {
        if !self.queue.running.load(Ordering::Acquire) {
            return Err(Error::Worker("worker has been shut down".to_string()));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let cancel = CancelFlag::new();
        let (reply, receiver) = mpsc::channel();

        let mut jobs = self.queue.jobs.lock();
        jobs.push_back(ClusteringJob {
            id,
            pipeline,
            records,
            cancel: cancel.clone(),
            reply,
        });
        self.queue.condvar.notify_one();
        debug!(job = id, queued = jobs.len(), "submitted clustering job");

        Ok(JobHandle {
            id,
            cancel,
            receiver,
        })
    }

    pub fn pending_jobs(&self) -> usize {
        self.queue.jobs.lock().len()
    }

    pub fn jobs_completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    /// Stop accepting jobs, finish queued ones and join the thread
    pub fn shutdown(&mut self) {
        {
            let _jobs = self.queue.jobs.lock();
            self.queue.running.store(false, Ordering::Release);
            self.queue.condvar.notify_all();
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("clustering worker thread panicked");
            }
        }
    }
}

impl Drop for ClusteringWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
