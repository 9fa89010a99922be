//! Background job scheduler
//!
//! Runs multi-candidate searches on a small pool of threads dedicated to
//! remote-lookup jobs, so one slow provider cannot starve unrelated
//! background work. Results come back through a single-consumer delivery
//! channel that the requesting context drains on its own tick; the worker
//! never calls into requester state directly.
//!
//! Requester teardown is handled by a liveness token shared between the
//! requester and the job: the worker checks it under lock at delivery time
//! and discards the result if the requester is gone.

use crate::coord::Candidate;
use crate::error::{Error, Result};
use crate::provider::Provider;
use std::sync::{mpsc, Arc, Mutex, MutexGuard};
use std::thread;
use tracing::{debug, error};
use uuid::Uuid;

/// Sending half of the delivery channel handed to `Scheduler::submit`
pub type DeliverySender = tokio::sync::mpsc::UnboundedSender<SearchOutcome>;

/// Receiving half of the delivery channel, held by the consumer
pub type DeliveryReceiver = tokio::sync::mpsc::UnboundedReceiver<SearchOutcome>;

/// Create a delivery channel for search outcomes
pub fn delivery_channel() -> (DeliverySender, DeliveryReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// Shared flag indicating whether a requester context still exists
///
/// The requester marks it dead on teardown; the worker reads it under the
/// same lock just before delivery. Once dead it can never become alive
/// again, and the lock is held only for the check itself.
#[derive(Debug, Clone)]
pub struct LivenessToken {
    alive: Arc<Mutex<bool>>,
}

impl LivenessToken {
    /// Create a token for a live requester
    pub fn new() -> Self {
        Self {
            alive: Arc::new(Mutex::new(true)),
        }
    }

    /// Mark the requester as gone
    ///
    /// Called from the requester's teardown path. In-flight jobs will
    /// discard their results instead of delivering.
    pub fn mark_dead(&self) {
        *self.lock() = false;
    }

    /// Whether the requester is still alive
    pub fn is_alive(&self) -> bool {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        // A poisoned flag is still a valid flag
        self.alive.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for LivenessToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for a submitted background search
#[derive(Debug, Clone)]
pub struct SearchJob {
    /// Unique job id
    pub id: Uuid,

    /// The query being searched
    pub query: String,

    /// Label of the provider executing the job
    pub provider: String,
}

/// Terminal result of a background search, delivered to the consumer
///
/// A failed provider call arrives here as an `Err` result so the consumer
/// can show a failure state rather than an empty list. Jobs whose requester
/// disappeared are discarded and never produce an outcome.
#[derive(Debug)]
pub struct SearchOutcome {
    /// The job this outcome belongs to
    pub job: SearchJob,

    /// Candidates on success, the provider's error otherwise
    pub result: Result<Vec<Candidate>>,
}

struct QueuedJob {
    job: SearchJob,
    provider: Arc<dyn Provider>,
    liveness: LivenessToken,
    delivery: DeliverySender,
}

/// Worker pool for remote-lookup jobs
///
/// Dropping the scheduler closes the queue; workers finish their current
/// job and exit.
pub struct Scheduler {
    queue: mpsc::Sender<QueuedJob>,
    workers: usize,
}

impl Scheduler {
    /// Start a scheduler with the given number of worker threads
    pub fn new(workers: usize) -> Result<Self> {
        let workers = workers.max(1);
        let (queue, rx) = mpsc::channel::<QueuedJob>();
        let rx = Arc::new(Mutex::new(rx));

        for n in 0..workers {
            let rx = Arc::clone(&rx);
            thread::Builder::new()
                .name(format!("lookup-worker-{}", n))
                .spawn(move || worker_loop(rx))?;
        }

        Ok(Self { queue, workers })
    }

    /// Number of worker threads in the pool
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Submit a candidate search for background execution
    ///
    /// Returns the job handle immediately; the outcome arrives on the
    /// delivery channel unless the requester is marked dead first. Empty
    /// queries are rejected before a job is created.
    pub fn submit(
        &self,
        provider: Arc<dyn Provider>,
        query: &str,
        liveness: LivenessToken,
        delivery: DeliverySender,
    ) -> Result<SearchJob> {
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }

        let job = SearchJob {
            id: Uuid::new_v4(),
            query: query.to_string(),
            provider: provider.label().to_string(),
        };
        debug!(id = %job.id, query = %job.query, provider = %job.provider, "submitting search job");

        self.queue
            .send(QueuedJob {
                job: job.clone(),
                provider,
                liveness,
                delivery,
            })
            .map_err(|_| Error::Scheduler("lookup worker pool is not running".to_string()))?;

        Ok(job)
    }
}

fn worker_loop(rx: Arc<Mutex<mpsc::Receiver<QueuedJob>>>) {
    // Each worker drives its provider futures on its own single-threaded
    // runtime; the provider call is the one point a job may block.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to build lookup runtime: {}", e);
            return;
        }
    };

    loop {
        let queued = {
            let guard = rx.lock().unwrap_or_else(|e| e.into_inner());
            guard.recv()
        };
        match queued {
            Ok(queued) => run_job(&runtime, queued),
            // Queue closed: scheduler dropped
            Err(mpsc::RecvError) => break,
        }
    }
}

fn run_job(runtime: &tokio::runtime::Runtime, queued: QueuedJob) {
    let QueuedJob {
        job,
        provider,
        liveness,
        delivery,
    } = queued;
    let id = job.id;

    debug!(%id, query = %job.query, "running candidate search");
    // Worker errors become part of the outcome; nothing escapes the thread
    let result = runtime
        .block_on(provider.search(&job.query))
        .and_then(validate_candidates);

    // Confirm the requester is still there; check and deliver under the
    // liveness lock, then release straight away
    let alive = liveness.lock();
    if *alive {
        if delivery.send(SearchOutcome { job, result }).is_err() {
            debug!(%id, "delivery channel closed, dropping search outcome");
        }
    } else {
        debug!(%id, "requester gone, discarding search outcome");
    }
}

/// Reject any candidate list containing an out-of-range coordinate
fn validate_candidates(candidates: Vec<Candidate>) -> Result<Vec<Candidate>> {
    for candidate in &candidates {
        candidate.coords.validate()?;
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::provider::testing::StubProvider;
    use crate::provider::LookupFuture;

    fn paris() -> Candidate {
        Candidate::new("Paris, France", Coordinates::new(48.8566, 2.3522))
    }

    /// Provider whose search blocks until the test opens the gate
    struct GatedProvider {
        gate: Mutex<mpsc::Receiver<()>>,
        candidates: Vec<Candidate>,
    }

    impl GatedProvider {
        fn new(candidates: Vec<Candidate>) -> (Self, mpsc::Sender<()>) {
            let (tx, rx) = mpsc::channel();
            (
                Self {
                    gate: Mutex::new(rx),
                    candidates,
                },
                tx,
            )
        }
    }

    impl Provider for GatedProvider {
        fn label(&self) -> &'static str {
            "gated"
        }

        fn resolve<'a>(&'a self, name: &'a str) -> LookupFuture<'a, Coordinates> {
            Box::pin(async move { Err(Error::NoMatch(name.to_string())) })
        }

        fn search<'a>(&'a self, _query: &'a str) -> LookupFuture<'a, Vec<Candidate>> {
            Box::pin(async move {
                let _ = self.gate.lock().unwrap().recv();
                Ok(self.candidates.clone())
            })
        }
    }

    #[test]
    fn test_delivers_to_live_requester() {
        let scheduler = Scheduler::new(1).unwrap();
        let provider = Arc::new(StubProvider::named("stub", vec![paris()]));
        let (tx, mut rx) = delivery_channel();
        let token = LivenessToken::new();

        let job = scheduler
            .submit(provider, "Paris", token.clone(), tx)
            .unwrap();

        let outcome = rx.blocking_recv().expect("outcome should be delivered");
        assert_eq!(outcome.job.id, job.id);
        assert_eq!(outcome.result.unwrap(), vec![paris()]);
        assert!(token.is_alive());
    }

    #[test]
    fn test_discards_when_requester_gone() {
        let scheduler = Scheduler::new(1).unwrap();
        let (provider, gate) = GatedProvider::new(vec![paris()]);
        let provider = Arc::new(provider);
        let (tx, mut rx) = delivery_channel();
        let token = LivenessToken::new();

        scheduler
            .submit(provider, "Paris", token.clone(), tx)
            .unwrap();

        // Tear the requester down while the job is still blocked, then let
        // the provider complete
        token.mark_dead();
        gate.send(()).unwrap();

        // The worker drops the delivery sender without sending; the channel
        // closes with no outcome ever delivered
        assert!(rx.blocking_recv().is_none());
    }

    #[test]
    fn test_requester_gone_before_worker_starts() {
        let scheduler = Scheduler::new(1).unwrap();
        let provider = Arc::new(StubProvider::named("stub", vec![paris()]));
        let (tx, mut rx) = delivery_channel();
        let token = LivenessToken::new();

        // Dead before submission even reaches a worker: same discard path
        token.mark_dead();
        scheduler.submit(provider, "Paris", token, tx).unwrap();

        assert!(rx.blocking_recv().is_none());
    }

    #[test]
    fn test_rejects_empty_query() {
        let scheduler = Scheduler::new(1).unwrap();
        let provider = Arc::new(StubProvider::named("stub", vec![paris()]));
        let (tx, _rx) = delivery_channel();

        assert!(matches!(
            scheduler.submit(provider, "   ", LivenessToken::new(), tx),
            Err(Error::EmptyQuery)
        ));
    }

    #[test]
    fn test_provider_failure_is_delivered_as_failed_job() {
        let scheduler = Scheduler::new(1).unwrap();
        let provider = Arc::new(StubProvider::failing("stub", "boom"));
        let (tx, mut rx) = delivery_channel();

        scheduler
            .submit(provider, "Paris", LivenessToken::new(), tx)
            .unwrap();

        let outcome = rx.blocking_recv().expect("failure should be delivered");
        assert!(matches!(
            outcome.result,
            Err(Error::ProviderRequestFailed(_))
        ));
    }

    #[test]
    fn test_out_of_range_candidates_never_delivered_as_success() {
        let scheduler = Scheduler::new(1).unwrap();
        let bogus = Candidate::new("Off the map", Coordinates::new(95.0, 0.0));
        let provider = Arc::new(StubProvider::named("stub", vec![paris(), bogus]));
        let (tx, mut rx) = delivery_channel();

        scheduler
            .submit(provider, "Paris", LivenessToken::new(), tx)
            .unwrap();

        let outcome = rx.blocking_recv().unwrap();
        assert!(matches!(outcome.result, Err(Error::InvalidCoordinates(_))));
    }

    #[test]
    fn test_boundary_coordinates_never_delivered_as_success() {
        let scheduler = Scheduler::new(1).unwrap();
        let pole = Candidate::new("North Pole", Coordinates::new(90.0, 0.0));
        let provider = Arc::new(StubProvider::named("stub", vec![pole]));
        let (tx, mut rx) = delivery_channel();

        scheduler
            .submit(provider, "North Pole", LivenessToken::new(), tx)
            .unwrap();

        let outcome = rx.blocking_recv().unwrap();
        assert!(matches!(outcome.result, Err(Error::InvalidCoordinates(_))));
    }

    #[test]
    fn test_zero_workers_clamps_to_one() {
        let scheduler = Scheduler::new(0).unwrap();
        assert_eq!(scheduler.workers(), 1);
    }

    #[test]
    fn test_liveness_token_is_one_way() {
        let token = LivenessToken::new();
        assert!(token.is_alive());

        token.mark_dead();
        assert!(!token.is_alive());

        // Marking again changes nothing
        token.mark_dead();
        assert!(!token.is_alive());
    }

    #[test]
    fn test_concurrent_jobs_all_complete() {
        let scheduler = Scheduler::new(2).unwrap();
        assert_eq!(scheduler.workers(), 2);
        let provider = Arc::new(StubProvider::named("stub", vec![paris()]));
        let (tx, mut rx) = delivery_channel();

        for _ in 0..4 {
            scheduler
                .submit(Arc::clone(&provider) as Arc<dyn Provider>, "Paris", LivenessToken::new(), tx.clone())
                .unwrap();
        }
        drop(tx);

        let mut delivered = 0;
        while let Some(outcome) = rx.blocking_recv() {
            assert!(outcome.result.is_ok());
            delivered += 1;
        }
        assert_eq!(delivered, 4);
    }
}
