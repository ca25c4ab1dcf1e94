/*!
 * Brute-force coordinator
 *
 * Owns the shared search state, fans the candidate list out to a
 * bounded pool of worker threads, and blocks until every worker has
 * terminated. The coordinator never probes a credential itself; it
 * only validates configuration, partitions work, and aggregates the
 * terminal state into a result.
 */

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use thiserror::Error;

use crate::partition::partition;
use crate::probe::ConnectionProbe;
use crate::progress::ProgressSink;
use crate::wordlist::Wordlist;
use crate::worker;

/// Upper bound on the worker pool. Values outside `[1, MAX_WORKERS]`
/// are rejected, never clamped.
pub const MAX_WORKERS: usize = 16;

/// Fatal configuration errors, raised before any worker is spawned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("worker count must be between 1 and {MAX_WORKERS}, got {0}")]
    InvalidWorkerCount(usize),

    #[error("candidate list is empty")]
    EmptyCandidateList,

    #[error("target SSID must not be empty")]
    EmptyTarget,

    #[error("connection timeout must be positive")]
    InvalidTimeout,
}

/// Search configuration consumed by the coordinator.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// SSID of the network under test.
    pub target: String,
    /// Per-attempt connection timeout.
    pub timeout: Duration,
    /// Worker thread count, 1 to [`MAX_WORKERS`].
    pub workers: usize,
}

/// Terminal outcome of a search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub found: bool,
    pub credential: Option<String>,
    /// Candidates processed (probed or skipped by the length policy).
    pub attempts: u64,
    pub duration: Duration,
}

/// Shared mutable state of one search run.
///
/// The winner is published under a single mutex: the found-check and
/// the credential write happen in one critical section, so the flag
/// can never disagree with the winner field. The atomic flag is only
/// a read fast-path for the per-candidate cancellation check.
pub struct SearchState {
    found: AtomicBool,
    winner: Mutex<Option<String>>,
    attempts: AtomicU64,
}

impl SearchState {
    fn new() -> Self {
        Self {
            found: AtomicBool::new(false),
            winner: Mutex::new(None),
            attempts: AtomicU64::new(0),
        }
    }

    /// True once any worker has published a winning credential.
    /// Never reverts to false.
    pub(crate) fn found(&self) -> bool {
        self.found.load(Ordering::Acquire)
    }

    /// Publish `credential` as the winner. First writer wins; later
    /// callers lose the race and get `false`.
    pub(crate) fn claim(&self, credential: &str) -> bool {
        let mut winner = self.winner.lock();
        if winner.is_some() {
            return false;
        }
        *winner = Some(credential.to_string());
        // Set inside the critical section so the flag is never
        // observable ahead of the credential.
        self.found.store(true, Ordering::Release);
        true
    }

    /// Count one processed candidate, returning the new global total.
    pub(crate) fn record_attempt(&self) -> u64 {
        self.attempts.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    fn winner(&self) -> Option<String> {
        self.winner.lock().clone()
    }
}

/// Run the parallel dictionary search against `options.target`.
///
/// `make_probe` is invoked once per worker so every worker owns an
/// independent probe instance; probes typically hold a session handle
/// and are not safe to share. Blocks until every worker has joined,
/// so the returned state is always terminal: either the first
/// credential that connected, or proof that the whole list was
/// processed.
pub fn search(
    options: &SearchOptions,
    candidates: &Wordlist,
    mut make_probe: impl FnMut() -> Box<dyn ConnectionProbe>,
    progress: &dyn ProgressSink,
) -> Result<SearchResult, SearchError> {
    if options.target.trim().is_empty() {
        return Err(SearchError::EmptyTarget);
    }
    if options.timeout.is_zero() {
        return Err(SearchError::InvalidTimeout);
    }
    if options.workers == 0 || options.workers > MAX_WORKERS {
        return Err(SearchError::InvalidWorkerCount(options.workers));
    }
    if candidates.is_empty() {
        return Err(SearchError::EmptyCandidateList);
    }

    let shards = partition(candidates.len(), options.workers)?;
    let state = SearchState::new();
    let entries = candidates.entries();
    let start = Instant::now();

    thread::scope(|scope| {
        for shard in shards {
            let probe = make_probe();
            let state = &state;
            let target = options.target.as_str();
            let timeout = options.timeout;
            scope.spawn(move || {
                worker::run_shard(shard, entries, probe, state, progress, target, timeout);
            });
        }
    });

    let credential = state.winner();
    Ok(SearchResult {
        found: credential.is_some(),
        credential,
        attempts: state.attempts(),
        duration: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::Shard;
    use crate::probe::ProbeError;
    use crate::progress::ProgressSnapshot;
    use std::sync::Arc;

    /// Probe double: succeeds only for `accept`, records every
    /// credential it was asked to try.
    struct ScriptedProbe {
        accept: Option<String>,
        calls: Arc<Mutex<Vec<String>>>,
        transport_failure: bool,
    }

    impl ScriptedProbe {
        fn rejecting(calls: Arc<Mutex<Vec<String>>>) -> Box<dyn ConnectionProbe> {
            Box::new(Self {
                accept: None,
                calls,
                transport_failure: false,
            })
        }

        fn accepting(
            credential: &str,
            calls: Arc<Mutex<Vec<String>>>,
        ) -> Box<dyn ConnectionProbe> {
            Box::new(Self {
                accept: Some(credential.to_string()),
                calls,
                transport_failure: false,
            })
        }
    }

    impl ConnectionProbe for ScriptedProbe {
        fn initialize(&mut self) -> Result<(), ProbeError> {
            Ok(())
        }

        fn try_connect(
            &mut self,
            _target: &str,
            credential: &str,
            _timeout: Duration,
        ) -> Result<bool, ProbeError> {
            self.calls.lock().push(credential.to_string());
            if self.transport_failure {
                return Err(ProbeError::InterfaceUnavailable("radio gone".into()));
            }
            Ok(self.accept.as_deref() == Some(credential))
        }

        fn disconnect(&mut self) -> Result<(), ProbeError> {
            Ok(())
        }

        fn list_networks(&mut self) -> Result<Vec<String>, ProbeError> {
            Ok(Vec::new())
        }
    }

    /// Probe double that accepts every credential, for winner races.
    struct AcceptAllProbe;

    impl ConnectionProbe for AcceptAllProbe {
        fn initialize(&mut self) -> Result<(), ProbeError> {
            Ok(())
        }

        fn try_connect(
            &mut self,
            _target: &str,
            _credential: &str,
            _timeout: Duration,
        ) -> Result<bool, ProbeError> {
            Ok(true)
        }

        fn disconnect(&mut self) -> Result<(), ProbeError> {
            Ok(())
        }

        fn list_networks(&mut self) -> Result<Vec<String>, ProbeError> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct CollectingSink {
        snapshots: Mutex<Vec<ProgressSnapshot>>,
        messages: Mutex<Vec<String>>,
    }

    impl ProgressSink for CollectingSink {
        fn report(&self, snapshot: ProgressSnapshot) {
            self.snapshots.lock().push(snapshot);
        }

        fn message(&self, text: &str) {
            self.messages.lock().push(text.to_string());
        }
    }

    fn options(workers: usize) -> SearchOptions {
        SearchOptions {
            target: "TestNet".to_string(),
            timeout: Duration::from_millis(100),
            workers,
        }
    }

    fn numbered_wordlist(count: usize) -> Wordlist {
        // All entries satisfy the 8-63 length policy.
        Wordlist::from_entries((0..count).map(|i| format!("password{:04}", i)).collect())
    }

    #[test]
    fn test_short_candidate_skipped_long_one_found() {
        let list = Wordlist::from_entries(vec!["short".into(), "longenough1".into()]);
        let calls = Arc::new(Mutex::new(Vec::new()));

        let result = search(
            &options(2),
            &list,
            || ScriptedProbe::accepting("longenough1", Arc::clone(&calls)),
            &CollectingSink::default(),
        )
        .unwrap();

        assert!(result.found);
        assert_eq!(result.credential.as_deref(), Some("longenough1"));
        // The winning attempt always counts; the other worker may have
        // observed the win and stopped before counting its candidate.
        assert!((1..=2).contains(&result.attempts));
        // The too-short candidate never reached the probe.
        assert!(!calls.lock().contains(&"short".to_string()));
    }

    #[test]
    fn test_empty_candidate_list_rejected() {
        let list = Wordlist::from_entries(Vec::new());
        let result = search(
            &options(2),
            &list,
            || ScriptedProbe::rejecting(Arc::new(Mutex::new(Vec::new()))),
            &CollectingSink::default(),
        );
        assert_eq!(result.unwrap_err(), SearchError::EmptyCandidateList);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let result = search(
            &options(0),
            &numbered_wordlist(5),
            || ScriptedProbe::rejecting(Arc::new(Mutex::new(Vec::new()))),
            &CollectingSink::default(),
        );
        assert_eq!(result.unwrap_err(), SearchError::InvalidWorkerCount(0));
    }

    #[test]
    fn test_oversized_worker_count_rejected() {
        let result = search(
            &options(17),
            &numbered_wordlist(5),
            || ScriptedProbe::rejecting(Arc::new(Mutex::new(Vec::new()))),
            &CollectingSink::default(),
        );
        assert_eq!(result.unwrap_err(), SearchError::InvalidWorkerCount(17));
    }

    #[test]
    fn test_empty_target_rejected() {
        let mut opts = options(2);
        opts.target = "   ".to_string();
        let result = search(
            &opts,
            &numbered_wordlist(5),
            || ScriptedProbe::rejecting(Arc::new(Mutex::new(Vec::new()))),
            &CollectingSink::default(),
        );
        assert_eq!(result.unwrap_err(), SearchError::EmptyTarget);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut opts = options(2);
        opts.timeout = Duration::ZERO;
        let result = search(
            &opts,
            &numbered_wordlist(5),
            || ScriptedProbe::rejecting(Arc::new(Mutex::new(Vec::new()))),
            &CollectingSink::default(),
        );
        assert_eq!(result.unwrap_err(), SearchError::InvalidTimeout);
    }

    #[test]
    fn test_exhaustive_miss_counts_every_candidate() {
        let list = numbered_wordlist(25);
        let calls = Arc::new(Mutex::new(Vec::new()));

        let result = search(
            &options(4),
            &list,
            || ScriptedProbe::rejecting(Arc::clone(&calls)),
            &CollectingSink::default(),
        )
        .unwrap();

        assert!(!result.found);
        assert!(result.credential.is_none());
        assert_eq!(result.attempts, 25);
        assert_eq!(calls.lock().len(), 25);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let list = numbered_wordlist(25);
        for _ in 0..2 {
            let result = search(
                &options(4),
                &list,
                || ScriptedProbe::rejecting(Arc::new(Mutex::new(Vec::new()))),
                &CollectingSink::default(),
            )
            .unwrap();
            assert!(!result.found);
            assert_eq!(result.attempts, 25);
        }
    }

    #[test]
    fn test_at_most_one_winner() {
        let list = numbered_wordlist(32);
        let result = search(
            &options(8),
            &list,
            || Box::new(AcceptAllProbe) as Box<dyn ConnectionProbe>,
            &CollectingSink::default(),
        )
        .unwrap();

        assert!(result.found);
        let winner = result.credential.unwrap();
        assert!(list.entries().contains(&winner));
        // Each worker stops after its first candidate: either it won
        // or someone else already had, so attempts never exceed the
        // worker count.
        assert!(result.attempts <= 8);
    }

    #[test]
    fn test_transport_errors_are_not_fatal() {
        let list = numbered_wordlist(10);
        let sink = CollectingSink::default();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let result = search(
            &options(2),
            &list,
            || {
                Box::new(ScriptedProbe {
                    accept: None,
                    calls: Arc::clone(&calls),
                    transport_failure: true,
                }) as Box<dyn ConnectionProbe>
            },
            &sink,
        )
        .unwrap();

        assert!(!result.found);
        assert_eq!(result.attempts, 10);
        // Each failed attempt surfaced for observability.
        assert_eq!(sink.messages.lock().len(), 10);
    }

    #[test]
    fn test_progress_emitted_every_tenth_attempt() {
        let list = numbered_wordlist(25);
        let sink = CollectingSink::default();

        search(
            &options(1),
            &list,
            || ScriptedProbe::rejecting(Arc::new(Mutex::new(Vec::new()))),
            &sink,
        )
        .unwrap();

        let completed: Vec<u64> = sink.snapshots.lock().iter().map(|s| s.completed).collect();
        assert_eq!(completed, vec![10, 20]);
        assert!(sink.snapshots.lock().iter().all(|s| s.total == 25));
    }

    #[test]
    fn test_worker_makes_no_probe_calls_after_win() {
        let state = SearchState::new();
        assert!(state.claim("already-won-here"));

        let entries: Vec<String> = (0..5).map(|i| format!("password{:04}", i)).collect();
        let calls = Arc::new(Mutex::new(Vec::new()));
        worker::run_shard(
            Shard { start: 0, end: 5 },
            &entries,
            ScriptedProbe::rejecting(Arc::clone(&calls)),
            &state,
            &CollectingSink::default(),
            "TestNet",
            Duration::from_millis(10),
        );

        assert!(calls.lock().is_empty());
        assert_eq!(state.attempts(), 0);
    }

    #[test]
    fn test_claim_is_first_writer_wins() {
        let state = SearchState::new();
        assert!(state.claim("first-credential"));
        assert!(!state.claim("second-credential"));
        assert_eq!(state.winner().as_deref(), Some("first-credential"));
        assert!(state.found());
    }
}
