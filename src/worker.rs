/*!
 * Shard worker
 *
 * One worker walks one contiguous shard of the candidate list in
 * order, probing each candidate until it wins, the shard runs out, or
 * another worker has already won. Cancellation is cooperative: the
 * found flag is checked once per candidate, so an in-flight probe call
 * always runs to completion but no new one starts after a win.
 */

use std::time::Duration;

use crate::coordinator::SearchState;
use crate::partition::Shard;
use crate::probe::ConnectionProbe;
use crate::progress::{ProgressSink, ProgressSnapshot};

/// WPA/WPA2 passphrase length bounds. Candidates outside this range
/// are never sent to the probe but still count as processed.
pub const MIN_CREDENTIAL_LEN: usize = 8;
pub const MAX_CREDENTIAL_LEN: usize = 63;

/// A snapshot is emitted every this-many global attempts.
const PROGRESS_INTERVAL: u64 = 10;

fn within_length_policy(candidate: &str) -> bool {
    (MIN_CREDENTIAL_LEN..=MAX_CREDENTIAL_LEN).contains(&candidate.len())
}

/// Consume one shard against its own probe instance.
///
/// Every candidate in the shard is counted as processed exactly once,
/// whether it was probed, skipped by the length policy, or won the
/// search. Probe failures are reported to the sink and treated as a
/// wrong credential.
pub(crate) fn run_shard(
    shard: Shard,
    candidates: &[String],
    mut probe: Box<dyn ConnectionProbe>,
    state: &SearchState,
    progress: &dyn ProgressSink,
    target: &str,
    timeout: Duration,
) {
    if shard.is_empty() {
        return;
    }

    if let Err(e) = probe.initialize() {
        // The probe rejects attempts while uninitialized, so the shard
        // is still walked and counted.
        progress.message(&format!("worker: probe init failed: {}", e));
    }

    let total = candidates.len() as u64;

    for candidate in &candidates[shard.start..shard.end] {
        if state.found() {
            break;
        }

        let mut won = false;
        if within_length_policy(candidate) {
            match probe.try_connect(target, candidate, timeout) {
                Ok(true) => {
                    let _ = probe.disconnect();
                    // First writer wins inside the lock. Either way
                    // this shard is done: someone has the credential.
                    state.claim(candidate);
                    won = true;
                }
                Ok(false) => {}
                Err(e) => {
                    progress.message(&format!("worker: probe error, skipping: {}", e));
                }
            }
        }

        let completed = state.record_attempt();
        if completed % PROGRESS_INTERVAL == 0 {
            progress.report(ProgressSnapshot { completed, total });
        }

        if won {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_policy_bounds() {
        assert!(!within_length_policy("seven77"));
        assert!(within_length_policy("eight888"));
        assert!(within_length_policy(&"x".repeat(63)));
        assert!(!within_length_policy(&"x".repeat(64)));
    }
}
