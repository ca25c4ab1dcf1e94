/*!
 * Shard partitioning
 *
 * Splits the candidate list into contiguous near-equal ranges, one per
 * worker. The layout is deterministic: the remainder goes to the first
 * shards, so shard sizes never differ by more than one.
 */

use crate::coordinator::SearchError;

/// Half-open index range `[start, end)` over the candidate list,
/// assigned to exactly one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shard {
    pub start: usize,
    pub end: usize,
}

impl Shard {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `[0, len)` into `worker_count` contiguous shards.
///
/// Shard `i` gets `len / worker_count` candidates, plus one if
/// `i < len % worker_count`. When there are fewer candidates than
/// workers, trailing shards are empty and their workers finish
/// immediately.
pub fn partition(len: usize, worker_count: usize) -> Result<Vec<Shard>, SearchError> {
    if worker_count == 0 {
        return Err(SearchError::InvalidWorkerCount(0));
    }

    let base = len / worker_count;
    let remainder = len % worker_count;

    let mut shards = Vec::with_capacity(worker_count);
    let mut start = 0;
    for i in 0..worker_count {
        let size = base + usize::from(i < remainder);
        shards.push(Shard {
            start,
            end: start + size,
        });
        start += size;
    }

    Ok(shards)
}
