/*!
 * Progress reporting
 *
 * Workers publish advisory snapshots of the global attempt counter.
 * The terminal reporter renders them on a single indicatif bar, which
 * serializes output internally so concurrent workers never interleave
 * mid-line.
 */

use indicatif::{ProgressBar, ProgressStyle};

/// Point-in-time view of the search: attempts completed out of the
/// total candidate count. Advisory only; the cumulative count may lag
/// slightly behind the true global count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub completed: u64,
    pub total: u64,
}

/// Sink for worker-side progress events. Never affects the search
/// outcome.
pub trait ProgressSink: Send + Sync {
    fn report(&self, snapshot: ProgressSnapshot);

    /// Out-of-band line (transport errors, worker notices).
    fn message(&self, text: &str);
}

/// Terminal progress bar shared by all workers.
pub struct TerminalReporter {
    bar: ProgressBar,
}

impl TerminalReporter {
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}) {eta} {msg}")
                .unwrap()
                .progress_chars("█▓▒░-"),
        );
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for TerminalReporter {
    fn report(&self, snapshot: ProgressSnapshot) {
        // Snapshots from racing workers can arrive out of order;
        // never move the bar backwards.
        if snapshot.completed > self.bar.position() {
            self.bar.set_position(snapshot.completed);
        }
    }

    fn message(&self, text: &str) {
        self.bar.println(text);
    }
}

/// Discards everything. Used where progress output is unwanted.
pub struct SilentReporter;

impl ProgressSink for SilentReporter {
    fn report(&self, _snapshot: ProgressSnapshot) {}

    fn message(&self, _text: &str) {}
}
