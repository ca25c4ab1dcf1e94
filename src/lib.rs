/*!
 * Parallel dictionary attack engine for WiFi networks
 *
 * The engine loads a candidate list, partitions it into contiguous
 * shards, and runs one worker thread per shard against a connection
 * probe until the first credential connects. Everything that touches
 * the wireless stack hides behind the [`probe::ConnectionProbe`]
 * trait; the search itself is plain threads and shared state.
 *
 * Educational use only. Get authorization before pointing this at a
 * network you do not own.
 */

pub mod coordinator;
pub mod partition;
pub mod platform;
pub mod probe;
pub mod progress;
pub mod wordlist;
mod worker;

pub use coordinator::{search, SearchError, SearchOptions, SearchResult, MAX_WORKERS};
pub use partition::{partition, Shard};
pub use probe::{ConnectionProbe, ProbeError};
pub use progress::{ProgressSink, ProgressSnapshot, SilentReporter, TerminalReporter};
pub use wordlist::{SourceError, Wordlist};
pub use worker::{MAX_CREDENTIAL_LEN, MIN_CREDENTIAL_LEN};
