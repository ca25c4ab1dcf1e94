/*!
 * Connection probe capability
 *
 * Abstract boundary between the search engine and whatever actually
 * talks to the wireless stack. The coordinator hands every worker its
 * own probe instance, so implementations may hold a session handle and
 * never need to be `Sync`.
 */

use std::time::Duration;

use thiserror::Error;

/// Transport-level probe failure.
///
/// Distinguishable from a wrong credential for observability, but the
/// worker treats both the same way: move on to the next candidate.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no usable wireless interface: {0}")]
    InterfaceUnavailable(String),

    #[error("probe command failed: {0}")]
    Command(#[from] std::io::Error),

    #[error("probe output was not understood: {0}")]
    Malformed(String),
}

/// One connection-attempt capability bound to the local wireless stack.
///
/// All operations are potentially slow and potentially failing.
/// `try_connect` must return within roughly `timeout`; a timed-out
/// attempt is an `Ok(false)`, not an error.
pub trait ConnectionProbe: Send {
    /// Acquire the wireless interface. Called once per worker before
    /// any connection attempt.
    fn initialize(&mut self) -> Result<(), ProbeError>;

    /// Attempt to join `target` with `credential`. `Ok(true)` is taken
    /// as proof of a correct credential; there is no secondary
    /// verification step.
    fn try_connect(
        &mut self,
        target: &str,
        credential: &str,
        timeout: Duration,
    ) -> Result<bool, ProbeError>;

    /// Tear down any connection left over from the last attempt.
    fn disconnect(&mut self) -> Result<(), ProbeError>;

    /// SSIDs currently visible to the interface.
    fn list_networks(&mut self) -> Result<Vec<String>, ProbeError>;
}
