use tracing::{info, warn};

use crate::error::TransportError;
use crate::transport::RegisterTransport;

/// Connection health as tracked by the supervisor.
///
/// `Failed` is distinct from `Closed`: it means the transport may still
/// report itself open, but a read or decode attempt errored, so the next
/// health check must force a close and reopen rather than trust the
/// transport's own flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    /// no connection
    Closed,
    /// connection established and trusted
    Open,
    /// connection reported open but a read attempt errored
    Failed,
}

/// Owns the transport handle and governs when reads are attempted.
///
/// Exactly one supervisor owns each transport; no other component mutates
/// the connection. Reconnect attempts happen at most once per health check,
/// which the poller invokes once per configured interval, so there is no
/// retry storm on a dead link.
pub struct ConnectionSupervisor<T> {
    transport: T,
    state: ConnectionState,
}

impl<T: RegisterTransport> ConnectionSupervisor<T> {
    /// wrap a transport; the connection starts [ConnectionState::Closed]
    pub fn new(transport: T) -> Self {
        ConnectionSupervisor {
            transport,
            state: ConnectionState::Closed,
        }
    }

    /// current connection state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Record that a read or decode attempt errored.
    ///
    /// The next health check will close and reopen the transport.
    pub fn mark_failed(&mut self) {
        self.state = ConnectionState::Failed;
    }

    /// Attempt to open the transport, transitioning to `Open` on success.
    ///
    /// An open failure leaves the state `Closed`; the error surfaces to the
    /// caller but is never fatal.
    pub async fn open(&mut self) -> Result<(), TransportError> {
        self.transport.open().await?;
        self.state = ConnectionState::Open;
        Ok(())
    }

    /// Per-interval health decision: `true` means the poll round may run.
    ///
    /// When the connection is open and trusted, nothing happens. Otherwise
    /// the transport is closed and reopened, and the round is skipped for
    /// this interval regardless of whether the reopen succeeded.
    pub async fn health_check(&mut self) -> bool {
        if self.state == ConnectionState::Open && self.transport.is_open() {
            return true;
        }

        if self.state == ConnectionState::Failed {
            warn!("previous round failed, forcing reconnect");
        } else {
            info!("inverter not connected, reconnecting");
        }
        self.transport.close().await;
        self.state = ConnectionState::Closed;
        match self.transport.open().await {
            Ok(()) => {
                self.state = ConnectionState::Open;
                info!("inverter connection reopened");
            }
            Err(err) => {
                warn!(%err, "inverter connection problem");
            }
        }
        false
    }

    /// read registers through the owned transport
    pub async fn read_registers(
        &mut self,
        address: u16,
        count: u16,
    ) -> Result<Vec<u16>, TransportError> {
        self.transport.read_registers(address, count).await
    }
}
