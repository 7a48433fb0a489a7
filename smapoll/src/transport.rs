use async_trait::async_trait;

use crate::error::TransportError;

/// Behavioral contract of the register transport collaborator.
///
/// Implementations own the socket (or serial port) and its lifecycle; the
/// core only ever asks for N consecutive holding registers starting at an
/// address. Timeout and low-level backoff, if any, live behind this trait —
/// the supervisor rate-limits reconnects by the poll interval and nothing
/// else.
#[async_trait]
pub trait RegisterTransport: Send {
    /// establish the connection
    async fn open(&mut self) -> Result<(), TransportError>;

    /// tear the connection down; must be safe to call when already closed
    async fn close(&mut self);

    /// the transport's own view of its connectivity
    ///
    /// This flag is advisory: after a failed read the supervisor forces a
    /// close and reopen even if this still reports `true`.
    fn is_open(&self) -> bool;

    /// read `count` consecutive holding registers starting at `address`
    async fn read_registers(&mut self, address: u16, count: u16)
        -> Result<Vec<u16>, TransportError>;
}
