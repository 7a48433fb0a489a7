use thiserror::Error;

/// Malformed register response: the device answered with fewer registers
/// than a 32-bit decode requires. Never retried in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("invalid register data: expected {expected} registers, received {received}")]
pub struct InvalidRegisterData {
    /// number of registers the decode requires
    pub expected: usize,
    /// number of registers actually received
    pub received: usize,
}

/// Failure at the transport layer while opening, closing or reading.
///
/// These never crash the process: the supervisor absorbs them into a state
/// transition and the read is retried on the next scheduled health check.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransportError {
    /// a read was attempted while the transport is not open
    #[error("transport is not open")]
    NotOpen,
    /// socket-level I/O failure
    #[error("I/O error: {0:?}")]
    Io(std::io::ErrorKind),
    /// the device answered with a Modbus exception
    #[error("device returned exception code {0:#04X}")]
    Exception(u8),
    /// the response frame could not be interpreted
    #[error("malformed response frame: {0}")]
    BadFrame(&'static str),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io(err.kind())
    }
}

/// The stored counter string could not be parsed at startup.
///
/// Recoverable: the caller falls back to a counter of zero.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot recover lifetime counter from stored value {stored:?}")]
pub struct PersistedStateParseError {
    /// the offending stored string
    pub stored: String,
}

/// Any failure that aborts the remainder of a poll round.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PollError {
    /// decode failure
    #[error(transparent)]
    InvalidData(#[from] InvalidRegisterData),
    /// transport failure
    #[error(transparent)]
    Transport(#[from] TransportError),
}
