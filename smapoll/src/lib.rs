//! Polling, decoding and state-recovery engine for SMA solar inverters
//! (Sunny Boy / Sunny Tripower family) speaking Modbus TCP.
//!
//! The crate owns everything between a "read N consecutive registers at
//! address A" primitive and a channel registry:
//!
//! * decoding of big-endian 32-bit register pairs ([`decode::decode_u32`])
//! * per-sensor normalization: NaN-sentinel substitution, two's-complement
//!   sign recovery, scaling and rounding ([`normalize`])
//! * recovery of the persisted lifetime-production counter across restarts
//!   ([`counter::ProductionCounter`])
//! * the connection-health/retry state machine that decides when reads are
//!   attempted ([`supervisor::ConnectionSupervisor`])
//! * round orchestration over the fixed sensor table ([`poll::Poller`])
//!
//! The wire transport and the channel registry are collaborators behind the
//! [`transport::RegisterTransport`] and [`registry::ChannelRegistry`] traits;
//! this crate never opens sockets itself.

/// persisted lifetime-production counter
pub mod counter;
/// 32-bit register-pair decoding
pub mod decode;
/// error types
pub mod error;
/// value normalization and display formatting
pub mod normalize;
/// round orchestration and interval division
pub mod poll;
/// channel registry collaborator contract
pub mod registry;
/// sensor table and channel identities
pub mod sensor;
/// connection state machine
pub mod supervisor;
/// register transport collaborator contract
pub mod transport;

pub use crate::counter::ProductionCounter;
pub use crate::error::{InvalidRegisterData, PersistedStateParseError, PollError, TransportError};
pub use crate::poll::{Poller, PollerConfig, RoundOutcome};
pub use crate::registry::{ChannelRegistry, DisplayClass};
pub use crate::sensor::{ChannelId, SensorKind, SensorSpec};
pub use crate::supervisor::{ConnectionState, ConnectionSupervisor};
pub use crate::transport::RegisterTransport;
