use tracing::{debug, info, warn};

use crate::counter::ProductionCounter;
use crate::decode::decode_u32;
use crate::error::PollError;
use crate::normalize::{format_value, normalize};
use crate::registry::ChannelRegistry;
use crate::sensor::{sensor_table, ChannelId, SensorSpec, AC_POWER_CHANNEL, SERIAL_NUMBER_ADDRESS};
use crate::supervisor::{ConnectionState, ConnectionSupervisor};
use crate::transport::RegisterTransport;

/// Poller configuration.
#[derive(Clone, Copy, Debug)]
pub struct PollerConfig {
    /// scheduler ticks between poll rounds; a value of 1 polls every tick
    pub interval_ticks: u32,
    /// enable the extended grid/string sensor set
    pub extended: bool,
    /// enable the battery sensor set
    pub battery: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        PollerConfig {
            interval_ticks: 5,
            extended: true,
            battery: false,
        }
    }
}

/// Result of one poll round.
///
/// A round is not transactional: channels processed before a failure keep
/// their updates, and `error` records why the rest of the round was
/// abandoned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundOutcome {
    /// display strings emitted to the registry, in channel order
    pub updates: Vec<(ChannelId, String)>,
    /// the failure that aborted the round, if any
    pub error: Option<PollError>,
}

/// Owned poller state: sensor table, connection supervisor, lifetime
/// counter and the interval countdown.
///
/// Constructed once at startup and driven by an external scheduler calling
/// [`Poller::tick`] once per base period. There is exactly one logical
/// timeline: a round either completes within its tick or is not started.
pub struct Poller<T> {
    specs: Vec<SensorSpec>,
    supervisor: ConnectionSupervisor<T>,
    counter: ProductionCounter,
    interval_ticks: u32,
    countdown: u32,
}

impl<T: RegisterTransport> Poller<T> {
    /// build a poller around a transport
    pub fn new(config: &PollerConfig, transport: T) -> Self {
        let interval_ticks = config.interval_ticks.max(1);
        Poller {
            specs: sensor_table(config.extended, config.battery),
            supervisor: ConnectionSupervisor::new(transport),
            counter: ProductionCounter::default(),
            interval_ticks,
            countdown: interval_ticks,
        }
    }

    /// active sensor table
    pub fn specs(&self) -> &[SensorSpec] {
        &self.specs
    }

    /// current connection state
    pub fn connection_state(&self) -> ConnectionState {
        self.supervisor.state()
    }

    /// current lifetime production total
    pub fn production_total(&self) -> u64 {
        self.counter.value()
    }

    /// Startup sequence: register missing channels, recover the persisted
    /// counter, open the connection and read the serial number.
    ///
    /// Every step is non-fatal. A malformed stored counter falls back to
    /// zero; a failed open or identification read leaves reconnection to
    /// the first health check.
    pub async fn startup(&mut self, registry: &mut dyn ChannelRegistry) {
        for spec in &self.specs {
            if !registry.exists(spec.channel) {
                info!(channel = %spec.channel, name = spec.name, "registering channel");
                registry.create(spec.channel, spec.name, spec.kind.display_class());
            }
        }

        if let Some(stored) = registry.stored_value(AC_POWER_CHANNEL) {
            match ProductionCounter::recover(&stored) {
                Ok(counter) => {
                    info!(total = counter.value(), "restored lifetime production total");
                    self.counter = counter;
                }
                Err(err) => {
                    warn!(%err, "stored total unreadable, starting from zero");
                }
            }
        }

        if let Err(err) = self.supervisor.open().await {
            warn!(%err, "inverter connection problem");
            return;
        }
        match self.read_serial_number().await {
            Ok(serial) => info!(serial, "inverter identified"),
            Err(err) => {
                warn!(%err, "serial number read failed");
                self.supervisor.mark_failed();
            }
        }
    }

    /// One-shot identification read. Diagnostic only, never persisted.
    pub async fn read_serial_number(&mut self) -> Result<u32, PollError> {
        let registers = self
            .supervisor
            .read_registers(SERIAL_NUMBER_ADDRESS, 2)
            .await?;
        Ok(decode_u32(&registers)?)
    }

    /// Scheduler entry point, called once per base period.
    ///
    /// Divides the base period down to the configured interval; on the tick
    /// where the countdown reaches zero, runs the health check and, if the
    /// connection is trusted, the poll round. Returns `None` on ticks where
    /// no round ran.
    pub async fn tick(&mut self, registry: &mut dyn ChannelRegistry) -> Option<RoundOutcome> {
        self.countdown -= 1;
        if self.countdown > 0 {
            return None;
        }
        self.countdown = self.interval_ticks;

        if !self.supervisor.health_check().await {
            return None;
        }
        Some(self.run_round(registry).await)
    }

    /// Run one round over the active sensor table.
    ///
    /// Channels are processed sequentially and independently; the first
    /// read or decode failure aborts the remainder of the round and marks
    /// the connection failed, but updates already emitted stay emitted.
    pub async fn run_round(&mut self, registry: &mut dyn ChannelRegistry) -> RoundOutcome {
        let mut updates = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            let read = self
                .supervisor
                .read_registers(spec.address, 2)
                .await
                .map_err(PollError::from)
                .and_then(|registers| Ok(decode_u32(&registers)?));

            let raw = match read {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(channel = %spec.channel, %err, "aborting round");
                    self.supervisor.mark_failed();
                    return RoundOutcome {
                        updates,
                        error: Some(err),
                    };
                }
            };

            debug!(address = spec.address, value = raw, "register read");
            let value = normalize(spec, raw, &mut self.counter);
            let display = format_value(spec, value, &self.counter);
            registry.update(spec.channel, &display);
            updates.push((spec.channel, display));
        }
        RoundOutcome {
            updates,
            error: None,
        }
    }
}
