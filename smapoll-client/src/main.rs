//! Command-line SMA inverter poller.
//!
//! Wires the `smapoll` engine to a real Modbus TCP transport and an
//! in-process logging channel registry, then drives it from a one-second
//! scheduler tick.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use smapoll::{Poller, PollerConfig};

mod registry;
mod tcp;

#[derive(Parser)]
#[command(name = "smapoll-client")]
#[command(about = "Polls an SMA solar inverter over Modbus TCP and logs channel updates")]
struct Cli {
    #[arg(long, default_value = "192.168.0.125:502", help = "Inverter socket address")]
    host: SocketAddr,

    #[arg(short = 'i', long, default_value = "3", help = "Modbus unit id of the inverter")]
    id: u8,

    #[arg(short = 'p', long, default_value = "5", help = "Polling interval in seconds")]
    period: u32,

    #[arg(long, help = "Poll the extended grid and string sensors")]
    extended: bool,

    #[arg(long, help = "Poll the battery sensors")]
    battery: bool,

    #[arg(long, help = "Log every register read")]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let transport = tcp::ModbusTcpTransport::new(cli.host, cli.id, Duration::from_secs(2));
    let config = PollerConfig {
        interval_ticks: cli.period,
        extended: cli.extended,
        battery: cli.battery,
    };

    let mut registry = registry::LogRegistry::default();
    let mut poller = Poller::new(&config, transport);
    poller.startup(&mut registry).await;

    // the base scheduler period is one second; the poller divides it down
    // to the configured interval
    let mut ticks = tokio::time::interval(Duration::from_secs(1));
    ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        ticks.tick().await;
        poller.tick(&mut registry).await;
    }
}
