//! MeshMote Firmware — Main Entry Point
//!
//! One parameterized engine, specialized per deployment by
//! [`NodeConfig`]: which sensors are fitted and which duty-cycle
//! discipline paces the reporting.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter      SerialGatewayTransport     NodePower   │
//! │  (SensorPort)         (TransportPort)            (PowerPort) │
//! │                                                              │
//! │  ───────────────── Port Trait Boundary ──────────────────    │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │            NodeService (pure logic)                    │  │
//! │  │  pipeline · change filter · duty-cycle scheduler       │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use meshmote::adapters::gateway::SerialGatewayTransport;
use meshmote::adapters::hardware::HardwareAdapter;
use meshmote::adapters::power::NodePower;
use meshmote::adapters::time::MonotonicClock;
use meshmote::app::service::NodeService;
use meshmote::config::{Discipline, NodeConfig};
use meshmote::drivers::hw_init;

/// Pacing of the always-on poll loop.  Short enough to keep the
/// repeater duties responsive, long enough not to starve the idle task.
const POLL_TICK_MS: u32 = 50;

/// The configuration this unit ships with.  Deployment variants edit
/// here (or generate this function) rather than forking source files.
fn deployment_config() -> NodeConfig {
    NodeConfig::default()
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("MeshMote v{} starting", env!("CARGO_PKG_VERSION"));

    let config = deployment_config();
    if let Err(e) = config.validate() {
        // A bad build-time config cannot be recovered at runtime — log
        // and halt; the watchdog reset will loop us back here.
        log::error!("invalid deployment config: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Adapters and engine ────────────────────────────────
    let mut hw = HardwareAdapter::from_config(&config);
    let mut gateway = SerialGatewayTransport::new();
    let mut power = NodePower::new();
    let clock = MonotonicClock::new();
    let discipline = config.discipline;
    let mut service = NodeService::new(config);

    // ── 4. Registration handshake ─────────────────────────────
    // Once per boot; the modem replays it to the gateway on reconnect.
    service.present(&mut gateway);

    // ── 5. Duty-cycle loop ────────────────────────────────────
    match discipline {
        Discipline::Sleep { sleep_ms } => {
            info!("sleeping discipline, {} ms between cycles", sleep_ms);
            loop {
                service.run_sleep_step(&mut hw, &mut gateway, &mut power);
            }
        }
        Discipline::AlwaysOn { period_ms } => {
            info!("always-on discipline, {} ms report period", period_ms);
            loop {
                let _ = service.poll(clock.now_ms(), &mut hw, &mut gateway);
                // Yield between ticks; the modem and idle task share
                // this core.
                esp_idf_hal::delay::FreeRtos::delay_ms(POLL_TICK_MS);
            }
        }
    }
}
