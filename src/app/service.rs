//! Node service — the duty-cycled reporting engine.
//!
//! [`NodeService`] owns the report state and the schedule state and
//! exposes a clean, hardware-agnostic API.  All I/O flows through port
//! traits injected at call sites, making the entire engine testable
//! with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────────┐ ──▶ TransportPort
//!                 │        NodeService          │
//!   PowerPort ◀───│  pipeline · filter · cycle  │
//!                 └────────────────────────────┘
//! ```

use log::{debug, info};

use crate::config::NodeConfig;
use crate::presentation::Presentation;
use crate::report::{ReportState, battery_percent, should_report};
use crate::scheduler::{CycleAction, ScheduleState};

use super::ports::{PowerPort, SensorPort, TransportPort, ValueKind};

/// Decimal places per value class.
const VOLTAGE_PRECISION: u8 = 3;
const TEMPERATURE_PRECISION: u8 = 1;
const HUMIDITY_PRECISION: u8 = 0;
const DISTANCE_PRECISION: u8 = 4;

// ───────────────────────────────────────────────────────────────
// NodeService
// ───────────────────────────────────────────────────────────────

/// The reporting engine, built once from config and specialized per
/// deployment by it.
pub struct NodeService {
    config: NodeConfig,
    presentation: Presentation,
    report: ReportState,
    schedule: ScheduleState,
    jitter: JitterRng,
    cycle_count: u64,
}

impl NodeService {
    pub fn new(config: NodeConfig) -> Self {
        let presentation = Presentation::from_config(&config);
        let schedule = ScheduleState::from_discipline(&config.discipline);
        // Seed from the calibration constant: deterministic, per-board.
        let jitter = JitterRng::new(config.vcc_calibration | 1);
        Self {
            config,
            presentation,
            report: ReportState::new(),
            schedule,
            jitter,
            cycle_count: 0,
        }
    }

    // ── Registration handshake ────────────────────────────────

    /// Supply the static descriptor to the transport.  Called once per
    /// connection/reconnect, before any measurement is accepted.
    pub fn present(&self, transport: &mut impl TransportPort) {
        info!(
            "presenting node '{}' v{}.{} ({} sensors)",
            self.presentation.descriptor().name,
            self.presentation.descriptor().version_major,
            self.presentation.descriptor().version_minor,
            self.presentation.sensors().len()
        );
        self.presentation.announce(transport);
    }

    // ── Acquisition pipeline ──────────────────────────────────

    /// Run one full measurement-and-report pass.
    ///
    /// Battery is always first: its change filter alone gates the
    /// node's first-cycle report.  Every other sensor reports
    /// unconditionally; a failed distance measurement is suppressed
    /// without disturbing the rest of the cycle.
    pub fn run_cycle(&mut self, hw: &mut impl SensorPort, transport: &mut impl TransportPort) {
        self.cycle_count += 1;
        debug!("cycle {}: acquiring", self.cycle_count);

        // 1. Battery voltage, transmitted every cycle.
        let reading = hw.read_voltage();
        let volts = if self.config.fake_vcc_jitter {
            let shifted = reading.volts + self.jitter.next_volts();
            debug!("vcc {:.3} V (jitter-shifted from {:.3})", shifted, reading.volts);
            shifted
        } else {
            debug!("vcc {:.3} V (raw {})", reading.volts, reading.raw);
            reading.volts
        };
        transport.transmit(
            self.config.battery_child_id,
            ValueKind::Voltage,
            volts,
            VOLTAGE_PRECISION,
        );

        // 2. Battery percentage through the change filter.
        let percent = battery_percent(volts, self.config.vcc_min, self.config.vcc_max);
        if should_report(percent, self.report.last_sent_percent()) {
            transport.transmit_battery_percent(percent as u8);
            self.report.record_sent(percent);
        } else {
            debug!("battery {percent:.1} % unchanged, suppressed");
        }

        // 3. Climate: both values as-is, every cycle.
        if let Some(climate) = hw.read_climate() {
            transport.transmit(
                self.config.temperature_child_id,
                ValueKind::Temperature,
                climate.celsius,
                TEMPERATURE_PRECISION,
            );
            transport.transmit(
                self.config.humidity_child_id,
                ValueKind::Humidity,
                climate.humidity,
                HUMIDITY_PRECISION,
            );
        }

        // 4. Distance: sentinel readings never reach the transport.
        if let Some(distance) = hw.read_distance() {
            if distance.is_valid() {
                transport.transmit(
                    self.config.distance_child_id,
                    ValueKind::Distance,
                    distance.meters(),
                    DISTANCE_PRECISION,
                );
            } else {
                debug!("distance echo lost, reading suppressed");
            }
        }
    }

    // ── Scheduling disciplines ────────────────────────────────

    /// One step of the sleeping discipline: acquire or suspend,
    /// whichever the schedule dictates.  Call in a loop forever.
    ///
    /// No-op under the always-on discipline.
    pub fn run_sleep_step(
        &mut self,
        hw: &mut impl SensorPort,
        transport: &mut impl TransportPort,
        power: &mut impl PowerPort,
    ) {
        let action = match &mut self.schedule {
            ScheduleState::Sleep(cycle) => cycle.advance(self.report.has_reported()),
            ScheduleState::Poll(_) => {
                debug!("sleep step ignored under always-on discipline");
                return;
            }
        };
        match action {
            CycleAction::Acquire => self.run_cycle(hw, transport),
            CycleAction::Sleep(ms) => power.sleep_ms(ms),
        }
    }

    /// One tick of the always-on discipline.  Fires a cycle when the
    /// node has never reported or the period has elapsed, and returns
    /// whether it did.  Never blocks — the caller's loop stays free to
    /// relay other nodes' traffic.
    ///
    /// No-op under the sleeping discipline.
    pub fn poll(
        &mut self,
        now_ms: u64,
        hw: &mut impl SensorPort,
        transport: &mut impl TransportPort,
    ) -> bool {
        let due = match &self.schedule {
            ScheduleState::Poll(cycle) => cycle.check(now_ms),
            ScheduleState::Sleep(_) => {
                debug!("poll ignored under sleeping discipline");
                return false;
            }
        };
        if !due {
            return false;
        }

        self.run_cycle(hw, transport);
        if let ScheduleState::Poll(cycle) = &mut self.schedule {
            cycle.mark_reported(now_ms);
        }
        true
    }

    // ── Queries ───────────────────────────────────────────────

    /// Whether any battery report has ever gone out.
    pub fn has_reported(&self) -> bool {
        self.report.has_reported()
    }

    /// Completed acquisition passes since boot.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// The static registration payload.
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }
}

// ───────────────────────────────────────────────────────────────
// Debug VCC jitter
// ───────────────────────────────────────────────────────────────

/// Tiny xorshift generator for the bench-debug VCC shift (0–40 mV).
/// Deterministic on purpose: no entropy source on the node, and test
/// runs must be reproducible.
struct JitterRng(u32);

impl JitterRng {
    fn new(seed: u32) -> Self {
        Self(seed)
    }

    fn next_volts(&mut self) -> f32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        (self.0 % 5) as f32 / 100.0
    }
}
