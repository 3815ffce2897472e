//! Node configuration parameters
//!
//! One parameterized engine replaces per-deployment firmware builds: the
//! attached sensor set, scheduling discipline, and per-board calibration
//! all live here.  Values are fixed at build time for a deployed unit.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum node-name length presented to the gateway.
pub const NODE_NAME_CAP: usize = 32;

/// Which optional sensors are fitted on this board.
/// The supply-voltage monitor is always present.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SensorSet {
    /// Combined temperature + humidity sensor on the single-wire bus.
    pub climate: bool,
    /// Ultrasonic distance ranger.
    pub distance: bool,
}

/// How the node paces its measurement-and-report cycles.
///
/// Selected per deployment: battery nodes suspend between cycles; nodes
/// that also relay mesh traffic must stay powered and poll instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Discipline {
    /// Suspend the node between cycles.  The node is unreachable while
    /// sleeping; wake is by timer only.
    Sleep { sleep_ms: u32 },
    /// Stay powered and fire a cycle whenever `period_ms` has elapsed
    /// since the last report.  The poll itself never blocks.
    AlwaysOn { period_ms: u32 },
}

/// Core node configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Name presented to the gateway during registration.
    pub node_name: heapless::String<NODE_NAME_CAP>,

    // --- Supply-voltage monitor ---
    /// Per-board calibration constant, determined by the bench
    /// calibration procedure.  Converts raw reference ticks to
    /// millivolts; immutable for the life of a deployed unit.
    pub vcc_calibration: u32,
    /// Bottom of the usable battery range (volts) — reads as 0 %.
    pub vcc_min: f32,
    /// Top of the usable battery range (volts) — reads as 100 %.
    pub vcc_max: f32,

    // --- Scheduling ---
    pub discipline: Discipline,

    // --- Attached sensors ---
    pub sensors: SensorSet,

    // --- Child sensor IDs (one per logical sensor, unique per node) ---
    pub battery_child_id: u8,
    pub temperature_child_id: u8,
    pub humidity_child_id: u8,
    pub distance_child_id: u8,

    // --- Debug ---
    /// Shift the measured VCC by a small pseudo-random amount each cycle
    /// so change-suppressed battery reports keep flowing on the bench.
    pub fake_vcc_jitter: bool,
}

impl NodeConfig {
    /// Reject configurations the engine cannot run: an empty battery
    /// range divides by zero, a zero duration never wakes.  Wrong (but
    /// plausible) calibration is not detectable here — it produces
    /// silently shifted voltages forever.
    pub fn validate(&self) -> Result<()> {
        if self.node_name.is_empty() {
            return Err(Error::Config("node name is empty"));
        }
        if self.vcc_calibration == 0 {
            return Err(Error::Config("vcc calibration is zero"));
        }
        if self.vcc_max <= self.vcc_min {
            return Err(Error::Config("vcc range is empty"));
        }
        match self.discipline {
            Discipline::Sleep { sleep_ms: 0 } => Err(Error::Config("sleep duration is zero")),
            Discipline::AlwaysOn { period_ms: 0 } => Err(Error::Config("report period is zero")),
            _ => Ok(()),
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        let mut node_name = heapless::String::new();
        // Capacity is NODE_NAME_CAP; the literal fits.
        let _ = node_name.push_str("MeshMote Sensor");
        Self {
            node_name,

            // VCC monitor — 2×AA NiMH pack
            vcc_calibration: 1_128_380,
            vcc_min: 2.6,
            vcc_max: 3.3,

            // 10 min between cycles
            discipline: Discipline::Sleep {
                sleep_ms: 10 * 60 * 1000,
            },

            sensors: SensorSet {
                climate: true,
                distance: true,
            },

            battery_child_id: 0,
            temperature_child_id: 1,
            humidity_child_id: 2,
            distance_child_id: 3,

            fake_vcc_jitter: false,
        }
    }
}
