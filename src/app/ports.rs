//! Port traits — the boundary between the reporting engine and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ NodeService (domain)
//! ```
//!
//! Driven adapters (the sensor hub, the mesh gateway link, the power
//! manager) implement these traits.  The
//! [`NodeService`](super::service::NodeService) consumes them via
//! generics, so the engine never touches hardware or radio directly and
//! the whole thing runs on the host under test mocks.

use crate::sensors::battery::VoltageReading;
use crate::sensors::climate::ClimateReading;
use crate::sensors::distance::DistanceReading;

// ───────────────────────────────────────────────────────────────
// Boundary vocabulary
// ───────────────────────────────────────────────────────────────

/// Logical sensor classes declared during registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    /// Voltage-reporting child (the battery monitor).
    Multimeter,
    Temperature,
    Humidity,
    Distance,
}

/// Value classes carried by a measurement message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Voltage,
    BatteryPercent,
    Temperature,
    Humidity,
    Distance,
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the engine calls this to obtain measurements.
/// `None` means the sensor is not fitted on this board.
pub trait SensorPort {
    fn read_voltage(&mut self) -> VoltageReading;
    fn read_climate(&mut self) -> Option<ClimateReading>;
    fn read_distance(&mut self) -> Option<DistanceReading>;
}

// ───────────────────────────────────────────────────────────────
// Transport port (driven adapter: domain → mesh gateway)
// ───────────────────────────────────────────────────────────────

/// Write-side port to the mesh network layer.
///
/// Everything here is fire-and-forget: the engine never observes
/// acknowledgement or failure, and updates its own last-sent state
/// unconditionally after calling in.  Framing, addressing, and routing
/// all belong to the implementation.
pub trait TransportPort {
    /// Registration: node identity, once per connection.
    fn describe_node(&mut self, name: &str, version_major: u8, version_minor: u8);

    /// Registration: one logical sensor, in declaration order.
    fn present_sensor(&mut self, child_id: u8, kind: SensorKind, label: &'static str);

    /// One measurement value, rendered with the given number of decimal
    /// places.
    fn transmit(&mut self, child_id: u8, kind: ValueKind, value: f32, precision: u8);

    /// Battery state, tracked separately from sensor values by some
    /// gateways.
    fn transmit_battery_percent(&mut self, percent: u8);
}

// ───────────────────────────────────────────────────────────────
// Power port (driven adapter: domain → suspend hardware)
// ───────────────────────────────────────────────────────────────

/// Suspend collaborator for the sleeping discipline.
pub trait PowerPort {
    /// Blocking, cancellation-less suspend.  The node can neither
    /// receive nor transmit until the duration elapses; any other wake
    /// source is outside this contract.
    fn sleep_ms(&mut self, ms: u32);
}
