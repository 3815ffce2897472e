//! Mock adapters for integration tests.
//!
//! The transport mock records every call so tests can assert on the
//! full message history without a radio attached.

use meshmote::app::ports::{PowerPort, SensorKind, SensorPort, TransportPort, ValueKind};
use meshmote::sensors::battery::VoltageReading;
use meshmote::sensors::climate::ClimateReading;
use meshmote::sensors::distance::DistanceReading;

// ── Transport call record ─────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum TransportCall {
    DescribeNode {
        name: String,
        version_major: u8,
        version_minor: u8,
    },
    PresentSensor {
        child_id: u8,
        kind: SensorKind,
        label: &'static str,
    },
    Transmit {
        child_id: u8,
        kind: ValueKind,
        value: f32,
        precision: u8,
    },
    BatteryPercent(u8),
}

// ── MockTransport ─────────────────────────────────────────────

#[derive(Default)]
pub struct MockTransport {
    pub calls: Vec<TransportCall>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the measurement messages, in order.
    pub fn transmits(&self) -> Vec<&TransportCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, TransportCall::Transmit { .. }))
            .collect()
    }

    /// Battery-percent messages, in order.
    pub fn battery_percents(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                TransportCall::BatteryPercent(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    /// Measurement messages of one value class.
    pub fn transmits_of(&self, wanted: ValueKind) -> Vec<&TransportCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, TransportCall::Transmit { kind, .. } if *kind == wanted))
            .collect()
    }
}

impl TransportPort for MockTransport {
    fn describe_node(&mut self, name: &str, version_major: u8, version_minor: u8) {
        self.calls.push(TransportCall::DescribeNode {
            name: name.to_string(),
            version_major,
            version_minor,
        });
    }

    fn present_sensor(&mut self, child_id: u8, kind: SensorKind, label: &'static str) {
        self.calls.push(TransportCall::PresentSensor {
            child_id,
            kind,
            label,
        });
    }

    fn transmit(&mut self, child_id: u8, kind: ValueKind, value: f32, precision: u8) {
        self.calls.push(TransportCall::Transmit {
            child_id,
            kind,
            value,
            precision,
        });
    }

    fn transmit_battery_percent(&mut self, percent: u8) {
        self.calls.push(TransportCall::BatteryPercent(percent));
    }
}

// ── MockSensors ───────────────────────────────────────────────

/// Injectable sensor readings.  `None` models an unfitted sensor.
pub struct MockSensors {
    pub volts: f32,
    pub raw: u16,
    /// (celsius, humidity)
    pub climate: Option<(f32, f32)>,
    /// centimeters; negative = lost echo
    pub distance_cm: Option<f32>,
}

impl Default for MockSensors {
    fn default() -> Self {
        Self {
            volts: 2.95,
            raw: 2742,
            climate: Some((21.5, 45.0)),
            distance_cm: Some(100.0),
        }
    }
}

impl SensorPort for MockSensors {
    fn read_voltage(&mut self) -> VoltageReading {
        VoltageReading {
            raw: self.raw,
            volts: self.volts,
        }
    }

    fn read_climate(&mut self) -> Option<ClimateReading> {
        self.climate.map(|(celsius, humidity)| ClimateReading {
            celsius,
            humidity,
        })
    }

    fn read_distance(&mut self) -> Option<DistanceReading> {
        self.distance_cm.map(|cm| DistanceReading { cm })
    }
}

// ── MockPower ─────────────────────────────────────────────────

/// Records suspend requests instead of blocking.
#[derive(Default)]
pub struct MockPower {
    pub sleeps: Vec<u32>,
}

#[allow(dead_code)]
impl MockPower {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PowerPort for MockPower {
    fn sleep_ms(&mut self, ms: u32) {
        self.sleeps.push(ms);
    }
}
