//! Serial gateway transport — `TransportPort` over the UART-attached
//! mesh radio modem.
//!
//! The modem firmware owns routing, addressing, and over-the-air
//! framing; this adapter renders each port call as one text line and
//! hands it to the modem.  Fire-and-forget end to end: nothing is read
//! back, and the engine never learns whether a frame made it.
//!
//! Line shapes:
//!
//! ```text
//! N;<name>;<major>.<minor>          node registration
//! P;<child>;<kind>;<label>          sensor registration
//! V;<child>;<kind>;<value>          measurement (fixed decimals)
//! B;<percent>                       battery state
//! ```

use log::debug;

use crate::app::ports::{SensorKind, TransportPort, ValueKind};
use crate::drivers::hw_init;

/// UART-attached mesh modem link.
pub struct SerialGatewayTransport;

impl SerialGatewayTransport {
    /// The UART itself is brought up by `hw_init::init_peripherals`.
    pub fn new() -> Self {
        Self
    }

    fn send_line(&mut self, line: &str) {
        debug!("gateway ⇒ {line}");
        hw_init::uart_write(line.as_bytes());
        hw_init::uart_write(b"\n");
    }
}

impl Default for SerialGatewayTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn sensor_kind_tag(kind: SensorKind) -> &'static str {
    match kind {
        SensorKind::Multimeter => "MULT",
        SensorKind::Temperature => "TEMP",
        SensorKind::Humidity => "HUM",
        SensorKind::Distance => "DIST",
    }
}

fn value_kind_tag(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Voltage => "VOLT",
        ValueKind::BatteryPercent => "BATT",
        ValueKind::Temperature => "TEMP",
        ValueKind::Humidity => "HUM",
        ValueKind::Distance => "DIST",
    }
}

impl TransportPort for SerialGatewayTransport {
    fn describe_node(&mut self, name: &str, version_major: u8, version_minor: u8) {
        self.send_line(&format!("N;{name};{version_major}.{version_minor}"));
    }

    fn present_sensor(&mut self, child_id: u8, kind: SensorKind, label: &'static str) {
        self.send_line(&format!("P;{child_id};{};{label}", sensor_kind_tag(kind)));
    }

    fn transmit(&mut self, child_id: u8, kind: ValueKind, value: f32, precision: u8) {
        let tag = value_kind_tag(kind);
        self.send_line(&format!(
            "V;{child_id};{tag};{value:.prec$}",
            prec = precision as usize
        ));
    }

    fn transmit_battery_percent(&mut self, percent: u8) {
        self.send_line(&format!("B;{percent}"));
    }
}
