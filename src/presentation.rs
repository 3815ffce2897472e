//! Static node descriptor for the registration handshake.
//!
//! The transport invokes the handshake once per connection/reconnect,
//! before any measurement message is accepted.  The core only supplies
//! this descriptor — the handshake protocol itself lives in the
//! transport.

use heapless::{String, Vec};

use crate::app::ports::{SensorKind, TransportPort};
use crate::config::{NODE_NAME_CAP, NodeConfig};

/// Upper bound on logical sensors a node exposes.
pub const MAX_SENSORS: usize = 4;

/// Identity of the node as a whole.
#[derive(Debug, Clone)]
pub struct NodeDescriptor {
    pub name: String<NODE_NAME_CAP>,
    pub version_major: u8,
    pub version_minor: u8,
}

/// One logical sensor declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorDecl {
    pub child_id: u8,
    pub kind: SensorKind,
    pub label: &'static str,
}

/// The full registration payload, built once from config.
pub struct Presentation {
    descriptor: NodeDescriptor,
    sensors: Vec<SensorDecl, MAX_SENSORS>,
}

impl Presentation {
    pub fn from_config(config: &NodeConfig) -> Self {
        let mut sensors: Vec<SensorDecl, MAX_SENSORS> = Vec::new();

        // Declaration order mirrors pipeline order: battery first.
        let _ = sensors.push(SensorDecl {
            child_id: config.battery_child_id,
            kind: SensorKind::Multimeter,
            label: "Battery Voltage",
        });
        if config.sensors.climate {
            let _ = sensors.push(SensorDecl {
                child_id: config.temperature_child_id,
                kind: SensorKind::Temperature,
                label: "Temperature",
            });
            let _ = sensors.push(SensorDecl {
                child_id: config.humidity_child_id,
                kind: SensorKind::Humidity,
                label: "Humidity",
            });
        }
        if config.sensors.distance {
            let _ = sensors.push(SensorDecl {
                child_id: config.distance_child_id,
                kind: SensorKind::Distance,
                label: "Distance",
            });
        }

        Self {
            descriptor: NodeDescriptor {
                name: config.node_name.clone(),
                version_major: parse_version(env!("CARGO_PKG_VERSION_MAJOR")),
                version_minor: parse_version(env!("CARGO_PKG_VERSION_MINOR")),
            },
            sensors,
        }
    }

    pub fn descriptor(&self) -> &NodeDescriptor {
        &self.descriptor
    }

    /// Declarations in presentation order.
    pub fn sensors(&self) -> &[SensorDecl] {
        &self.sensors
    }

    /// Replay the descriptor to the transport: node identity first,
    /// then every sensor in declaration order.
    pub fn announce(&self, transport: &mut impl TransportPort) {
        transport.describe_node(
            &self.descriptor.name,
            self.descriptor.version_major,
            self.descriptor.version_minor,
        );
        for decl in &self.sensors {
            transport.present_sensor(decl.child_id, decl.kind, decl.label);
        }
    }
}

fn parse_version(field: &str) -> u8 {
    field.parse().unwrap_or(0)
}
