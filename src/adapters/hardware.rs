//! Hardware adapter — bridges the sensor hub to the domain port.
//!
//! The only module in the system that hands real measurements to the
//! engine.  On non-espidf targets the underlying drivers read their
//! cfg-gated simulation statics, so the adapter itself is fully
//! host-testable.

use crate::app::ports::SensorPort;
use crate::config::NodeConfig;
use crate::sensors::SensorHub;
use crate::sensors::battery::VoltageReading;
use crate::sensors::climate::ClimateReading;
use crate::sensors::distance::DistanceReading;

/// Concrete adapter over the fitted sensors.
pub struct HardwareAdapter {
    hub: SensorHub,
}

impl HardwareAdapter {
    pub fn from_config(config: &NodeConfig) -> Self {
        Self {
            hub: SensorHub::from_config(config),
        }
    }
}

impl SensorPort for HardwareAdapter {
    fn read_voltage(&mut self) -> VoltageReading {
        self.hub.read_voltage()
    }

    fn read_climate(&mut self) -> Option<ClimateReading> {
        self.hub.read_climate()
    }

    fn read_distance(&mut self) -> Option<DistanceReading> {
        self.hub.read_distance()
    }
}
