//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns one driver per fitted sensor.  The supply-voltage
//! monitor is always present; climate and distance are optional per
//! [`SensorSet`](crate::config::SensorSet).  Absent sensors read as
//! `None` so the acquisition pipeline skips them without consulting the
//! config a second time.

pub mod battery;
pub mod climate;
pub mod distance;

use crate::config::NodeConfig;
use crate::pins;
use battery::{VoltageMonitor, VoltageReading};
use climate::{ClimateReading, ClimateSensor};
use distance::{DistanceReading, DistanceSensor};

/// Aggregates the fitted sensor drivers.
pub struct SensorHub {
    battery: VoltageMonitor,
    climate: Option<ClimateSensor>,
    distance: Option<DistanceSensor>,
}

impl SensorHub {
    /// Build the hub for the configured sensor set.
    pub fn from_config(config: &NodeConfig) -> Self {
        Self {
            battery: VoltageMonitor::new(config.vcc_calibration),
            climate: config
                .sensors
                .climate
                .then(|| ClimateSensor::new(pins::DHT_DATA_GPIO)),
            distance: config.sensors.distance.then(|| {
                DistanceSensor::new(pins::ULTRASONIC_TRIGGER_GPIO, pins::ULTRASONIC_ECHO_GPIO)
            }),
        }
    }

    pub fn read_voltage(&mut self) -> VoltageReading {
        self.battery.read()
    }

    /// `None` when no climate sensor is fitted.
    pub fn read_climate(&mut self) -> Option<ClimateReading> {
        self.climate.as_mut().map(ClimateSensor::read)
    }

    /// `None` when no ranger is fitted.
    pub fn read_distance(&mut self) -> Option<DistanceReading> {
        self.distance.as_mut().map(DistanceSensor::read)
    }
}
