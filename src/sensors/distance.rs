//! Ultrasonic distance ranger (HC-SR04-class).
//!
//! A measurement either yields centimeters or the `-1.0` no-echo
//! sentinel.  Sentinel readings must never reach the transport — the
//! acquisition pipeline checks [`DistanceReading::is_valid`] and drops
//! them.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: triggers and times the echo pulse via the hcsr04 driver.
//! On host/test: reads whole centimeters from a static AtomicI32 for
//! injection (`-1` = simulated echo loss).

use core::sync::atomic::AtomicI32;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hcsr04;

/// Reserved reading meaning "no echo received".
pub const NO_ECHO: f32 = -1.0;

static SIM_DISTANCE_CM: AtomicI32 = AtomicI32::new(100);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_distance_cm(cm: i32) {
    SIM_DISTANCE_CM.store(cm, Ordering::Relaxed);
}

/// One range sample, in centimeters.
#[derive(Debug, Clone, Copy)]
pub struct DistanceReading {
    pub cm: f32,
}

impl DistanceReading {
    /// Negative values are the failed-measurement sentinel.
    pub fn is_valid(&self) -> bool {
        self.cm >= 0.0
    }

    /// The reading in meters, for transmission.
    pub fn meters(&self) -> f32 {
        self.cm / 100.0
    }
}

pub struct DistanceSensor {
    trigger_gpio: i32,
    echo_gpio: i32,
}

impl DistanceSensor {
    pub fn new(trigger_gpio: i32, echo_gpio: i32) -> Self {
        Self {
            trigger_gpio,
            echo_gpio,
        }
    }

    /// Fire one measurement.  Returns [`NO_ECHO`] when the echo never
    /// arrives (out of range, absorbed pulse).
    pub fn read(&mut self) -> DistanceReading {
        DistanceReading {
            cm: self.measure_cm(),
        }
    }

    #[cfg(target_os = "espidf")]
    fn measure_cm(&mut self) -> f32 {
        hcsr04::measure_cm(self.trigger_gpio, self.echo_gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn measure_cm(&mut self) -> f32 {
        let _ = (self.trigger_gpio, self.echo_gpio);
        let cm = SIM_DISTANCE_CM.load(Ordering::Relaxed);
        if cm < 0 { NO_ECHO } else { cm as f32 }
    }
}
