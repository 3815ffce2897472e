//! Low-level hardware drivers.
//!
//! `hw_init` owns one-shot peripheral bring-up and the raw register
//! accessors; `dht22` and `hcsr04` are the bit-banged sensor protocols,
//! compiled for the device target only (the sensor layer substitutes
//! simulation statics on the host).

pub mod hw_init;

#[cfg(target_os = "espidf")]
pub mod dht22;
#[cfg(target_os = "espidf")]
pub mod hcsr04;
