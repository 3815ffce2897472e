//! Bit-banged HC-SR04 ultrasonic ranger.
//!
//! A 10 µs trigger pulse starts a measurement; the module answers with
//! a high pulse on the echo pin whose width is the ultrasonic
//! round-trip time.  Centimeters = pulse µs / 58.  A missing echo
//! (target out of range, pulse absorbed) reads as the negative sentinel
//! that the sensor layer suppresses.

use embedded_hal::delay::DelayNs;
use esp_idf_hal::delay::Delay;

use crate::drivers::hw_init;
use crate::sensors::distance::NO_ECHO;

/// Echo pulses cannot start later than this after the trigger.
const ECHO_START_TIMEOUT_US: u64 = 30_000;
/// Longest measurable pulse (~4 m per the datasheet).
const ECHO_PULSE_TIMEOUT_US: u64 = 25_000;

/// Fire one measurement.  Returns centimeters, or [`NO_ECHO`] on
/// timeout.
pub fn measure_cm(trigger_gpio: i32, echo_gpio: i32) -> f32 {
    let mut delay = Delay::new_default();

    hw_init::gpio_write(trigger_gpio, true);
    delay.delay_us(10);
    hw_init::gpio_write(trigger_gpio, false);

    // Wait for the echo pulse to start.
    let Some(_) = wait_edge(echo_gpio, true, ECHO_START_TIMEOUT_US) else {
        return NO_ECHO;
    };
    // Time the pulse itself.
    let Some(width_us) = wait_edge(echo_gpio, false, ECHO_PULSE_TIMEOUT_US) else {
        return NO_ECHO;
    };

    width_us as f32 / 58.0
}

/// Busy-wait until the pin reads `level`; `None` on timeout, else the
/// wait in µs.
fn wait_edge(pin: i32, level: bool, timeout_us: u64) -> Option<u64> {
    let start = micros();
    loop {
        if hw_init::gpio_read(pin) == level {
            return Some(micros() - start);
        }
        if micros() - start > timeout_us {
            return None;
        }
    }
}

fn micros() -> u64 {
    // SAFETY: esp_timer_get_time is a monotonic counter read.
    (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
}
