//! Bit-banged DHT22 (AM2302) single-wire protocol.
//!
//! Transaction: the host pulls the bus low for ≥1 ms (start signal),
//! releases it, then the sensor answers with an 80 µs low + 80 µs high
//! preamble followed by 40 data bits.  Each bit is a ~50 µs low gap and
//! a high pulse whose width encodes the value: ~26 µs = 0, ~70 µs = 1.
//! The 5th byte is a checksum over the first four.
//!
//! Returns `(temperature_tenths, humidity_tenths)` — both transmitted
//! by the sensor as tenths, temperature with a sign bit in the high
//! byte.

use embedded_hal::delay::DelayNs;
use esp_idf_hal::delay::Delay;

use crate::drivers::hw_init;
use crate::error::SensorError;

/// Longest plausible wait for any single bus edge.
const EDGE_TIMEOUT_US: u32 = 120;
/// High pulses longer than this are a 1-bit.
const ONE_BIT_THRESHOLD_US: u32 = 50;

/// Run one full transaction on the given data pin.
pub fn read(data_gpio: i32) -> Result<(i16, u16), SensorError> {
    let mut delay = Delay::new_default();

    // Start signal: drive the bus low, then release and hand the pin
    // back to the sensor.
    hw_init::gpio_set_output(data_gpio, true);
    hw_init::gpio_write(data_gpio, false);
    delay.delay_us(1_200);
    hw_init::gpio_write(data_gpio, true);
    delay.delay_us(30);
    hw_init::gpio_set_output(data_gpio, false);

    // Sensor preamble: low then high, ~80 µs each.
    wait_for_level(data_gpio, false, EDGE_TIMEOUT_US)?;
    wait_for_level(data_gpio, true, EDGE_TIMEOUT_US)?;
    wait_for_level(data_gpio, false, EDGE_TIMEOUT_US)?;

    // 40 data bits.
    let mut frame = [0u8; 5];
    for bit in 0..40 {
        wait_for_level(data_gpio, true, EDGE_TIMEOUT_US)?;
        let width = wait_for_level(data_gpio, false, EDGE_TIMEOUT_US)?;
        if width > ONE_BIT_THRESHOLD_US {
            frame[bit / 8] |= 1 << (7 - bit % 8);
        }
    }

    let sum = frame[0]
        .wrapping_add(frame[1])
        .wrapping_add(frame[2])
        .wrapping_add(frame[3]);
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    let hum_tenths = u16::from_be_bytes([frame[0], frame[1]]);
    // Temperature: high bit of byte 2 is the sign, not two's complement.
    let raw_temp = u16::from_be_bytes([frame[2] & 0x7F, frame[3]]);
    let temp_tenths = if frame[2] & 0x80 != 0 {
        -(raw_temp as i16)
    } else {
        raw_temp as i16
    };

    Ok((temp_tenths, hum_tenths))
}

/// Busy-wait until the pin reads `level`; returns the wait in µs.
fn wait_for_level(pin: i32, level: bool, timeout_us: u32) -> Result<u32, SensorError> {
    let start = micros();
    loop {
        if hw_init::gpio_read(pin) == level {
            return Ok((micros() - start) as u32);
        }
        if micros() - start > u64::from(timeout_us) {
            return Err(SensorError::BusTimeout);
        }
    }
}

fn micros() -> u64 {
    // SAFETY: esp_timer_get_time is a monotonic counter read.
    (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
}
