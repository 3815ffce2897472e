//! GPIO / peripheral pin assignments for the MeshMote node board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Supply-voltage sense (resistive divider from VCC)
// ---------------------------------------------------------------------------

/// Battery/VCC divider tap — ADC1 channel 4 (GPIO 5 on ESP32-S3).
pub const VCC_SENSE_ADC_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Climate sensor (DHT22 / AM2302, single-wire)
// ---------------------------------------------------------------------------

/// DHT22 data line.  Open-drain with external 10 kΩ pull-up; the driver
/// flips this pin between output (start signal) and input (response).
pub const DHT_DATA_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Ultrasonic ranger (HC-SR04)
// ---------------------------------------------------------------------------

/// Trigger output — 10 µs pulse starts a measurement.
pub const ULTRASONIC_TRIGGER_GPIO: i32 = 7;
/// Echo input — pulse width encodes round-trip time.
pub const ULTRASONIC_ECHO_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// Mesh radio modem (UART-attached)
// ---------------------------------------------------------------------------

/// UART port number used for the radio modem.
pub const RADIO_UART_NUM: i32 = 1;
pub const RADIO_UART_TX_GPIO: i32 = 17;
pub const RADIO_UART_RX_GPIO: i32 = 18;
/// Modem link speed.
pub const RADIO_UART_BAUD: u32 = 9_600;

// ---------------------------------------------------------------------------
// Housekeeping
// ---------------------------------------------------------------------------

/// GPIOs with no function on this board.  Driven to input/low during
/// init — floating inputs leak current during sleep.
pub const UNUSED_GPIOS: [i32; 7] = [2, 3, 4, 9, 10, 11, 12];
