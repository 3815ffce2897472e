//! Suspend adapter for the sleeping discipline.
//!
//! - **`target_os = "espidf"`** — arms the RTC timer and enters light
//!   sleep; the radio and CPU are quiesced until the timer fires.
//! - **`not(target_os = "espidf")`** — `std::thread::sleep`, so host
//!   runs behave like a (fast-forwarded) node.

use log::debug;

use crate::app::ports::PowerPort;

/// Timer-wake suspend for the node.
pub struct NodePower;

impl NodePower {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NodePower {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerPort for NodePower {
    #[cfg(target_os = "espidf")]
    fn sleep_ms(&mut self, ms: u32) {
        debug!("suspending for {ms} ms");
        // SAFETY: timer-wake light sleep from the single loop context;
        // execution resumes here after the timer fires.
        unsafe {
            esp_idf_svc::sys::esp_sleep_enable_timer_wakeup(u64::from(ms) * 1_000);
            esp_idf_svc::sys::esp_light_sleep_start();
        }
        debug!("woke from suspend");
    }

    #[cfg(not(target_os = "espidf"))]
    fn sleep_ms(&mut self, ms: u32) {
        debug!("suspending for {ms} ms (host thread sleep)");
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
