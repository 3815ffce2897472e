//! Battery percentage math and the value change filter.
//!
//! The filter is the only change-suppression in the node: battery
//! percentage is reported on the first cycle after boot and whenever the
//! freshly computed value differs from the last one transmitted.  All
//! other sensors report unconditionally every cycle.

/// Map a supply voltage onto the usable battery range as a percentage,
/// clamped to `[0, 100]`.  Out-of-range inputs (broken reference, wrong
/// calibration) saturate rather than error.
pub fn battery_percent(volts: f32, vcc_min: f32, vcc_max: f32) -> f32 {
    (100.0 * (volts - vcc_min) / (vcc_max - vcc_min)).clamp(0.0, 100.0)
}

/// Decide whether `current` is worth transmitting given the last value
/// sent.  `None` means nothing has ever been sent — the first cycle
/// always reports.  Comparison is exact float equality, no tolerance
/// band.
///
/// Stateless and I/O-free: on `true` the caller transmits and then
/// records the value via [`ReportState::record_sent`].
pub fn should_report(current: f32, last: Option<f32>) -> bool {
    match last {
        None => true,
        Some(prev) => current != prev,
    }
}

/// Last-transmitted battery state, owned by the service and threaded
/// through each cycle explicitly.
///
/// Updated unconditionally after calling the transport — the link is
/// fire-and-forget, so a dropped frame suppresses retransmission until
/// the value genuinely changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportState {
    last_sent_percent: Option<f32>,
}

impl ReportState {
    pub fn new() -> Self {
        Self {
            last_sent_percent: None,
        }
    }

    /// The last percentage handed to the transport, `None` before the
    /// first transmission.
    pub fn last_sent_percent(&self) -> Option<f32> {
        self.last_sent_percent
    }

    /// Record a transmission.
    pub fn record_sent(&mut self, percent: f32) {
        self.last_sent_percent = Some(percent);
    }

    /// Whether any battery report has ever gone out.  Drives the
    /// scheduler's boot-time "report before first sleep" rule.
    pub fn has_reported(&self) -> bool {
        self.last_sent_percent.is_some()
    }
}
