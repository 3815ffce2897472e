//! Duty-cycle scheduler engine.
//!
//! Two mutually exclusive disciplines pace the measurement-and-report
//! cycle, selected per deployment by [`Discipline`](crate::config::Discipline):
//!
//! ```text
//! Sleeping node (battery)               Always-on node (mains / repeater)
//!
//!   IDLE ──[never reported]──▶ ACQUIRING    IDLE ──tick──▶ CHECKING
//!    │                            │            ▲              │
//!    │ [already reported]         ▼            │   [elapsed < period]
//!    └──────────▶ SLEEPING ◀──────┘            ├──────────────┤
//!                    │    ▲                    │   [elapsed ≥ period
//!                    ▼    │                    │    or never reported]
//!                 ACQUIRING                    │              ▼
//!                                              └────────── ACQUIRING
//! ```
//!
//! The scheduler owns all schedule state and nothing else: it decides
//! *when*, the [`NodeService`](crate::app::service::NodeService) decides
//! *what*.  Neither discipline retries a failed cycle — the next
//! scheduled cycle self-heals transients.

use crate::config::Discipline;
use log::debug;

// ═══════════════════════════════════════════════════════════════
//  Cycle vocabulary
// ═══════════════════════════════════════════════════════════════

/// The phases a node moves through within one duty cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Checking,
    Acquiring,
    Sleeping,
}

/// What the caller should do next, as decided by a sleeping-discipline
/// step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleAction {
    /// Run the full acquisition pipeline now.
    Acquire,
    /// Suspend for the given duration (blocking, cancellation-less).
    Sleep(u32),
}

// ═══════════════════════════════════════════════════════════════
//  Sleeping discipline
// ═══════════════════════════════════════════════════════════════

/// Sleep/wake cycle for battery-powered nodes.
///
/// On a fresh boot where nothing has ever been sent, one Acquiring pass
/// runs before the first sleep so the gateway learns the node exists
/// without waiting a full period.  After that the node alternates
/// Sleeping → Acquiring forever; there is no terminal state.
#[derive(Debug)]
pub struct SleepCycle {
    sleep_ms: u32,
    state: CycleState,
}

impl SleepCycle {
    pub fn new(sleep_ms: u32) -> Self {
        Self {
            sleep_ms,
            state: CycleState::Idle,
        }
    }

    /// Advance one step and return the action to perform.
    ///
    /// `has_reported` is the node's "has anything ever been sent" flag;
    /// it only matters for the very first step out of `Idle`.
    pub fn advance(&mut self, has_reported: bool) -> CycleAction {
        match self.state {
            CycleState::Idle => {
                if has_reported {
                    debug!("schedule: boot with prior report, sleeping first");
                    self.state = CycleState::Sleeping;
                    CycleAction::Sleep(self.sleep_ms)
                } else {
                    debug!("schedule: first boot, acquiring before first sleep");
                    self.state = CycleState::Acquiring;
                    CycleAction::Acquire
                }
            }
            CycleState::Acquiring => {
                self.state = CycleState::Sleeping;
                CycleAction::Sleep(self.sleep_ms)
            }
            // Woken from suspend: measure and report.
            CycleState::Sleeping | CycleState::Checking => {
                self.state = CycleState::Acquiring;
                CycleAction::Acquire
            }
        }
    }

    pub fn state(&self) -> CycleState {
        self.state
    }
}

// ═══════════════════════════════════════════════════════════════
//  Always-on discipline
// ═══════════════════════════════════════════════════════════════

/// Elapsed-time poll gate for mains-powered / repeater nodes.
///
/// `check` must return promptly on every tick — the same execution
/// context also relays other nodes' traffic.  The node never suspends.
#[derive(Debug)]
pub struct PollCycle {
    period_ms: u32,
    /// Timestamp of the last completed report cycle.  `None` until the
    /// first cycle, which therefore fires immediately.
    last_report_ms: Option<u64>,
}

impl PollCycle {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_report_ms: None,
        }
    }

    /// One scheduler tick: `true` when a cycle is due, i.e. the node has
    /// never reported or the fixed period has elapsed since the last
    /// report.  Does not mutate the timestamp — call
    /// [`mark_reported`](Self::mark_reported) after the cycle ran.
    pub fn check(&self, now_ms: u64) -> bool {
        match self.last_report_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= u64::from(self.period_ms),
        }
    }

    /// Record a completed cycle, re-arming the period.
    pub fn mark_reported(&mut self, now_ms: u64) {
        self.last_report_ms = Some(now_ms);
    }

    pub fn last_report_ms(&self) -> Option<u64> {
        self.last_report_ms
    }
}

// ═══════════════════════════════════════════════════════════════
//  Discipline dispatch
// ═══════════════════════════════════════════════════════════════

/// Schedule state for the configured discipline.  Owned exclusively by
/// the scheduler layer; the service holds one and never inspects its
/// internals beyond the discipline split.
#[derive(Debug)]
pub enum ScheduleState {
    Sleep(SleepCycle),
    Poll(PollCycle),
}

impl ScheduleState {
    pub fn from_discipline(discipline: &Discipline) -> Self {
        match *discipline {
            Discipline::Sleep { sleep_ms } => Self::Sleep(SleepCycle::new(sleep_ms)),
            Discipline::AlwaysOn { period_ms } => Self::Poll(PollCycle::new(period_ms)),
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
