//! Duty-cycle disciplines end to end: boot behavior, suspend pacing,
//! and the always-on elapsed-time gate.

use meshmote::app::ports::ValueKind;
use meshmote::app::service::NodeService;
use meshmote::config::{Discipline, NodeConfig};

use crate::mock_hw::{MockPower, MockSensors, MockTransport};

fn sleeping_service(sleep_ms: u32) -> NodeService {
    let mut config = NodeConfig::default();
    config.discipline = Discipline::Sleep { sleep_ms };
    NodeService::new(config)
}

fn always_on_service(period_ms: u32) -> NodeService {
    let mut config = NodeConfig::default();
    config.discipline = Discipline::AlwaysOn { period_ms };
    NodeService::new(config)
}

// ── Sleeping discipline ───────────────────────────────────────

#[test]
fn fresh_boot_runs_one_cycle_before_first_sleep() {
    let mut svc = sleeping_service(5_000);
    let mut hw = MockSensors::default();
    let mut transport = MockTransport::new();
    let mut power = MockPower::new();

    // Boot step: acquire, not sleep.
    svc.run_sleep_step(&mut hw, &mut transport, &mut power);
    assert_eq!(svc.cycle_count(), 1);
    assert!(power.sleeps.is_empty());
    assert!(!transport.calls.is_empty());

    // Next step: the first suspend, and nothing transmitted.
    let sent_before = transport.calls.len();
    svc.run_sleep_step(&mut hw, &mut transport, &mut power);
    assert_eq!(power.sleeps, vec![5_000]);
    assert_eq!(transport.calls.len(), sent_before);
}

#[test]
fn sleeping_node_alternates_suspend_and_acquire() {
    let mut svc = sleeping_service(1_000);
    let mut hw = MockSensors::default();
    let mut transport = MockTransport::new();
    let mut power = MockPower::new();

    // Boot acquire + 5 sleep/acquire rounds.
    for _ in 0..11 {
        svc.run_sleep_step(&mut hw, &mut transport, &mut power);
    }

    assert_eq!(svc.cycle_count(), 6);
    assert_eq!(power.sleeps.len(), 5);
    assert!(power.sleeps.iter().all(|&ms| ms == 1_000));
}

#[test]
fn voltage_goes_out_every_wake_cycle() {
    let mut svc = sleeping_service(1_000);
    let mut hw = MockSensors::default();
    let mut transport = MockTransport::new();
    let mut power = MockPower::new();

    for _ in 0..7 {
        svc.run_sleep_step(&mut hw, &mut transport, &mut power);
    }

    assert_eq!(
        transport.transmits_of(ValueKind::Voltage).len() as u64,
        svc.cycle_count()
    );
}

// ── Always-on discipline ──────────────────────────────────────

#[test]
fn never_reported_node_fires_on_first_tick() {
    let mut svc = always_on_service(30_000);
    let mut hw = MockSensors::default();
    let mut transport = MockTransport::new();

    assert!(svc.poll(0, &mut hw, &mut transport));
    assert_eq!(svc.cycle_count(), 1);
}

#[test]
fn poll_fires_only_when_period_elapsed_and_only_once() {
    let mut svc = always_on_service(30_000);
    let mut hw = MockSensors::default();
    let mut transport = MockTransport::new();

    // Prime: first report at t=0.
    assert!(svc.poll(0, &mut hw, &mut transport));

    // Elapsed 0, 10000: idle ticks.  35000: fires.
    assert!(!svc.poll(0, &mut hw, &mut transport));
    assert!(!svc.poll(10_000, &mut hw, &mut transport));
    assert!(svc.poll(35_000, &mut hw, &mut transport));
    assert_eq!(svc.cycle_count(), 2);

    // Once only — the timestamp re-armed at 35000.
    assert!(!svc.poll(36_000, &mut hw, &mut transport));
    assert!(!svc.poll(64_999, &mut hw, &mut transport));
    assert!(svc.poll(65_000, &mut hw, &mut transport));
}

#[test]
fn idle_ticks_transmit_nothing() {
    let mut svc = always_on_service(30_000);
    let mut hw = MockSensors::default();
    let mut transport = MockTransport::new();

    let _ = svc.poll(0, &mut hw, &mut transport);
    let sent = transport.calls.len();

    for now in [1_000u64, 2_000, 3_000, 29_999] {
        assert!(!svc.poll(now, &mut hw, &mut transport));
    }
    assert_eq!(transport.calls.len(), sent);
}

// ── Discipline mismatch is a no-op ────────────────────────────

#[test]
fn poll_under_sleeping_discipline_does_nothing() {
    let mut svc = sleeping_service(1_000);
    let mut hw = MockSensors::default();
    let mut transport = MockTransport::new();

    assert!(!svc.poll(99_000, &mut hw, &mut transport));
    assert!(transport.calls.is_empty());
}

#[test]
fn sleep_step_under_always_on_discipline_does_nothing() {
    let mut svc = always_on_service(1_000);
    let mut hw = MockSensors::default();
    let mut transport = MockTransport::new();
    let mut power = MockPower::new();

    svc.run_sleep_step(&mut hw, &mut transport, &mut power);
    assert!(transport.calls.is_empty());
    assert!(power.sleeps.is_empty());
}

// ── Full stack through the hardware adapter (sim sensors) ─────

// The only test in this binary touching the sensor sim statics, so
// parallel test threads never race on them.
#[test]
#[cfg(not(target_os = "espidf"))]
fn hardware_adapter_end_to_end() {
    use meshmote::adapters::hardware::HardwareAdapter;
    use meshmote::sensors::{battery, climate, distance};

    use crate::mock_hw::TransportCall;

    battery::sim_set_vcc_adc(3100); // → 3.335 V, above vcc_max
    climate::sim_set_climate(237, 512);
    distance::sim_set_distance_cm(250);

    let config = NodeConfig::default();
    let mut hw = HardwareAdapter::from_config(&config);
    let mut svc = NodeService::new(config);
    let mut transport = MockTransport::new();

    svc.run_cycle(&mut hw, &mut transport);

    match transport.transmits_of(ValueKind::Voltage)[0] {
        TransportCall::Transmit { value, .. } => assert!((value - 3.335).abs() < 0.001),
        _ => unreachable!(),
    }
    assert_eq!(transport.battery_percents(), vec![100]);
    match transport.transmits_of(ValueKind::Temperature)[0] {
        TransportCall::Transmit { value, .. } => assert!((value - 23.7).abs() < 0.001),
        _ => unreachable!(),
    }
    match transport.transmits_of(ValueKind::Distance)[0] {
        TransportCall::Transmit { value, .. } => assert!((value - 2.5).abs() < 0.001),
        _ => unreachable!(),
    }
}
