//! Registration handshake: descriptor contents and replay order.

use meshmote::app::ports::SensorKind;
use meshmote::app::service::NodeService;
use meshmote::config::NodeConfig;

use crate::mock_hw::{MockTransport, TransportCall};

#[test]
fn announce_sends_node_identity_before_sensors() {
    let svc = NodeService::new(NodeConfig::default());
    let mut transport = MockTransport::new();

    svc.present(&mut transport);

    assert_eq!(transport.calls.len(), 5);
    match &transport.calls[0] {
        TransportCall::DescribeNode {
            name,
            version_major,
            version_minor,
        } => {
            assert_eq!(name.as_str(), "MeshMote Sensor");
            assert_eq!((*version_major, *version_minor), (0, 6));
        }
        other => panic!("expected DescribeNode first, got {other:?}"),
    }
    for call in &transport.calls[1..] {
        assert!(matches!(call, TransportCall::PresentSensor { .. }));
    }
}

#[test]
fn sensor_declarations_follow_pipeline_order() {
    let svc = NodeService::new(NodeConfig::default());
    let mut transport = MockTransport::new();

    svc.present(&mut transport);

    let kinds: Vec<SensorKind> = transport
        .calls
        .iter()
        .filter_map(|c| match c {
            TransportCall::PresentSensor { kind, .. } => Some(*kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        [
            SensorKind::Multimeter,
            SensorKind::Temperature,
            SensorKind::Humidity,
            SensorKind::Distance,
        ]
    );
}

#[test]
fn reduced_sensor_set_declares_fewer_children() {
    let mut config = NodeConfig::default();
    config.sensors.climate = false;
    let svc = NodeService::new(config);
    let mut transport = MockTransport::new();

    svc.present(&mut transport);

    // Node identity + battery + distance.
    assert_eq!(transport.calls.len(), 3);
}

#[test]
fn repeated_announce_is_identical() {
    // The descriptor is static: a reconnect replays the same payload.
    let svc = NodeService::new(NodeConfig::default());
    let mut first = MockTransport::new();
    let mut second = MockTransport::new();

    svc.present(&mut first);
    svc.present(&mut second);

    assert_eq!(first.calls, second.calls);
}
