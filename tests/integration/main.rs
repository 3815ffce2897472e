//! Integration tests: NodeService → acquisition pipeline → transport.

mod mock_hw;

mod handshake_tests;
mod schedule_tests;
