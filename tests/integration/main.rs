//! Host-side integration test harness.

mod mock_hw;
mod service_tests;
