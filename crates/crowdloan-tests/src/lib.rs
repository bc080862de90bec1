//! Scenario and end-to-end tests for the crowdloan incentives.
//!
//! The tests in `tests/` exercise the engine and the dashboard together
//! over realistic auction schedules and fixture data.

pub mod helpers;
