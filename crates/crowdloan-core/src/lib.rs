//! # crowdloan-core
//! Foundation types, errors and configuration for the crowdloan incentives.

pub mod config;
pub mod constants;
pub mod error;
pub mod fixed_point;
pub mod traits;
pub mod types;
