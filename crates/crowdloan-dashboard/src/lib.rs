//! # crowdloan-dashboard
//!
//! State store, configuration and data orchestration for the crowdloan
//! dashboard. Indexer data enters through
//! [`IncentiveDataSource`](crowdloan_core::traits::IncentiveDataSource),
//! is folded into [`AppState`] by [`reduce`], and
//! [`Dashboard`] derives reward estimates from the result.

pub mod action;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod fixture;
pub mod reducer;
pub mod state;

pub use action::Action;
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, EstimateView, Report};
pub use display::CampaignView;
pub use error::DashboardError;
pub use fixture::FixtureSource;
pub use reducer::reduce;
pub use state::{AccountData, AppState, HistoricalStatus, Loadable};
