//! Dashboard-level errors.
use thiserror::Error;

use crowdloan_core::error::{ArithmeticError, ConfigError, DataSourceError, IncentiveError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error(transparent)] Source(#[from] DataSourceError),
    #[error(transparent)] Incentive(#[from] IncentiveError),
    #[error(transparent)] Config(#[from] ConfigError),
    #[error("no account connected")] NoAccount,
    #[error("chronicle not loaded")] NoChronicle,
}

impl From<ArithmeticError> for DashboardError {
    fn from(e: ArithmeticError) -> Self {
        Self::Incentive(e.into())
    }
}
