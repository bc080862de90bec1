//! Trait interfaces between the incentive core and its data layer.
//!
//! - [`IncentiveDataSource`]: read-only indexer data. The dashboard's JSON
//!   fixture source implements it; a GraphQL client would too.

use rust_decimal::Decimal;

use crate::error::DataSourceError;
use crate::types::{AggregatedBalance, CampaignState, Chronicle, Contribution, SiblingCandidate};

/// Read-only access to crowdloan data indexed from the relay chain.
///
/// Every method returns owned records; the incentive core never mutates
/// them. Implementations may block on I/O, computation downstream does not.
pub trait IncentiveDataSource {
    /// The latest processed chain head.
    fn chronicle(&self) -> Result<Chronicle, DataSourceError>;

    /// Current funding state of a crowdloan. `None` if not registered.
    fn campaign(&self, parachain_id: &str) -> Result<Option<CampaignState>, DataSourceError>;

    /// Unfinished crowdloans other than `own_parachain_id`, with their
    /// current valuation.
    fn sibling_candidates(
        &self,
        own_parachain_id: &str,
    ) -> Result<Vec<SiblingCandidate>, DataSourceError>;

    /// Free KSM balance of `account`, in base units.
    fn account_balance(&self, account: &str) -> Result<Decimal, DataSourceError>;

    /// All contributions of `account` to `parachain_id`.
    fn contributions(
        &self,
        account: &str,
        parachain_id: &str,
    ) -> Result<Vec<Contribution>, DataSourceError>;

    /// Raised amount of every crowdloan as it stood at each of `block_heights`.
    ///
    /// Each returned record carries the queried height in `block_num`.
    fn historical_balances(
        &self,
        block_heights: &[u64],
    ) -> Result<Vec<AggregatedBalance>, DataSourceError>;

    /// Sum of contribution weights across all accounts. `None` until the
    /// indexer has computed it.
    fn total_contribution_weight(
        &self,
        parachain_id: &str,
    ) -> Result<Option<Decimal>, DataSourceError>;
}
