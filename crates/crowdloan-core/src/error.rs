//! Error types for the crowdloan incentive calculations.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("division by zero")] DivisionByZero,
    #[error("arithmetic overflow")] Overflow,
    #[error("invalid decimal: {0}")] InvalidDecimal(String),
    #[error("precision {0} exceeds the supported maximum")] PrecisionTooLarge(u32),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScaleError {
    #[error("degenerate scale domain: [{0}, {0}]")] DegenerateDomain(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoricalDataError {
    #[error("overlapping auctions {first} and {second} at block {block}")] OverlappingAuctions { block: u64, first: u32, second: u32 },
    #[error("no own crowdloan balance recorded at block {0}")] MissingOwnBalance(u64),
    #[error("no eligible sibling crowdloan at block {0}")] NoSiblingCandidate(u64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IncompleteInputError {
    #[error("chronicle not loaded")] Chronicle,
    #[error("own crowdloan not loaded")] OwnCrowdloan,
    #[error("sibling crowdloan not loaded")] SiblingCrowdloan,
    #[error("total contribution weight not loaded")] TotalContributionWeight,
    #[error("historical incentive missing for block {0}")] HistoricalIncentive(u64),
    #[error("contribution at block {0} has no timestamp")] ContributionTimestamp(u64),
    #[error("no KSM price at or before {0}")] KsmPrice(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid scale {name}: {source}")] Scale { name: &'static str, source: ScaleError },
    #[error("{name} must not be negative")] Negative { name: &'static str },
    #[error("{name}: max {max} is below min {min}")] InvertedRange { name: &'static str, min: String, max: String },
    #[error("{name} must be positive")] NotPositive { name: &'static str },
    #[error("{name} must not be empty")] Empty { name: &'static str },
    #[error("precision {got} exceeds maximum {max}")] Precision { got: u32, max: u32 },
    #[error("invalid auction {id}: {reason}")] InvalidAuction { id: u32, reason: String },
    #[error("auctions {first} and {second} overlap")] OverlappingAuctions { first: u32, second: u32 },
    #[error("load: {0}")] Load(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataSourceError {
    #[error("data source unavailable: {0}")] Unavailable(String),
    #[error("malformed data: {0}")] Malformed(String),
    #[error("crowdloan not found: {0}")] CrowdloanNotFound(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IncentiveError {
    #[error(transparent)] Arithmetic(#[from] ArithmeticError),
    #[error(transparent)] Scale(#[from] ScaleError),
    #[error(transparent)] Historical(#[from] HistoricalDataError),
    #[error(transparent)] Incomplete(#[from] IncompleteInputError),
    #[error(transparent)] Config(#[from] ConfigError),
}
