//! crowdloan-cli: reward estimates for crowdloan contributors.
//!
//! Loads a JSON snapshot of indexer data, runs one dashboard refresh over
//! it and prints the requested view as JSON on stdout. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crowdloan_core::constants::BASE_UNIT_DECIMALS;
use crowdloan_core::fixed_point::parse_decimal;
use crowdloan_dashboard::display::{amount_view, reward_view};
use crowdloan_dashboard::{Dashboard, DashboardConfig, EstimateView, FixtureSource};

/// Crowdloan incentive and reward calculator.
#[derive(Parser, Debug)]
#[command(name = "crowdloan-cli", version, about = "Crowdloan incentive and reward calculator")]
struct Cli {
    /// JSON fixture with indexer data
    #[arg(long)]
    fixture: PathBuf,

    /// TOML configuration file (defaults to the user config dir, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Account to estimate rewards for
    #[arg(long)]
    account: Option<String>,

    /// Log level; overrides the configured one
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format ("text" or "json")
    #[arg(long, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reward estimate for --account.
    Estimate,
    /// BSX multiplier and HDX bonus a contribution would get now.
    Incentives,
    /// Historical HDX bonuses for --account's contributions.
    History,
    /// Reward estimate for a contribution made now.
    Preview {
        /// Amount in KSM, e.g. 12.5
        #[arg(long, value_parser = parse_amount)]
        amount: Decimal,
    },
    /// Everything above in one document.
    Report,
}

/// Rewards in whole BSX and HDX.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateOutput {
    rewards: EstimateView<crowdloan_core::types::RewardEstimate>,
    /// HDX reward converted at the KSM price of each contribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    hdx_reward_in_hdx: Option<EstimateView<Decimal>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = DashboardConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    init_logging(cli.log_level.as_deref().unwrap_or(&config.log_level), &cli.log_format);

    let source = FixtureSource::from_path(&cli.fixture)
        .with_context(|| format!("Failed to load fixture: {}", cli.fixture.display()))?;

    let mut dashboard = Dashboard::new(config).context("Invalid configuration")?;
    if let Some(account) = &cli.account {
        dashboard.connect_account(account.as_str());
    }
    dashboard.refresh(&source).context("Failed to refresh dashboard")?;
    info!(command = ?cli.command, "running");

    let output = match cli.command {
        Command::Estimate => {
            let prices = source.ksm_prices();
            let hdx_reward_in_hdx = if prices.is_empty() {
                None
            } else {
                Some(amount_view(dashboard.hdx_reward_in_hdx(prices)?)?)
            };
            serde_json::to_value(EstimateOutput {
                rewards: reward_view(dashboard.reward_estimate()?)?,
                hdx_reward_in_hdx,
            })?
        }
        Command::Incentives => {
            let live: EstimateView<_> = dashboard.live_incentives()?.into();
            serde_json::to_value(live)?
        }
        Command::History => serde_json::to_value(&dashboard.state().historical)?,
        Command::Preview { amount } => serde_json::to_value(reward_view(dashboard.preview(amount)?)?)?,
        Command::Report => serde_json::to_value(dashboard.report()?)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// A non-negative KSM amount, no finer than one base unit.
fn parse_amount(s: &str) -> Result<Decimal, String> {
    let amount = parse_decimal(s).map_err(|e| e.to_string())?;
    if amount.is_sign_negative() {
        return Err(format!("amount must not be negative: {s}"));
    }
    if amount.normalize().scale() > BASE_UNIT_DECIMALS {
        return Err(format!("amount has more than {BASE_UNIT_DECIMALS} decimal places: {s}"));
    }
    Ok(amount)
}

/// Initialize tracing on stderr with the given level and output format.
///
/// `RUST_LOG`, when set, takes precedence over `level`.
fn init_logging(level: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_preview_amount() {
        let cli = Cli::try_parse_from([
            "crowdloan-cli",
            "--fixture",
            "data.json",
            "--account",
            "alice",
            "preview",
            "--amount",
            "12.5",
        ])
        .unwrap();
        assert_eq!(cli.account.as_deref(), Some("alice"));
        match cli.command {
            Command::Preview { amount } => assert_eq!(amount, Decimal::new(125, 1)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn negative_amount_rejected() {
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("abc").is_err());
        assert_eq!(parse_amount(" 2 "), Ok(Decimal::from(2)));
    }

    #[test]
    fn sub_base_unit_amount_rejected() {
        assert!(parse_amount("1.0000000000001").is_err());
        assert_eq!(parse_amount("0.000000000001"), Ok(Decimal::new(1, 12)));
        // trailing zeros do not count
        assert_eq!(parse_amount("1.50000000000000"), Ok(Decimal::new(15, 1)));
    }

    #[test]
    fn fixture_is_required() {
        assert!(Cli::try_parse_from(["crowdloan-cli", "report"]).is_err());
    }
}
