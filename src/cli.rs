mod show;
mod watch;

use clap::{Parser, Subcommand};
use reqwest::Url;

pub use self::{show::show, watch::watch};
use crate::{
    api::elpris,
    core::{cutoff::PublicationCutoff, region::Region},
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub prices: PriceArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the current price and today's summary.
    #[clap(name = "now")]
    Now,

    /// Show the summary together with the hourly chart of today and tomorrow.
    #[clap(name = "chart")]
    Chart,

    /// Keep refreshing the prices until interrupted.
    #[clap(name = "watch")]
    Watch(WatchArgs),
}

#[derive(Parser)]
pub struct PriceArgs {
    /// Price region (bidding zone).
    #[clap(long, env = "PRICE_REGION", value_enum, default_value_t)]
    pub region: Region,

    /// Price API base URL.
    #[clap(long = "base-url", env = "PRICES_BASE_URL", default_value = elpris::DEFAULT_BASE_URL)]
    pub base_url: Url,

    /// Local hour since which tomorrow's prices are expected.
    #[clap(long = "tomorrow-cutoff-hour", env = "TOMORROW_CUTOFF_HOUR", default_value = "13")]
    pub cutoff: PublicationCutoff,
}

impl PriceArgs {
    pub fn new_api(&self) -> Result<elpris::Api> {
        elpris::Api::new(self.base_url.clone())
    }
}

#[derive(Parser)]
pub struct WatchArgs {
    /// Render the hourly chart on every refresh.
    #[clap(long)]
    pub expanded: bool,
}
