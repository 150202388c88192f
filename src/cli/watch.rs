use std::time::Duration;

use chrono::Local;
use tokio::{signal, time::sleep};

use crate::{
    cli::{PriceArgs, WatchArgs},
    core::snapshot::Snapshot,
    prelude::*,
    tables::{View, build_snapshot_tables},
};

/// Upstream prices change at most twice a day.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(15 * 60);

#[instrument(skip_all, fields(region = %args.region))]
pub async fn watch(args: &PriceArgs, watch_args: &WatchArgs) -> Result {
    let api = args.new_api()?;
    let view = if watch_args.expanded { View::Expanded } else { View::Compact };

    loop {
        let snapshot = Snapshot::fetch(&api, args.region, Local::now(), args.cutoff).await;
        for table in build_snapshot_tables(&snapshot, view, args.cutoff)? {
            println!("{table}");
        }
        info!(interval = ?REFRESH_INTERVAL, "sleeping…");

        tokio::select! {
            () = sleep(REFRESH_INTERVAL) => {}
            result = signal::ctrl_c() => {
                result.context("failed to listen for Ctrl-C")?;
                info!("interrupted");
                return Ok(());
            }
        }
    }
}
