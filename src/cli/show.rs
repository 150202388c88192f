use chrono::Local;

use crate::{
    cli::PriceArgs,
    core::snapshot::Snapshot,
    prelude::*,
    tables::{View, build_snapshot_tables},
};

/// Fetch once and print.
#[instrument(skip_all, fields(region = %args.region))]
pub async fn show(args: &PriceArgs, view: View) -> Result {
    let api = args.new_api()?;
    let snapshot = Snapshot::fetch(&api, args.region, Local::now(), args.cutoff).await;
    for table in build_snapshot_tables(&snapshot, view, args.cutoff)? {
        println!("{table}");
    }
    Ok(())
}
