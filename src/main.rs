#![doc = include_str!("../README.md")]

mod api;
mod cli;
mod core;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, show, watch},
    prelude::*,
    tables::View,
};

#[tokio::main]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();

    match args.command {
        Command::Now => show(&args.prices, View::Compact).await?,
        Command::Chart => show(&args.prices, View::Expanded).await?,
        Command::Watch(watch_args) => watch(&args.prices, &watch_args).await?,
    }

    info!("done!");
    Ok(())
}
