pub mod action;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = action::AppArgs::parse();

    bt_payments::logger::setup_simple_logger(bt_payments::logger::level_from_verbosity(
        args.verbose,
    ))?;

    args.run().await
}
