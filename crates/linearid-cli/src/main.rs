//! `lid`: generate, pack and decode Linear IDs from the command line.
//!
//! ```text
//! lid next -n 3
//! lid --layout lid64 pack 1700000000 2 48879
//! lid --layout lid64 unpack 6553f1000002beef
//! lid --format bytes convert 00000000000000000000000000000001
//! ```

mod commands;
mod config;
mod logging;

use std::io::{BufWriter, Write};

use clap::Parser;

use crate::{
    config::{CliArgs, Config},
    logging::init_logging,
};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_logging();

    let args = CliArgs::parse();
    let config = Config::try_from(args)?;
    tracing::debug!(?config, "starting");

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    commands::run(&config, &mut out)?;
    out.flush()?;
    Ok(())
}
