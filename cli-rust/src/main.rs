use clap::{builder::ValueParser, Parser};
use liquid_staking::{AccountId, Clock, SharedLedger};
use tracing::debug;

mod argparse;
mod subcmd;
mod utils;

use argparse::{parse_pool_config_from_path, ConfigWrapper};
use subcmd::{Subcmd, SubcmdExec};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Runs the liquid staking ledger locally: smoke tests, scripted simulations and pool inspection"
)]
pub struct Args {
    #[arg(
        long,
        short,
        help = "path to pool config JSON. Omitted fields and an empty path use the defaults",
        default_value = "",
        value_parser = ValueParser::new(parse_pool_config_from_path)
    )]
    pub config: ConfigWrapper,

    #[arg(
        long,
        help = "id of the pool's config authority",
        default_value = "owner"
    )]
    pub authority: String,

    #[arg(long, short, help = "log at debug level", default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub subcmd: Subcmd,
}

impl Args {
    pub fn authority(&self) -> AccountId {
        AccountId::new(self.authority.as_str())
    }

    /// A fresh ledger with the configured pool, created at the clock's current time
    pub fn shared_ledger<C: Clock>(&self, clock: C) -> anyhow::Result<SharedLedger<C>> {
        debug!(config = ?self.config, authority = %self.authority, "creating pool");
        Ok(SharedLedger::new(*self.config, self.authority(), clock)?)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    args.subcmd.process_cmd(&args)
}
