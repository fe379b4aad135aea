use clap::Subcommand;

mod simulate;
mod smoke;
mod view_pool;

pub use simulate::*;
pub use smoke::*;
pub use view_pool::*;

#[derive(Debug, Subcommand)]
pub enum Subcmd {
    Simulate(SimulateArgs),
    Smoke(SmokeArgs),
    ViewPool(ViewPoolArgs),
}

pub trait SubcmdExec {
    fn process_cmd(&self, args: &crate::Args) -> anyhow::Result<()>;
}

impl SubcmdExec for Subcmd {
    fn process_cmd(&self, args: &crate::Args) -> anyhow::Result<()> {
        match self {
            Self::Simulate(a) => a.process_cmd(args),
            Self::Smoke(a) => a.process_cmd(args),
            Self::ViewPool(a) => a.process_cmd(args),
        }
    }
}
