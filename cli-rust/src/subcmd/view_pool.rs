use std::sync::Arc;

use clap::Args;
use liquid_staking::ManualClock;

use crate::utils::{load_script, replay};

use super::SubcmdExec;

#[derive(Args, Debug)]
#[command(long_about = "View details about the configured liquid staking pool")]
pub struct ViewPoolArgs {
    #[arg(long, help = "path to a simulation script to replay before viewing")]
    script: Option<String>,
}

impl SubcmdExec for ViewPoolArgs {
    fn process_cmd(&self, args: &crate::Args) -> anyhow::Result<()> {
        let ledger = args.shared_ledger(Arc::new(ManualClock::new(0)))?;
        if let Some(path) = &self.script {
            let steps = load_script(path)?;
            replay(&ledger, &steps, &args.authority());
        }

        let pool = ledger.pool_state();
        let summary = ledger.staking_summary()?;
        let price = pool
            .share_price()
            .map_or_else(|| "-".to_owned(), |p| p.to_string());

        println!("Pool:\nConfig authority: {}", pool.config_authority);
        println!(
            "Reward rate: {}/s\nStake bounds: [{}, {}]\nCooldown: {}s",
            pool.config.reward_rate_per_second,
            pool.config.min_stake,
            pool.config.max_stake,
            pool.config.cooldown_period
        );
        println!(
            "Active: {} underlying, {} shares, price {}",
            pool.active_underlying(),
            pool.total_shares,
            price
        );
        println!(
            "Locked: {} underlying, {} shares, {} pending redemptions",
            pool.locked_underlying, pool.locked_shares, summary.pending_redemptions
        );
        println!(
            "Accounts: {}\nRewards emitted: {}\nRewards paid: {}",
            summary.total_accounts, summary.total_rewards_emitted, summary.total_rewards_paid
        );
        println!(
            "Acc reward per share: {} as of {}",
            summary.acc_reward_per_share, summary.as_of
        );
        Ok(())
    }
}
