use anyhow::Context;
use clap::Args;
use liquid_staking::{AccountId, SystemClock};

use super::SubcmdExec;

#[derive(Args, Debug)]
#[command(
    long_about = "Deposits into a fresh pool, requests redemption of every minted share, then cancels it"
)]
pub struct SmokeArgs {
    #[arg(long, help = "staker account id", default_value = "staker")]
    account: String,

    #[arg(long, help = "amount of underlying to deposit. Defaults to the pool's min stake")]
    amount: Option<u64>,
}

impl SubcmdExec for SmokeArgs {
    fn process_cmd(&self, args: &crate::Args) -> anyhow::Result<()> {
        let ledger = args.shared_ledger(SystemClock)?;
        let account = AccountId::new(self.account.as_str());
        let amount = self.amount.unwrap_or(args.config.min_stake);

        let shares = ledger
            .deposit(&account, amount)
            .with_context(|| format!("depositing {} for {}", amount, account))?;
        println!("Deposited {} underlying for {}, minted {} shares", amount, account, shares);

        let request = ledger
            .request_redeem(&account, shares)
            .with_context(|| format!("requesting redemption of {} shares", shares))?;
        println!(
            "Requested redemption of {} shares for {} underlying, unlocks at {}",
            request.amount_shares, request.underlying_owed, request.unlock_time
        );

        let restored = ledger
            .cancel_redeem(&account)
            .context("cancelling redemption")?;
        println!("Cancelled redemption, {} shares restored", restored);

        let view = ledger
            .account(&account)?
            .with_context(|| format!("{} has no account after cancelling", account))?;
        println!(
            "{}: {} shares, {} active stake, {} unclaimed reward",
            account, view.shares, view.active_stake, view.unclaimed_reward
        );
        Ok(())
    }
}
