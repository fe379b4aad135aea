use std::{collections::BTreeMap, sync::Arc};

use clap::Args;
use liquid_staking::{AccountId, AccountView, LedgerEvent, ManualClock, PoolState, StakingSummary};
use serde::Serialize;
use tracing::{info, warn};

use crate::utils::{load_script, replay, stakers, StepReport};

use super::SubcmdExec;

#[derive(Args, Debug)]
#[command(long_about = "Replays a JSON script of timed ledger calls against a fresh pool. Example script:\n\
    '[{ \"at\": 0, \"op\": \"deposit\", \"account\": \"alice\", \"amount\": 1000 },\n\
      { \"at\": 10, \"op\": \"request_redeem\", \"account\": \"alice\", \"amount_shares\": 1000 }]'")]
pub struct SimulateArgs {
    #[arg(help = "path to the script JSON")]
    script: String,

    #[arg(long, help = "include the event log in the report", default_value_t = false)]
    events: bool,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    steps: Vec<StepReport>,
    summary: StakingSummary,
    pool: PoolState,
    accounts: BTreeMap<AccountId, Option<AccountView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<Vec<LedgerEvent>>,
}

impl SubcmdExec for SimulateArgs {
    fn process_cmd(&self, args: &crate::Args) -> anyhow::Result<()> {
        let steps = load_script(&self.script)?;
        let ledger = args.shared_ledger(Arc::new(ManualClock::new(0)))?;

        let steps_report = replay(&ledger, &steps, &args.authority());
        let failed = steps_report.iter().filter(|r| r.error.is_some()).count();
        if failed > 0 {
            warn!(failed, total = steps_report.len(), "some steps were rejected");
        }
        let accounts: BTreeMap<_, _> = stakers(&steps)
            .into_iter()
            .map(|id| ledger.account(&id).map(|view| (id, view)))
            .collect::<Result<_, _>>()?;
        let events = ledger.take_events();
        info!(
            steps = steps_report.len(),
            events = events.len(),
            script = %self.script,
            "replay complete"
        );

        let report = SimulationReport {
            steps: steps_report,
            summary: ledger.staking_summary()?,
            pool: ledger.pool_state(),
            accounts,
            events: self.events.then_some(events),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }
}
