use liquid_staking_interface::LedgerEvent;
use tracing::info;

use crate::LiquidStaking;

impl LiquidStaking {
    /// Logs a committed call and buffers it for [`LiquidStaking::take_events`]
    pub(crate) fn emit(&mut self, event: LedgerEvent) {
        info!(
            operation = %event.operation,
            account = %event.account,
            underlying = event.amounts.underlying,
            shares = event.amounts.shares,
            reward = event.amounts.reward,
            timestamp = event.timestamp,
            unlock_time = ?event.unlock_time,
            "ledger event"
        );
        self.events.push(event);
    }
}
