mod cancel_redeem;
mod claim_redeem;
mod claim_reward;
mod deposit;
mod request_redeem;
mod set_config;
mod set_config_authority;
