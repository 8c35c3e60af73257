#![allow(ambiguous_glob_reexports)]

pub mod initialize_pool;
pub mod provide_liquidity;
pub mod remove_liquidity;
pub mod harvest_rewards;
pub mod deposit;
pub mod withdraw;
pub mod publish_balance;
pub mod settle_wager;
pub mod set_paused;
pub mod update_operators;
pub mod update_fees;
pub mod emergency_drain;
pub mod reward_math;

pub use initialize_pool::*;
pub use provide_liquidity::*;
pub use remove_liquidity::*;
pub use harvest_rewards::*;
pub use deposit::*;
pub use withdraw::*;
pub use publish_balance::*;
pub use settle_wager::*;
pub use set_paused::*;
pub use update_operators::*;
pub use update_fees::*;
pub use emergency_drain::*;
