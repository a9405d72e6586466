#![no_std]

mod constants;
mod contract;
mod errors;
mod events;
mod lens;
mod market;
mod math;
mod storage;

pub use contract::{Garnettroller, GarnettrollerClient};
pub use errors::Error;
pub use lens::{LiquidityLens, LiquidityLensClient};
pub use market::{Market, MarketClient};
pub use storage::{MarketConfig, PauseAction, RewardState};
