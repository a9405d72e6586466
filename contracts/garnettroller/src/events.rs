use soroban_sdk::{contractevent, Address};

use crate::storage::PauseAction;

/// Mirrors Compound's MarketListed event: emitted when a market is added
/// to the supported set.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketListed {
    #[topic]
    pub market: Address,
}

/// Mirrors Compound's MarketEntered event.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketEntered {
    #[topic]
    pub account: Address,
    #[topic]
    pub market: Address,
}

/// Mirrors Compound's NewAdmin event.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewAdmin {
    #[topic]
    pub admin: Address,
}

/// Mirrors Compound's NewCollateralFactor event.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewCollateralFactor {
    #[topic]
    pub market: Address,
    pub collateral_factor_mantissa: u128,
}

/// Emitted when the pluggable liquidity lens is set or replaced.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewLiquidityLens {
    #[topic]
    pub lens: Address,
}

/// Supply-side reward emission rate changed.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SupplySpeedUpdated {
    #[topic]
    pub market: Address,
    pub speed: u128,
}

/// Borrow-side reward emission rate changed.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BorrowSpeedUpdated {
    #[topic]
    pub market: Address,
    pub speed: u128,
}

/// Mirrors Compound's ActionPaused event.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActionPauseUpdated {
    #[topic]
    pub market: Address,
    pub action: PauseAction,
    pub paused: bool,
}

/// Mirrors Compound's DistributedSupplierComp event: reward credited to a
/// supplier when its snapshot is reconciled against the market index.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributedSupplierReward {
    #[topic]
    pub market: Address,
    #[topic]
    pub supplier: Address,
    pub delta: u128,
    pub index: u128,
}

/// Mirrors Compound's DistributedBorrowerComp event.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributedBorrowerReward {
    #[topic]
    pub market: Address,
    #[topic]
    pub borrower: Address,
    pub delta: u128,
    pub index: u128,
}
