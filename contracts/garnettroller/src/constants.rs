/// 1e18 mantissa scale shared by collateral factors, exchange rates and
/// liquidity values.
pub const EXP_SCALE: u128 = 1_000_000_000_000_000_000u128;

/// 1e36 scale for cumulative reward indices. Indices accumulate in this
/// wider scale so long emission periods do not exhaust the 1e18 range.
pub const DOUBLE_SCALE: u128 = 1_000_000_000_000_000_000_000_000_000_000_000_000u128;

/// Reward indices start at one Double; account snapshots created before
/// tracking began are resolved against this baseline, not zero.
pub const REWARD_INITIAL_INDEX: u128 = DOUBLE_SCALE;

/// Upper bound for market collateral factors: 90%, scaled 1e18.
pub const COLLATERAL_FACTOR_MAX_MANTISSA: u128 = 900_000_000_000_000_000u128;
