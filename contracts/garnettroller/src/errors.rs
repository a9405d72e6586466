use soroban_sdk::contracterror;

/// Failure taxonomy for the controller.
///
/// Range violations (`MathOverflow`, `BlockOutOfRange`) abort the
/// triggering call; values are never clamped or wrapped. `ActionPaused` is
/// reported distinctly from `InsufficientLiquidity` so callers can tell a
/// policy denial from a risk denial.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    AlreadyInitialized = 1,
    MarketNotListed = 2,
    MarketAlreadyListed = 3,
    ActionPaused = 4,
    InsufficientLiquidity = 5,
    MathOverflow = 6,
    BlockOutOfRange = 7,
    InvalidCollateralFactor = 8,
}
