use soroban_sdk::{Address, Env};

/// Replaceable valuation strategy. When the admin configures a lens, every
/// liquidity query is delegated to it instead of the built-in fold, so
/// alternative valuation algorithms (oracle-priced, cross-chain, ...) can
/// be substituted without touching reward accounting.
#[soroban_sdk::contractclient(name = "LiquidityLensClient")]
pub trait LiquidityLens {
    fn hypothetical_liquidity(
        env: Env,
        account: Address,
        market: Option<Address>,
        redeem_tokens: u128,
        borrow_amount: u128,
    ) -> (u128, u128);
}
