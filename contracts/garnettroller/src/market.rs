use soroban_sdk::{Address, Env};

/// Interface every listed market must expose to the controller. The
/// controller only reads stored figures; it never asks a market to
/// recompute interest.
#[soroban_sdk::contractclient(name = "MarketClient")]
pub trait Market {
    /// Total receipt tokens outstanding.
    fn get_total_supply(env: Env) -> u128;
    /// Total borrowed underlying as last written by the market.
    fn get_total_borrows(env: Env) -> u128;
    /// Market-wide borrow index (scaled 1e18). Stored borrow balances are
    /// denominated against this index.
    fn get_borrow_index(env: Env) -> u128;
    /// Receipt-token to underlying exchange rate (scaled 1e18).
    fn get_exchange_rate(env: Env) -> u128;
    /// (receipt tokens, stored borrow balance, exchange rate) for one
    /// account, read in a single call.
    fn get_account_snapshot(env: Env, account: Address) -> (u128, u128, u128);
}
