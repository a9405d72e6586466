use soroban_sdk::{contracttype, Address, Env, Vec};

// Storage key types for the contract
#[contracttype]
pub enum DataKey {
    Admin,
    LiquidityLens,                      // Address (optional)
    Market(Address),                    // MarketConfig
    AccountMarkets(Address),            // Vec<Address>, in entry order
    Membership(Address, Address),       // (market, account) -> bool
    ActionPaused(Address, PauseAction), // per-market pause flag
    SupplySpeed(Address),               // reward units per block
    BorrowSpeed(Address),
    SupplyRewardState(Address),         // RewardState
    BorrowRewardState(Address),
    SupplierIndex(Address, Address),    // (market, account) -> index mantissa
    BorrowerIndex(Address, Address),
    Accrued(Address),                   // unclaimed reward units per account
}

/// Market actions that can be paused independently per market.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PauseAction {
    Deposit,
    Redeem,
    Borrow,
    Enter,
}

/// Listing and risk parameters for one market. `is_listed` is set once and
/// never unset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketConfig {
    pub is_listed: bool,
    pub collateral_factor_mantissa: u128,
}

/// Cumulative reward index for one market side. `index` is a 1e36-scaled
/// mantissa; `block` is the ledger sequence of the last update. The two
/// fields are always written together.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardState {
    pub index: u128,
    pub block: u32,
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().persistent().has(&DataKey::Admin)
}

pub fn read_admin(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&DataKey::Admin)
        .expect("admin not set")
}

pub fn write_admin(env: &Env, admin: &Address) {
    env.storage().persistent().set(&DataKey::Admin, admin);
}

pub fn read_liquidity_lens(env: &Env) -> Option<Address> {
    env.storage().persistent().get(&DataKey::LiquidityLens)
}

pub fn write_liquidity_lens(env: &Env, lens: &Address) {
    env.storage().persistent().set(&DataKey::LiquidityLens, lens);
}

pub fn read_market(env: &Env, market: &Address) -> Option<MarketConfig> {
    env.storage()
        .persistent()
        .get(&DataKey::Market(market.clone()))
}

pub fn write_market(env: &Env, market: &Address, config: &MarketConfig) {
    env.storage()
        .persistent()
        .set(&DataKey::Market(market.clone()), config);
}

pub fn read_account_markets(env: &Env, account: &Address) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::AccountMarkets(account.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn write_account_markets(env: &Env, account: &Address, markets: &Vec<Address>) {
    env.storage()
        .persistent()
        .set(&DataKey::AccountMarkets(account.clone()), markets);
}

pub fn is_member(env: &Env, market: &Address, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Membership(market.clone(), account.clone()))
        .unwrap_or(false)
}

pub fn write_membership(env: &Env, market: &Address, account: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::Membership(market.clone(), account.clone()), &true);
}

pub fn read_action_paused(env: &Env, market: &Address, action: PauseAction) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::ActionPaused(market.clone(), action))
        .unwrap_or(false)
}

pub fn write_action_paused(env: &Env, market: &Address, action: PauseAction, paused: bool) {
    env.storage()
        .persistent()
        .set(&DataKey::ActionPaused(market.clone(), action), &paused);
}

pub fn read_supply_speed(env: &Env, market: &Address) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::SupplySpeed(market.clone()))
        .unwrap_or(0u128)
}

pub fn write_supply_speed(env: &Env, market: &Address, speed: u128) {
    env.storage()
        .persistent()
        .set(&DataKey::SupplySpeed(market.clone()), &speed);
}

pub fn read_borrow_speed(env: &Env, market: &Address) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::BorrowSpeed(market.clone()))
        .unwrap_or(0u128)
}

pub fn write_borrow_speed(env: &Env, market: &Address, speed: u128) {
    env.storage()
        .persistent()
        .set(&DataKey::BorrowSpeed(market.clone()), &speed);
}

pub fn read_supply_state(env: &Env, market: &Address) -> Option<RewardState> {
    env.storage()
        .persistent()
        .get(&DataKey::SupplyRewardState(market.clone()))
}

pub fn write_supply_state(env: &Env, market: &Address, state: &RewardState) {
    env.storage()
        .persistent()
        .set(&DataKey::SupplyRewardState(market.clone()), state);
}

pub fn read_borrow_state(env: &Env, market: &Address) -> Option<RewardState> {
    env.storage()
        .persistent()
        .get(&DataKey::BorrowRewardState(market.clone()))
}

pub fn write_borrow_state(env: &Env, market: &Address, state: &RewardState) {
    env.storage()
        .persistent()
        .set(&DataKey::BorrowRewardState(market.clone()), state);
}

pub fn read_supplier_index(env: &Env, market: &Address, account: &Address) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::SupplierIndex(market.clone(), account.clone()))
        .unwrap_or(0u128)
}

pub fn write_supplier_index(env: &Env, market: &Address, account: &Address, index: u128) {
    env.storage()
        .persistent()
        .set(&DataKey::SupplierIndex(market.clone(), account.clone()), &index);
}

pub fn read_borrower_index(env: &Env, market: &Address, account: &Address) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::BorrowerIndex(market.clone(), account.clone()))
        .unwrap_or(0u128)
}

pub fn write_borrower_index(env: &Env, market: &Address, account: &Address, index: u128) {
    env.storage()
        .persistent()
        .set(&DataKey::BorrowerIndex(market.clone(), account.clone()), &index);
}

pub fn read_accrued(env: &Env, account: &Address) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::Accrued(account.clone()))
        .unwrap_or(0u128)
}

pub fn write_accrued(env: &Env, account: &Address, amount: u128) {
    env.storage()
        .persistent()
        .set(&DataKey::Accrued(account.clone()), &amount);
}
