use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

use crate::constants::{COLLATERAL_FACTOR_MAX_MANTISSA, REWARD_INITIAL_INDEX};
use crate::errors::Error;
use crate::events::*;
use crate::lens::LiquidityLensClient;
use crate::market::MarketClient;
use crate::math::{self, Double, Exp};
use crate::storage::{self, MarketConfig, PauseAction, RewardState};

#[contract]
pub struct Garnettroller;

#[contractimpl]
impl Garnettroller {
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if storage::has_admin(&env) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();
        storage::write_admin(&env, &admin);
        Ok(())
    }

    // Admin transfer
    pub fn set_admin(env: Env, new_admin: Address) {
        require_admin(&env);
        storage::write_admin(&env, &new_admin);
        NewAdmin {
            admin: new_admin.clone(),
        }
        .publish(&env);
    }

    pub fn get_admin(env: Env) -> Address {
        storage::read_admin(&env)
    }

    /// Add a market to the supported set. Listing is permanent; there is
    /// no delisting path.
    pub fn support_market(env: Env, market: Address) -> Result<(), Error> {
        require_admin(&env);
        if let Some(config) = storage::read_market(&env, &market) {
            if config.is_listed {
                return Err(Error::MarketAlreadyListed);
            }
        }
        storage::write_market(
            &env,
            &market,
            &MarketConfig {
                is_listed: true,
                collateral_factor_mantissa: 0,
            },
        );
        MarketListed {
            market: market.clone(),
        }
        .publish(&env);
        Ok(())
    }

    pub fn is_listed(env: Env, market: Address) -> bool {
        storage::read_market(&env, &market)
            .map(|config| config.is_listed)
            .unwrap_or(false)
    }

    pub fn get_collateral_factor(env: Env, market: Address) -> u128 {
        storage::read_market(&env, &market)
            .map(|config| config.collateral_factor_mantissa)
            .unwrap_or(0u128)
    }

    /// Set a market's collateral factor, bounded at 90%.
    pub fn set_collateral_factor(
        env: Env,
        market: Address,
        collateral_factor_mantissa: u128,
    ) -> Result<(), Error> {
        require_admin(&env);
        let mut config = listed_market(&env, &market)?;
        if collateral_factor_mantissa > COLLATERAL_FACTOR_MAX_MANTISSA {
            return Err(Error::InvalidCollateralFactor);
        }
        config.collateral_factor_mantissa = collateral_factor_mantissa;
        storage::write_market(&env, &market, &config);
        NewCollateralFactor {
            market: market.clone(),
            collateral_factor_mantissa,
        }
        .publish(&env);
        Ok(())
    }

    pub fn set_liquidity_lens(env: Env, lens: Address) {
        require_admin(&env);
        storage::write_liquidity_lens(&env, &lens);
        NewLiquidityLens { lens: lens.clone() }.publish(&env);
    }

    pub fn get_liquidity_lens(env: Env) -> Option<Address> {
        storage::read_liquidity_lens(&env)
    }

    // Pause controls
    pub fn set_action_pause(
        env: Env,
        market: Address,
        action: PauseAction,
        paused: bool,
    ) -> Result<(), Error> {
        require_admin(&env);
        listed_market(&env, &market)?;
        storage::write_action_paused(&env, &market, action, paused);
        ActionPauseUpdated {
            market: market.clone(),
            action,
            paused,
        }
        .publish(&env);
        Ok(())
    }

    pub fn is_action_paused(env: Env, market: Address, action: PauseAction) -> bool {
        storage::read_action_paused(&env, &market, action)
    }

    // Rewards admin
    pub fn set_supply_reward_speed(env: Env, market: Address, speed: u128) -> Result<(), Error> {
        require_admin(&env);
        listed_market(&env, &market)?;
        // Settle the index at the old speed before the new one takes effect.
        if storage::read_supply_state(&env, &market).is_some() {
            accrue_supply_index(&env, &market)?;
        } else {
            storage::write_supply_state(
                &env,
                &market,
                &RewardState {
                    index: REWARD_INITIAL_INDEX,
                    block: env.ledger().sequence(),
                },
            );
        }
        storage::write_supply_speed(&env, &market, speed);
        SupplySpeedUpdated {
            market: market.clone(),
            speed,
        }
        .publish(&env);
        Ok(())
    }

    pub fn get_supply_reward_speed(env: Env, market: Address) -> u128 {
        storage::read_supply_speed(&env, &market)
    }

    pub fn set_borrow_reward_speed(env: Env, market: Address, speed: u128) -> Result<(), Error> {
        require_admin(&env);
        listed_market(&env, &market)?;
        if storage::read_borrow_state(&env, &market).is_some() {
            accrue_borrow_index(&env, &market)?;
        } else {
            storage::write_borrow_state(
                &env,
                &market,
                &RewardState {
                    index: REWARD_INITIAL_INDEX,
                    block: env.ledger().sequence(),
                },
            );
        }
        storage::write_borrow_speed(&env, &market, speed);
        BorrowSpeedUpdated {
            market: market.clone(),
            speed,
        }
        .publish(&env);
        Ok(())
    }

    pub fn get_borrow_reward_speed(env: Env, market: Address) -> u128 {
        storage::read_borrow_speed(&env, &market)
    }

    // Membership
    pub fn enter_market(env: Env, account: Address, market: Address) -> Result<(), Error> {
        account.require_auth();
        listed_market(&env, &market)?;
        if storage::read_action_paused(&env, &market, PauseAction::Enter) {
            return Err(Error::ActionPaused);
        }
        enter_market_internal(&env, &account, &market);
        Ok(())
    }

    pub fn get_account_markets(env: Env, account: Address) -> Vec<Address> {
        storage::read_account_markets(&env, &account)
    }

    pub fn is_member(env: Env, market: Address, account: Address) -> bool {
        storage::is_member(&env, &market, &account)
    }

    // Reward accrual. Markets call the index update before any balance
    // mutation and the distribution right after it, in that order.
    pub fn update_supply_index(env: Env, market: Address) -> Result<(), Error> {
        accrue_supply_index(&env, &market)
    }

    pub fn update_borrow_index(env: Env, market: Address) -> Result<(), Error> {
        accrue_borrow_index(&env, &market)
    }

    pub fn distribute_supplier_reward(
        env: Env,
        market: Address,
        supplier: Address,
    ) -> Result<(), Error> {
        credit_supplier(&env, &market, &supplier)
    }

    pub fn distribute_borrower_reward(
        env: Env,
        market: Address,
        borrower: Address,
    ) -> Result<(), Error> {
        credit_borrower(&env, &market, &borrower)
    }

    /// Accrue both indexes for a market and reconcile a single account on
    /// both sides (no transfer).
    pub fn accrue_account_market(env: Env, account: Address, market: Address) -> Result<(), Error> {
        accrue_supply_index(&env, &market)?;
        accrue_borrow_index(&env, &market)?;
        credit_supplier(&env, &market, &account)?;
        credit_borrower(&env, &market, &account)
    }

    /// Bring an account's accrued balance current across every market it
    /// has entered.
    pub fn refresh_accrued(env: Env, account: Address) -> Result<(), Error> {
        let markets = storage::read_account_markets(&env, &account);
        for i in 0..markets.len() {
            let market = markets.get(i).unwrap();
            accrue_supply_index(&env, &market)?;
            accrue_borrow_index(&env, &market)?;
            credit_supplier(&env, &market, &account)?;
            credit_borrower(&env, &market, &account)?;
        }
        Ok(())
    }

    pub fn get_accrued(env: Env, account: Address) -> u128 {
        storage::read_accrued(&env, &account)
    }

    pub fn get_supply_reward_state(env: Env, market: Address) -> Option<RewardState> {
        storage::read_supply_state(&env, &market)
    }

    pub fn get_borrow_reward_state(env: Env, market: Address) -> Option<RewardState> {
        storage::read_borrow_state(&env, &market)
    }

    pub fn get_supplier_index(env: Env, market: Address, account: Address) -> u128 {
        storage::read_supplier_index(&env, &market, &account)
    }

    pub fn get_borrower_index(env: Env, market: Address, account: Address) -> u128 {
        storage::read_borrower_index(&env, &market, &account)
    }

    // Liquidity
    /// Account liquidity across all entered markets: (surplus, shortfall),
    /// both scaled 1e18. Read-only.
    pub fn account_liquidity(env: Env, account: Address) -> Result<(u128, u128), Error> {
        evaluate_liquidity(&env, &account, None, 0, 0)
    }

    /// Liquidity as it would stand after redeeming `redeem_tokens` receipt
    /// tokens and borrowing `borrow_amount` underlying from
    /// `target_market`. Read-only.
    pub fn hypothetical_liquidity(
        env: Env,
        account: Address,
        target_market: Option<Address>,
        redeem_tokens: u128,
        borrow_amount: u128,
    ) -> Result<(u128, u128), Error> {
        evaluate_liquidity(&env, &account, target_market, redeem_tokens, borrow_amount)
    }

    // Policy gates, invoked by markets before mutating balances.
    pub fn deposit_allowed(env: Env, market: Address, account: Address) -> Result<(), Error> {
        listed_market(&env, &market)?;
        if storage::read_action_paused(&env, &market, PauseAction::Deposit) {
            return Err(Error::ActionPaused);
        }
        accrue_supply_index(&env, &market)?;
        credit_supplier(&env, &market, &account)
    }

    pub fn redeem_allowed(
        env: Env,
        market: Address,
        account: Address,
        redeem_tokens: u128,
    ) -> Result<(), Error> {
        listed_market(&env, &market)?;
        if storage::read_action_paused(&env, &market, PauseAction::Redeem) {
            return Err(Error::ActionPaused);
        }
        // A market the account never counted as collateral puts nothing at
        // risk; only members need the liquidity gate.
        if storage::is_member(&env, &market, &account) {
            let (_, shortfall) =
                evaluate_liquidity(&env, &account, Some(market.clone()), redeem_tokens, 0)?;
            if shortfall > 0 {
                return Err(Error::InsufficientLiquidity);
            }
        }
        accrue_supply_index(&env, &market)?;
        credit_supplier(&env, &market, &account)
    }

    pub fn borrow_allowed(
        env: Env,
        market: Address,
        account: Address,
        borrow_amount: u128,
    ) -> Result<(), Error> {
        listed_market(&env, &market)?;
        if storage::read_action_paused(&env, &market, PauseAction::Borrow) {
            return Err(Error::ActionPaused);
        }
        // First borrow enters the market on the borrower's behalf.
        if !storage::is_member(&env, &market, &account) {
            enter_market_internal(&env, &account, &market);
        }
        let (_, shortfall) =
            evaluate_liquidity(&env, &account, Some(market.clone()), 0, borrow_amount)?;
        if shortfall > 0 {
            return Err(Error::InsufficientLiquidity);
        }
        accrue_borrow_index(&env, &market)?;
        credit_borrower(&env, &market, &account)
    }

    pub fn repay_allowed(env: Env, market: Address, account: Address) -> Result<(), Error> {
        listed_market(&env, &market)?;
        accrue_borrow_index(&env, &market)?;
        credit_borrower(&env, &market, &account)
    }
}

fn require_admin(env: &Env) {
    let admin = storage::read_admin(env);
    admin.require_auth();
}

fn listed_market(env: &Env, market: &Address) -> Result<MarketConfig, Error> {
    match storage::read_market(env, market) {
        Some(config) if config.is_listed => Ok(config),
        _ => Err(Error::MarketNotListed),
    }
}

fn enter_market_internal(env: &Env, account: &Address, market: &Address) {
    if storage::is_member(env, market, account) {
        return;
    }
    let mut entered = storage::read_account_markets(env, account);
    entered.push_back(market.clone());
    // Flag and sequence move together.
    storage::write_account_markets(env, account, &entered);
    storage::write_membership(env, market, account);
    MarketEntered {
        account: account.clone(),
        market: market.clone(),
    }
    .publish(env);
}

// Rewards internals

fn accrue_supply_index(env: &Env, market: &Address) -> Result<(), Error> {
    let Some(mut state) = storage::read_supply_state(env, market) else {
        // Reward tracking was never configured for this market.
        return Ok(());
    };
    let current_block = env.ledger().sequence();
    let delta_blocks = current_block
        .checked_sub(state.block)
        .ok_or(Error::BlockOutOfRange)? as u128;
    if delta_blocks == 0 {
        return Ok(());
    }
    let speed = storage::read_supply_speed(env, market);
    if speed > 0 {
        let total_supply = MarketClient::new(env, market).get_total_supply();
        let accrued = delta_blocks.checked_mul(speed).ok_or(Error::MathOverflow)?;
        let ratio = Double::fraction(accrued, total_supply)?;
        state.index = Double::new(state.index).add(ratio)?.mantissa;
    }
    // The block marker advances even when nothing accrued, so a later
    // nonzero speed only covers its own elapsed window.
    state.block = current_block;
    storage::write_supply_state(env, market, &state);
    Ok(())
}

fn accrue_borrow_index(env: &Env, market: &Address) -> Result<(), Error> {
    let Some(mut state) = storage::read_borrow_state(env, market) else {
        return Ok(());
    };
    let current_block = env.ledger().sequence();
    let delta_blocks = current_block
        .checked_sub(state.block)
        .ok_or(Error::BlockOutOfRange)? as u128;
    if delta_blocks == 0 {
        return Ok(());
    }
    let speed = storage::read_borrow_speed(env, market);
    if speed > 0 {
        let client = MarketClient::new(env, market);
        // Stored borrows are denominated against the market borrow index;
        // normalize to real units before spreading the emission.
        let borrow_index = Exp::new(client.get_borrow_index());
        let total_borrows = math::div_by_exp(client.get_total_borrows(), borrow_index)?;
        let accrued = delta_blocks.checked_mul(speed).ok_or(Error::MathOverflow)?;
        let ratio = Double::fraction(accrued, total_borrows)?;
        state.index = Double::new(state.index).add(ratio)?.mantissa;
    }
    state.block = current_block;
    storage::write_borrow_state(env, market, &state);
    Ok(())
}

fn credit_supplier(env: &Env, market: &Address, supplier: &Address) -> Result<(), Error> {
    let Some(state) = storage::read_supply_state(env, market) else {
        return Ok(());
    };
    let supply_index = Double::new(state.index);
    let mut supplier_index = Double::new(storage::read_supplier_index(env, market, supplier));
    if supplier_index.mantissa == 0 && supply_index.mantissa >= REWARD_INITIAL_INDEX {
        // Accounts that supplied before tracking began start at the
        // initial baseline, not zero.
        supplier_index = Double::new(REWARD_INITIAL_INDEX);
    }
    let delta_index = supply_index.sub(supplier_index)?;
    let (tokens, _, _) = MarketClient::new(env, market).get_account_snapshot(supplier);
    let delta = delta_index.mul_units(tokens)?;
    if delta > 0 {
        let accrued = storage::read_accrued(env, supplier)
            .checked_add(delta)
            .ok_or(Error::MathOverflow)?;
        storage::write_accrued(env, supplier, accrued);
        DistributedSupplierReward {
            market: market.clone(),
            supplier: supplier.clone(),
            delta,
            index: supply_index.mantissa,
        }
        .publish(env);
    }
    storage::write_supplier_index(env, market, supplier, supply_index.mantissa);
    Ok(())
}

fn credit_borrower(env: &Env, market: &Address, borrower: &Address) -> Result<(), Error> {
    let Some(state) = storage::read_borrow_state(env, market) else {
        return Ok(());
    };
    let borrow_state_index = Double::new(state.index);
    let mut borrower_index = Double::new(storage::read_borrower_index(env, market, borrower));
    if borrower_index.mantissa == 0 && borrow_state_index.mantissa >= REWARD_INITIAL_INDEX {
        borrower_index = Double::new(REWARD_INITIAL_INDEX);
    }
    let delta_index = borrow_state_index.sub(borrower_index)?;
    let client = MarketClient::new(env, market);
    let (_, borrow_balance, _) = client.get_account_snapshot(borrower);
    let market_borrow_index = Exp::new(client.get_borrow_index());
    let units = math::div_by_exp(borrow_balance, market_borrow_index)?;
    let delta = delta_index.mul_units(units)?;
    if delta > 0 {
        let accrued = storage::read_accrued(env, borrower)
            .checked_add(delta)
            .ok_or(Error::MathOverflow)?;
        storage::write_accrued(env, borrower, accrued);
        DistributedBorrowerReward {
            market: market.clone(),
            borrower: borrower.clone(),
            delta,
            index: borrow_state_index.mantissa,
        }
        .publish(env);
    }
    storage::write_borrower_index(env, market, borrower, borrow_state_index.mantissa);
    Ok(())
}

// Liquidity internals

fn evaluate_liquidity(
    env: &Env,
    account: &Address,
    target_market: Option<Address>,
    redeem_tokens: u128,
    borrow_amount: u128,
) -> Result<(u128, u128), Error> {
    if let Some(lens) = storage::read_liquidity_lens(env) {
        let result = LiquidityLensClient::new(env, &lens).hypothetical_liquidity(
            account,
            &target_market,
            &redeem_tokens,
            &borrow_amount,
        );
        return Ok(result);
    }

    // Single commutative fold over the entered markets: addition and
    // subtraction only, so the result is invariant to entry order.
    let mut collateral: u128 = 0;
    let mut borrows: u128 = 0;
    let markets = storage::read_account_markets(env, account);
    for i in 0..markets.len() {
        let market = markets.get(i).unwrap();
        // An unlisted market inside an account's set is a data-integrity
        // violation; abort rather than skip.
        let config = listed_market(env, &market)?;
        let (tokens, borrow_balance, exchange_rate) =
            MarketClient::new(env, &market).get_account_snapshot(account);

        let weight =
            Exp::new(config.collateral_factor_mantissa).mul(Exp::new(exchange_rate))?;
        collateral = collateral
            .checked_add(weight.mul_scalar(tokens)?)
            .ok_or(Error::MathOverflow)?;
        borrows = borrows
            .checked_add(math::units_to_value(borrow_balance)?)
            .ok_or(Error::MathOverflow)?;

        if let Some(target) = &target_market {
            if *target == market {
                // Redeemed collateral leaves at the same weight it carried;
                // the hypothetical borrow is a straight liability.
                borrows = borrows
                    .checked_add(weight.mul_scalar(redeem_tokens)?)
                    .ok_or(Error::MathOverflow)?;
                borrows = borrows
                    .checked_add(math::units_to_value(borrow_amount)?)
                    .ok_or(Error::MathOverflow)?;
            }
        }
    }

    if collateral >= borrows {
        Ok((collateral - borrows, 0))
    } else {
        Ok((0, borrows - collateral))
    }
}
