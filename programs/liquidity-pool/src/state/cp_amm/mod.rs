//! Constant-product pool account and its state transitions.
//!
//! Every operation is split in two: a `get_*_payload` method that validates
//! the request against the current state and computes the full outcome
//! without mutating anything, and an apply method that commits the payload.
//! Handlers issue token CPIs between the two, so any failure surfaces before
//! the first transfer.

mod payloads;

pub use payloads::*;

use anchor_lang::prelude::*;

use crate::constants::{BOOTSTRAP_LIQUIDITY_MULTIPLIER, LP_MINT_DECIMALS};
use crate::errors::AmmError;
use crate::math::{sqrt_product_q64_128, sqrt_ratio_q64_128, U192};
use crate::state::AmmsConfig;

/// Addresses a pool is bound to at creation.
#[derive(Clone, Copy, Debug)]
pub struct CpAmmKeys {
    pub creator: Pubkey,
    pub amms_config: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,
    pub locked_lp_vault: Pubkey,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CpAmmBumps {
    pub cp_amm: u8,
    pub base_vault: u8,
    pub quote_vault: u8,
    pub locked_lp_vault: u8,
}

#[account]
#[derive(InitSpace, Default)]
pub struct CpAmm {
    is_initialized: bool,
    is_launched: bool,

    /// LP tokens minted into the locked vault at launch, never redeemable
    initial_locked_liquidity: u64,

    /// Q64.128 square root of `base_liquidity * quote_liquidity`
    constant_product_sqrt: U192,

    /// Q64.128 square root of `base_liquidity / quote_liquidity`
    base_quote_ratio_sqrt: U192,

    /// Tradable reserves, net of transfer fees and excluding protocol fees
    base_liquidity: u64,
    quote_liquidity: u64,

    /// Mirrors the LP mint supply, locked liquidity included
    lp_tokens_supply: u64,

    protocol_base_fees_to_redeem: u64,
    protocol_quote_fees_to_redeem: u64,

    base_mint: Pubkey,
    quote_mint: Pubkey,
    pub lp_mint: Pubkey,

    base_vault: Pubkey,
    quote_vault: Pubkey,
    locked_lp_vault: Pubkey,

    amms_config: Pubkey,
    creator: Pubkey,

    bump: [u8; 1],
    base_vault_bump: u8,
    quote_vault_bump: u8,
    locked_lp_vault_bump: u8,
}

impl InvariantSnapshots {
    pub fn compute(base_liquidity: u64, quote_liquidity: u64) -> Result<Self> {
        Ok(Self {
            constant_product_sqrt: sqrt_product_q64_128(base_liquidity, quote_liquidity),
            base_quote_ratio_sqrt: sqrt_ratio_q64_128(base_liquidity, quote_liquidity)
                .ok_or(AmmError::ArithmeticOverflow)?,
        })
    }
}

fn mul_div(value: u64, numerator: u64, denominator: u64) -> Result<u64> {
    require!(denominator > 0, AmmError::ArithmeticOverflow);
    let result = (value as u128)
        .checked_mul(numerator as u128)
        .ok_or(AmmError::ArithmeticOverflow)?
        / denominator as u128;
    u64::try_from(result).map_err(|_| error!(AmmError::ArithmeticOverflow))
}

impl CpAmm {
    pub const SEED: &'static [u8] = b"cp_amm";
    pub const VAULT_SEED: &'static [u8] = b"vault";

    pub fn seeds(&self) -> [&[u8]; 3] {
        [Self::SEED, self.lp_mint.as_ref(), &self.bump]
    }

    pub fn initialize(&mut self, keys: CpAmmKeys, bumps: CpAmmBumps) -> Result<()> {
        require!(!self.is_initialized, AmmError::AlreadyExists);
        require_keys_neq!(keys.base_mint, keys.quote_mint, AmmError::InvalidMint);

        self.is_initialized = true;
        self.is_launched = false;
        self.initial_locked_liquidity = 0;
        self.constant_product_sqrt = U192::ZERO;
        self.base_quote_ratio_sqrt = U192::ZERO;
        self.base_liquidity = 0;
        self.quote_liquidity = 0;
        self.lp_tokens_supply = 0;
        self.protocol_base_fees_to_redeem = 0;
        self.protocol_quote_fees_to_redeem = 0;

        self.creator = keys.creator;
        self.amms_config = keys.amms_config;
        self.base_mint = keys.base_mint;
        self.quote_mint = keys.quote_mint;
        self.lp_mint = keys.lp_mint;
        self.base_vault = keys.base_vault;
        self.quote_vault = keys.quote_vault;
        self.locked_lp_vault = keys.locked_lp_vault;

        self.bump = [bumps.cp_amm];
        self.base_vault_bump = bumps.base_vault;
        self.quote_vault_bump = bumps.quote_vault;
        self.locked_lp_vault_bump = bumps.locked_lp_vault;
        Ok(())
    }

    fn require_launched(&self) -> Result<()> {
        require!(self.is_launched, AmmError::NotLaunched);
        Ok(())
    }

    /// Amounts are what the vaults will actually receive.
    pub fn get_launch_payload(&self, base_liquidity: u64, quote_liquidity: u64) -> Result<LaunchPayload> {
        require!(self.is_initialized, AmmError::InvalidAccount);
        require!(!self.is_launched, AmmError::AlreadyLaunched);
        require!(
            base_liquidity > 0 && quote_liquidity > 0,
            AmmError::ZeroAmount
        );

        let lp_tokens_supply = U192::multiply(base_liquidity, quote_liquidity)
            .sqrt()
            .to_u64()
            .ok_or(AmmError::ArithmeticOverflow)?;
        let initial_locked_liquidity = 10u64.pow(LP_MINT_DECIMALS as u32);
        require!(
            lp_tokens_supply >= initial_locked_liquidity * BOOTSTRAP_LIQUIDITY_MULTIPLIER,
            AmmError::BelowBootstrapFloor
        );

        Ok(LaunchPayload {
            base_liquidity,
            quote_liquidity,
            lp_tokens_supply,
            initial_locked_liquidity,
            snapshots: InvariantSnapshots::compute(base_liquidity, quote_liquidity)?,
        })
    }

    pub fn launch(&mut self, payload: LaunchPayload) {
        self.is_launched = true;
        self.base_liquidity = payload.base_liquidity;
        self.quote_liquidity = payload.quote_liquidity;
        self.lp_tokens_supply = payload.lp_tokens_supply;
        self.initial_locked_liquidity = payload.initial_locked_liquidity;
        self.apply_snapshots(payload.snapshots);
    }

    /// The net contribution must have exactly the pool's Q64.128 ratio root.
    pub fn get_provide_payload(&self, base_liquidity: u64, quote_liquidity: u64) -> Result<ProvidePayload> {
        self.require_launched()?;
        require!(
            base_liquidity > 0 && quote_liquidity > 0,
            AmmError::ZeroAmount
        );

        let ratio_sqrt = sqrt_ratio_q64_128(base_liquidity, quote_liquidity)
            .ok_or(AmmError::ArithmeticOverflow)?;
        require!(
            ratio_sqrt == self.base_quote_ratio_sqrt,
            AmmError::RatioMismatch
        );

        let lp_from_base = mul_div(self.lp_tokens_supply, base_liquidity, self.base_liquidity)?;
        let lp_from_quote = mul_div(self.lp_tokens_supply, quote_liquidity, self.quote_liquidity)?;
        let lp_tokens_to_mint = lp_from_base.min(lp_from_quote);
        require!(lp_tokens_to_mint > 0, AmmError::ZeroAmount);

        let new_base_liquidity = self
            .base_liquidity
            .checked_add(base_liquidity)
            .ok_or(AmmError::ArithmeticOverflow)?;
        let new_quote_liquidity = self
            .quote_liquidity
            .checked_add(quote_liquidity)
            .ok_or(AmmError::ArithmeticOverflow)?;
        let new_lp_tokens_supply = self
            .lp_tokens_supply
            .checked_add(lp_tokens_to_mint)
            .ok_or(AmmError::ArithmeticOverflow)?;

        Ok(ProvidePayload {
            base_liquidity: new_base_liquidity,
            quote_liquidity: new_quote_liquidity,
            lp_tokens_supply: new_lp_tokens_supply,
            lp_tokens_to_mint,
            snapshots: InvariantSnapshots::compute(new_base_liquidity, new_quote_liquidity)?,
        })
    }

    pub fn provide(&mut self, payload: ProvidePayload) {
        self.base_liquidity = payload.base_liquidity;
        self.quote_liquidity = payload.quote_liquidity;
        self.lp_tokens_supply = payload.lp_tokens_supply;
        self.apply_snapshots(payload.snapshots);
    }

    /// Payouts are pro rata against the pre-burn supply, rounded down.
    pub fn get_withdraw_payload(&self, lp_tokens: u64) -> Result<WithdrawPayload> {
        self.require_launched()?;
        require!(lp_tokens > 0, AmmError::ZeroAmount);
        let redeemable = self
            .lp_tokens_supply
            .checked_sub(self.initial_locked_liquidity)
            .ok_or(AmmError::ArithmeticOverflow)?;
        require!(lp_tokens <= redeemable, AmmError::InsufficientFunds);

        let base_withdraw_amount = mul_div(lp_tokens, self.base_liquidity, self.lp_tokens_supply)?;
        let quote_withdraw_amount = mul_div(lp_tokens, self.quote_liquidity, self.lp_tokens_supply)?;
        require!(
            base_withdraw_amount > 0 && quote_withdraw_amount > 0,
            AmmError::ZeroAmount
        );

        // lp_tokens < supply, so both reserves stay positive.
        let new_base_liquidity = self.base_liquidity - base_withdraw_amount;
        let new_quote_liquidity = self.quote_liquidity - quote_withdraw_amount;

        Ok(WithdrawPayload {
            base_liquidity: new_base_liquidity,
            quote_liquidity: new_quote_liquidity,
            lp_tokens_supply: self.lp_tokens_supply - lp_tokens,
            base_withdraw_amount,
            quote_withdraw_amount,
            snapshots: InvariantSnapshots::compute(new_base_liquidity, new_quote_liquidity)?,
        })
    }

    pub fn withdraw(&mut self, payload: WithdrawPayload) {
        self.base_liquidity = payload.base_liquidity;
        self.quote_liquidity = payload.quote_liquidity;
        self.lp_tokens_supply = payload.lp_tokens_supply;
        self.apply_snapshots(payload.snapshots);
    }

    /// `swap_amount` is the input that reached the vault. `is_in_out` selects
    /// base in, quote out; otherwise quote in, base out.
    pub fn get_swap_payload(
        &self,
        swap_amount: u64,
        estimated_result: u64,
        allowed_slippage: u64,
        amms_config: &AmmsConfig,
        is_in_out: bool,
    ) -> Result<SwapPayload> {
        self.require_launched()?;
        require!(swap_amount > 0, AmmError::ZeroAmount);

        let protocol_fee = amms_config.calculate_protocol_fee(swap_amount)?;
        let providers_fee = amms_config.calculate_providers_fee(swap_amount)?;
        let effective_in = swap_amount
            .checked_sub(protocol_fee)
            .and_then(|amount| amount.checked_sub(providers_fee))
            .ok_or(AmmError::ArithmeticOverflow)?;

        let (reserve_in, reserve_out) = if is_in_out {
            (self.base_liquidity, self.quote_liquidity)
        } else {
            (self.quote_liquidity, self.base_liquidity)
        };

        let invariant = (reserve_in as u128) * (reserve_out as u128);
        let new_reserve_in_for_pricing = (reserve_in as u128) + (effective_in as u128);
        let new_reserve_out = invariant / new_reserve_in_for_pricing;
        let amount_to_withdraw = (reserve_out as u128 - new_reserve_out) as u64;

        require!(
            amount_to_withdraw < reserve_out,
            AmmError::ReserveWouldBeDrained
        );
        require!(amount_to_withdraw > 0, AmmError::ZeroAmount);
        require!(
            amount_to_withdraw.abs_diff(estimated_result) <= allowed_slippage,
            AmmError::SlippageExceeded
        );

        // Providers fee stays in the pool; protocol fee is tracked apart.
        let new_reserve_in = reserve_in
            .checked_add(swap_amount - protocol_fee)
            .ok_or(AmmError::ArithmeticOverflow)?;
        let new_reserve_out = reserve_out - amount_to_withdraw;

        let (base_liquidity, quote_liquidity, protocol_base_fees_to_redeem, protocol_quote_fees_to_redeem) =
            if is_in_out {
                (
                    new_reserve_in,
                    new_reserve_out,
                    self.protocol_base_fees_to_redeem
                        .checked_add(protocol_fee)
                        .ok_or(AmmError::ArithmeticOverflow)?,
                    self.protocol_quote_fees_to_redeem,
                )
            } else {
                (
                    new_reserve_out,
                    new_reserve_in,
                    self.protocol_base_fees_to_redeem,
                    self.protocol_quote_fees_to_redeem
                        .checked_add(protocol_fee)
                        .ok_or(AmmError::ArithmeticOverflow)?,
                )
            };

        Ok(SwapPayload {
            base_liquidity,
            quote_liquidity,
            protocol_base_fees_to_redeem,
            protocol_quote_fees_to_redeem,
            amount_in: swap_amount,
            protocol_fee,
            providers_fee,
            amount_to_withdraw,
            snapshots: InvariantSnapshots::compute(base_liquidity, quote_liquidity)?,
        })
    }

    pub fn swap(&mut self, payload: SwapPayload) {
        self.base_liquidity = payload.base_liquidity;
        self.quote_liquidity = payload.quote_liquidity;
        self.protocol_base_fees_to_redeem = payload.protocol_base_fees_to_redeem;
        self.protocol_quote_fees_to_redeem = payload.protocol_quote_fees_to_redeem;
        self.apply_snapshots(payload.snapshots);
    }

    pub fn get_collect_fees_payload(&self) -> Result<CollectFeesPayload> {
        self.require_launched()?;
        require!(
            self.protocol_base_fees_to_redeem > 0 || self.protocol_quote_fees_to_redeem > 0,
            AmmError::NothingToCollect
        );
        Ok(CollectFeesPayload {
            protocol_base_fees: self.protocol_base_fees_to_redeem,
            protocol_quote_fees: self.protocol_quote_fees_to_redeem,
        })
    }

    /// Reserves and snapshots are left alone.
    pub fn collect_fees(&mut self, _payload: CollectFeesPayload) {
        self.protocol_base_fees_to_redeem = 0;
        self.protocol_quote_fees_to_redeem = 0;
    }

    fn apply_snapshots(&mut self, snapshots: InvariantSnapshots) {
        self.constant_product_sqrt = snapshots.constant_product_sqrt;
        self.base_quote_ratio_sqrt = snapshots.base_quote_ratio_sqrt;
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.is_initialized
    }

    #[inline]
    pub fn is_launched(&self) -> bool {
        self.is_launched
    }

    #[inline]
    pub fn initial_locked_liquidity(&self) -> u64 {
        self.initial_locked_liquidity
    }

    #[inline]
    pub fn constant_product_sqrt(&self) -> U192 {
        self.constant_product_sqrt
    }

    #[inline]
    pub fn base_quote_ratio_sqrt(&self) -> U192 {
        self.base_quote_ratio_sqrt
    }

    #[inline]
    pub fn base_liquidity(&self) -> u64 {
        self.base_liquidity
    }

    #[inline]
    pub fn quote_liquidity(&self) -> u64 {
        self.quote_liquidity
    }

    #[inline]
    pub fn lp_tokens_supply(&self) -> u64 {
        self.lp_tokens_supply
    }

    #[inline]
    pub fn protocol_base_fees_to_redeem(&self) -> u64 {
        self.protocol_base_fees_to_redeem
    }

    #[inline]
    pub fn protocol_quote_fees_to_redeem(&self) -> u64 {
        self.protocol_quote_fees_to_redeem
    }

    #[inline]
    pub fn base_mint(&self) -> Pubkey {
        self.base_mint
    }

    #[inline]
    pub fn quote_mint(&self) -> Pubkey {
        self.quote_mint
    }

    #[inline]
    pub fn base_vault(&self) -> Pubkey {
        self.base_vault
    }

    #[inline]
    pub fn quote_vault(&self) -> Pubkey {
        self.quote_vault
    }

    #[inline]
    pub fn locked_lp_vault(&self) -> Pubkey {
        self.locked_lp_vault
    }

    #[inline]
    pub fn amms_config(&self) -> Pubkey {
        self.amms_config
    }

    #[inline]
    pub fn creator(&self) -> Pubkey {
        self.creator
    }

    #[inline]
    pub fn bump(&self) -> u8 {
        self.bump[0]
    }

    #[inline]
    pub fn base_vault_bump(&self) -> u8 {
        self.base_vault_bump
    }

    #[inline]
    pub fn quote_vault_bump(&self) -> u8 {
        self.quote_vault_bump
    }

    #[inline]
    pub fn locked_lp_vault_bump(&self) -> u8 {
        self.locked_lp_vault_bump
    }
}
