use crate::math::U192;

/// Both invariant snapshots, recomputed together after every reserve change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvariantSnapshots {
    pub constant_product_sqrt: U192,
    pub base_quote_ratio_sqrt: U192,
}

#[derive(Debug)]
pub struct LaunchPayload {
    pub(super) base_liquidity: u64,
    pub(super) quote_liquidity: u64,
    pub(super) lp_tokens_supply: u64,
    pub(super) initial_locked_liquidity: u64,
    pub(super) snapshots: InvariantSnapshots,
}

impl LaunchPayload {
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
    pub fn initial_locked_liquidity(&self) -> u64 {
        self.initial_locked_liquidity
    }

    /// LP tokens minted to the creator; the rest stays in the locked vault.
    #[inline]
    pub fn creator_lp_tokens(&self) -> u64 {
        self.lp_tokens_supply - self.initial_locked_liquidity
    }
}

#[derive(Debug)]
pub struct ProvidePayload {
    pub(super) base_liquidity: u64,
    pub(super) quote_liquidity: u64,
    pub(super) lp_tokens_supply: u64,
    pub(super) lp_tokens_to_mint: u64,
    pub(super) snapshots: InvariantSnapshots,
}

impl ProvidePayload {
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
    pub fn lp_tokens_to_mint(&self) -> u64 {
        self.lp_tokens_to_mint
    }
}

#[derive(Debug)]
pub struct WithdrawPayload {
    pub(super) base_liquidity: u64,
    pub(super) quote_liquidity: u64,
    pub(super) lp_tokens_supply: u64,
    pub(super) base_withdraw_amount: u64,
    pub(super) quote_withdraw_amount: u64,
    pub(super) snapshots: InvariantSnapshots,
}

impl WithdrawPayload {
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
    pub fn base_withdraw_amount(&self) -> u64 {
        self.base_withdraw_amount
    }

    #[inline]
    pub fn quote_withdraw_amount(&self) -> u64 {
        self.quote_withdraw_amount
    }
}

#[derive(Debug)]
pub struct SwapPayload {
    pub(super) base_liquidity: u64,
    pub(super) quote_liquidity: u64,
    pub(super) protocol_base_fees_to_redeem: u64,
    pub(super) protocol_quote_fees_to_redeem: u64,
    pub(super) amount_in: u64,
    pub(super) protocol_fee: u64,
    pub(super) providers_fee: u64,
    pub(super) amount_to_withdraw: u64,
    pub(super) snapshots: InvariantSnapshots,
}

impl SwapPayload {
    #[inline]
    pub fn base_liquidity(&self) -> u64 {
        self.base_liquidity
    }

    #[inline]
    pub fn quote_liquidity(&self) -> u64 {
        self.quote_liquidity
    }

    #[inline]
    pub fn protocol_base_fees_to_redeem(&self) -> u64 {
        self.protocol_base_fees_to_redeem
    }

    #[inline]
    pub fn protocol_quote_fees_to_redeem(&self) -> u64 {
        self.protocol_quote_fees_to_redeem
    }

    /// Input that reached the vault, after any transfer fee.
    #[inline]
    pub fn amount_in(&self) -> u64 {
        self.amount_in
    }

    #[inline]
    pub fn protocol_fee(&self) -> u64 {
        self.protocol_fee
    }

    #[inline]
    pub fn providers_fee(&self) -> u64 {
        self.providers_fee
    }

    #[inline]
    pub fn amount_to_withdraw(&self) -> u64 {
        self.amount_to_withdraw
    }
}

#[derive(Debug)]
pub struct CollectFeesPayload {
    pub(super) protocol_base_fees: u64,
    pub(super) protocol_quote_fees: u64,
}

impl CollectFeesPayload {
    #[inline]
    pub fn protocol_base_fees(&self) -> u64 {
        self.protocol_base_fees
    }

    #[inline]
    pub fn protocol_quote_fees(&self) -> u64 {
        self.protocol_quote_fees
    }
}
