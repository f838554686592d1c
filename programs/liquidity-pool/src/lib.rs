use anchor_lang::prelude::*;

pub mod authority;
pub mod constants;
pub mod errors;
pub mod instructions;
pub mod math;
pub mod state;
pub mod token_policy;
pub mod utils;

pub use instructions::*;

declare_id!("9ZPbjdKXsAQ5h1SNjK8iyKroyVFei8mJwcFG6TsPpHy4");

#[program]
pub mod liquidity_pool {
    use super::*;

    /// Claim the manager singleton and set both admin roles
    pub fn initialize_amms_configs_manager(ctx: Context<InitializeAmmsConfigsManager>) -> Result<()> {
        instructions::admin::initialize_amms_configs_manager::process(ctx)
    }

    /// Rotate the manager's delegated authority
    pub fn update_amms_configs_manager_authority(
        ctx: Context<UpdateAmmsConfigsManagerAuthority>,
    ) -> Result<()> {
        instructions::admin::update_amms_configs_manager_authority::process(ctx)
    }

    /// Rotate the manager's head authority
    pub fn update_amms_configs_manager_head_authority(
        ctx: Context<UpdateAmmsConfigsManagerHeadAuthority>,
    ) -> Result<()> {
        instructions::admin::update_amms_configs_manager_head_authority::process(ctx)
    }

    /// Create a fee schedule under the next config id
    pub fn initialize_amms_config(
        ctx: Context<InitializeAmmsConfig>,
        protocol_fee_rate_basis_points: u16,
        providers_fee_rate_basis_points: u16,
    ) -> Result<()> {
        instructions::admin::initialize_amms_config::process(
            ctx,
            protocol_fee_rate_basis_points,
            providers_fee_rate_basis_points,
        )
    }

    pub fn update_amms_config_fee_authority(ctx: Context<UpdateAmmsConfigFeeAuthority>) -> Result<()> {
        instructions::admin::update_amms_config_fee_authority::process(ctx)
    }

    pub fn update_amms_config_protocol_fee_rate(
        ctx: Context<UpdateAmmsConfigProtocolFeeRate>,
        new_protocol_fee_rate_basis_points: u16,
    ) -> Result<()> {
        instructions::admin::update_amms_config_protocol_fee_rate::process(
            ctx,
            new_protocol_fee_rate_basis_points,
        )
    }

    pub fn update_amms_config_providers_fee_rate(
        ctx: Context<UpdateAmmsConfigProvidersFeeRate>,
        new_providers_fee_rate_basis_points: u16,
    ) -> Result<()> {
        instructions::admin::update_amms_config_providers_fee_rate::process(
            ctx,
            new_providers_fee_rate_basis_points,
        )
    }

    /// Create a pool with its vaults and LP mint
    pub fn initialize_cp_amm(ctx: Context<InitializeCpAmm>) -> Result<()> {
        instructions::initialize_cp_amm::process(ctx)
    }

    /// Seed the pool with initial liquidity, locking part of the LP supply
    pub fn launch_cp_amm(ctx: Context<LaunchCpAmm>, base_liquidity: u64, quote_liquidity: u64) -> Result<()> {
        instructions::launch_cp_amm::process(ctx, base_liquidity, quote_liquidity)
    }

    /// Add liquidity at the current ratio and receive LP tokens
    pub fn provide_to_cp_amm(
        ctx: Context<ProvideToCpAmm>,
        base_liquidity: u64,
        quote_liquidity: u64,
    ) -> Result<()> {
        instructions::provide_to_cp_amm::process(ctx, base_liquidity, quote_liquidity)
    }

    /// Burn LP tokens for a share of both reserves
    pub fn withdraw_from_cp_amm(ctx: Context<WithdrawFromCpAmm>, lp_tokens: u64) -> Result<()> {
        instructions::withdraw_from_cp_amm::process(ctx, lp_tokens)
    }

    /// Swap using the constant product formula
    pub fn swap_in_cp_amm(
        ctx: Context<SwapInCpAmm>,
        swap_amount: u64,
        estimated_result: u64,
        allowed_slippage: u64,
        is_in_out: bool,
    ) -> Result<()> {
        instructions::swap_in_cp_amm::process(
            ctx,
            swap_amount,
            estimated_result,
            allowed_slippage,
            is_in_out,
        )
    }

    /// Pay accrued protocol fees out to the fee authority
    pub fn collect_fees_from_cp_amm(ctx: Context<CollectFeesFromCpAmm>) -> Result<()> {
        instructions::collect_fees_from_cp_amm::process(ctx)
    }
}
