use crate::constants::ANCHOR_DISCRIMINATOR;
use crate::state::{AmmsConfig, AmmsConfigsManager};
use anchor_lang::prelude::*;

/// Create the fee schedule with id `configs_count` and advance the counter.
pub(crate) fn process(
    ctx: Context<InitializeAmmsConfig>,
    protocol_fee_rate_basis_points: u16,
    providers_fee_rate_basis_points: u16,
) -> Result<()> {
    ctx.accounts
        .amms_configs_manager
        .require_authority(&ctx.accounts.authority.key())?;

    let id = ctx.accounts.amms_configs_manager.configs_count();
    ctx.accounts.amms_config.initialize(
        ctx.accounts.fee_authority.key(),
        protocol_fee_rate_basis_points,
        providers_fee_rate_basis_points,
        id,
        ctx.bumps.amms_config,
    )?;
    ctx.accounts.amms_configs_manager.increment_configs_count()?;

    let amms_config = &ctx.accounts.amms_config;
    msg!(
        "Config {} initialized - protocol fee: {} bps, providers fee: {} bps",
        id,
        protocol_fee_rate_basis_points,
        providers_fee_rate_basis_points
    );
    emit!(InitializeAmmsConfigEvent {
        authority: ctx.accounts.authority.key(),
        amms_config: amms_config.key(),
        fee_authority: amms_config.fee_authority(),
        protocol_fee_rate_basis_points,
        providers_fee_rate_basis_points,
        id,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeAmmsConfig<'info> {
    /// Manager authority or head authority, pays for the config
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [AmmsConfigsManager::SEED],
        bump = amms_configs_manager.bump()
    )]
    pub amms_configs_manager: Box<Account<'info, AmmsConfigsManager>>,

    #[account(
        init,
        payer = authority,
        space = ANCHOR_DISCRIMINATOR + AmmsConfig::INIT_SPACE,
        seeds = [AmmsConfig::SEED, amms_configs_manager.configs_count().to_le_bytes().as_ref()],
        bump
    )]
    pub amms_config: Box<Account<'info, AmmsConfig>>,

    /// CHECK: Fee authority can be any key
    pub fee_authority: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct InitializeAmmsConfigEvent {
    pub authority: Pubkey,
    pub amms_config: Pubkey,
    pub fee_authority: Pubkey,
    pub protocol_fee_rate_basis_points: u16,
    pub providers_fee_rate_basis_points: u16,
    pub id: u64,
    pub timestamp: i64,
}
