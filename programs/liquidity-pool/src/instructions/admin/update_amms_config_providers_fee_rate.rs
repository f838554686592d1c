use crate::state::{AmmsConfig, AmmsConfigsManager};
use anchor_lang::prelude::*;

/// The new rate is checked against the unchanged protocol rate.
pub(crate) fn process(
    ctx: Context<UpdateAmmsConfigProvidersFeeRate>,
    new_providers_fee_rate_basis_points: u16,
) -> Result<()> {
    ctx.accounts
        .amms_configs_manager
        .require_authority(&ctx.accounts.authority.key())?;
    ctx.accounts
        .amms_config
        .update_providers_fee_rate(new_providers_fee_rate_basis_points)?;

    msg!(
        "Config {} providers fee set to {} bps",
        ctx.accounts.amms_config.id,
        new_providers_fee_rate_basis_points
    );
    emit!(UpdateAmmsConfigProvidersFeeRateEvent {
        authority: ctx.accounts.authority.key(),
        amms_config: ctx.accounts.amms_config.key(),
        new_providers_fee_rate_basis_points,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateAmmsConfigProvidersFeeRate<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [AmmsConfigsManager::SEED],
        bump = amms_configs_manager.bump()
    )]
    pub amms_configs_manager: Box<Account<'info, AmmsConfigsManager>>,

    #[account(
        mut,
        seeds = [AmmsConfig::SEED, amms_config.id.to_le_bytes().as_ref()],
        bump = amms_config.bump()
    )]
    pub amms_config: Box<Account<'info, AmmsConfig>>,
}

#[event]
pub struct UpdateAmmsConfigProvidersFeeRateEvent {
    pub authority: Pubkey,
    pub amms_config: Pubkey,
    pub new_providers_fee_rate_basis_points: u16,
    pub timestamp: i64,
}
