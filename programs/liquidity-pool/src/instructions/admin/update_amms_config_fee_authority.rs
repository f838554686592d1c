use crate::state::{AmmsConfig, AmmsConfigsManager};
use anchor_lang::prelude::*;

pub(crate) fn process(ctx: Context<UpdateAmmsConfigFeeAuthority>) -> Result<()> {
    ctx.accounts
        .amms_configs_manager
        .require_authority(&ctx.accounts.authority.key())?;

    let new_fee_authority = ctx.accounts.new_fee_authority.key();
    ctx.accounts.amms_config.update_fee_authority(new_fee_authority);

    msg!(
        "Config {} fee authority set to {}",
        ctx.accounts.amms_config.id,
        new_fee_authority
    );
    emit!(UpdateAmmsConfigFeeAuthorityEvent {
        authority: ctx.accounts.authority.key(),
        amms_config: ctx.accounts.amms_config.key(),
        new_fee_authority,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateAmmsConfigFeeAuthority<'info> {
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

    /// CHECK: Fee authority can be any key
    pub new_fee_authority: UncheckedAccount<'info>,
}

#[event]
pub struct UpdateAmmsConfigFeeAuthorityEvent {
    pub authority: Pubkey,
    pub amms_config: Pubkey,
    pub new_fee_authority: Pubkey,
    pub timestamp: i64,
}
