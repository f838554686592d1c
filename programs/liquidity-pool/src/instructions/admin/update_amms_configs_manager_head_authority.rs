use crate::state::AmmsConfigsManager;
use anchor_lang::prelude::*;

/// Hand the head authority over. Only the current head authority may sign.
pub(crate) fn process(ctx: Context<UpdateAmmsConfigsManagerHeadAuthority>) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    let new_head_authority = ctx.accounts.new_head_authority.key();
    ctx.accounts
        .amms_configs_manager
        .update_head_authority(&signer, new_head_authority)?;

    msg!("Manager head authority set to {}", new_head_authority);
    emit!(UpdateAmmsConfigsManagerHeadAuthorityEvent {
        signer,
        new_head_authority,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateAmmsConfigsManagerHeadAuthority<'info> {
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [AmmsConfigsManager::SEED],
        bump = amms_configs_manager.bump()
    )]
    pub amms_configs_manager: Box<Account<'info, AmmsConfigsManager>>,

    /// CHECK: Any key can become the head authority
    pub new_head_authority: UncheckedAccount<'info>,
}

#[event]
pub struct UpdateAmmsConfigsManagerHeadAuthorityEvent {
    pub signer: Pubkey,
    pub new_head_authority: Pubkey,
    pub timestamp: i64,
}
